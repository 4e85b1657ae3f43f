//! # Scoring pipeline
//! Pure, stateless recomputation of segment priorities for one request:
//!
//! 1. score every feature against the current weight vector,
//! 2. normalize raw scores against the network-wide maxima,
//! 3. roll per-criterion scores up into two priority scalars,
//! 4. repeat 1–3 independently for the previous weight vector,
//! 5. turn the scalar deltas into a bounded difference signal,
//! 6. assemble the annotated output collection.
//!
//! No I/O, no shared state, no caching: every call recomputes from the raw
//! source fields of the collection it is handed.

pub mod diff;
pub mod network;
pub mod segment;

mod assemble;

pub use diff::{difference_signal, rescale, DifferenceSignal};
pub use network::{apply_network_max, priority_composition, priority_norm};
pub use segment::{score_segment, CriterionScore, SegmentScore};

use crate::criteria::Criterion;
use crate::geojson::{Feature, FeatureCollection};
use crate::weights::WeightVector;

/// Everything one weight vector produced across the network.
#[derive(Debug, Clone, PartialEq)]
pub struct PassOutput {
    pub segments: Vec<SegmentScore>,
    pub priority_norm: Vec<f64>,
    pub priority_composition: Vec<f64>,
}

/// Run one full scoring pass (scorer → normalizer → aggregator) over the
/// feature list with one weight vector.
pub fn run_pass(
    features: &[Feature],
    weights: &WeightVector,
    registry: &[Criterion],
) -> PassOutput {
    let mut segments: Vec<SegmentScore> = features
        .iter()
        .map(|f| score_segment(&f.properties, weights, registry))
        .collect();

    apply_network_max(&mut segments, registry);

    let priority_norm_scores = segments.iter().map(priority_norm).collect();
    let priority_composition_scores = segments.iter().map(priority_composition).collect();

    PassOutput {
        segments,
        priority_norm: priority_norm_scores,
        priority_composition: priority_composition_scores,
    }
}

/// Recompute the whole network under `current`, compare against an
/// independent pass under `previous`, and return the annotated collection.
///
/// The previous pass starts from the same raw source fields as the current
/// one — nothing is reused between the passes, so handing in two equal
/// vectors yields an all-zero difference signal by construction.
pub fn rescore(
    base: &FeatureCollection,
    current: &WeightVector,
    previous: &WeightVector,
    registry: &[Criterion],
) -> FeatureCollection {
    let current_pass = run_pass(&base.features, current, registry);
    let previous_pass = run_pass(&base.features, previous, registry);

    let norm_diff = difference_signal(&current_pass.priority_norm, &previous_pass.priority_norm);
    let comp_diff = difference_signal(
        &current_pass.priority_composition,
        &previous_pass.priority_composition,
    );

    assemble::assemble(base, &current_pass, &norm_diff, &comp_diff, registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::as_number;
    use serde_json::json;

    // Single-criterion setup used across the pipeline tests: one dimension
    // `c1` read from field `S`, default weight 5.
    const ONE_CRITERION: [Criterion; 1] = [Criterion {
        key: "c1",
        source_field: "S",
        label: "C1",
        default_weight: 5.0,
    }];

    fn two_segments() -> FeatureCollection {
        serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": null, "properties": { "S": 2 } },
                { "type": "Feature", "geometry": null, "properties": { "S": 4 } }
            ]
        }))
        .expect("fixture")
    }

    fn prop(fc: &FeatureCollection, i: usize, key: &str) -> f64 {
        as_number(fc.features[i].properties.get(key).expect(key), f64::NAN)
    }

    #[test]
    fn single_pass_scores_match_hand_computation() {
        let weights = WeightVector::defaults(&ONE_CRITERION);
        let pass = run_pass(&two_segments().features, &weights, &ONE_CRITERION);

        // Inputs 2 and 4 at weight 5: raw 10/20, network max 20.
        assert_eq!(pass.segments[0].criteria[0].raw, 10.0);
        assert_eq!(pass.segments[1].criteria[0].raw, 20.0);
        assert_eq!(pass.segments[0].criteria[0].network_max, 20.0);

        assert!((pass.priority_norm[0] - 0.5).abs() < 1e-9);
        assert!((pass.priority_norm[1] - 1.0).abs() < 1e-9);
        assert!((pass.priority_composition[0] - 2.0).abs() < 1e-9);
        assert!((pass.priority_composition[1] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn zeroed_previous_pass_spreads_the_difference_signal() {
        let current = WeightVector::defaults(&ONE_CRITERION);
        let mut previous = WeightVector::defaults(&ONE_CRITERION);
        previous.set("c1", 0.0);

        let out = rescore(&two_segments(), &current, &previous, &ONE_CRITERION);

        // Previous pass scores 0 everywhere (zero-max fallback), so the raw
        // deltas are the current norms and the rescale spans the full range.
        assert!((prop(&out, 0, "Difference_Raw") - 0.5).abs() < 1e-9);
        assert!((prop(&out, 1, "Difference_Raw") - 1.0).abs() < 1e-9);
        assert!((prop(&out, 0, "Difference_Score") + 1.0).abs() < 1e-9);
        assert!((prop(&out, 1, "Difference_Score") - 1.0).abs() < 1e-9);

        assert!((prop(&out, 0, "Priority_Score_Norm") - 0.5).abs() < 1e-9);
        assert!((prop(&out, 1, "Priority_Score_Norm") - 1.0).abs() < 1e-9);
        assert!((prop(&out, 0, "c1_network_max_score") - 20.0).abs() < 1e-9);
    }

    #[test]
    fn equal_weight_vectors_zero_out_every_difference() {
        let weights = WeightVector::defaults(&ONE_CRITERION);
        let out = rescore(&two_segments(), &weights, &weights, &ONE_CRITERION);

        for i in 0..2 {
            assert_eq!(prop(&out, i, "Difference_Raw"), 0.0);
            assert_eq!(prop(&out, i, "Difference_Score"), 0.0);
            assert_eq!(prop(&out, i, "Difference_Composition_Raw"), 0.0);
            assert_eq!(prop(&out, i, "Difference_Composition_Score"), 0.0);
        }
    }

    #[test]
    fn rescore_is_deterministic() {
        let current = WeightVector::defaults(&ONE_CRITERION);
        let mut previous = WeightVector::defaults(&ONE_CRITERION);
        previous.set("c1", 2.5);

        let base = two_segments();
        let a = rescore(&base, &current, &previous, &ONE_CRITERION);
        let b = rescore(&base, &current, &previous, &ONE_CRITERION);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_collection_scores_to_empty_output() {
        let base: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": []
        }))
        .expect("fixture");

        let weights = WeightVector::defaults(&ONE_CRITERION);
        let out = rescore(&base, &weights, &weights, &ONE_CRITERION);
        assert!(out.features.is_empty());
        assert_eq!(out.name.as_deref(), Some("network"));
    }
}

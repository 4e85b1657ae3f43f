//! # Network normalizer & priority aggregation
//! Second stage of a scoring pass. The normalizer is an explicit two-pass
//! reduce-then-map over the whole feature list: the per-criterion maximum
//! must be fully known before any normalized value can be computed, so this
//! never fuses with per-feature scoring.

use crate::criteria::Criterion;
use crate::score::segment::SegmentScore;

/// Compute the network-wide maximum raw score per criterion and rescale every
/// segment against it. Returns the maxima in registry order.
///
/// Maxima are seeded at 0.0; raw scores are products of non-negative inputs
/// and weights, so a criterion nobody scores on keeps a 0 max and every
/// normalized value under it falls back to 0.
pub fn apply_network_max(segments: &mut [SegmentScore], registry: &[Criterion]) -> Vec<f64> {
    // Pass 1: reduce to the maximum raw score per criterion.
    let mut max_by_criterion = vec![0.0f64; registry.len()];
    for seg in segments.iter() {
        for (j, cs) in seg.criteria.iter().enumerate() {
            if cs.raw > max_by_criterion[j] {
                max_by_criterion[j] = cs.raw;
            }
        }
    }

    // Pass 2: write the maxima back and normalize each raw score.
    for seg in segments.iter_mut() {
        for (j, cs) in seg.criteria.iter_mut().enumerate() {
            let max = max_by_criterion[j];
            cs.network_max = max;
            cs.norm_network = if max > 0.0 { cs.raw / max } else { 0.0 };
        }
    }

    max_by_criterion
}

/// Sum of per-criterion network-normalized scores for one feature.
pub fn priority_norm(seg: &SegmentScore) -> f64 {
    seg.criteria.iter().map(|cs| cs.norm_network).sum()
}

/// Sum of per-criterion composition scores for one feature. Equals the
/// weighted average of the inputs on their original scale when the weight
/// sum is positive.
pub fn priority_composition(seg: &SegmentScore) -> f64 {
    seg.criteria.iter().map(|cs| cs.norm_composition).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::CRITERIA;
    use crate::geojson::PropertyMap;
    use crate::score::segment::score_segment;
    use crate::weights::WeightVector;
    use serde_json::json;

    fn segment(safety_input: f64) -> SegmentScore {
        let mut props = PropertyMap::new();
        props.insert("Safety_Score".into(), json!(safety_input));
        score_segment(&props, &WeightVector::defaults(&CRITERIA), &CRITERIA)
    }

    #[test]
    fn max_is_an_upper_bound_for_every_segment() {
        let mut segments = vec![segment(1.0), segment(3.0), segment(2.0)];
        let maxima = apply_network_max(&mut segments, &CRITERIA);

        for seg in &segments {
            for (j, cs) in seg.criteria.iter().enumerate() {
                assert!(maxima[j] >= cs.raw);
                assert_eq!(cs.network_max, maxima[j]);
            }
        }

        let safety = CRITERIA.iter().position(|c| c.key == "safety").unwrap();
        assert!((maxima[safety] - 15.0).abs() < 1e-9);
        assert!((segments[0].criteria[safety].norm_network - 1.0 / 3.0).abs() < 1e-9);
        assert!((segments[1].criteria[safety].norm_network - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_max_normalizes_to_zero() {
        // No feature carries any source field: every max is 0 and no division
        // happens.
        let mut segments = vec![
            score_segment(
                &PropertyMap::new(),
                &WeightVector::defaults(&CRITERIA),
                &CRITERIA,
            ),
            score_segment(
                &PropertyMap::new(),
                &WeightVector::defaults(&CRITERIA),
                &CRITERIA,
            ),
        ];
        let maxima = apply_network_max(&mut segments, &CRITERIA);
        assert!(maxima.iter().all(|m| *m == 0.0));
        for seg in &segments {
            assert!(seg.criteria.iter().all(|cs| cs.norm_network == 0.0));
        }
    }

    #[test]
    fn empty_network_yields_zero_maxima() {
        let mut segments: Vec<SegmentScore> = Vec::new();
        let maxima = apply_network_max(&mut segments, &CRITERIA);
        assert_eq!(maxima.len(), CRITERIA.len());
        assert!(maxima.iter().all(|m| *m == 0.0));
    }

    #[test]
    fn priority_sums_cover_all_criteria() {
        let mut segments = vec![segment(2.0), segment(4.0)];
        apply_network_max(&mut segments, &CRITERIA);

        // Only safety carries data, so the norm sum is exactly its share.
        assert!((priority_norm(&segments[0]) - 0.5).abs() < 1e-9);
        assert!((priority_norm(&segments[1]) - 1.0).abs() < 1e-9);

        // Composition equals raw_sum / weight_sum while weights are positive.
        for seg in &segments {
            let raw_sum: f64 = seg.criteria.iter().map(|cs| cs.raw).sum();
            assert!((priority_composition(seg) - raw_sum / seg.weight_sum).abs() < 1e-9);
        }
    }
}

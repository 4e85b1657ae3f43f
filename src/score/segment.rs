//! # Per-feature scorer
//! First stage of a scoring pass: for one feature and one weight vector,
//! compute the raw per-criterion products and the within-segment composition
//! shares. Network-relative fields stay zero until the network pass fills
//! them in.

use crate::criteria::Criterion;
use crate::geojson::{field_number, PropertyMap};
use crate::weights::WeightVector;

/// Scores of one criterion for one feature within one pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CriterionScore {
    /// Raw source-field value (0.0 when missing or non-numeric).
    pub input: f64,
    /// Weight applied in this pass.
    pub weight: f64,
    /// input × weight.
    pub raw: f64,
    /// Network-wide maximum raw score for this criterion (network pass).
    pub network_max: f64,
    /// raw ÷ network_max, or 0 when the max is 0 (network pass).
    pub norm_network: f64,
    /// raw ÷ segment weight sum, or 0 when the sum is 0.
    pub norm_composition: f64,
}

/// All per-criterion scores for one feature, in registry order.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentScore {
    pub criteria: Vec<CriterionScore>,
    pub weight_sum: f64,
}

/// Score one feature's properties against one weight vector.
pub fn score_segment(
    props: &PropertyMap,
    weights: &WeightVector,
    registry: &[Criterion],
) -> SegmentScore {
    let mut criteria = Vec::with_capacity(registry.len());
    let mut weight_sum = 0.0;

    for c in registry {
        let input = field_number(props, c.source_field, 0.0);
        let weight = weights.weight_for(c);
        criteria.push(CriterionScore {
            input,
            weight,
            raw: input * weight,
            ..CriterionScore::default()
        });
        // Weight sum reflects configured importance, not data completeness.
        weight_sum += weight;
    }

    // Composition share within this segment; all zero when nothing is weighted.
    if weight_sum > 0.0 {
        for cs in &mut criteria {
            cs.norm_composition = cs.raw / weight_sum;
        }
    }

    SegmentScore {
        criteria,
        weight_sum,
    }
}

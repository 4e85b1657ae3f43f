//! # Weight vectors
//! User-chosen importance multipliers, one per criterion, each in
//! [WEIGHT_MIN, WEIGHT_MAX]. `resolve` merges a partial form submission with
//! the prior vector: malformed or missing entries degrade to the prior value,
//! then to the criterion default — never an error.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::criteria::{clamp_weight, Criterion};

/// Mapping criterion key → weight. BTreeMap keeps serialization order stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(BTreeMap<String, f64>);

impl WeightVector {
    /// Vector with every criterion at its default weight.
    pub fn defaults(registry: &[Criterion]) -> Self {
        Self(
            registry
                .iter()
                .map(|c| (c.key.to_string(), c.default_weight))
                .collect(),
        )
    }

    /// Weight for a criterion; missing keys take the criterion default.
    pub fn weight_for(&self, criterion: &Criterion) -> f64 {
        self.0
            .get(criterion.key)
            .copied()
            .unwrap_or(criterion.default_weight)
    }

    /// Insert a weight, clamped into the valid range.
    pub fn set(&mut self, key: impl Into<String>, weight: f64) {
        self.0.insert(key.into(), clamp_weight(weight));
    }
}

/// Merge a posted form with the prior vector.
///
/// Per criterion: form value parses → use it; parse failure or absent key →
/// prior value; prior absent → criterion default. Everything is clamped.
/// Unknown form keys are ignored.
pub fn resolve(
    prior: &WeightVector,
    form: &HashMap<String, String>,
    registry: &[Criterion],
) -> WeightVector {
    let mut out = BTreeMap::new();
    for c in registry {
        let fallback = prior.weight_for(c);
        let w = match form.get(c.key) {
            Some(raw) => parse_weight(raw).unwrap_or(fallback),
            None => fallback,
        };
        out.insert(c.key.to_string(), clamp_weight(w));
    }
    WeightVector(out)
}

/// Accepts finite numbers only; `NaN`/`inf` count as malformed input.
fn parse_weight(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|w| w.is_finite())
}

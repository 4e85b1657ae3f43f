//! # Output assembly
//! Folds everything a scoring request computed back onto a fresh copy of the
//! feature collection. Consumers only ever see derived fields: the raw
//! registry-mapped source columns are stripped, everything else (IDs, names,
//! lengths, ...) survives untouched, and geometry is copied through as-is.

use serde_json::Value;

use crate::criteria::Criterion;
use crate::geojson::{Feature, FeatureCollection};
use crate::score::diff::DifferenceSignal;
use crate::score::PassOutput;

fn number(x: f64) -> Value {
    Value::from(x)
}

/// Build the output collection from the current pass and both difference
/// signals. Feature order, geometry, `name`, and `crs` mirror the input;
/// a missing collection name defaults to "network".
pub(super) fn assemble(
    base: &FeatureCollection,
    current: &PassOutput,
    norm_diff: &DifferenceSignal,
    comp_diff: &DifferenceSignal,
    registry: &[Criterion],
) -> FeatureCollection {
    let features = base
        .features
        .iter()
        .enumerate()
        .map(|(i, feat)| {
            let seg = &current.segments[i];
            let mut props = feat.properties.clone();

            // Raw source columns never reach the output; their values live on
            // as <crit>_input. shift_remove keeps the surviving columns in
            // input order, so derived fields always trail them.
            for c in registry {
                props.shift_remove(c.source_field);
            }

            props.insert("Priority_Score_Norm".into(), number(current.priority_norm[i]));
            props.insert(
                "Priority_Score_Composition".into(),
                number(current.priority_composition[i]),
            );
            props.insert("Difference_Raw".into(), number(norm_diff.raw[i]));
            props.insert("Difference_Score".into(), number(norm_diff.score[i]));
            props.insert(
                "Difference_Composition_Raw".into(),
                number(comp_diff.raw[i]),
            );
            props.insert(
                "Difference_Composition_Score".into(),
                number(comp_diff.score[i]),
            );
            props.insert("Weight_Sum".into(), number(seg.weight_sum));

            for (c, cs) in registry.iter().zip(&seg.criteria) {
                props.insert(format!("{}_input", c.key), number(cs.input));
                props.insert(format!("{}_weight", c.key), number(cs.weight));
                props.insert(format!("{}_score", c.key), number(cs.raw));
                props.insert(
                    format!("{}_network_max_score", c.key),
                    number(cs.network_max),
                );
                props.insert(
                    format!("{}_norm_score_network", c.key),
                    number(cs.norm_network),
                );
                props.insert(
                    format!("{}_norm_score_composition", c.key),
                    number(cs.norm_composition),
                );
            }

            Feature {
                kind: "Feature".to_string(),
                geometry: feat.geometry.clone(),
                properties: props,
            }
        })
        .collect();

    FeatureCollection {
        kind: "FeatureCollection".to_string(),
        name: Some(base.name.clone().unwrap_or_else(|| "network".to_string())),
        crs: base.crs.clone(),
        features,
    }
}

//! # Difference signal
//! Per-feature deltas between the current and previous pass, rescaled into a
//! fixed symmetric range so map coloring stays comparable across revisions.

/// Min-max rescale `values` into [out_min, out_max].
///
/// A flat distribution maps to all-0.0 when the target range straddles zero
/// (no spread means "no change" on a signed scale) and to all-out_min
/// otherwise. Empty input maps to empty output.
pub fn rescale(values: &[f64], out_min: f64, out_max: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let mut vmin = f64::INFINITY;
    let mut vmax = f64::NEG_INFINITY;
    for &v in values {
        vmin = vmin.min(v);
        vmax = vmax.max(v);
    }

    if vmax == vmin {
        if out_min < 0.0 && 0.0 < out_max {
            return vec![0.0; values.len()];
        }
        return vec![out_min; values.len()];
    }

    let scale = (out_max - out_min) / (vmax - vmin);
    values.iter().map(|&v| out_min + (v - vmin) * scale).collect()
}

/// Raw per-feature deltas plus their [-1, 1] rescaling.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceSignal {
    pub raw: Vec<f64>,
    pub score: Vec<f64>,
}

/// Subtract the previous pass's scalars from the current pass's, then rescale
/// the delta distribution into [-1, 1].
pub fn difference_signal(current: &[f64], previous: &[f64]) -> DifferenceSignal {
    let raw: Vec<f64> = current.iter().zip(previous).map(|(c, p)| c - p).collect();
    let score = rescale(&raw, -1.0, 1.0);
    DifferenceSignal { raw, score }
}

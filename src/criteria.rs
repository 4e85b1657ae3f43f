//! # Criterion Registry
//! Static definition of the scored criteria: key, the GeoJSON property the
//! raw input comes from, a display label for the slider UI, and the default
//! weight. Pure configuration data, no behavior beyond clamping.

/// One scored dimension of a network segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criterion {
    /// Stable identifier; also the prefix of every derived output field.
    pub key: &'static str,
    /// Property name in the base dataset the raw input is read from.
    pub source_field: &'static str,
    /// Human-readable label for the UI.
    pub label: &'static str,
    /// Default weight, within [WEIGHT_MIN, WEIGHT_MAX].
    pub default_weight: f64,
}

/// Weight bounds (align with the UI sliders).
pub const WEIGHT_MIN: f64 = 0.0;
pub const WEIGHT_MAX: f64 = 10.0;
pub const WEIGHT_STEP: f64 = 0.5;

/// The fixed, ordered criteria set. Order affects only iteration and the
/// column order of derived fields, never the scores themselves.
pub const CRITERIA: [Criterion; 9] = [
    Criterion {
        key: "strava",
        source_field: "Strava_Score",
        label: "Strava activity",
        default_weight: 5.0,
    },
    Criterion {
        key: "ucatsbicycle",
        source_field: "UCATBKUse_Score",
        label: "UCATS bicycle use",
        default_weight: 5.0,
    },
    Criterion {
        key: "ucatsped",
        source_field: "UCATWKUse_Score",
        label: "UCATS pedestrian use",
        default_weight: 5.0,
    },
    Criterion {
        key: "safety",
        source_field: "Safety_Score",
        label: "Safety",
        default_weight: 5.0,
    },
    Criterion {
        key: "sidewalk",
        source_field: "SidWlk_Score",
        label: "Sidewalk presence",
        default_weight: 5.0,
    },
    Criterion {
        key: "crosswalk",
        source_field: "Crss_WK_Score",
        label: "Crosswalk presence",
        default_weight: 5.0,
    },
    Criterion {
        key: "bikelane",
        source_field: "Bike_Ln_Score",
        label: "Bike lane presence",
        default_weight: 5.0,
    },
    Criterion {
        key: "bikeconnectivity",
        source_field: "LSBikConnect_Score",
        label: "Low-stress bike connectivity",
        default_weight: 5.0,
    },
    Criterion {
        key: "pedconnectivity",
        source_field: "PedConnect_Score",
        label: "Pedestrian connectivity",
        default_weight: 5.0,
    },
];

/// Clamp a weight into [WEIGHT_MIN, WEIGHT_MAX].
pub fn clamp_weight(w: f64) -> f64 {
    w.clamp(WEIGHT_MIN, WEIGHT_MAX)
}

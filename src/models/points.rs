use serde::{Deserialize, Serialize};

/// Per-category point totals derived from a single day of verified health
/// data. Stateless and recomputable from the signed raw record alone, which
/// is what makes a disputed score auditable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPointsBreakdown {
    pub steps_points: f64,
    pub calories_points: f64,
    pub workout_points: f64,
    pub distance_bonus_points: f64,
    pub total: f64,
}

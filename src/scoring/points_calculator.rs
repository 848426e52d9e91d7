use crate::models::health_data::RawHealthData;
use crate::models::points::HealthPointsBreakdown;

/// Maps a day of validated health data to its category point totals. Pure
/// and deterministic: the same `RawHealthData` always yields a bit-identical
/// breakdown, so a disputed score can be re-derived from the signed record.
pub fn calculate_points(data: &RawHealthData) -> HealthPointsBreakdown {
    let steps_points = (data.steps / 1000.0).floor();
    let calories_points = (data.calories / 100.0).floor();
    let workout_points = data.workouts.len() as f64 * 5.0;

    let distance_km = data.distance_meters / 1000.0;
    let distance_bonus_points = if distance_km > 5.0 {
        (distance_km - 5.0) * 2.0
    } else {
        0.0
    };

    let steps_points = round_one_decimal(steps_points);
    let calories_points = round_one_decimal(calories_points);
    let workout_points = round_one_decimal(workout_points);
    let distance_bonus_points = round_one_decimal(distance_bonus_points);
    let total =
        round_one_decimal(steps_points + calories_points + workout_points + distance_bonus_points);

    HealthPointsBreakdown {
        steps_points,
        calories_points,
        workout_points,
        distance_bonus_points,
        total,
    }
}

// f64::round is half-away-from-zero; all point components are non-negative,
// which makes this the half-up rounding the scoring rules require.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

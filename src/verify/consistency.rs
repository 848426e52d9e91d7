use std::fmt;

use chrono::Utc;
use thiserror::Error;

use crate::models::health_data::RawHealthData;

/// Thresholds for the anti-cheat rules. The step-to-distance ratio and its
/// tolerance band are heuristics, not physiological constants, so they live
/// here instead of in the rule code. Defaults match the values the scoring
/// backend has always shipped with.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Expected meters covered per step.
    pub step_to_distance_ratio: f64,
    /// Maximum relative deviation between reported and expected distance.
    pub distance_variance_tolerance: f64,
    pub max_steps_per_day: f64,
    pub max_calories_per_day: f64,
    pub max_workout_duration_seconds: f64,
    pub min_heart_rate_bpm: f64,
    pub max_heart_rate_bpm: f64,
    /// Advisory threshold: kcal per minute above which a workout is flagged.
    pub max_calorie_burn_rate_per_minute: f64,
    /// Advisory threshold: hours after collection before data counts as stale.
    pub max_collection_age_hours: i64,
    /// Workout sources that do not trigger an advisory.
    pub trusted_workout_sources: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            step_to_distance_ratio: 0.75,
            distance_variance_tolerance: 0.5,
            max_steps_per_day: 100_000.0,
            max_calories_per_day: 10_000.0,
            max_workout_duration_seconds: 86_400.0,
            min_heart_rate_bpm: 30.0,
            max_heart_rate_bpm: 250.0,
            max_calorie_burn_rate_per_minute: 30.0,
            max_collection_age_hours: 2,
            trusted_workout_sources: vec![
                "com.apple.health".to_string(),
                "com.apple.Health".to_string(),
                "com.nike.nikeplus-gps".to_string(),
                "com.strava.Strava".to_string(),
                "com.fitbit.FitbitMobile".to_string(),
            ],
        }
    }
}

/// Why a day of data was rejected. The message is surfaced verbatim to the
/// caller for user-facing messaging and fraud review.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationFailure {
    #[error("steps ({steps:.0}) and distance ({distance_meters:.0}m) do not correlate, expected ~{expected_meters:.0}m")]
    StepDistanceMismatch {
        steps: f64,
        distance_meters: f64,
        expected_meters: f64,
    },
    #[error("calories burned ({calories:.0}) without any recorded activity")]
    CaloriesWithoutActivity { calories: f64 },
    #[error("workout {index} duration ({duration_seconds:.0}s) exceeds 24 hours")]
    WorkoutTooLong { index: usize, duration_seconds: f64 },
    #[error("workout {index} starts in the future")]
    WorkoutInFuture { index: usize },
    #[error("heart rate reading {index} ({bpm:.0} bpm) is outside the plausible range")]
    HeartRateOutOfRange { index: usize, bpm: f64 },
    #[error("step count ({steps:.0}) exceeds the daily cap")]
    StepsAboveCap { steps: f64 },
    #[error("calorie total ({calories:.0}) exceeds the daily cap")]
    CaloriesAboveCap { calories: f64 },
}

/// Applies the five plausibility rules in a fixed order and reports the
/// first failure. Callers rely on the rejection reason being reproducible
/// for a given input, so the evaluation order never changes. Empty workout
/// or heart-rate sequences trivially pass their rules.
pub fn validate_consistency(
    data: &RawHealthData,
    config: &ValidationConfig,
) -> Result<(), ValidationFailure> {
    // Rule 1: steps/distance correlation, only meaningful above 1000 steps.
    if data.steps > 1000.0 {
        let expected_meters = data.steps * config.step_to_distance_ratio;
        let deviation = (data.distance_meters - expected_meters).abs() / expected_meters;
        if deviation > config.distance_variance_tolerance {
            return Err(ValidationFailure::StepDistanceMismatch {
                steps: data.steps,
                distance_meters: data.distance_meters,
                expected_meters,
            });
        }
    }

    // Rule 2: calories need corroborating activity.
    let workout_calories: f64 = data.workouts.iter().map(|w| w.calories).sum();
    if data.calories > 0.0 && workout_calories == 0.0 && data.steps < 100.0 {
        return Err(ValidationFailure::CaloriesWithoutActivity {
            calories: data.calories,
        });
    }

    // Rule 3: workout sanity.
    let now = Utc::now();
    for (index, workout) in data.workouts.iter().enumerate() {
        if workout.duration_seconds > config.max_workout_duration_seconds {
            return Err(ValidationFailure::WorkoutTooLong {
                index,
                duration_seconds: workout.duration_seconds,
            });
        }
        if workout.start_time > now {
            return Err(ValidationFailure::WorkoutInFuture { index });
        }
    }

    // Rule 4: heart rate plausibility.
    for (index, reading) in data.heart_rate_readings.iter().enumerate() {
        if reading.bpm < config.min_heart_rate_bpm || reading.bpm > config.max_heart_rate_bpm {
            return Err(ValidationFailure::HeartRateOutOfRange {
                index,
                bpm: reading.bpm,
            });
        }
    }

    // Rule 5: absolute caps.
    if data.steps > config.max_steps_per_day {
        return Err(ValidationFailure::StepsAboveCap { steps: data.steps });
    }
    if data.calories > config.max_calories_per_day {
        return Err(ValidationFailure::CaloriesAboveCap {
            calories: data.calories,
        });
    }

    Ok(())
}

/// Non-fatal findings kept for fraud review. Advisories never affect the
/// accept/reject decision and never change the score.
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    HighBurnRate {
        workout_index: usize,
        calories_per_minute: f64,
    },
    UntrustedWorkoutSource {
        workout_index: usize,
        source_id: String,
    },
    StaleCollection {
        age_hours: f64,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::HighBurnRate {
                workout_index,
                calories_per_minute,
            } => write!(
                f,
                "workout {workout_index} has an unusually high calorie burn rate ({calories_per_minute:.1} kcal/min)"
            ),
            Advisory::UntrustedWorkoutSource {
                workout_index,
                source_id,
            } => write!(
                f,
                "workout {workout_index} comes from an unrecognized source: {source_id}"
            ),
            Advisory::StaleCollection { age_hours } => write!(
                f,
                "health data was collected {age_hours:.1} hours ago, recent data is more trustworthy"
            ),
        }
    }
}

pub fn advisory_findings(data: &RawHealthData, config: &ValidationConfig) -> Vec<Advisory> {
    let mut findings = Vec::new();

    for (workout_index, workout) in data.workouts.iter().enumerate() {
        if workout.duration_seconds > 0.0 {
            let calories_per_minute = workout.calories / (workout.duration_seconds / 60.0);
            if calories_per_minute > config.max_calorie_burn_rate_per_minute {
                findings.push(Advisory::HighBurnRate {
                    workout_index,
                    calories_per_minute,
                });
            }
        }
        if !config
            .trusted_workout_sources
            .iter()
            .any(|source| source == &workout.source_id)
        {
            findings.push(Advisory::UntrustedWorkoutSource {
                workout_index,
                source_id: workout.source_id.clone(),
            });
        }
    }

    let age = Utc::now().signed_duration_since(data.collected_at);
    let age_hours = age.num_seconds() as f64 / 3600.0;
    if age_hours > config.max_collection_age_hours as f64 {
        findings.push(Advisory::StaleCollection { age_hours });
    }

    findings
}

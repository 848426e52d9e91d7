use chrono::Utc;

use crate::models::health_data::{DeviceInfo, HeartRateSample, RawHealthData, WorkoutSample};
use crate::sensor::{DayRange, QuantityMetric, QuantitySample};

/// Reduces the raw per-sample streams for one calendar day into a single
/// `RawHealthData`. Summation is a plain arithmetic sum over every sample
/// whose timestamp falls inside `[start, end)`; anything outside the day is
/// excluded and logged, never dropped silently.
pub struct MetricAggregator;

impl MetricAggregator {
    pub fn aggregate(
        day: DayRange,
        steps: Vec<QuantitySample>,
        active_energy: Vec<QuantitySample>,
        distance: Vec<QuantitySample>,
        mut heart_rate: Vec<HeartRateSample>,
        mut workouts: Vec<WorkoutSample>,
        device_info: DeviceInfo,
    ) -> RawHealthData {
        let steps_total = Self::sum_in_day(day, QuantityMetric::Steps, &steps);
        let calories_total = Self::sum_in_day(day, QuantityMetric::ActiveEnergy, &active_energy);
        let distance_total = Self::sum_in_day(day, QuantityMetric::Distance, &distance);

        let dropped_hr = heart_rate.len();
        heart_rate.retain(|sample| day.contains(sample.timestamp));
        let dropped_hr = dropped_hr - heart_rate.len();
        if dropped_hr > 0 {
            tracing::warn!(
                dropped = dropped_hr,
                "excluded heart rate readings outside the day boundary"
            );
        }
        heart_rate.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        let dropped_workouts = workouts.len();
        workouts.retain(|workout| day.contains(workout.start_time));
        let dropped_workouts = dropped_workouts - workouts.len();
        if dropped_workouts > 0 {
            tracing::warn!(
                dropped = dropped_workouts,
                "excluded workouts starting outside the day boundary"
            );
        }
        workouts.sort_by(|a, b| a.start_time.cmp(&b.start_time));

        RawHealthData {
            date: day.start(),
            steps: steps_total,
            calories: calories_total,
            distance_meters: distance_total,
            workouts,
            heart_rate_readings: heart_rate,
            device_info,
            collected_at: Utc::now(),
        }
    }

    fn sum_in_day(day: DayRange, metric: QuantityMetric, samples: &[QuantitySample]) -> f64 {
        let mut total = 0.0;
        let mut excluded = 0usize;
        for sample in samples {
            if day.contains(sample.timestamp) {
                total += sample.value;
            } else {
                excluded += 1;
            }
        }
        if excluded > 0 {
            tracing::warn!(
                %metric,
                excluded,
                "excluded quantity samples outside the day boundary"
            );
        }
        total
    }
}

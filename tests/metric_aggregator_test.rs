use chrono::Duration;

use lifeleague_core::models::health_data::HeartRateSample;
use lifeleague_core::sensor::{DayRange, MetricAggregator, QuantitySample};

mod common;
use common::{past_day, test_device, workout_at};

#[test]
fn sums_only_samples_inside_the_half_open_day_window() {
    let day = past_day();
    let steps = vec![
        // Start boundary is inclusive.
        QuantitySample {
            value: 1000.0,
            timestamp: day.start(),
        },
        QuantitySample {
            value: 2500.0,
            timestamp: day.start() + Duration::hours(12),
        },
        // End boundary is exclusive.
        QuantitySample {
            value: 400.0,
            timestamp: day.end(),
        },
        // The previous day never leaks in.
        QuantitySample {
            value: 900.0,
            timestamp: day.start() - Duration::seconds(1),
        },
    ];

    let raw = MetricAggregator::aggregate(
        day,
        steps,
        Vec::new(),
        Vec::new(),
        Vec::new(),
        Vec::new(),
        test_device(),
    );

    assert_eq!(raw.steps, 3500.0);
    assert_eq!(raw.date, day.start());
}

#[test]
fn empty_metric_streams_aggregate_to_zero() {
    let raw = MetricAggregator::aggregate(
        past_day(),
        Vec::new(),
        Vec::new(),
        Vec::new(),
        Vec::new(),
        Vec::new(),
        test_device(),
    );

    assert_eq!(raw.steps, 0.0);
    assert_eq!(raw.calories, 0.0);
    assert_eq!(raw.distance_meters, 0.0);
    assert!(raw.workouts.is_empty());
    assert!(raw.heart_rate_readings.is_empty());
}

#[test]
fn heart_rate_and_workouts_pass_through_sorted_by_time() {
    let day = past_day();
    let heart_rate = vec![
        HeartRateSample {
            bpm: 140.0,
            timestamp: day.start() + Duration::hours(9),
        },
        HeartRateSample {
            bpm: 60.0,
            timestamp: day.start() + Duration::hours(2),
        },
    ];
    let workouts = vec![
        workout_at(day.start() + Duration::hours(18), 1200.0, 150.0),
        workout_at(day.start() + Duration::hours(7), 1800.0, 240.0),
    ];

    let raw = MetricAggregator::aggregate(
        day,
        Vec::new(),
        Vec::new(),
        Vec::new(),
        heart_rate,
        workouts,
        test_device(),
    );

    assert_eq!(raw.heart_rate_readings[0].bpm, 60.0);
    assert_eq!(raw.heart_rate_readings[1].bpm, 140.0);
    assert!(raw.workouts[0].start_time < raw.workouts[1].start_time);
}

#[test]
fn out_of_day_readings_are_excluded_from_the_pass_through() {
    let day = past_day();
    let heart_rate = vec![
        HeartRateSample {
            bpm: 70.0,
            timestamp: day.start() + Duration::hours(4),
        },
        HeartRateSample {
            bpm: 80.0,
            timestamp: day.end() + Duration::hours(1),
        },
    ];
    let workouts = vec![workout_at(day.end() + Duration::hours(2), 600.0, 90.0)];

    let raw = MetricAggregator::aggregate(
        day,
        Vec::new(),
        Vec::new(),
        Vec::new(),
        heart_rate,
        workouts,
        test_device(),
    );

    assert_eq!(raw.heart_rate_readings.len(), 1);
    assert!(raw.workouts.is_empty());
}

#[test]
fn day_range_rejects_an_inverted_window() {
    let day = past_day();
    assert!(DayRange::new(day.end(), day.start()).is_err());
    assert!(DayRange::new(day.start(), day.start()).is_err());
}

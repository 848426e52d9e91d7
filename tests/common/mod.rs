#![allow(dead_code)]

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use secrecy::SecretString;

use lifeleague_core::config::signing::SigningKey;
use lifeleague_core::models::health_data::{
    DeviceInfo, HeartRateSample, RawHealthData, WorkoutSample,
};
use lifeleague_core::sensor::{
    DayRange, QuantityMetric, QuantitySample, SensorDataSource, SensorError,
};

pub fn test_signing_key() -> SigningKey {
    SigningKey::new(SecretString::new(
        "integration-test-signing-key".to_string().into_boxed_str(),
    ))
    .expect("test signing key must not be empty")
}

pub fn test_device() -> DeviceInfo {
    DeviceInfo {
        model: "iPhone16,2".to_string(),
        os_version: "18.2".to_string(),
        device_id: "9A2C1F60-3C7B-4E1A-8F4D-2B5E6C7D8E9F".to_string(),
    }
}

/// Yesterday as a half-open day window, safely in the past so scripted
/// workouts are never future-dated.
pub fn past_day() -> DayRange {
    let end = Utc::now() - chrono::Duration::hours(1);
    let start = end - chrono::Duration::hours(24);
    DayRange::new(start, end).expect("day range is well formed")
}

pub fn workout_at(start: DateTime<Utc>, duration_seconds: f64, calories: f64) -> WorkoutSample {
    WorkoutSample::new(
        37, // running
        duration_seconds,
        calories,
        2000.0,
        start,
        start + chrono::Duration::seconds(duration_seconds as i64),
        "com.apple.health".to_string(),
    )
    .expect("workout end is after its start")
}

/// A day of data that passes every consistency rule: distance sits inside
/// the correlation band and the workout corroborates the calorie total.
pub fn plausible_raw_data(
    steps: f64,
    calories: f64,
    distance_meters: f64,
    workout_count: usize,
) -> RawHealthData {
    let day = past_day();
    let workouts = (0..workout_count)
        .map(|i| {
            workout_at(
                day.start() + chrono::Duration::hours(8 + i as i64),
                1800.0,
                200.0,
            )
        })
        .collect();

    RawHealthData {
        date: day.start(),
        steps,
        calories,
        distance_meters,
        workouts,
        heart_rate_readings: vec![
            HeartRateSample {
                bpm: 62.0,
                timestamp: day.start() + chrono::Duration::hours(7),
            },
            HeartRateSample {
                bpm: 141.0,
                timestamp: day.start() + chrono::Duration::hours(8),
            },
        ],
        device_info: test_device(),
        collected_at: Utc::now(),
    }
}

/// Scripted sensor source. `delay` holds every fetch open (for the
/// in-flight and cancellation tests) and `fail_metric` makes one quantity
/// stream report an outage.
pub struct MockSensor {
    pub steps: Vec<QuantitySample>,
    pub active_energy: Vec<QuantitySample>,
    pub distance: Vec<QuantitySample>,
    pub heart_rate: Vec<HeartRateSample>,
    pub workouts: Vec<WorkoutSample>,
    pub delay: Option<Duration>,
    pub fail_metric: Option<QuantityMetric>,
}

impl MockSensor {
    pub fn empty() -> Self {
        Self {
            steps: Vec::new(),
            active_energy: Vec::new(),
            distance: Vec::new(),
            heart_rate: Vec::new(),
            workouts: Vec::new(),
            delay: None,
            fail_metric: None,
        }
    }

    /// One plausible day inside `day`: 12000 steps, 650 kcal, 8 km, one
    /// workout. Matches the documented 29.0-point scoring scenario.
    pub fn plausible_day(day: DayRange) -> Self {
        let mid = day.start() + chrono::Duration::hours(8);
        Self {
            steps: vec![
                QuantitySample {
                    value: 7000.0,
                    timestamp: day.start() + chrono::Duration::hours(6),
                },
                QuantitySample {
                    value: 5000.0,
                    timestamp: mid,
                },
            ],
            active_energy: vec![QuantitySample {
                value: 650.0,
                timestamp: mid,
            }],
            distance: vec![QuantitySample {
                value: 8000.0,
                timestamp: mid,
            }],
            heart_rate: vec![
                HeartRateSample {
                    bpm: 64.0,
                    timestamp: day.start() + chrono::Duration::hours(6),
                },
                HeartRateSample {
                    bpm: 138.0,
                    timestamp: mid,
                },
            ],
            workouts: vec![WorkoutSample::new(
                37,
                1800.0,
                320.0,
                3000.0,
                mid,
                mid + chrono::Duration::minutes(30),
                "com.apple.health".to_string(),
            )
            .expect("workout end is after its start")],
            delay: None,
            fail_metric: None,
        }
    }
}

impl SensorDataSource for MockSensor {
    fn fetch_quantity_samples(
        &self,
        metric: QuantityMetric,
        _day: DayRange,
    ) -> BoxFuture<'_, Result<Vec<QuantitySample>, SensorError>> {
        Box::pin(async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_metric == Some(metric) {
                return Err(SensorError::Unavailable {
                    metric: metric.to_string(),
                    reason: "scripted outage".to_string(),
                });
            }
            Ok(match metric {
                QuantityMetric::Steps => self.steps.clone(),
                QuantityMetric::ActiveEnergy => self.active_energy.clone(),
                QuantityMetric::Distance => self.distance.clone(),
            })
        })
    }

    fn fetch_heart_rate_samples(
        &self,
        _day: DayRange,
    ) -> BoxFuture<'_, Result<Vec<HeartRateSample>, SensorError>> {
        Box::pin(async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(self.heart_rate.clone())
        })
    }

    fn fetch_workouts(
        &self,
        _day: DayRange,
    ) -> BoxFuture<'_, Result<Vec<WorkoutSample>, SensorError>> {
        Box::pin(async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(self.workouts.clone())
        })
    }

    fn device_info(&self) -> DeviceInfo {
        test_device()
    }
}

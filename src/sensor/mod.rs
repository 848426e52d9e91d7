use std::fmt;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::health_data::{DeviceInfo, HeartRateSample, WorkoutSample};

pub mod aggregator;
pub use aggregator::MetricAggregator;

/// Quantity metrics fetched per day from the sensor source. Heart rate and
/// workouts are fetched through their own calls because they carry structure
/// beyond a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityMetric {
    Steps,
    ActiveEnergy,
    Distance,
}

impl fmt::Display for QuantityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityMetric::Steps => write!(f, "steps"),
            QuantityMetric::ActiveEnergy => write!(f, "active_energy"),
            QuantityMetric::Distance => write!(f, "distance"),
        }
    }
}

/// A single timestamped quantity reading from the sensor source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantitySample {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Error)]
#[error("day range end {end} is not after its start {start}")]
pub struct InvalidDayRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Half-open calendar-day boundary `[start, end)` for one sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DayRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidDayRange> {
        if end <= start {
            return Err(InvalidDayRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp < self.end
    }
}

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("no {metric} samples available for the requested day: {reason}")]
    Unavailable { metric: String, reason: String },
    #[error("sensor source rejected the request: {0}")]
    SourceFailure(String),
}

/// External sensor collaborator. Implementations wrap whatever device API
/// the host platform exposes; the pipeline only assumes each call resolves
/// to the samples confined to the requested day.
pub trait SensorDataSource: Send + Sync {
    fn fetch_quantity_samples(
        &self,
        metric: QuantityMetric,
        day: DayRange,
    ) -> BoxFuture<'_, Result<Vec<QuantitySample>, SensorError>>;

    fn fetch_heart_rate_samples(
        &self,
        day: DayRange,
    ) -> BoxFuture<'_, Result<Vec<HeartRateSample>, SensorError>>;

    fn fetch_workouts(&self, day: DayRange)
        -> BoxFuture<'_, Result<Vec<WorkoutSample>, SensorError>>;

    fn device_info(&self) -> DeviceInfo;
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One day of aggregated health metrics, exactly as produced by the
/// aggregation step. Constructed once per sync and handed through the
/// pipeline; nothing downstream mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHealthData {
    #[serde(with = "canonical_time")]
    pub date: DateTime<Utc>,
    pub steps: f64,
    pub calories: f64,
    pub distance_meters: f64,
    pub workouts: Vec<WorkoutSample>,
    pub heart_rate_readings: Vec<HeartRateSample>,
    pub device_info: DeviceInfo,
    #[serde(with = "canonical_time")]
    pub collected_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSample {
    pub activity_type_code: i32,
    pub duration_seconds: f64,
    pub calories: f64,
    pub distance_meters: f64,
    #[serde(with = "canonical_time")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "canonical_time")]
    pub end_time: DateTime<Utc>,
    pub source_id: String,
}

#[derive(Debug, Error)]
pub enum HealthDataError {
    #[error("workout end time {end} precedes its start time {start}")]
    WorkoutEndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl WorkoutSample {
    pub fn new(
        activity_type_code: i32,
        duration_seconds: f64,
        calories: f64,
        distance_meters: f64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        source_id: String,
    ) -> Result<Self, HealthDataError> {
        if end_time < start_time {
            return Err(HealthDataError::WorkoutEndBeforeStart {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            activity_type_code,
            duration_seconds,
            calories,
            distance_meters,
            start_time,
            end_time,
            source_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateSample {
    pub bpm: f64,
    #[serde(with = "canonical_time")]
    pub timestamp: DateTime<Utc>,
}

/// Provenance reported by the host platform. Carried through for audit
/// trails, never validated beyond presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub model: String,
    pub os_version: String,
    pub device_id: String,
}

/// Fixed timestamp encoding for everything the integrity signer covers:
/// RFC 3339, UTC with a trailing `Z`, microsecond precision. Equal instants
/// must serialize to equal bytes or signatures stop being reproducible.
pub mod canonical_time {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

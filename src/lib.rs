pub mod config;
pub mod models;
pub mod scoring;
pub mod sensor;
pub mod sync;
pub mod telemetry;
pub mod verify;

pub use config::signing::{SettingsKeyStore, SigningKey, SigningKeyStore};
pub use models::health_data::{DeviceInfo, HeartRateSample, RawHealthData, WorkoutSample};
pub use models::points::HealthPointsBreakdown;
pub use models::record::{VerifiedHealthRecord, SCHEMA_VERSION};
pub use scoring::points_calculator::calculate_points;
pub use sensor::{
    DayRange, MetricAggregator, QuantityMetric, QuantitySample, SensorDataSource, SensorError,
};
pub use sync::coordinator::{SyncCoordinator, SyncError, SyncSession, SyncState};
pub use verify::consistency::{
    advisory_findings, validate_consistency, Advisory, ValidationConfig, ValidationFailure,
};
pub use verify::integrity::{is_authentic, sign_record, verify_record, IntegrityError};

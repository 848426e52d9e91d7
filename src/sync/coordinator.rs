use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::config::signing::SigningKey;
use crate::models::health_data::RawHealthData;
use crate::models::points::HealthPointsBreakdown;
use crate::models::record::VerifiedHealthRecord;
use crate::scoring::points_calculator::calculate_points;
use crate::sensor::{DayRange, MetricAggregator, QuantityMetric, SensorDataSource, SensorError};
use crate::verify::consistency::{advisory_findings, validate_consistency, ValidationConfig, ValidationFailure};
use crate::verify::integrity::{sign_record, IntegrityError};

#[derive(Debug, Error)]
pub enum SyncError {
    /// The sensor source could not supply samples for the requested day.
    /// Recoverable; the caller may retry later on its own schedule.
    #[error("health data source unavailable: {0}")]
    DataUnavailable(#[from] SensorError),
    /// An anti-cheat rule tripped. Never retried automatically; the reason
    /// is surfaced verbatim for user messaging or fraud review.
    #[error("health data rejected: {0}")]
    ValidationFailed(#[from] ValidationFailure),
    #[error("integrity failure: {0}")]
    Integrity(#[from] IntegrityError),
    /// A sync is already in flight for this session. Callers treat this as
    /// a no-op, not a user-facing failure.
    #[error("sync already in progress for session {session}")]
    SyncInProgress { session: Uuid },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Syncing,
    Synced,
    Failed,
}

/// Per-caller sync session. All mutable sync state lives here; the
/// coordinator itself is immutable after construction, which is what lets
/// sessions sync in parallel.
#[derive(Debug)]
pub struct SyncSession {
    id: Uuid,
    inner: Mutex<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    state: SyncState,
    last_sync: Option<DateTime<Utc>>,
}

impl SyncSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            inner: Mutex::new(SessionInner {
                state: SyncState::Idle,
                last_sync: None,
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SyncState {
        self.lock().state
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.lock().last_sync
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionInner> {
        // A poisoned session is still just a state flag; recover the data.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Transition `* -> Syncing`, rejecting the request if a sync is
    /// already in flight. `Synced` and `Failed` both count as ready.
    fn begin_sync(&self) -> Result<(), SyncError> {
        let mut inner = self.lock();
        if inner.state == SyncState::Syncing {
            return Err(SyncError::SyncInProgress { session: self.id });
        }
        inner.state = SyncState::Syncing;
        Ok(())
    }

    fn finish_sync(&self, state: SyncState) {
        let mut inner = self.lock();
        inner.state = state;
        if state == SyncState::Synced {
            let now = Utc::now();
            // last_sync only ever moves forward
            if inner.last_sync.map_or(true, |previous| now > previous) {
                inner.last_sync = Some(now);
            }
        }
    }
}

impl Default for SyncSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the session out of a stuck `Syncing` state. If the in-flight
/// future is dropped before the pipeline completes (caller timeout,
/// abandoned task), the guard marks the session `Failed` so the next sync
/// request is not locked out.
struct SyncGuard<'a> {
    session: &'a SyncSession,
    completed: bool,
}

impl<'a> SyncGuard<'a> {
    fn new(session: &'a SyncSession) -> Self {
        Self {
            session,
            completed: false,
        }
    }

    fn complete(mut self, state: SyncState) {
        self.session.finish_sync(state);
        self.completed = true;
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            tracing::warn!(
                session_id = %self.session.id(),
                "sync abandoned mid-flight, marking session as failed"
            );
            self.session.finish_sync(SyncState::Failed);
        }
    }
}

/// Orchestrates one end-to-end verification pipeline per sync request:
/// fetch, aggregate, validate, sign, score. At most one pipeline runs per
/// session at a time; different sessions are fully independent.
pub struct SyncCoordinator {
    sensor: Arc<dyn SensorDataSource>,
    signing_key: SigningKey,
    validation: ValidationConfig,
}

impl SyncCoordinator {
    pub fn new(
        sensor: Arc<dyn SensorDataSource>,
        signing_key: SigningKey,
        validation: ValidationConfig,
    ) -> Self {
        Self {
            sensor,
            signing_key,
            validation,
        }
    }

    #[tracing::instrument(
        name = "Sync health data",
        skip(self, session, day),
        fields(session_id = %session.id())
    )]
    pub async fn sync_health_data(
        &self,
        session: &SyncSession,
        day: DayRange,
    ) -> Result<(VerifiedHealthRecord, HealthPointsBreakdown), SyncError> {
        session.begin_sync()?;
        let guard = SyncGuard::new(session);

        match self.run_pipeline(day).await {
            Ok((record, breakdown)) => {
                tracing::info!(
                    session_id = %session.id(),
                    total_points = breakdown.total,
                    "health data verified and scored"
                );
                guard.complete(SyncState::Synced);
                Ok((record, breakdown))
            }
            Err(e) => {
                tracing::error!(session_id = %session.id(), error = %e, "health data sync failed");
                guard.complete(SyncState::Failed);
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        day: DayRange,
    ) -> Result<(VerifiedHealthRecord, HealthPointsBreakdown), SyncError> {
        // The five metric fetches are independent; the only suspension
        // points in the pipeline are these sensor calls.
        let (steps, active_energy, distance, heart_rate, workouts) = tokio::try_join!(
            self.sensor
                .fetch_quantity_samples(QuantityMetric::Steps, day),
            self.sensor
                .fetch_quantity_samples(QuantityMetric::ActiveEnergy, day),
            self.sensor
                .fetch_quantity_samples(QuantityMetric::Distance, day),
            self.sensor.fetch_heart_rate_samples(day),
            self.sensor.fetch_workouts(day),
        )?;

        let raw = MetricAggregator::aggregate(
            day,
            steps,
            active_energy,
            distance,
            heart_rate,
            workouts,
            self.sensor.device_info(),
        );

        self.verify_and_score(raw)
    }

    // Synchronous and CPU-bound from here on; no I/O past the fetches.
    fn verify_and_score(
        &self,
        raw: RawHealthData,
    ) -> Result<(VerifiedHealthRecord, HealthPointsBreakdown), SyncError> {
        for advisory in advisory_findings(&raw, &self.validation) {
            tracing::warn!(%advisory, "advisory finding on synced health data");
        }
        validate_consistency(&raw, &self.validation)?;

        let breakdown = calculate_points(&raw);
        let record = sign_record(raw, &self.signing_key)?;
        Ok((record, breakdown))
    }
}

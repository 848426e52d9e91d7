use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::config::signing::SigningKey;
use crate::models::health_data::RawHealthData;
use crate::models::record::{VerifiedHealthRecord, SCHEMA_VERSION};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum IntegrityError {
    /// The MAC over the record's canonical bytes does not match its
    /// signature. Absent and garbage signatures land here too; the record
    /// can no longer be trusted either way.
    #[error("record signature does not match its payload")]
    TamperedOrCorrupt,
    #[error("canonical serialization failed: {0}")]
    Canonicalize(#[from] serde_json::Error),
    #[error("signing key rejected: {0}")]
    InvalidKey(String),
}

/// Canonical byte serialization of a day of health data: fixed field order,
/// fixed timestamp format, serde_json's deterministic number rendering.
/// Signing and verification both run over these bytes, so semantically equal
/// data always produces the same signature.
pub fn canonical_bytes(raw: &RawHealthData) -> Result<Vec<u8>, IntegrityError> {
    Ok(serde_json::to_vec(raw)?)
}

/// Seals validated health data into a `VerifiedHealthRecord` with an
/// HMAC-SHA256 tag over its canonical serialization. The coordinator only
/// calls this after the consistency rules have passed; rejected data never
/// reaches the signer.
pub fn sign_record(
    raw: RawHealthData,
    key: &SigningKey,
) -> Result<VerifiedHealthRecord, IntegrityError> {
    let payload = canonical_bytes(&raw)?;
    let mut mac = HmacSha256::new_from_slice(key.expose_bytes())
        .map_err(|e| IntegrityError::InvalidKey(e.to_string()))?;
    mac.update(&payload);
    let signature = mac.finalize().into_bytes().to_vec();

    tracing::debug!(
        signature_prefix = %hex::encode(&signature[..4]),
        payload_bytes = payload.len(),
        "sealed health record"
    );

    Ok(VerifiedHealthRecord {
        raw_data: raw,
        signature,
        schema_version: SCHEMA_VERSION.to_string(),
    })
}

/// Recomputes the MAC over the record's canonical bytes and compares it to
/// the stored signature in constant time. Any mismatch is
/// `IntegrityError::TamperedOrCorrupt`, never a silent downgrade to
/// "unsigned".
pub fn verify_record(
    record: &VerifiedHealthRecord,
    key: &SigningKey,
) -> Result<(), IntegrityError> {
    let payload = canonical_bytes(&record.raw_data)?;
    let mut mac = HmacSha256::new_from_slice(key.expose_bytes())
        .map_err(|e| IntegrityError::InvalidKey(e.to_string()))?;
    mac.update(&payload);
    mac.verify_slice(&record.signature)
        .map_err(|_| IntegrityError::TamperedOrCorrupt)
}

/// Boolean form of `verify_record` for auditors that only need a yes/no.
pub fn is_authentic(record: &VerifiedHealthRecord, key: &SigningKey) -> bool {
    verify_record(record, key).is_ok()
}

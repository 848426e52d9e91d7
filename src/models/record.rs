use serde::{Deserialize, Serialize};

use crate::models::health_data::RawHealthData;

/// Schema version stamped on every record the signer issues. Bump it when
/// the canonical serialization of `RawHealthData` changes shape.
pub const SCHEMA_VERSION: &str = "1.0";

/// A day of health data sealed by the integrity signer. The signature binds
/// the exact canonical serialization of `raw_data` at creation time; only
/// `verify::integrity::sign_record` constructs one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedHealthRecord {
    pub raw_data: RawHealthData,
    #[serde(with = "base64_bytes")]
    pub signature: Vec<u8>,
    #[serde(rename = "version")]
    pub schema_version: String,
}

/// Wire form of the signature: standard base64, matching the persisted
/// record shape consumed by the scoring backend.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        STANDARD.decode(raw).map_err(serde::de::Error::custom)
    }
}

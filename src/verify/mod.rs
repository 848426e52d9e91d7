pub mod consistency;
pub mod integrity;

pub use consistency::{advisory_findings, validate_consistency, Advisory, ValidationConfig, ValidationFailure};
pub use integrity::{canonical_bytes, is_authentic, sign_record, verify_record, IntegrityError};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::config::settings::Settings;

#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("signing key material is empty")]
    EmptyKey,
    #[error("signing key could not be loaded: {0}")]
    Unavailable(String),
}

/// Process-wide HMAC secret. Loaded once at startup from an external store,
/// shared read-only across sessions, never generated at runtime.
#[derive(Debug, Clone)]
pub struct SigningKey(SecretString);

impl SigningKey {
    pub fn new(material: SecretString) -> Result<Self, KeyStoreError> {
        if material.expose_secret().is_empty() {
            return Err(KeyStoreError::EmptyKey);
        }
        Ok(Self(material))
    }

    pub(crate) fn expose_bytes(&self) -> &[u8] {
        self.0.expose_secret().as_bytes()
    }
}

/// External key-store collaborator. Implementations fetch the secret from
/// wherever the deployment keeps it (settings file, env var, secret manager).
pub trait SigningKeyStore {
    fn load_signing_key(&self) -> Result<SigningKey, KeyStoreError>;
}

/// Key store backed by the layered `Settings`, which already merges the
/// configuration files with the SIGNING_KEY environment override.
pub struct SettingsKeyStore {
    key: SecretString,
}

impl SettingsKeyStore {
    pub fn new(settings: &Settings) -> Self {
        Self {
            key: settings.signing.key.clone(),
        }
    }
}

impl SigningKeyStore for SettingsKeyStore {
    fn load_signing_key(&self) -> Result<SigningKey, KeyStoreError> {
        SigningKey::new(self.key.clone())
    }
}

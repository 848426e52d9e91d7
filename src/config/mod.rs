pub mod settings;
pub mod signing;

pub use settings::{get_config, Settings};
pub use signing::{SettingsKeyStore, SigningKey, SigningKeyStore};

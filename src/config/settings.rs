use std::env;

use config::{Config, ConfigError, File};
use dotenv::dotenv;
use secrecy::SecretString;

use crate::verify::consistency::ValidationConfig;

#[derive(serde::Deserialize, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub validation: ValidationSettings,
    pub signing: SigningSettings,
}

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationSettings {
    pub log_level: String,
}

#[derive(serde::Deserialize, Debug)]
pub struct SigningSettings {
    pub key: SecretString,
}

/// Tunable anti-cheat thresholds. Only the heuristic knobs are exposed in
/// configuration; the hard physiological bounds keep their defaults.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct ValidationSettings {
    pub step_to_distance_ratio: f64,
    pub distance_variance_tolerance: f64,
    pub max_steps_per_day: f64,
    pub max_calories_per_day: f64,
    pub max_collection_age_hours: i64,
}

impl From<ValidationSettings> for ValidationConfig {
    fn from(settings: ValidationSettings) -> Self {
        ValidationConfig {
            step_to_distance_ratio: settings.step_to_distance_ratio,
            distance_variance_tolerance: settings.distance_variance_tolerance,
            max_steps_per_day: settings.max_steps_per_day,
            max_calories_per_day: settings.max_calories_per_day,
            max_collection_age_hours: settings.max_collection_age_hours,
            ..ValidationConfig::default()
        }
    }
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");

    let env_filename = format!("{}.yml", environment.as_str());
    let config = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yml")))
        .add_source(File::from(configuration_directory.join(env_filename)))
        .add_source(
            config::Environment::default()
                .prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let mut settings = config.try_deserialize::<Settings>()?;

    // Deployment platforms expose the signing key directly as an env var
    if let Ok(signing_key) = env::var("SIGNING_KEY") {
        settings.signing.key = SecretString::new(signing_key.into_boxed_str());
    }

    Ok(settings)
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}

use lifeleague_core::config::settings::get_config;
use lifeleague_core::config::signing::{SettingsKeyStore, SigningKeyStore};
use lifeleague_core::verify::consistency::ValidationConfig;

#[test]
fn layered_configuration_loads_the_shipped_defaults() {
    let settings = get_config().expect("configuration files should parse");

    assert_eq!(settings.validation.step_to_distance_ratio, 0.75);
    assert_eq!(settings.validation.distance_variance_tolerance, 0.5);
    assert_eq!(settings.validation.max_steps_per_day, 100_000.0);
    assert_eq!(settings.validation.max_calories_per_day, 10_000.0);

    let config: ValidationConfig = settings.validation.clone().into();
    assert_eq!(config.step_to_distance_ratio, 0.75);
    // Knobs that are not in the settings file keep their hard defaults.
    assert_eq!(config.min_heart_rate_bpm, 30.0);
    assert_eq!(config.max_heart_rate_bpm, 250.0);
}

#[test]
fn settings_key_store_provides_a_usable_signing_key() {
    let settings = get_config().expect("configuration files should parse");
    let store = SettingsKeyStore::new(&settings);

    // The local environment ships a non-empty development key.
    assert!(store.load_signing_key().is_ok());
}

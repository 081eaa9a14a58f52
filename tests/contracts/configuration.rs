use parseq::configuration::{ConfigurationBuilder, EngineConfig, EngineDefaults, StaticDefaults};
use parseq::{MAX_PRIORITY, MIN_PRIORITY};

#[test]
fn static_defaults_match_priority_constants() {
    let resolved = ConfigurationBuilder::new().with_source(StaticDefaults).build();
    assert_eq!(resolved.min_priority, MIN_PRIORITY);
    assert_eq!(resolved.max_priority, MAX_PRIORITY);
}

#[test]
fn validate_swaps_an_inverted_range() {
    struct Inverted;
    impl parseq::configuration::ConfigSource for Inverted {
        fn apply(&self, mut defaults: EngineDefaults) -> EngineDefaults {
            defaults.min_priority = 10;
            defaults.max_priority = -10;
            defaults
        }
    }

    let resolved = ConfigurationBuilder::new().with_source(Inverted).build();
    assert!(resolved.min_priority <= resolved.max_priority);
}

#[test]
fn engine_config_reload_is_visible_to_subsequent_reads() {
    let config = EngineConfig::new(EngineDefaults::default());
    let mut updated = EngineDefaults::default();
    updated.default_priority = 5;
    config.reload(updated);
    assert_eq!(config.current().default_priority, 5);
}

#![cfg(feature = "serde")]

//! Configuration serialization under the `serde` feature.

use std::time::Duration;

use headway::RetryConfig;

#[test]
fn config_round_trips_through_json() {
    let config = RetryConfig::new(["Throttling".to_string(), "ServiceUnavailable".to_string()], 5)
        .with_min_delay(Duration::from_millis(250))
        .with_max_delay(Duration::from_secs(30))
        .with_jitter(true);

    let json = serde_json::to_string(&config).expect("serialize");
    let back: RetryConfig<String> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}

#[test]
fn deserialized_configs_keep_the_derived_ceiling() {
    let config = RetryConfig::new(["Throttling".to_string()], 3);
    let json = serde_json::to_string(&config).expect("serialize");
    let back: RetryConfig<String> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.max_delay(), Duration::from_secs(8));
}

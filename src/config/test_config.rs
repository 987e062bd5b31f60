use super::{Api, Logs, Settings, SettingsBox, Traces};
use std::time::Duration;

/// Creates a new test configuration.
pub fn new_test_config() -> Settings {
    Settings {
        tracehook: SettingsBox {
            env: super::TEST.to_string(),
            logs: Some(Logs {
                level: Some("debug".to_string()),
            }),
            api: Some(Api {
                name: Some("tracehook".to_string()),
                port: Some("8091".to_string()),
                timeout: Some(Duration::from_secs(5)),
            }),
            traces: Some(Traces {
                enabled: false,
                service_name: Some("tracehook-test".to_string()),
                service_version: Some("0.0.0".to_string()),
                exporter: None,
                endpoint: None,
                sampling_mode: None,
                sampling_rate: None,
                export_batch_size: None,
                export_batch_timeout: None,
                export_max_queue: None,
            }),
            ignore: None,
        },
    }
}

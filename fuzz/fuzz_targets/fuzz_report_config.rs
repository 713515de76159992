//! Fuzz target for report configuration parsing.
//!
//! Parses arbitrary input as JSON and as TOML, then validates whatever
//! parsed. Neither step may panic.

#![no_main]

use gr_config::{validate_config, ReportConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<ReportConfig>(data) {
        let _ = validate_config(&config);
        let _ = config.ordered_extra_fields();
    }
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(config) = ReportConfig::from_toml(text) {
            let _ = validate_config(&config);
        }
    }
});

//! Config validation - warns about unknown fields

use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Validate JSON config and warn about unknown fields.
pub fn warn_unknown_fields(content: &str, config_name: &str) {
    let Ok(value) = serde_json::from_str::<Value>(content) else {
        return;
    };

    let expected: HashSet<&str> =
        ["serviceBaseUrl", "recommendOnSelect", "toastDurationMs"].into();

    let Value::Object(obj) = value else {
        return;
    };

    for key in obj.keys() {
        if !expected.contains(key.as_str()) {
            warn!("Unknown config field in {config_name}: {key}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_fields_accepted() {
        // Exercised for the absence of panics; warnings only go to tracing
        warn_unknown_fields(r#"{"serviceBaseUrl":"http://localhost:8000"}"#, "config.json");
    }

    #[test]
    fn test_invalid_json_ignored() {
        warn_unknown_fields("not json", "config.json");
    }
}

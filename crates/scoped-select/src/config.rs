//! Settings.
//!
//! Hosts persist settings however they like and hand them over as JSON.

use crate::error::QuickSelectError;
use serde::{Deserialize, Serialize};

/// Quick-select settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickSelectConfig {
    /// Key under which the marked scope markers are stored on a buffer.
    pub marker_key: String,
    /// Selectors that identify function-like regions, tried in order.
    pub function_selectors: Vec<String>,
    /// Whether failures and completion are reported on the status line.
    pub status_messages: bool,
    /// Whether setting a scope asks the preview host to show it.
    pub show_preview: bool,
    /// Whether newly selected matches are scrolled into view.
    pub scroll_to_match: bool,
}

impl Default for QuickSelectConfig {
    fn default() -> Self {
        Self {
            marker_key: "scoped_quick_select.scope".to_string(),
            function_selectors: vec!["meta.function".to_string(), "meta.method".to_string()],
            status_messages: true,
            show_preview: true,
            scroll_to_match: true,
        }
    }
}

impl QuickSelectConfig {
    /// Decode settings from JSON. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, QuickSelectError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_keep_defaults() {
        let config =
            QuickSelectConfig::from_json_str(r#"{ "show_preview": false, "marker_key": "qs" }"#)
                .unwrap();
        assert!(!config.show_preview);
        assert_eq!(config.marker_key, "qs");
        assert!(config.status_messages);
        assert_eq!(config.function_selectors, vec!["meta.function", "meta.method"]);
    }

    #[test]
    fn test_malformed_settings() {
        let err = QuickSelectConfig::from_json_str(r#"{ "status_messages": "yes" }"#).unwrap_err();
        assert!(matches!(err, QuickSelectError::Config(_)));
    }
}

//! Page-level configuration constants and the runtime [`PageConfig`].

use serde::Deserialize;

// Element ids
pub const AGE_SELECT_ID: &str = "age";
pub const OPEN_BUTTON_ID: &str = "openOtherSiteButton";
pub const CONFIG_SCRIPT_ID: &str = "page-config";

// Navigation
pub const OTHER_SITE_PATH: &str = "/otherSite.html";

// Age dropdown bounds (inclusive)
pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 99;

// Stand-in for the external profile check
pub const DEFAULT_DETECTION_DELAY_MS: u32 = 3000;

/// Runtime settings, overridable from an in-page JSON block. Missing fields
/// fall back to the constants above.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub age_select_id: String,
    pub button_id: String,
    pub other_site_path: String,
    pub detection_delay_ms: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            age_select_id: AGE_SELECT_ID.to_string(),
            button_id: OPEN_BUTTON_ID.to_string(),
            other_site_path: OTHER_SITE_PATH.to_string(),
            detection_delay_ms: DEFAULT_DETECTION_DELAY_MS,
        }
    }
}

impl PageConfig {
    /// Decode a JSON config block.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        serde_json::from_str(text).map_err(|e| crate::PageError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = PageConfig::from_json(r#"{ "detection_delay_ms": 10 }"#).unwrap();
        assert_eq!(cfg.detection_delay_ms, 10);
        assert_eq!(cfg.age_select_id, "age");
        assert_eq!(cfg.button_id, "openOtherSiteButton");
        assert_eq!(cfg.other_site_path, "/otherSite.html");
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(PageConfig::from_json("{}").unwrap(), PageConfig::default());
    }

    #[test]
    fn malformed_json_is_config_error() {
        match PageConfig::from_json("{ nope") {
            Err(crate::PageError::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
    }
}

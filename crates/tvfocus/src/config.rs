//! Engine configuration.
//!
//! Every field has a default matching the behaviour TV storefronts expect, so
//! an empty TOML document is a valid configuration:
//!
//! ```toml
//! [spatial]
//! tolerance = 10
//! secondary_weight = 0.3
//!
//! [timing]
//! initial_focus_ms = [100, 500, 1000, 2000, 3000]
//! resync_interval_ms = 3000
//! view_sync_ms = [100, 500]
//!
//! [policy]
//! home_view = "home"
//!
//! [[keys]]
//! code = 461
//! action = "cancel"
//! ```

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    event::RemoteAction,
};

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Spatial resolver tuning.
    pub spatial: SpatialConfig,
    /// Deferred task timing.
    pub timing: TimingConfig,
    /// Navigation bar transition policy.
    pub policy: PolicyConfig,
    /// Extra key code bindings, applied over the defaults.
    pub keys: Vec<KeyBinding>,
}

/// Spatial resolver tuning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpatialConfig {
    /// Use geometry at all. When off, every move uses the linear fallback.
    pub enabled: bool,
    /// Pixels of overlap permitted between the current element and a
    /// candidate that still counts as lying in the travel direction.
    pub tolerance: i64,
    /// Weight of the perpendicular center offset in the candidate score.
    pub secondary_weight: f64,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance: 10,
            secondary_weight: 0.3,
        }
    }
}

/// Delays for deferred tasks, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Retry delays for initial focus acquisition, measured from init.
    pub initial_focus_ms: Vec<u64>,
    /// Interval of the periodic registry resync.
    pub resync_interval_ms: u64,
    /// Delays of the follow-up passes after a view change. An immediate pass
    /// always runs.
    pub view_sync_ms: Vec<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            initial_focus_ms: vec![100, 500, 1000, 2000, 3000],
            resync_interval_ms: 3000,
            view_sync_ms: vec![100, 500],
        }
    }
}

impl TimingConfig {
    /// Initial focus retry delays.
    pub fn initial_focus(&self) -> impl Iterator<Item = Duration> + '_ {
        self.initial_focus_ms.iter().copied().map(Duration::from_millis)
    }

    /// Periodic resync interval.
    pub fn resync_interval(&self) -> Duration {
        Duration::from_millis(self.resync_interval_ms)
    }

    /// View change follow-up delays.
    pub fn view_sync(&self) -> impl Iterator<Item = Duration> + '_ {
        self.view_sync_ms.iter().copied().map(Duration::from_millis)
    }
}

/// How focus crosses between the navigation bar and the content area.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Name of the view the "home" navigation item activates.
    pub home_view: String,
    /// Down from a navigation item lands on the first content item.
    pub nav_down_to_content: bool,
    /// Up out of the content area lands on the navigation item for the
    /// active view.
    pub content_up_to_active_nav: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            home_view: "home".into(),
            nav_down_to_content: true,
            content_up_to_active_nav: true,
        }
    }
}

/// Binds a physical key code to a remote action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyBinding {
    /// Platform key code.
    pub code: u32,
    /// Action the code produces.
    pub action: RemoteAction,
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check values that parse but make no sense.
    pub fn validate(&self) -> Result<()> {
        if self.spatial.tolerance < 0 {
            return Err(Error::Config(format!(
                "spatial.tolerance must not be negative, got {}",
                self.spatial.tolerance
            )));
        }
        if !self.spatial.secondary_weight.is_finite() || self.spatial.secondary_weight < 0.0 {
            return Err(Error::Config(format!(
                "spatial.secondary_weight must be a non-negative number, got {}",
                self.spatial.secondary_weight
            )));
        }
        if self.timing.resync_interval_ms == 0 {
            return Err(Error::Config(
                "timing.resync_interval_ms must be greater than zero".into(),
            ));
        }
        if self.policy.home_view.is_empty() {
            return Err(Error::Config("policy.home_view must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() -> Result<()> {
        assert_eq!(Config::from_toml_str("")?, Config::default());
        Ok(())
    }

    #[test]
    fn partial_sections() -> Result<()> {
        let c = Config::from_toml_str(
            r#"
            [spatial]
            tolerance = 4

            [timing]
            view_sync_ms = [250]

            [policy]
            nav_down_to_content = false

            [[keys]]
            code = 461
            action = "cancel"

            [[keys]]
            code = 415
            action = "activate"
            "#,
        )?;
        assert_eq!(c.spatial.tolerance, 4);
        assert_eq!(c.spatial.secondary_weight, 0.3);
        assert_eq!(
            c.timing.view_sync().collect::<Vec<_>>(),
            vec![Duration::from_millis(250)]
        );
        assert_eq!(c.timing.resync_interval(), Duration::from_secs(3));
        assert!(!c.policy.nav_down_to_content);
        assert!(c.policy.content_up_to_active_nav);
        assert_eq!(c.policy.home_view, "home");
        assert_eq!(
            c.keys,
            vec![
                KeyBinding {
                    code: 461,
                    action: RemoteAction::Cancel
                },
                KeyBinding {
                    code: 415,
                    action: RemoteAction::Activate
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn rejects_bad_values() {
        for doc in [
            "[spatial]\ntolerance = -1",
            "[spatial]\nsecondary_weight = -0.5",
            "[timing]\nresync_interval_ms = 0",
            "[policy]\nhome_view = \"\"",
        ] {
            assert!(
                matches!(Config::from_toml_str(doc), Err(Error::Config(_))),
                "{doc}"
            );
        }
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(
            Config::from_toml_str("[spatial]\ntolerence = 3"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/tvfocus.toml"),
            Err(Error::Io(_))
        ));
    }
}

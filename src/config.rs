//! Collage configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table, the user's file is merged on top key by key,
//! and the result is deserialized and validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # seed = 42               # Fixed random seed (omit for a fresh layout each run)
//!
//! [container]
//! width = 1200.0            # Collage area in layout units (CSS px)
//! height = 800.0
//!
//! [layout]
//! margin = 20.0             # Minimum gap between images
//! max_attempts = 50         # Candidate draws per image before accepting an overlap
//! oversize = "clamp"        # "clamp" or "overhang" for images larger than the container
//! stable = false            # Derive the seed from the image list
//!
//! [scan]
//! item_width = 240.0        # Display width of each image; height keeps aspect ratio
//!
//! [reveal]
//! stagger = 1.0             # Seconds spread of the entrance delays
//! duration = 0.6            # Seconds each entrance animation lasts
//!
//! [processing]
//! max_processes = 4         # Max parallel workers for measuring (omit for auto)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::geometry::{OversizePolicy, Size};
use crate::placement::{DEFAULT_MARGIN, DEFAULT_MAX_ATTEMPTS, LayoutParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Collage configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollageConfig {
    /// Fixed random seed. Overridden by `--seed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub container: ContainerConfig,
    pub layout: LayoutConfig,
    pub scan: ScanConfig,
    pub reveal: RevealConfig,
    pub processing: ProcessingConfig,
}

impl CollageConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.container.size().is_valid() {
            return Err(ConfigError::Validation(
                "container.width and container.height must be finite and non-negative".into(),
            ));
        }
        if !self.layout.margin.is_finite() || self.layout.margin < 0.0 {
            return Err(ConfigError::Validation(
                "layout.margin must be finite and non-negative".into(),
            ));
        }
        if self.layout.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "layout.max_attempts must be at least 1".into(),
            ));
        }
        if !self.scan.item_width.is_finite() || self.scan.item_width <= 0.0 {
            return Err(ConfigError::Validation(
                "scan.item_width must be positive".into(),
            ));
        }
        if !self.reveal.stagger.is_finite() || self.reveal.stagger < 0.0 {
            return Err(ConfigError::Validation(
                "reveal.stagger must be non-negative".into(),
            ));
        }
        if !self.reveal.duration.is_finite() || self.reveal.duration < 0.0 {
            return Err(ConfigError::Validation(
                "reveal.duration must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Default collage area.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerConfig {
    pub width: f64,
    pub height: f64,
}

impl ContainerConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

/// Placement engine tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Minimum gap between images.
    pub margin: f64,
    /// Candidate draws per image before accepting an overlap.
    pub max_attempts: u32,
    /// Placement of images larger than the container.
    pub oversize: OversizePolicy,
    /// Derive the seed from the ordered image ids when no seed is given.
    pub stable: bool,
}

impl LayoutConfig {
    pub fn params(&self) -> LayoutParams {
        LayoutParams {
            margin: self.margin,
            max_attempts: self.max_attempts,
            oversize: self.oversize,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            oversize: OversizePolicy::default(),
            stable: false,
        }
    }
}

/// Measurement settings for `scan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Display width of each image in layout units.
    pub item_width: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { item_width: 240.0 }
    }
}

/// Entrance animation timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Reveal delays (in `[0, 1)`) are multiplied by this many seconds.
    pub stagger: f64,
    /// Length of each fade-in, in seconds.
    pub duration: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            stagger: 1.0,
            duration: 0.6,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel measuring workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(CollageConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CollageConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CollageConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<CollageConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Collage Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Fixed random seed. Omit for a fresh layout on every run.
# The --seed flag overrides this value.
# seed = 42

# ---------------------------------------------------------------------------
# Collage area
# ---------------------------------------------------------------------------
[container]
# Size of the collage area in layout units (CSS pixels).
# The --width/--height flags override these for a single run.
width = 1200.0
height = 800.0

# ---------------------------------------------------------------------------
# Placement
# ---------------------------------------------------------------------------
[layout]
# Minimum gap between any two images. A gap of exactly this size counts
# as a collision.
margin = 20.0

# Random positions tried per image before giving up and accepting an
# overlap. Raise it for crowded collages.
max_attempts = 50

# Images larger than the collage area:
#   "clamp"    - pin them to the top/left edge
#   "overhang" - let them hang off the top/left edge at random
oversize = "clamp"

# Derive the random seed from the image list, so rebuilding the same
# collage gives the same layout. Ignored when a seed is set.
stable = false

# ---------------------------------------------------------------------------
# Measuring
# ---------------------------------------------------------------------------
[scan]
# Display width of each image. Heights follow the image's aspect ratio.
item_width = 240.0

# ---------------------------------------------------------------------------
# Entrance animation
# ---------------------------------------------------------------------------
[reveal]
# Images fade in after a random delay between 0 and this many seconds.
stagger = 1.0

# Length of each fade-in, in seconds.
duration = 0.6

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for measuring images.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = CollageConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.container.size(), Size::new(1200.0, 800.0));
        assert_eq!(config.layout.margin, 20.0);
        assert_eq!(config.layout.max_attempts, 50);
        assert_eq!(config.layout.oversize, OversizePolicy::Clamp);
        assert!(!config.layout.stable);
        assert_eq!(config.scan.item_width, 240.0);
        assert_eq!(config.reveal.stagger, 1.0);
    }

    #[test]
    fn layout_config_to_params() {
        let config = LayoutConfig {
            margin: 5.0,
            max_attempts: 200,
            oversize: OversizePolicy::Overhang,
            stable: true,
        };
        assert_eq!(
            config.params(),
            LayoutParams {
                margin: 5.0,
                max_attempts: 200,
                oversize: OversizePolicy::Overhang,
            }
        );
    }

    #[test]
    fn parse_partial_config() {
        let config: CollageConfig = toml::from_str(
            r#"
[layout]
margin = 8.0
"#,
        )
        .unwrap();
        assert_eq!(config.layout.margin, 8.0);
        assert_eq!(config.layout.max_attempts, 50);
        assert_eq!(config.container.width, 1200.0);
    }

    #[test]
    fn parse_seed_and_oversize() {
        let config: CollageConfig = toml::from_str(
            r#"
seed = 7

[layout]
oversize = "overhang"
"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.layout.oversize, OversizePolicy::Overhang);
    }

    #[test]
    fn unknown_oversize_policy_rejected() {
        let result: Result<CollageConfig, _> = toml::from_str(
            r#"
[layout]
oversize = "shrink"
"#,
        );
        assert!(result.is_err());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.layout.margin, 20.0);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[container]
width = 640.0

[reveal]
stagger = 2.5
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.container.width, 640.0);
        assert_eq!(config.container.height, 800.0);
        assert_eq!(config.reveal.stagger, 2.5);
        assert_eq!(config.reveal.duration, 0.6);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[layout]
max_attempts = 0
"#,
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[layout]
margn = 10.0
"#,
        )
        .unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[layout]
margin = 20.0
max_attempts = 50
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[layout]
margin = 4.0
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let layout = merged.get("layout").unwrap();
        assert_eq!(layout.get("margin").unwrap().as_float(), Some(4.0));
        assert_eq!(layout.get("max_attempts").unwrap().as_integer(), Some(50));
    }

    #[test]
    fn merge_toml_scalar_replaces_table() {
        let base: toml::Value = toml::from_str("[a]\nb = 1").unwrap();
        let overlay: toml::Value = toml::from_str("a = 2").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_adds_new_keys() {
        let base: toml::Value = toml::from_str("a = 1").unwrap();
        let overlay: toml::Value = toml::from_str("seed = 9").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(1));
        assert_eq!(merged.get("seed").unwrap().as_integer(), Some(9));
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(CollageConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_negative_margin() {
        let mut config = CollageConfig::default();
        config.layout.margin = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("margin"));
    }

    #[test]
    fn validate_zero_margin_ok() {
        let mut config = CollageConfig::default();
        config.layout.margin = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_negative_container() {
        let mut config = CollageConfig::default();
        config.container.height = -10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_item_width_must_be_positive() {
        let mut config = CollageConfig::default();
        config.scan.item_width = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_negative_stagger() {
        let mut config = CollageConfig::default();
        config.reveal.stagger = -0.5;
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // Processing config tests
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_zero_means_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // Stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: CollageConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = CollageConfig::default();
        assert_eq!(config.seed, defaults.seed);
        assert_eq!(config.container.size(), defaults.container.size());
        assert_eq!(config.layout.params(), defaults.layout.params());
        assert_eq!(config.layout.stable, defaults.layout.stable);
        assert_eq!(config.scan.item_width, defaults.scan.item_width);
        assert_eq!(config.reveal.stagger, defaults.reveal.stagger);
        assert_eq!(config.reveal.duration, defaults.reveal.duration);
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in ["[container]", "[layout]", "[scan]", "[reveal]", "[processing]"] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        assert!(val.is_table());
        for section in ["container", "layout", "scan", "reveal", "processing"] {
            assert!(val.get(section).is_some(), "missing {section}");
        }
        assert!(val.get("seed").is_none());
    }
}

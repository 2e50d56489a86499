//! Configuration file support for Jolt.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/jolt/config.toml` unless
//! the command line names another file.

use crate::decay::{DecayModel, HALF_LIFE_HOURS};
use crate::status::{StatusThresholds, LOW_MAX, MODERATE_MAX};
use crate::{Catalog, Error, Result, Substance, SubstanceTier};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub status: StatusConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Decay model parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_half_life_hours")]
    pub half_life_hours: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            half_life_hours: default_half_life_hours(),
        }
    }
}

/// Status band thresholds, in mg of active caffeine
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusConfig {
    #[serde(default = "default_low_max")]
    pub low_max: f64,

    #[serde(default = "default_moderate_max")]
    pub moderate_max: f64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            low_max: default_low_max(),
            moderate_max: default_moderate_max(),
        }
    }
}

/// User-defined substance added on top of the built-in catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CustomSubstance {
    pub name: String,
    pub caffeine_mg: f64,
    /// Derived from `caffeine_mg` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<SubstanceTier>,
}

impl CustomSubstance {
    pub fn to_substance(&self) -> Substance {
        Substance {
            name: self.name.clone(),
            caffeine_mg: self.caffeine_mg,
            tier: self
                .tier
                .unwrap_or_else(|| SubstanceTier::for_content(self.caffeine_mg)),
        }
    }
}

/// Catalog extensions
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub custom: Vec<CustomSubstance>,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("jolt")
}

fn default_half_life_hours() -> f64 {
    HALF_LIFE_HOURS
}

fn default_low_max() -> f64 {
    LOW_MAX
}

fn default_moderate_max() -> f64 {
    MODERATE_MAX
}

impl Config {
    /// Load configuration from `path`, falling back to defaults if it is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("jolt").join("config.toml")
    }

    /// Check the numeric parameters
    pub fn validate(&self) -> Result<()> {
        let half_life = self.model.half_life_hours;
        if !half_life.is_finite() || half_life <= 0.0 {
            return Err(Error::Config(format!(
                "half_life_hours must be positive, got {}",
                half_life
            )));
        }

        let (low_max, moderate_max) = (self.status.low_max, self.status.moderate_max);
        if !low_max.is_finite() || !moderate_max.is_finite() || low_max >= moderate_max {
            return Err(Error::Config(format!(
                "status thresholds must satisfy low_max < moderate_max, got {} and {}",
                low_max, moderate_max
            )));
        }

        Ok(())
    }

    pub fn decay_model(&self) -> DecayModel {
        DecayModel::new(self.model.half_life_hours)
    }

    pub fn thresholds(&self) -> StatusThresholds {
        StatusThresholds {
            low_max: self.status.low_max,
            moderate_max: self.status.moderate_max,
        }
    }

    /// Built-in catalog plus the configured custom substances
    pub fn build_catalog(&self) -> Result<Catalog> {
        let catalog = Catalog::with_custom(&self.catalog.custom)?;
        let errors = catalog.validate();
        if !errors.is_empty() {
            return Err(Error::CatalogValidation(errors.join("; ")));
        }
        Ok(catalog)
    }

    /// Save the current configuration to a specific path
    ///
    /// The file is written to a temporary sibling and renamed into place.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

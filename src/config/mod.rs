//! Configuration module for CookVis-RS
//!
//! This module holds the viewer preferences a host application passes into
//! the timeline code: which curves are drawn, whether notes and probe-removal
//! ranges are highlighted, whether performance mode thins the data, and the
//! preferred temperature unit. The timeline core never stores these; it only
//! receives them as parameters.
//!
//! # App Data Location
//!
//! Settings are stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.cookvis.cookvis-rs/`
//! - **macOS**: `~/Library/Application Support/dev.cookvis.cookvis-rs/`
//! - **Windows**: `%APPDATA%\dev.cookvis.cookvis-rs\`
//!
//! # Files
//!
//! - `settings.toml` - Viewer preferences
//!
//! # Example
//!
//! ```ignore
//! use cookvis_rs::config::ViewerSettings;
//! use cookvis_rs::types::Curve;
//!
//! let mut settings = ViewerSettings::load_or_default();
//! settings.enabled_curves.set(Curve::T1, true);
//! settings.save()?;
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CookVisError, Result};
use crate::types::{Curve, TemperatureUnit};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.cookvis.cookvis-rs";

/// Settings filename
pub const SETTINGS_FILE: &str = "settings.toml";

/// Rows kept per rendered point when performance mode is on
pub const PERFORMANCE_DECIMATION: u32 = 5;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        CookVisError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            CookVisError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the settings file
pub fn settings_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(SETTINGS_FILE))
}

// ==================== Enabled Curves ====================

/// Which temperature curves are drawn
///
/// Keys missing from a saved file take their default individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledCurves {
    pub core: bool,
    pub surface: bool,
    pub ambient: bool,

    pub t1: bool,
    pub t2: bool,
    pub t3: bool,
    pub t4: bool,
    pub t5: bool,
    pub t6: bool,
    pub t7: bool,
    pub t8: bool,
}

impl Default for EnabledCurves {
    fn default() -> Self {
        Self {
            core: true,
            surface: true,
            ambient: true,
            t1: false,
            t2: false,
            t3: false,
            t4: false,
            t5: false,
            t6: false,
            t7: false,
            t8: false,
        }
    }
}

impl EnabledCurves {
    fn flag_mut(&mut self, curve: Curve) -> &mut bool {
        match curve {
            Curve::Core => &mut self.core,
            Curve::Surface => &mut self.surface,
            Curve::Ambient => &mut self.ambient,
            Curve::T1 => &mut self.t1,
            Curve::T2 => &mut self.t2,
            Curve::T3 => &mut self.t3,
            Curve::T4 => &mut self.t4,
            Curve::T5 => &mut self.t5,
            Curve::T6 => &mut self.t6,
            Curve::T7 => &mut self.t7,
            Curve::T8 => &mut self.t8,
        }
    }

    /// Check if a curve is drawn
    pub fn is_enabled(&self, curve: Curve) -> bool {
        match curve {
            Curve::Core => self.core,
            Curve::Surface => self.surface,
            Curve::Ambient => self.ambient,
            Curve::T1 => self.t1,
            Curve::T2 => self.t2,
            Curve::T3 => self.t3,
            Curve::T4 => self.t4,
            Curve::T5 => self.t5,
            Curve::T6 => self.t6,
            Curve::T7 => self.t7,
            Curve::T8 => self.t8,
        }
    }

    /// Turn a curve on or off
    pub fn set(&mut self, curve: Curve, enabled: bool) {
        *self.flag_mut(curve) = enabled;
    }

    /// Enabled curves in legend order
    pub fn enabled(&self) -> impl Iterator<Item = Curve> + '_ {
        Curve::all().iter().copied().filter(|c| self.is_enabled(*c))
    }
}

// ==================== Viewer Settings ====================

/// Display preferences for a cook timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Show note markers on the chart
    #[serde(default = "default_true")]
    pub show_notes: bool,

    /// Shade intervals where the probe was removed
    #[serde(default = "default_true")]
    pub show_probe_not_inserted: bool,

    /// Draw a decimated view of the data
    #[serde(default = "default_true")]
    pub performance_mode: bool,

    /// Unit for displayed temperatures
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,

    /// Curves drawn on the chart
    #[serde(default)]
    pub enabled_curves: EnabledCurves,
}

fn default_true() -> bool {
    true
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            show_notes: true,
            show_probe_not_inserted: true,
            performance_mode: true,
            temperature_unit: TemperatureUnit::Celsius,
            enabled_curves: EnabledCurves::default(),
        }
    }
}

impl ViewerSettings {
    /// Load settings from the default location
    pub fn load() -> Result<Self> {
        let path = settings_path().ok_or_else(|| {
            CookVisError::Config("Could not determine settings path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CookVisError::Config(format!("Failed to read settings: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| CookVisError::Config(format!("Failed to parse settings: {}", e)))
    }

    /// Load settings, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(&dir.join(SETTINGS_FILE))
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CookVisError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| CookVisError::Config(format!("Failed to write settings: {}", e)))?;

        tracing::debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Decimation factor for rendering, `1` when performance mode is off
    pub fn decimation(&self) -> u32 {
        if self.performance_mode {
            PERFORMANCE_DECIMATION
        } else {
            1
        }
    }
}

// ==================== Tests ====================

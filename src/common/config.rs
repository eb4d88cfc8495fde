use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub fn config_file() -> PathBuf { dirs::home_dir().unwrap_or_default().join(".rift-constraints.toml") }

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Honor the min/max aspect ratio hints windows set.
    #[serde(default = "yes")]
    pub enforce_aspect_ratio: bool,
    #[serde(default)]
    pub offscreen: OffscreenSettings,
}

/// How much of a window must stay visible when the user drags it partly off
/// the screen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OffscreenSettings {
    /// Share of the window's width (or height) that stays visible.
    #[serde(default = "default_fraction")]
    pub fraction: f64,
    /// Never show fewer pixels than this, even for tiny windows.
    #[serde(default = "default_min_margin")]
    pub min_margin: i32,
    /// Never require more pixels than this, even for huge windows.
    #[serde(default = "default_max_margin")]
    pub max_margin: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            enforce_aspect_ratio: yes(),
            offscreen: OffscreenSettings::default(),
        }
    }
}

impl Default for OffscreenSettings {
    fn default() -> Self {
        OffscreenSettings {
            fraction: default_fraction(),
            min_margin: default_min_margin(),
            max_margin: default_max_margin(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Vec<String> { self.offscreen.validate() }

    pub fn auto_fix_values(&mut self) -> usize { self.offscreen.auto_fix_values() }
}

impl OffscreenSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !(0.0..=1.0).contains(&self.fraction) {
            issues.push(format!(
                "offscreen.fraction must be between 0 and 1, got {}",
                self.fraction
            ));
        }
        if self.min_margin < 0 {
            issues.push(format!(
                "offscreen.min_margin must be non-negative, got {}",
                self.min_margin
            ));
        }
        if self.max_margin < 0 {
            issues.push(format!(
                "offscreen.max_margin must be non-negative, got {}",
                self.max_margin
            ));
        } else if self.max_margin < self.min_margin {
            issues.push(format!(
                "offscreen.max_margin must be at least min_margin ({}), got {}",
                self.min_margin, self.max_margin
            ));
        }

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        if !(0.0..=1.0).contains(&self.fraction) {
            self.fraction = default_fraction();
            fixes += 1;
        }
        if self.min_margin < 0 {
            self.min_margin = default_min_margin();
            fixes += 1;
        }
        if self.max_margin < 0 {
            self.max_margin = default_max_margin();
            fixes += 1;
        }
        if self.max_margin < self.min_margin {
            self.max_margin = self.min_margin;
            fixes += 1;
        }

        fixes
    }
}

fn yes() -> bool { true }

fn default_fraction() -> f64 { 0.25 }

fn default_min_margin() -> i32 { 10 }

fn default_max_margin() -> i32 { 75 }

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    pub fn parse(buf: &str) -> anyhow::Result<Config> { Ok(toml::from_str(buf)?) }

    /// Save the current config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string.as_bytes())?;

        Ok(())
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> { self.settings.validate() }

    /// Attempts to fix configuration values automatically.
    /// Returns the number of fixes applied.
    pub fn auto_fix_values(&mut self) -> usize { self.settings.auto_fix_values() }
}

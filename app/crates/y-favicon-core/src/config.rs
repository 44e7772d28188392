use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::color::Color;

pub const DEFAULT_BACKGROUND: Color = Color::rgb(0x0a, 0x0a, 0x0a);
pub const DEFAULT_FOREGROUND: Color = Color::rgb(0xff, 0x92, 0x2b);
pub const DEFAULT_TEXT: &str = "Y";
/// Upper bound for both canvas edge and font size, in pixels.
pub const MAX_DIMENSION: u32 = 4096;

/// Bold variants first; a regular face is accepted when no bold one exists.
pub const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    "C:/Windows/Fonts/arialbd.ttf",
    "C:/Windows/Fonts/arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/usr/share/fonts/truetype/arial.ttf",
];

/// One square output image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconJob {
    pub output: PathBuf,
    pub size: u32,
    pub font_size: u32,
    /// Center of the text; defaults to the canvas center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<(u32, u32)>,
}

impl IconJob {
    pub fn new(output: impl Into<PathBuf>, size: u32, font_size: u32) -> Self {
        Self {
            output: output.into(),
            size,
            font_size,
            anchor: None,
        }
    }

    pub fn anchor(&self) -> (u32, u32) {
        self.anchor.unwrap_or((self.size / 2, self.size / 2))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.size > 0, "{}: size must be positive", self.output.display());
        ensure!(
            self.font_size > 0,
            "{}: font size must be positive",
            self.output.display()
        );
        ensure!(
            self.size <= MAX_DIMENSION,
            "{}: size {} exceeds {MAX_DIMENSION}",
            self.output.display(),
            self.size
        );
        ensure!(
            self.font_size <= MAX_DIMENSION,
            "{}: font size {} exceeds {MAX_DIMENSION}",
            self.output.display(),
            self.font_size
        );
        let (x, y) = self.anchor();
        if x >= self.size || y >= self.size {
            bail!(
                "{}: anchor ({x},{y}) lies outside the {}x{} canvas",
                self.output.display(),
                self.size,
                self.size
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_font_candidates")]
    pub font_candidates: Vec<String>,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_foreground")]
    pub foreground: Color,
    #[serde(default = "default_text")]
    pub text: String,
    #[serde(default = "default_icons")]
    pub icons: Vec<IconJob>,
}

impl Default for Settings {
    fn default() -> Self {
        default_settings()
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.text.is_empty(), "text to render is empty");
        self.icons.iter().try_for_each(IconJob::validate)
    }

    /// Rebase relative output paths onto `dir`.
    pub fn with_output_dir(mut self, dir: &Path) -> Self {
        for job in &mut self.icons {
            if job.output.is_relative() {
                job.output = dir.join(&job.output);
            }
        }
        self
    }

    /// Put extra candidates ahead of the configured ones, keeping their order.
    pub fn with_preferred_fonts(mut self, fonts: &[String]) -> Self {
        if !fonts.is_empty() {
            let mut candidates = fonts.to_vec();
            candidates.append(&mut self.font_candidates);
            self.font_candidates = candidates;
        }
        self
    }
}

fn default_font_candidates() -> Vec<String> {
    DEFAULT_FONT_CANDIDATES.iter().map(|s| s.to_string()).collect()
}

fn default_background() -> Color {
    DEFAULT_BACKGROUND
}

fn default_foreground() -> Color {
    DEFAULT_FOREGROUND
}

fn default_text() -> String {
    DEFAULT_TEXT.to_string()
}

fn default_icons() -> Vec<IconJob> {
    vec![
        IconJob::new("assets/img/favicon.png", 32, 24),
        IconJob::new("assets/img/apple-touch-icon.png", 180, 140),
    ]
}

pub fn default_settings() -> Settings {
    Settings {
        font_candidates: default_font_candidates(),
        background: default_background(),
        foreground: default_foreground(),
        text: default_text(),
        icons: default_icons(),
    }
}

// Config paths abstraction to make IO testable
pub trait ConfigProvider: Send + Sync {
    fn base_dir(&self) -> PathBuf;
}

#[derive(Default, Clone)]
pub struct OsConfigProvider;

impl ConfigProvider for OsConfigProvider {
    fn base_dir(&self) -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| dirs::home_dir().unwrap_or_default());
        base.join("y-favicon")
    }
}

pub fn settings_path(cp: &dyn ConfigProvider) -> PathBuf {
    cp.base_dir().join("settings.json")
}

pub fn read_settings(path: &Path) -> Result<Settings> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))
}

/// Settings from `path`, or the defaults when the file is missing or invalid.
pub fn load_settings_from(path: &Path) -> Settings {
    match read_settings(path) {
        Ok(s) => s,
        Err(e) => {
            if path.exists() {
                tracing::warn!(target = "config", path = %path.display(), error = %format!("{e:#}"), "settings_invalid_using_defaults");
            }
            default_settings()
        }
    }
}

pub fn load_settings_with(cp: &dyn ConfigProvider) -> Settings {
    load_settings_from(&settings_path(cp))
}

pub fn save_settings_with(cp: &dyn ConfigProvider, settings: &Settings) -> Result<(), String> {
    fs::create_dir_all(cp.base_dir()).map_err(|e| format!("create config dir: {e}"))?;
    let path = settings_path(cp);
    let content = serde_json::to_string_pretty(settings).map_err(|e| format!("to json: {e}"))?;
    fs::write(&path, content).map_err(|e| format!("write settings: {e}"))
}

use anyhow::Result;
use std::{fmt, path::PathBuf};

use crate::config::{IconJob, Settings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    TrueType(PathBuf),
    BuiltIn,
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::TrueType(path) => write!(f, "{}", path.display()),
            FontSource::BuiltIn => f.write_str("built-in"),
        }
    }
}

/// Result of one successful `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub path: PathBuf,
    pub size: u32,
    pub font: FontSource,
}

/// Abstraction over the imaging stack so the orchestrator can run without it.
pub trait IconBackend {
    /// Draw `settings.text` for one job and write the image to `job.output`,
    /// replacing any existing file.
    fn generate(&self, settings: &Settings, job: &IconJob) -> Result<GeneratedIcon>;
}

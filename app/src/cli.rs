use std::path::PathBuf;

use y_favicon_core::config::{ConfigProvider, Settings, load_settings_from, load_settings_with};

pub const USAGE: &str = "Usage: y-favicon [--config <path>] [--out-dir <dir>] [--font <path>]... \
[--print-config] [--init-config]\n\
Defaults: settings=<config dir>/y-favicon/settings.json, outputs under assets/img/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    Generate,
    PrintConfig,
    InitConfig,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub fonts: Vec<String>,
    pub action: Action,
}

pub fn parse_args<I>(args: I) -> Result<CliOptions, String>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or("--config requires a path value")?;
                opts.config = Some(PathBuf::from(value));
            }
            "--out-dir" => {
                let value = args.next().ok_or("--out-dir requires a directory value")?;
                opts.out_dir = Some(PathBuf::from(value));
            }
            "--font" => {
                let value = args.next().ok_or("--font requires a path value")?;
                opts.fonts.push(value);
            }
            "--print-config" => opts.action = Action::PrintConfig,
            "--init-config" => opts.action = Action::InitConfig,
            "--help" | "-h" => opts.action = Action::Help,
            other => return Err(format!("unknown argument `{other}`")),
        }
    }

    Ok(opts)
}

impl CliOptions {
    /// Settings file selection plus command-line overrides.
    pub fn effective_settings(&self, cp: &dyn ConfigProvider) -> Settings {
        let base = match &self.config {
            Some(path) => load_settings_from(path),
            None => load_settings_with(cp),
        };
        let settings = base.with_preferred_fonts(&self.fonts);
        match &self.out_dir {
            Some(dir) => settings.with_output_dir(dir),
            None => settings,
        }
    }
}

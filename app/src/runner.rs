use y_favicon_core::{
    backend::{GeneratedIcon, IconBackend},
    config::Settings,
};

use crate::report::{self, Reporter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(Vec<GeneratedIcon>),
    /// Jobs after the failing one are not attempted.
    Failed {
        written: Vec<GeneratedIcon>,
        error: String,
    },
    ImagingUnavailable,
}

/// The backend compiled into this build, if any.
pub fn default_backend() -> Option<&'static dyn IconBackend> {
    #[cfg(feature = "imaging")]
    {
        Some(&y_favicon_core::render::RasterBackend)
    }
    #[cfg(not(feature = "imaging"))]
    {
        None
    }
}

/// Generate every configured icon in order. Never panics or propagates
/// errors: the outcome is reported through `reporter` and returned.
pub fn run<R: Reporter>(
    settings: &Settings,
    backend: Option<&dyn IconBackend>,
    reporter: &R,
) -> RunOutcome {
    let Some(backend) = backend else {
        tracing::warn!(target = "runner", "imaging_unavailable");
        report::imaging_unavailable(reporter);
        return RunOutcome::ImagingUnavailable;
    };

    let mut written = Vec::with_capacity(settings.icons.len());
    let checked = settings.validate();
    let result = checked.and_then(|()| {
        for job in &settings.icons {
            let icon = backend.generate(settings, job)?;
            report::created(reporter, &icon.path);
            written.push(icon);
        }
        Ok(())
    });

    match result {
        Ok(()) => {
            tracing::info!(target = "runner", icons = written.len(), "run_complete");
            RunOutcome::Completed(written)
        }
        Err(e) => {
            let error = format!("{e:#}");
            tracing::error!(target = "runner", error = %error, written = written.len(), "run_failed");
            report::failed(reporter, &error);
            RunOutcome::Failed { written, error }
        }
    }
}

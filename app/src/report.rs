use std::path::Path;

pub const BROWSER_ALTERNATIVE: &str = "generate-favicon.html";

/// Sink for the user-facing messages of a run.
pub trait Reporter {
    fn line(&self, message: &str);
}

pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn line(&self, message: &str) {
        println!("{message}");
    }
}

// Helper functions to standardize message shapes
pub fn created<R: Reporter>(reporter: &R, path: &Path) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    reporter.line(&format!("✓ Created {name}"));
}

pub fn failed<R: Reporter>(reporter: &R, error: &str) {
    reporter.line(&format!("Error: {error}"));
    reporter.line(&format!(
        "Use {BROWSER_ALTERNATIVE} in a browser to create the PNG files"
    ));
}

pub fn imaging_unavailable<R: Reporter>(reporter: &R) {
    reporter.line(&format!(
        "Imaging support not compiled in. Rebuild with: cargo build --features imaging\n\
         Or use {BROWSER_ALTERNATIVE} in a browser to create the PNG files"
    ));
}

/// Reporter that records every message; used by tests.
#[derive(Default)]
pub struct RecordingReporter(pub std::sync::Mutex<Vec<String>>);

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl Reporter for RecordingReporter {
    fn line(&self, message: &str) {
        if let Ok(mut lines) = self.0.lock() {
            lines.push(message.to_string());
        }
    }
}

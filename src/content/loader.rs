//! Loader for the RON tuning file.

use ron::Options;
use std::fs;
use std::path::Path;

use super::tuning::TuningFile;

/// Default location of the tuning file, relative to the working directory.
pub const TUNING_PATH: &str = "assets/data/tuning.ron";

/// Error type for tuning load failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

/// RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Read and parse the tuning file at `path`.
pub fn load_tuning(path: &Path) -> Result<TuningFile, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_tuning(&contents, &file_name)
}

/// Parse tuning from RON text. Fields left out of the text keep their defaults.
pub fn parse_tuning(contents: &str, file_name: &str) -> Result<TuningFile, ConfigLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ConfigLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })
}

use std::path::Path;

use tabeval_eval::EvaluateOptions;

use crate::CliError;

/// Read evaluation options from a TOML file.
///
/// Missing keys fall back to their defaults.
pub fn load_options(path: &Path) -> Result<EvaluateOptions, CliError> {
    let content = std::fs::read_to_string(path).map_err(|err| CliError::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    toml::from_str(&content).map_err(|err| CliError::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

use std::path::PathBuf;

use crate::core::LayoutError;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid board layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("view.cell_width must be in 1..=4".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: view.cell_width must be in 1..=4"
        );

        let err = ConfigError::from(LayoutError::Empty);
        assert!(err.to_string().starts_with("invalid board layout: "));
    }
}

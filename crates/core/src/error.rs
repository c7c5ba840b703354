//! Error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while loading inputs or configuration.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("inputs must both be files or both be directories")]
    MixedInputKinds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CompareError::Io {
            path: PathBuf::from("/tmp/missing"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "failed to read /tmp/missing");
        assert_eq!(
            CompareError::Config("bad keycut".to_string()).to_string(),
            "invalid configuration: bad keycut"
        );
        assert_eq!(
            CompareError::MixedInputKinds.to_string(),
            "inputs must both be files or both be directories"
        );
    }
}

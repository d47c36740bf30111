use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TyperError>;

#[derive(Debug, Error)]
pub enum TyperError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The word list or text file behind a corpus could not be read
    #[error("unable to read corpus file {}: {source}", .path.display())]
    Corpus {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corpus file {} contains no words", .path.display())]
    EmptyCorpus { path: PathBuf },

    #[error("invalid config at line {line}: {message}")]
    Config { line: usize, message: String },

    /// The keyboard channel hung up mid-session
    #[error("input source closed")]
    InputClosed,

    /// Ctrl+C; ends the program whatever the session settings
    #[error("interrupted")]
    Interrupted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_error_names_the_path() {
        let err = TyperError::Corpus {
            path: PathBuf::from("words/missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "unable to read corpus file words/missing.txt: not found"
        );
    }

    #[test]
    fn io_errors_convert() {
        let err: TyperError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
        assert!(matches!(err, TyperError::Io(_)));
        assert_eq!(err.to_string(), "pipe");
    }

    #[test]
    fn config_error_message() {
        let err = TyperError::Config {
            line: 3,
            message: "bad value".into(),
        };
        assert_eq!(err.to_string(), "invalid config at line 3: bad value");
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn file_not_found(path: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::FileNotFound {
                path: path.into(),
                source,
            }
            .into(),
        )
    }

    pub fn indexing(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Indexing {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn read(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Read {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn index_not_ready() -> Error {
        Error(ErrorKind::IndexNotReady.into())
    }

    pub fn cancelled(operation: impl Into<String>) -> Error {
        Error(
            ErrorKind::Cancelled {
                operation: operation.into(),
            }
            .into(),
        )
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    /// Returns `true` for precondition violations reported before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidArgument { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("source file not found: '{path}': {source}")]
    FileNotFound {
        path: String,
        source: std::io::Error,
    },

    #[error("indexing failed for '{context}': {source}")]
    Indexing {
        context: String,
        source: std::io::Error,
    },

    #[error("range read failed for '{context}': {source}")]
    Read {
        context: String,
        source: std::io::Error,
    },

    #[error("index is not built yet")]
    IndexNotReady,

    #[error("{operation} was cancelled")]
    Cancelled { operation: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[test]
    fn test_error_kinds() {
        let err = Error::invalid_arg("letter", "must be a single character A-Z");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "invalid argument letter: must be a single character A-Z"
        );

        let err = Error::index_not_ready();
        assert!(!err.is_validation());
        assert!(matches!(err.into_kind(), ErrorKind::IndexNotReady));

        let err: Error = std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into();
        assert!(matches!(err.kind(), ErrorKind::Io { .. }));
    }
}

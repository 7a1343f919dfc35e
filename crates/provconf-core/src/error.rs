//! Error types for provconf
//!
//! Errors are structured: a kind, the configuration name involved,
//! an optional cause and an actionable help message.

use std::fmt;

/// Result type alias for provconf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for provconf operations
#[derive(Debug, Clone)]
pub struct Error {
    /// The kind of error that occurred
    pub kind: ErrorKind,
    /// Canonical configuration name involved (e.g., "apikey_auth")
    pub path: Option<String>,
    /// Actionable help message
    pub help: Option<String>,
    /// Underlying cause (as string for Clone compatibility)
    pub cause: Option<String>,
}

/// Which kind of declared requirement a missing value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// A security scheme from the API description
    SecurityDefinition,
    /// A header parameter from the API description
    HeaderParameter,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::SecurityDefinition => write!(f, "security schema definition"),
            Requirement::HeaderParameter => write!(f, "header parameter"),
        }
    }
}

/// Categories of errors that can occur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A declared requirement has no value in the configuration store
    MissingValue {
        requirement: Requirement,
        name: String,
    },
    /// A store value exists but has the wrong type
    TypeMismatch { expected: String, got: String },
    /// Error parsing YAML/JSON
    Parse,
    /// I/O error (file not found, etc.)
    Io,
    /// Internal error (bug in provconf)
    Internal,
}

impl Error {
    /// Create a missing value error for a declared requirement
    pub fn missing_value(requirement: Requirement, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: ErrorKind::MissingValue {
                requirement,
                name: name.clone(),
            },
            path: Some(name.clone()),
            help: Some(format!(
                "Make sure '{}' is provided in the provider configuration",
                name
            )),
            cause: None,
        }
    }

    /// Create a missing security definition value error
    pub fn missing_security_definition(name: impl Into<String>) -> Self {
        Self::missing_value(Requirement::SecurityDefinition, name)
    }

    /// Create a missing header value error
    pub fn missing_header(name: impl Into<String>) -> Self {
        Self::missing_value(Requirement::HeaderParameter, name)
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        let expected = expected.into();
        Self {
            kind: ErrorKind::TypeMismatch {
                expected: expected.clone(),
                got: got.into(),
            },
            path: Some(path.into()),
            help: Some(format!("Provide the value as a {}", expected)),
            cause: None,
        }
    }

    /// Create a new parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Parse,
            path: None,
            help: None,
            cause: Some(message.into()),
        }
    }

    /// Create an I/O error for a file that could not be read
    pub fn io(file: impl Into<String>, message: impl Into<String>) -> Self {
        let file = file.into();
        Self {
            kind: ErrorKind::Io,
            path: Some(file.clone()),
            help: Some(format!("Check that '{}' exists and is readable", file)),
            cause: Some(message.into()),
        }
    }

    /// Create an internal error (bug in provconf)
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Internal,
            path: None,
            help: Some("This is likely a bug in provconf. Please report it.".into()),
            cause: Some(message.into()),
        }
    }

    /// Add path context to the error
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add help message to the error
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Returns true if this error reports a missing required value
    pub fn is_missing_value(&self) -> bool {
        matches!(self.kind, ErrorKind::MissingValue { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::MissingValue { requirement, name } => {
                write!(f, "{} '{}' is missing a value", requirement, name)?
            }
            ErrorKind::TypeMismatch { expected, got } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, got)?
            }
            ErrorKind::Parse => write!(f, "Parse error")?,
            ErrorKind::Io => write!(f, "I/O error")?,
            ErrorKind::Internal => write!(f, "Internal error")?,
        }

        // The missing-value headline already names the field
        if !matches!(self.kind, ErrorKind::MissingValue { .. }) {
            if let Some(path) = &self.path {
                write!(f, "\n  Path: {}", path)?;
            }
        }

        if let Some(cause) = &self.cause {
            write!(f, "\n  {}", cause)?;
        }

        if let Some(help) = &self.help {
            write!(f, "\n  Help: {}", help)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_security_definition_display() {
        let err = Error::missing_security_definition("apikey_auth");
        let display = format!("{}", err);

        assert!(display.contains("security schema definition 'apikey_auth' is missing a value"));
        assert!(display.contains("Help:"));
        assert!(!display.contains("Path:"));
        assert!(err.is_missing_value());
    }

    #[test]
    fn test_missing_header_kind() {
        let err = Error::missing_header("x_api_key");

        assert_eq!(
            err.kind,
            ErrorKind::MissingValue {
                requirement: Requirement::HeaderParameter,
                name: "x_api_key".into(),
            }
        );
        assert_eq!(err.path, Some("x_api_key".into()));
        assert!(err.to_string().starts_with("header parameter 'x_api_key'"));
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = Error::type_mismatch("region", "string", "integer");
        let display = format!("{}", err);

        assert!(display.contains("Type mismatch: expected string, got integer"));
        assert!(display.contains("Path: region"));
        assert!(display.contains("Help: Provide the value as a string"));
        assert!(!err.is_missing_value());
    }

    #[test]
    fn test_io_error() {
        let err = Error::io("values.yaml", "No such file or directory");
        let display = format!("{}", err);

        assert_eq!(err.kind, ErrorKind::Io);
        assert!(display.contains("Path: values.yaml"));
        assert!(display.contains("No such file or directory"));
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("region lock poisoned");
        let display = format!("{}", err);

        assert!(display.contains("Internal error"));
        assert!(display.contains("region lock poisoned"));
    }

    #[test]
    fn test_with_help() {
        let err = Error::parse("bad input").with_help("Try fixing the syntax");
        let display = format!("{}", err);

        assert!(display.contains("Help: Try fixing the syntax"));
    }
}

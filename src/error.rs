use std::fmt;

/// Errors surfaced to the hosting runtime when an invocation cannot be described.
#[derive(Debug)]
pub enum HandlerError {
    /// The invocation context did not carry a required attribute.
    MissingAttribute(&'static str),
    /// An environment variable name or value is not valid Unicode.
    NonUnicodeEnv(String),
    /// The response body could not be encoded as JSON.
    Serialization(serde_json::Error),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::MissingAttribute(name) => {
                write!(f, "invocation context has no attribute '{name}'")
            }
            HandlerError::NonUnicodeEnv(name) => {
                write!(f, "environment variable {name} is not representable as JSON")
            }
            HandlerError::Serialization(err) => write!(f, "failed to serialize body: {err}"),
        }
    }
}

impl std::error::Error for HandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HandlerError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::Serialization(err)
    }
}

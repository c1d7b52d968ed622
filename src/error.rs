/// Broad failure category. The process exit code is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid configuration / CLI input.
    Config,
    /// Failure writing output files.
    Io,
    /// Request could not be sent or timed out.
    Network,
    /// Server answered with a non-success status.
    Status,
    /// Response body did not have the expected shape.
    Parse,
    /// Response was well-formed but carried no usable data.
    Empty,
    /// No checked site answered (`mkt check`).
    Unreachable,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
            ErrorKind::Network => "network",
            ErrorKind::Status => "status",
            ErrorKind::Parse => "parse",
            ErrorKind::Empty => "empty",
            ErrorKind::Unreachable => "unreachable",
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Status, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Empty, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> u8 {
        match self.kind {
            ErrorKind::Unreachable => 1,
            ErrorKind::Config => 2,
            ErrorKind::Io => 3,
            ErrorKind::Network | ErrorKind::Status | ErrorKind::Parse | ErrorKind::Empty => 4,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_status() {
            AppError::status(format!("HTTP error: {err}"))
        } else if err.is_decode() {
            AppError::parse(format!("Failed to decode response: {err}"))
        } else {
            AppError::network(format!("Request failed: {err}"))
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_kind() {
        assert_eq!(AppError::config("x").exit_code(), 2);
        assert_eq!(AppError::io("x").exit_code(), 3);
        assert_eq!(AppError::network("x").exit_code(), 4);
        assert_eq!(AppError::parse("x").exit_code(), 4);
        assert_eq!(AppError::new(ErrorKind::Unreachable, "x").exit_code(), 1);
    }
}

// error.rs
// Error types shared by the data, domain and presentation layers.

// Classification of a failed details fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonDetailsError {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

impl PokemonDetailsError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Network,
            message: Some(message.into()),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Other,
            message: Some(message.into()),
        }
    }

    pub fn is_network_error(&self) -> bool {
        self.kind == ErrorKind::Network
    }
}

impl std::fmt::Display for PokemonDetailsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.kind {
            ErrorKind::Network => "Network error",
            ErrorKind::Other => "Error",
        };
        match &self.message {
            Some(msg) => write!(f, "{}: {}", label, msg),
            None => write!(f, "{}", label),
        }
    }
}

impl std::error::Error for PokemonDetailsError {}

// Errors raised while loading configuration or persisting preferences
#[derive(Debug)]
pub enum AppError {
    ConfigError(String),
    IoError(String),
    ParseError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::IoError(msg) => write!(f, "I/O error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

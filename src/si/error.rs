use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PucError {
    InvalidArgumentType(String),
    ValueConversionError(String),
    InvalidPrecision(String),
    InvalidRequest(String),
    UnknownAlias(String),
    ConfigError(String),
}

impl fmt::Display for PucError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PucError::InvalidArgumentType(msg) => write!(f, "Invalid argument type: {}", msg),
            PucError::ValueConversionError(msg) => write!(f, "Value conversion error: {}", msg),
            PucError::InvalidPrecision(msg) => write!(f, "Invalid precision: {}", msg),
            PucError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            PucError::UnknownAlias(alias) => write!(f, "Unknown unit alias: {}", alias),
            PucError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for PucError {}

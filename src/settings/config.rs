use crate::si::error::PucError;
use crate::si::types::Precision;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Formatting defaults applied when the command line leaves them out
    #[serde(default)]
    pub defaults: Defaults,

    // Unit aliases, used as `@name` in place of a unit
    #[serde(default)]
    pub units: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub precision: Precision,

    #[serde(default)]
    pub file_compatible: bool,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub separator: Separator,
}

/// Separator inserted in front of units given on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    #[default]
    None,
    Space,
    Underscore,
}

impl Separator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::None => "",
            Separator::Space => " ",
            Separator::Underscore => "_",
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, PucError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PucError::ConfigError(format!("{}: {}", path.display(), e)))?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self, PucError> {
        let config: Config =
            toml::from_str(content).map_err(|e| PucError::ConfigError(e.to_string()))?;
        if let Precision::Spacing(ref references) = config.defaults.precision {
            if references.len() < 2 {
                return Err(PucError::ConfigError(
                    "defaults.precision needs a digit count or at least 2 reference values"
                        .to_string(),
                ));
            }
        }
        Ok(config)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a unit alias
    pub fn unit_alias(&self, name: &str) -> Result<&str, PucError> {
        self.units
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| PucError::UnknownAlias(name.to_string()))
    }
}

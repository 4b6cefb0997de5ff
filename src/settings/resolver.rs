use crate::si::error::PucError;
use crate::si::types::Precision;
use crate::settings::config::Config;

/// Options as given on the command line, all optional
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub unit: Option<String>,
    pub digits: Option<u32>,
    pub references: Option<Vec<f64>>,
    pub verbose: bool,
    pub file_compatible: bool,
}

/// Options after merging the command line with the config file
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    pub unit: String,
    pub precision: Precision,
    pub verbose: bool,
    pub file_compatible: bool,
}

pub struct OptionResolver {
    config: Config,
}

impl OptionResolver {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Merge command line options over the config defaults
    ///
    /// Precision precedence: explicit digit count, then reference values,
    /// then the config default. Flags set in either place are enabled.
    pub fn resolve(&self, cli: &CliOptions) -> Result<FormatOptions, PucError> {
        let defaults = &self.config.defaults;

        let unit = match cli.unit.as_deref() {
            Some(unit) => self.resolve_unit(unit)?,
            None => String::new(),
        };

        let precision = if let Some(digits) = cli.digits {
            Precision::Digits(digits)
        } else if let Some(references) = &cli.references {
            Precision::Spacing(references.clone())
        } else {
            defaults.precision.clone()
        };

        Ok(FormatOptions {
            unit,
            precision,
            verbose: cli.verbose || defaults.verbose,
            file_compatible: cli.file_compatible || defaults.file_compatible,
        })
    }

    /// Expand an `@alias` and apply the default separator
    ///
    /// Units that already carry a separator are left alone.
    pub fn resolve_unit(&self, unit: &str) -> Result<String, PucError> {
        let unit = match unit.strip_prefix('@') {
            Some(alias) => self.config.unit_alias(alias)?,
            None => unit,
        };

        if unit.is_empty() || unit.contains(' ') || unit.contains('_') {
            return Ok(unit.to_string());
        }

        Ok(format!("{}{}", self.config.defaults.separator.as_str(), unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(toml: &str) -> OptionResolver {
        OptionResolver::new(Config::load_from_str(toml).unwrap())
    }

    #[test]
    fn test_cli_overrides_config() {
        let resolver = resolver("[defaults]\nprecision = 5\n");

        let options = resolver.resolve(&CliOptions::default()).unwrap();
        assert_eq!(options.precision, Precision::Digits(5));

        let options = resolver
            .resolve(&CliOptions {
                digits: Some(2),
                references: Some(vec![1.0, 2.0]),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(options.precision, Precision::Digits(2));

        let options = resolver
            .resolve(&CliOptions {
                references: Some(vec![1.0, 2.0]),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(options.precision, Precision::Spacing(vec![1.0, 2.0]));
    }

    #[test]
    fn test_flags_are_merged() {
        let resolver = resolver("[defaults]\nfile_compatible = true\n");
        let options = resolver
            .resolve(&CliOptions {
                verbose: true,
                ..Default::default()
            })
            .unwrap();
        assert!(options.verbose);
        assert!(options.file_compatible);
    }

    #[test]
    fn test_unit_aliases_and_separator() {
        let resolver = resolver("[defaults]\nseparator = \"space\"\n[units]\npower = \"W\"\n");

        assert_eq!(resolver.resolve_unit("@power").unwrap(), " W");
        assert_eq!(resolver.resolve_unit("m").unwrap(), " m");
        assert_eq!(resolver.resolve_unit("_m").unwrap(), "_m");
        assert_eq!(resolver.resolve_unit("").unwrap(), "");
        assert!(matches!(
            resolver.resolve_unit("@length"),
            Err(PucError::UnknownAlias(_))
        ));
    }
}

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use exvs_cost_core::{Formation, UnitConfig, UnitSlot};
use serde::Deserialize;

use crate::output::OutputFormat;

/// Log filter applied when neither `RUST_LOG` nor the config provide one.
pub(crate) const DEFAULT_LOG_FILTER: &str = "warn";

/// Optional settings loaded from a TOML file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    /// Maximum number of ranked outcomes to print.
    pub(crate) limit: Option<usize>,
    /// Output format used when `--format` is omitted.
    pub(crate) format: Option<OutputFormat>,
    /// Tracing filter directive.
    pub(crate) log_filter: Option<String>,
    /// Formation used for slots not given on the command line.
    pub(crate) formation: Formation,
}

impl CliConfig {
    /// Returns the default config path relative to the working directory.
    #[must_use]
    pub(crate) fn default_path() -> PathBuf {
        PathBuf::from("exvs-cost.toml")
    }

    /// Loads the config from `path`, or from the default path when it exists.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = Self::default_path();
                if !fallback.is_file() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parses and validates TOML contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse config toml contents")?;
        for slot in UnitSlot::ALL {
            if let Some(unit) = config.formation.unit(slot) {
                validate_unit(unit)
                    .with_context(|| format!("formation unit {slot} is not in the catalog"))?;
            }
        }
        Ok(config)
    }
}

fn validate_unit(unit: &UnitConfig) -> Result<()> {
    exvs_cost_catalog::unit(unit.cost().into(), unit.health(), unit.special_revival())
        .map(drop)
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use exvs_cost_core::CostTier;

    #[test]
    fn empty_config_uses_defaults() {
        let config = CliConfig::parse("").expect("empty config parses");
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn parses_full_config() {
        let config = CliConfig::parse(
            r#"
            limit = 5
            format = "json"
            log_filter = "debug"

            [formation.unit_a]
            cost = 3000
            health = 800

            [formation.unit_b]
            cost = 2500
            health = 700
            special_revival = true
            "#,
        )
        .expect("config parses");

        assert_eq!(config.limit, Some(5));
        assert_eq!(config.format, Some(OutputFormat::Json));
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert_eq!(
            config.formation,
            Formation::pair(
                UnitConfig::new(CostTier::C3000, 800),
                UnitConfig::new(CostTier::C2500, 700).with_special_revival(true),
            )
        );
    }

    #[test]
    fn rejects_units_outside_catalog() {
        let error = CliConfig::parse(
            r#"
            [formation.unit_a]
            cost = 3000
            health = 15
            "#,
        )
        .expect_err("health 15 is not offered");
        assert!(format!("{error:#}").contains("not available for cost 3000"));
    }

    #[test]
    fn validates_units_against_catalog() {
        let offered = UnitConfig::new(CostTier::C2000, 640).with_special_revival(true);
        assert!(validate_unit(&offered).is_ok());

        let unoffered = UnitConfig::new(CostTier::C1500, 800);
        let error = validate_unit(&unoffered).expect_err("1500/800 is not offered");
        assert!(error.to_string().contains("not available for cost 1500"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(CliConfig::parse("colour = \"red\"").is_err());
    }
}

use std::str::FromStr;

use exvs_cost_catalog::CatalogError;
use exvs_cost_core::UnitConfig;
use thiserror::Error;

const FIELD_DELIMITER: char = ':';
const REVIVAL_FLAGS: [&str; 3] = ["revival", "rev", "r"];

/// Unit passed on the command line as `COST:HEALTH[:revival]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct UnitArg(pub(crate) UnitConfig);

impl FromStr for UnitArg {
    type Err = UnitArgError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let mut parts = trimmed.split(FIELD_DELIMITER);
        let cost = parts
            .next()
            .filter(|part| !part.is_empty())
            .ok_or(UnitArgError::MissingCost)?;
        let health = parts.next().ok_or(UnitArgError::MissingHealth)?;
        let special_revival = match parts.next() {
            None => false,
            Some(flag) if REVIVAL_FLAGS.contains(&flag.to_ascii_lowercase().as_str()) => true,
            Some(flag) => return Err(UnitArgError::UnknownFlag(flag.to_owned())),
        };
        if let Some(extra) = parts.next() {
            return Err(UnitArgError::UnknownFlag(extra.to_owned()));
        }

        let cost = parse_number(cost)?;
        let health = parse_number(health)?;
        let unit = exvs_cost_catalog::unit(cost, health, special_revival)?;
        Ok(Self(unit))
    }
}

fn parse_number(value: &str) -> Result<u32, UnitArgError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| UnitArgError::InvalidNumber(value.to_owned()))
}

/// Errors that can occur while parsing a unit argument.
#[derive(Debug, Error)]
pub(crate) enum UnitArgError {
    /// The argument was empty.
    #[error("unit is missing its cost; expected COST:HEALTH[:revival]")]
    MissingCost,
    /// The argument had no health segment.
    #[error("unit is missing its health; expected COST:HEALTH[:revival]")]
    MissingHealth,
    /// A segment could not be parsed as a number.
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    /// The optional third segment was not a revival flag.
    #[error("unknown unit flag '{0}'; expected 'revival'")]
    UnknownFlag(String),
    /// The cost and health do not name a catalog unit.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

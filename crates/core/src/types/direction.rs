//! Stock transaction direction.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a stock transaction.
///
/// `Input` records goods received (stock increases); `Output` records goods
/// consumed or shipped (stock decreases, floored at zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockDirection {
    Input,
    Output,
}

impl StockDirection {
    /// Apply a transaction of `quantity` to `current` stock.
    ///
    /// Output transactions floor at zero: over-withdrawal is silently
    /// discarded, never rejected.
    #[must_use]
    pub fn apply(self, current: i32, quantity: i32) -> i32 {
        match self {
            Self::Input => current + quantity,
            Self::Output => (current - quantity).max(0),
        }
    }

    /// Storage/wire representation (`"input"` / `"output"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for StockDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown direction string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown stock direction: {0}")]
pub struct ParseDirectionError(String);

impl std::str::FromStr for StockDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(Self::Input),
            "output" => Ok(Self::Output),
            other => Err(ParseDirectionError(other.to_owned())),
        }
    }
}

// SQLx support (with postgres feature): stored as TEXT.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for StockDirection {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for StockDirection {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for StockDirection {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_adds() {
        assert_eq!(StockDirection::Input.apply(150, 25), 175);
        assert_eq!(StockDirection::Input.apply(0, 10), 10);
    }

    #[test]
    fn test_output_subtracts() {
        assert_eq!(StockDirection::Output.apply(45, 20), 25);
    }

    #[test]
    fn test_output_floors_at_zero() {
        assert_eq!(StockDirection::Output.apply(8, 12), 0);
        assert_eq!(StockDirection::Output.apply(0, 1), 0);
    }

    #[test]
    fn test_parse_roundtrip() {
        assert_eq!(
            "input".parse::<StockDirection>().ok(),
            Some(StockDirection::Input)
        );
        assert_eq!(
            "output".parse::<StockDirection>().ok(),
            Some(StockDirection::Output)
        );
        assert!("both".parse::<StockDirection>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&StockDirection::Output).expect("serialize");
        assert_eq!(json, "\"output\"");
    }
}

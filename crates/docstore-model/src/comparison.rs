//! Comparison operators applied to cast values.
//!
//! Operators are looked up by their wire name (`EQ`, `BEGINS_WITH`, ...) and
//! evaluate an n-ary predicate: the target value first, followed by the
//! operator's arguments.

use std::fmt;
use std::str::FromStr;

use crate::cast::CastValue;
use crate::error::ValueError;

/// A named comparison predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    /// `EQ`
    Eq,
    /// `NE`
    Ne,
    /// `LE`
    Le,
    /// `LT`
    Lt,
    /// `GE`
    Ge,
    /// `GT`
    Gt,
    /// `NULL`: the target is absent.
    Null,
    /// `NOT_NULL`: the target is present.
    NotNull,
    /// `CONTAINS`
    Contains,
    /// `NOT_CONTAINS`
    NotContains,
    /// `BEGINS_WITH`
    BeginsWith,
    /// `IN`: the target equals one of the arguments.
    In,
    /// `BETWEEN`: inclusive range.
    Between,
}

impl ComparisonOperator {
    /// Returns the wire name of this operator.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Le => "LE",
            Self::Lt => "LT",
            Self::Ge => "GE",
            Self::Gt => "GT",
            Self::Null => "NULL",
            Self::NotNull => "NOT_NULL",
            Self::Contains => "CONTAINS",
            Self::NotContains => "NOT_CONTAINS",
            Self::BeginsWith => "BEGINS_WITH",
            Self::In => "IN",
            Self::Between => "BETWEEN",
        }
    }

    fn check_arity(self, actual: usize) -> Result<(), ValueError> {
        let (ok, expected) = match self {
            Self::Null | Self::NotNull => (actual == 0, "0"),
            Self::Between => (actual == 2, "2"),
            Self::In => (actual >= 1, "at least 1"),
            _ => (actual == 1, "1"),
        };
        if ok {
            Ok(())
        } else {
            Err(ValueError::InvalidArgumentCount {
                operator: self.as_str(),
                expected,
                actual,
            })
        }
    }

    /// Evaluate the predicate for a present target value.
    pub fn evaluate(self, target: &CastValue, args: &[CastValue]) -> Result<bool, ValueError> {
        self.check_arity(args.len())?;
        let result = match self {
            Self::Eq => *target == args[0],
            Self::Ne => *target != args[0],
            Self::Le => *target <= args[0],
            Self::Lt => *target < args[0],
            Self::Ge => *target >= args[0],
            Self::Gt => *target > args[0],
            Self::Null => false,
            Self::NotNull => true,
            Self::Contains => target.contains(&args[0]),
            Self::NotContains => !target.contains(&args[0]),
            Self::BeginsWith => target.starts_with(&args[0]),
            Self::In => args.contains(target),
            Self::Between => args[0] <= *target && *target <= args[1],
        };
        Ok(result)
    }
}

impl FromStr for ComparisonOperator {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EQ" => Ok(Self::Eq),
            "NE" => Ok(Self::Ne),
            "LE" => Ok(Self::Le),
            "LT" => Ok(Self::Lt),
            "GE" => Ok(Self::Ge),
            "GT" => Ok(Self::Gt),
            "NULL" => Ok(Self::Null),
            "NOT_NULL" => Ok(Self::NotNull),
            "CONTAINS" => Ok(Self::Contains),
            "NOT_CONTAINS" => Ok(Self::NotContains),
            "BEGINS_WITH" => Ok(Self::BeginsWith),
            "IN" => Ok(Self::In),
            "BETWEEN" => Ok(Self::Between),
            other => Err(ValueError::UnknownComparisonOperator {
                name: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

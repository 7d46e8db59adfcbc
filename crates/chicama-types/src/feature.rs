//! Feature identifiers and values.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The per-stock-per-day features produced by the pipeline.
///
/// `as_str` names double as the output file stems, matching the tables the
/// downstream impact-model stage reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Mid-quote return series sampled every 120 records.
    #[serde(rename = "2min_returns")]
    TwoMinuteReturns,
    /// Total posted size over the day (bid + ask), a liquidity proxy.
    TotalVolume,
    /// Mean mid-quote over the first five records.
    ArrivalPrice,
    /// Net bid-minus-ask size over the 09:30-15:30 window.
    Imbalance,
    /// Mid-quote of the last record of the day.
    TerminalPrice,
}

impl Feature {
    /// Returns the feature's identifier, used as the output file stem.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TwoMinuteReturns => "2min_returns",
            Self::TotalVolume => "total_volume",
            Self::ArrivalPrice => "arrival_price",
            Self::Imbalance => "imbalance",
            Self::TerminalPrice => "terminal_price",
        }
    }

    /// Returns all features in their canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::TwoMinuteReturns,
            Self::TotalVolume,
            Self::ArrivalPrice,
            Self::Imbalance,
            Self::TerminalPrice,
        ]
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown feature name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown feature: {0}")]
pub struct FeatureParseError(pub String);

impl FromStr for Feature {
    type Err = FeatureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2min_returns" => Ok(Self::TwoMinuteReturns),
            "total_volume" => Ok(Self::TotalVolume),
            "arrival_price" => Ok(Self::ArrivalPrice),
            "imbalance" => Ok(Self::Imbalance),
            "terminal_price" => Ok(Self::TerminalPrice),
            _ => Err(FeatureParseError(s.to_string())),
        }
    }
}

/// One computed feature value.
///
/// NaN scalars are carried through unchanged so downstream consumers can
/// filter them explicitly.
///
/// Untagged deserialization tries the variants in declaration order, so
/// `Size` precedes `Scalar` to keep integer cells integral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// A size-like integer sum.
    Size(i64),
    /// A price-like scalar.
    Scalar(f64),
    /// An ordered return series.
    Returns(Vec<f64>),
}

impl FeatureValue {
    /// Returns the scalar value, if this is a scalar.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer value, if this is a size.
    #[must_use]
    pub const fn as_size(&self) -> Option<i64> {
        match self {
            Self::Size(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the return series, if this is one.
    #[must_use]
    pub fn as_returns(&self) -> Option<&[f64]> {
        match self {
            Self::Returns(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Size(v) => write!(f, "{v}"),
            // JSON keeps the cell rectangular-file safe
            Self::Returns(v) => {
                let encoded = serde_json::to_string(v).map_err(|_| std::fmt::Error)?;
                write!(f, "{encoded}")
            }
        }
    }
}

//! Exact decimal prices.
//!
//! Catalog prices are stored as `NUMERIC` and must not pick up binary
//! floating-point error on the way through the API, but clients expect a
//! plain JSON number (`"price_baht": 1099000`), not a string. [`Price`]
//! keeps the exact [`Decimal`] internally and serializes as a number.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-currency-tagged catalog price.
///
/// Car prices are Thai baht; item prices use whatever unit the catalog was
/// seeded with. The API never converts between currencies, so the unit is
/// carried by the field name rather than the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The exact amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    /// Parses plain (`1500000`), fractional (`999.50`) and scientific
    /// (`1.5e6`) notation, which is what browsers send for numeric inputs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map(Self)
    }
}

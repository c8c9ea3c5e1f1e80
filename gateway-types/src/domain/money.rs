//! Currency and minor-unit rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies supported by the gateway layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Returns the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::USD | Currency::EUR | Currency::GBP => 2,
            Currency::JPY => 0,
        }
    }

    /// Returns the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
        }
    }

    /// Rounds an amount to this currency's minor unit.
    ///
    /// Midpoints round away from zero, so `$0.005` becomes `$0.01`.
    /// Providers reject item totals that disagree with the order total
    /// at minor-unit precision, which makes this the one rounding rule
    /// the whole request pipeline must share.
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(
            self.decimal_places() as u32,
            RoundingStrategy::MidpointAwayFromZero,
        )
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_to_minor_unit() {
        assert_eq!(Currency::USD.round(dec!(19.994)), dec!(19.99));
        assert_eq!(Currency::USD.round(dec!(19.995)), dec!(20.00));
        assert_eq!(Currency::USD.round(dec!(19.99)), dec!(19.99));
    }

    #[test]
    fn test_round_zero_decimal_currency() {
        assert_eq!(Currency::JPY.round(dec!(1999.4)), dec!(1999));
        assert_eq!(Currency::JPY.round(dec!(1999.5)), dec!(2000));
    }

    #[test]
    fn test_round_negative_midpoint_away_from_zero() {
        assert_eq!(Currency::USD.round(dec!(-0.005)), dec!(-0.01));
    }

    #[test]
    fn test_display() {
        assert_eq!(Currency::USD.to_string(), "USD");
        assert_eq!(Currency::JPY.symbol(), "¥");
    }
}

//! Monetary amount type.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid monetary amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid amount: {reason}")]
pub struct InvalidMoney {
    reason: &'static str,
}

/// A monetary amount, stored as integer pence.
///
/// Fare arithmetic must be exact, so amounts are never represented as
/// floating point. An amount may be negative (e.g. the result of a
/// subtraction); callers that require non-negative amounts check at
/// their own boundary.
///
/// # Examples
///
/// ```
/// use fare_server::domain::Money;
///
/// let fare = Money::parse("2.50").unwrap();
/// assert_eq!(fare.pence(), 250);
/// assert_eq!(fare.to_string(), "£2.50");
///
/// // A currency symbol is accepted
/// assert_eq!(Money::parse("£3.20").unwrap(), Money::from_pence(320));
///
/// // More than two fractional digits is rejected
/// assert!(Money::parse("2.505").is_err());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Zero pence.
    pub const ZERO: Money = Money(0);

    /// Construct an amount from integer pence.
    pub const fn from_pence(pence: i64) -> Self {
        Money(pence)
    }

    /// Returns the amount in pence.
    pub const fn pence(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is strictly negative.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Add, returning `None` on numeric overflow.
    ///
    /// Balance mutations go through this rather than `+`: amounts
    /// arriving from callers are unbounded, and an overflowed balance
    /// would silently wrap negative.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Subtract, returning `None` on numeric overflow.
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Parse a decimal amount such as `"2.50"`, `"£3.20"` or `"-1"`.
    ///
    /// At most two fractional digits are accepted; a single fractional
    /// digit means tens of pence (`"2.5"` is 250 pence).
    pub fn parse(s: &str) -> Result<Self, InvalidMoney> {
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let s = s.strip_prefix('£').unwrap_or(s);

        if s.is_empty() {
            return Err(InvalidMoney {
                reason: "amount must not be empty",
            });
        }

        let (pounds, fraction) = match s.split_once('.') {
            Some((p, f)) => (p, f),
            None => (s, ""),
        };

        if pounds.is_empty() || !pounds.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidMoney {
                reason: "pounds part must be decimal digits",
            });
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidMoney {
                reason: "at most two fractional digits of pence",
            });
        }

        let pounds: i64 = pounds.parse().map_err(|_| InvalidMoney {
            reason: "pounds part out of range",
        })?;
        let mut pence: i64 = if fraction.is_empty() {
            0
        } else {
            // "5" means 50p, "05" means 5p
            let raw: i64 = fraction.parse().map_err(|_| InvalidMoney {
                reason: "pence part out of range",
            })?;
            if fraction.len() == 1 { raw * 10 } else { raw }
        };
        pence += pounds * 100;

        Ok(Money(if negative { -pence } else { pence }))
    }
}

// Plain operators are for table-bounded fare math and tests, where
// operands are known small; unbounded paths use the checked methods.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}£{}.{:02}", abs / 100, abs % 100)
    }
}

impl fmt::Debug for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Money({self})")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Display then parse returns the original amount.
        #[test]
        fn display_parse_roundtrip(pence in -1_000_000i64..1_000_000) {
            let m = Money::from_pence(pence);
            prop_assert_eq!(Money::parse(&m.to_string()).unwrap(), m);
        }

        /// Addition and subtraction are inverses.
        #[test]
        fn add_sub_inverse(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
            let (a, b) = (Money::from_pence(a), Money::from_pence(b));
            prop_assert_eq!(a + b - b, a);
        }

        /// Parsing never panics on arbitrary input.
        #[test]
        fn parse_never_panics(s in ".{0,12}") {
            let _ = Money::parse(&s);
        }
    }
}

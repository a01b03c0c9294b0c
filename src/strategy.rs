//! Collision strategy tags and validated construction parameters.

use crate::error::TableError;
use core::fmt;
use core::str::FromStr;

/// Collision-resolution strategy, fixed for a table's lifetime.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Separate chaining: one insertion-ordered bucket per index.
    Chaining,
    /// Open addressing with unit step.
    LinearProbing,
    /// Open addressing with a per-key step from the secondary hash.
    DoubleHashing,
}

impl Strategy {
    pub fn is_open_addressing(self) -> bool {
        !matches!(self, Strategy::Chaining)
    }
}

impl FromStr for Strategy {
    type Err = TableError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "Chaining" | "Chain" => Ok(Strategy::Chaining),
            "Linear" => Ok(Strategy::LinearProbing),
            "Double" => Ok(Strategy::DoubleHashing),
            other => Err(TableError::config(format!(
                "unrecognized collision strategy {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Chaining => "Chaining",
            Strategy::LinearProbing => "Linear",
            Strategy::DoubleHashing => "Double",
        })
    }
}

/// Hash coefficients decoded from the caller's coefficient list.
///
/// Layout: `[z, ..., capacity]` for chaining and linear probing,
/// `[z, z2, c2, ..., capacity]` for double hashing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Params {
    pub z: u64,
    pub secondary: Option<(u64, u64)>,
    pub initial_capacity: usize,
}

impl Params {
    pub fn parse(strategy: Strategy, coefficients: &[u64]) -> Result<Self, TableError> {
        let (&z, &last) = match (coefficients.first(), coefficients.last()) {
            (Some(z), Some(last)) => (z, last),
            _ => return Err(TableError::config("coefficient list is empty")),
        };
        let initial_capacity = usize::try_from(last)
            .map_err(|_| TableError::config(format!("capacity {last} does not fit in usize")))?;
        if initial_capacity == 0 {
            return Err(TableError::config("capacity must be positive"));
        }
        let secondary = match strategy {
            Strategy::DoubleHashing => {
                if coefficients.len() < 4 {
                    return Err(TableError::config(format!(
                        "double hashing needs [z, z2, c2, capacity], got {} coefficients",
                        coefficients.len()
                    )));
                }
                let (z2, c2) = (coefficients[1], coefficients[2]);
                if c2 == 0 {
                    return Err(TableError::config("secondary modulus must be positive"));
                }
                Some((z2, c2))
            }
            Strategy::Chaining | Strategy::LinearProbing => None,
        };
        Ok(Params {
            z,
            secondary,
            initial_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: every documented tag parses, including the short chaining alias.
    #[test]
    fn tags_parse() {
        assert_eq!("Chaining".parse::<Strategy>(), Ok(Strategy::Chaining));
        assert_eq!("Chain".parse::<Strategy>(), Ok(Strategy::Chaining));
        assert_eq!("Linear".parse::<Strategy>(), Ok(Strategy::LinearProbing));
        assert_eq!("Double".parse::<Strategy>(), Ok(Strategy::DoubleHashing));
        assert!(matches!(
            "Quadratic".parse::<Strategy>(),
            Err(TableError::InvalidConfiguration(_))
        ));
    }

    /// Invariant: only chaining keeps entries outside the slot array.
    #[test]
    fn open_addressing_split() {
        assert!(!Strategy::Chaining.is_open_addressing());
        assert!(Strategy::LinearProbing.is_open_addressing());
        assert!(Strategy::DoubleHashing.is_open_addressing());
    }

    /// Invariant: Display round-trips through FromStr.
    #[test]
    fn display_round_trips() {
        for s in [
            Strategy::Chaining,
            Strategy::LinearProbing,
            Strategy::DoubleHashing,
        ] {
            assert_eq!(s.to_string().parse::<Strategy>(), Ok(s));
        }
    }

    /// Invariant: the last coefficient is the capacity, the first the multiplier.
    #[test]
    fn params_layout() {
        let p = Params::parse(Strategy::Chaining, &[31, 7]).unwrap();
        assert_eq!(p.z, 31);
        assert_eq!(p.initial_capacity, 7);
        assert_eq!(p.secondary, None);

        let p = Params::parse(Strategy::DoubleHashing, &[10, 37, 7, 13]).unwrap();
        assert_eq!(p.z, 10);
        assert_eq!(p.secondary, Some((37, 7)));
        assert_eq!(p.initial_capacity, 13);
    }

    /// Invariant: a single coefficient serves as both multiplier and capacity.
    #[test]
    fn single_coefficient() {
        let p = Params::parse(Strategy::LinearProbing, &[11]).unwrap();
        assert_eq!(p.z, 11);
        assert_eq!(p.initial_capacity, 11);
    }

    /// Invariant: malformed coefficient lists are configuration errors.
    #[test]
    fn params_rejected() {
        let bad: [(Strategy, &[u64]); 4] = [
            (Strategy::Chaining, &[]),
            (Strategy::LinearProbing, &[31, 0]),
            (Strategy::DoubleHashing, &[31, 37, 7]),
            (Strategy::DoubleHashing, &[31, 37, 0, 13]),
        ];
        for (strategy, coefficients) in bad {
            assert!(
                matches!(
                    Params::parse(strategy, coefficients),
                    Err(TableError::InvalidConfiguration(_))
                ),
                "{strategy} {coefficients:?} should be rejected"
            );
        }
    }
}

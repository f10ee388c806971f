use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Power in watts, the unit of the zone columns.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::Sum,
)]
pub struct Watts(pub f64);

impl Watts {
    pub const ZERO: Self = Self(0.0);
}

impl Display for Watts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} W", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum() {
        let total: Watts = [Watts(10.0), Watts(20.0), Watts(5.0)].into_iter().sum();
        assert_eq!(total, Watts(35.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Watts(35.25).to_string(), "35.2 W");
    }
}

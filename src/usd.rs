use std::{
    fmt::{Debug, Display},
    iter::Sum,
    ops::{AddAssign, Mul},
};

/// Represents an amount of money in USD currency.
///
/// The amount is stored as a floating-point number of dollars, and the
/// [`Display`] implementation formats it as dollars to 2 decimal places,
/// prefixed with `$`.
#[derive(Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Usd(f64);

impl Usd {
    #[must_use]
    pub fn new(dollars: f64) -> Self {
        Self(dollars)
    }

    #[must_use]
    pub fn dollars(self) -> f64 {
        self.0
    }
}

impl Debug for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl AddAssign for Usd {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for Usd {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Usd {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, x| {
            acc += x;
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_fn_formats_dollars_to_two_decimal_places() {
        assert_eq!(Usd::new(10.0).to_string(), "$10.00");
        assert_eq!(Usd::new(3.5).to_string(), "$3.50");
        assert_eq!(Usd::new(1234.5).to_string(), "$1234.50");
        assert_eq!(Usd::default().to_string(), "$0.00");
    }

    #[test]
    fn mul_fn_multiplies_price_by_quantity() {
        assert_eq!(Usd::new(2.5) * 4.0, Usd::new(10.0));
        assert_eq!(Usd::new(4.25) * 0.0, Usd::default());
        assert_eq!((Usd::new(4.25) * 2.0).dollars(), 8.5);
    }

    #[test]
    fn sum_fn_adds_up_amounts() {
        let total: Usd = [1.25, 2.5, 0.25].into_iter().map(Usd::new).sum();
        assert_eq!(total, Usd::new(4.0));
        assert_eq!(std::iter::empty::<Usd>().sum::<Usd>(), Usd::default());
    }
}

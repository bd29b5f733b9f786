use std::{
    cmp::Ordering,
    fmt,
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul},
};

use serde::Serialize;

/// The cost of an edge in a graph, i.e. a distance scaled by a transport mode.
///
/// Costs are non-negative and never NaN, which makes the total order below agree with `==`. Adding two huge costs
/// may overflow to `f64::INFINITY`, which still orders above every finite cost.
#[derive(Copy, Clone, Debug, Default, Serialize)]
pub struct Cost(f64);

impl Cost {
    pub fn new(cost: f64) -> Self {
        debug_assert!(!cost.is_nan());
        // -0.0 and 0.0 compare differently under total_cmp
        if cost == 0.0 {
            Cost(0.0)
        } else {
            Cost(cost)
        }
    }

    pub fn zero() -> Self {
        Cost(0.0)
    }

    pub fn as_float(&self) -> f64 {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Cost) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Cost) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Cost) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Cost {
    type Output = Self;
    fn add(self, rhs: Cost) -> Self::Output {
        Cost::new(self.0 + rhs.0)
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Cost) {
        *self = *self + rhs
    }
}

impl Sum<Cost> for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Self {
        iter.fold(Cost::zero(), |a, b| a + b)
    }
}

impl<'a> Sum<&'a Cost> for Cost {
    fn sum<I: Iterator<Item = &'a Cost>>(iter: I) -> Self {
        iter.fold(Cost::zero(), |a, b| a + *b)
    }
}

impl Mul<f64> for Cost {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Cost::new(self.0 * rhs)
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Cost {
    fn from(cost: f64) -> Self {
        Cost::new(cost)
    }
}

impl From<u32> for Cost {
    fn from(cost: u32) -> Self {
        Cost::new(cost.into())
    }
}

#[cfg(test)]
mod test_cost {
    use super::*;

    #[test]
    fn test_negative_zero_is_zero() {
        assert_eq!(Cost::new(-0.0), Cost::zero());
        assert_eq!(Cost::new(-0.0).cmp(&Cost::zero()), Ordering::Equal);
    }

    #[test]
    fn test_ordering() {
        let mut costs: Vec<Cost> = vec![3.5.into(), 0.into(), 1.25.into(), 3.into()];
        costs.sort();
        assert_eq!(
            costs,
            vec![Cost::zero(), 1.25.into(), 3.into(), 3.5.into()]
        );
    }

    #[test]
    fn test_sum_and_scale() {
        let total: Cost = vec![Cost::from(10), Cost::from(20)].into_iter().sum();
        assert_eq!(total, 30.into());
        assert_eq!(total * 0.5, 15.into());
        assert_eq!(Cost::from(2) * 1.2, Cost::new(2.0 * 1.2));
    }

    #[test]
    fn test_overflowing_sum_is_infinite() {
        let huge = Cost::new(f64::MAX);
        let total = huge + huge;
        assert!(!total.is_finite());
        assert_eq!(total.as_float(), f64::INFINITY);
        assert!(total > huge);
        assert_eq!(total + Cost::from(1), total);
    }
}

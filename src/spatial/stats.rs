//! Missing-aware summary statistics shared by the grid, zone and gradient code.
//!
//! Every accumulator skips `None` inputs; a summary that saw no values reports `None`
//! rather than a zero.

use ordered_float::OrderedFloat;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Summary {
    count: usize,
    sum: f64,
    min: Option<OrderedFloat<f64>>,
    max: Option<OrderedFloat<f64>>,
}

impl Summary {
    pub fn push(&mut self, value: Option<f64>) {
        let Some(value) = value else {
            return;
        };
        let value = OrderedFloat(value);
        self.count += 1;
        self.sum += value.into_inner();
        self.min = Some(self.min.map_or(value, |current| current.min(value)));
        self.max = Some(self.max.map_or(value, |current| current.max(value)));
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    pub fn min(&self) -> Option<f64> {
        self.min.map(OrderedFloat::into_inner)
    }

    pub fn max(&self) -> Option<f64> {
        self.max.map(OrderedFloat::into_inner)
    }
}

impl FromIterator<Option<f64>> for Summary {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        let mut summary = Summary::default();
        for value in iter {
            summary.push(value);
        }
        summary
    }
}

/// Population mean and standard deviation (divisor `n`), or `None` for no values.
pub(crate) fn mean_and_population_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_skips_missing_values() {
        let summary: Summary = [Some(3.0), None, Some(-1.0), Some(4.0)].into_iter().collect();
        assert_eq!(summary.count(), 3);
        assert_eq!(summary.mean(), Some(2.0));
        assert_eq!(summary.min(), Some(-1.0));
        assert_eq!(summary.max(), Some(4.0));
    }

    #[test]
    fn test_all_missing_summary_is_missing_not_zero() {
        let summary: Summary = [None, None].into_iter().collect();
        assert_eq!(summary.count(), 0);
        assert_eq!(summary.mean(), None);
        assert_eq!(summary.min(), None);
        assert_eq!(summary.max(), None);
    }

    #[test]
    fn test_population_std() {
        let (mean, std) = mean_and_population_std(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
        assert_eq!(mean, 30.0);
        assert!((std - 200f64.sqrt()).abs() < 1e-12);
        assert_eq!(mean_and_population_std(&[]), None);
        assert_eq!(mean_and_population_std(&[7.0]), Some((7.0, 0.0)));
    }
}

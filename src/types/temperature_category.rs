use serde::Serialize;
use std::fmt;

/// Coarse temperature band used to colour observation markers.
///
/// Bands are in degrees Fahrenheit and right-inclusive: `(-inf, 32]`, `(32, 50]`,
/// `(50, 70]`, `(70, 90]`, `(90, inf)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TemperatureCategory {
    Freezing,
    Cold,
    Cool,
    Warm,
    Hot,
}

impl TemperatureCategory {
    pub fn from_fahrenheit(temperature: f64) -> Self {
        if temperature <= 32.0 {
            TemperatureCategory::Freezing
        } else if temperature <= 50.0 {
            TemperatureCategory::Cold
        } else if temperature <= 70.0 {
            TemperatureCategory::Cool
        } else if temperature <= 90.0 {
            TemperatureCategory::Warm
        } else {
            TemperatureCategory::Hot
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TemperatureCategory::Freezing => "Freezing",
            TemperatureCategory::Cold => "Cold",
            TemperatureCategory::Cool => "Cool",
            TemperatureCategory::Warm => "Warm",
            TemperatureCategory::Hot => "Hot",
        }
    }
}

impl fmt::Display for TemperatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_edges_are_right_inclusive() {
        assert_eq!(TemperatureCategory::from_fahrenheit(32.0), TemperatureCategory::Freezing);
        assert_eq!(TemperatureCategory::from_fahrenheit(32.1), TemperatureCategory::Cold);
        assert_eq!(TemperatureCategory::from_fahrenheit(50.0), TemperatureCategory::Cold);
        assert_eq!(TemperatureCategory::from_fahrenheit(70.0), TemperatureCategory::Cool);
        assert_eq!(TemperatureCategory::from_fahrenheit(90.0), TemperatureCategory::Warm);
        assert_eq!(TemperatureCategory::from_fahrenheit(104.5), TemperatureCategory::Hot);
        assert_eq!(TemperatureCategory::from_fahrenheit(-40.0), TemperatureCategory::Freezing);
    }
}

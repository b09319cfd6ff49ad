use serde::{Deserialize, Serialize};

const POUNDS_PER_KILOGRAM: f64 = 2.2046226218;

/// Unit a client prefers for weight readings. Readings are stored in
/// kilograms and converted on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    Kilogram,
    Pound,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kilogram => "kg",
            WeightUnit::Pound => "lb",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "kg" => Some(WeightUnit::Kilogram),
            "lb" => Some(WeightUnit::Pound),
            _ => None,
        }
    }

    /// Convert a stored kilogram reading into this unit.
    pub fn from_kilograms(&self, kilograms: f64) -> f64 {
        match self {
            WeightUnit::Kilogram => kilograms,
            WeightUnit::Pound => kilograms * POUNDS_PER_KILOGRAM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub tags: Vec<String>,
    pub weight_unit: WeightUnit,
}

impl Client {
    /// Create a client with the given identity and display name; the
    /// remaining profile fields start empty.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            phone: String::new(),
            address: String::new(),
            tags: Vec::new(),
            weight_unit: WeightUnit::Kilogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pound_conversion_uses_standard_factor() {
        let pounds = WeightUnit::Pound.from_kilograms(10.0);
        assert!((pounds - 22.046226218).abs() < 1e-9);
        assert_eq!(WeightUnit::Kilogram.from_kilograms(10.0), 10.0);
    }

    #[test]
    fn unit_round_trips_through_str() {
        for unit in [WeightUnit::Kilogram, WeightUnit::Pound] {
            assert_eq!(WeightUnit::from_str(unit.as_str()), Some(unit));
        }
        assert_eq!(WeightUnit::from_str("stone"), None);
    }
}

//! Station data for radio operators and call-sign lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo::{GeoCoordinate, PixelPoint};

/// Sentinel for a numeric station attribute that was not supplied.
pub const UNKNOWN_VALUE: f64 = -100.0;

/// Normalize a call sign for matching: uppercase, all whitespace removed.
pub fn normalize_call_sign(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

fn known(value: f64) -> Option<f64> {
    if value == UNKNOWN_VALUE {
        None
    } else {
        Some(value)
    }
}

/// Station data for one operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    /// Normalized call sign
    pub call_sign: String,
    /// Geographic position of the station
    pub location: GeoCoordinate,
    /// Position on the base map image
    pub pixel: PixelPoint,
    /// Transmitter power in Watts, or `UNKNOWN_VALUE`
    pub power_watts: f64,
    /// Antenna type, empty when unknown
    pub antenna_type: String,
    /// Estimated antenna gain in dBi, or `UNKNOWN_VALUE`
    pub antenna_gain_dbi: f64,
    /// Antenna height in feet, or `UNKNOWN_VALUE`
    pub antenna_height_ft: f64,
}

impl Operator {
    pub fn known_power(&self) -> Option<f64> {
        known(self.power_watts)
    }

    pub fn known_antenna_type(&self) -> Option<&str> {
        if self.antenna_type.is_empty() {
            None
        } else {
            Some(&self.antenna_type)
        }
    }

    pub fn known_antenna_gain(&self) -> Option<f64> {
        known(self.antenna_gain_dbi)
    }

    pub fn known_antenna_height(&self) -> Option<f64> {
        known(self.antenna_height_ft)
    }
}

/// How call signs from the report file are matched against the operator file.
///
/// Reports sometimes carry a suffixed call sign (`K7ABC-1`, `K7ABC-P`) for an
/// operator listed under the plain call sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallSignMatch {
    /// Only the normalized call sign itself.
    Exact,
    /// The call sign itself, then the part before the first hyphen.
    #[default]
    BaseCall,
}

impl CallSignMatch {
    /// The fallback key to try after an exact miss, if any.
    pub fn fallback<'a>(&self, call_sign: &'a str) -> Option<&'a str> {
        match self {
            CallSignMatch::Exact => None,
            CallSignMatch::BaseCall => call_sign
                .split_once('-')
                .map(|(base, _)| base)
                .filter(|base| !base.is_empty()),
        }
    }
}

/// All known operators keyed by normalized call sign.
#[derive(Debug, Clone, Default)]
pub struct OperatorCatalog {
    operators: HashMap<String, Operator>,
    matching: CallSignMatch,
}

impl OperatorCatalog {
    pub fn new(matching: CallSignMatch) -> Self {
        Self {
            operators: HashMap::new(),
            matching,
        }
    }

    /// Add an operator, replacing any earlier entry with the same call sign.
    pub fn insert(&mut self, operator: Operator) -> Option<Operator> {
        let previous = self.operators.insert(operator.call_sign.clone(), operator);
        if let Some(previous) = &previous {
            tracing::debug!(call_sign = %previous.call_sign, "Duplicate operator record replaced");
        }
        previous
    }

    /// Look up an operator using the catalog's matching policy.
    pub fn get(&self, call_sign: &str) -> Option<&Operator> {
        self.operators.get(call_sign).or_else(|| {
            let base = self.matching.fallback(call_sign)?;
            let operator = self.operators.get(base)?;
            tracing::debug!(call_sign, matched = base, "Matched suffixed call sign to base call");
            Some(operator)
        })
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator(call_sign: &str) -> Operator {
        Operator {
            call_sign: call_sign.to_string(),
            location: GeoCoordinate::new(47.6, -122.3),
            pixel: PixelPoint::new(0, 0),
            power_watts: 50.0,
            antenna_type: String::new(),
            antenna_gain_dbi: UNKNOWN_VALUE,
            antenna_height_ft: 30.0,
        }
    }

    #[test]
    fn test_normalize_call_sign() {
        assert_eq!(normalize_call_sign(" k7 abc\t"), "K7ABC");
        assert_eq!(normalize_call_sign("w1aw-1"), "W1AW-1");
    }

    #[test]
    fn test_known_attributes() {
        let op = operator("K7ABC");
        assert_eq!(op.known_power(), Some(50.0));
        assert_eq!(op.known_antenna_type(), None);
        assert_eq!(op.known_antenna_gain(), None);
        assert_eq!(op.known_antenna_height(), Some(30.0));
    }

    #[test]
    fn test_exact_matching_ignores_suffix() {
        let mut catalog = OperatorCatalog::new(CallSignMatch::Exact);
        catalog.insert(operator("K7ABC"));

        assert!(catalog.get("K7ABC").is_some());
        assert!(catalog.get("K7ABC-1").is_none());
    }

    #[test]
    fn test_base_call_matching() {
        let mut catalog = OperatorCatalog::new(CallSignMatch::BaseCall);
        catalog.insert(operator("K7ABC"));
        catalog.insert(operator("W1AW-2"));

        assert_eq!(catalog.get("K7ABC-1").unwrap().call_sign, "K7ABC");
        // Exact entries win over the base call
        assert_eq!(catalog.get("W1AW-2").unwrap().call_sign, "W1AW-2");
        assert!(catalog.get("W1AW").is_none());
        assert!(catalog.get("-1").is_none());
    }

    #[test]
    fn test_duplicate_insert_replaces() {
        let mut catalog = OperatorCatalog::default();
        assert!(catalog.insert(operator("K7ABC")).is_none());
        assert!(catalog.insert(operator("K7ABC")).is_some());
        assert_eq!(catalog.len(), 1);
    }
}

//! Unit normalization to price per kilogram

use regex::Regex;
use std::sync::LazyLock;

static HUNDRED_KG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"100\s*kg").expect("100 kg pattern is valid"));

/// Unit-less prices above this are assumed to be per quintal
const QUINTAL_GUESS_THRESHOLD: f64 = 1000.0;

/// How a unit string maps to kilograms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitRule {
    /// Already per kilogram
    PerKg,
    /// Per 100 kg written out ("Rs/100 kg")
    PerHundredKg,
    /// Per quintal (100 kg)
    PerQuintal,
    /// Per metric tonne (1000 kg)
    PerTonne,
    /// No unit given; guessed from magnitude
    Unitless,
    /// Unrecognised unit, taken as per kilogram
    Unknown,
}

impl UnitRule {
    /// Pick the rule for a raw unit string; first match wins
    pub fn for_unit(unit: Option<&str>) -> Self {
        let unit = unit.map(|u| u.trim().to_lowercase()).unwrap_or_default();

        if unit.contains("kg") {
            if HUNDRED_KG.is_match(&unit) {
                Self::PerHundredKg
            } else {
                Self::PerKg
            }
        } else if unit.contains("quintal") || unit.contains("qtl") {
            Self::PerQuintal
        } else if ["ton", "tne", "metric ton", "mt"].iter().any(|t| unit.contains(t)) {
            Self::PerTonne
        } else if ["/100kg", "per 100kg", "per100kg"].iter().any(|t| unit.contains(t)) {
            Self::PerHundredKg
        } else if unit.is_empty() {
            Self::Unitless
        } else {
            Self::Unknown
        }
    }
}

/// A price converted to currency per kilogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerKg {
    pub value: f64,
    /// Set when the unit was guessed rather than matched
    pub approximate: bool,
}

impl PerKg {
    fn exact(value: f64) -> Self {
        Self {
            value,
            approximate: false,
        }
    }
}

/// Convert `price` quoted in `unit` to per-kilogram
pub fn to_per_kg(price: f64, unit: Option<&str>) -> PerKg {
    match UnitRule::for_unit(unit) {
        UnitRule::PerKg | UnitRule::Unknown => PerKg::exact(price),
        UnitRule::PerHundredKg | UnitRule::PerQuintal => PerKg::exact(price / 100.0),
        UnitRule::PerTonne => PerKg::exact(price / 1000.0),
        UnitRule::Unitless if price > QUINTAL_GUESS_THRESHOLD => PerKg {
            value: price / 100.0,
            approximate: true,
        },
        UnitRule::Unitless => PerKg::exact(price),
    }
}

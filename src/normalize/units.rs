//! Glucose unit conversion.

use crate::constants::MMOL_TO_MG_FACTOR;

/// Glucose unit a dataset's raw values are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    MgDl,
    MmolL,
}

impl Unit {
    pub fn label(&self) -> &'static str {
        match self {
            Unit::MgDl => "mg/dL",
            Unit::MmolL => "mmol/L",
        }
    }

    /// Convert a raw reading to mg/dL. mmol/L values multiply by the fixed
    /// factor and round to one decimal; mg/dL values pass through.
    pub fn to_mg_dl(&self, value: f64) -> f64 {
        match self {
            Unit::MgDl => value,
            Unit::MmolL => round_one_decimal(value * MMOL_TO_MG_FACTOR),
        }
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

//! Parkinson's voice-measurement form. All fields are continuous.

use crate::error::FieldError;
use crate::features::{FieldSpec, FormValues};

pub const FIELDS: [FieldSpec; 13] = [
    FieldSpec::float("fo", "MDVP:Fo(Hz)", 50.0, 300.0, 150.0, 0.1, 1),
    FieldSpec::float("fhi", "MDVP:Fhi(Hz)", 50.0, 300.0, 170.0, 0.1, 1),
    FieldSpec::float("flo", "MDVP:Flo(Hz)", 50.0, 300.0, 100.0, 0.1, 1),
    FieldSpec::float("jitter", "MDVP:Jitter(%)", 0.0, 1.0, 0.005, 0.001, 3),
    FieldSpec::float("shimmer", "MDVP:Shimmer", 0.0, 1.0, 0.02, 0.001, 3),
    FieldSpec::float("nhr", "NHR", 0.0, 1.0, 0.01, 0.001, 3),
    FieldSpec::float("hnr", "HNR", 0.0, 40.0, 20.0, 0.1, 1),
    FieldSpec::float("rpde", "RPDE", 0.0, 1.0, 0.5, 0.001, 3),
    FieldSpec::float("dfa", "DFA", 0.0, 1.0, 0.7, 0.001, 3),
    FieldSpec::float("spread1", "spread1", -10.0, 0.0, -5.0, 0.1, 1),
    FieldSpec::float("spread2", "spread2", 0.0, 1.0, 0.2, 0.01, 2),
    FieldSpec::float("d2", "D2", 0.0, 10.0, 2.0, 0.1, 1),
    FieldSpec::float("ppe", "PPE", 0.0, 1.0, 0.2, 0.01, 2),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ParkinsonsInput {
    pub fo_hz: f64,
    pub fhi_hz: f64,
    pub flo_hz: f64,
    pub jitter_pct: f64,
    pub shimmer: f64,
    pub nhr: f64,
    pub hnr: f64,
    pub rpde: f64,
    pub dfa: f64,
    pub spread1: f64,
    pub spread2: f64,
    pub d2: f64,
    pub ppe: f64,
}

impl Default for ParkinsonsInput {
    fn default() -> Self {
        Self {
            fo_hz: 150.0,
            fhi_hz: 170.0,
            flo_hz: 100.0,
            jitter_pct: 0.005,
            shimmer: 0.02,
            nhr: 0.01,
            hnr: 20.0,
            rpde: 0.5,
            dfa: 0.7,
            spread1: -5.0,
            spread2: 0.2,
            d2: 2.0,
            ppe: 0.2,
        }
    }
}

impl ParkinsonsInput {
    pub fn from_values(values: &FormValues) -> Result<Self, FieldError> {
        Ok(Self {
            fo_hz: values.float(0)?,
            fhi_hz: values.float(1)?,
            flo_hz: values.float(2)?,
            jitter_pct: values.float(3)?,
            shimmer: values.float(4)?,
            nhr: values.float(5)?,
            hnr: values.float(6)?,
            rpde: values.float(7)?,
            dfa: values.float(8)?,
            spread1: values.float(9)?,
            spread2: values.float(10)?,
            d2: values.float(11)?,
            ppe: values.float(12)?,
        })
    }

    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            self.fo_hz,
            self.fhi_hz,
            self.flo_hz,
            self.jitter_pct,
            self.shimmer,
            self.nhr,
            self.hnr,
            self.rpde,
            self.dfa,
            self.spread1,
            self.spread2,
            self.d2,
            self.ppe,
        ]
    }
}

//! Diabetes form (Pima-style columns).

use crate::error::FieldError;
use crate::features::{FieldSpec, FormValues};

pub const FIELDS: [FieldSpec; 8] = [
    FieldSpec::int("pregnancies", "Pregnancies", 0, 20, 0),
    FieldSpec::int("glucose", "Glucose", 0, 200, 100),
    FieldSpec::int("blood_pressure", "Blood Pressure", 0, 150, 70),
    FieldSpec::int("skin_thickness", "Skin Thickness", 0, 100, 20),
    FieldSpec::int("insulin", "Insulin", 0, 1000, 80),
    FieldSpec::float("bmi", "BMI", 0.0, 70.0, 25.0, 0.1, 1),
    FieldSpec::float("pedigree", "Pedigree Function", 0.0, 3.0, 0.5, 0.01, 2),
    FieldSpec::int("age", "Age", 1, 120, 30),
];

#[derive(Debug, Clone, PartialEq)]
pub struct DiabetesInput {
    pub pregnancies: u32,
    pub glucose: u32,
    pub blood_pressure: u32,
    pub skin_thickness: u32,
    pub insulin: u32,
    pub bmi: f64,
    pub pedigree: f64,
    pub age: u32,
}

impl Default for DiabetesInput {
    fn default() -> Self {
        Self {
            pregnancies: 0,
            glucose: 100,
            blood_pressure: 70,
            skin_thickness: 20,
            insulin: 80,
            bmi: 25.0,
            pedigree: 0.5,
            age: 30,
        }
    }
}

impl DiabetesInput {
    pub fn from_values(values: &FormValues) -> Result<Self, FieldError> {
        Ok(Self {
            pregnancies: values.uint(0)?,
            glucose: values.uint(1)?,
            blood_pressure: values.uint(2)?,
            skin_thickness: values.uint(3)?,
            insulin: values.uint(4)?,
            bmi: values.float(5)?,
            pedigree: values.float(6)?,
            age: values.uint(7)?,
        })
    }

    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            f64::from(self.pregnancies),
            f64::from(self.glucose),
            f64::from(self.blood_pressure),
            f64::from(self.skin_thickness),
            f64::from(self.insulin),
            self.bmi,
            self.pedigree,
            f64::from(self.age),
        ]
    }
}

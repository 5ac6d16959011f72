//! Heart disease form (Cleveland-style columns).

use crate::error::FieldError;
use crate::features::{FieldSpec, FormValues};

pub const FIELDS: [FieldSpec; 13] = [
    FieldSpec::int("age", "Age", 1, 120, 50),
    FieldSpec::choice("sex", "Sex", &["Male", "Female"]),
    FieldSpec::int("cp", "Chest Pain type (0-3)", 0, 3, 0),
    FieldSpec::int("trestbps", "Resting BP", 50, 250, 120),
    FieldSpec::int("chol", "Cholesterol", 100, 600, 200),
    FieldSpec::int("fbs", "FBS > 120", 0, 1, 0),
    FieldSpec::int("restecg", "Rest ECG", 0, 2, 0),
    FieldSpec::int("thalach", "Max Heart Rate", 50, 220, 150),
    FieldSpec::int("exang", "Exercise Angina", 0, 1, 0),
    FieldSpec::float("oldpeak", "Oldpeak", 0.0, 10.0, 1.0, 0.1, 1),
    FieldSpec::int("slope", "Slope", 0, 2, 1),
    FieldSpec::int("ca", "Vessels", 0, 4, 0),
    FieldSpec::int("thal", "Thal", 0, 3, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    fn from_choice(index: usize) -> Self {
        if index == 0 { Sex::Male } else { Sex::Female }
    }

    pub fn encode(self) -> f64 {
        match self {
            Sex::Male => 1.0,
            Sex::Female => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeartInput {
    pub age: u32,
    pub sex: Sex,
    pub chest_pain: u32,
    pub resting_bp: u32,
    pub cholesterol: u32,
    pub fasting_sugar_high: u32,
    pub rest_ecg: u32,
    pub max_heart_rate: u32,
    pub exercise_angina: u32,
    pub oldpeak: f64,
    pub slope: u32,
    pub vessels: u32,
    pub thal: u32,
}

impl Default for HeartInput {
    fn default() -> Self {
        Self {
            age: 50,
            sex: Sex::Male,
            chest_pain: 0,
            resting_bp: 120,
            cholesterol: 200,
            fasting_sugar_high: 0,
            rest_ecg: 0,
            max_heart_rate: 150,
            exercise_angina: 0,
            oldpeak: 1.0,
            slope: 1,
            vessels: 0,
            thal: 1,
        }
    }
}

impl HeartInput {
    pub fn from_values(values: &FormValues) -> Result<Self, FieldError> {
        Ok(Self {
            age: values.uint(0)?,
            sex: Sex::from_choice(values.choice(1)?),
            chest_pain: values.uint(2)?,
            resting_bp: values.uint(3)?,
            cholesterol: values.uint(4)?,
            fasting_sugar_high: values.uint(5)?,
            rest_ecg: values.uint(6)?,
            max_heart_rate: values.uint(7)?,
            exercise_angina: values.uint(8)?,
            oldpeak: values.float(9)?,
            slope: values.uint(10)?,
            vessels: values.uint(11)?,
            thal: values.uint(12)?,
        })
    }

    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            f64::from(self.age),
            self.sex.encode(),
            f64::from(self.chest_pain),
            f64::from(self.resting_bp),
            f64::from(self.cholesterol),
            f64::from(self.fasting_sugar_high),
            f64::from(self.rest_ecg),
            f64::from(self.max_heart_rate),
            f64::from(self.exercise_angina),
            self.oldpeak,
            f64::from(self.slope),
            f64::from(self.vessels),
            f64::from(self.thal),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;

    #[test]
    fn default_form_is_default_input() {
        let input = HeartInput::from_values(&FormValues::defaults(Domain::Heart)).unwrap();
        assert_eq!(input, HeartInput::default());
        assert_eq!(
            input.to_vector(),
            vec![50.0, 1.0, 0.0, 120.0, 200.0, 0.0, 0.0, 150.0, 0.0, 1.0, 1.0, 0.0, 1.0]
        );
    }

    #[test]
    fn female_encodes_as_zero_in_second_column() {
        let mut values = FormValues::defaults(Domain::Heart);
        values.apply_assignment("sex=Female").unwrap();
        let v = HeartInput::from_values(&values).unwrap().to_vector();
        assert_eq!(v[1], 0.0);
    }
}

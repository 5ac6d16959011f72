//! Autism screening form.

use crate::error::FieldError;
use crate::features::{FieldSpec, FormValues};

pub const FIELDS: [FieldSpec; 5] = [
    FieldSpec::int("age", "Age", 1, 100, 18),
    FieldSpec::choice("gender", "Gender", &["Male", "Female", "Other"]),
    FieldSpec::int("q1", "Q1: Difficulty with social situations", 0, 1, 0),
    FieldSpec::int("q2", "Q2: Fixation on routines", 0, 1, 0),
    FieldSpec::int("q3", "Q3: Sensory sensitivity", 0, 1, 0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    fn from_choice(index: usize) -> Self {
        match index {
            0 => Gender::Male,
            1 => Gender::Female,
            _ => Gender::Other,
        }
    }

    /// The model only distinguishes male from everything else.
    pub fn encode(self) -> f64 {
        match self {
            Gender::Male => 1.0,
            Gender::Female | Gender::Other => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutismInput {
    pub age: u32,
    pub gender: Gender,
    pub social_difficulty: u32,
    pub routine_fixation: u32,
    pub sensory_sensitivity: u32,
}

impl Default for AutismInput {
    fn default() -> Self {
        Self {
            age: 18,
            gender: Gender::Male,
            social_difficulty: 0,
            routine_fixation: 0,
            sensory_sensitivity: 0,
        }
    }
}

impl AutismInput {
    pub fn from_values(values: &FormValues) -> Result<Self, FieldError> {
        Ok(Self {
            age: values.uint(0)?,
            gender: Gender::from_choice(values.choice(1)?),
            social_difficulty: values.uint(2)?,
            routine_fixation: values.uint(3)?,
            sensory_sensitivity: values.uint(4)?,
        })
    }

    /// `[age, gender, q1, q2, q3]`
    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            f64::from(self.age),
            self.gender.encode(),
            f64::from(self.social_difficulty),
            f64::from(self.routine_fixation),
            f64::from(self.sensory_sensitivity),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;

    #[test]
    fn default_form_is_default_input() {
        let input = AutismInput::from_values(&FormValues::defaults(Domain::Autism)).unwrap();
        assert_eq!(input, AutismInput::default());
    }

    #[test]
    fn eighteen_year_old_male_with_no_flags() {
        let mut values = FormValues::defaults(Domain::Autism);
        values.apply_assignment("age=18").unwrap();
        values.apply_assignment("gender=Male").unwrap();
        let v = AutismInput::from_values(&values).unwrap().to_vector();
        assert_eq!(v, vec![18.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn only_male_encodes_as_one() {
        assert_eq!(Gender::Male.encode(), 1.0);
        assert_eq!(Gender::Female.encode(), 0.0);
        assert_eq!(Gender::Other.encode(), 0.0);
    }

    #[test]
    fn slider_answers_keep_their_positions() {
        let mut values = FormValues::defaults(Domain::Autism);
        values.apply_assignment("q2=1").unwrap();
        values.apply_assignment("gender=other").unwrap();
        let v = AutismInput::from_values(&values).unwrap().to_vector();
        assert_eq!(v, vec![18.0, 0.0, 0.0, 1.0, 0.0]);
    }
}

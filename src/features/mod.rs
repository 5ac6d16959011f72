//! Feature mapping: form widgets → typed inputs → model feature vectors.
//!
//! Each domain declares an ordered field table (`FIELDS`) and a typed input
//! struct with an explicit `to_vector()`. The field order of a table is the
//! column order the matching model was trained on and must not be reshuffled.
//!
//! Widget values are always clamped to the declared range, so a `FormValues`
//! can never hold an out-of-range number.

use crate::domain::Domain;
use crate::error::FieldError;

pub mod autism;
pub mod diabetes;
pub mod heart;
pub mod parkinsons;

pub use autism::{AutismInput, Gender};
pub use diabetes::DiabetesInput;
pub use heart::{HeartInput, Sex};
pub use parkinsons::ParkinsonsInput;

/// Widget kind plus its constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Int {
        min: i64,
        max: i64,
        default: i64,
    },
    Float {
        min: f64,
        max: f64,
        default: f64,
        step: f64,
        decimals: usize,
    },
    Choice {
        options: &'static [&'static str],
        default: usize,
    },
}

/// One entry of a domain's ordered field table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Key accepted by `hg predict --set key=value`.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

/// A widget value. Which variant is valid depends on the field's kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    /// Index into the field's option list.
    Choice(usize),
}

impl FieldSpec {
    pub const fn int(key: &'static str, label: &'static str, min: i64, max: i64, default: i64) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Int { min, max, default },
        }
    }

    pub const fn float(
        key: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        default: f64,
        step: f64,
        decimals: usize,
    ) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Float {
                min,
                max,
                default,
                step,
                decimals,
            },
        }
    }

    pub const fn choice(key: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Choice { options, default: 0 },
        }
    }

    pub fn default_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Int { default, .. } => FieldValue::Int(default),
            FieldKind::Float { default, .. } => FieldValue::Float(default),
            FieldKind::Choice { default, .. } => FieldValue::Choice(default),
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice { .. })
    }

    /// Clamp a value into this field's range. A value of the wrong kind falls
    /// back to the field default.
    pub fn clamp(&self, value: FieldValue) -> FieldValue {
        match (self.kind, value) {
            (FieldKind::Int { min, max, .. }, FieldValue::Int(v)) => FieldValue::Int(v.clamp(min, max)),
            (FieldKind::Float { min, max, .. }, FieldValue::Float(v)) if v.is_finite() => {
                FieldValue::Float(v.clamp(min, max))
            }
            (FieldKind::Choice { options, .. }, FieldValue::Choice(i)) if i < options.len() => {
                FieldValue::Choice(i)
            }
            _ => self.default_value(),
        }
    }

    /// Move a value by `delta` widget steps. Choices wrap around; numbers clamp.
    pub fn step(&self, value: FieldValue, delta: i32) -> FieldValue {
        match (self.kind, self.clamp(value)) {
            (FieldKind::Int { .. }, FieldValue::Int(v)) => self.clamp(FieldValue::Int(v + i64::from(delta))),
            (FieldKind::Float { step, decimals, .. }, FieldValue::Float(v)) => {
                let moved = round_to(v + f64::from(delta) * step, decimals);
                self.clamp(FieldValue::Float(moved))
            }
            (FieldKind::Choice { options, .. }, FieldValue::Choice(i)) => {
                let n = options.len() as i64;
                FieldValue::Choice((i as i64 + i64::from(delta)).rem_euclid(n) as usize)
            }
            (_, other) => other,
        }
    }

    /// Parse typed input. Numbers are clamped like the widget would; choices
    /// match option names case-insensitively.
    pub fn parse(&self, raw: &str) -> Result<FieldValue, FieldError> {
        let trimmed = raw.trim();
        match self.kind {
            FieldKind::Int { .. } => trimmed
                .parse::<i64>()
                .map(|v| self.clamp(FieldValue::Int(v)))
                .map_err(|_| FieldError::BadNumber {
                    field: self.label,
                    raw: trimmed.to_string(),
                }),
            FieldKind::Float { .. } => match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(self.clamp(FieldValue::Float(v))),
                _ => Err(FieldError::BadNumber {
                    field: self.label,
                    raw: trimmed.to_string(),
                }),
            },
            FieldKind::Choice { options, .. } => options
                .iter()
                .position(|o| o.eq_ignore_ascii_case(trimmed))
                .map(FieldValue::Choice)
                .ok_or_else(|| FieldError::BadChoice {
                    field: self.label,
                    raw: trimmed.to_string(),
                    options: options.join(", "),
                }),
        }
    }

    pub fn display(&self, value: FieldValue) -> String {
        match (self.kind, self.clamp(value)) {
            (FieldKind::Float { decimals, .. }, FieldValue::Float(v)) => format!("{v:.decimals$}"),
            (FieldKind::Choice { options, .. }, FieldValue::Choice(i)) => options[i].to_string(),
            (_, FieldValue::Int(v)) => v.to_string(),
            (_, other) => format!("{other:?}"),
        }
    }

    /// Human-readable constraint, e.g. `0..=200` or `Male | Female`.
    pub fn range_hint(&self) -> String {
        match self.kind {
            FieldKind::Int { min, max, .. } => format!("{min}..={max}"),
            FieldKind::Float { min, max, decimals, .. } => format!("{min:.decimals$}..={max:.decimals$}"),
            FieldKind::Choice { options, .. } => options.join(" | "),
        }
    }
}

fn round_to(v: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (v * scale).round() / scale
}

impl Domain {
    /// The ordered field table for this domain's form.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Domain::Autism => &autism::FIELDS,
            Domain::Diabetes => &diabetes::FIELDS,
            Domain::Heart => &heart::FIELDS,
            Domain::Parkinsons => &parkinsons::FIELDS,
        }
    }

    /// Feature vector length the domain's model expects.
    pub fn feature_count(self) -> usize {
        self.fields().len()
    }
}

/// Current widget values of one domain form, in field-table order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    domain: Domain,
    values: Vec<FieldValue>,
}

impl FormValues {
    /// Every field at its stated default.
    pub fn defaults(domain: Domain) -> Self {
        Self {
            domain,
            values: domain.fields().iter().map(FieldSpec::default_value).collect(),
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn specs(&self) -> &'static [FieldSpec] {
        self.domain.fields()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<FieldValue> {
        self.values.get(index).copied()
    }

    /// Set a field, clamping into range.
    pub fn set(&mut self, index: usize, value: FieldValue) {
        if let (Some(spec), Some(slot)) = (self.domain.fields().get(index), self.values.get_mut(index)) {
            *slot = spec.clamp(value);
        }
    }

    pub fn step(&mut self, index: usize, delta: i32) {
        if let (Some(spec), Some(slot)) = (self.domain.fields().get(index), self.values.get_mut(index)) {
            *slot = spec.step(*slot, delta);
        }
    }

    pub fn set_text(&mut self, index: usize, raw: &str) -> Result<(), FieldError> {
        let Some(spec) = self.domain.fields().get(index) else {
            return Ok(());
        };
        let value = spec.parse(raw)?;
        self.values[index] = value;
        Ok(())
    }

    /// Apply `key=value` (command-line form).
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), FieldError> {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| FieldError::BadAssignment(assignment.to_string()))?;
        let key = key.trim();
        let index = self
            .domain
            .fields()
            .iter()
            .position(|f| f.key.eq_ignore_ascii_case(key))
            .ok_or_else(|| FieldError::UnknownField {
                domain: self.domain.key(),
                key: key.to_string(),
            })?;
        self.set_text(index, raw)
    }

    pub fn display(&self, index: usize) -> String {
        match (self.domain.fields().get(index), self.get(index)) {
            (Some(spec), Some(value)) => spec.display(value),
            _ => String::new(),
        }
    }

    pub(crate) fn int(&self, index: usize) -> Result<i64, FieldError> {
        match self.get(index) {
            Some(FieldValue::Int(v)) => Ok(v),
            _ => Err(self.mismatch(index)),
        }
    }

    pub(crate) fn uint(&self, index: usize) -> Result<u32, FieldError> {
        let v = self.int(index)?;
        u32::try_from(v).map_err(|_| self.mismatch(index))
    }

    pub(crate) fn float(&self, index: usize) -> Result<f64, FieldError> {
        match self.get(index) {
            Some(FieldValue::Float(v)) => Ok(v),
            _ => Err(self.mismatch(index)),
        }
    }

    pub(crate) fn choice(&self, index: usize) -> Result<usize, FieldError> {
        match self.get(index) {
            Some(FieldValue::Choice(i)) => Ok(i),
            _ => Err(self.mismatch(index)),
        }
    }

    fn mismatch(&self, index: usize) -> FieldError {
        FieldError::TypeMismatch {
            field: self.domain.fields().get(index).map(|f| f.label).unwrap_or("?"),
        }
    }
}

/// A typed submission for any domain.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainInput {
    Autism(AutismInput),
    Diabetes(DiabetesInput),
    Heart(HeartInput),
    Parkinsons(ParkinsonsInput),
}

impl DomainInput {
    /// Collect every field of a form at once.
    pub fn from_values(values: &FormValues) -> Result<Self, FieldError> {
        Ok(match values.domain() {
            Domain::Autism => DomainInput::Autism(AutismInput::from_values(values)?),
            Domain::Diabetes => DomainInput::Diabetes(DiabetesInput::from_values(values)?),
            Domain::Heart => DomainInput::Heart(HeartInput::from_values(values)?),
            Domain::Parkinsons => DomainInput::Parkinsons(ParkinsonsInput::from_values(values)?),
        })
    }

    pub fn domain(&self) -> Domain {
        match self {
            DomainInput::Autism(_) => Domain::Autism,
            DomainInput::Diabetes(_) => Domain::Diabetes,
            DomainInput::Heart(_) => Domain::Heart,
            DomainInput::Parkinsons(_) => Domain::Parkinsons,
        }
    }

    pub fn to_vector(&self) -> Vec<f64> {
        match self {
            DomainInput::Autism(i) => i.to_vector(),
            DomainInput::Diabetes(i) => i.to_vector(),
            DomainInput::Heart(i) => i.to_vector(),
            DomainInput::Parkinsons(i) => i.to_vector(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_map_to_vectors_of_the_declared_length() {
        for domain in Domain::ALL {
            let input = DomainInput::from_values(&FormValues::defaults(domain)).unwrap();
            assert_eq!(input.domain(), domain);
            assert_eq!(input.to_vector().len(), domain.feature_count(), "{domain}");
        }
    }

    #[test]
    fn every_field_extreme_still_maps_to_full_length() {
        for domain in Domain::ALL {
            for delta in [-100_000, 100_000] {
                let mut values = FormValues::defaults(domain);
                for i in 0..values.len() {
                    values.step(i, delta);
                }
                let v = DomainInput::from_values(&values).unwrap().to_vector();
                assert_eq!(v.len(), domain.feature_count());
                assert!(v.iter().all(|x| x.is_finite()));
            }
        }
    }

    #[test]
    fn int_fields_clamp_when_stepped_past_the_range() {
        let mut values = FormValues::defaults(Domain::Diabetes);
        values.step(1, 500); // glucose 0..=200
        assert_eq!(values.get(1), Some(FieldValue::Int(200)));
        values.step(1, -1000);
        assert_eq!(values.get(1), Some(FieldValue::Int(0)));
    }

    #[test]
    fn float_steps_do_not_accumulate_rounding_noise() {
        let mut values = FormValues::defaults(Domain::Diabetes);
        for _ in 0..3 {
            values.step(5, 1); // bmi step 0.1
        }
        assert_eq!(values.get(5), Some(FieldValue::Float(25.3)));
        assert_eq!(values.display(5), "25.3");
    }

    #[test]
    fn choices_wrap_around() {
        let mut values = FormValues::defaults(Domain::Autism);
        values.step(1, -1);
        assert_eq!(values.display(1), "Other");
        values.step(1, 1);
        assert_eq!(values.display(1), "Male");
    }

    #[test]
    fn typed_numbers_are_clamped_not_rejected() {
        let mut values = FormValues::defaults(Domain::Heart);
        values.apply_assignment("chol=9999").unwrap();
        assert_eq!(values.display(4), "600");
        values.apply_assignment("oldpeak=-3").unwrap();
        assert_eq!(values.display(9), "0.0");
    }

    #[test]
    fn bad_assignments_are_reported() {
        let mut values = FormValues::defaults(Domain::Diabetes);
        assert!(matches!(
            values.apply_assignment("glucose"),
            Err(FieldError::BadAssignment(_))
        ));
        assert!(matches!(
            values.apply_assignment("sugar=10"),
            Err(FieldError::UnknownField { .. })
        ));
        assert!(matches!(
            values.apply_assignment("glucose=lots"),
            Err(FieldError::BadNumber { .. })
        ));
        assert!(matches!(
            values.apply_assignment("bmi=NaN"),
            Err(FieldError::BadNumber { .. })
        ));
    }

    #[test]
    fn choice_parsing_is_case_insensitive() {
        let mut values = FormValues::defaults(Domain::Heart);
        values.apply_assignment("sex=female").unwrap();
        assert_eq!(values.display(1), "Female");
        assert!(matches!(
            values.apply_assignment("sex=other"),
            Err(FieldError::BadChoice { .. })
        ));
    }

    #[test]
    fn wrong_value_kind_reads_as_mismatch() {
        let mut values = FormValues::defaults(Domain::Autism);
        values.values[0] = FieldValue::Float(3.0);
        assert!(matches!(
            DomainInput::from_values(&values),
            Err(FieldError::TypeMismatch { field: "Age" })
        ));
    }

    #[test]
    fn field_keys_are_unique_per_domain() {
        for domain in Domain::ALL {
            let fields = domain.fields();
            for (i, a) in fields.iter().enumerate() {
                for b in &fields[i + 1..] {
                    assert_ne!(a.key, b.key, "{domain}");
                }
            }
        }
    }
}

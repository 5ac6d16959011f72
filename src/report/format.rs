//! Plain-text output for the CLI commands.
//!
//! We keep formatting code in one place so:
//! - the mapping/prediction code stays free of presentation
//! - output changes are localized

use crate::app::pipeline::PredictionRun;
use crate::domain::Domain;
use crate::features::FormValues;
use crate::models::LoadStatus;

/// Field table for `hg fields <domain>`.
pub fn format_field_table(domain: Domain) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} ({} features) ===\n", domain.heading(), domain.feature_count()));
    out.push_str(
        format!(
            "{:<3} {:<16} {:<38} {:<24} {:<10}\n",
            "#", "key", "label", "range", "default"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<3} {:-<16} {:-<38} {:-<24} {:-<10}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    for (i, spec) in domain.fields().iter().enumerate() {
        out.push_str(
            format!(
                "{:<3} {:<16} {:<38} {:<24} {:<10}\n",
                i,
                spec.key,
                truncate(spec.label, 38),
                truncate(&spec.range_hint(), 24),
                spec.display(spec.default_value()),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Inputs, vector and result message of one `hg predict` run.
pub fn format_prediction(values: &FormValues, run: &PredictionRun) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", run.domain().heading()));
    for (i, spec) in values.specs().iter().enumerate() {
        out.push_str(&format!("{:<38} {:>10}\n", truncate(spec.label, 38), values.display(i)));
    }
    out.push_str(&format!("\nfeatures: {}\n", fmt_vec(&run.vector)));
    out.push_str(&format!("label: {}\n", run.label.class()));
    out.push_str(run.message());
    out.push('\n');
    out
}

/// Registry status for `hg models` and the welcome page.
pub fn format_registry_report(report: &[LoadStatus]) -> String {
    let mut out = String::new();
    for status in report {
        match &status.state {
            Ok(summary) => out.push_str(&format!(
                "ok      {:<14} {} ({} features) <- {}\n",
                status.domain.display_name(),
                summary.family,
                summary.n_features,
                status.source
            )),
            Err(reason) => out.push_str(&format!(
                "FAILED  {:<14} {reason}\n",
                status.domain.display_name()
            )),
        }
    }
    out
}

/// `[18, 1, 0, 0, 0]`
pub fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x}")).collect();
    format!("[{}]", parts.join(", "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Label;
    use crate::features::DomainInput;
    use crate::models::ModelSummary;

    #[test]
    fn vectors_print_without_trailing_zeros() {
        assert_eq!(fmt_vec(&[18.0, 1.0, 0.0, 0.0, 0.0]), "[18, 1, 0, 0, 0]");
        assert_eq!(fmt_vec(&[0.627, -5.0]), "[0.627, -5]");
    }

    #[test]
    fn field_table_lists_every_field_with_defaults() {
        let table = format_field_table(Domain::Diabetes);
        assert!(table.starts_with("=== Diabetes Prediction (8 features) ==="));
        assert!(table.contains("glucose"));
        assert!(table.contains("0.0..=70.0"));
        // header + rule + 8 rows
        assert_eq!(table.lines().count(), 11);
    }

    #[test]
    fn prediction_report_ends_with_the_message() {
        let values = FormValues::defaults(Domain::Autism);
        let input = DomainInput::from_values(&values).unwrap();
        let run = PredictionRun {
            vector: input.to_vector(),
            input,
            label: Label::Positive,
        };
        let text = format_prediction(&values, &run);
        assert!(text.contains("features: [18, 1, 0, 0, 0]"));
        assert!(text.trim_end().ends_with("Result: Autistic - Please consult a specialist"));
    }

    #[test]
    fn registry_report_marks_failures() {
        let report = vec![
            LoadStatus {
                domain: Domain::Autism,
                source: "m/autism.json".into(),
                state: Ok(ModelSummary {
                    family: "tree".into(),
                    n_features: 5,
                }),
            },
            LoadStatus {
                domain: Domain::Heart,
                source: "m/heart.json".into(),
                state: Err("cannot read".into()),
            },
        ];
        let text = format_registry_report(&report);
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("ok      Autism"));
        assert!(lines[0].ends_with("tree (5 features) <- m/autism.json"));
        assert!(lines[1].starts_with("FAILED  Heart Disease"));
    }

    #[test]
    fn long_labels_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}

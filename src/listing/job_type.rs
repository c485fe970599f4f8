use crate::listing::JobType;
use serde_json::Value;

/// Normalized spelling → job type
const SYNONYMS: &[(&str, JobType)] = &[
    ("full_time", JobType::FullTime),
    ("fulltime", JobType::FullTime),
    ("full-time", JobType::FullTime),
    ("part_time", JobType::PartTime),
    ("parttime", JobType::PartTime),
    ("part-time", JobType::PartTime),
    ("contract", JobType::Contract),
    ("contractor", JobType::Contract),
    ("internship", JobType::Internship),
    ("intern", JobType::Internship),
    ("temporary", JobType::Temporary),
    ("temp", JobType::Temporary),
    ("cofounder", JobType::Other),
    ("co-founder", JobType::Other),
];

/// Maps one raw job type string onto a [`JobType`]
///
/// The text is lowercased and runs of whitespace become underscores before
/// lookup. Unrecognised strings yield `None`.
pub fn parse_job_type(text: &str) -> Option<JobType> {
    let normalized = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();

    SYNONYMS
        .iter()
        .find(|(spelling, _)| *spelling == normalized)
        .map(|(_, job_type)| *job_type)
}

/// Parses the job type field of a listing node
///
/// Accepts a single string or a list of strings; unknown entries are
/// dropped and duplicates collapsed, preserving order.
pub fn parse_job_types(value: &Value) -> Vec<JobType> {
    let raw: Vec<&str> = match value {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };

    let mut types = Vec::new();
    for job_type in raw.into_iter().filter_map(parse_job_type) {
        if !types.contains(&job_type) {
            types.push(job_type);
        }
    }
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spellings_normalize_together() {
        assert_eq!(parse_job_type("Full-Time"), Some(JobType::FullTime));
        assert_eq!(parse_job_type("full_time"), Some(JobType::FullTime));
        assert_eq!(parse_job_type("full-time"), Some(JobType::FullTime));
        assert_eq!(parse_job_type("Full Time"), Some(JobType::FullTime));
        assert_eq!(parse_job_type("  FULLTIME "), Some(JobType::FullTime));
    }

    #[test]
    fn test_other_types() {
        assert_eq!(parse_job_type("Part time"), Some(JobType::PartTime));
        assert_eq!(parse_job_type("Contractor"), Some(JobType::Contract));
        assert_eq!(parse_job_type("intern"), Some(JobType::Internship));
        assert_eq!(parse_job_type("Co-Founder"), Some(JobType::Other));
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(parse_job_type("volunteer"), None);
        assert_eq!(parse_job_type(""), None);
    }

    #[test]
    fn test_value_list() {
        let value = json!(["full_time", "Contract", "mystery", "Full-Time"]);
        assert_eq!(
            parse_job_types(&value),
            vec![JobType::FullTime, JobType::Contract]
        );
        assert!(parse_job_types(&json!(null)).is_empty());
    }
}

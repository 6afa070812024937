use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// Heuristic semantic classification
// ============================================================================

/// Coarse semantic category guiding the remote assignment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Semantic {
    Email,
    Phone,
    Password,
    FirstName,
    LastName,
    Address,
    City,
    State,
    Zip,
    Unknown,
}

/// Ordered whole-word rules, first match wins. The order is part of the
/// contract: "email address" classifies as email, "business address" as
/// address, on every run.
static RULES: Lazy<Vec<(Semantic, Regex)>> = Lazy::new(|| {
    vec![
        (Semantic::Email, Regex::new(r"\be ?mail\b").unwrap()),
        (Semantic::Phone, Regex::new(r"\b(phone|mobile|tel)\b").unwrap()),
        (Semantic::Password, Regex::new(r"\bpass ?word\b").unwrap()),
        (
            Semantic::FirstName,
            Regex::new(r"\b(first ?name|given ?name|first)\b").unwrap(),
        ),
        (
            Semantic::LastName,
            Regex::new(r"\b(last ?name|family ?name|last)\b").unwrap(),
        ),
        (Semantic::Address, Regex::new(r"\b(address|street)\b").unwrap()),
        (Semantic::City, Regex::new(r"\bcity\b").unwrap()),
        (Semantic::State, Regex::new(r"\bstate\b").unwrap()),
        (Semantic::Zip, Regex::new(r"\b(zip|postal)\b").unwrap()),
    ]
});

/// Classify a field from its textual metadata. All non-absent sources are
/// concatenated, lowercased, and reduced to `[a-z0-9 ]` before matching.
pub fn classify(
    name: Option<&str>,
    id: Option<&str>,
    placeholder: Option<&str>,
    labels: &[String],
) -> Semantic {
    let text = normalize_sources(name, id, placeholder, labels);
    if text.is_empty() {
        return Semantic::Unknown;
    }
    for (semantic, rule) in RULES.iter() {
        if rule.is_match(&text) {
            return *semantic;
        }
    }
    Semantic::Unknown
}

/// Separator punctuation becomes a space so `phone_number` still contains
/// the word `phone`; the email rule's optional space keeps `e-mail`
/// matching after the dash is replaced.
fn normalize_sources(
    name: Option<&str>,
    id: Option<&str>,
    placeholder: Option<&str>,
    labels: &[String],
) -> String {
    let mut joined = String::new();
    let mut push = |part: &str| {
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(part);
    };
    if let Some(name) = name {
        push(name);
    }
    if let Some(id) = id {
        push(id);
    }
    if let Some(placeholder) = placeholder {
        push(placeholder);
    }
    for label in labels {
        push(label);
    }

    let lowered = joined.to_lowercase();
    let mapped: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ' {
                c
            } else {
                ' '
            }
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

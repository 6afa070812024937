use formfill::semantic::classifier::{Semantic, classify};

fn classify_text(name: Option<&str>, placeholder: Option<&str>, labels: &[&str]) -> Semantic {
    let labels: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
    classify(name, None, placeholder, &labels)
}

// =========================================================================
// Rule table
// =========================================================================

#[test]
fn classifies_email_variants() {
    assert_eq!(classify_text(None, Some("Enter your e-mail"), &[]), Semantic::Email);
    assert_eq!(classify_text(Some("email"), None, &[]), Semantic::Email);
    assert_eq!(classify_text(None, None, &["Email Address"]), Semantic::Email);
}

#[test]
fn classifies_phone_variants() {
    assert_eq!(classify_text(Some("phone_number"), None, &[]), Semantic::Phone);
    assert_eq!(classify_text(None, None, &["Mobile"]), Semantic::Phone);
    assert_eq!(classify_text(Some("tel"), None, &[]), Semantic::Phone);
}

#[test]
fn classifies_name_parts() {
    assert_eq!(classify_text(None, None, &["First Name"]), Semantic::FirstName);
    assert_eq!(classify_text(Some("firstname"), None, &[]), Semantic::FirstName);
    assert_eq!(classify_text(None, None, &["Given name"]), Semantic::FirstName);
    assert_eq!(classify_text(None, None, &["Last Name"]), Semantic::LastName);
    assert_eq!(classify_text(Some("family_name"), None, &[]), Semantic::LastName);
}

#[test]
fn classifies_location_fields() {
    assert_eq!(
        classify_text(Some("street1"), None, &["Street Address"]),
        Semantic::Address
    );
    assert_eq!(classify_text(None, None, &["City"]), Semantic::City);
    assert_eq!(classify_text(Some("state"), None, &[]), Semantic::State);
    assert_eq!(classify_text(Some("zip_code"), None, &[]), Semantic::Zip);
    assert_eq!(classify_text(None, None, &["Postal code"]), Semantic::Zip);
}

#[test]
fn classifies_password() {
    assert_eq!(classify_text(Some("password"), None, &[]), Semantic::Password);
}

#[test]
fn unmatched_text_is_unknown() {
    assert_eq!(classify_text(Some("foo"), None, &[]), Semantic::Unknown);
    assert_eq!(classify_text(None, None, &[]), Semantic::Unknown);
}

// =========================================================================
// Rule order determinism
// =========================================================================

#[test]
fn earlier_rules_win_on_ambiguous_text() {
    // "email address" carries both an email and an address word; the email
    // rule comes first.
    assert_eq!(classify_text(None, None, &["Email address"]), Semantic::Email);
    // "business address" matches nothing before the address rule.
    assert_eq!(
        classify_text(None, None, &["Business address"]),
        Semantic::Address
    );
}

#[test]
fn all_metadata_sources_feed_the_classifier() {
    // Only the id carries signal here.
    let labels: Vec<String> = Vec::new();
    assert_eq!(
        classify(None, Some("contact-email-input"), None, &labels),
        Semantic::Email
    );
}

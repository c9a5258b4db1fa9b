use super::*;

#[test]
fn validate_register_form_trims_and_builds_request() {
    assert_eq!(
        validate_register_form(" Ana ", " ana@example.com ", "secret1", "secret1"),
        Ok(RegisterRequest {
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            password: "secret1".to_owned(),
        })
    );
}

#[test]
fn validate_register_form_requires_matching_confirmation() {
    assert_eq!(
        validate_register_form("Ana", "ana@example.com", "secret1", "secret2"),
        Err(validation::PASSWORDS_DIFFER)
    );
}

#[test]
fn validate_register_form_reports_missing_fields_first() {
    assert_eq!(
        validate_register_form("", "ana@example.com", "", "x"),
        Err(validation::REGISTER_FIELDS_REQUIRED)
    );
}

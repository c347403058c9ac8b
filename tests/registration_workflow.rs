use guest_registration::registration::{
    requires_marriage_certificate, FieldError, FieldPath, FormAggregate, FormValidator,
    GuestField,
};

fn aggregate_json(nationality_one: &str, sex_two: &str) -> String {
    format!(
        r#"{{
            "numberOfGuests": 2,
            "guests": [
                {{"fullName": "Guest One", "sex": "female", "nationality": "{nationality_one}"}},
                {{"fullName": "Guest Two", "sex": "{sex_two}", "nationality": "American"}}
            ],
            "identification": [{{"name": "id.jpg", "sizeBytes": 1000}}],
            "termsAccepted": "accepted",
            "signature": "sig"
        }}"#
    )
}

fn load(nationality_one: &str, sex_two: &str) -> FormAggregate {
    serde_json::from_str(&aggregate_json(nationality_one, sex_two)).expect("aggregate parses")
}

#[test]
fn foreign_couple_submits_without_certificate() {
    let aggregate = load("French", "male");
    let flag = requires_marriage_certificate(&aggregate.guests);

    assert!(!flag);
    let payload = FormValidator::default()
        .validate(&aggregate, flag)
        .expect("valid submission");
    assert!(payload.marriage_certificate.is_empty());
}

#[test]
fn moroccan_guest_with_foreign_man_needs_certificate() {
    let aggregate = load("Moroccan", "male");
    let flag = requires_marriage_certificate(&aggregate.guests);

    assert!(flag);
    let errors = FormValidator::default()
        .validate(&aggregate, flag)
        .expect_err("certificate missing");
    assert_eq!(errors.paths(), vec![FieldPath::MarriageCertificate]);
}

#[test]
fn two_women_do_not_need_certificate() {
    let aggregate = load("Moroccan", "female");

    assert!(!requires_marriage_certificate(&aggregate.guests));
}

#[test]
fn nested_guest_errors_are_addressed_individually() {
    let mut aggregate = load("French", "male");
    aggregate.guests[1].full_name = "X".to_string();
    aggregate.guests[0].nationality = String::new();

    let errors = FormValidator::default()
        .validate(&aggregate, false)
        .expect_err("two guest errors");

    assert_eq!(
        errors.get(&FieldPath::guest(1, GuestField::FullName)),
        Some(&FieldError::NameTooShort { min: 2 })
    );
    assert_eq!(
        errors.get(&FieldPath::guest(0, GuestField::Nationality)),
        Some(&FieldError::NationalityRequired)
    );
    assert_eq!(errors.len(), 2);
}

#[test]
fn imported_aggregate_with_missing_guests_is_rejected() {
    let aggregate: FormAggregate = serde_json::from_str(
        r#"{
            "numberOfGuests": 3,
            "guests": [
                {"fullName": "Claire Martin", "sex": "female", "nationality": "French"}
            ],
            "identification": [{"name": "id.jpg", "sizeBytes": 1000}],
            "termsAccepted": "accepted",
            "signature": "sig"
        }"#,
    )
    .expect("aggregate parses");

    let errors = FormValidator::default()
        .validate(&aggregate, false)
        .expect_err("guest list shorter than the count");

    assert_eq!(errors.paths(), vec![FieldPath::NumberOfGuests]);
    assert_eq!(
        errors.get(&FieldPath::NumberOfGuests),
        Some(&FieldError::GuestCountMismatch {
            expected: 3,
            found: 1
        })
    );
}

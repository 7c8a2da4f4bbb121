use people_core::{Person, PersonInput};

fn valid_input() -> PersonInput {
    PersonInput::new("Ivan Petrov", 30, "ivan@example.com", Some("chess"))
}

#[test]
fn valid_input_passes_validation() {
    assert!(valid_input().validate().is_ok());

    let mut without_hobby = valid_input();
    without_hobby.hobby = None;
    assert!(without_hobby.validate().is_ok());
}

#[test]
fn empty_full_name_reports_full_name_violation() {
    let mut input = valid_input();
    input.full_name = String::new();

    let err = input.validate().unwrap_err();
    assert!(err.has_field("fullName"));
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.to_string(), "fullName - Name should not be empty;");
}

#[test]
fn non_positive_age_reports_age_violation() {
    for age in [0, -1, i32::MIN] {
        let mut input = valid_input();
        input.age = age;

        let err = input.validate().unwrap_err();
        assert!(err.has_field("age"), "age {age} should be rejected");
        assert_eq!(err.to_string(), "age - Age should be greater than 0;");
    }
}

#[test]
fn invalid_email_reports_email_violation() {
    for email in ["", "ivan", "ivan@", "@example.com", "ivan @example.com"] {
        let mut input = valid_input();
        input.email = email.to_string();

        let err = input.validate().unwrap_err();
        assert!(err.has_field("email"), "email `{email}` should be rejected");
        assert!(!err.has_field("fullName"));
    }
}

#[test]
fn person_serialization_uses_camel_case_wire_fields() {
    let person = Person::from_input(7, valid_input());

    let json = serde_json::to_value(&person).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 7,
            "fullName": "Ivan Petrov",
            "age": 30,
            "email": "ivan@example.com",
            "hobby": "chess"
        })
    );
}

#[test]
fn input_deserialization_defaults_missing_fields() {
    let input: PersonInput = serde_json::from_str(r#"{"fullName":"Ivan Petrov"}"#).unwrap();

    assert_eq!(input.full_name, "Ivan Petrov");
    assert_eq!(input.age, 0);
    assert_eq!(input.email, "");
    assert_eq!(input.hobby, None);

    let err = input.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "age - Age should be greater than 0;email - Email should not be empty;"
    );
}

#[test]
fn multi_word_full_name_is_accepted() {
    for full_name in ["Ivan Petrov Ivanovich", "Maria Del Carmen", "Li Wu"] {
        let mut input = valid_input();
        input.full_name = full_name.to_string();

        assert!(input.validate().is_ok(), "`{full_name}` should be accepted");
    }
}

#[test]
fn lowercase_word_after_surname_is_rejected() {
    let mut input = valid_input();
    input.full_name = "Ivan Petrov ivanovich".to_string();

    let err = input.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "fullName - Name should be in the format: Name Surname;"
    );
}

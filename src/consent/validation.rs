//! Consent form checks.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::NaiveDate;

use super::models::{ConsentSubmission, MEDICAL_QUESTIONS};
use crate::validation::{is_valid_email, FieldErrors, REQUIRED};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Decode a `data:image/png;base64,...` signature into PNG bytes
pub fn decode_signature(data_url: &str) -> Option<Vec<u8>> {
    let encoded = data_url.trim().strip_prefix(PNG_DATA_URL_PREFIX)?;
    let bytes = BASE64.decode(encoded).ok()?;
    bytes.starts_with(PNG_MAGIC).then_some(bytes)
}

/// Every field of the form is mandatory, as on the paper declaration
pub fn validate_consent(form: &ConsentSubmission) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.parent_booking.is_nil() {
        errors.set("parentBooking", REQUIRED);
    }

    for (field, value) in form.text_fields() {
        errors.require(field, value);
    }

    if !form.dob.trim().is_empty() && NaiveDate::parse_from_str(form.dob.trim(), "%Y-%m-%d").is_err() {
        errors.set("dob", "Please enter a valid date");
    }
    if !form.parent1_email.trim().is_empty() && !is_valid_email(&form.parent1_email) {
        errors.set("parent1Email", "Please enter a valid email address");
    }

    // answers are keyed medQ1..medQ8 like the form's radio groups
    for index in 0..MEDICAL_QUESTIONS.len() {
        let field = format!("medQ{}", index + 1);
        match form.medical_answers.get(index).map(|a| a.trim().to_ascii_lowercase()) {
            None => errors.set(field, REQUIRED),
            Some(answer) if answer.is_empty() => errors.set(field, REQUIRED),
            Some(answer) if answer != "yes" && answer != "no" => errors.set(field, "Please answer yes or no"),
            Some(_) => {}
        }
    }
    if form.medical_answers.len() > MEDICAL_QUESTIONS.len() {
        errors.set(
            "medicalAnswers",
            format!("Expected {} answers", MEDICAL_QUESTIONS.len()),
        );
    }

    for (field, value) in [
        ("playerSignature", &form.player_signature),
        ("guardianSignature", &form.guardian_signature),
    ] {
        if value.trim().is_empty() {
            errors.set(field, "Signature required");
        } else if decode_signature(value).is_none() {
            errors.set(field, "Signature must be a PNG image");
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    /// 1x1 transparent PNG
    const SIGNATURE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    fn complete_form(booking: Uuid) -> ConsentSubmission {
        let text = |s: &str| s.to_string();
        ConsentSubmission {
            parent_booking: booking,
            kid_full_name: text("Sara Hassan"),
            dob: text("2018-05-01"),
            gender: text("girl"),
            address: text("Khalifa City, Abu Dhabi"),
            language: text("Arabic, English"),
            parent1_name: text("Layla Hassan"),
            parent1_relation: text("Mother"),
            parent1_phone: text("0501234567"),
            parent1_email: text("layla@example.com"),
            parent2_name: text("Omar Hassan"),
            parent2_phone: text("0507654321"),
            emergency_name: text("Mona Saeed"),
            emergency_relation: text("Aunt"),
            emergency_phone1: text("0509876543"),
            emergency_phone2: text("026543210"),
            pickup_list: text("Mother, father, aunt"),
            pickup_name1: text("Layla Hassan"),
            pickup_number1: text("0501234567"),
            pickup_name2: text("Mona Saeed"),
            pickup_number2: text("0509876543"),
            medical_answers: vec![text("no"); 8],
            health_info: text("None"),
            medications: text("None"),
            health_concerns: text("None"),
            player_name: text("Sara Hassan"),
            guardian_name: text("Layla Hassan"),
            player_signature: text(SIGNATURE),
            guardian_signature: text(SIGNATURE),
        }
    }

    #[test]
    fn test_complete_form_is_valid() {
        let errors = validate_consent(&complete_form(Uuid::new_v4()));
        assert!(errors.is_empty(), "{}", errors);
    }

    #[test]
    fn test_empty_form_requires_everything() {
        let errors = validate_consent(&ConsentSubmission::default());
        assert_eq!(errors.get("parentBooking"), Some(REQUIRED));
        assert_eq!(errors.get("kidFullName"), Some(REQUIRED));
        assert_eq!(errors.get("pickupNumber2"), Some(REQUIRED));
        assert_eq!(errors.get("medQ8"), Some(REQUIRED));
        assert_eq!(errors.get("guardianSignature"), Some("Signature required"));
    }

    #[test]
    fn test_medical_answers_must_be_yes_or_no() {
        let mut form = complete_form(Uuid::new_v4());
        form.medical_answers[2] = "maybe".into();
        form.medical_answers[5] = "YES".into();
        form.medical_answers.pop();

        let errors = validate_consent(&form);
        assert_eq!(errors.get("medQ3"), Some("Please answer yes or no"));
        assert!(!errors.contains("medQ6"));
        assert_eq!(errors.get("medQ8"), Some(REQUIRED));
    }

    #[test]
    fn test_signature_must_be_png_data_url() {
        let mut form = complete_form(Uuid::new_v4());
        form.player_signature = "data:image/jpeg;base64,/9j/4AAQSkZJRg==".into();
        form.guardian_signature = "data:image/png;base64,not base64!".into();

        let errors = validate_consent(&form);
        assert_eq!(errors.get("playerSignature"), Some("Signature must be a PNG image"));
        assert_eq!(errors.get("guardianSignature"), Some("Signature must be a PNG image"));
    }

    #[test]
    fn test_decode_signature() {
        let bytes = decode_signature(SIGNATURE).unwrap();
        assert!(bytes.starts_with(PNG_MAGIC));
        // valid base64 that is not a PNG
        assert!(decode_signature("data:image/png;base64,aGVsbG8=").is_none());
    }
}

//! Tests for identity value types and projections.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn ada() -> User {
    User::new(UserParts {
        id: UserId::new(USER_ID).expect("fixture id"),
        first_name: PersonName::new("Ada").expect("first name"),
        last_name: PersonName::new("Lovelace").expect("last name"),
        email: EmailAddress::new("ada@example.com").expect("email"),
        phone: PhoneNumber::parse_optional(Some("0721 000 000")),
        password_hash: PasswordHash::new("$argon2id$v=19$fixture").expect("hash"),
        role: Role::User,
        created_at: Utc
            .with_ymd_and_hms(2026, 1, 5, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
    })
}

#[rstest]
#[case("")]
#[case("not-a-uuid")]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6x")]
fn user_id_rejects_invalid_values(#[case] raw: &str) {
    assert_eq!(UserId::new(raw), Err(UserValidationError::InvalidId));
}

#[rstest]
#[case("ada@example.com", true)]
#[case("  ada@example.com  ", true)]
#[case("ada.example.com", false)]
#[case("@example.com", false)]
#[case("ada@", false)]
#[case("ada@ex@ample.com", false)]
#[case("ada lovelace@example.com", false)]
fn email_validation(#[case] raw: &str, #[case] valid: bool) {
    assert_eq!(EmailAddress::new(raw).is_ok(), valid);
}

#[rstest]
fn email_comparison_is_case_sensitive() {
    let lower = EmailAddress::new("ada@example.com").expect("lower");
    let upper = EmailAddress::new("Ada@example.com").expect("upper");
    assert_ne!(lower, upper);
}

#[rstest]
#[case("")]
#[case("   ")]
fn person_name_rejects_blank_values(#[case] raw: &str) {
    assert_eq!(PersonName::new(raw), Err(UserValidationError::EmptyName));
}

#[rstest]
fn person_name_is_trimmed() {
    let name = PersonName::new("  Ada ").expect("valid name");
    assert_eq!(name.as_ref(), "Ada");
}

#[rstest]
fn person_name_rejects_overlong_values() {
    let raw = "a".repeat(PERSON_NAME_MAX + 1);
    assert_eq!(
        PersonName::new(raw),
        Err(UserValidationError::NameTooLong {
            max: PERSON_NAME_MAX
        })
    );
}

#[rstest]
#[case(None, None)]
#[case(Some(""), None)]
#[case(Some("   "), None)]
#[case(Some(" 0721 "), Some("0721"))]
fn blank_phone_numbers_are_absent(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
    let phone = PhoneNumber::parse_optional(raw);
    let observed: Option<&str> = phone.as_ref().map(|value| value.as_ref());
    assert_eq!(observed, expected);
}

#[rstest]
#[case("user", Ok(Role::User))]
#[case("admin", Ok(Role::Admin))]
fn role_parses_known_values(#[case] raw: &str, #[case] expected: Result<Role, UserValidationError>) {
    assert_eq!(raw.parse::<Role>(), expected);
}

#[rstest]
#[case("Admin")]
#[case("superuser")]
#[case("")]
fn role_rejects_unknown_values(#[case] raw: &str) {
    assert!(matches!(
        raw.parse::<Role>(),
        Err(UserValidationError::UnknownRole { .. })
    ));
}

#[rstest]
fn password_hash_debug_is_redacted() {
    let hash = PasswordHash::new("$argon2id$secret").expect("hash");
    assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
}

#[rstest]
fn summary_serialises_without_secrets(ada: User) {
    let value = serde_json::to_value(ada.summary()).expect("summary serialises");
    assert_eq!(
        value,
        json!({
            "id": USER_ID,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "role": "user",
        })
    );
}

#[rstest]
fn profile_adds_phone(ada: User) {
    let value = serde_json::to_value(ada.profile()).expect("profile serialises");
    assert_eq!(value["phone"], json!("0721 000 000"));
    assert_eq!(value["email"], json!("ada@example.com"));
    assert!(value.get("passwordHash").is_none());
}

#[rstest]
fn admin_detection(ada: User) {
    assert!(!ada.is_admin());
    let admin = User::new(UserParts {
        role: Role::Admin,
        ..parts_of(&ada)
    });
    assert!(admin.is_admin());
}

fn parts_of(user: &User) -> UserParts {
    UserParts {
        id: *user.id(),
        first_name: user.first_name().clone(),
        last_name: user.last_name().clone(),
        email: user.email().clone(),
        phone: user.phone().cloned(),
        password_hash: user.password_hash().clone(),
        role: user.role(),
        created_at: user.created_at(),
    }
}

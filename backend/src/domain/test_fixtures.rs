//! Shared fixtures for domain service tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{
    EmailAddress, Listing, ListingDetails, ListingId, PasswordHash, PersonName, Role, User,
    UserId, UserParts,
};

/// Clock frozen at a fixed instant.
pub(crate) struct FixtureClock(pub DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

pub(crate) fn account(email: &str, role: Role) -> User {
    User::new(UserParts {
        id: UserId::random(),
        first_name: PersonName::new("Ada").expect("fixture first name"),
        last_name: PersonName::new("Lovelace").expect("fixture last name"),
        email: EmailAddress::new(email).expect("fixture email"),
        phone: None,
        password_hash: PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$fixture")
            .expect("fixture hash"),
        role,
        created_at: fixed_now(),
    })
}

pub(crate) fn listing(name: &str) -> Listing {
    Listing {
        id: ListingId::random(),
        details: ListingDetails {
            kind: "apartment".into(),
            name: name.into(),
            address: "Str. Memorandumului 28".into(),
            price: "120000 EUR".into(),
            ..ListingDetails::default()
        },
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

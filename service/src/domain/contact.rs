//! Contact details shared by [`Booking`]s and [`FormResponse`]s.
//!
//! [`Booking`]: super::Booking
//! [`FormResponse`]: super::FormResponse

use std::sync::LazyLock;

use common::define_text;
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;

define_text! {
    #[doc = "Full name of a person."]
    struct Name(max = 200);
}

define_text! {
    #[doc = "Country of residence."]
    struct Country(max = 100);
}

define_text! {
    #[doc = "State or region of residence."]
    struct State(max = 100);
}

/// Email address.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]{1,64}@[^\s@]+\.[^\s@.]{2,}$")
                .expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl std::str::FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number, optionally prefixed with a country code.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?[\d(][\d\s\-()]{5,18}\d$").expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl std::str::FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Country, Email, Name, Phone};

    #[test]
    fn validates_emails() {
        for valid in ["guest@example.com", "a.b+c@mail.example.org"] {
            assert!(Email::new(valid).is_some(), "rejected `{valid}`");
        }
        for invalid in ["", "guest", "guest@", "@example.com", "a b@c.com"] {
            assert!(Email::new(invalid).is_none(), "accepted `{invalid}`");
        }
    }

    #[test]
    fn validates_phones() {
        for valid in ["+91 98765 43210", "555-123-4567", "(022) 1234567"] {
            assert!(Phone::new(valid).is_some(), "rejected `{valid}`");
        }
        for invalid in ["", "12", "call me", "+91 98765 43210 ext"] {
            assert!(Phone::new(invalid).is_none(), "accepted `{invalid}`");
        }
    }

    #[test]
    fn rejects_untrimmed_text() {
        assert!(Name::new("Asha Rao").is_some());
        assert!(Name::new(" Asha Rao").is_none());
        assert!(Country::new("").is_none());
        assert!(Country::new("x".repeat(101)).is_none());
    }
}

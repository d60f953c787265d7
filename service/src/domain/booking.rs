//! [`Booking`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, define_text, unit, Date, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    contact::{Country, Email, Name, Phone},
    tourism_package,
};
#[cfg(doc)]
use super::TourismPackage;

/// Stay booked by a guest through the public booking form.
#[derive(Clone, Debug)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// Full [`Name`] of the guest.
    pub full_name: Name,

    /// [`Email`] of the guest.
    pub email: Email,

    /// [`Phone`] of the guest.
    pub phone: Phone,

    /// [`Country`] the guest comes from.
    pub country: Country,

    /// [`Stay`] dates of this [`Booking`].
    pub stay: Stay,

    /// [`Occupancy`] of this [`Booking`].
    pub occupancy: Occupancy,

    /// ID of the booked [`TourismPackage`], if any.
    ///
    /// The referenced [`TourismPackage`] may not exist anymore.
    pub package_id: Option<tourism_package::Id>,

    /// Chosen [`Accommodation`], if any.
    pub accommodation: Option<Accommodation>,

    /// Number of requested rooms, if specified.
    pub rooms: Option<Rooms>,

    /// Preferred [`View`], if any.
    pub view: Option<View>,

    /// Preferred [`MealPreference`], if any.
    pub meal_preference: Option<MealPreference>,

    /// [`SpecialRequirement`]s of the guest.
    pub special_requirements: Vec<SpecialRequirement>,

    /// [`Status`] of this [`Booking`].
    pub status: Status,

    /// [`DateTime`] when this [`Booking`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Booking`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Check-in and check-out [`Date`]s of a [`Booking`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stay {
    /// [`Date`] of the check-in.
    check_in: Date,

    /// [`Date`] of the check-out.
    check_out: Date,
}

impl Stay {
    /// Creates a new [`Stay`] if the `check_out` goes after the `check_in`.
    #[must_use]
    pub fn new(check_in: Date, check_out: Date) -> Option<Self> {
        (check_in < check_out).then_some(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the check-in [`Date`] of this [`Stay`].
    #[must_use]
    pub fn check_in(&self) -> Date {
        self.check_in
    }

    /// Returns the check-out [`Date`] of this [`Stay`].
    #[must_use]
    pub fn check_out(&self) -> Date {
        self.check_out
    }
}

/// Guests of a [`Booking`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Occupancy {
    /// Number of adults.
    adults: u16,

    /// Number of children.
    children: u16,

    /// Number of infants.
    infants: u16,
}

impl Occupancy {
    /// Creates a new [`Occupancy`] if at least one adult is present.
    #[must_use]
    pub fn new(adults: u16, children: u16, infants: u16) -> Option<Self> {
        (adults >= 1).then_some(Self {
            adults,
            children,
            infants,
        })
    }

    /// Returns the number of adults.
    #[must_use]
    pub fn adults(&self) -> u16 {
        self.adults
    }

    /// Returns the number of children.
    #[must_use]
    pub fn children(&self) -> u16 {
        self.children
    }

    /// Returns the number of infants.
    #[must_use]
    pub fn infants(&self) -> u16 {
        self.infants
    }
}

define_text! {
    #[doc = "Accommodation chosen for a [`Booking`]."]
    struct Accommodation(max = 200);
}

define_text! {
    #[doc = "View preferred for a [`Booking`] (sea, garden, etc)."]
    struct View(max = 100);
}

define_text! {
    #[doc = "Meal preference of a [`Booking`] guest."]
    struct MealPreference(max = 100);
}

define_text! {
    #[doc = "Special requirement of a [`Booking`] guest."]
    struct SpecialRequirement(max = 500);
}

/// Number of rooms requested by a [`Booking`].
pub type Rooms = u16;

define_kind! {
    #[doc = "Status of a [`Booking`]."]
    enum Status {
        #[doc = "Awaits an approval."]
        Pending = 1,

        #[doc = "Approved by an administrator."]
        Confirmed = 2,

        #[doc = "Cancelled by an administrator."]
        Cancelled = 3,

        #[doc = "Stay is over."]
        Completed = 4,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Pending
    }
}

/// [`DateTime`] when a [`Booking`] was created.
pub type CreationDateTime = DateTimeOf<(Booking, unit::Creation)>;

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Date;

    use super::{Occupancy, Status, Stay};

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn stay_requires_check_out_after_check_in() {
        assert!(Stay::new(date("2026-11-01"), date("2026-11-05")).is_some());
        assert!(Stay::new(date("2026-11-05"), date("2026-11-05")).is_none());
        assert!(Stay::new(date("2026-11-05"), date("2026-11-01")).is_none());
    }

    #[test]
    fn occupancy_requires_an_adult() {
        let occupancy = Occupancy::new(2, 1, 0).unwrap();

        assert_eq!(occupancy.adults(), 2);
        assert_eq!(occupancy.children(), 1);
        assert!(Occupancy::new(0, 2, 1).is_none());
    }

    #[test]
    fn status_literals() {
        assert_eq!(Status::default(), Status::Pending);
        assert_eq!(Status::Confirmed.to_string(), "confirmed");
        assert_eq!(Status::from_str("completed").unwrap(), Status::Completed);
        assert!(Status::from_str("approved").is_err());
        assert!(Status::from_str("Confirmed").is_err());
        assert_eq!(
            Status::VARIANTS,
            ["pending", "confirmed", "cancelled", "completed"],
        );
    }
}

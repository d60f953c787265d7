//! [`TourismPackage`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_text, unit, DateTimeOf, Price};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tourism package offered for booking.
#[derive(Clone, Debug)]
pub struct TourismPackage {
    /// ID of this [`TourismPackage`].
    pub id: Id,

    /// [`Title`] of this [`TourismPackage`].
    pub title: Title,

    /// [`Description`] of this [`TourismPackage`].
    pub description: Description,

    /// [`Price`] of this [`TourismPackage`].
    pub price: Price,

    /// [`Location`] this [`TourismPackage`] takes place at, if specified.
    pub location: Option<Location>,

    /// Duration of this [`TourismPackage`] in days, if specified.
    pub duration_days: Option<DurationDays>,

    /// Day-by-day itinerary of this [`TourismPackage`].
    pub itinerary: Vec<ItineraryItem>,

    /// [`DateTime`] when this [`TourismPackage`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`TourismPackage`].
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

define_text! {
    #[doc = "Title of a [`TourismPackage`]."]
    struct Title(max = 200);
}

define_text! {
    #[doc = "Description of a [`TourismPackage`]."]
    struct Description(max = 5000);
}

define_text! {
    #[doc = "Location of a [`TourismPackage`]."]
    struct Location(max = 200);
}

define_text! {
    #[doc = "Single entry of a [`TourismPackage`] itinerary."]
    struct ItineraryItem(max = 1000);
}

/// Duration of a [`TourismPackage`] in days.
pub type DurationDays = u16;

/// [`DateTime`] when a [`TourismPackage`] was created.
pub type CreationDateTime = DateTimeOf<(TourismPackage, unit::Creation)>;

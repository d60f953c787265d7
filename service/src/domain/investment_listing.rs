//! [`InvestmentListing`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, define_text, unit, DateTimeOf, Price};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Real-estate property offered as an investment.
#[derive(Clone, Debug)]
pub struct InvestmentListing {
    /// ID of this [`InvestmentListing`].
    pub id: Id,

    /// [`Title`] of this [`InvestmentListing`].
    pub title: Title,

    /// [`Description`] of this [`InvestmentListing`], if any.
    pub description: Option<Description>,

    /// Asking [`Price`] of this [`InvestmentListing`].
    pub price: Price,

    /// [`Location`] of the property, if specified.
    pub location: Option<Location>,

    /// [`PropertyType`] of the property, if specified.
    pub property_type: Option<PropertyType>,

    /// Area of the property in square feet, if specified.
    pub area_sqft: Option<AreaSqft>,

    /// Availability [`Status`] of this [`InvestmentListing`].
    pub status: Status,

    /// [`DateTime`] when this [`InvestmentListing`] was created.
    pub created_at: CreationDateTime,
}

/// ID of an [`InvestmentListing`].
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
    #[doc = "Title of an [`InvestmentListing`]."]
    struct Title(max = 200);
}

define_text! {
    #[doc = "Description of an [`InvestmentListing`]."]
    struct Description(max = 5000);
}

define_text! {
    #[doc = "Location of an [`InvestmentListing`] property."]
    struct Location(max = 200);
}

define_text! {
    #[doc = "Type of an [`InvestmentListing`] property (villa, plot, etc)."]
    struct PropertyType(max = 100);
}

/// Area of an [`InvestmentListing`] property in square feet.
pub type AreaSqft = u32;

define_kind! {
    #[doc = "Availability status of an [`InvestmentListing`]."]
    enum Status {
        #[doc = "Open for investment."]
        Available = 1,

        #[doc = "Held for a prospective investor."]
        Reserved = 2,

        #[doc = "Sold out."]
        Sold = 3,
    }
}

/// [`DateTime`] when an [`InvestmentListing`] was created.
pub type CreationDateTime = DateTimeOf<(InvestmentListing, unit::Creation)>;

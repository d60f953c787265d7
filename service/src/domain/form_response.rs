//! [`FormResponse`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, define_text, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    contact::{Country, Email, Name, Phone, State},
    investment_listing, tourism_package,
};
#[cfg(doc)]
use super::{InvestmentListing, TourismPackage};

/// Registration submitted through one of the public site forms.
#[derive(Clone, Debug)]
pub struct FormResponse {
    /// ID of this [`FormResponse`].
    pub id: Id,

    /// [`Kind`] of the form this [`FormResponse`] was submitted with.
    pub kind: Kind,

    /// [`Name`] of the submitter.
    pub name: Name,

    /// [`Email`] of the submitter.
    pub email: Email,

    /// [`Phone`] of the submitter.
    pub phone: Phone,

    /// [`Country`] of the submitter, if specified.
    pub country: Option<Country>,

    /// [`State`] of the submitter, if specified.
    pub state: Option<State>,

    /// [`Occupation`] of the submitter, if specified.
    pub occupation: Option<Occupation>,

    /// [`Requirements`] of the submitter, if any.
    pub requirements: Option<Requirements>,

    /// Free-form [`Message`] of the submitter, if any.
    pub message: Option<Message>,

    /// ID of the [`InvestmentListing`] of interest, if any.
    ///
    /// The referenced [`InvestmentListing`] may not exist anymore.
    pub property_id: Option<investment_listing::Id>,

    /// ID of the [`TourismPackage`] of interest, if any.
    ///
    /// The referenced [`TourismPackage`] may not exist anymore.
    pub package_id: Option<tourism_package::Id>,

    /// [`Status`] of this [`FormResponse`].
    pub status: Status,

    /// [`DateTime`] when this [`FormResponse`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`FormResponse`].
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

define_kind! {
    #[doc = "Kind of a form a [`FormResponse`] is submitted with."]
    enum Kind {
        #[doc = "Tourism enquiry."]
        Tourism = 1,

        #[doc = "Investment enquiry."]
        Investment = 2,

        #[doc = "General enquiry."]
        General = 3,
    }
}

define_kind! {
    #[doc = "Processing status of a [`FormResponse`]."]
    enum Status {
        #[doc = "Not processed yet."]
        Pending = 1,

        #[doc = "Submitter has been contacted."]
        Contacted = 2,

        #[doc = "Enquiry is resolved."]
        Completed = 3,

        #[doc = "Enquiry is dropped."]
        Cancelled = 4,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Pending
    }
}

define_text! {
    #[doc = "Occupation of a [`FormResponse`] submitter."]
    struct Occupation(max = 200);
}

define_text! {
    #[doc = "Requirements stated in a [`FormResponse`]."]
    struct Requirements(max = 2000);
}

define_text! {
    #[doc = "Message left in a [`FormResponse`]."]
    struct Message(max = 5000);
}

/// [`DateTime`] when a [`FormResponse`] was created.
pub type CreationDateTime = DateTimeOf<(FormResponse, unit::Creation)>;

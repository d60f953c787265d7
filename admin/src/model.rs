//! Records as served by the backend REST API.
//!
//! Fields the admin views never show are skipped while decoding.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Dashboard summary of all the records.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Stats {
    /// Total number of bookings.
    pub total_bookings: u64,

    /// Total number of investment listings.
    pub total_investments: u64,

    /// Total number of tourism packages.
    pub total_tourism_packages: u64,

    /// Total number of form responses.
    pub total_form_responses: u64,

    /// Latest bookings, newest first.
    pub recent_bookings: Vec<RecentBooking>,

    /// Latest investment listings, newest first.
    pub recent_investments: Vec<InvestmentListing>,

    /// Revenue of the confirmed bookings checking in this month.
    pub monthly_revenue: Decimal,

    /// Number of pending bookings and form responses.
    pub pending_approvals: u64,
}

/// Dashboard card of a recent booking.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RecentBooking {
    /// ID of the booking.
    pub id: String,

    /// Full name of the guest.
    pub customer_name: String,

    /// Title of the booked package or accommodation.
    pub package_name: String,

    /// Status of the booking.
    pub status: String,

    /// Day of the arrival.
    pub check_in: String,
}

/// Curated tourism package.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TourismPackage {
    /// ID of this [`TourismPackage`].
    pub id: String,

    /// Title of this [`TourismPackage`].
    pub title: String,

    /// Price of this [`TourismPackage`].
    pub price: Decimal,

    /// Location of this [`TourismPackage`].
    pub location: Option<String>,

    /// Duration of this [`TourismPackage`] in days.
    pub duration_days: Option<u32>,

    /// Day of the creation.
    pub created_at: String,
}

/// Real-estate property offered for investment.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct InvestmentListing {
    /// ID of this [`InvestmentListing`].
    pub id: String,

    /// Title of this [`InvestmentListing`].
    pub title: String,

    /// Asking price of this [`InvestmentListing`].
    pub price: Decimal,

    /// Location of this [`InvestmentListing`].
    pub location: Option<String>,

    /// Type of the listed property.
    pub property_type: Option<String>,

    /// Availability of this [`InvestmentListing`].
    pub status: String,
}

/// Stay booked by a guest.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: String,

    /// Full name of the guest.
    pub full_name: String,

    /// Email of the guest.
    pub email: String,

    /// Phone of the guest.
    pub phone: String,

    /// Day of the arrival.
    pub check_in: String,

    /// Day of the departure.
    pub check_out: String,

    /// Number of adults.
    pub adults: u32,

    /// Number of children.
    pub children: u32,

    /// Number of infants.
    pub infants: u32,

    /// ID of the booked tourism package.
    pub package_id: Option<String>,

    /// Booked accommodation.
    pub accommodation: Option<String>,

    /// Special requirements of the guest.
    pub special_requirements: Vec<String>,

    /// Status of this [`Booking`].
    pub status: String,
}

/// Registration form submitted by a prospect.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FormResponse {
    /// ID of this [`FormResponse`].
    pub id: String,

    /// Kind of the submitted form (`tourism`, `investment` or `general`).
    #[serde(rename = "type")]
    pub kind: String,

    /// Name of the prospect.
    pub name: String,

    /// Email of the prospect.
    pub email: String,

    /// Phone of the prospect.
    pub phone: String,

    /// Occupation of the prospect.
    pub occupation: Option<String>,

    /// Requirements of the prospect.
    pub requirements: Option<String>,

    /// Free-form message of the prospect.
    pub message: Option<String>,

    /// Referred investment listing, if it still exists.
    pub property: Option<Reference>,

    /// Referred tourism package, if it still exists.
    pub package: Option<Reference>,

    /// Processing status, if any.
    pub status: Option<String>,

    /// Moment of the submission.
    pub created_at: String,
}

/// Summary of a record referred by a [`FormResponse`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Reference {
    /// ID of the referred record.
    pub id: String,

    /// Title of the referred record.
    pub title: String,

    /// Price of the referred record.
    pub price: Decimal,
}

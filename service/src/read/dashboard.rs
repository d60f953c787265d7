//! Dashboard read model definition.

use common::Price;

use crate::domain::{Booking, InvestmentListing, TourismPackage};

/// Summary of all the records, recomputed on every read.
#[derive(Clone, Debug)]
pub struct Stats {
    /// Total number of [`Booking`]s.
    pub total_bookings: u64,

    /// Total number of [`InvestmentListing`]s.
    pub total_investments: u64,

    /// Total number of [`TourismPackage`]s.
    pub total_tourism_packages: u64,

    /// Total number of [`FormResponse`]s.
    ///
    /// [`FormResponse`]: crate::domain::FormResponse
    pub total_form_responses: u64,

    /// Latest [`Booking`]s, newest first.
    pub recent_bookings: Vec<RecentBooking>,

    /// Latest [`InvestmentListing`]s, newest first.
    pub recent_investments: Vec<InvestmentListing>,

    /// Revenue of the confirmed [`Booking`]s checking in this month.
    pub monthly_revenue: Price,

    /// Number of pending [`Booking`]s and [`FormResponse`]s.
    ///
    /// [`FormResponse`]: crate::domain::FormResponse
    pub pending_approvals: u64,
}

/// [`Booking`] along with its [`TourismPackage`], if it still exists.
#[derive(Clone, Debug)]
pub struct RecentBooking {
    /// The [`Booking`] itself.
    pub booking: Booking,

    /// Booked [`TourismPackage`], if any.
    pub package: Option<TourismPackage>,
}

impl RecentBooking {
    /// Placeholder for an absent name.
    pub const NO_NAME: &'static str = "N/A";

    /// Returns the name of what is booked: the [`TourismPackage`] title,
    /// otherwise the accommodation.
    #[must_use]
    pub fn package_name(&self) -> &str {
        self.package
            .as_ref()
            .map(|p| p.title.as_ref())
            .or_else(|| self.booking.accommodation.as_ref().map(AsRef::as_ref))
            .unwrap_or(Self::NO_NAME)
    }
}

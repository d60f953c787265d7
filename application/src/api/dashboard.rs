//! Dashboard-related definitions.

use axum::Extension;
use common::{Date, DateTime, Price};
use serde::Serialize;
use service::{domain::booking, query, read};

use crate::{
    api::{self, investment_listing::InvestmentListing, Backend, Success},
    AsError, Error,
};

/// Summary of all the records.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
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
    pub monthly_revenue: Price,

    /// Number of pending bookings and form responses.
    pub pending_approvals: u64,
}

impl From<read::dashboard::Stats> for Stats {
    fn from(stats: read::dashboard::Stats) -> Self {
        let read::dashboard::Stats {
            total_bookings,
            total_investments,
            total_tourism_packages,
            total_form_responses,
            recent_bookings,
            recent_investments,
            monthly_revenue,
            pending_approvals,
        } = stats;

        Self {
            total_bookings,
            total_investments,
            total_tourism_packages,
            total_form_responses,
            recent_bookings: recent_bookings
                .iter()
                .map(RecentBooking::from)
                .collect(),
            recent_investments: recent_investments
                .into_iter()
                .map(Into::into)
                .collect(),
            monthly_revenue,
            pending_approvals,
        }
    }
}

/// Dashboard card of a recent booking.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentBooking {
    /// ID of the booking.
    pub id: booking::Id,

    /// Full name of the guest.
    pub customer_name: String,

    /// Title of the booked package, otherwise the booked accommodation.
    pub package_name: String,

    /// Status of the booking.
    pub status: String,

    /// Day of the arrival.
    pub check_in: Date,

    /// [`DateTime`] when the booking was created.
    pub created_at: DateTime,
}

impl From<&read::dashboard::RecentBooking> for RecentBooking {
    fn from(recent: &read::dashboard::RecentBooking) -> Self {
        Self {
            id: recent.booking.id,
            customer_name: recent.booking.full_name.to_string(),
            package_name: recent.package_name().to_owned(),
            status: recent.booking.status.to_string(),
            check_in: recent.booking.stay.check_in(),
            created_at: recent.booking.created_at.coerce(),
        }
    }
}

/// Computes the dashboard [`Stats`] as of the current UTC day.
///
/// # Errors
///
/// If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "dashboard.stats"))]
pub async fn stats<Svc: Backend>(
    Extension(svc): Extension<Svc>,
) -> api::Response<Stats> {
    svc.execute(query::dashboard::Stats::now())
        .await
        .map_err(AsError::into_error)
        .map(|stats| Success::json(stats.into()))
}

impl AsError for query::dashboard::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::RevenueOverflow => None,
            Self::Db(e) => e.try_as_error(),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::query::dashboard::ExecutionError;

    use crate::{AsError as _, Error};

    #[test]
    fn revenue_overflow_is_internal_error() {
        let err = tracerr::new!(ExecutionError::RevenueOverflow).into_error();

        assert_eq!(err.status_code, http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, Error::INTERNAL_MESSAGE);
        assert!(err.backtrace.is_none());
    }
}

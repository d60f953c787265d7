//! [`Command`] definition.

pub mod create_booking;
pub mod create_form_response;
pub mod create_investment_listing;
pub mod create_tourism_package;
pub mod delete_form_response;
pub mod delete_investment_listing;
pub mod delete_tourism_package;
pub mod update_booking_status;
pub mod update_form_response_status;
pub mod update_investment_listing;
pub mod update_investment_listing_status;
pub mod update_tourism_package;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_booking::CreateBooking, create_form_response::CreateFormResponse,
    create_investment_listing::CreateInvestmentListing,
    create_tourism_package::CreateTourismPackage,
    delete_form_response::DeleteFormResponse,
    delete_investment_listing::DeleteInvestmentListing,
    delete_tourism_package::DeleteTourismPackage,
    update_booking_status::UpdateBookingStatus,
    update_form_response_status::UpdateFormResponseStatus,
    update_investment_listing::UpdateInvestmentListing,
    update_investment_listing_status::UpdateInvestmentListingStatus,
    update_tourism_package::UpdateTourismPackage,
};

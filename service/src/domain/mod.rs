//! Domain definitions.

pub mod booking;
pub mod contact;
pub mod form_response;
pub mod investment_listing;
pub mod tourism_package;

pub use self::{
    booking::Booking, form_response::FormResponse,
    investment_listing::InvestmentListing, tourism_package::TourismPackage,
};

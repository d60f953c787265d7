//! Read entities definitions.

pub mod booking;
pub mod dashboard;
pub mod form_response;
pub mod investment_listing;
pub mod tourism_package;

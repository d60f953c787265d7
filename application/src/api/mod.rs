//! REST API definitions.

pub mod booking;
pub mod dashboard;
pub mod form_response;
pub mod investment_listing;
pub mod tourism_package;

use std::str::FromStr;

use axum::{
    routing::{get, patch},
    Extension, Json, Router,
};
use common::{Handler, Price};
use itertools::Itertools as _;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service::{command, domain, query, read};
use tracerr::Traced;

use crate::{define_error, Error};

/// Defines a trait bundling all the [`Handler`]s the REST API is served
/// with, along with its blanket implementation.
macro_rules! define_backend {
    (
        #[doc = $doc:literal]
        trait $name:ident {
            $( $args:ty => $ok:ty, $err:ty; )*
        }
    ) => {
        #[doc = $doc]
        pub trait $name:
            $( Handler<$args, Ok = $ok, Err = $err> + )*
            Clone + Send + Sync + 'static
        {
        }

        impl<T> $name for T
        where
            T: $( Handler<$args, Ok = $ok, Err = $err> + )*
                Clone + Send + Sync + 'static,
        {
        }
    };
}

define_backend! {
    #[doc = "[`Service`] serving the whole REST API.\n\n\
             [`Service`]: service::Service"]
    trait Backend {
        command::CreateTourismPackage => domain::TourismPackage,
            Traced<command::create_tourism_package::ExecutionError>;
        command::UpdateTourismPackage => domain::TourismPackage,
            Traced<command::update_tourism_package::ExecutionError>;
        command::DeleteTourismPackage => domain::TourismPackage,
            Traced<command::delete_tourism_package::ExecutionError>;
        command::CreateInvestmentListing => domain::InvestmentListing,
            Traced<command::create_investment_listing::ExecutionError>;
        command::UpdateInvestmentListing => domain::InvestmentListing,
            Traced<command::update_investment_listing::ExecutionError>;
        command::UpdateInvestmentListingStatus => domain::InvestmentListing,
            Traced<command::update_investment_listing_status::ExecutionError>;
        command::DeleteInvestmentListing => domain::InvestmentListing,
            Traced<command::delete_investment_listing::ExecutionError>;
        command::CreateBooking => domain::Booking,
            Traced<command::create_booking::ExecutionError>;
        command::UpdateBookingStatus => domain::Booking,
            Traced<command::update_booking_status::ExecutionError>;
        command::CreateFormResponse => domain::FormResponse,
            Traced<command::create_form_response::ExecutionError>;
        command::UpdateFormResponseStatus => domain::FormResponse,
            Traced<command::update_form_response_status::ExecutionError>;
        command::DeleteFormResponse => domain::FormResponse,
            Traced<command::delete_form_response::ExecutionError>;
        query::tourism_package::ById => Option<domain::TourismPackage>,
            Traced<service::infra::database::Error>;
        query::tourism_packages::List => Vec<domain::TourismPackage>,
            Traced<service::infra::database::Error>;
        query::investment_listing::ById => Option<domain::InvestmentListing>,
            Traced<service::infra::database::Error>;
        query::investment_listings::List => Vec<domain::InvestmentListing>,
            Traced<service::infra::database::Error>;
        query::booking::ById => Option<domain::Booking>,
            Traced<service::infra::database::Error>;
        query::bookings::List => Vec<domain::Booking>,
            Traced<service::infra::database::Error>;
        query::form_response::ById => Option<read::form_response::Resolved>,
            Traced<service::infra::database::Error>;
        query::form_responses::List => Vec<read::form_response::Resolved>,
            Traced<service::infra::database::Error>;
        query::dashboard::Stats => read::dashboard::Stats,
            Traced<query::dashboard::ExecutionError>;
    }
}

/// Creates a new [`Router`] serving the REST API with the provided
/// [`Backend`].
pub fn router<Svc: Backend>(service: Svc) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route(
            "/api/tourism",
            get(tourism_package::list::<Svc>)
                .post(tourism_package::create::<Svc>),
        )
        .route(
            "/api/tourism/:id",
            get(tourism_package::get::<Svc>)
                .put(tourism_package::update::<Svc>)
                .delete(tourism_package::delete::<Svc>),
        )
        .route(
            "/api/investment",
            get(investment_listing::list::<Svc>)
                .post(investment_listing::create::<Svc>),
        )
        .route(
            "/api/investment/:id",
            get(investment_listing::get::<Svc>)
                .put(investment_listing::update::<Svc>)
                .delete(investment_listing::delete::<Svc>),
        )
        .route(
            "/api/investment/:id/status",
            patch(investment_listing::update_status::<Svc>),
        )
        .route(
            "/api/bookings",
            get(booking::list::<Svc>).post(booking::create::<Svc>),
        )
        .route("/api/bookings/:id", get(booking::get::<Svc>))
        .route(
            "/api/bookings/:id/status",
            patch(booking::update_status::<Svc>),
        )
        .route("/api/dashboard/stats", get(dashboard::stats::<Svc>));

    // Registrations are the public name of the form responses.
    for prefix in ["/api/form-responses", "/api/registrations"] {
        router = router
            .route(
                prefix,
                get(form_response::list::<Svc>)
                    .post(form_response::create::<Svc>),
            )
            .route(
                &format!("{prefix}/:id"),
                get(form_response::get::<Svc>)
                    .delete(form_response::delete::<Svc>),
            )
            .route(
                &format!("{prefix}/:id/status"),
                patch(form_response::update_status::<Svc>),
            );
    }

    router.layer(Extension(service))
}

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "success": true }))
}

/// Successful response envelope.
#[derive(Clone, Debug, Serialize)]
pub struct Success<T> {
    /// Always `true`.
    pub success: bool,

    /// Response payload.
    pub data: T,
}

impl<T> Success<T> {
    /// Wraps the provided `data` into a [`Success`] envelope.
    #[must_use]
    pub fn json(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Result of a REST API handler.
pub type Response<T> = Result<Json<Success<T>>, Error>;

/// Request body changing a status of a record.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusInput {
    /// Name of the new status.
    pub status: Option<String>,
}

impl StatusInput {
    /// Parses the requested status.
    ///
    /// # Errors
    ///
    /// If the status is missing or unknown.
    pub fn parse<S: FromStr>(self) -> Result<S, Error> {
        let mut invalid = InvalidFields::default();
        invalid
            .required_text("status", self.status, |s| s.parse().ok())
            .ok_or_else(|| invalid.into_error())
    }
}

/// Summary of a weakly referenced record.
#[derive(Clone, Debug, Serialize)]
pub struct Reference<Id> {
    /// ID of the referenced record.
    pub id: Id,

    /// Title of the referenced record.
    pub title: String,

    /// Price of the referenced record.
    pub price: Price,
}

/// Collector of request fields which failed validation.
#[derive(Clone, Debug, Default)]
pub struct InvalidFields(Vec<&'static str>);

impl InvalidFields {
    /// Parses a required field, remembering it as invalid if it's missing or
    /// cannot be `parse`d.
    pub fn required<V, T>(
        &mut self,
        name: &'static str,
        value: Option<V>,
        parse: impl FnOnce(V) -> Option<T>,
    ) -> Option<T> {
        let parsed = value.and_then(parse);
        if parsed.is_none() {
            self.0.push(name);
        }
        parsed
    }

    /// Parses an optional field, remembering it as invalid only if it's
    /// present and cannot be `parse`d.
    pub fn optional<V, T>(
        &mut self,
        name: &'static str,
        value: Option<V>,
        parse: impl FnOnce(V) -> Option<T>,
    ) -> Option<T> {
        let parsed = parse(value?);
        if parsed.is_none() {
            self.0.push(name);
        }
        parsed
    }

    /// Parses a required text field, trimming it first.
    pub fn required_text<T>(
        &mut self,
        name: &'static str,
        value: Option<String>,
        parse: impl FnOnce(String) -> Option<T>,
    ) -> Option<T> {
        self.required(name, value.map(trim), parse)
    }

    /// Parses an optional text field, trimming it first and treating a blank
    /// one as missing.
    pub fn optional_text<T>(
        &mut self,
        name: &'static str,
        value: Option<String>,
        parse: impl FnOnce(String) -> Option<T>,
    ) -> Option<T> {
        self.optional(name, value.map(trim).filter(|s| !s.is_empty()), parse)
    }

    /// Parses a list of trimmed text items, skipping the blank ones.
    pub fn text_list<T>(
        &mut self,
        name: &'static str,
        value: Option<Vec<String>>,
        parse: impl Fn(String) -> Option<T>,
    ) -> Vec<T> {
        let items = value
            .unwrap_or_default()
            .into_iter()
            .map(trim)
            .filter(|s| !s.is_empty())
            .map(parse)
            .collect::<Option<Vec<_>>>();
        if items.is_none() {
            self.0.push(name);
        }
        items.unwrap_or_default()
    }

    /// Remembers the field with the provided `name` as invalid.
    pub fn add(&mut self, name: &'static str) {
        if !self.0.contains(&name) {
            self.0.push(name);
        }
    }

    /// Indicates whether no invalid fields have been remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts these [`InvalidFields`] into a validation [`Error`].
    #[must_use]
    pub fn into_error(self) -> Error {
        Error::validation(format!(
            "Invalid or missing fields: {}",
            self.0
                .iter()
                .format_with(", ", |name, f| f(&format_args!("`{name}`"))),
        ))
    }

    /// Returns a validation [`Error`] if any invalid fields have been
    /// remembered.
    ///
    /// # Errors
    ///
    /// If any field is invalid.
    pub fn check(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

/// Trims the provided text, reusing its allocation when nothing is trimmed.
fn trim(s: String) -> String {
    if s.trim().len() == s.len() {
        s
    } else {
        s.trim().to_owned()
    }
}

/// Largest accepted [`Price`] amount, exclusive.
const PRICE_LIMIT: i64 = 1_000_000_000_000;

/// Number of fractional digits a [`Price`] may have.
const PRICE_SCALE: u32 = 2;

/// Parses a [`Price`] out of the provided `amount`.
///
/// Prices are limited to [`PRICE_SCALE`] fractional digits and stay below
/// [`PRICE_LIMIT`], so they keep exact through JSON numbers.
fn price(amount: Decimal) -> Option<Price> {
    let amount = amount.normalize();
    if amount.scale() > PRICE_SCALE || amount >= Decimal::from(PRICE_LIMIT) {
        return None;
    }
    Price::new(amount)
}

/// Parses a list filter query parameter, treating a blank one as absent.
///
/// # Errors
///
/// If the parameter cannot be parsed.
fn filter<T: FromStr>(
    name: &'static str,
    value: Option<String>,
) -> Result<Option<T>, Error> {
    let mut invalid = InvalidFields::default();
    let parsed = invalid.optional_text(name, value, |s| s.parse().ok());
    invalid.check().map(|()| parsed)
}

/// Parses a record ID out of the path segment.
///
/// Malformed IDs are reported as the `not_found` error.
fn id<Id: FromStr>(raw: &str, not_found: NotFoundError) -> Result<Id, Error> {
    raw.parse().map_err(|_| not_found.into())
}

define_error! {
    enum NotFoundError {
        #[code = "TOURISM_PACKAGE_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Tourism package not found"]
        TourismPackage,

        #[code = "INVESTMENT_LISTING_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Investment listing not found"]
        InvestmentListing,

        #[code = "BOOKING_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Booking not found"]
        Booking,

        #[code = "FORM_RESPONSE_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Form response not found"]
        FormResponse,
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{price, InvalidFields};

    #[test]
    fn lists_every_invalid_field() {
        let mut invalid = InvalidFields::default();

        let title = invalid.required("title", None::<String>, Some);
        let email =
            invalid.required("email", Some("nope".to_owned()), |_| None::<()>);
        let location = invalid.optional_text(
            "location",
            Some("  ".to_owned()),
            |_| None::<()>,
        );

        assert!(title.is_none());
        assert!(email.is_none());
        assert!(location.is_none());
        assert_eq!(
            invalid.into_error().message,
            "Invalid or missing fields: `title`, `email`",
        );
    }

    #[test]
    fn passes_valid_fields() {
        let mut invalid = InvalidFields::default();

        let rooms = invalid.optional("rooms", Some(2_u16), Some);
        let items = invalid.text_list(
            "itinerary",
            Some(vec!["Day 1".to_owned(), " ".to_owned()]),
            Some,
        );

        assert_eq!(rooms, Some(2));
        assert_eq!(items, vec!["Day 1".to_owned()]);
        assert!(invalid.check().is_ok());
    }

    #[test]
    fn bounds_prices() {
        let amount = |s| Decimal::from_str(s).unwrap();

        assert!(price(amount("999999999999.99")).is_some());
        assert!(price(amount("15000.50")).is_some());
        assert!(price(amount("1000000000000")).is_none());
        assert!(price(amount("10.005")).is_none());
        assert!(price(amount("-1")).is_none());
        assert!(price(amount("79228162514264337593543950335")).is_none());
    }
}

//! [`Booking`]-related definitions.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    Extension, Json,
};
use common::{Date, DateTime};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command, domain,
    domain::{
        booking::{
            Accommodation, Id, MealPreference, Occupancy, Rooms,
            SpecialRequirement, Status, Stay, View,
        },
        contact, tourism_package,
    },
    query, read,
};

use crate::{
    api::{self, Backend, InvalidFields, NotFoundError, StatusInput, Success},
    AsError, Error,
};

/// Stay booked by a guest.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique identifier of this [`Booking`].
    pub id: Id,

    /// Full name of the guest.
    pub full_name: String,

    /// Email of the guest.
    pub email: String,

    /// Phone of the guest.
    pub phone: String,

    /// Country the guest comes from.
    pub country: String,

    /// Day of the arrival.
    pub check_in: Date,

    /// Day of the departure.
    pub check_out: Date,

    /// Number of adults.
    pub adults: u16,

    /// Number of children.
    pub children: u16,

    /// Number of infants.
    pub infants: u16,

    /// ID of the booked tourism package, if any.
    pub package_id: Option<tourism_package::Id>,

    /// Booked accommodation.
    pub accommodation: Option<String>,

    /// Number of the booked rooms.
    pub rooms: Option<Rooms>,

    /// Preferred view.
    pub view: Option<String>,

    /// Meal preference.
    pub meal_preference: Option<String>,

    /// Special requirements of the guest.
    pub special_requirements: Vec<String>,

    /// Status of this [`Booking`].
    pub status: String,

    /// [`DateTime`] when this [`Booking`] was created.
    pub created_at: DateTime,
}

impl From<domain::Booking> for Booking {
    fn from(booking: domain::Booking) -> Self {
        let domain::Booking {
            id,
            full_name,
            email,
            phone,
            country,
            stay,
            occupancy,
            package_id,
            accommodation,
            rooms,
            view,
            meal_preference,
            special_requirements,
            status,
            created_at,
        } = booking;

        Self {
            id,
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            country: country.to_string(),
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            adults: occupancy.adults(),
            children: occupancy.children(),
            infants: occupancy.infants(),
            package_id,
            accommodation: accommodation.map(|a| a.to_string()),
            rooms,
            view: view.map(|v| v.to_string()),
            meal_preference: meal_preference.map(|m| m.to_string()),
            special_requirements: special_requirements
                .iter()
                .map(ToString::to_string)
                .collect(),
            status: status.to_string(),
            created_at: created_at.coerce(),
        }
    }
}

/// Booking form submitted by a guest.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Input {
    /// Full name of the guest.
    pub full_name: Option<String>,

    /// Email of the guest.
    pub email: Option<String>,

    /// Phone of the guest.
    pub phone: Option<String>,

    /// Country the guest comes from.
    pub country: Option<String>,

    /// Day of the arrival.
    pub check_in: Option<String>,

    /// Day of the departure.
    pub check_out: Option<String>,

    /// Number of adults.
    pub adults: Option<u16>,

    /// Number of children.
    pub children: Option<u16>,

    /// Number of infants.
    pub infants: Option<u16>,

    /// ID of the tourism package to book.
    pub package_id: Option<String>,

    /// Accommodation to book.
    pub accommodation: Option<String>,

    /// Number of rooms to book.
    pub rooms: Option<Rooms>,

    /// Preferred view.
    pub view: Option<String>,

    /// Meal preference.
    pub meal_preference: Option<String>,

    /// Special requirements of the guest.
    pub special_requirements: Option<Vec<String>>,

    /// Initial status of the booking.
    pub status: Option<String>,
}

impl Input {
    /// Validates this [`Input`] turning it into a [`command::CreateBooking`].
    ///
    /// # Errors
    ///
    /// Lists all the invalid fields.
    pub fn validate(self) -> Result<command::CreateBooking, Error> {
        let mut invalid = InvalidFields::default();

        let full_name = invalid.required_text(
            "fullName",
            self.full_name,
            contact::Name::new,
        );
        let email =
            invalid.required_text("email", self.email, contact::Email::new);
        let phone =
            invalid.required_text("phone", self.phone, contact::Phone::new);
        let country = invalid.required_text(
            "country",
            self.country,
            contact::Country::new,
        );
        let check_in = invalid
            .required_text("checkIn", self.check_in, |d| Date::parse(&d).ok());
        let check_out = invalid.required_text(
            "checkOut",
            self.check_out,
            |d| Date::parse(&d).ok(),
        );
        let stay = check_in.zip(check_out).and_then(|(i, o)| {
            let stay = Stay::new(i, o);
            if stay.is_none() {
                invalid.add("checkOut");
            }
            stay
        });
        let adults = invalid.required("adults", self.adults, Some);
        let occupancy = adults.and_then(|adults| {
            let occupancy = Occupancy::new(
                adults,
                self.children.unwrap_or_default(),
                self.infants.unwrap_or_default(),
            );
            if occupancy.is_none() {
                invalid.add("adults");
            }
            occupancy
        });
        let package_id = invalid
            .optional_text("packageId", self.package_id, |id| id.parse().ok());
        let accommodation = invalid.optional_text(
            "accommodation",
            self.accommodation,
            Accommodation::new,
        );
        let rooms =
            invalid.optional("rooms", self.rooms, |r| (r > 0).then_some(r));
        let view = invalid.optional_text("view", self.view, View::new);
        let meal_preference = invalid.optional_text(
            "mealPreference",
            self.meal_preference,
            MealPreference::new,
        );
        let special_requirements = invalid.text_list(
            "specialRequirements",
            self.special_requirements,
            SpecialRequirement::new,
        );
        let status = invalid
            .optional_text("status", self.status, |s| s.parse().ok());

        let (
            Some(full_name),
            Some(email),
            Some(phone),
            Some(country),
            Some(stay),
            Some(occupancy),
        ) = (full_name, email, phone, country, stay, occupancy)
        else {
            return Err(invalid.into_error());
        };
        invalid.check()?;

        Ok(command::CreateBooking {
            full_name,
            email,
            phone,
            country,
            stay,
            occupancy,
            package_id,
            accommodation,
            rooms,
            view,
            meal_preference,
            special_requirements,
            status,
        })
    }
}

/// Query parameters of the [`Booking`]s list.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Name of the [`Status`] to list only.
    pub status: Option<String>,
}

/// Lists the [`Booking`]s, newest first.
///
/// # Errors
///
/// - If the provided [`ListParams`] are invalid.
/// - If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "bookings.list"))]
pub async fn list<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> api::Response<Vec<Booking>> {
    let Query(ListParams { status }) = params.map_err(AsError::into_error)?;
    let status = api::filter::<Status>("status", status)?;

    let bookings = svc
        .execute(query::bookings::List::by(read::booking::list::Selector {
            filter: read::booking::list::Filter { status },
            limit: None,
        }))
        .await
        .map_err(AsError::into_error)?;

    Ok(Success::json(bookings.into_iter().map(Into::into).collect()))
}

/// Returns the [`Booking`] with the provided ID.
///
/// # Errors
///
/// - If the [`Booking`] doesn't exist.
/// - If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "bookings.get", id = %id))]
pub async fn get<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    Path(id): Path<String>,
) -> api::Response<Booking> {
    let id = api::id(&id, NotFoundError::Booking)?;

    svc.execute(query::booking::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| NotFoundError::Booking.into())
        .map(|b| Success::json(b.into()))
}

/// Creates a new [`Booking`] out of the submitted form.
///
/// # Errors
///
/// - If the provided [`Input`] is invalid.
/// - If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "bookings.create"))]
pub async fn create<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    input: Result<Json<Input>, JsonRejection>,
) -> Result<(StatusCode, Json<Success<Booking>>), Error> {
    let Json(input) = input.map_err(AsError::into_error)?;
    let cmd = input.validate()?;

    let booking = svc.execute(cmd).await.map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Success::json(booking.into())))
}

/// Changes the [`Status`] of the [`Booking`] with the provided ID.
///
/// # Errors
///
/// - If the [`Booking`] doesn't exist.
/// - If the requested [`Status`] is unknown.
/// - If the [`Backend`] fails.
#[tracing::instrument(
    skip_all,
    fields(api.name = "bookings.updateStatus", id = %id),
)]
pub async fn update_status<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    Path(id): Path<String>,
    input: Result<Json<StatusInput>, JsonRejection>,
) -> api::Response<Booking> {
    let id = api::id(&id, NotFoundError::Booking)?;
    let Json(input) = input.map_err(AsError::into_error)?;
    let status = input.parse::<Status>()?;

    svc.execute(command::UpdateBookingStatus { id, status })
        .await
        .map_err(AsError::into_error)
        .map(|b| Success::json(b.into()))
}

impl AsError for command::update_booking_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::BookingNotExists(_) => Some(NotFoundError::Booking.into()),
            Self::Db(e) => e.try_as_error(),
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Input;

    fn input() -> Input {
        Input {
            full_name: Some("Asha Rao".to_owned()),
            email: Some("asha@example.com".to_owned()),
            phone: Some("+91 98765 43210".to_owned()),
            country: Some("India".to_owned()),
            check_in: Some("2026-11-01".to_owned()),
            check_out: Some("2026-11-05".to_owned()),
            adults: Some(2),
            ..Input::default()
        }
    }

    #[test]
    fn accepts_minimal_form() {
        let cmd = input().validate().unwrap();

        assert_eq!(cmd.occupancy.adults(), 2);
        assert_eq!(cmd.occupancy.children(), 0);
        assert!(cmd.status.is_none());
    }

    #[test]
    fn rejects_check_out_before_check_in() {
        let err = Input {
            check_out: Some("2026-11-01".to_owned()),
            ..input()
        }
        .validate()
        .unwrap_err();

        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid or missing fields: `checkOut`");
    }

    #[test]
    fn rejects_zero_adults() {
        let err = Input {
            adults: Some(0),
            ..input()
        }
        .validate()
        .unwrap_err();

        assert_eq!(err.message, "Invalid or missing fields: `adults`");
    }

    #[test]
    fn names_every_missing_field() {
        let err = Input {
            email: None,
            phone: Some("call me".to_owned()),
            status: Some("approved".to_owned()),
            ..input()
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            err.message,
            "Invalid or missing fields: `email`, `phone`, `status`",
        );
    }

    #[test]
    fn trims_text_fields() {
        let cmd = Input {
            full_name: Some("Asha Rao ".to_owned()),
            country: Some(" India".to_owned()),
            check_in: Some(" 2026-11-01 ".to_owned()),
            special_requirements: Some(vec![
                " Airport pickup ".to_owned(),
                "  ".to_owned(),
            ]),
            ..input()
        }
        .validate()
        .unwrap();

        assert_eq!(cmd.full_name.to_string(), "Asha Rao");
        assert_eq!(cmd.country.to_string(), "India");
        assert_eq!(cmd.special_requirements.len(), 1);
        assert_eq!(cmd.special_requirements[0].to_string(), "Airport pickup");
    }
}

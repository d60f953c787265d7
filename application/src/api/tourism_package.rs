//! [`TourismPackage`]-related definitions.

use axum::{
    extract::{rejection::JsonRejection, Path},
    Extension, Json,
};
use common::{DateTime, Price};
use http::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service::{
    command, domain,
    domain::tourism_package::{
        Description, DurationDays, Id, ItineraryItem, Location, Title,
    },
    query, read,
};

use crate::{
    api::{self, Backend, InvalidFields, NotFoundError, Success},
    AsError, Error,
};

/// Tourism package offered for booking.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourismPackage {
    /// Unique identifier of this [`TourismPackage`].
    pub id: Id,

    /// Title of this [`TourismPackage`].
    pub title: String,

    /// Description of this [`TourismPackage`].
    pub description: String,

    /// Price of this [`TourismPackage`].
    pub price: Price,

    /// Location of this [`TourismPackage`].
    pub location: Option<String>,

    /// Duration of this [`TourismPackage`] in days.
    pub duration_days: Option<DurationDays>,

    /// Day-by-day itinerary of this [`TourismPackage`].
    pub itinerary: Vec<String>,

    /// [`DateTime`] when this [`TourismPackage`] was created.
    pub created_at: DateTime,
}

impl From<domain::TourismPackage> for TourismPackage {
    fn from(package: domain::TourismPackage) -> Self {
        let domain::TourismPackage {
            id,
            title,
            description,
            price,
            location,
            duration_days,
            itinerary,
            created_at,
        } = package;

        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            price,
            location: location.map(|l| l.to_string()),
            duration_days,
            itinerary: itinerary.iter().map(ToString::to_string).collect(),
            created_at: created_at.coerce(),
        }
    }
}

impl From<&domain::TourismPackage> for api::Reference<Id> {
    fn from(package: &domain::TourismPackage) -> Self {
        Self {
            id: package.id,
            title: package.title.to_string(),
            price: package.price,
        }
    }
}

/// Editable fields of a [`TourismPackage`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Input {
    /// Title of the [`TourismPackage`].
    pub title: Option<String>,

    /// Description of the [`TourismPackage`].
    pub description: Option<String>,

    /// Price of the [`TourismPackage`].
    pub price: Option<Decimal>,

    /// Location of the [`TourismPackage`].
    pub location: Option<String>,

    /// Duration of the [`TourismPackage`] in days.
    pub duration_days: Option<DurationDays>,

    /// Day-by-day itinerary of the [`TourismPackage`].
    pub itinerary: Option<Vec<String>>,
}

impl Input {
    /// Validates this [`Input`] turning it into a
    /// [`command::CreateTourismPackage`].
    ///
    /// # Errors
    ///
    /// Lists all the invalid fields.
    pub fn validate(self) -> Result<command::CreateTourismPackage, Error> {
        let mut invalid = InvalidFields::default();

        let title = invalid.required_text("title", self.title, Title::new);
        let description = invalid.required_text(
            "description",
            self.description,
            Description::new,
        );
        let price = invalid.required("price", self.price, api::price);
        let location =
            invalid.optional_text("location", self.location, Location::new);
        let duration_days = invalid
            .optional("durationDays", self.duration_days, |d| {
                (d > 0).then_some(d)
            });
        let itinerary =
            invalid.text_list("itinerary", self.itinerary, ItineraryItem::new);

        let (Some(title), Some(description), Some(price)) =
            (title, description, price)
        else {
            return Err(invalid.into_error());
        };
        invalid.check()?;

        Ok(command::CreateTourismPackage {
            title,
            description,
            price,
            location,
            duration_days,
            itinerary,
        })
    }
}

/// Lists all the [`TourismPackage`]s, newest first.
///
/// # Errors
///
/// If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "tourism.list"))]
pub async fn list<Svc: Backend>(
    Extension(svc): Extension<Svc>,
) -> api::Response<Vec<TourismPackage>> {
    let packages = svc
        .execute(query::tourism_packages::List::by(
            read::tourism_package::list::Selector::default(),
        ))
        .await
        .map_err(AsError::into_error)?;

    Ok(Success::json(packages.into_iter().map(Into::into).collect()))
}

/// Returns the [`TourismPackage`] with the provided ID.
///
/// # Errors
///
/// - If the [`TourismPackage`] doesn't exist.
/// - If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "tourism.get", id = %id))]
pub async fn get<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    Path(id): Path<String>,
) -> api::Response<TourismPackage> {
    let id = api::id(&id, NotFoundError::TourismPackage)?;

    svc.execute(query::tourism_package::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| NotFoundError::TourismPackage.into())
        .map(|p| Success::json(p.into()))
}

/// Creates a new [`TourismPackage`].
///
/// # Errors
///
/// - If the provided [`Input`] is invalid.
/// - If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "tourism.create"))]
pub async fn create<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    input: Result<Json<Input>, JsonRejection>,
) -> Result<(StatusCode, Json<Success<TourismPackage>>), Error> {
    let Json(input) = input.map_err(AsError::into_error)?;
    let cmd = input.validate()?;

    let package = svc.execute(cmd).await.map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Success::json(package.into())))
}

/// Replaces the editable fields of the [`TourismPackage`] with the provided
/// ID.
///
/// # Errors
///
/// - If the [`TourismPackage`] doesn't exist.
/// - If the provided [`Input`] is invalid.
/// - If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "tourism.update", id = %id))]
pub async fn update<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    Path(id): Path<String>,
    input: Result<Json<Input>, JsonRejection>,
) -> api::Response<TourismPackage> {
    let id = api::id(&id, NotFoundError::TourismPackage)?;
    let Json(input) = input.map_err(AsError::into_error)?;
    let command::CreateTourismPackage {
        title,
        description,
        price,
        location,
        duration_days,
        itinerary,
    } = input.validate()?;

    svc.execute(command::UpdateTourismPackage {
        id,
        title,
        description,
        price,
        location,
        duration_days,
        itinerary,
    })
    .await
    .map_err(AsError::into_error)
    .map(|p| Success::json(p.into()))
}

/// Deletes the [`TourismPackage`] with the provided ID.
///
/// # Errors
///
/// - If the [`TourismPackage`] doesn't exist.
/// - If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "tourism.delete", id = %id))]
pub async fn delete<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    Path(id): Path<String>,
) -> api::Response<TourismPackage> {
    let id = api::id(&id, NotFoundError::TourismPackage)?;

    svc.execute(command::DeleteTourismPackage { id })
        .await
        .map_err(AsError::into_error)
        .map(|p| Success::json(p.into()))
}

impl AsError for command::update_tourism_package::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TourismPackageNotExists(_) => {
                Some(NotFoundError::TourismPackage.into())
            }
        }
    }
}

impl AsError for command::delete_tourism_package::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TourismPackageNotExists(_) => {
                Some(NotFoundError::TourismPackage.into())
            }
        }
    }
}

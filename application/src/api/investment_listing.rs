//! [`InvestmentListing`]-related definitions.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    Extension, Json,
};
use common::{DateTime, Price};
use http::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service::{
    command, domain,
    domain::investment_listing::{
        AreaSqft, Description, Id, Location, PropertyType, Status, Title,
    },
    query, read,
};

use crate::{
    api::{self, Backend, InvalidFields, NotFoundError, StatusInput, Success},
    AsError, Error,
};

/// Real-estate property offered for investment.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentListing {
    /// Unique identifier of this [`InvestmentListing`].
    pub id: Id,

    /// Title of this [`InvestmentListing`].
    pub title: String,

    /// Description of this [`InvestmentListing`].
    pub description: Option<String>,

    /// Asking price of this [`InvestmentListing`].
    pub price: Price,

    /// Location of this [`InvestmentListing`].
    pub location: Option<String>,

    /// Type of the listed property.
    pub property_type: Option<String>,

    /// Area of the listed property in square feet.
    pub area_sqft: Option<AreaSqft>,

    /// Availability of this [`InvestmentListing`].
    pub status: String,

    /// [`DateTime`] when this [`InvestmentListing`] was created.
    pub created_at: DateTime,
}

impl From<domain::InvestmentListing> for InvestmentListing {
    fn from(listing: domain::InvestmentListing) -> Self {
        let domain::InvestmentListing {
            id,
            title,
            description,
            price,
            location,
            property_type,
            area_sqft,
            status,
            created_at,
        } = listing;

        Self {
            id,
            title: title.to_string(),
            description: description.map(|d| d.to_string()),
            price,
            location: location.map(|l| l.to_string()),
            property_type: property_type.map(|t| t.to_string()),
            area_sqft,
            status: status.to_string(),
            created_at: created_at.coerce(),
        }
    }
}

impl From<&domain::InvestmentListing> for api::Reference<Id> {
    fn from(listing: &domain::InvestmentListing) -> Self {
        Self {
            id: listing.id,
            title: listing.title.to_string(),
            price: listing.price,
        }
    }
}

/// Editable fields of an [`InvestmentListing`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Input {
    /// Title of the [`InvestmentListing`].
    pub title: Option<String>,

    /// Description of the [`InvestmentListing`].
    pub description: Option<String>,

    /// Asking price of the [`InvestmentListing`].
    pub price: Option<Decimal>,

    /// Location of the [`InvestmentListing`].
    pub location: Option<String>,

    /// Type of the listed property.
    pub property_type: Option<String>,

    /// Area of the listed property in square feet.
    pub area_sqft: Option<AreaSqft>,

    /// Availability of the [`InvestmentListing`].
    pub status: Option<String>,
}

impl Input {
    /// Validates this [`Input`] turning it into a
    /// [`command::CreateInvestmentListing`].
    ///
    /// # Errors
    ///
    /// Lists all the invalid fields.
    pub fn validate(self) -> Result<command::CreateInvestmentListing, Error> {
        let mut invalid = InvalidFields::default();

        let title = invalid.required_text("title", self.title, Title::new);
        let description = invalid.optional_text(
            "description",
            self.description,
            Description::new,
        );
        let price = invalid.required("price", self.price, api::price);
        let location =
            invalid.optional_text("location", self.location, Location::new);
        let property_type = invalid.optional_text(
            "propertyType",
            self.property_type,
            PropertyType::new,
        );
        let area_sqft = invalid
            .optional("areaSqft", self.area_sqft, |a| (a > 0).then_some(a));
        let status = invalid
            .optional_text("status", self.status, |s| s.parse().ok());

        let (Some(title), Some(price)) = (title, price) else {
            return Err(invalid.into_error());
        };
        invalid.check()?;

        Ok(command::CreateInvestmentListing {
            title,
            description,
            price,
            location,
            property_type,
            area_sqft,
            status,
        })
    }
}

/// Query parameters of the [`InvestmentListing`]s list.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Name of the [`Status`] to list only.
    pub status: Option<String>,
}

/// Lists the [`InvestmentListing`]s, newest first.
///
/// # Errors
///
/// - If the provided [`ListParams`] are invalid.
/// - If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "investment.list"))]
pub async fn list<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> api::Response<Vec<InvestmentListing>> {
    let Query(ListParams { status }) = params.map_err(AsError::into_error)?;
    let status = api::filter::<Status>("status", status)?;

    let listings = svc
        .execute(query::investment_listings::List::by(
            read::investment_listing::list::Selector {
                filter: read::investment_listing::list::Filter { status },
                limit: None,
            },
        ))
        .await
        .map_err(AsError::into_error)?;

    Ok(Success::json(listings.into_iter().map(Into::into).collect()))
}

/// Returns the [`InvestmentListing`] with the provided ID.
///
/// # Errors
///
/// - If the [`InvestmentListing`] doesn't exist.
/// - If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "investment.get", id = %id))]
pub async fn get<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    Path(id): Path<String>,
) -> api::Response<InvestmentListing> {
    let id = api::id(&id, NotFoundError::InvestmentListing)?;

    svc.execute(query::investment_listing::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| NotFoundError::InvestmentListing.into())
        .map(|l| Success::json(l.into()))
}

/// Creates a new [`InvestmentListing`].
///
/// # Errors
///
/// - If the provided [`Input`] is invalid.
/// - If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "investment.create"))]
pub async fn create<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    input: Result<Json<Input>, JsonRejection>,
) -> Result<(StatusCode, Json<Success<InvestmentListing>>), Error> {
    let Json(input) = input.map_err(AsError::into_error)?;
    let cmd = input.validate()?;

    let listing = svc.execute(cmd).await.map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Success::json(listing.into())))
}

/// Replaces the editable fields of the [`InvestmentListing`] with the
/// provided ID.
///
/// The [`Status`] is left unchanged if omitted.
///
/// # Errors
///
/// - If the [`InvestmentListing`] doesn't exist.
/// - If the provided [`Input`] is invalid.
/// - If the [`Backend`] fails.
#[tracing::instrument(
    skip_all,
    fields(api.name = "investment.update", id = %id),
)]
pub async fn update<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    Path(id): Path<String>,
    input: Result<Json<Input>, JsonRejection>,
) -> api::Response<InvestmentListing> {
    let id = api::id(&id, NotFoundError::InvestmentListing)?;
    let Json(input) = input.map_err(AsError::into_error)?;
    let command::CreateInvestmentListing {
        title,
        description,
        price,
        location,
        property_type,
        area_sqft,
        status,
    } = input.validate()?;

    svc.execute(command::UpdateInvestmentListing {
        id,
        title,
        description,
        price,
        location,
        property_type,
        area_sqft,
        status,
    })
    .await
    .map_err(AsError::into_error)
    .map(|l| Success::json(l.into()))
}

/// Changes the [`Status`] of the [`InvestmentListing`] with the provided ID.
///
/// # Errors
///
/// - If the [`InvestmentListing`] doesn't exist.
/// - If the requested [`Status`] is unknown.
/// - If the [`Backend`] fails.
#[tracing::instrument(
    skip_all,
    fields(api.name = "investment.updateStatus", id = %id),
)]
pub async fn update_status<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    Path(id): Path<String>,
    input: Result<Json<StatusInput>, JsonRejection>,
) -> api::Response<InvestmentListing> {
    let id = api::id(&id, NotFoundError::InvestmentListing)?;
    let Json(input) = input.map_err(AsError::into_error)?;
    let status = input.parse::<Status>()?;

    svc.execute(command::UpdateInvestmentListingStatus { id, status })
        .await
        .map_err(AsError::into_error)
        .map(|l| Success::json(l.into()))
}

/// Deletes the [`InvestmentListing`] with the provided ID.
///
/// # Errors
///
/// - If the [`InvestmentListing`] doesn't exist.
/// - If the [`Backend`] fails.
#[tracing::instrument(
    skip_all,
    fields(api.name = "investment.delete", id = %id),
)]
pub async fn delete<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    Path(id): Path<String>,
) -> api::Response<InvestmentListing> {
    let id = api::id(&id, NotFoundError::InvestmentListing)?;

    svc.execute(command::DeleteInvestmentListing { id })
        .await
        .map_err(AsError::into_error)
        .map(|l| Success::json(l.into()))
}

impl AsError for command::update_investment_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvestmentListingNotExists(_) => {
                Some(NotFoundError::InvestmentListing.into())
            }
        }
    }
}

impl AsError for command::update_investment_listing_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvestmentListingNotExists(_) => {
                Some(NotFoundError::InvestmentListing.into())
            }
        }
    }
}

impl AsError for command::delete_investment_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvestmentListingNotExists(_) => {
                Some(NotFoundError::InvestmentListing.into())
            }
        }
    }
}

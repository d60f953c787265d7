//! [`FormResponse`]-related definitions.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    Extension, Json,
};
use common::DateTime;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command,
    domain::{
        contact,
        form_response::{Id, Kind, Message, Occupation, Requirements, Status},
        investment_listing, tourism_package,
    },
    query, read,
};

use crate::{
    api::{
        self, Backend, InvalidFields, NotFoundError, Reference, StatusInput,
        Success,
    },
    AsError, Error,
};

/// Registration form submitted by a prospect, along with the records it
/// refers to.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    /// Unique identifier of this [`FormResponse`].
    pub id: Id,

    /// Kind of the submitted form.
    #[serde(rename = "type")]
    pub kind: String,

    /// Name of the prospect.
    pub name: String,

    /// Email of the prospect.
    pub email: String,

    /// Phone of the prospect.
    pub phone: String,

    /// Country the prospect lives in.
    pub country: Option<String>,

    /// State the prospect lives in.
    pub state: Option<String>,

    /// Occupation of the prospect.
    pub occupation: Option<String>,

    /// Requirements of the prospect.
    pub requirements: Option<String>,

    /// Free-form message of the prospect.
    pub message: Option<String>,

    /// ID of the investment listing the prospect is interested in.
    pub property_id: Option<investment_listing::Id>,

    /// ID of the tourism package the prospect is interested in.
    pub package_id: Option<tourism_package::Id>,

    /// Summary of the referred investment listing, if it still exists.
    pub property: Option<Reference<investment_listing::Id>>,

    /// Summary of the referred tourism package, if it still exists.
    pub package: Option<Reference<tourism_package::Id>>,

    /// Processing status of this [`FormResponse`].
    pub status: String,

    /// [`DateTime`] when this [`FormResponse`] was created.
    pub created_at: DateTime,
}

impl From<read::form_response::Resolved> for FormResponse {
    fn from(resolved: read::form_response::Resolved) -> Self {
        let read::form_response::Resolved {
            response,
            property,
            package,
        } = resolved;

        Self {
            id: response.id,
            kind: response.kind.to_string(),
            name: response.name.to_string(),
            email: response.email.to_string(),
            phone: response.phone.to_string(),
            country: response.country.map(|c| c.to_string()),
            state: response.state.map(|s| s.to_string()),
            occupation: response.occupation.map(|o| o.to_string()),
            requirements: response.requirements.map(|r| r.to_string()),
            message: response.message.map(|m| m.to_string()),
            property_id: response.property_id,
            package_id: response.package_id,
            property: property.as_ref().map(Into::into),
            package: package.as_ref().map(Into::into),
            status: response.status.to_string(),
            created_at: response.created_at.coerce(),
        }
    }
}

/// Registration form submitted by a prospect.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Input {
    /// Kind of the submitted form.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Name of the prospect.
    pub name: Option<String>,

    /// Email of the prospect.
    pub email: Option<String>,

    /// Phone of the prospect.
    pub phone: Option<String>,

    /// Country the prospect lives in.
    pub country: Option<String>,

    /// State the prospect lives in.
    pub state: Option<String>,

    /// Occupation of the prospect.
    pub occupation: Option<String>,

    /// Requirements of the prospect.
    pub requirements: Option<String>,

    /// Free-form message of the prospect.
    pub message: Option<String>,

    /// ID of the investment listing the prospect is interested in.
    pub property_id: Option<String>,

    /// ID of the tourism package the prospect is interested in.
    pub package_id: Option<String>,

    /// Initial status of the form response.
    pub status: Option<String>,
}

impl Input {
    /// Validates this [`Input`] turning it into a
    /// [`command::CreateFormResponse`].
    ///
    /// # Errors
    ///
    /// Lists all the invalid fields.
    pub fn validate(self) -> Result<command::CreateFormResponse, Error> {
        let mut invalid = InvalidFields::default();

        let kind = invalid.required_text("type", self.kind, |k| k.parse().ok());
        let name =
            invalid.required_text("name", self.name, contact::Name::new);
        let email =
            invalid.required_text("email", self.email, contact::Email::new);
        let phone =
            invalid.required_text("phone", self.phone, contact::Phone::new);
        let country = invalid.optional_text(
            "country",
            self.country,
            contact::Country::new,
        );
        let state =
            invalid.optional_text("state", self.state, contact::State::new);
        let occupation = invalid.optional_text(
            "occupation",
            self.occupation,
            Occupation::new,
        );
        let requirements = invalid.optional_text(
            "requirements",
            self.requirements,
            Requirements::new,
        );
        let message =
            invalid.optional_text("message", self.message, Message::new);
        let property_id =
            invalid.optional_text("propertyId", self.property_id, |id| {
                id.parse().ok()
            });
        let package_id = invalid
            .optional_text("packageId", self.package_id, |id| id.parse().ok());
        let status = invalid
            .optional_text("status", self.status, |s| s.parse().ok());

        let (Some(kind), Some(name), Some(email), Some(phone)) =
            (kind, name, email, phone)
        else {
            return Err(invalid.into_error());
        };
        invalid.check()?;

        Ok(command::CreateFormResponse {
            kind,
            name,
            email,
            phone,
            country,
            state,
            occupation,
            requirements,
            message,
            property_id,
            package_id,
            status,
        })
    }
}

/// Query parameters of the [`FormResponse`]s list.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Name of the [`Kind`] to list only.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Name of the [`Status`] to list only.
    pub status: Option<String>,
}

/// Lists the [`FormResponse`]s, newest first.
///
/// # Errors
///
/// - If the provided [`ListParams`] are invalid.
/// - If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "formResponses.list"))]
pub async fn list<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> api::Response<Vec<FormResponse>> {
    let Query(ListParams { kind, status }) =
        params.map_err(AsError::into_error)?;
    let kind = api::filter::<Kind>("type", kind)?;
    let status = api::filter::<Status>("status", status)?;

    let responses = svc
        .execute(query::form_responses::List {
            selector: read::form_response::list::Selector {
                filter: read::form_response::list::Filter { kind, status },
                limit: None,
            },
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Success::json(responses.into_iter().map(Into::into).collect()))
}

/// Returns the [`FormResponse`] with the provided ID.
///
/// # Errors
///
/// - If the [`FormResponse`] doesn't exist.
/// - If the [`Backend`] fails.
#[tracing::instrument(
    skip_all,
    fields(api.name = "formResponses.get", id = %id),
)]
pub async fn get<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    Path(id): Path<String>,
) -> api::Response<FormResponse> {
    let id = api::id(&id, NotFoundError::FormResponse)?;

    svc.execute(query::form_response::ById(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| NotFoundError::FormResponse.into())
        .map(|r| Success::json(r.into()))
}

/// Creates a new [`FormResponse`] out of the submitted form.
///
/// # Errors
///
/// - If the provided [`Input`] is invalid.
/// - If the [`Backend`] fails.
#[tracing::instrument(skip_all, fields(api.name = "formResponses.create"))]
pub async fn create<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    input: Result<Json<Input>, JsonRejection>,
) -> Result<(StatusCode, Json<Success<FormResponse>>), Error> {
    let Json(input) = input.map_err(AsError::into_error)?;
    let cmd = input.validate()?;

    let response = svc.execute(cmd).await.map_err(AsError::into_error)?;
    let resolved = svc
        .execute(query::form_response::ById(response.id))
        .await
        .map_err(AsError::into_error)?
        .unwrap_or(read::form_response::Resolved {
            response,
            property: None,
            package: None,
        });

    Ok((StatusCode::CREATED, Success::json(resolved.into())))
}

/// Changes the [`Status`] of the [`FormResponse`] with the provided ID.
///
/// # Errors
///
/// - If the [`FormResponse`] doesn't exist.
/// - If the requested [`Status`] is unknown.
/// - If the [`Backend`] fails.
#[tracing::instrument(
    skip_all,
    fields(api.name = "formResponses.updateStatus", id = %id),
)]
pub async fn update_status<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    Path(id): Path<String>,
    input: Result<Json<StatusInput>, JsonRejection>,
) -> api::Response<FormResponse> {
    let id = api::id(&id, NotFoundError::FormResponse)?;
    let Json(input) = input.map_err(AsError::into_error)?;
    let status = input.parse::<Status>()?;

    _ = svc
        .execute(command::UpdateFormResponseStatus { id, status })
        .await
        .map_err(AsError::into_error)?;

    get(Extension(svc), Path(id.to_string())).await
}

/// Deletes the [`FormResponse`] with the provided ID.
///
/// # Errors
///
/// - If the [`FormResponse`] doesn't exist.
/// - If the [`Backend`] fails.
#[tracing::instrument(
    skip_all,
    fields(api.name = "formResponses.delete", id = %id),
)]
pub async fn delete<Svc: Backend>(
    Extension(svc): Extension<Svc>,
    Path(id): Path<String>,
) -> api::Response<FormResponse> {
    let id = api::id(&id, NotFoundError::FormResponse)?;

    svc.execute(command::DeleteFormResponse { id })
        .await
        .map_err(AsError::into_error)
        .map(|response| {
            Success::json(
                read::form_response::Resolved {
                    response,
                    property: None,
                    package: None,
                }
                .into(),
            )
        })
}

impl AsError for command::update_form_response_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::FormResponseNotExists(_) => {
                Some(NotFoundError::FormResponse.into())
            }
        }
    }
}

impl AsError for command::delete_form_response::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::FormResponseNotExists(_) => {
                Some(NotFoundError::FormResponse.into())
            }
        }
    }
}

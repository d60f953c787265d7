//! [`Command`] for submitting a new [`FormResponse`].

use common::{operations::Insert, DateTime};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{InvestmentListing, TourismPackage};
use crate::{
    domain::{
        contact, form_response, investment_listing, tourism_package,
        FormResponse,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for submitting a new [`FormResponse`].
#[derive(Clone, Debug)]
pub struct CreateFormResponse {
    /// [`form_response::Kind`] of the submitted form.
    pub kind: form_response::Kind,

    /// [`contact::Name`] of the submitter.
    pub name: contact::Name,

    /// [`contact::Email`] of the submitter.
    pub email: contact::Email,

    /// [`contact::Phone`] of the submitter.
    pub phone: contact::Phone,

    /// [`contact::Country`] of the submitter.
    pub country: Option<contact::Country>,

    /// [`contact::State`] of the submitter.
    pub state: Option<contact::State>,

    /// [`form_response::Occupation`] of the submitter.
    pub occupation: Option<form_response::Occupation>,

    /// [`form_response::Requirements`] of the submitter.
    pub requirements: Option<form_response::Requirements>,

    /// [`form_response::Message`] of the submitter.
    pub message: Option<form_response::Message>,

    /// ID of the [`InvestmentListing`] of interest.
    pub property_id: Option<investment_listing::Id>,

    /// ID of the [`TourismPackage`] of interest.
    pub package_id: Option<tourism_package::Id>,

    /// Initial [`form_response::Status`], if not
    /// [`form_response::Status::Pending`].
    pub status: Option<form_response::Status>,
}

impl<Db> Command<CreateFormResponse> for Service<Db>
where
    Db: Database<Insert<FormResponse>, Err = Traced<database::Error>> + Sync,
{
    type Ok = FormResponse;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateFormResponse,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateFormResponse {
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
        } = cmd;

        let response = FormResponse {
            id: form_response::Id::new(),
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
            status: status.unwrap_or_default(),
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(response.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(response)
    }
}

/// Error of [`CreateFormResponse`] [`Command`] execution.
pub type ExecutionError = database::Error;

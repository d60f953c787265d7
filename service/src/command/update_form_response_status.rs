//! [`Command`] for changing status of a [`FormResponse`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{form_response, FormResponse},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for changing [`form_response::Status`] of a [`FormResponse`].
#[derive(Clone, Copy, Debug)]
pub struct UpdateFormResponseStatus {
    /// ID of the [`FormResponse`] to be updated.
    pub id: form_response::Id,

    /// New [`form_response::Status`].
    pub status: form_response::Status,
}

impl<Db> Command<UpdateFormResponseStatus> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>> + Sync,
    Transacted<Db>: Database<
            Lock<By<FormResponse, form_response::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<FormResponse>, form_response::Id>>,
            Ok = Option<FormResponse>,
            Err = Traced<database::Error>,
        > + Database<Update<FormResponse>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>
        + Send
        + Sync,
{
    type Ok = FormResponse;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        UpdateFormResponseStatus { id, status }: UpdateFormResponseStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<FormResponse, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut response = tx
            .execute(Select(By::<Option<FormResponse>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::FormResponseNotExists(id))
            .map_err(tracerr::wrap!())?;

        if response.status != status {
            response.status = status;
            tx.execute(Update(response.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(response)
    }
}

/// Error of [`UpdateFormResponseStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`FormResponse`] with the provided ID does not exist.
    #[display("`FormResponse(id: {_0})` does not exist")]
    FormResponseNotExists(#[error(not(source))] form_response::Id),
}

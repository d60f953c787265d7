//! [`Command`] for deleting an [`InvestmentListing`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::FormResponse;
use crate::{
    domain::{investment_listing, InvestmentListing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`InvestmentListing`].
///
/// [`FormResponse`]s referring to the deleted [`InvestmentListing`] are left
/// intact.
#[derive(Clone, Copy, Debug)]
pub struct DeleteInvestmentListing {
    /// ID of the [`InvestmentListing`] to be deleted.
    pub id: investment_listing::Id,
}

impl<Db> Command<DeleteInvestmentListing> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>> + Sync,
    Transacted<Db>: Database<
            Lock<By<InvestmentListing, investment_listing::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<InvestmentListing>, investment_listing::Id>>,
            Ok = Option<InvestmentListing>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<InvestmentListing, investment_listing::Id>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>
        + Send
        + Sync,
{
    type Ok = InvestmentListing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteInvestmentListing { id }: DeleteInvestmentListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<InvestmentListing, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let listing = tx
            .execute(Select(By::<Option<InvestmentListing>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::InvestmentListingNotExists(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::<InvestmentListing, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(listing)
    }
}

/// Error of [`DeleteInvestmentListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`InvestmentListing`] with the provided ID does not exist.
    #[display("`InvestmentListing(id: {_0})` does not exist")]
    InvestmentListingNotExists(#[error(not(source))] investment_listing::Id),
}

//! [`Command`] for editing an existing [`InvestmentListing`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{investment_listing, InvestmentListing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for replacing editable fields of an [`InvestmentListing`].
#[derive(Clone, Debug)]
pub struct UpdateInvestmentListing {
    /// ID of the [`InvestmentListing`] to be edited.
    pub id: investment_listing::Id,

    /// New [`investment_listing::Title`].
    pub title: investment_listing::Title,

    /// New [`investment_listing::Description`].
    pub description: Option<investment_listing::Description>,

    /// New asking [`Price`].
    pub price: Price,

    /// New [`investment_listing::Location`].
    pub location: Option<investment_listing::Location>,

    /// New [`investment_listing::PropertyType`].
    pub property_type: Option<investment_listing::PropertyType>,

    /// New area in square feet.
    pub area_sqft: Option<investment_listing::AreaSqft>,

    /// New [`investment_listing::Status`], if it should be changed.
    pub status: Option<investment_listing::Status>,
}

impl<Db> Command<UpdateInvestmentListing> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>> + Sync,
    Transacted<Db>: Database<
            Lock<By<InvestmentListing, investment_listing::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<InvestmentListing>, investment_listing::Id>>,
            Ok = Option<InvestmentListing>,
            Err = Traced<database::Error>,
        > + Database<Update<InvestmentListing>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>
        + Send
        + Sync,
{
    type Ok = InvestmentListing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateInvestmentListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateInvestmentListing {
            id,
            title,
            description,
            price,
            location,
            property_type,
            area_sqft,
            status,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent edits of the same `InvestmentListing`.
        tx.execute(Lock(By::<InvestmentListing, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut listing = tx
            .execute(Select(By::<Option<InvestmentListing>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::InvestmentListingNotExists(id))
            .map_err(tracerr::wrap!())?;

        listing.title = title;
        listing.description = description;
        listing.price = price;
        listing.location = location;
        listing.property_type = property_type;
        listing.area_sqft = area_sqft;
        if let Some(status) = status {
            listing.status = status;
        }

        tx.execute(Update(listing.clone()))
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

/// Error of [`UpdateInvestmentListing`] [`Command`] execution.
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

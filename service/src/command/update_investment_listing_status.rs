//! [`Command`] for changing availability of an [`InvestmentListing`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{investment_listing, InvestmentListing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for changing [`investment_listing::Status`] of an
/// [`InvestmentListing`].
#[derive(Clone, Copy, Debug)]
pub struct UpdateInvestmentListingStatus {
    /// ID of the [`InvestmentListing`] to be updated.
    pub id: investment_listing::Id,

    /// New [`investment_listing::Status`].
    pub status: investment_listing::Status,
}

impl<Db> Command<UpdateInvestmentListingStatus> for Service<Db>
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
        cmd: UpdateInvestmentListingStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateInvestmentListingStatus { id, status } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

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

        if listing.status != status {
            listing.status = status;
            tx.execute(Update(listing.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(listing)
    }
}

/// Error of [`UpdateInvestmentListingStatus`] [`Command`] execution.
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

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Price;

    use crate::{
        command::{
            CreateInvestmentListing, UpdateInvestmentListing,
            UpdateInvestmentListingStatus,
        },
        domain::investment_listing::{self, Status},
        infra::Memory,
        query, Command as _, Config, Service,
    };

    use super::ExecutionError;

    #[tokio::test]
    async fn changes_only_status() {
        let svc = Service::new(Config::default(), Memory::new());
        let listing = svc
            .execute(CreateInvestmentListing {
                title: investment_listing::Title::new("Sea View Villa")
                    .unwrap(),
                description: None,
                price: Price::from_str("4500000").unwrap(),
                location: investment_listing::Location::new("Alibaug"),
                property_type: investment_listing::PropertyType::new("villa"),
                area_sqft: Some(2400),
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(listing.status, Status::Available);

        let reserved = svc
            .execute(UpdateInvestmentListingStatus {
                id: listing.id,
                status: Status::Reserved,
            })
            .await
            .unwrap();
        assert_eq!(reserved.status, Status::Reserved);
        assert_eq!(reserved.title, listing.title);
        assert_eq!(reserved.area_sqft, Some(2400));

        // Editing keeps the status unless told otherwise.
        let edited = svc
            .execute(UpdateInvestmentListing {
                id: listing.id,
                title: listing.title.clone(),
                description: None,
                price: listing.price,
                location: None,
                property_type: None,
                area_sqft: None,
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(edited.status, Status::Reserved);

        let stored = svc
            .execute(query::investment_listing::ById::by(listing.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, Status::Reserved);
        assert_eq!(stored.location, None);
    }

    #[tokio::test]
    async fn fails_for_absent_listing() {
        let svc = Service::new(Config::default(), Memory::new());

        let err = svc
            .execute(UpdateInvestmentListingStatus {
                id: investment_listing::Id::new(),
                status: Status::Sold,
            })
            .await
            .unwrap_err();
        let err: &ExecutionError = err.as_ref();
        assert!(matches!(err, ExecutionError::InvestmentListingNotExists(_)));
    }
}

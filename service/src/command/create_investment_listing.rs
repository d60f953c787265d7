//! [`Command`] for creating a new [`InvestmentListing`].

use common::{operations::Insert, DateTime, Price};
use tracerr::Traced;

use crate::{
    domain::{investment_listing, InvestmentListing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`InvestmentListing`].
#[derive(Clone, Debug)]
pub struct CreateInvestmentListing {
    /// [`investment_listing::Title`] of a new [`InvestmentListing`].
    pub title: investment_listing::Title,

    /// [`investment_listing::Description`] of a new [`InvestmentListing`].
    pub description: Option<investment_listing::Description>,

    /// Asking [`Price`] of a new [`InvestmentListing`].
    pub price: Price,

    /// [`investment_listing::Location`] of a new [`InvestmentListing`].
    pub location: Option<investment_listing::Location>,

    /// [`investment_listing::PropertyType`] of a new [`InvestmentListing`].
    pub property_type: Option<investment_listing::PropertyType>,

    /// Area in square feet of a new [`InvestmentListing`].
    pub area_sqft: Option<investment_listing::AreaSqft>,

    /// Initial [`investment_listing::Status`], if not
    /// [`investment_listing::Status::Available`].
    pub status: Option<investment_listing::Status>,
}

impl<Db> Command<CreateInvestmentListing> for Service<Db>
where
    Db: Database<Insert<InvestmentListing>, Err = Traced<database::Error>>
        + Sync,
{
    type Ok = InvestmentListing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateInvestmentListing,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateInvestmentListing {
            title,
            description,
            price,
            location,
            property_type,
            area_sqft,
            status,
        } = cmd;

        let listing = InvestmentListing {
            id: investment_listing::Id::new(),
            title,
            description,
            price,
            location,
            property_type,
            area_sqft,
            status: status.unwrap_or(investment_listing::Status::Available),
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(listing.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(listing)
    }
}

/// Error of [`CreateInvestmentListing`] [`Command`] execution.
pub type ExecutionError = database::Error;

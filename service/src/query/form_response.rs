//! [`Query`] collection related to a single [`FormResponse`].

use std::collections::HashMap;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{
        form_response, investment_listing, tourism_package, FormResponse,
        InvestmentListing, TourismPackage,
    },
    infra::{database, Database},
    read::form_response::Resolved,
    Service,
};

use super::{form_responses::resolve, Query};

/// Queries a [`FormResponse`] by its [`form_response::Id`] along with the
/// records it refers to.
#[derive(Clone, Copy, Debug)]
pub struct ById(pub form_response::Id);

impl<Db> Query<ById> for Service<Db>
where
    Db: Database<
            Select<By<Option<FormResponse>, form_response::Id>>,
            Ok = Option<FormResponse>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<
                    HashMap<investment_listing::Id, InvestmentListing>,
                    Vec<investment_listing::Id>,
                >,
            >,
            Ok = HashMap<investment_listing::Id, InvestmentListing>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<
                    HashMap<tourism_package::Id, TourismPackage>,
                    Vec<tourism_package::Id>,
                >,
            >,
            Ok = HashMap<tourism_package::Id, TourismPackage>,
            Err = Traced<database::Error>,
        > + Sync,
{
    type Ok = Option<Resolved>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        ById(id): ById,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(response) = self
            .database()
            .execute(Select(By::<Option<FormResponse>, _>::new(id)))
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        Ok(resolve(self.database(), vec![response]).await?.pop())
    }
}

//! [`Query`] collection related to the multiple [`FormResponse`]s.

use std::collections::{HashMap, HashSet};

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{
        investment_listing, tourism_package, FormResponse, InvestmentListing,
        TourismPackage,
    },
    infra::{database, Database},
    read::{self, form_response::Resolved},
    Service,
};

use super::Query;

/// Queries a list of [`FormResponse`]s, newest first, along with the
/// records they refer to.
#[derive(Clone, Copy, Debug, Default)]
pub struct List {
    /// [`read::form_response::list::Selector`] of the list.
    pub selector: read::form_response::list::Selector,
}

impl<Db> Query<List> for Service<Db>
where
    Db: Database<
            Select<
                By<Vec<FormResponse>, read::form_response::list::Selector>,
            >,
            Ok = Vec<FormResponse>,
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
    type Ok = Vec<Resolved>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        List { selector }: List,
    ) -> Result<Self::Ok, Self::Err> {
        let responses = self
            .database()
            .execute(Select(By::<Vec<FormResponse>, _>::new(selector)))
            .await
            .map_err(tracerr::wrap!())?;

        resolve(self.database(), responses).await
    }
}

/// Queries total count of [`FormResponse`]s passing a filter.
pub type TotalCount = super::DatabaseQuery<
    By<
        read::form_response::list::TotalCount,
        read::form_response::list::Filter,
    >,
>;

/// Resolves the records referred by the provided [`FormResponse`]s in bulk.
///
/// References to the removed records resolve to [`None`].
pub(super) async fn resolve<Db>(
    db: &Db,
    responses: Vec<FormResponse>,
) -> Result<Vec<Resolved>, Traced<database::Error>>
where
    Db: Database<
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
        >,
{
    let property_ids = responses
        .iter()
        .filter_map(|r| r.property_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();
    let package_ids = responses
        .iter()
        .filter_map(|r| r.package_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();

    let properties = db
        .execute(Select(By::<HashMap<_, InvestmentListing>, _>::new(
            property_ids,
        )))
        .await
        .map_err(tracerr::wrap!())?;
    let packages = db
        .execute(Select(By::<HashMap<_, TourismPackage>, _>::new(
            package_ids,
        )))
        .await
        .map_err(tracerr::wrap!())?;

    Ok(responses
        .into_iter()
        .map(|response| Resolved {
            property: response
                .property_id
                .and_then(|id| properties.get(&id).cloned()),
            package: response
                .package_id
                .and_then(|id| packages.get(&id).cloned()),
            response,
        })
        .collect())
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Price;

    use crate::{
        command::{
            CreateFormResponse, CreateTourismPackage, DeleteTourismPackage,
        },
        domain::{contact, form_response, tourism_package},
        infra::Memory,
        query, read, Command as _, Config, Service,
    };

    use super::List;

    fn enquiry(
        kind: form_response::Kind,
        package_id: Option<tourism_package::Id>,
    ) -> CreateFormResponse {
        CreateFormResponse {
            kind,
            name: contact::Name::new("Ravi Kumar").unwrap(),
            email: contact::Email::new("ravi@example.com").unwrap(),
            phone: contact::Phone::new("9876543210").unwrap(),
            country: None,
            state: None,
            occupation: None,
            requirements: None,
            message: form_response::Message::new("Call me back"),
            property_id: None,
            package_id,
            status: None,
        }
    }

    #[tokio::test]
    async fn resolves_references() {
        let svc = Service::new(Config::default(), Memory::new());
        let package = svc
            .execute(CreateTourismPackage {
                title: tourism_package::Title::new("Goa Beaches").unwrap(),
                description: tourism_package::Description::new("Sun")
                    .unwrap(),
                price: Price::from_str("15000").unwrap(),
                location: None,
                duration_days: Some(4),
                itinerary: vec![],
            })
            .await
            .unwrap();
        let dangling = svc
            .execute(CreateTourismPackage {
                title: tourism_package::Title::new("Old Tour").unwrap(),
                description: tourism_package::Description::new("Gone")
                    .unwrap(),
                price: Price::from_str("1000").unwrap(),
                location: None,
                duration_days: None,
                itinerary: vec![],
            })
            .await
            .unwrap();

        let first = svc
            .execute(enquiry(form_response::Kind::Tourism, Some(package.id)))
            .await
            .unwrap();
        let second = svc
            .execute(enquiry(
                form_response::Kind::Tourism,
                Some(dangling.id),
            ))
            .await
            .unwrap();
        _ = svc
            .execute(DeleteTourismPackage { id: dangling.id })
            .await
            .unwrap();

        let resolved = svc
            .execute(query::form_response::ById(first.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.package.map(|p| p.id), Some(package.id));
        assert!(resolved.property.is_none());

        let resolved = svc
            .execute(query::form_response::ById(second.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.response.package_id, Some(dangling.id));
        assert!(resolved.package.is_none());
    }

    #[tokio::test]
    async fn lists_filtered_by_kind() {
        let svc = Service::new(Config::default(), Memory::new());
        for kind in [
            form_response::Kind::General,
            form_response::Kind::Tourism,
            form_response::Kind::General,
        ] {
            _ = svc.execute(enquiry(kind, None)).await.unwrap();
        }

        let list = svc
            .execute(List {
                selector: read::form_response::list::Selector {
                    filter: read::form_response::list::Filter {
                        kind: Some(form_response::Kind::General),
                        status: None,
                    },
                    limit: None,
                },
            })
            .await
            .unwrap();

        assert_eq!(list.len(), 2);
        assert!(list
            .iter()
            .all(|r| r.response.kind == form_response::Kind::General));
    }

    #[tokio::test]
    async fn absent_response_is_none() {
        let svc = Service::new(Config::default(), Memory::new());

        let found = svc
            .execute(query::form_response::ById(form_response::Id::new()))
            .await
            .unwrap();

        assert!(found.is_none());
    }
}

//! [`Command`] for editing an existing [`TourismPackage`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{tourism_package, TourismPackage},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for replacing editable fields of a [`TourismPackage`].
#[derive(Clone, Debug)]
pub struct UpdateTourismPackage {
    /// ID of the [`TourismPackage`] to be edited.
    pub id: tourism_package::Id,

    /// New [`tourism_package::Title`].
    pub title: tourism_package::Title,

    /// New [`tourism_package::Description`].
    pub description: tourism_package::Description,

    /// New [`Price`].
    pub price: Price,

    /// New [`tourism_package::Location`].
    pub location: Option<tourism_package::Location>,

    /// New duration in days.
    pub duration_days: Option<tourism_package::DurationDays>,

    /// New itinerary.
    pub itinerary: Vec<tourism_package::ItineraryItem>,
}

impl<Db> Command<UpdateTourismPackage> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>> + Sync,
    Transacted<Db>: Database<
            Lock<By<TourismPackage, tourism_package::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<TourismPackage>, tourism_package::Id>>,
            Ok = Option<TourismPackage>,
            Err = Traced<database::Error>,
        > + Database<Update<TourismPackage>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>
        + Send
        + Sync,
{
    type Ok = TourismPackage;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateTourismPackage,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateTourismPackage {
            id,
            title,
            description,
            price,
            location,
            duration_days,
            itinerary,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent edits of the same `TourismPackage`.
        tx.execute(Lock(By::<TourismPackage, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut package = tx
            .execute(Select(By::<Option<TourismPackage>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TourismPackageNotExists(id))
            .map_err(tracerr::wrap!())?;

        package.title = title;
        package.description = description;
        package.price = price;
        package.location = location;
        package.duration_days = duration_days;
        package.itinerary = itinerary;

        tx.execute(Update(package.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(package)
    }
}

/// Error of [`UpdateTourismPackage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`TourismPackage`] with the provided ID does not exist.
    #[display("`TourismPackage(id: {_0})` does not exist")]
    TourismPackageNotExists(#[error(not(source))] tourism_package::Id),
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Price;

    use crate::{
        command::{CreateTourismPackage, UpdateTourismPackage},
        domain::tourism_package,
        infra::Memory,
        query, Command as _, Config, Service,
    };

    use super::ExecutionError;

    fn create_cmd() -> CreateTourismPackage {
        CreateTourismPackage {
            title: tourism_package::Title::new("Goa Getaway").unwrap(),
            description: tourism_package::Description::new("Beaches").unwrap(),
            price: Price::from_str("15000").unwrap(),
            location: None,
            duration_days: Some(4),
            itinerary: vec![],
        }
    }

    #[tokio::test]
    async fn replaces_editable_fields() {
        let svc = Service::new(Config::default(), Memory::new());
        let created = svc.execute(create_cmd()).await.unwrap();

        let updated = svc
            .execute(UpdateTourismPackage {
                id: created.id,
                title: tourism_package::Title::new("Goa Escape").unwrap(),
                description: created.description.clone(),
                price: Price::from_str("17500.50").unwrap(),
                location: tourism_package::Location::new("Goa"),
                duration_days: None,
                itinerary: vec![
                    tourism_package::ItineraryItem::new("Arrival").unwrap(),
                ],
            })
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);

        let stored = svc
            .execute(query::tourism_package::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.title.as_ref(), "Goa Escape");
        assert_eq!(stored.price.to_string(), "17500.5");
        assert_eq!(stored.duration_days, None);
        assert_eq!(stored.itinerary.len(), 1);
    }

    #[tokio::test]
    async fn fails_for_absent_package() {
        let svc = Service::new(Config::default(), Memory::new());
        let cmd = create_cmd();

        let err = svc
            .execute(UpdateTourismPackage {
                id: tourism_package::Id::new(),
                title: cmd.title,
                description: cmd.description,
                price: cmd.price,
                location: None,
                duration_days: None,
                itinerary: vec![],
            })
            .await
            .unwrap_err();
        let err: &ExecutionError = err.as_ref();
        assert!(matches!(err, ExecutionError::TourismPackageNotExists(_)));
    }
}

//! [`Command`] for deleting a [`TourismPackage`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Booking, FormResponse};
use crate::{
    domain::{tourism_package, TourismPackage},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`TourismPackage`].
///
/// [`Booking`]s and [`FormResponse`]s referring to the deleted
/// [`TourismPackage`] are left intact.
#[derive(Clone, Copy, Debug)]
pub struct DeleteTourismPackage {
    /// ID of the [`TourismPackage`] to be deleted.
    pub id: tourism_package::Id,
}

impl<Db> Command<DeleteTourismPackage> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>> + Sync,
    Transacted<Db>: Database<
            Lock<By<TourismPackage, tourism_package::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<TourismPackage>, tourism_package::Id>>,
            Ok = Option<TourismPackage>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<TourismPackage, tourism_package::Id>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>
        + Send
        + Sync,
{
    type Ok = TourismPackage;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteTourismPackage { id }: DeleteTourismPackage,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<TourismPackage, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let package = tx
            .execute(Select(By::<Option<TourismPackage>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TourismPackageNotExists(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::<TourismPackage, _>::new(id)))
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

/// Error of [`DeleteTourismPackage`] [`Command`] execution.
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
        command::{CreateTourismPackage, DeleteTourismPackage},
        domain::tourism_package,
        infra::Memory,
        query, Command as _, Config, Service,
    };

    use super::ExecutionError;

    #[tokio::test]
    async fn deletes_once() {
        let svc = Service::new(Config::default(), Memory::new());
        let package = svc
            .execute(CreateTourismPackage {
                title: tourism_package::Title::new("Kerala Backwaters")
                    .unwrap(),
                description: tourism_package::Description::new("Houseboats")
                    .unwrap(),
                price: Price::from_str("22000").unwrap(),
                location: None,
                duration_days: None,
                itinerary: vec![],
            })
            .await
            .unwrap();

        let deleted = svc
            .execute(DeleteTourismPackage { id: package.id })
            .await
            .unwrap();
        assert_eq!(deleted.id, package.id);
        assert!(svc
            .execute(query::tourism_package::ById::by(package.id))
            .await
            .unwrap()
            .is_none());

        let err = svc
            .execute(DeleteTourismPackage { id: package.id })
            .await
            .unwrap_err();
        let err: &ExecutionError = err.as_ref();
        assert!(matches!(err, ExecutionError::TourismPackageNotExists(_)));
    }
}

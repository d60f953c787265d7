//! [`Command`] for creating a new [`TourismPackage`].

use common::{operations::Insert, DateTime, Price};
use tracerr::Traced;

use crate::{
    domain::{tourism_package, TourismPackage},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`TourismPackage`].
#[derive(Clone, Debug)]
pub struct CreateTourismPackage {
    /// [`tourism_package::Title`] of a new [`TourismPackage`].
    pub title: tourism_package::Title,

    /// [`tourism_package::Description`] of a new [`TourismPackage`].
    pub description: tourism_package::Description,

    /// [`Price`] of a new [`TourismPackage`].
    pub price: Price,

    /// [`tourism_package::Location`] of a new [`TourismPackage`].
    pub location: Option<tourism_package::Location>,

    /// Duration in days of a new [`TourismPackage`].
    pub duration_days: Option<tourism_package::DurationDays>,

    /// Itinerary of a new [`TourismPackage`].
    pub itinerary: Vec<tourism_package::ItineraryItem>,
}

impl<Db> Command<CreateTourismPackage> for Service<Db>
where
    Db: Database<Insert<TourismPackage>, Err = Traced<database::Error>> + Sync,
{
    type Ok = TourismPackage;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateTourismPackage,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateTourismPackage {
            title,
            description,
            price,
            location,
            duration_days,
            itinerary,
        } = cmd;

        let package = TourismPackage {
            id: tourism_package::Id::new(),
            title,
            description,
            price,
            location,
            duration_days,
            itinerary,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(package.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(package)
    }
}

/// Error of [`CreateTourismPackage`] [`Command`] execution.
pub type ExecutionError = database::Error;

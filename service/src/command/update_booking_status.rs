//! [`Command`] for changing status of a [`Booking`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{booking, Booking},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for changing [`booking::Status`] of a [`Booking`]
/// (confirming, cancelling or completing it).
#[derive(Clone, Copy, Debug)]
pub struct UpdateBookingStatus {
    /// ID of the [`Booking`] to be updated.
    pub id: booking::Id,

    /// New [`booking::Status`].
    pub status: booking::Status,
}

impl<Db> Command<UpdateBookingStatus> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>> + Sync,
    Transacted<Db>: Database<
            Lock<By<Booking, booking::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<Update<Booking>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>
        + Send
        + Sync,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        UpdateBookingStatus { id, status }: UpdateBookingStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent status transitions of the same `Booking`.
        tx.execute(Lock(By::<Booking, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut booking = tx
            .execute(Select(By::<Option<Booking>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(id))
            .map_err(tracerr::wrap!())?;

        if booking.status != status {
            booking.status = status;
            tx.execute(Update(booking.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(booking)
    }
}

/// Error of [`UpdateBookingStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Booking`] with the provided ID does not exist.
    #[display("`Booking(id: {_0})` does not exist")]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::{
        command::{CreateBooking, UpdateBookingStatus},
        domain::{booking, contact},
        infra::Memory,
        query, Command as _, Config, Service,
    };

    use super::ExecutionError;

    fn create_cmd() -> CreateBooking {
        CreateBooking {
            full_name: contact::Name::new("Asha Rao").unwrap(),
            email: contact::Email::new("asha@example.com").unwrap(),
            phone: contact::Phone::new("+91 98765 43210").unwrap(),
            country: contact::Country::new("India").unwrap(),
            stay: booking::Stay::new(
                Date::parse("2026-11-01").unwrap(),
                Date::parse("2026-11-05").unwrap(),
            )
            .unwrap(),
            occupancy: booking::Occupancy::new(2, 0, 0).unwrap(),
            package_id: None,
            accommodation: booking::Accommodation::new("Beach Hut"),
            rooms: Some(1),
            view: None,
            meal_preference: None,
            special_requirements: vec![],
            status: None,
        }
    }

    #[tokio::test]
    async fn new_booking_is_pending() {
        let svc = Service::new(Config::default(), Memory::new());

        let created = svc.execute(create_cmd()).await.unwrap();

        assert_eq!(created.status, booking::Status::Pending);
    }

    #[tokio::test]
    async fn confirms_booking() {
        let svc = Service::new(Config::default(), Memory::new());
        let created = svc.execute(create_cmd()).await.unwrap();

        let confirmed = svc
            .execute(UpdateBookingStatus {
                id: created.id,
                status: booking::Status::Confirmed,
            })
            .await
            .unwrap();
        assert_eq!(confirmed.status, booking::Status::Confirmed);

        let stored = svc
            .execute(query::booking::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, booking::Status::Confirmed);
        assert_eq!(stored.full_name, created.full_name);
    }

    #[tokio::test]
    async fn fails_for_absent_booking() {
        let svc = Service::new(Config::default(), Memory::new());

        let err = svc
            .execute(UpdateBookingStatus {
                id: booking::Id::new(),
                status: booking::Status::Cancelled,
            })
            .await
            .unwrap_err();
        let err: &ExecutionError = err.as_ref();
        assert!(matches!(err, ExecutionError::BookingNotExists(_)));
    }
}

//! [`Command`] for creating a new [`Booking`].

use common::{operations::Insert, DateTime};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::TourismPackage;
use crate::{
    domain::{booking, contact, tourism_package, Booking},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Booking`] out of a submitted booking
/// form.
#[derive(Clone, Debug)]
pub struct CreateBooking {
    /// Full [`contact::Name`] of the guest.
    pub full_name: contact::Name,

    /// [`contact::Email`] of the guest.
    pub email: contact::Email,

    /// [`contact::Phone`] of the guest.
    pub phone: contact::Phone,

    /// [`contact::Country`] of the guest.
    pub country: contact::Country,

    /// [`booking::Stay`] dates.
    pub stay: booking::Stay,

    /// [`booking::Occupancy`] of the stay.
    pub occupancy: booking::Occupancy,

    /// ID of the [`TourismPackage`] to book, if any.
    pub package_id: Option<tourism_package::Id>,

    /// Chosen [`booking::Accommodation`], if any.
    pub accommodation: Option<booking::Accommodation>,

    /// Number of rooms, if specified.
    pub rooms: Option<booking::Rooms>,

    /// Preferred [`booking::View`], if any.
    pub view: Option<booking::View>,

    /// Preferred [`booking::MealPreference`], if any.
    pub meal_preference: Option<booking::MealPreference>,

    /// [`booking::SpecialRequirement`]s of the guest.
    pub special_requirements: Vec<booking::SpecialRequirement>,

    /// Initial [`booking::Status`], if not [`booking::Status::Pending`].
    pub status: Option<booking::Status>,
}

impl<Db> Command<CreateBooking> for Service<Db>
where
    Db: Database<Insert<Booking>, Err = Traced<database::Error>> + Sync,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateBooking) -> Result<Self::Ok, Self::Err> {
        let CreateBooking {
            full_name,
            email,
            phone,
            country,
            stay,
            occupancy,
            package_id,
            accommodation,
            rooms,
            view,
            meal_preference,
            special_requirements,
            status,
        } = cmd;

        let booking = Booking {
            id: booking::Id::new(),
            full_name,
            email,
            phone,
            country,
            stay,
            occupancy,
            package_id,
            accommodation,
            rooms,
            view,
            meal_preference,
            special_requirements,
            status: status.unwrap_or_default(),
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(booking.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(booking)
    }
}

/// Error of [`CreateBooking`] [`Command`] execution.
pub type ExecutionError = database::Error;

//! [`Query`] of the dashboard [`read::dashboard::Stats`].

use std::collections::{HashMap, HashSet};

use common::{
    operations::{By, Select},
    Date, DateTime, Price,
};
use derive_more::{Display, Error, From};
use smart_default::SmartDefault;
use tracerr::Traced;

use crate::{
    domain::{
        booking, form_response, tourism_package, Booking, InvestmentListing,
        TourismPackage,
    },
    infra::{database, Database},
    read::{
        self,
        dashboard::{RecentBooking, Stats as Output},
    },
    Service,
};

use super::Query;

/// Configuration of the dashboard [`Stats`] [`Query`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Number of the recent [`Booking`]s and [`InvestmentListing`]s to show.
    #[default(5)]
    pub recent_limit: usize,
}

/// Queries [`read::dashboard::Stats`] as of the provided day.
#[derive(Clone, Copy, Debug)]
pub struct Stats {
    /// Day whose calendar month the revenue is computed for.
    pub today: Date,
}

impl Stats {
    /// Creates a new [`Stats`] [`Query`] as of the current UTC day.
    #[must_use]
    pub fn now() -> Self {
        Self {
            today: DateTime::now().date(),
        }
    }
}

impl<Db> Query<Stats> for Service<Db>
where
    Db: Database<
            Select<By<read::tourism_package::list::TotalCount, ()>>,
            Ok = read::tourism_package::list::TotalCount,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<
                    read::investment_listing::list::TotalCount,
                    read::investment_listing::list::Filter,
                >,
            >,
            Ok = read::investment_listing::list::TotalCount,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<
                    read::booking::list::TotalCount,
                    read::booking::list::Filter,
                >,
            >,
            Ok = read::booking::list::TotalCount,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<
                    read::form_response::list::TotalCount,
                    read::form_response::list::Filter,
                >,
            >,
            Ok = read::form_response::list::TotalCount,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Booking>, read::booking::list::Selector>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<
                    Vec<InvestmentListing>,
                    read::investment_listing::list::Selector,
                >,
            >,
            Ok = Vec<InvestmentListing>,
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
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    #[expect(clippy::too_many_lines, reason = "still readable")]
    async fn execute(
        &self,
        Stats { today }: Stats,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let db = self.database();
        let limit = Some(self.config().dashboard.recent_limit);

        let total_tourism_packages = db
            .execute(Select(
                By::<read::tourism_package::list::TotalCount, _>::new(()),
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let total_investments = db
            .execute(Select(By::<
                read::investment_listing::list::TotalCount,
                _,
            >::new(
                read::investment_listing::list::Filter::default(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let total_bookings = db
            .execute(Select(By::<read::booking::list::TotalCount, _>::new(
                read::booking::list::Filter::default(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let total_form_responses = db
            .execute(Select(By::<
                read::form_response::list::TotalCount,
                _,
            >::new(
                read::form_response::list::Filter::default(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let pending_bookings = db
            .execute(Select(By::<read::booking::list::TotalCount, _>::new(
                read::booking::list::Filter {
                    status: Some(booking::Status::Pending),
                },
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let pending_responses = db
            .execute(Select(By::<
                read::form_response::list::TotalCount,
                _,
            >::new(
                read::form_response::list::Filter {
                    kind: None,
                    status: Some(form_response::Status::Pending),
                },
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let recent_bookings = db
            .execute(Select(By::<Vec<Booking>, _>::new(
                read::booking::list::Selector {
                    filter: read::booking::list::Filter::default(),
                    limit,
                },
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let recent_investments = db
            .execute(Select(By::<Vec<InvestmentListing>, _>::new(
                read::investment_listing::list::Selector {
                    filter: read::investment_listing::list::Filter::default(),
                    limit,
                },
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let confirmed_this_month = db
            .execute(Select(By::<Vec<Booking>, _>::new(
                read::booking::list::Selector {
                    filter: read::booking::list::Filter {
                        status: Some(booking::Status::Confirmed),
                    },
                    limit: None,
                },
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .into_iter()
            .filter(|b| b.stay.check_in().same_month_as(&today))
            .collect::<Vec<_>>();

        let package_ids = recent_bookings
            .iter()
            .chain(&confirmed_this_month)
            .filter_map(|b| b.package_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let packages = db
            .execute(Select(By::<HashMap<_, TourismPackage>, _>::new(
                package_ids,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Dangling package references contribute nothing.
        let monthly_revenue = Price::checked_sum(
            confirmed_this_month
                .iter()
                .filter_map(|b| b.package_id.and_then(|id| packages.get(&id)))
                .map(|p| p.price),
        )
        .ok_or(E::RevenueOverflow)
        .map_err(tracerr::wrap!())?;

        Ok(Output {
            total_bookings: total_bookings.into(),
            total_investments: total_investments.into(),
            total_tourism_packages: total_tourism_packages.into(),
            total_form_responses: total_form_responses.into(),
            recent_bookings: recent_bookings
                .into_iter()
                .map(|booking| RecentBooking {
                    package: booking
                        .package_id
                        .and_then(|id| packages.get(&id).cloned()),
                    booking,
                })
                .collect(),
            recent_investments,
            monthly_revenue,
            pending_approvals: u64::from(pending_bookings)
                + u64::from(pending_responses),
        })
    }
}

/// Error of [`Stats`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Monthly revenue exceeds the representable [`Price`].
    #[display("monthly revenue overflowed")]
    RevenueOverflow,

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{Date, Price};

    use crate::{
        command::{
            CreateBooking, CreateFormResponse, CreateInvestmentListing,
            CreateTourismPackage, DeleteTourismPackage, UpdateBookingStatus,
        },
        domain::{
            booking, contact, form_response, investment_listing,
            tourism_package,
        },
        infra::Memory,
        read::dashboard::RecentBooking,
        Command as _, Config, Service,
    };

    use super::{ExecutionError, Stats};

    fn today() -> Date {
        Date::parse("2026-10-18").unwrap()
    }

    fn package(title: &str, price: &str) -> CreateTourismPackage {
        CreateTourismPackage {
            title: tourism_package::Title::new(title).unwrap(),
            description: tourism_package::Description::new("Tour").unwrap(),
            price: Price::from_str(price).unwrap(),
            location: None,
            duration_days: None,
            itinerary: vec![],
        }
    }

    fn booking(
        package_id: Option<tourism_package::Id>,
        check_in: &str,
        check_out: &str,
    ) -> CreateBooking {
        CreateBooking {
            full_name: contact::Name::new("Meera Nair").unwrap(),
            email: contact::Email::new("meera@example.com").unwrap(),
            phone: contact::Phone::new("+91 98470 12345").unwrap(),
            country: contact::Country::new("India").unwrap(),
            stay: booking::Stay::new(
                Date::parse(check_in).unwrap(),
                Date::parse(check_out).unwrap(),
            )
            .unwrap(),
            occupancy: booking::Occupancy::new(2, 1, 0).unwrap(),
            package_id,
            accommodation: None,
            rooms: None,
            view: None,
            meal_preference: None,
            special_requirements: vec![],
            status: None,
        }
    }

    #[tokio::test]
    async fn empty_database_yields_zeros() {
        let svc = Service::new(Config::default(), Memory::new());

        let stats = svc.execute(Stats { today: today() }).await.unwrap();

        assert_eq!(stats.total_bookings, 0);
        assert_eq!(stats.total_investments, 0);
        assert_eq!(stats.total_tourism_packages, 0);
        assert_eq!(stats.total_form_responses, 0);
        assert!(stats.recent_bookings.is_empty());
        assert!(stats.recent_investments.is_empty());
        assert_eq!(stats.monthly_revenue, Price::ZERO);
        assert_eq!(stats.pending_approvals, 0);
    }

    #[tokio::test]
    async fn sums_confirmed_bookings_of_current_month() {
        let svc = Service::new(Config::default(), Memory::new());
        let munnar = svc.execute(package("Munnar", "12000")).await.unwrap();
        let coorg = svc.execute(package("Coorg", "8000.50")).await.unwrap();
        let gone = svc.execute(package("Gone", "99999")).await.unwrap();

        for (package_id, check_in, check_out, confirm) in [
            (Some(munnar.id), "2026-10-20", "2026-10-22", true),
            (Some(coorg.id), "2026-10-02", "2026-10-04", true),
            (Some(munnar.id), "2026-10-25", "2026-10-27", false),
            (Some(munnar.id), "2026-11-01", "2026-11-03", true),
            (Some(gone.id), "2026-10-10", "2026-10-12", true),
            (None, "2026-10-11", "2026-10-12", true),
        ] {
            let created = svc
                .execute(booking(package_id, check_in, check_out))
                .await
                .unwrap();
            if confirm {
                _ = svc
                    .execute(UpdateBookingStatus {
                        id: created.id,
                        status: booking::Status::Confirmed,
                    })
                    .await
                    .unwrap();
            }
        }
        _ = svc
            .execute(DeleteTourismPackage { id: gone.id })
            .await
            .unwrap();

        let stats = svc.execute(Stats { today: today() }).await.unwrap();

        assert_eq!(stats.monthly_revenue, Price::from_str("20000.5").unwrap());
        assert_eq!(stats.total_bookings, 6);
        assert_eq!(stats.total_tourism_packages, 2);
        assert_eq!(stats.pending_approvals, 1);
    }

    #[tokio::test]
    async fn shows_recent_items_newest_first() {
        let svc = Service::new(Config::default(), Memory::new());
        let tour = svc.execute(package("Hampi", "5000")).await.unwrap();
        for i in 0..7 {
            _ = svc
                .execute(CreateInvestmentListing {
                    title: investment_listing::Title::new(format!(
                        "Plot {i}"
                    ))
                    .unwrap(),
                    description: None,
                    price: Price::from_str("1000000").unwrap(),
                    location: None,
                    property_type: None,
                    area_sqft: Some(1200),
                    status: None,
                })
                .await
                .unwrap();
        }
        let first = svc
            .execute(booking(None, "2026-12-01", "2026-12-02"))
            .await
            .unwrap();
        let last = svc
            .execute(booking(Some(tour.id), "2026-12-03", "2026-12-05"))
            .await
            .unwrap();
        _ = svc
            .execute(CreateFormResponse {
                kind: form_response::Kind::General,
                name: contact::Name::new("Kiran").unwrap(),
                email: contact::Email::new("kiran@example.com").unwrap(),
                phone: contact::Phone::new("9123456780").unwrap(),
                country: None,
                state: None,
                occupation: None,
                requirements: None,
                message: None,
                property_id: None,
                package_id: None,
                status: None,
            })
            .await
            .unwrap();

        let stats = svc.execute(Stats { today: today() }).await.unwrap();

        assert_eq!(stats.total_investments, 7);
        assert_eq!(stats.recent_investments.len(), 5);
        assert_eq!(stats.recent_investments[0].title.to_string(), "Plot 6");
        assert_eq!(stats.recent_bookings.len(), 2);
        assert_eq!(stats.recent_bookings[0].booking.id, last.id);
        assert_eq!(stats.recent_bookings[0].package_name(), "Hampi");
        assert_eq!(stats.recent_bookings[1].booking.id, first.id);
        assert_eq!(
            stats.recent_bookings[1].package_name(),
            RecentBooking::NO_NAME,
        );
        assert_eq!(stats.total_form_responses, 1);
        assert_eq!(stats.pending_approvals, 3);
    }

    #[tokio::test]
    async fn revenue_overflow_is_error() {
        let svc = Service::new(Config::default(), Memory::new());
        // Largest representable amount.
        let island = svc
            .execute(package("Island", "79228162514264337593543950335"))
            .await
            .unwrap();

        for check_in in ["2026-10-01", "2026-10-08"] {
            let created = svc
                .execute(booking(Some(island.id), check_in, "2026-10-30"))
                .await
                .unwrap();
            _ = svc
                .execute(UpdateBookingStatus {
                    id: created.id,
                    status: booking::Status::Confirmed,
                })
                .await
                .unwrap();
        }

        let err = svc.execute(Stats { today: today() }).await.unwrap_err();

        let err: &ExecutionError = err.as_ref();
        assert!(matches!(err, ExecutionError::RevenueOverflow));
    }
}

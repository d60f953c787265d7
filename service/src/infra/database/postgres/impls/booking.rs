//! [`Booking`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{booking, Booking},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of the `bookings` table.
const COLUMNS: &str = "\
    id, full_name, email, phone, country, \
    check_in, check_out, adults, children, infants, \
    package_id, accommodation, rooms, view, meal_preference, \
    special_requirements, status, created_at";

/// Reads a non-negative count from the provided [`Row`] `column`.
fn count(row: &Row, column: &str) -> u16 {
    u16::try_from(row.get::<_, i32>(column))
        .unwrap_or_else(|_| panic!("`{column}` overflow"))
}

/// Builds a [`Booking`] out of the provided [`Row`].
fn from_row(row: &Row) -> Booking {
    Booking {
        id: row.get("id"),
        full_name: row.get("full_name"),
        email: row.get("email"),
        phone: row.get("phone"),
        country: row.get("country"),
        stay: booking::Stay::new(row.get("check_in"), row.get("check_out"))
            .expect("`check_out` goes after `check_in`"),
        occupancy: booking::Occupancy::new(
            count(row, "adults"),
            count(row, "children"),
            count(row, "infants"),
        )
        .expect("at least one adult"),
        package_id: row.get("package_id"),
        accommodation: row.get("accommodation"),
        rooms: row
            .get::<_, Option<i32>>("rooms")
            .map(u16::try_from)
            .transpose()
            .expect("`rooms` overflow"),
        view: row.get("view"),
        meal_preference: row.get("meal_preference"),
        special_requirements: row.get("special_requirements"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

impl<C, IDs> Database<Select<By<HashMap<booking::Id, Booking>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[booking::Id]> + Send,
{
    type Ok = HashMap<booking::Id, Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<booking::Id, Booking>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[booking::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM bookings \
             WHERE id = ANY($1::UUID[])"
        );
        Ok(self
            .query(&sql, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .map(|b| (b.id, b))
            .collect())
    }
}

impl<C> Database<Select<By<Option<Booking>, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::<HashMap<_, Booking>, _>::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C>
    Database<Select<By<Vec<Booking>, read::booking::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Booking>, read::booking::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::booking::list::Selector {
            filter: read::booking::list::Filter { status },
            limit,
        } = by.into_inner();
        let limit = limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM bookings \
             WHERE ($1::INT2 IS NULL OR status = $1::INT2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2::INT8"
        );
        Ok(self
            .query(&sql, &[&status, &limit])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C>
    Database<
        Select<
            By<read::booking::list::TotalCount, read::booking::list::Filter>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::booking::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::booking::list::TotalCount, read::booking::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::booking::list::Filter { status } = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM bookings \
            WHERE ($1::INT2 IS NULL OR status = $1::INT2)";
        self.query_opt(SQL, &[&status])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map_or(0, |r| r.get::<_, i64>(0).unsigned_abs()).into()
            })
    }
}

impl<C> Database<Insert<Booking>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(booking)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Booking>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(booking): Update<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        let Booking {
            id,
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
            created_at,
        } = booking;

        let (check_in, check_out) = (stay.check_in(), stay.check_out());
        let adults = i32::from(occupancy.adults());
        let children = i32::from(occupancy.children());
        let infants = i32::from(occupancy.infants());
        let rooms = rooms.map(i32::from);

        const SQL: &str = "\
            INSERT INTO bookings (\
                id, full_name, email, phone, country, \
                check_in, check_out, adults, children, infants, \
                package_id, accommodation, rooms, view, meal_preference, \
                special_requirements, status, created_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, $5::VARCHAR, \
                $6::DATE, $7::DATE, $8::INT4, $9::INT4, $10::INT4, \
                $11::UUID, $12::VARCHAR, $13::INT4, $14::VARCHAR, \
                $15::VARCHAR, \
                $16::VARCHAR[], $17::INT2, $18::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET full_name = EXCLUDED.full_name, \
                email = EXCLUDED.email, \
                phone = EXCLUDED.phone, \
                country = EXCLUDED.country, \
                check_in = EXCLUDED.check_in, \
                check_out = EXCLUDED.check_out, \
                adults = EXCLUDED.adults, \
                children = EXCLUDED.children, \
                infants = EXCLUDED.infants, \
                package_id = EXCLUDED.package_id, \
                accommodation = EXCLUDED.accommodation, \
                rooms = EXCLUDED.rooms, \
                view = EXCLUDED.view, \
                meal_preference = EXCLUDED.meal_preference, \
                special_requirements = EXCLUDED.special_requirements, \
                status = EXCLUDED.status";
        self.exec(
            SQL,
            &[
                &id,
                &full_name,
                &email,
                &phone,
                &country,
                &check_in,
                &check_out,
                &adults,
                &children,
                &infants,
                &package_id,
                &accommodation,
                &rooms,
                &view,
                &meal_preference,
                &special_requirements,
                &status,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Booking, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Booking, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: booking::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM bookings \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

//! [`TourismPackage`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{tourism_package, TourismPackage},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of the `tourism_packages` table.
const COLUMNS: &str = "\
    id, title, description, price, location, duration_days, itinerary, \
    created_at";

/// Builds a [`TourismPackage`] out of the provided [`Row`].
fn from_row(row: &Row) -> TourismPackage {
    TourismPackage {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        price: row.get("price"),
        location: row.get("location"),
        duration_days: row
            .get::<_, Option<i32>>("duration_days")
            .map(u16::try_from)
            .transpose()
            .expect("`duration_days` overflow"),
        itinerary: row.get("itinerary"),
        created_at: row.get("created_at"),
    }
}

impl<C, IDs>
    Database<Select<By<HashMap<tourism_package::Id, TourismPackage>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[tourism_package::Id]> + Send,
{
    type Ok = HashMap<tourism_package::Id, TourismPackage>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<HashMap<tourism_package::Id, TourismPackage>, IDs>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[tourism_package::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM tourism_packages \
             WHERE id = ANY($1::UUID[])"
        );
        Ok(self
            .query(&sql, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .map(|p| (p.id, p))
            .collect())
    }
}

impl<C> Database<Select<By<Option<TourismPackage>, tourism_package::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<TourismPackage>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<TourismPackage>, tourism_package::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::<HashMap<_, TourismPackage>, _>::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C>
    Database<
        Select<
            By<Vec<TourismPackage>, read::tourism_package::list::Selector>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<TourismPackage>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<TourismPackage>, read::tourism_package::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::tourism_package::list::Selector { limit } = by.into_inner();
        let limit = limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM tourism_packages \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1::INT8"
        );
        Ok(self
            .query(&sql, &[&limit])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<read::tourism_package::list::TotalCount, ()>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::tourism_package::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<read::tourism_package::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM tourism_packages";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map_or(0, |r| r.get::<_, i64>(0).unsigned_abs()).into()
            })
    }
}

impl<C> Database<Insert<TourismPackage>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(package): Insert<TourismPackage>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(package)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<TourismPackage>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(package): Update<TourismPackage>,
    ) -> Result<Self::Ok, Self::Err> {
        let TourismPackage {
            id,
            title,
            description,
            price,
            location,
            duration_days,
            itinerary,
            created_at,
        } = package;

        let duration_days = duration_days.map(i32::from);

        const SQL: &str = "\
            INSERT INTO tourism_packages (\
                id, title, description, price, \
                location, duration_days, itinerary, \
                created_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::NUMERIC, \
                $5::VARCHAR, $6::INT4, $7::VARCHAR[], \
                $8::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET title = EXCLUDED.title, \
                description = EXCLUDED.description, \
                price = EXCLUDED.price, \
                location = EXCLUDED.location, \
                duration_days = EXCLUDED.duration_days, \
                itinerary = EXCLUDED.itinerary";
        self.exec(
            SQL,
            &[
                &id,
                &title,
                &description,
                &price,
                &location,
                &duration_days,
                &itinerary,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<TourismPackage, tourism_package::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<TourismPackage, tourism_package::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: tourism_package::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM tourism_packages \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<TourismPackage, tourism_package::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<TourismPackage, tourism_package::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: tourism_package::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM tourism_packages \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

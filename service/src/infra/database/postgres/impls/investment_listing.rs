//! [`InvestmentListing`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{investment_listing, InvestmentListing},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of the `investment_listings` table.
const COLUMNS: &str = "\
    id, title, description, price, location, property_type, area_sqft, \
    status, created_at";

/// Builds a [`InvestmentListing`] out of the provided [`Row`].
fn from_row(row: &Row) -> InvestmentListing {
    InvestmentListing {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        price: row.get("price"),
        location: row.get("location"),
        property_type: row.get("property_type"),
        area_sqft: row
            .get::<_, Option<i64>>("area_sqft")
            .map(u32::try_from)
            .transpose()
            .expect("`area_sqft` overflow"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

impl<C, IDs>
    Database<
        Select<By<HashMap<investment_listing::Id, InvestmentListing>, IDs>>,
    > for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[investment_listing::Id]> + Send,
{
    type Ok = HashMap<investment_listing::Id, InvestmentListing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<HashMap<investment_listing::Id, InvestmentListing>, IDs>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[investment_listing::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM investment_listings \
             WHERE id = ANY($1::UUID[])"
        );
        Ok(self
            .query(&sql, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .map(|l| (l.id, l))
            .collect())
    }
}

impl<C>
    Database<Select<By<Option<InvestmentListing>, investment_listing::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<InvestmentListing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<InvestmentListing>, investment_listing::Id>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::<HashMap<_, InvestmentListing>, _>::new([
                id,
            ])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C>
    Database<
        Select<
            By<
                Vec<InvestmentListing>,
                read::investment_listing::list::Selector,
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<InvestmentListing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                Vec<InvestmentListing>,
                read::investment_listing::list::Selector,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::investment_listing::list::Selector {
            filter: read::investment_listing::list::Filter { status },
            limit,
        } = by.into_inner();
        let limit = limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM investment_listings \
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
            By<
                read::investment_listing::list::TotalCount,
                read::investment_listing::list::Filter,
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::investment_listing::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                read::investment_listing::list::TotalCount,
                read::investment_listing::list::Filter,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::investment_listing::list::Filter { status } =
            by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM investment_listings \
            WHERE ($1::INT2 IS NULL OR status = $1::INT2)";
        self.query_opt(SQL, &[&status])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map_or(0, |r| r.get::<_, i64>(0).unsigned_abs()).into()
            })
    }
}

impl<C> Database<Insert<InvestmentListing>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<InvestmentListing>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(listing)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<InvestmentListing>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(listing): Update<InvestmentListing>,
    ) -> Result<Self::Ok, Self::Err> {
        let InvestmentListing {
            id,
            title,
            description,
            price,
            location,
            property_type,
            area_sqft,
            status,
            created_at,
        } = listing;

        let area_sqft = area_sqft.map(i64::from);

        const SQL: &str = "\
            INSERT INTO investment_listings (\
                id, title, description, price, \
                location, property_type, area_sqft, \
                status, created_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::NUMERIC, \
                $5::VARCHAR, $6::VARCHAR, $7::INT8, \
                $8::INT2, $9::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET title = EXCLUDED.title, \
                description = EXCLUDED.description, \
                price = EXCLUDED.price, \
                location = EXCLUDED.location, \
                property_type = EXCLUDED.property_type, \
                area_sqft = EXCLUDED.area_sqft, \
                status = EXCLUDED.status";
        self.exec(
            SQL,
            &[
                &id,
                &title,
                &description,
                &price,
                &location,
                &property_type,
                &area_sqft,
                &status,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<InvestmentListing, investment_listing::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<InvestmentListing, investment_listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: investment_listing::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM investment_listings \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<InvestmentListing, investment_listing::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<InvestmentListing, investment_listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: investment_listing::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM investment_listings \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

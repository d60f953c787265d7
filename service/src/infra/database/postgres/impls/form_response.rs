//! [`FormResponse`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{form_response, FormResponse},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of the `form_responses` table.
const COLUMNS: &str = "\
    id, kind, name, email, phone, country, state, occupation, \
    requirements, message, property_id, package_id, status, created_at";

/// Builds a [`FormResponse`] out of the provided [`Row`].
fn from_row(row: &Row) -> FormResponse {
    FormResponse {
        id: row.get("id"),
        kind: row.get("kind"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        country: row.get("country"),
        state: row.get("state"),
        occupation: row.get("occupation"),
        requirements: row.get("requirements"),
        message: row.get("message"),
        property_id: row.get("property_id"),
        package_id: row.get("package_id"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

impl<C, IDs>
    Database<Select<By<HashMap<form_response::Id, FormResponse>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[form_response::Id]> + Send,
{
    type Ok = HashMap<form_response::Id, FormResponse>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<HashMap<form_response::Id, FormResponse>, IDs>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[form_response::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM form_responses \
             WHERE id = ANY($1::UUID[])"
        );
        Ok(self
            .query(&sql, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .map(|r| (r.id, r))
            .collect())
    }
}

impl<C> Database<Select<By<Option<FormResponse>, form_response::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<FormResponse>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<FormResponse>, form_response::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::<HashMap<_, FormResponse>, _>::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C>
    Database<
        Select<By<Vec<FormResponse>, read::form_response::list::Selector>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<FormResponse>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<FormResponse>, read::form_response::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::form_response::list::Selector {
            filter: read::form_response::list::Filter { kind, status },
            limit,
        } = by.into_inner();
        let limit = limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM form_responses \
             WHERE ($1::INT2 IS NULL OR kind = $1::INT2) \
               AND ($2::INT2 IS NULL OR status = $2::INT2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3::INT8"
        );
        Ok(self
            .query(&sql, &[&kind, &status, &limit])
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
                read::form_response::list::TotalCount,
                read::form_response::list::Filter,
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::form_response::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                read::form_response::list::TotalCount,
                read::form_response::list::Filter,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::form_response::list::Filter { kind, status } =
            by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM form_responses \
            WHERE ($1::INT2 IS NULL OR kind = $1::INT2) \
              AND ($2::INT2 IS NULL OR status = $2::INT2)";
        self.query_opt(SQL, &[&kind, &status])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map_or(0, |r| r.get::<_, i64>(0).unsigned_abs()).into()
            })
    }
}

impl<C> Database<Insert<FormResponse>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(response): Insert<FormResponse>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(response)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<FormResponse>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(response): Update<FormResponse>,
    ) -> Result<Self::Ok, Self::Err> {
        let FormResponse {
            id,
            kind,
            name,
            email,
            phone,
            country,
            state,
            occupation,
            requirements,
            message,
            property_id,
            package_id,
            status,
            created_at,
        } = response;

        const SQL: &str = "\
            INSERT INTO form_responses (\
                id, kind, name, email, phone, \
                country, state, occupation, requirements, message, \
                property_id, package_id, status, created_at \
            ) VALUES (\
                $1::UUID, $2::INT2, $3::VARCHAR, $4::VARCHAR, $5::VARCHAR, \
                $6::VARCHAR, $7::VARCHAR, $8::VARCHAR, $9::VARCHAR, \
                $10::VARCHAR, \
                $11::UUID, $12::UUID, $13::INT2, $14::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET kind = EXCLUDED.kind, \
                name = EXCLUDED.name, \
                email = EXCLUDED.email, \
                phone = EXCLUDED.phone, \
                country = EXCLUDED.country, \
                state = EXCLUDED.state, \
                occupation = EXCLUDED.occupation, \
                requirements = EXCLUDED.requirements, \
                message = EXCLUDED.message, \
                property_id = EXCLUDED.property_id, \
                package_id = EXCLUDED.package_id, \
                status = EXCLUDED.status";
        self.exec(
            SQL,
            &[
                &id,
                &kind,
                &name,
                &email,
                &phone,
                &country,
                &state,
                &occupation,
                &requirements,
                &message,
                &property_id,
                &package_id,
                &status,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<FormResponse, form_response::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<FormResponse, form_response::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: form_response::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM form_responses \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<FormResponse, form_response::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<FormResponse, form_response::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: form_response::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM form_responses \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

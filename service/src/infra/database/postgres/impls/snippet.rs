//! [`Snippet`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{snippet, Snippet},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Reconstructs a [`Snippet`] from the provided [`Row`].
fn from_row(row: &Row) -> Snippet {
    Snippet {
        id: row.get("id"),
        kind: row.get("kind"),
        title: row.get("title"),
        body: row.get("body"),
        created_at: row.get("created_at"),
        deleted_at: row.get("deleted_at"),
    }
}

impl<C> Database<Select<By<Option<Snippet>, snippet::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Snippet>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Snippet>, snippet::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: snippet::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, kind, title, body, created_at, deleted_at \
            FROM snippets \
            WHERE id = $1::UUID \
              AND deleted_at IS NULL \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Snippet>, Option<snippet::Kind>>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Snippet>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Snippet>, Option<snippet::Kind>>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let kind: Option<snippet::Kind> = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let kind_idx = kind.as_ref().map(|k| {
            ps.push(k);
            ps.len()
        });

        let sql = format!(
            "SELECT id, kind, title, body, created_at, deleted_at \
             FROM snippets \
             WHERE deleted_at IS NULL \
                   {kind_filtering} \
             ORDER BY title ASC",
            kind_filtering = kind_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND kind = ${idx}::INT2"))
            }),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Snippet>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Snippet>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(snippet): Insert<Snippet>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(snippet)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Snippet>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(snippet): Update<Snippet>,
    ) -> Result<Self::Ok, Self::Err> {
        let Snippet {
            id,
            kind,
            title,
            body,
            created_at,
            deleted_at,
        } = snippet;

        const SQL: &str = "\
            INSERT INTO snippets (\
                id, kind, title, body, created_at, deleted_at\
            ) \
            VALUES (\
                $1::UUID, $2::INT2, \
                $3::VARCHAR, $4::VARCHAR, \
                $5::TIMESTAMPTZ, $6::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET kind = EXCLUDED.kind, \
                title = EXCLUDED.title, \
                body = EXCLUDED.body, \
                deleted_at = EXCLUDED.deleted_at";
        self.exec(SQL, &[&id, &kind, &title, &body, &created_at, &deleted_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

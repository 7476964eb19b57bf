//! [`Case`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Insert, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::{Json, ToSql};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{case, Case},
    infra::{
        database::{
            self,
            postgres::{Connection, FuzzPattern},
            Postgres,
        },
        Database,
    },
    read,
};

/// Columns of the `cases` table, in the order [`from_row`] expects them.
const COLUMNS: &str = "\
    id, number, \
    buyer, buyer_phone, \
    seller, seller_phone, \
    city, status, tax_kind, cancellation, \
    notes, checklist, owner, \
    created_at, updated_at";

/// Reconstructs a [`Case`] from the provided [`Row`].
fn from_row(row: &Row) -> Case {
    Case {
        id: row.get("id"),
        number: row.get("number"),
        buyer: case::Party {
            name: row.get("buyer"),
            phone: row.get("buyer_phone"),
        },
        seller: case::Party {
            name: row.get("seller"),
            phone: row.get("seller_phone"),
        },
        city: row.get("city"),
        status: row.get("status"),
        tax_kind: row.get("tax_kind"),
        cancellation: row.get("cancellation"),
        notes: row.get("notes"),
        checklist: row.get::<_, Json<case::Checklist>>("checklist").0,
        owner: row.get("owner"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C, IDs> Database<Select<By<HashMap<case::Id, Case>, IDs>>> for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[case::Id]>,
{
    type Ok = HashMap<case::Id, Case>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<case::Id, Case>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[case::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = i32::try_from(ids.len()).unwrap();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM cases \
             WHERE id IN (SELECT unnest($1::UUID[]) LIMIT $2::INT4) \
             LIMIT $2::INT4",
        );
        Ok(self
            .query(&sql, &[&ids, &limit])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| {
                let case = from_row(row);
                (case.id, case)
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<Case>, case::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<case::Id, Case>, [case::Id; 1]>>,
        Ok = HashMap<case::Id, Case>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Case>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Case>, case::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Select<By<Option<Case>, case::Number>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Option<Case>, case::Id>>,
        Ok = Option<Case>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Case>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Case>, case::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let number: case::Number = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM cases \
            WHERE number = $1::VARCHAR \
            LIMIT 1";
        let Some(row) = self
            .query_opt(SQL, &[&number])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        self.execute(Select(By::new(row.get::<_, case::Id>("id"))))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Case>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Case>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(case): Insert<Case>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(case)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Case>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(case): Update<Case>,
    ) -> Result<Self::Ok, Self::Err> {
        let Case {
            id,
            number,
            buyer,
            seller,
            city,
            status,
            tax_kind,
            cancellation,
            notes,
            checklist,
            owner,
            created_at,
            updated_at,
        } = case;

        let checklist = Json(checklist);

        const SQL: &str = "\
            INSERT INTO cases (\
                id, number, \
                buyer, buyer_phone, \
                seller, seller_phone, \
                city, status, tax_kind, cancellation, \
                notes, checklist, owner, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, \
                $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, \
                $7::VARCHAR, $8::INT2, $9::INT2, $10::INT2, \
                $11::VARCHAR, $12::JSONB, $13::UUID, \
                $14::TIMESTAMPTZ, $15::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET number = EXCLUDED.number, \
                buyer = EXCLUDED.buyer, \
                buyer_phone = EXCLUDED.buyer_phone, \
                seller = EXCLUDED.seller, \
                seller_phone = EXCLUDED.seller_phone, \
                city = EXCLUDED.city, \
                status = EXCLUDED.status, \
                tax_kind = EXCLUDED.tax_kind, \
                cancellation = EXCLUDED.cancellation, \
                notes = EXCLUDED.notes, \
                checklist = EXCLUDED.checklist, \
                owner = EXCLUDED.owner, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &number,
                &buyer.name,
                &buyer.phone,
                &seller.name,
                &seller.phone,
                &city,
                &status,
                &tax_kind,
                &cancellation,
                &notes,
                &checklist,
                &owner,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Case, case::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Case, case::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: case::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO cases_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Case, case::Number>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Case, case::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let number: case::Number = by.into_inner();

        const SQL: &str = "\
            INSERT INTO cases_creation_lock \
            VALUES ($1::VARCHAR) \
            ON CONFLICT (number) DO NOTHING";
        self.query(SQL, &[&number])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<read::case::list::Page, read::case::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::case::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::case::list::Page, read::case::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::case::list::Selector {
            arguments,
            filter:
                read::case::list::Filter {
                    status,
                    city,
                    search,
                },
        } = by.into_inner();

        let limit = i32::try_from(arguments.limit()).unwrap() + 1;

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });
        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });
        let city_idx = city.as_ref().map(|c| {
            ps.push(c);
            ps.len()
        });

        let search_pattern = search.as_ref().map(|s| FuzzPattern::new(s));
        let search_idx = search_pattern.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });

        let sql = format!(
            "SELECT id \
             FROM cases \
             WHERE true \
                   {cursor} \
                   {status_filtering} \
                   {city_filtering} \
                   {search_filtering} \
             ORDER BY id {order} \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                let op = arguments.kind().operator();
                f(&format_args!("AND id {op} ${idx}::UUID"))
            }),
            order = arguments.kind().order().sql(),
            status_filtering =
                status_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND status = ${idx}::INT2"))
                }),
            city_filtering = city_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND city = ${idx}::VARCHAR"))
            }),
            search_filtering =
                search_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!(
                        "AND (LOWER(number) \
                              SIMILAR TO LOWER(${idx}::VARCHAR) \
                          OR LOWER(buyer) \
                              SIMILAR TO LOWER(${idx}::VARCHAR) \
                          OR LOWER(seller) \
                              SIMILAR TO LOWER(${idx}::VARCHAR))"
                    ))
                }),
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        let has_more = rows.len() > arguments.limit();
        let edges = rows
            .into_iter()
            .take(arguments.limit())
            .map(|row| {
                let id = row.get::<_, case::Id>("id");
                (id, id)
            })
            .collect::<Vec<_>>();

        Ok(read::case::list::Page::new(&arguments, edges, has_more))
    }
}

impl<C> Database<Select<By<read::case::list::TotalCount, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::case::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::case::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM cases";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i32>(0).into())
    }
}

impl<C> Database<Select<By<Vec<Case>, read::case::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Case>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Case>, read::case::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::case::list::Filter {
            status,
            city,
            search,
        } = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });
        let city_idx = city.as_ref().map(|c| {
            ps.push(c);
            ps.len()
        });
        let search_pattern = search.as_ref().map(|s| FuzzPattern::new(s));
        let search_idx = search_pattern.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM cases \
             WHERE true \
                   {status_filtering} \
                   {city_filtering} \
                   {search_filtering} \
             ORDER BY number ASC",
            status_filtering =
                status_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND status = ${idx}::INT2"))
                }),
            city_filtering = city_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND city = ${idx}::VARCHAR"))
            }),
            search_filtering =
                search_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!(
                        "AND (LOWER(number) \
                              SIMILAR TO LOWER(${idx}::VARCHAR) \
                          OR LOWER(buyer) \
                              SIMILAR TO LOWER(${idx}::VARCHAR) \
                          OR LOWER(seller) \
                              SIMILAR TO LOWER(${idx}::VARCHAR))"
                    ))
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

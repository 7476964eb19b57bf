//! [`Todo`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Lock, Select, Update},
    Date,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{case, todo, Todo},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of the `todos` table, in the order [`from_row`] expects them.
const COLUMNS: &str = "\
    id, case_id, content, due_date, priority, \
    source_kind, source_key, \
    completed_at, created_at, deleted_at";

/// Reconstructs a [`Todo`] from the provided [`Row`].
fn from_row(row: &Row) -> Todo {
    let source = match row.get::<_, todo::SourceKind>("source_kind") {
        todo::SourceKind::Manual => todo::Source::Manual,
        // A key failing to parse counts as lost: the synchronizer
        // removes such legacy rows.
        todo::SourceKind::System => todo::Source::System(
            row.get::<_, Option<String>>("source_key")
                .and_then(|key| key.parse().ok()),
        ),
    };

    Todo {
        id: row.get("id"),
        case_id: row.get("case_id"),
        content: row.get("content"),
        due_date: row.get("due_date"),
        priority: row.get("priority"),
        source,
        completed_at: row.get("completed_at"),
        created_at: row.get("created_at"),
        deleted_at: row.get("deleted_at"),
    }
}

impl<C> Database<Select<By<Option<Todo>, todo::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Todo>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Todo>, todo::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: todo::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM todos \
             WHERE id = $1::UUID \
                   AND deleted_at IS NULL \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Todo>, todo::SourceKind>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Todo>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Todo>, todo::SourceKind>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let kind: todo::SourceKind = by.into_inner();

        // Oldest first, so deduplication keeps the earliest row.
        let sql = format!(
            "SELECT {COLUMNS} \
             FROM todos \
             WHERE source_kind = $1::INT2 \
                   AND deleted_at IS NULL \
             ORDER BY created_at ASC, id ASC",
        );
        Ok(self
            .query(&sql, &[&kind])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Todo>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Todo>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(todo): Insert<Todo>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(todo)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Todo>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(todo): Update<Todo>,
    ) -> Result<Self::Ok, Self::Err> {
        let source_kind = todo.source.kind();
        let source_key = todo.source.key().map(|key| key.to_string());

        let Todo {
            id,
            case_id,
            content,
            due_date,
            priority,
            source: _,
            completed_at,
            created_at,
            deleted_at,
        } = todo;

        const SQL: &str = "\
            INSERT INTO todos (\
                id, case_id, content, due_date, priority, \
                source_kind, source_key, \
                completed_at, created_at, deleted_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::VARCHAR, $4::DATE, $5::INT2, \
                $6::INT2, $7::VARCHAR, \
                $8::TIMESTAMPTZ, $9::TIMESTAMPTZ, $10::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET case_id = EXCLUDED.case_id, \
                content = EXCLUDED.content, \
                due_date = EXCLUDED.due_date, \
                priority = EXCLUDED.priority, \
                source_kind = EXCLUDED.source_kind, \
                source_key = EXCLUDED.source_key, \
                completed_at = EXCLUDED.completed_at, \
                deleted_at = EXCLUDED.deleted_at";
        self.exec(
            SQL,
            &[
                &id,
                &case_id,
                &content,
                &due_date,
                &priority,
                &source_kind,
                &source_key,
                &completed_at,
                &created_at,
                &deleted_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Todo, todo::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Todo, todo::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: todo::Id = by.into_inner();

        let deleted_at = todo::DeletionDateTime::now();

        const SQL: &str = "\
            UPDATE todos \
            SET deleted_at = $2::TIMESTAMPTZ \
            WHERE id = $1::UUID \
              AND deleted_at IS NULL";
        self.exec(SQL, &[&id, &deleted_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Todo, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(_): Lock<By<Todo, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Single-row table serializing reminder reconciliations.
        const SQL: &str = "\
            INSERT INTO todos_sync_lock \
            VALUES (TRUE) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<read::todo::Deadline>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::todo::Deadline>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<read::todo::Deadline>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        /// Milestone columns deadlines are harvested from.
        const MILESTONE_KEYS: [&str; 5] = [
            "seal_date",
            "tax_payment_date",
            "transfer_date",
            "balance_date",
            "handover_date",
        ];

        /// Financial columns deadlines are harvested from.
        const FINANCIAL_KEYS: [&str; 2] = ["land_tax_due", "deed_tax_due"];

        let sql = format!(
            "{milestones} UNION ALL {financials} ORDER BY 2 ASC, 3 ASC",
            milestones =
                MILESTONE_KEYS.iter().format_with(" UNION ALL ", |key, f| {
                    f(&format_args!(
                        "SELECT c.id AS case_id, c.number, \
                                '{key}' AS key, m.{key} AS due \
                         FROM cases c \
                         JOIN milestones m ON m.case_id = c.id \
                         WHERE c.status = $1::INT2 \
                           AND m.{key} IS NOT NULL"
                    ))
                }),
            financials =
                FINANCIAL_KEYS.iter().format_with(" UNION ALL ", |key, f| {
                    f(&format_args!(
                        "SELECT c.id AS case_id, c.number, \
                                '{key}' AS key, fi.{key} AS due \
                         FROM cases c \
                         JOIN financials fi ON fi.case_id = c.id \
                         WHERE c.status = $1::INT2 \
                           AND fi.{key} IS NOT NULL"
                    ))
                }),
        );
        Ok(self
            .query(&sql, &[&case::Status::Processing])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::todo::Deadline {
                case_id: row.get("case_id"),
                case_number: row.get("number"),
                key: row
                    .get::<_, String>("key")
                    .parse()
                    .expect("harvested key literal is valid"),
                due: row.get("due"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<read::todo::list::Page, read::todo::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::todo::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::todo::list::Page, read::todo::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::todo::list::Selector {
            arguments,
            filter:
                read::todo::list::Filter {
                    case_id,
                    pending,
                    due_before,
                },
        } = by.into_inner();

        let limit = i32::try_from(arguments.limit()).unwrap() + 1;

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });
        let case_idx = case_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let due_idx = due_before.as_ref().map(|d| {
            ps.push(d);
            ps.len()
        });

        let sql = format!(
            "SELECT id \
             FROM todos \
             WHERE deleted_at IS NULL \
                   {cursor} \
                   {case_filtering} \
                   {pending_filtering} \
                   {due_filtering} \
             ORDER BY id {order} \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                let op = arguments.kind().operator();
                f(&format_args!("AND id {op} ${idx}::UUID"))
            }),
            order = arguments.kind().order().sql(),
            case_filtering = case_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND case_id = ${idx}::UUID"))
            }),
            pending_filtering = pending
                .then_some("AND completed_at IS NULL")
                .unwrap_or_default(),
            due_filtering = due_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!(
                    "AND due_date IS NOT NULL AND due_date <= ${idx}::DATE"
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
                let id = row.get::<_, todo::Id>("id");
                (id, id)
            })
            .collect::<Vec<_>>();

        Ok(read::todo::list::Page::new(&arguments, edges, has_more))
    }
}

impl<C> Database<Select<By<read::todo::list::TotalCount, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::todo::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::todo::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM todos \
            WHERE deleted_at IS NULL";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i32>(0).into())
    }
}

impl<C> Database<Select<By<read::todo::DueCount, Date>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::todo::DueCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::todo::DueCount, Date>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let deadline: Date = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM todos \
            WHERE deleted_at IS NULL \
              AND completed_at IS NULL \
              AND due_date IS NOT NULL \
              AND due_date <= $1::DATE";
        self.query_opt(SQL, &[&deadline])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i32>(0).into())
    }
}

//! [`BankContact`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{bank, BankContact},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Reconstructs a [`BankContact`] from the provided [`Row`].
fn from_row(row: &Row) -> BankContact {
    BankContact {
        id: row.get("id"),
        bank: row.get("bank"),
        branch: row.get("branch"),
        person: row.get("person"),
        phone: row.get("phone"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
        deleted_at: row.get("deleted_at"),
    }
}

impl<C> Database<Select<By<Option<BankContact>, bank::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<BankContact>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<BankContact>, bank::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: bank::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, bank, branch, person, phone, notes, \
                   created_at, deleted_at \
            FROM bank_contacts \
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

impl<C> Database<Select<By<Vec<BankContact>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<BankContact>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<BankContact>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, bank, branch, person, phone, notes, \
                   created_at, deleted_at \
            FROM bank_contacts \
            WHERE deleted_at IS NULL \
            ORDER BY bank ASC, branch ASC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<BankContact>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<BankContact>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(contact): Insert<BankContact>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(contact)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<BankContact>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(contact): Update<BankContact>,
    ) -> Result<Self::Ok, Self::Err> {
        let BankContact {
            id,
            bank,
            branch,
            person,
            phone,
            notes,
            created_at,
            deleted_at,
        } = contact;

        const SQL: &str = "\
            INSERT INTO bank_contacts (\
                id, bank, branch, person, phone, notes, \
                created_at, deleted_at\
            ) \
            VALUES (\
                $1::UUID, \
                $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, \
                $7::TIMESTAMPTZ, $8::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET bank = EXCLUDED.bank, \
                branch = EXCLUDED.branch, \
                person = EXCLUDED.person, \
                phone = EXCLUDED.phone, \
                notes = EXCLUDED.notes, \
                deleted_at = EXCLUDED.deleted_at";
        self.exec(
            SQL,
            &[
                &id,
                &bank,
                &branch,
                &person,
                &phone,
                &notes,
                &created_at,
                &deleted_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

//! [`Redemption`]-related [`Database`] implementations.

use common::operations::{By, Select, Upsert};
use tracerr::Traced;

use crate::{
    domain::{case, Redemption},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Redemption>, case::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Redemption>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Redemption>, case::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let case_id: case::Id = by.into_inner();

        const SQL: &str = "\
            SELECT case_id, bank, amount, \
                   applied_on, cleared_on, \
                   updated_at \
            FROM redemptions \
            WHERE case_id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&case_id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Redemption {
                case_id: row.get("case_id"),
                bank: row.get("bank"),
                amount: row.get("amount"),
                applied_on: row.get("applied_on"),
                cleared_on: row.get("cleared_on"),
                updated_at: row.get("updated_at"),
            }))
    }
}

impl<C> Database<Upsert<Redemption>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Upsert(redemption): Upsert<Redemption>,
    ) -> Result<Self::Ok, Self::Err> {
        let Redemption {
            case_id,
            bank,
            amount,
            applied_on,
            cleared_on,
            updated_at,
        } = redemption;

        // One row per case.
        const SQL: &str = "\
            INSERT INTO redemptions (\
                case_id, bank, amount, \
                applied_on, cleared_on, \
                updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::NUMERIC, \
                $4::DATE, $5::DATE, \
                $6::TIMESTAMPTZ\
            ) \
            ON CONFLICT (case_id) DO UPDATE \
            SET bank = EXCLUDED.bank, \
                amount = EXCLUDED.amount, \
                applied_on = EXCLUDED.applied_on, \
                cleared_on = EXCLUDED.cleared_on, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &case_id,
                &bank,
                &amount,
                &applied_on,
                &cleared_on,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

//! [`Milestone`]-related [`Database`] implementations.

use common::operations::{By, Select, Upsert};
use tracerr::Traced;

use crate::{
    domain::{case, milestone, Milestone},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Milestone>, case::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Milestone>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Milestone>, case::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let case_id: case::Id = by.into_inner();

        const SQL: &str = "\
            SELECT case_id, contract_date, \
                   sign_diff_date, sign_diff_amount, sign_diff_method, \
                   seal_date, seal_amount, seal_method, \
                   tax_payment_date, tax_payment_amount, tax_payment_method, \
                   transfer_date, \
                   balance_date, balance_amount, balance_method, \
                   handover_date, handover_amount, handover_method, \
                   redemption_date, \
                   seal_meeting_at, handover_meeting_at, \
                   updated_at \
            FROM milestones \
            WHERE case_id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&case_id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Milestone {
                case_id: row.get("case_id"),
                contract_date: row.get("contract_date"),
                sign_diff: milestone::Stage {
                    date: row.get("sign_diff_date"),
                    amount: row.get("sign_diff_amount"),
                    method: row.get("sign_diff_method"),
                },
                seal: milestone::Stage {
                    date: row.get("seal_date"),
                    amount: row.get("seal_amount"),
                    method: row.get("seal_method"),
                },
                tax_payment: milestone::Stage {
                    date: row.get("tax_payment_date"),
                    amount: row.get("tax_payment_amount"),
                    method: row.get("tax_payment_method"),
                },
                transfer_date: row.get("transfer_date"),
                balance: milestone::Stage {
                    date: row.get("balance_date"),
                    amount: row.get("balance_amount"),
                    method: row.get("balance_method"),
                },
                handover: milestone::Stage {
                    date: row.get("handover_date"),
                    amount: row.get("handover_amount"),
                    method: row.get("handover_method"),
                },
                redemption_date: row.get("redemption_date"),
                seal_meeting_at: row.get("seal_meeting_at"),
                handover_meeting_at: row.get("handover_meeting_at"),
                updated_at: row.get("updated_at"),
            }))
    }
}

impl<C> Database<Upsert<Milestone>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Upsert(milestone): Upsert<Milestone>,
    ) -> Result<Self::Ok, Self::Err> {
        let Milestone {
            case_id,
            contract_date,
            sign_diff,
            seal,
            tax_payment,
            transfer_date,
            balance,
            handover,
            redemption_date,
            seal_meeting_at,
            handover_meeting_at,
            updated_at,
        } = milestone;

        // One row per case.
        const SQL: &str = "\
            INSERT INTO milestones (\
                case_id, contract_date, \
                sign_diff_date, sign_diff_amount, sign_diff_method, \
                seal_date, seal_amount, seal_method, \
                tax_payment_date, tax_payment_amount, tax_payment_method, \
                transfer_date, \
                balance_date, balance_amount, balance_method, \
                handover_date, handover_amount, handover_method, \
                redemption_date, \
                seal_meeting_at, handover_meeting_at, \
                updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::DATE, \
                $3::DATE, $4::NUMERIC, $5::VARCHAR, \
                $6::DATE, $7::NUMERIC, $8::VARCHAR, \
                $9::DATE, $10::NUMERIC, $11::VARCHAR, \
                $12::DATE, \
                $13::DATE, $14::NUMERIC, $15::VARCHAR, \
                $16::DATE, $17::NUMERIC, $18::VARCHAR, \
                $19::DATE, \
                $20::TIMESTAMPTZ, $21::TIMESTAMPTZ, \
                $22::TIMESTAMPTZ\
            ) \
            ON CONFLICT (case_id) DO UPDATE \
            SET contract_date = EXCLUDED.contract_date, \
                sign_diff_date = EXCLUDED.sign_diff_date, \
                sign_diff_amount = EXCLUDED.sign_diff_amount, \
                sign_diff_method = EXCLUDED.sign_diff_method, \
                seal_date = EXCLUDED.seal_date, \
                seal_amount = EXCLUDED.seal_amount, \
                seal_method = EXCLUDED.seal_method, \
                tax_payment_date = EXCLUDED.tax_payment_date, \
                tax_payment_amount = EXCLUDED.tax_payment_amount, \
                tax_payment_method = EXCLUDED.tax_payment_method, \
                transfer_date = EXCLUDED.transfer_date, \
                balance_date = EXCLUDED.balance_date, \
                balance_amount = EXCLUDED.balance_amount, \
                balance_method = EXCLUDED.balance_method, \
                handover_date = EXCLUDED.handover_date, \
                handover_amount = EXCLUDED.handover_amount, \
                handover_method = EXCLUDED.handover_method, \
                redemption_date = EXCLUDED.redemption_date, \
                seal_meeting_at = EXCLUDED.seal_meeting_at, \
                handover_meeting_at = EXCLUDED.handover_meeting_at, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &case_id,
                &contract_date,
                &sign_diff.date,
                &sign_diff.amount,
                &sign_diff.method,
                &seal.date,
                &seal.amount,
                &seal.method,
                &tax_payment.date,
                &tax_payment.amount,
                &tax_payment.method,
                &transfer_date,
                &balance.date,
                &balance.amount,
                &balance.method,
                &handover.date,
                &handover.amount,
                &handover.method,
                &redemption_date,
                &seal_meeting_at,
                &handover_meeting_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

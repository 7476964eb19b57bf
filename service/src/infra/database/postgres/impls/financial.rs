//! [`Financial`]-related [`Database`] implementations.

use common::operations::{By, Select, Upsert};
use tracerr::Traced;

use crate::{
    domain::{case, Financial},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Financial>, case::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Financial>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Financial>, case::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let case_id: case::Id = by.into_inner();

        const SQL: &str = "\
            SELECT case_id, total_price, \
                   buyer_bank, seller_bank, vat, \
                   land_tax_due, deed_tax_due, \
                   updated_at \
            FROM financials \
            WHERE case_id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&case_id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Financial {
                case_id: row.get("case_id"),
                total_price: row.get("total_price"),
                buyer_bank: row.get("buyer_bank"),
                seller_bank: row.get("seller_bank"),
                vat: row.get("vat"),
                land_tax_due: row.get("land_tax_due"),
                deed_tax_due: row.get("deed_tax_due"),
                updated_at: row.get("updated_at"),
            }))
    }
}

impl<C> Database<Upsert<Financial>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Upsert(financial): Upsert<Financial>,
    ) -> Result<Self::Ok, Self::Err> {
        let Financial {
            case_id,
            total_price,
            buyer_bank,
            seller_bank,
            vat,
            land_tax_due,
            deed_tax_due,
            updated_at,
        } = financial;

        // One row per case.
        const SQL: &str = "\
            INSERT INTO financials (\
                case_id, total_price, \
                buyer_bank, seller_bank, vat, \
                land_tax_due, deed_tax_due, \
                updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::NUMERIC, \
                $3::VARCHAR, $4::VARCHAR, $5::INT2, \
                $6::DATE, $7::DATE, \
                $8::TIMESTAMPTZ\
            ) \
            ON CONFLICT (case_id) DO UPDATE \
            SET total_price = EXCLUDED.total_price, \
                buyer_bank = EXCLUDED.buyer_bank, \
                seller_bank = EXCLUDED.seller_bank, \
                vat = EXCLUDED.vat, \
                land_tax_due = EXCLUDED.land_tax_due, \
                deed_tax_due = EXCLUDED.deed_tax_due, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &case_id,
                &total_price,
                &buyer_bank,
                &seller_bank,
                &vat,
                &land_tax_due,
                &deed_tax_due,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

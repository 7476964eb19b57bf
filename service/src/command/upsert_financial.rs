//! [`Command`] for writing the [`Financial`] record of a [`Case`].

use common::{
    operations::{By, Select, Upsert},
    Date, DateTimeOf, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{bank, case, financial, Case, Financial},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for writing the [`Financial`] record of a [`Case`].
///
/// The record is inserted on the first write and fully rewritten on the
/// following ones, keeping one row per case.
#[derive(Clone, Debug)]
pub struct UpsertFinancial {
    /// ID of the [`Case`] the [`Financial`] belongs to.
    pub case_id: case::Id,

    /// Total transaction price.
    pub total_price: Option<Money>,

    /// Mortgage bank of the buyer.
    pub buyer_bank: Option<bank::Name>,

    /// Redeeming bank of the seller.
    pub seller_bank: Option<bank::Name>,

    /// [`financial::VatKind`] of the transaction.
    pub vat: Option<financial::VatKind>,

    /// [`Date`] the land value increment tax is due by.
    pub land_tax_due: Option<Date>,

    /// [`Date`] the deed tax is due by.
    pub deed_tax_due: Option<Date>,
}

impl<Db> Command<UpsertFinancial> for Service<Db>
where
    Db: Database<
            Select<By<Option<Case>, case::Id>>,
            Ok = Option<Case>,
            Err = Traced<database::Error>,
        > + Database<Upsert<Financial>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Financial;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpsertFinancial,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpsertFinancial {
            case_id,
            total_price,
            buyer_bank,
            seller_bank,
            vat,
            land_tax_due,
            deed_tax_due,
        } = cmd;

        self.database()
            .execute(Select(By::<Option<Case>, _>::new(case_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CaseNotExists(case_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let financial = Financial {
            case_id,
            total_price,
            buyer_bank,
            seller_bank,
            vat,
            land_tax_due,
            deed_tax_due,
            updated_at: DateTimeOf::now(),
        };

        self.database()
            .execute(Upsert(financial.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(financial)
    }
}

/// Error of [`UpsertFinancial`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Case`] doesn't exist.
    #[display("`Case(id: {_0})` does not exist")]
    #[from(ignore)]
    CaseNotExists(#[error(not(source))] case::Id),
}

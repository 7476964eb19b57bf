//! [`Command`] for writing the [`Redemption`] record of a [`Case`].

use common::{
    operations::{By, Select, Upsert},
    Date, DateTimeOf, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{bank, case, Case, Redemption},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for writing the [`Redemption`] record of a [`Case`].
///
/// The record is inserted on the first write and fully rewritten on the
/// following ones, keeping one row per case.
#[derive(Clone, Debug)]
pub struct UpsertRedemption {
    /// ID of the [`Case`] the [`Redemption`] belongs to.
    pub case_id: case::Id,

    /// Bank holding the mortgage being redeemed.
    pub bank: Option<bank::Name>,

    /// Outstanding amount to redeem.
    pub amount: Option<Money>,

    /// [`Date`] the redemption was applied for.
    pub applied_on: Option<Date>,

    /// [`Date`] the mortgage annotation was cleared.
    pub cleared_on: Option<Date>,
}

impl<Db> Command<UpsertRedemption> for Service<Db>
where
    Db: Database<
            Select<By<Option<Case>, case::Id>>,
            Ok = Option<Case>,
            Err = Traced<database::Error>,
        > + Database<Upsert<Redemption>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Redemption;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpsertRedemption,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpsertRedemption {
            case_id,
            bank,
            amount,
            applied_on,
            cleared_on,
        } = cmd;

        self.database()
            .execute(Select(By::<Option<Case>, _>::new(case_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CaseNotExists(case_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let redemption = Redemption {
            case_id,
            bank,
            amount,
            applied_on,
            cleared_on,
            updated_at: DateTimeOf::now(),
        };

        self.database()
            .execute(Upsert(redemption.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(redemption)
    }
}

/// Error of [`UpsertRedemption`] [`Command`] execution.
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

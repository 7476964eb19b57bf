//! [`Command`] for creating a new [`Case`].

use common::{
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Upsert,
    },
    Date, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{case, Case, Financial, Milestone},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Case`].
///
/// A [`Milestone`] and a [`Financial`] record are created along with the
/// [`Case`] in the same transaction, so a partially written case cannot
/// be observed.
#[derive(Clone, Debug)]
pub struct CreateCase {
    /// [`case::Number`] of a new [`Case`].
    pub number: case::Number,

    /// Buying [`case::Party`] of a new [`Case`].
    pub buyer: case::Party,

    /// Selling [`case::Party`] of a new [`Case`].
    pub seller: case::Party,

    /// [`case::City`] of a new [`Case`].
    pub city: Option<case::City>,

    /// [`case::TaxKind`] of a new [`Case`].
    pub tax_kind: case::TaxKind,

    /// Free-form [`case::Notes`] of a new [`Case`].
    pub notes: Option<case::Notes>,

    /// [`Date`] the sale contract was signed, if known already.
    ///
    /// When provided, the downstream milestone dates are pre-filled by
    /// the fixed-offset schedule.
    pub contract_date: Option<Date>,

    /// Identity of the operator creating the [`Case`], if known.
    pub owner: Option<case::OwnerId>,
}

impl<Db> Command<CreateCase> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Case>, case::Number>>,
            Ok = Option<Case>,
            Err = Traced<database::Error>,
        > + Database<Insert<Case>, Err = Traced<database::Error>>
        + Database<Upsert<Milestone>, Err = Traced<database::Error>>
        + Database<Upsert<Financial>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Transacted<Db>:
        Database<Lock<By<Case, case::Number>>, Err = Traced<database::Error>>,
{
    type Ok = Case;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateCase) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateCase {
            number,
            buyer,
            seller,
            city,
            tax_kind,
            notes,
            contract_date,
            owner,
        } = cmd;

        let case = Case {
            id: case::Id::new(),
            number: number.clone(),
            buyer,
            seller,
            city,
            status: case::Status::Processing,
            tax_kind,
            cancellation: None,
            notes,
            checklist: case::Checklist::default(),
            owner,
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of the same `Case` number.
        tx.execute(Lock(By::new(number.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Case>, _>::new(number.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::NumberOccupied(number)));
        }

        tx.execute(Insert(case.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let milestone = match contract_date {
            Some(date) => Milestone::scheduled(case.id, date, tax_kind),
            None => Milestone::empty(case.id),
        };
        tx.execute(Upsert(milestone))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Upsert(Financial::empty(case.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(case)
    }
}

/// Error of [`CreateCase`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`case::Number`] is occupied by another [`Case`].
    #[display("`Case(number: {_0})` already exists")]
    NumberOccupied(#[error(not(source))] case::Number),
}

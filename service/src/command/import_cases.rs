//! [`Command`] for importing [`Case`]s from a spreadsheet.

use common::{
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Update, Upsert,
    },
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{case, Case, Financial, Milestone},
    infra::{database, Database},
    sheet,
    Service,
};

use super::Command;

/// [`Command`] for importing [`Case`]s from a CSV sheet.
///
/// Every row upserts by its [`case::Number`]: unknown numbers become new
/// [`Case`]s, known ones have their transferable fields rewritten. Rows
/// repeating a number are collapsed to the last occurrence beforehand,
/// so re-importing an exported sheet is a no-op.
#[derive(Clone, Debug)]
pub struct ImportCases {
    /// CSV text to import.
    pub csv: String,

    /// Identity of the operator importing, stamped onto new [`Case`]s.
    pub owner: Option<case::OwnerId>,
}

/// Outcome of an [`ImportCases`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Outcome {
    /// Number of new [`Case`]s created.
    pub created: usize,

    /// Number of existing [`Case`]s updated.
    pub updated: usize,
}

impl<Db> Command<ImportCases> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Case, case::Number>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Case>, case::Number>>,
            Ok = Option<Case>,
            Err = Traced<database::Error>,
        > + Database<Insert<Case>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<Case>, Ok = (), Err = Traced<database::Error>>
        + Database<Upsert<Milestone>, Ok = (), Err = Traced<database::Error>>
        + Database<Upsert<Financial>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Outcome;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ImportCases) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ImportCases { csv, owner } = cmd;

        let rows = sheet::decode(&csv)
            .map(sheet::dedupe)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut outcome = Outcome::default();
        for row in rows {
            // Avoid concurrent creation of the same `Case` number.
            tx.execute(Lock(By::new(row.number.clone())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;

            let existing = tx
                .execute(Select(By::<Option<Case>, _>::new(
                    row.number.clone(),
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;

            match existing {
                Some(mut case) => {
                    case.buyer = row.buyer;
                    case.seller = row.seller;
                    case.city = row.city;
                    case.status = row.status;
                    case.tax_kind = row.tax_kind;
                    case.notes = row.notes;
                    case.updated_at = DateTime::now().coerce();

                    tx.execute(Update(case))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))?;
                    outcome.updated += 1;
                }
                None => {
                    let case = Case {
                        id: case::Id::new(),
                        number: row.number,
                        buyer: row.buyer,
                        seller: row.seller,
                        city: row.city,
                        status: row.status,
                        tax_kind: row.tax_kind,
                        cancellation: None,
                        notes: row.notes,
                        checklist: case::Checklist::default(),
                        owner,
                        created_at: DateTime::now().coerce(),
                        updated_at: DateTime::now().coerce(),
                    };

                    tx.execute(Insert(case.clone()))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))?;
                    tx.execute(Upsert(Milestone::empty(case.id)))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))?;
                    tx.execute(Upsert(Financial::empty(case.id)))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))?;
                    outcome.created += 1;
                }
            }
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(outcome)
    }
}

/// Error of [`ImportCases`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Sheet cannot be decoded.
    #[display("cannot decode sheet: {_0}")]
    Sheet(sheet::Error),
}

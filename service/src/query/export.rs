//! [`ExportCases`] definition.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::Case,
    infra::{database, Database},
    read, sheet, Query, Service,
};

/// [`Query`] encoding a filtered [`Case`] list as a CSV sheet.
///
/// The produced sheet can be fed back through the case import, which
/// upserts every row by its number.
#[derive(Clone, Debug, Default)]
pub struct ExportCases {
    /// Filter to select the exported [`Case`]s by.
    pub filter: read::case::list::Filter,
}

impl<Db> Query<ExportCases> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Case>, read::case::list::Filter>>,
        Ok = Vec<Case>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = String;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ExportCases { filter }: ExportCases,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let cases = self
            .database()
            .execute(Select(By::<Vec<Case>, _>::new(filter)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let rows = cases.iter().map(sheet::Row::from).collect::<Vec<_>>();
        sheet::encode(&rows).map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// Error of [`ExportCases`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Sheet cannot be encoded.
    #[display("cannot encode sheet: {_0}")]
    Sheet(sheet::Error),
}

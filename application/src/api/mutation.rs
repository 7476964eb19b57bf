//! GraphQL [`Mutation`]s definitions.

use common::{Date, DateTime, Money};
use juniper::graphql_object;
use service::{command, extract, Command as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `Case` with the provided details.
    ///
    /// A `Milestone` and a `Financial` record are created along with the
    /// `Case`; providing a `contractDate` pre-fills the downstream
    /// milestone dates by the fixed-offset schedule.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CASE_NUMBER_OCCUPIED` - provided `CaseNumber` is occupied by
    ///                            another `Case`.
    #[tracing::instrument(
        skip_all,
        fields(
            buyer = %buyer_name,
            city = ?city.as_ref().map(ToString::to_string),
            contract_date = ?contract_date.as_ref().map(ToString::to_string),
            gql.name = "createCase",
            number = %number,
            otel.name = Self::SPAN_NAME,
            seller = %seller_name,
            tax_kind = ?tax_kind,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn create_case(
        number: api::case::Number,
        buyer_name: api::case::PartyName,
        buyer_phone: Option<api::case::Phone>,
        seller_name: api::case::PartyName,
        seller_phone: Option<api::case::Phone>,
        city: Option<api::case::City>,
        tax_kind: api::case::TaxKind,
        notes: Option<api::case::Notes>,
        contract_date: Option<Date>,
        ctx: &Context,
    ) -> Result<api::Case, Error> {
        let owner = ctx.identity().await?.map(|i| i.operator_id);

        ctx.service()
            .execute(command::CreateCase {
                number: number.into(),
                buyer: service::domain::case::Party {
                    name: buyer_name.into(),
                    phone: buyer_phone.map(Into::into),
                },
                seller: service::domain::case::Party {
                    name: seller_name.into(),
                    phone: seller_phone.map(Into::into),
                },
                city: city.map(Into::into),
                tax_kind: tax_kind.into(),
                notes: notes.map(Into::into),
                contract_date,
                owner,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `Case` with the specified ID.
    ///
    /// Carries the full new state of the editable fields, the way the
    /// case form submits them.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CASE_NOT_EXISTS` - the `Case` with the specified ID does not
    ///                       exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateCase",
            id = %id,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn update_case(
        id: api::case::Id,
        buyer_name: api::case::PartyName,
        buyer_phone: Option<api::case::Phone>,
        seller_name: api::case::PartyName,
        seller_phone: Option<api::case::Phone>,
        city: Option<api::case::City>,
        status: api::case::Status,
        tax_kind: api::case::TaxKind,
        cancellation: Option<api::case::Cancellation>,
        notes: Option<api::case::Notes>,
        checklist: Vec<api::case::ChecklistTaskInput>,
        ctx: &Context,
    ) -> Result<api::Case, Error> {
        ctx.service()
            .execute(command::UpdateCase {
                id: id.into(),
                buyer: service::domain::case::Party {
                    name: buyer_name.into(),
                    phone: buyer_phone.map(Into::into),
                },
                seller: service::domain::case::Party {
                    name: seller_name.into(),
                    phone: seller_phone.map(Into::into),
                },
                city: city.map(Into::into),
                status: status.into(),
                tax_kind: tax_kind.into(),
                cancellation: cancellation.map(Into::into),
                notes: notes.map(Into::into),
                checklist: api::case::checklist(checklist),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Writes the `Milestone` record of the specified `Case`.
    ///
    /// The record is inserted on the first write and fully rewritten on
    /// the following ones, keeping one row per case.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CASE_NOT_EXISTS` - the `Case` with the specified ID does not
    ///                       exist.
    #[tracing::instrument(
        skip_all,
        fields(
            case_id = %case_id,
            contract_date = ?contract_date.as_ref().map(ToString::to_string),
            gql.name = "upsertMilestone",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn upsert_milestone(
        case_id: api::case::Id,
        contract_date: Option<Date>,
        sign_diff: Option<api::milestone::StageInput>,
        seal: Option<api::milestone::StageInput>,
        tax_payment: Option<api::milestone::StageInput>,
        transfer_date: Option<Date>,
        balance: Option<api::milestone::StageInput>,
        handover: Option<api::milestone::StageInput>,
        redemption_date: Option<Date>,
        seal_meeting_at: Option<DateTime>,
        handover_meeting_at: Option<DateTime>,
        ctx: &Context,
    ) -> Result<api::Milestone, Error> {
        /// Converts an optional stage input into a domain stage.
        fn stage(
            input: Option<api::milestone::StageInput>,
        ) -> service::domain::milestone::Stage {
            input.map(Into::into).unwrap_or_default()
        }

        ctx.service()
            .execute(command::UpsertMilestone {
                case_id: case_id.into(),
                contract_date,
                sign_diff: stage(sign_diff),
                seal: stage(seal),
                tax_payment: stage(tax_payment),
                transfer_date,
                balance: stage(balance),
                handover: stage(handover),
                redemption_date,
                seal_meeting_at: seal_meeting_at.map(DateTime::coerce),
                handover_meeting_at: handover_meeting_at
                    .map(DateTime::coerce),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Writes the `Financial` record of the specified `Case`.
    ///
    /// The record is inserted on the first write and fully rewritten on
    /// the following ones, keeping one row per case.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CASE_NOT_EXISTS` - the `Case` with the specified ID does not
    ///                       exist.
    #[tracing::instrument(
        skip_all,
        fields(
            case_id = %case_id,
            gql.name = "upsertFinancial",
            otel.name = Self::SPAN_NAME,
            total_price = ?total_price.as_ref().map(ToString::to_string),
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn upsert_financial(
        case_id: api::case::Id,
        total_price: Option<Money>,
        buyer_bank: Option<api::bank::Name>,
        seller_bank: Option<api::bank::Name>,
        vat: Option<api::financial::VatKind>,
        land_tax_due: Option<Date>,
        deed_tax_due: Option<Date>,
        ctx: &Context,
    ) -> Result<api::Financial, Error> {
        ctx.service()
            .execute(command::UpsertFinancial {
                case_id: case_id.into(),
                total_price,
                buyer_bank: buyer_bank.map(Into::into),
                seller_bank: seller_bank.map(Into::into),
                vat: vat.map(Into::into),
                land_tax_due,
                deed_tax_due,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Writes the `Redemption` record of the specified `Case`.
    ///
    /// The record is inserted on the first write and fully rewritten on
    /// the following ones, keeping one row per case.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CASE_NOT_EXISTS` - the `Case` with the specified ID does not
    ///                       exist.
    #[tracing::instrument(
        skip_all,
        fields(
            amount = ?amount.as_ref().map(ToString::to_string),
            case_id = %case_id,
            gql.name = "upsertRedemption",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn upsert_redemption(
        case_id: api::case::Id,
        bank: Option<api::bank::Name>,
        amount: Option<Money>,
        applied_on: Option<Date>,
        cleared_on: Option<Date>,
        ctx: &Context,
    ) -> Result<api::Redemption, Error> {
        ctx.service()
            .execute(command::UpsertRedemption {
                case_id: case_id.into(),
                bank: bank.map(Into::into),
                amount,
                applied_on,
                cleared_on,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new manual `Todo`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CASE_NOT_EXISTS` - the `Case` with the specified ID does not
    ///                       exist.
    #[tracing::instrument(
        skip_all,
        fields(
            case_id = ?case_id.as_ref().map(ToString::to_string),
            content = %content,
            due_date = ?due_date.as_ref().map(ToString::to_string),
            gql.name = "createTodo",
            otel.name = Self::SPAN_NAME,
            priority = ?priority,
        ),
    )]
    pub async fn create_todo(
        case_id: Option<api::case::Id>,
        content: api::todo::Content,
        due_date: Option<Date>,
        priority: Option<api::todo::Priority>,
        ctx: &Context,
    ) -> Result<api::Todo, Error> {
        ctx.service()
            .execute(command::CreateTodo {
                case_id: case_id.map(Into::into),
                content: content.into(),
                due_date,
                priority: priority
                    .map_or(service::domain::todo::Priority::Normal, Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `Todo` with the specified ID.
    ///
    /// For a system reminder only the completion flag is applied: its
    /// content, due date and priority are owned by the reminder
    /// synchronizer.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `TODO_NOT_EXISTS` - the `Todo` with the specified ID does not
    ///                       exist.
    #[tracing::instrument(
        skip_all,
        fields(
            completed = %completed,
            gql.name = "updateTodo",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_todo(
        id: api::todo::Id,
        content: api::todo::Content,
        due_date: Option<Date>,
        priority: api::todo::Priority,
        completed: bool,
        ctx: &Context,
    ) -> Result<api::Todo, Error> {
        ctx.service()
            .execute(command::UpdateTodo {
                id: id.into(),
                content: content.into(),
                due_date,
                priority: priority.into(),
                completed,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Todo` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `TODO_NOT_EXISTS` - the `Todo` with the specified ID does not
    ///                       exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteTodo",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_todo(
        id: api::todo::Id,
        ctx: &Context,
    ) -> Result<api::Todo, Error> {
        ctx.service()
            .execute(command::DeleteTodo { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `BankContact` in the address book.
    #[tracing::instrument(
        skip_all,
        fields(
            bank = %bank,
            branch = ?branch.as_ref().map(ToString::to_string),
            gql.name = "createBankContact",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_bank_contact(
        bank: api::bank::Name,
        branch: Option<api::bank::Branch>,
        person: Option<api::bank::Person>,
        phone: Option<api::case::Phone>,
        notes: Option<api::case::Notes>,
        ctx: &Context,
    ) -> Result<api::BankContact, Error> {
        ctx.service()
            .execute(command::CreateBankContact {
                bank: bank.into(),
                branch: branch.map(Into::into),
                person: person.map(Into::into),
                phone: phone.map(Into::into),
                notes: notes.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `BankContact` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BANK_CONTACT_NOT_EXISTS` - the `BankContact` with the specified
    ///                               ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            bank = %bank,
            gql.name = "updateBankContact",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_bank_contact(
        id: api::bank::Id,
        bank: api::bank::Name,
        branch: Option<api::bank::Branch>,
        person: Option<api::bank::Person>,
        phone: Option<api::case::Phone>,
        notes: Option<api::case::Notes>,
        ctx: &Context,
    ) -> Result<api::BankContact, Error> {
        ctx.service()
            .execute(command::UpdateBankContact {
                id: id.into(),
                bank: bank.into(),
                branch: branch.map(Into::into),
                person: person.map(Into::into),
                phone: phone.map(Into::into),
                notes: notes.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `BankContact` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BANK_CONTACT_NOT_EXISTS` - the `BankContact` with the specified
    ///                               ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteBankContact",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_bank_contact(
        id: api::bank::Id,
        ctx: &Context,
    ) -> Result<api::BankContact, Error> {
        ctx.service()
            .execute(command::DeleteBankContact { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Snippet` in the reference library.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createSnippet",
            kind = ?kind,
            otel.name = Self::SPAN_NAME,
            title = %title,
        ),
    )]
    pub async fn create_snippet(
        kind: api::snippet::Kind,
        title: api::snippet::Title,
        body: api::snippet::Body,
        ctx: &Context,
    ) -> Result<api::Snippet, Error> {
        ctx.service()
            .execute(command::CreateSnippet {
                kind: kind.into(),
                title: title.into(),
                body: body.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Snippet` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `SNIPPET_NOT_EXISTS` - the `Snippet` with the specified ID does
    ///                          not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteSnippet",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_snippet(
        id: api::snippet::Id,
        ctx: &Context,
    ) -> Result<api::Snippet, Error> {
        ctx.service()
            .execute(command::DeleteSnippet { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Heuristically extracts case fields from the provided contract
    /// document text.
    ///
    /// Extraction is best effort: every field of the resulting
    /// `CaseDraft` is optional, and a section the heuristics cannot find
    /// simply stays `null`. The call never fails on unrecognized input.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "parseCaseDocument",
            otel.name = Self::SPAN_NAME,
            text_len = text.len(),
        ),
    )]
    #[must_use]
    pub fn parse_case_document(text: String) -> api::Draft {
        extract::parse(&text).into()
    }

    /// Imports `Case`s from the provided CSV sheet.
    ///
    /// Every row upserts by its `CaseNumber`: unknown numbers become new
    /// `Case`s, known ones have their transferable fields rewritten, so
    /// re-importing an exported sheet is a no-op.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_SHEET` - the provided CSV sheet is malformed or carries
    ///                     an invalid field.
    #[tracing::instrument(
        skip_all,
        fields(
            csv_len = csv.len(),
            gql.name = "importCases",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn import_cases(
        csv: String,
        ctx: &Context,
    ) -> Result<api::case::ImportResult, Error> {
        let owner = ctx.identity().await?.map(|i| i.operator_id);

        let outcome = ctx
            .service()
            .execute(command::ImportCases { csv, owner })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        Ok(api::case::ImportResult {
            created: outcome.created.try_into().map_err(AsError::into_error)?,
            updated: outcome.updated.try_into().map_err(AsError::into_error)?,
        })
    }

    /// Runs the reminder reconciliation immediately, without waiting for
    /// the next periodic pass.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "syncReminders",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn sync_reminders(
        ctx: &Context,
    ) -> Result<api::todo::SyncResult, Error> {
        let outcome = ctx
            .service()
            .execute(command::SyncReminders)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        Ok(api::todo::SyncResult {
            inserted: outcome
                .inserted
                .try_into()
                .map_err(AsError::into_error)?,
            updated: outcome.updated.try_into().map_err(AsError::into_error)?,
            deleted: outcome.deleted.try_into().map_err(AsError::into_error)?,
        })
    }
}

impl AsError for command::create_case::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CASE_NUMBER_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`CaseNumber` is occupied by another `Case`"]
                NumberOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NumberOccupied(_) => Some(Error::NumberOccupied.into()),
        }
    }
}

impl AsError for command::update_case::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CaseNotExists(_) => {
                Some(api::query::CaseError::NotExists.into())
            }
        }
    }
}

impl AsError for command::upsert_milestone::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CaseNotExists(_) => {
                Some(api::query::CaseError::NotExists.into())
            }
        }
    }
}

impl AsError for command::upsert_financial::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CaseNotExists(_) => {
                Some(api::query::CaseError::NotExists.into())
            }
        }
    }
}

impl AsError for command::upsert_redemption::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CaseNotExists(_) => {
                Some(api::query::CaseError::NotExists.into())
            }
        }
    }
}

impl AsError for command::create_todo::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CaseNotExists(_) => {
                Some(api::query::CaseError::NotExists.into())
            }
        }
    }
}

impl AsError for command::update_todo::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TodoNotExists(_) => {
                Some(api::query::TodoError::NotExists.into())
            }
        }
    }
}

impl AsError for command::delete_todo::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TodoNotExists(_) => {
                Some(api::query::TodoError::NotExists.into())
            }
        }
    }
}

impl AsError for command::update_bank_contact::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BankContactNotExists(_) => {
                Some(BankContactError::NotExists.into())
            }
        }
    }
}

impl AsError for command::delete_bank_contact::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BankContactNotExists(_) => {
                Some(BankContactError::NotExists.into())
            }
        }
    }
}

impl AsError for command::delete_snippet::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "SNIPPET_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Snippet` with the specified ID does not exist"]
                NotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::SnippetNotExists(_) => Some(Error::NotExists.into()),
        }
    }
}

impl AsError for command::import_cases::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_SHEET"]
                #[status = BAD_REQUEST]
                #[message = "Provided CSV sheet is malformed or carries an \
                             invalid field"]
                InvalidSheet,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Sheet(_) => Some(Error::InvalidSheet.into()),
        }
    }
}

define_error! {
    enum BankContactError {
        #[code = "BANK_CONTACT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`BankContact` with the specified ID does not exist"]
        NotExists,
    }
}

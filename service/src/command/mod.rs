//! [`Command`] definition.

pub mod create_bank_contact;
pub mod create_case;
pub mod create_snippet;
pub mod create_todo;
pub mod delete_bank_contact;
pub mod delete_snippet;
pub mod delete_todo;
pub mod import_cases;
pub mod sync_reminders;
pub mod update_bank_contact;
pub mod update_case;
pub mod update_todo;
pub mod upsert_financial;
pub mod upsert_milestone;
pub mod upsert_redemption;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_bank_contact::CreateBankContact, create_case::CreateCase,
    create_snippet::CreateSnippet, create_todo::CreateTodo,
    delete_bank_contact::DeleteBankContact, delete_snippet::DeleteSnippet,
    delete_todo::DeleteTodo, import_cases::ImportCases,
    sync_reminders::SyncReminders, update_bank_contact::UpdateBankContact,
    update_case::UpdateCase, update_todo::UpdateTodo,
    upsert_financial::UpsertFinancial, upsert_milestone::UpsertMilestone,
    upsert_redemption::UpsertRedemption,
};

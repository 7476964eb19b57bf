//! Domain definitions.

pub mod bank;
pub mod case;
pub mod financial;
pub mod milestone;
pub mod redemption;
pub mod snippet;
pub mod todo;

pub use self::{
    bank::BankContact, case::Case, financial::Financial, milestone::Milestone,
    redemption::Redemption, snippet::Snippet, todo::Todo,
};

//! GraphQL API definitions.

pub mod bank;
pub mod case;
pub mod draft;
pub mod financial;
pub mod milestone;
mod mutation;
mod query;
pub mod redemption;
pub mod scalar;
pub mod snippet;
mod subscription;
pub mod todo;

use crate::define_error;

pub use self::{
    bank::BankContact, case::Case, draft::Draft, financial::Financial,
    milestone::Milestone, mutation::Mutation, query::Query,
    redemption::Redemption, snippet::Snippet, subscription::Subscription,
    todo::Todo,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

define_error! {
    enum PaginationError {
        #[code = "AMBIGUOUS_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Ambiguous pagination arguments"]
        Ambiguous,
    }
}

//! GraphQL [`Subscription`]s definitions.

use std::time;

use common::{Date, DateTime};
use futures::{stream, stream::BoxStream, StreamExt as _};
use juniper::graphql_subscription;
use service::{query, Query as _};

use crate::{AsError, Context, Error};

/// Root of all GraphQL subscription.
#[derive(Clone, Copy, Debug)]
pub struct Subscription;

/// Interval between [`Subscription`] refreshes.
const REFRESH_INTERVAL: time::Duration = time::Duration::from_secs(30);

#[graphql_subscription(context = Context)]
impl Subscription {
    /// Emits the count of pending `Todo`s due within the specified number
    /// of days, refreshed periodically for the scheduling dashboard.
    ///
    /// The first count is emitted immediately on subscription.
    pub async fn due_todo_count(
        &self,
        within_days: i32,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<i32, Error>>, Error> {
        let service = ctx.service().clone();
        let within = time::Duration::from_secs(
            u64::try_from(within_days.max(0)).unwrap_or_default()
                * 24 * 60 * 60,
        );

        Ok(stream::unfold(
            (service, tokio::time::interval(REFRESH_INTERVAL)),
            move |(service, mut interval)| async move {
                let _ = interval.tick().await;
                let deadline: Date = (DateTime::now() + within).date();
                let count = service
                    .execute(query::todos::DueCount::by(deadline))
                    .await
                    .map(Into::into)
                    .map_err(AsError::into_error);
                Some((count, (service, interval)))
            },
        )
        .boxed())
    }
}

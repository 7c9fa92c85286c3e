use async_trait::async_trait;

use crate::{Bet, Comment, CommentQuery, Contract, ContractId};

/// The storage seam shared by the PostgreSQL implementation and the
/// in-memory one used in tests. All consistency and ordering guarantees for
/// concurrent writers live behind this trait.
#[async_trait]
pub trait Store: Send + Sync {
    /// Resolve a market by its human-readable slug.
    async fn contract_by_slug(&self, slug: &str) -> anyhow::Result<Option<Contract>>;

    /// All bets on a market, most recent first.
    async fn bets_on(&self, contract: ContractId) -> anyhow::Result<Vec<Bet>>;

    /// Point write: create or overwrite the comment at its exact
    /// `(kind, parent, id)` path. No existence check, no concurrency guard.
    async fn write_comment(&self, comment: &Comment) -> anyhow::Result<()>;

    /// Run a comment query, returning matches ordered by creation time
    /// descending, capped by the query's limit. One round trip per call.
    async fn list_comments(&self, query: &CommentQuery) -> anyhow::Result<Vec<Comment>>;
}

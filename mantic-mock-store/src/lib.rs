use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use mantic_api::{
    Bet, Comment, CommentId, CommentKind, CommentQuery, Contract, ContractId, Store, Uuid,
};
use tokio::sync::RwLock;

/// In-memory `Store` for tests: the same filtering, ordering and overwrite
/// semantics as the PostgreSQL implementation, with no database required.
pub struct MemStore(RwLock<Inner>);

#[derive(Default)]
struct Inner {
    contracts: BTreeMap<ContractId, Contract>,
    bets: HashMap<ContractId, Vec<Bet>>,
    // keyed by the comment's storage path
    comments: BTreeMap<(CommentKind, Uuid, CommentId), Comment>,
}

impl MemStore {
    pub fn new() -> MemStore {
        MemStore(RwLock::new(Inner::default()))
    }

    pub async fn add_contract(&self, contract: Contract) {
        self.0
            .write()
            .await
            .contracts
            .insert(contract.id, contract);
    }

    pub async fn add_bet(&self, bet: Bet) {
        self.0
            .write()
            .await
            .bets
            .entry(bet.contract_id)
            .or_insert_with(Vec::new)
            .push(bet);
    }
}

fn most_recent_first<T>(items: &mut [T], key: impl Fn(&T) -> (i64, Uuid)) {
    items.sort_by(|a, b| {
        let (a_time, a_id) = key(a);
        let (b_time, b_id) = key(b);
        b_time.cmp(&a_time).then(b_id.cmp(&a_id))
    });
}

#[async_trait]
impl Store for MemStore {
    async fn contract_by_slug(&self, slug: &str) -> anyhow::Result<Option<Contract>> {
        Ok(self
            .0
            .read()
            .await
            .contracts
            .values()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn bets_on(&self, contract: ContractId) -> anyhow::Result<Vec<Bet>> {
        let mut bets = self
            .0
            .read()
            .await
            .bets
            .get(&contract)
            .cloned()
            .unwrap_or_default();
        most_recent_first(&mut bets, |b| (b.created_time, b.id.0));
        Ok(bets)
    }

    async fn write_comment(&self, comment: &Comment) -> anyhow::Result<()> {
        // create-or-overwrite at the exact path, like the real point write
        self.0.write().await.comments.insert(
            (comment.kind(), comment.parent_id(), comment.id),
            comment.clone(),
        );
        Ok(())
    }

    async fn list_comments(&self, query: &CommentQuery) -> anyhow::Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .0
            .read()
            .await
            .comments
            .values()
            .filter(|c| query.matches(c))
            .cloned()
            .collect();
        most_recent_first(&mut comments, |c| (c.created_time, c.id.0));
        if let Some(limit) = query.limit {
            comments.truncate(limit as usize);
        }
        Ok(comments)
    }
}

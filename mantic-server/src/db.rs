use anyhow::Context;
use async_trait::async_trait;
use mantic_api::{Bet, Comment, CommentQuery, Contract, ContractId, Store};
use sqlx::Row;

use crate::query::{self, Bind};

// The store schema: one row per document, with the filter/sort keys lifted
// into columns and the full record kept as a JSONB document. A comment's row
// key (comment_type, parent_id, id) is its storage path.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS contracts (
        id UUID PRIMARY KEY,
        slug TEXT NOT NULL UNIQUE,
        data JSONB NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS bets (
        id UUID PRIMARY KEY,
        contract_id UUID NOT NULL,
        created_time BIGINT NOT NULL,
        data JSONB NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS bets_contract_created_idx
        ON bets (contract_id, created_time DESC)",
    "CREATE TABLE IF NOT EXISTS comments (
        comment_type TEXT NOT NULL,
        parent_id UUID NOT NULL,
        id UUID NOT NULL,
        user_id UUID NOT NULL,
        created_time BIGINT NOT NULL,
        data JSONB NOT NULL,
        PRIMARY KEY (comment_type, parent_id, id)
    )",
    "CREATE INDEX IF NOT EXISTS comments_created_idx
        ON comments (created_time DESC)",
    "CREATE INDEX IF NOT EXISTS comments_user_type_idx
        ON comments (user_id, comment_type)",
];

#[derive(Clone)]
pub struct PgStore(sqlx::PgPool);

impl PgStore {
    pub fn new(pool: sqlx::PgPool) -> PgStore {
        PgStore(pool)
    }

    /// Create the tables and indexes this layer uses. Idempotent.
    pub async fn init_schema(&self) -> anyhow::Result<()> {
        for stmt in SCHEMA {
            sqlx::query(stmt)
                .execute(&self.0)
                .await
                .with_context(|| format!("executing schema statement {stmt:?}"))?;
        }
        Ok(())
    }
}

fn comment_from_row(row: sqlx::postgres::PgRow) -> anyhow::Result<Comment> {
    let data: serde_json::Value = row.try_get("data").context("retrieving the data field")?;
    serde_json::from_value(data).context("deserializing comment document")
}

#[async_trait]
impl Store for PgStore {
    async fn contract_by_slug(&self, slug: &str) -> anyhow::Result<Option<Contract>> {
        sqlx::query("SELECT data FROM contracts WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.0)
            .await
            .with_context(|| format!("querying contracts table for slug {slug:?}"))?
            .map(|row| {
                let data: serde_json::Value =
                    row.try_get("data").context("retrieving the data field")?;
                serde_json::from_value(data).context("deserializing contract document")
            })
            .transpose()
    }

    async fn bets_on(&self, contract: ContractId) -> anyhow::Result<Vec<Bet>> {
        sqlx::query("SELECT data FROM bets WHERE contract_id = $1 ORDER BY created_time DESC")
            .bind(contract.0)
            .fetch_all(&self.0)
            .await
            .with_context(|| format!("querying bets table for {contract:?}"))?
            .into_iter()
            .map(|row| {
                let data: serde_json::Value =
                    row.try_get("data").context("retrieving the data field")?;
                serde_json::from_value(data).context("deserializing bet document")
            })
            .collect()
    }

    async fn write_comment(&self, comment: &Comment) -> anyhow::Result<()> {
        // serde strips absent optional fields here, so they are never stored
        // as null placeholders
        let data = serde_json::to_value(comment).context("serializing comment document")?;
        let res = sqlx::query(
            "INSERT INTO comments (comment_type, parent_id, id, user_id, created_time, data)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (comment_type, parent_id, id) DO UPDATE
             SET user_id = EXCLUDED.user_id,
                 created_time = EXCLUDED.created_time,
                 data = EXCLUDED.data",
        )
        .bind(comment.kind().as_str())
        .bind(comment.parent_id())
        .bind(comment.id.0)
        .bind(comment.user_id.0)
        .bind(comment.created_time)
        .bind(data)
        .execute(&self.0)
        .await
        .with_context(|| format!("writing comment {:?}", comment.id))?;
        anyhow::ensure!(
            res.rows_affected() == 1,
            "write of comment {:?} affected {} rows",
            comment.id,
            res.rows_affected()
        );
        Ok(())
    }

    async fn list_comments(&self, query: &CommentQuery) -> anyhow::Result<Vec<Comment>> {
        let filter = query::to_postgres(query, 1);
        let mut sql = format!(
            "SELECT data FROM comments WHERE {} ORDER BY created_time DESC",
            filter.where_clause,
        );
        if query.limit.is_some() {
            sql.push_str(&format!(" LIMIT ${}", 1 + filter.binds.len()));
        }
        let mut q = sqlx::query(&sql);
        for bind in filter.binds {
            q = match bind {
                Bind::Uuid(v) => q.bind(v),
                Bind::String(v) => q.bind(v),
                Bind::I64(v) => q.bind(v),
            };
        }
        if let Some(limit) = query.limit {
            q = q.bind(limit as i64);
        }
        q.fetch_all(&self.0)
            .await
            .context("querying comments table")?
            .into_iter()
            .map(comment_from_row)
            .collect()
    }
}

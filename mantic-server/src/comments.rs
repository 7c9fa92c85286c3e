use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use mantic_api::{
    now_millis, Comment, CommentId, CommentKind, CommentParent, CommentQuery, Content, Contract,
    ContractId, Group, GroupId, Post, PostId, Store, User, Uuid,
};
use serde_json::json;

use crate::{
    analytics::Analytics,
    feeds::{CommentFeeds, Subscription},
    Error,
};

/// How far back the fixed recent-comments view reaches.
pub const RECENT_COMMENT_DAYS: i64 = 3;

/// The comment access layer: creation, one-shot listing, and continuous
/// subscription, scoped to a single parent surface or database-wide.
#[derive(Clone)]
pub struct Comments {
    store: Arc<dyn Store>,
    feeds: CommentFeeds,
    analytics: Analytics,
    /// When set, the creation analytics event is emitted only once the write
    /// has succeeded, instead of before it is attempted.
    track_after_write: bool,
    recent: CommentQuery,
}

impl Comments {
    pub fn new(store: Arc<dyn Store>, analytics: Analytics, track_after_write: bool) -> Comments {
        // The recent-view cutoff is captured here, once, and does not advance
        // for the lifetime of this value.
        let since = (Utc::now() - Duration::days(RECENT_COMMENT_DAYS)).timestamp_millis();
        Comments {
            store,
            feeds: CommentFeeds::new(),
            analytics,
            track_after_write,
            recent: CommentQuery::created_after(since),
        }
    }

    pub async fn create_on_contract(
        &self,
        contract: &Contract,
        answer_outcome: Option<String>,
        content: Content,
        author: &User,
        reply_to: Option<CommentId>,
        bounty: Option<bool>,
    ) -> Result<Comment, Error> {
        let id = CommentId(Uuid::new_v4());
        let parent = CommentParent::Contract {
            contract_id: contract.id,
            answer_outcome,
        };
        self.create(id, parent, content, author, reply_to, bounty)
            .await
    }

    pub async fn create_on_group(
        &self,
        group: &Group,
        content: Content,
        author: &User,
        reply_to: Option<CommentId>,
    ) -> Result<Comment, Error> {
        let id = CommentId(Uuid::new_v4());
        let parent = CommentParent::Group { group_id: group.id };
        self.create(id, parent, content, author, reply_to, None).await
    }

    pub async fn create_on_post(
        &self,
        post: &Post,
        content: Content,
        author: &User,
        reply_to: Option<CommentId>,
    ) -> Result<Comment, Error> {
        let id = CommentId(Uuid::new_v4());
        let parent = CommentParent::Post { post_id: post.id };
        self.create(id, parent, content, author, reply_to, None).await
    }

    async fn create(
        &self,
        id: CommentId,
        parent: CommentParent,
        content: Content,
        author: &User,
        reply_to: Option<CommentId>,
        bounty: Option<bool>,
    ) -> Result<Comment, Error> {
        let comment = Comment {
            id,
            user_id: author.id,
            user_name: author.name.clone(),
            user_username: author.username.clone(),
            user_avatar_url: author.avatar_url.clone(),
            content,
            created_time: now_millis(),
            reply_to_comment_id: reply_to,
            parent,
        };
        comment.validate()?;

        if !self.track_after_write {
            self.track_created(&comment, bounty);
        }
        self.store
            .write_comment(&comment)
            .await
            .with_context(|| format!("writing comment {:?}", comment.id))?;
        if self.track_after_write {
            self.track_created(&comment, bounty);
        }
        self.feeds.notify(&comment).await;
        Ok(comment)
    }

    fn track_created(&self, comment: &Comment, bounty: Option<bool>) {
        let mut properties = json!({
            "userId": comment.user_id,
            "commentId": comment.id,
            "parentId": comment.parent_id(),
        });
        if let Some(reply_to) = &comment.reply_to_comment_id {
            properties["replyToCommentId"] = json!(reply_to);
        }
        if comment.kind() == CommentKind::Contract {
            if let Some(bounty) = bounty {
                properties["bounty"] = json!(bounty);
            }
        }
        self.analytics
            .track(&format!("{} message", comment.kind()), properties);
    }

    /// All comments on a market, most recent first, optionally capped.
    pub async fn list_for_contract(
        &self,
        contract: ContractId,
        max_count: Option<u32>,
    ) -> anyhow::Result<Vec<Comment>> {
        let mut query = CommentQuery::on_contract(contract);
        if let Some(max_count) = max_count {
            query = query.with_limit(max_count);
        }
        self.store
            .list_comments(&query)
            .await
            .with_context(|| format!("listing comments on contract {contract:?}"))
    }

    pub async fn list_for_group(&self, group: GroupId) -> anyhow::Result<Vec<Comment>> {
        self.store
            .list_comments(&CommentQuery::on_group(group))
            .await
            .with_context(|| format!("listing comments on group {group:?}"))
    }

    pub async fn list_for_post(&self, post: PostId) -> anyhow::Result<Vec<Comment>> {
        self.store
            .list_comments(&CommentQuery::on_post(post))
            .await
            .with_context(|| format!("listing comments on post {post:?}"))
    }

    pub async fn subscribe_for_contract(
        &self,
        contract: ContractId,
        on_snapshot: impl FnMut(Vec<Comment>) + Send + 'static,
    ) -> Subscription {
        self.watch(CommentQuery::on_contract(contract), on_snapshot)
            .await
    }

    pub async fn subscribe_for_group(
        &self,
        group: GroupId,
        on_snapshot: impl FnMut(Vec<Comment>) + Send + 'static,
    ) -> Subscription {
        self.watch(CommentQuery::on_group(group), on_snapshot).await
    }

    pub async fn subscribe_for_post(
        &self,
        post: PostId,
        on_snapshot: impl FnMut(Vec<Comment>) + Send + 'static,
    ) -> Subscription {
        self.watch(CommentQuery::on_post(post), on_snapshot).await
    }

    /// The fixed recent-comments view: all comments database-wide created
    /// within [`RECENT_COMMENT_DAYS`] of this value's construction.
    pub fn recent_query(&self) -> &CommentQuery {
        &self.recent
    }

    pub async fn recent(&self) -> anyhow::Result<Vec<Comment>> {
        self.store
            .list_comments(&self.recent)
            .await
            .context("listing recent comments")
    }

    pub async fn subscribe_recent(
        &self,
        on_snapshot: impl FnMut(Vec<Comment>) + Send + 'static,
    ) -> Subscription {
        self.watch(self.recent.clone(), on_snapshot).await
    }

    /// Firehose of the `max_count` most recent comments platform-wide, with
    /// no parent-type or recency filter.
    pub async fn subscribe_live(
        &self,
        max_count: u32,
        on_snapshot: impl FnMut(Vec<Comment>) + Send + 'static,
    ) -> Subscription {
        self.watch(CommentQuery::all().with_limit(max_count), on_snapshot)
            .await
    }

    /// Run a query value, e.g. one built by
    /// [`CommentQuery::user_contract_comments`].
    pub async fn list(&self, query: &CommentQuery) -> anyhow::Result<Vec<Comment>> {
        self.store
            .list_comments(query)
            .await
            .context("listing comments")
    }

    async fn watch(
        &self,
        query: CommentQuery,
        on_snapshot: impl FnMut(Vec<Comment>) + Send + 'static,
    ) -> Subscription {
        self.feeds
            .watch(self.store.clone(), query, Box::new(on_snapshot))
            .await
    }
}

use uuid::Uuid;

use crate::{Comment, CommentKind, ContractId, GroupId, PostId, UserId};

/// Scope restricting a query to a single parent's comments.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ParentRef {
    pub kind: CommentKind,
    pub id: Uuid,
}

/// A reusable comment query value: filters plus an optional result cap.
/// Results are always ordered by creation time descending; the server
/// translates the value to SQL, the mock store evaluates `matches` directly.
///
/// A query without a `parent` scope spans every comment in the database
/// regardless of parent type.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentQuery {
    pub parent: Option<ParentRef>,
    pub user_id: Option<UserId>,
    pub comment_type: Option<CommentKind>,
    pub created_after: Option<i64>,
    pub limit: Option<u32>,
}

impl CommentQuery {
    /// All comments database-wide, unfiltered.
    pub fn all() -> CommentQuery {
        CommentQuery {
            parent: None,
            user_id: None,
            comment_type: None,
            created_after: None,
            limit: None,
        }
    }

    pub fn on_contract(contract: ContractId) -> CommentQuery {
        CommentQuery {
            parent: Some(ParentRef {
                kind: CommentKind::Contract,
                id: contract.0,
            }),
            ..CommentQuery::all()
        }
    }

    pub fn on_group(group: GroupId) -> CommentQuery {
        CommentQuery {
            parent: Some(ParentRef {
                kind: CommentKind::Group,
                id: group.0,
            }),
            ..CommentQuery::all()
        }
    }

    pub fn on_post(post: PostId) -> CommentQuery {
        CommentQuery {
            parent: Some(ParentRef {
                kind: CommentKind::Post,
                id: post.0,
            }),
            ..CommentQuery::all()
        }
    }

    /// Database-wide comments created at or after `since` (epoch millis).
    pub fn created_after(since: i64) -> CommentQuery {
        CommentQuery {
            created_after: Some(since),
            ..CommentQuery::all()
        }
    }

    /// All market comments authored by `user`, regardless of which market.
    /// Returned as a value; the caller decides when and where to run it.
    pub fn user_contract_comments(user: UserId) -> CommentQuery {
        CommentQuery {
            user_id: Some(user),
            comment_type: Some(CommentKind::Contract),
            ..CommentQuery::all()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> CommentQuery {
        self.limit = Some(limit);
        self
    }

    /// Whether a comment belongs to this query's matched set. The `limit`
    /// cap applies to result sets, not to membership.
    pub fn matches(&self, comment: &Comment) -> bool {
        if let Some(parent) = &self.parent {
            if comment.kind() != parent.kind || comment.parent_id() != parent.id {
                return false;
            }
        }
        if let Some(user) = &self.user_id {
            if comment.user_id != *user {
                return false;
            }
        }
        if let Some(kind) = &self.comment_type {
            if comment.kind() != *kind {
                return false;
            }
        }
        if let Some(after) = self.created_after {
            if comment.created_time < after {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommentId, CommentParent, Content, STUB_UUID};

    fn comment(user: UserId, parent: CommentParent, created_time: i64) -> Comment {
        Comment {
            id: CommentId(Uuid::new_v4()),
            user_id: user,
            user_name: String::from("someone"),
            user_username: String::from("someone"),
            user_avatar_url: None,
            content: Content::text("hm"),
            created_time,
            reply_to_comment_id: None,
            parent,
        }
    }

    fn on_contract(user: UserId) -> Comment {
        comment(
            user,
            CommentParent::Contract {
                contract_id: ContractId::stub(),
                answer_outcome: None,
            },
            1000,
        )
    }

    #[test]
    fn parent_scope_checks_kind_and_id() {
        let q = CommentQuery::on_contract(ContractId::stub());
        assert!(q.matches(&on_contract(UserId::stub())));

        let other = CommentQuery::on_contract(ContractId(Uuid::new_v4()));
        assert!(!other.matches(&on_contract(UserId::stub())));

        let group = comment(
            UserId::stub(),
            CommentParent::Group {
                group_id: GroupId(STUB_UUID),
            },
            1000,
        );
        // same parent uuid, different kind
        assert!(!q.matches(&group));
    }

    #[test]
    fn user_contract_comments_excludes_other_kinds_and_users() {
        let user = UserId(Uuid::new_v4());
        let q = CommentQuery::user_contract_comments(user);

        assert!(q.matches(&on_contract(user)));
        assert!(!q.matches(&on_contract(UserId(Uuid::new_v4()))));

        let group = comment(
            user,
            CommentParent::Group {
                group_id: GroupId::stub(),
            },
            1000,
        );
        let post = comment(
            user,
            CommentParent::Post {
                post_id: PostId::stub(),
            },
            1000,
        );
        assert!(!q.matches(&group));
        assert!(!q.matches(&post));
    }

    #[test]
    fn created_after_is_inclusive() {
        let q = CommentQuery::created_after(1000);
        assert!(q.matches(&on_contract(UserId::stub())));

        let older = comment(
            UserId::stub(),
            CommentParent::Contract {
                contract_id: ContractId::stub(),
                answer_outcome: None,
            },
            999,
        );
        assert!(!q.matches(&older));
    }

    #[test]
    fn limit_does_not_affect_membership() {
        let q = CommentQuery::all().with_limit(0);
        assert!(q.matches(&on_contract(UserId::stub())));
    }
}

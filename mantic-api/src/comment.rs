use std::fmt;

use uuid::Uuid;

use crate::{Content, ContractId, Error, GroupId, PostId, UserId, STUB_UUID};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn stub() -> CommentId {
        CommentId(STUB_UUID)
    }
}

/// The three kinds of parent surface a comment can be attached to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    Contract,
    Group,
    Post,
}

impl CommentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentKind::Contract => "contract",
            CommentKind::Group => "group",
            CommentKind::Post => "post",
        }
    }
}

impl fmt::Display for CommentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parent-type tag carried by every comment, discriminated on the wire by
/// the `commentType` field. The tag never changes after creation.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "commentType")]
pub enum CommentParent {
    #[serde(rename = "contract", rename_all = "camelCase")]
    Contract {
        contract_id: ContractId,
        /// Outcome/answer label the comment was made on, recorded at comment
        /// time.
        #[serde(skip_serializing_if = "Option::is_none")]
        answer_outcome: Option<String>,
    },
    #[serde(rename = "group", rename_all = "camelCase")]
    Group { group_id: GroupId },
    #[serde(rename = "post", rename_all = "camelCase")]
    Post { post_id: PostId },
}

impl CommentParent {
    pub fn kind(&self) -> CommentKind {
        match self {
            CommentParent::Contract { .. } => CommentKind::Contract,
            CommentParent::Group { .. } => CommentKind::Group,
            CommentParent::Post { .. } => CommentKind::Post,
        }
    }

    pub fn parent_id(&self) -> Uuid {
        match self {
            CommentParent::Contract { contract_id, .. } => contract_id.0,
            CommentParent::Group { group_id } => group_id.0,
            CommentParent::Post { post_id } => post_id.0,
        }
    }
}

/// A single comment. Created exactly once, never mutated by this layer;
/// `created_time` is the sole ordering key. Optional fields that are absent
/// are stripped at serialization time and never stored as null placeholders.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,

    /// Author display fields, denormalized at creation time.
    pub user_name: String,
    pub user_username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_avatar_url: Option<String>,

    pub content: Content,
    pub created_time: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_comment_id: Option<CommentId>,

    #[serde(flatten)]
    pub parent: CommentParent,
}

impl Comment {
    pub fn kind(&self) -> CommentKind {
        self.parent.kind()
    }

    pub fn parent_id(&self) -> Uuid {
        self.parent.parent_id()
    }

    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.user_name)?;
        crate::validate_string(&self.user_username)?;
        if let Some(url) = &self.user_avatar_url {
            crate::validate_string(url)?;
        }
        if let CommentParent::Contract {
            answer_outcome: Some(outcome),
            ..
        } = &self.parent
        {
            crate::validate_string(outcome)?;
        }
        self.content.validate()
    }
}

use uuid::Uuid;

use crate::{UserId, STUB_UUID};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct GroupId(pub Uuid);

impl GroupId {
    pub fn stub() -> GroupId {
        GroupId(STUB_UUID)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub slug: String,
    pub name: String,
    pub creator_id: UserId,
    pub created_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

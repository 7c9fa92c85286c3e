use uuid::Uuid;

use crate::{ContractId, UserId, STUB_UUID};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct BetId(pub Uuid);

impl BetId {
    pub fn stub() -> BetId {
        BetId(STUB_UUID)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub id: BetId,
    pub user_id: UserId,
    pub contract_id: ContractId,
    pub created_time: i64,

    pub amount: f64,
    pub outcome: String,
    pub shares: f64,
    pub prob_before: f64,
    pub prob_after: f64,
}

use uuid::Uuid;

use crate::{Bet, Comment, Content, UserId, STUB_UUID};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct ContractId(pub Uuid);

impl ContractId {
    pub fn stub() -> ContractId {
        ContractId(STUB_UUID)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeType {
    Binary,
    FreeResponse,
    MultipleChoice,
    Numeric,
}

/// A market. Resolved by slug for the aggregation endpoint; comments and bets
/// attach to its id.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: ContractId,
    /// Human-readable unique identifier, distinct from `id`.
    pub slug: String,

    pub creator_id: UserId,
    pub creator_name: String,
    pub creator_username: String,

    pub question: String,
    pub description: Content,
    pub outcome_type: OutcomeType,

    pub created_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_time: Option<i64>,

    pub is_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_time: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    pub volume: f64,
}

/// The aggregation payload: the contract's public fields flattened together
/// with its full bet and comment lists.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FullMarket {
    #[serde(flatten)]
    pub contract: Contract,
    pub bets: Vec<Bet>,
    pub comments: Vec<Comment>,
}

use chrono::Utc;

pub use uuid::{uuid, Uuid};

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

mod bet;
mod comment;
mod content;
mod contract;
mod db;
mod error;
mod group;
mod post;
mod query;
mod user;

pub use bet::{Bet, BetId};
pub use comment::{Comment, CommentId, CommentKind, CommentParent};
pub use content::Content;
pub use contract::{Contract, ContractId, FullMarket, OutcomeType};
pub use db::Store;
pub use error::Error;
pub use group::{Group, GroupId};
pub use post::{Post, PostId};
pub use query::{CommentQuery, ParentRef};
pub use user::{User, UserId};

/// Milliseconds since the unix epoch, the creation-time format stored on all
/// records. Assigned by the writer's clock, not by the database.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

// PostgreSQL rejects NUL bytes in TEXT and JSONB values, so they must be
// caught before a write is attempted.
pub(crate) fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(s.to_string())),
        false => Ok(()),
    }
}

use serde_json::json;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Contract not found")]
    ContractNotFound,

    #[error("Comment content must not be empty")]
    EmptyContent,

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::ContractNotFound => StatusCode::NOT_FOUND,
            Error::EmptyContent => StatusCode::BAD_REQUEST,
            Error::NullByteInString(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&match self {
            Error::Unknown(msg) => json!({ "error": msg }),
            Error::ContractNotFound => json!({ "error": "Contract not found" }),
            Error::EmptyContent => json!({ "error": "Comment content must not be empty" }),
            Error::NullByteInString(_) => json!({ "error": "Null byte in string is not allowed" }),
        })
        .expect("serializing error body")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_has_the_fixed_error_body() {
        assert_eq!(
            Error::ContractNotFound.status_code(),
            http::StatusCode::NOT_FOUND,
        );
        let body: serde_json::Value =
            serde_json::from_slice(&Error::ContractNotFound.contents()).unwrap();
        assert_eq!(body, json!({ "error": "Contract not found" }));
    }
}

use serde_json::{json, Value};

use crate::Error;

/// Rich-text content: a structured document tree in the editor's JSON format,
/// stored verbatim rather than flattened to plain text.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Content(pub Value);

impl Content {
    /// A single-paragraph document wrapping `text`.
    pub fn text(text: impl Into<String>) -> Content {
        Content(json!({
            "type": "doc",
            "content": [{
                "type": "paragraph",
                "content": [{ "type": "text", "text": text.into() }],
            }],
        }))
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::EmptyContent);
        }
        validate_value(&self.0)
    }

    fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(nodes) => nodes.is_empty(),
            Value::Object(doc) => match doc.get("content") {
                Some(Value::Array(nodes)) => nodes.is_empty(),
                Some(_) | None => !doc.contains_key("text"),
            },
            _ => false,
        }
    }
}

fn validate_value(v: &Value) -> Result<(), Error> {
    match v {
        Value::String(s) => crate::validate_string(s),
        Value::Array(vs) => {
            for v in vs {
                validate_value(v)?;
            }
            Ok(())
        }
        Value::Object(m) => {
            for (k, v) in m {
                crate::validate_string(k)?;
                validate_value(v)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

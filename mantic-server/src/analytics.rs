use serde_json::json;

/// Fire-and-forget event sink. Delivery is never observed by callers;
/// failures are logged and dropped.
#[derive(Clone)]
pub struct Analytics {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl Analytics {
    pub fn new(endpoint: Option<String>) -> Analytics {
        Analytics {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// A sink with no endpoint: events are logged and dropped.
    pub fn disabled() -> Analytics {
        Analytics::new(None)
    }

    pub fn track(&self, event: &str, properties: serde_json::Value) {
        tracing::debug!(event, %properties, "analytics event");
        let endpoint = match &self.endpoint {
            None => return,
            Some(endpoint) => endpoint.clone(),
        };
        let client = self.client.clone();
        let body = json!({ "event": event, "properties": properties });
        tokio::spawn(async move {
            if let Err(err) = client.post(&endpoint).json(&body).send().await {
                tracing::warn!(?err, "failed delivering analytics event");
            }
        });
    }
}

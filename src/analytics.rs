/// Anonymous usage reporting through the GA4 Measurement Protocol
///
/// Content scripts cannot reach the collector themselves, so they send a
/// `track_event` runtime message and the background worker delivers it.

use crate::chrome;
use crate::config::AnalyticsConfig;
use crate::error::AnalyticsError;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const TRACK_EVENT_ACTION: &str = "track_event";

/// Message exchanged between the content script and the background worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeMessage {
    pub action: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl RuntimeMessage {
    pub fn track_event(category: &str, label: &str) -> Self {
        RuntimeMessage {
            action: TRACK_EVENT_ACTION.to_string(),
            category: Some(category.to_string()),
            label: Some(label.to_string()),
        }
    }

    /// `(category, label)` when this is a well-formed `track_event` message
    pub fn into_track_event(self) -> Option<(String, Option<String>)> {
        if self.action != TRACK_EVENT_ACTION {
            return None;
        }
        self.category.map(|category| (category, self.label))
    }
}

/// Where the content script sends its usage events
pub trait EventReporter {
    fn report(&self, category: &str, label: &str);
}

/// Reports through `chrome.runtime.sendMessage`
pub struct RuntimeReporter;

impl EventReporter for RuntimeReporter {
    fn report(&self, category: &str, label: &str) {
        chrome::send_message(&RuntimeMessage::track_event(category, label));
    }
}

/// Collector request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub client_id: String,
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub name: String,
    pub params: EventParams,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventParams {
    pub session_id: String,
    pub engagement_time_msec: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Session cached in the session storage area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SessionData {
    session_id: String,
    timestamp: f64,
}

/// HTTP delivery of a payload to the collector
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, url: &str, payload: &Payload) -> Result<(), AnalyticsError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, payload: &Payload) -> Result<(), AnalyticsError> {
        let response = self.client.post(url).json(payload).send().await?;

        if !response.status().is_success() {
            return Err(AnalyticsError::Rejected(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Client/session identity plus delivery. `L` persists the client id
/// permanently, `S` holds the rolling session.
pub struct Analytics<L, S, T> {
    config: AnalyticsConfig,
    local: L,
    session: S,
    transport: T,
}

impl<L: KeyValueStore, S: KeyValueStore, T: Transport> Analytics<L, S, T> {
    pub fn new(config: AnalyticsConfig, local: L, session: S, transport: T) -> Self {
        Analytics {
            config,
            local,
            session,
            transport,
        }
    }

    /// Persistent random id so the same profile counts as one user across restarts
    pub async fn client_id(&self) -> Result<String, AnalyticsError> {
        let stored = self.local.get(&self.config.client_id_key, Value::Null).await?;
        if let Some(client_id) = stored.as_str().filter(|id| !id.is_empty()) {
            return Ok(client_id.to_string());
        }

        let client_id = Uuid::new_v4().to_string();
        self.local
            .set(&self.config.client_id_key, Value::String(client_id.clone()))
            .await?;
        Ok(client_id)
    }

    /// Session id, rotated after `session_expiration_min` of inactivity.
    /// Every call within the window extends it.
    pub async fn session_id(&self, now_ms: f64) -> Result<String, AnalyticsError> {
        let stored = self.session.get(&self.config.session_key, Value::Null).await?;
        let current = serde_json::from_value::<SessionData>(stored).ok();

        let session = match current {
            Some(session) if !self.is_expired(&session, now_ms) => SessionData {
                timestamp: now_ms,
                ..session
            },
            _ => SessionData {
                session_id: (now_ms as u64).to_string(),
                timestamp: now_ms,
            },
        };

        let value = serde_json::to_value(&session).map_err(crate::error::StorageError::from)?;
        self.session.set(&self.config.session_key, value).await?;
        Ok(session.session_id)
    }

    fn is_expired(&self, session: &SessionData, now_ms: f64) -> bool {
        let duration_min = (now_ms - session.timestamp) / 60_000.0;
        duration_min > self.config.session_expiration_min
    }

    pub fn build_payload(
        &self,
        client_id: String,
        session_id: String,
        name: &str,
        label: Option<&str>,
    ) -> Payload {
        Payload {
            client_id,
            events: vec![EventRecord {
                name: name.to_string(),
                params: EventParams {
                    session_id,
                    engagement_time_msec: self.config.engagement_time_msec,
                    label: label.map(str::to_string),
                },
            }],
        }
    }

    /// Send one event. No retry; the caller only logs failures.
    pub async fn fire_event(
        &self,
        name: &str,
        label: Option<&str>,
        now_ms: f64,
    ) -> Result<(), AnalyticsError> {
        let client_id = self.client_id().await?;
        let session_id = self.session_id(now_ms).await?;
        let payload = self.build_payload(client_id, session_id, name, label);

        self.transport
            .post_json(&self.config.collect_url(), &payload)
            .await?;
        log::debug!("[Analytics] Sent event: {}", name);
        Ok(())
    }
}

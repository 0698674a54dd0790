use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::envelope::{self, RequestEnvelope};
use crate::{warn_time, Config, Error, Result};

const DISTRICT_ACTION: &str = "base/load/district";
const OPTION_MAP_ACTION: &str = "base/load/option/map";

/// Which child category is requested for a parent id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    District,
    CarModel,
    CarBodyStyles,
    CarModelYear,
}

impl Level {
    pub fn action_name(self) -> &'static str {
        match self {
            Level::District => DISTRICT_ACTION,
            _ => OPTION_MAP_ACTION,
        }
    }

    /// `child_code` understood by the option map action.
    pub fn child_code(self) -> Option<&'static str> {
        match self {
            Level::District => None,
            Level::CarModel => Some("CAR_MODEL"),
            Level::CarBodyStyles => Some("CAR_BODY_STYLES"),
            Level::CarModelYear => Some("CAR_MODEL_YEAR"),
        }
    }

    pub fn envelope(self, parent_id: &str, product_id: &str) -> Result<RequestEnvelope<'static>> {
        match self.child_code() {
            None => RequestEnvelope::new(self.action_name(), &DistrictQuery { root_id: parent_id }),
            Some(child_code) => RequestEnvelope::new(
                self.action_name(),
                &OptionMapQuery {
                    root_id: parent_id,
                    child_code,
                    product_id,
                },
            ),
        }
    }
}

#[derive(Serialize)]
struct DistrictQuery<'a> {
    root_id: &'a str,
}

#[derive(Serialize)]
struct OptionMapQuery<'a> {
    root_id: &'a str,
    child_code: &'a str,
    product_id: &'a str,
}

/// Source of child nodes for a parent id at a given level.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch_children(&self, parent_id: &str, level: Level) -> Result<Vec<Value>>;
}

/// Talks to the real endpoint with a single reqwest `Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    product_id: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(config.headers.clone())
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            product_id: config.product_id.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_children(&self, parent_id: &str, level: Level) -> Result<Vec<Value>> {
        let body = level.envelope(parent_id, &self.product_id)?;
        let res = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status,
                parent_id: parent_id.to_string(),
            });
        }
        let raw = res.bytes().await?;
        envelope::unwrap(&raw)
    }
}

/// Wraps a `Transport` with the pacing policy and the "failed branch is empty" rule.
///
/// Calls are issued one at a time; every call after the first waits `delay` first.
pub struct Fetcher<T> {
    transport: T,
    delay: Duration,
    called: AtomicBool,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, delay: Duration) -> Self {
        Self {
            transport,
            delay,
            called: AtomicBool::new(false),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Paced call that still reports failures.
    pub async fn try_children(&self, parent_id: &str, level: Level) -> Result<Vec<Value>> {
        if self.called.swap(true, Ordering::SeqCst) && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.transport.fetch_children(parent_id, level).await
    }

    /// Paced call; any failure is logged and turned into no children.
    pub async fn children(&self, parent_id: &str, level: Level) -> Vec<Value> {
        match self.try_children(parent_id, level).await {
            Ok(nodes) => nodes,
            Err(e) => {
                warn_time!("{:?} for {} left empty: {}", level, parent_id, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;
    use tokio::time::Instant;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, Level, Instant)>>,
        fail: bool,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn fetch_children(&self, parent_id: &str, level: Level) -> Result<Vec<Value>> {
            self.calls
                .lock()
                .unwrap()
                .push((parent_id.to_string(), level, Instant::now()));
            if self.fail {
                return Err(Error::Decode(serde_json::from_str::<Value>("{").unwrap_err()));
            }
            Ok(vec![json!({"id": parent_id, "name": "child"})])
        }
    }

    #[test]
    fn envelopes_per_level() {
        let env = Level::District.envelope("p-1", "prod").unwrap();
        assert_eq!(env.action_name, "base/load/district");
        assert_eq!(env.data, r#"{"root_id":"p-1"}"#);

        let env = Level::CarModelYear.envelope("m-9", "prod").unwrap();
        assert_eq!(env.action_name, "base/load/option/map");
        assert_eq!(
            env.data,
            r#"{"root_id":"m-9","child_code":"CAR_MODEL_YEAR","product_id":"prod"}"#
        );
    }

    #[tokio::test(start_paused = true)]
    async fn pacing_waits_between_calls_only() {
        let fetcher = Fetcher::new(Recorder::default(), Duration::from_millis(500));
        let start = Instant::now();
        for id in ["a", "b", "c"] {
            fetcher.children(id, Level::CarModel).await;
        }

        let calls = fetcher.transport().calls.lock().unwrap();
        let offsets: Vec<_> = calls.iter().map(|(_, _, at)| *at - start).collect();
        assert_eq!(
            offsets,
            vec![
                Duration::ZERO,
                Duration::from_millis(500),
                Duration::from_millis(1000)
            ]
        );
    }

    #[tokio::test]
    async fn failures_become_empty() {
        let recorder = Recorder {
            fail: true,
            ..Default::default()
        };
        let fetcher = Fetcher::new(recorder, Duration::ZERO);
        assert!(fetcher.children("x", Level::District).await.is_empty());
        assert!(fetcher.try_children("x", Level::District).await.is_err());
        assert_eq!(fetcher.transport().calls.lock().unwrap().len(), 2);
    }
}

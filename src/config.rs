use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::{
    ADMIN_OUTPUT_FILE, API_ORIGIN, API_REFERER, API_URL, BRAND_DIR, BRAND_SEED_FILE,
    PRODUCT_ID, PROVINCE_SEED_FILE, REQUEST_DELAY_MS, REQUEST_TIMEOUT_MS, USER_AGENT,
    VEHICLE_OUTPUT_FILE,
};

/// Everything a harvest run needs to know about the upstream and the local files.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub headers: HeaderMap,
    /// Upper bound for a single request, connect + body.
    pub timeout: Duration,
    /// Pause between two successive upstream calls.
    pub delay: Duration,
    pub product_id: String,

    pub province_seed_file: PathBuf,
    pub brand_seed_file: PathBuf,
    pub admin_output: PathBuf,
    pub vehicle_output: PathBuf,
    pub brand_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: API_URL.to_string(),
            headers: default_headers(),
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            delay: Duration::from_millis(REQUEST_DELAY_MS),
            product_id: PRODUCT_ID.to_string(),
            province_seed_file: PROVINCE_SEED_FILE.into(),
            brand_seed_file: BRAND_SEED_FILE.into(),
            admin_output: ADMIN_OUTPUT_FILE.into(),
            vehicle_output: VEHICLE_OUTPUT_FILE.into(),
            brand_dir: BRAND_DIR.into(),
        }
    }
}

impl Config {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// The upstream only answers requests that look like they came from its own web form.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
    );
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=UTF-8"),
    );
    headers.insert(header::ORIGIN, HeaderValue::from_static(API_ORIGIN));
    headers.insert(header::REFERER, HeaderValue::from_static(API_REFERER));
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
    headers
}

//! Reference data harvester for the BHV online endpoint.
//!
//! Walks fixed-depth hierarchies (province -> districts/wards, brand -> model ->
//! {body styles, years}) one request at a time and writes the whole tree to JSON.

mod macros;

pub mod aggregate;
pub mod config;
pub mod envelope;
mod error;
pub mod model;
pub mod process;
pub mod request;
pub mod store;

pub use aggregate::{aggregate, Administrative, Hierarchy, Vehicle};
pub use config::Config;
pub use error::{Error, Result};
pub use model::{ModelEntry, Node, SeedNode, TreeEntry};
pub use request::{Fetcher, HttpTransport, Level, Transport};

const API_URL: &str = "https://online.bhv.com.vn/3f2fb62a-662a-4911-afad-d0ec4925f29e";
const API_ORIGIN: &str = "https://online.bhv.com.vn";
const API_REFERER: &str = "https://online.bhv.com.vn/bao-hiem-xe-co-gioi";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const PRODUCT_ID: &str = "3588e406-6f89-4a14-839b-64460bbcea67";

const REQUEST_TIMEOUT_MS: u64 = 15_000;
const REQUEST_DELAY_MS: u64 = 500;

const PROVINCE_SEED_FILE: &str = "data/provinces.json";
const BRAND_SEED_FILE: &str = "car_automakers.json";
const ADMIN_OUTPUT_FILE: &str = "vietnam_administrative_data_final.json";
const VEHICLE_OUTPUT_FILE: &str = "all_car_details.json";
const BRAND_DIR: &str = "car_brands";

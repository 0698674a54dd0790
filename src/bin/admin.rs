use chrono::Local;
use harvest::{info_time, process::harvest_admin, Config, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    harvest_admin(&Config::default()).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}

use chrono::Local;
use harvest::{info_time, process::harvest_vehicles, Config, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    harvest_vehicles(&Config::default()).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}

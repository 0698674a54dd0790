use harvest::{process::split_brands, Config, Result};

#[tokio::main]
async fn main() -> Result<()> {
    split_brands(&Config::default()).await?;
    Ok(())
}

use bulksms::{GatewayClient, GatewayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = GatewayClient::from_config(GatewayConfig::from_env()?)?;
    let credits = client.get_credits().await?;
    println!("credits: {credits}");

    Ok(())
}

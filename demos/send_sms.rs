use std::io;

use bulksms::{BulkSmsError, GatewayClient, GatewayConfig, Message, RoutingGroup};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let recipients = std::env::var("BULKSMS_RECIPIENTS").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BULKSMS_RECIPIENTS environment variable is required (comma-separated)",
        )
    })?;
    let text = std::env::var("BULKSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the bulksms example.".to_owned());
    let premium = std::env::var("BULKSMS_PREMIUM").is_ok_and(|value| value == "1");

    let client = GatewayClient::from_config(GatewayConfig::from_env()?)?;
    let mut message = Message::new(text, recipients.split(','))?;
    if premium {
        message.set_routing_group(RoutingGroup::Premium);
    }

    match client.send(&mut message).await {
        Ok(()) | Err(BulkSmsError::Gateway(_)) => {
            println!(
                "status: {}, batch id: {:?}",
                message.status_report(),
                message.batch_id()
            );
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

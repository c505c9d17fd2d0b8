use pearl_http::{PearlClient, WebhookEndpointRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = PearlClient::from_env()?;
    let webhooks = client.webhooks();

    webhooks
        .register(
            &WebhookEndpointRequest::new("https://example.com/pearl/webhook"),
            None,
        )
        .await?;
    println!("webhook registered");

    webhooks
        .update(
            &WebhookEndpointRequest::new("https://example.com/pearl/webhook-v2"),
            None,
        )
        .await?;
    println!("webhook updated");

    Ok(())
}

use pearl_http::PearlClient;

fn main() -> anyhow::Result<()> {
    let client = PearlClient::from_env()?;
    let webhooks = client.webhooks();

    let payload = r#"{"id":"msg-1","sessionId":"session-1234","message":"An expert has replied."}"#;

    // What the service would put in the X-Pearl-API-Signature header.
    let signature = webhooks.compute_signature(payload)?;
    println!("X-Pearl-API-Signature: {signature}");

    let valid = webhooks.is_valid_signature(&signature, payload)?;
    println!("signature valid: {valid}");

    let tampered = payload.replace("expert", "intruder");
    let valid = webhooks.is_valid_signature(&signature, &tampered)?;
    println!("tampered payload valid: {valid}");

    Ok(())
}

use pearl_http::{ChatMessage, CompletionRequest, PearlClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = PearlClient::from_env()?;

    let request = CompletionRequest::new(
        vec![ChatMessage::user("What are the symptoms of dehydration?")],
        "session-1234",
    );
    let response = client.chat().send_completion(request, None).await?;

    for choice in &response.choices {
        let speaker = if choice.message.is_human {
            "expert"
        } else {
            "assistant"
        };
        println!(
            "[{speaker}] {}",
            choice.message.content.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

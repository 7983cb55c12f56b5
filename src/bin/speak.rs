//! One-shot text-to-speech call. The audio is fetched and dropped; a failed
//! call is logged and the process still exits cleanly.

use kalima_backend_rust::config::env_string;
use kalima_backend_rust::logging;
use kalima_backend_rust::services::speech::{self, SpeechClient, SpeechConfig};

const DEFAULT_TEXT: &str = "مرحبا، كيف حالك؟";

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let log_level = env_string("RUST_LOG").unwrap_or_else(|| "info".to_string());
    let _log_guard = logging::init_tracing(&log_level, "speak");

    let config = match SpeechConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "speech call skipped");
            return;
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = if args.is_empty() {
        DEFAULT_TEXT.to_string()
    } else {
        args.join(" ")
    };

    let client = match SpeechClient::new(config) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(error = %err, "speech call skipped");
            return;
        }
    };
    tracing::info!(endpoint = %client.config().endpoint(), chars = text.chars().count(), "requesting speech");
    speech::speak_and_discard(&client, &text).await;
}

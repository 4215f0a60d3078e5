//! CLI command definitions and handlers

use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value};
use std::io::BufRead;
use std::time::Duration;
use tracing::info;

use crate::core::client::TranslationClient;
use crate::core::models::TranslationRequest;
use crate::core::session::SessionStore;

/// Commands for the Ollama translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a single piece of text
    Translate {
        /// Text to translate
        text: String,

        /// Target language (default: zh)
        #[arg(short, long, default_value = "zh")]
        target_lang: String,

        /// Surrounding text used for disambiguation
        #[arg(short, long)]
        context: Option<String>,

        /// Extra generation option, e.g. `-o temperature=0.3` (repeatable)
        #[arg(short = 'o', long = "option", value_parser = parse_option)]
        options: Vec<(String, Value)>,
    },

    /// Translate stdin line by line within one conversation
    Chat {
        /// Target language (default: zh)
        #[arg(short, long, default_value = "zh")]
        target_lang: String,

        /// Surrounding text used for disambiguation
        #[arg(short, long)]
        context: Option<String>,
    },

    /// List models installed in Ollama
    Models,

    /// Check whether Ollama is reachable
    Health,
}

/// Parse `key=value`; the value is read as JSON when it parses, else as a string
pub fn parse_option(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty option name in `{}`", raw));
    }

    let value = serde_json::from_str(value.trim()).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Handle one-shot translation
pub async fn handle_translate(
    client: &TranslationClient,
    text: String,
    target_lang: String,
    context: Option<String>,
    options: Vec<(String, Value)>,
) -> anyhow::Result<()> {
    let mut request = TranslationRequest::new(text).with_target_lang(target_lang);
    if let Some(context) = context {
        request = request.with_context(context);
    }
    request.options = options.into_iter().collect::<Map<String, Value>>();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Translating with {}...", client.config().model));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = client.translate_text(&request, None).await;
    spinner.finish_and_clear();

    println!("{}", result?);
    Ok(())
}

/// Handle conversational translation of stdin
pub async fn handle_chat(
    client: &TranslationClient,
    target_lang: String,
    context: Option<String>,
) -> anyhow::Result<()> {
    let session_id = format!("cli-{}", std::process::id());
    let mut sessions = SessionStore::new();

    info!("Starting session {} (target: {})", session_id, target_lang);

    let stdin = std::io::stdin();
    let mut translated = 0;
    let mut failed = 0;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut request = TranslationRequest::new(line)
            .with_target_lang(target_lang.as_str())
            .with_session(session_id.as_str());
        if let Some(context) = &context {
            request = request.with_context(context.as_str());
        }

        match client.translate_text(&request, Some(&mut sessions)).await {
            Ok(text) => {
                println!("{}", text);
                translated += 1;
            }
            Err(e) => {
                eprintln!("Translation failed: {}", e);
                failed += 1;
            }
        }
    }

    client.clear_session(&session_id, &mut sessions);
    info!("Session finished: {} translated, {} failed", translated, failed);

    if failed > 0 {
        anyhow::bail!("{} line(s) failed to translate", failed);
    }
    Ok(())
}

/// Handle model listing
pub async fn handle_models(client: &TranslationClient) -> anyhow::Result<()> {
    for model in client.list_models().await? {
        println!("{}", model);
    }
    Ok(())
}

/// Handle health check
pub async fn handle_health(client: &TranslationClient) -> anyhow::Result<()> {
    let base_url = &client.config().base_url;
    if client.check_health().await {
        println!("Ollama is running at {}", base_url);
        Ok(())
    } else {
        anyhow::bail!("Ollama is not reachable at {}", base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_option_json_values() {
        assert_eq!(
            parse_option("temperature=0.3").unwrap(),
            ("temperature".to_string(), json!(0.3))
        );
        assert_eq!(
            parse_option("stop=[\"\\n\"]").unwrap(),
            ("stop".to_string(), json!(["\n"]))
        );
    }

    #[test]
    fn test_parse_option_falls_back_to_string() {
        assert_eq!(
            parse_option("mirostat_mode=fast").unwrap(),
            ("mirostat_mode".to_string(), json!("fast"))
        );
    }

    #[test]
    fn test_parse_option_rejects_malformed() {
        assert!(parse_option("temperature").is_err());
        assert!(parse_option("=1").is_err());
    }
}

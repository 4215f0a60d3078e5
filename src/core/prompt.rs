//! Prompt templates

/// Instructions sent as the system message
pub fn system_prompt(target_lang: &str) -> String {
    format!(
        "You are a professional translator. Follow these rules strictly:\n\
         1. Translate the text precisely into {target_lang}, preserving the original meaning.\n\
         2. Use natural, colloquial phrasing that reads well in the target language.\n\
         3. Use the surrounding context to keep terminology and style consistent.\n\
         4. Output ONLY the translation, without any explanation, notes or extra content."
    )
}

/// Body of the user message, with optional context first
pub fn user_message(text: &str, context: Option<&str>) -> String {
    let message = format!("Text to translate:\n{}", text);
    match context {
        Some(context) if !context.is_empty() => {
            format!("Translation context:\n{}\n\n{}", context, message)
        }
        _ => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_names_target() {
        let prompt = system_prompt("ja");
        assert!(prompt.contains("into ja"));
        assert!(prompt.contains("ONLY the translation"));
    }

    #[test]
    fn test_user_message_without_context() {
        assert_eq!(user_message("Hello", None), "Text to translate:\nHello");
        assert_eq!(user_message("Hello", Some("")), "Text to translate:\nHello");
    }

    #[test]
    fn test_user_message_with_context() {
        let message = user_message("bank", Some("We sat by the river"));
        assert_eq!(
            message,
            "Translation context:\nWe sat by the river\n\nText to translate:\nbank"
        );
    }
}

use super::translation_repository::TranslationRepository;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI chat-completion implementation of the translation repository
pub struct OpenAiTranslationRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    target_language: String,
}

impl OpenAiTranslationRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, target_language: String) -> Self {
        Self {
            client,
            model,
            target_language,
        }
    }

    fn system_prompt(&self) -> String {
        format!(
            "You are a translation engine. Translate the user's text into {}. \
             Reply with the translation only, without quotes or commentary. \
             If the text is already in {} or cannot be translated, reply with it unchanged.",
            self.target_language, self.target_language
        )
    }
}

#[async_trait]
impl TranslationRepository for OpenAiTranslationRepository {
    async fn translate(&self, text: &str) -> Result<String, String> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            model = %self.model,
            target_language = %self.target_language,
            text_length = text.len(),
            "Calling OpenAI chat completion for translation"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .temperature(0.0)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(self.system_prompt())
                    .build()
                    .map_err(|e| format!("Invalid translation prompt: {}", e))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(text)
                    .build()
                    .map_err(|e| format!("Invalid translation prompt: {}", e))?
                    .into(),
            ])
            .build()
            .map_err(|e| format!("Invalid translation request: {}", e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                text_length = text.len(),
                "OpenAI translation call failed"
            );
            format!("OpenAI translation error: {}", e)
        })?;

        let translated = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| "OpenAI returned an empty translation".to_string())?;

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            source_length = text.len(),
            translated_length = translated.len(),
            "Translation completed"
        );

        Ok(translated)
    }
}

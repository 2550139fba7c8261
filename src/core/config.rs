use std::env;

/// Model selection and prompt-budget settings for a triage run.
///
/// Everything is passed explicitly to the classifier and extractor so
/// behavior is reproducible in tests without process-wide mutation.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub openai_model: String,
    /// Max characters of subject+body sent with a classification request.
    pub classify_input_limit: usize,
    /// Max characters of subject+body sent with an extraction
    /// request. Larger than the classification limit since event
    /// details are often further into a message body.
    pub extract_input_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let openai_api_hostname = env::var("MAILTRIAGE_LLM_HOST")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key =
            env::var("OPENAI_API_KEY").unwrap_or_else(|_| "thiswontworkforopenai".to_string());
        let openai_model =
            env::var("MAILTRIAGE_LLM_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string());
        let classify_input_limit = env::var("MAILTRIAGE_CLASSIFY_INPUT_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);
        let extract_input_limit = env::var("MAILTRIAGE_EXTRACT_INPUT_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4000);

        Self {
            openai_api_hostname,
            openai_api_key,
            openai_model,
            classify_input_limit,
            extract_input_limit,
        }
    }
}

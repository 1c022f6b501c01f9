use std::sync::Arc;

use async_openai::{config::OpenAIConfig, error::OpenAIError, Client};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::{
    config::Config,
    constants::prompts::{
        JUDGMENT_EVALUATION_CRITERIA, JUDGMENT_INSTRUCTIONS, JUDGMENT_OUTPUT_FORMAT,
        JUDGMENT_SYSTEM_PROMPT, REPORT_INSTRUCTIONS, REPORT_SYSTEM_PROMPT,
    },
    models::domain::{AnswerAttempt, BehaviorLog, BehaviorTotals, Difficulty, JudgmentResult},
    services::session_aggregator::average_risk,
};

const QUESTION_PREVIEW_CHARS: usize = 500;
const PROMPT_BLUR_DURATIONS: usize = 5;
const PROMPT_COPIED_TEXTS: usize = 3;
const REPORT_MAX_TOKENS: u32 = 500;

pub const NO_ATTEMPTS_REPORT: &str = "Insufficient analysis data to generate a report.";
pub const MISSING_KEY_REPORT: &str =
    "OpenAI API key is not set. Set OPENAI_API_KEY to enable session reports.";
pub const INVALID_KEY_REPORT: &str =
    "The OpenAI API key is invalid. Set a valid OPENAI_API_KEY to enable session reports.";
pub const EMPTY_REPORT: &str = "Failed to generate the session report.";

static FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("valid fenced json regex"));

static JUDGMENT_SCHEMA: Lazy<String> = Lazy::new(|| {
    serde_json::to_string_pretty(&schemars::schema_for!(JudgmentResult)).unwrap_or_default()
});

#[derive(Debug, Error, Clone, PartialEq)]
pub enum JudgmentError {
    #[error("completion provider credentials are not configured")]
    MissingCredentials,
    #[error("completion provider rejected the credentials")]
    InvalidCredentials,
    #[error("model '{0}' was not found")]
    UnknownModel(String),
    #[error("completion provider error: {0}")]
    Provider(String),
    #[error("completion provider returned no content")]
    EmptyResponse,
    #[error("judgment is not valid JSON: {0}")]
    Malformed(String),
    #[error("judgment failed validation: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub json_object: bool,
    pub max_tokens: Option<u32>,
}

/// Text-in, text-out access to a chat model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, JudgmentError>;
}

#[derive(Debug, Deserialize)]
struct ChatCompletionBody {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageBody,
}

#[derive(Debug, Deserialize)]
struct ChatMessageBody {
    content: Option<String>,
}

/// Chat completions over the OpenAI API. Without an API key every call fails
/// with [`JudgmentError::MissingCredentials`].
pub struct OpenAiCompletionProvider {
    client: Option<Client<OpenAIConfig>>,
}

impl OpenAiCompletionProvider {
    pub fn new(config: &Config) -> Self {
        let client = config.openai_api_key.as_ref().map(|key| {
            let mut openai_config = OpenAIConfig::new().with_api_key(key.expose_secret());
            if let Some(base) = &config.openai_api_base {
                openai_config = openai_config.with_api_base(base);
            }
            Client::with_config(openai_config)
        });

        Self { client }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, JudgmentError> {
        let client = self
            .client
            .as_ref()
            .ok_or(JudgmentError::MissingCredentials)?;

        let mut body = serde_json::json!({
            "model": &request.model,
            "messages": [
                { "role": "system", "content": &request.system },
                { "role": "user", "content": &request.user },
            ],
        });
        if request.json_object {
            body["response_format"] = serde_json::json!({ "type": "json_object" });
        }
        if let Some(max_tokens) = request.max_tokens {
            body["max_completion_tokens"] = serde_json::json!(max_tokens);
        }

        let response: ChatCompletionBody = client
            .chat()
            .create_byot(body)
            .await
            .map_err(|err| classify_provider_error(err, &request.model))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(JudgmentError::EmptyResponse)
    }
}

fn classify_provider_error(err: OpenAIError, model: &str) -> JudgmentError {
    match &err {
        OpenAIError::ApiError(api) => match api.code.as_deref() {
            Some("invalid_api_key") => JudgmentError::InvalidCredentials,
            Some("model_not_found") => JudgmentError::UnknownModel(model.to_string()),
            _ => JudgmentError::Provider(err.to_string()),
        },
        _ => JudgmentError::Provider(err.to_string()),
    }
}

/// What the judgment prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct AnswerContext<'a> {
    pub question_text: &'a str,
    pub difficulty: Difficulty,
    pub answer: &'a str,
    pub behavior: &'a BehaviorLog,
    pub answer_time: f64,
}

/// External judgment adapter. Neither operation surfaces an error: judgments
/// fall back to [`JudgmentResult::fallback`] and reports to a diagnostic string.
pub struct JudgmentService {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl JudgmentService {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub async fn analyze_answer(&self, context: AnswerContext<'_>) -> JudgmentResult {
        match self.try_analyze_answer(context).await {
            Ok(judgment) => judgment,
            Err(err) => {
                log::warn!("Judgment analysis failed, using fallback: {}", err);
                JudgmentResult::fallback()
            }
        }
    }

    async fn try_analyze_answer(
        &self,
        context: AnswerContext<'_>,
    ) -> Result<JudgmentResult, JudgmentError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            system: JUDGMENT_SYSTEM_PROMPT.to_string(),
            user: build_judgment_prompt(&context),
            json_object: true,
            max_tokens: None,
        };

        let content = self.provider.complete(request).await?;
        parse_judgment(&content)
    }

    pub async fn session_report(
        &self,
        totals: &BehaviorTotals,
        accuracy: u8,
        attempts: &[AnswerAttempt],
    ) -> String {
        if attempts.is_empty() {
            log::error!("Session report requested without attempts");
            return NO_ATTEMPTS_REPORT.to_string();
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            system: REPORT_SYSTEM_PROMPT.to_string(),
            user: build_report_prompt(totals, accuracy, average_risk(attempts)),
            json_object: false,
            max_tokens: Some(REPORT_MAX_TOKENS),
        };

        log::info!("Requesting session report from model '{}'", self.model);

        match self.provider.complete(request).await {
            Ok(report) => {
                log::info!("Session report generated");
                report
            }
            Err(err) => {
                log::error!("Session report generation failed: {}", err);
                report_diagnostic(&err)
            }
        }
    }
}

fn report_diagnostic(err: &JudgmentError) -> String {
    match err {
        JudgmentError::MissingCredentials => MISSING_KEY_REPORT.to_string(),
        JudgmentError::InvalidCredentials => INVALID_KEY_REPORT.to_string(),
        JudgmentError::UnknownModel(model) => format!(
            "Model '{}' was not found. It may not be available to this account yet; set OPENAI_MODEL to a model you can access.",
            model
        ),
        JudgmentError::EmptyResponse => EMPTY_REPORT.to_string(),
        other => format!(
            "An error occurred while generating the session report: {}",
            other
        ),
    }
}

/// Parses and validates a judgment returned by the provider. Responses wrapped
/// in a ```json fence are unwrapped first.
pub fn parse_judgment(content: &str) -> Result<JudgmentResult, JudgmentError> {
    let payload = FENCED_JSON
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(content)
        .trim();

    if payload.is_empty() {
        return Err(JudgmentError::EmptyResponse);
    }

    let judgment: JudgmentResult =
        serde_json::from_str(payload).map_err(|e| JudgmentError::Malformed(e.to_string()))?;

    judgment
        .validate()
        .map_err(|e| JudgmentError::Invalid(e.to_string()))?;

    Ok(judgment)
}

pub fn build_judgment_prompt(context: &AnswerContext<'_>) -> String {
    let behavior = context.behavior;
    let question_preview: String = context
        .question_text
        .chars()
        .take(QUESTION_PREVIEW_CHARS)
        .collect();
    let blur_durations = behavior
        .blur_durations
        .iter()
        .take(PROMPT_BLUR_DURATIONS)
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let copied_texts = behavior
        .copied_texts
        .iter()
        .take(PROMPT_COPIED_TEXTS)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{instructions}

## DATA UNDER REVIEW

### Question
{question}...

### Difficulty
{difficulty}

### Answer
{answer}

### Behavior log
- Window switches: {blur_count}
- Time away per switch: {blur_durations} ms
- Copies of the question text: {copy_count}
- Copied text: {copied_texts}
- Pastes: {paste_count}
- Answer time: {answer_time} s
- Mouse inactivity: {inactive_secs} s
- Typing speed: {typing_speed:.1} keys/s

{criteria}

{output_format}
{schema}",
        instructions = JUDGMENT_INSTRUCTIONS,
        question = question_preview,
        difficulty = context.difficulty,
        answer = context.answer,
        blur_count = behavior.blur_count,
        blur_durations = blur_durations,
        copy_count = behavior.copy_count,
        copied_texts = copied_texts,
        paste_count = behavior.paste_count,
        answer_time = context.answer_time,
        inactive_secs = behavior.mouse_inactive_time / 1000,
        typing_speed = behavior.typing_speed,
        criteria = JUDGMENT_EVALUATION_CRITERIA,
        output_format = JUDGMENT_OUTPUT_FORMAT,
        schema = JUDGMENT_SCHEMA.as_str(),
    )
}

pub fn build_report_prompt(totals: &BehaviorTotals, accuracy: u8, avg_risk: u8) -> String {
    format!(
        "Write an overall misconduct analysis report for an English test session.

Data:
- Accuracy: {accuracy}%
- Average risk score: {avg_risk}%
- Window switches: {blurs}
- Copy operations: {copies}
- Paste operations: {pastes}
- Mouse inactivity: {inactive_secs} s

{instructions}",
        accuracy = accuracy,
        avg_risk = avg_risk,
        blurs = totals.total_blur_count,
        copies = totals.total_copy_count,
        pastes = totals.total_paste_count,
        inactive_secs = totals.total_mouse_inactive_time / 1000,
        instructions = REPORT_INSTRUCTIONS,
    )
}

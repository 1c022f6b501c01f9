use std::env;
use secrecy::SecretString;

pub const DEFAULT_JUDGMENT_MODEL: &str = "gpt-5-mini";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub mongo_max_pool_size: u32,
    pub mongo_min_pool_size: u32,
    pub mongo_timeout_secs: u64,
    pub attempts_collection: String,
    pub questions_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub openai_api_key: Option<SecretString>,
    pub openai_api_base: Option<String>,
    pub openai_model: String,
    pub status_window_minutes: i64,
    pub seed_questions: bool,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "proctor-local".to_string()),
            mongo_max_pool_size: env::var("MONGO_MAX_POOL_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            mongo_min_pool_size: env::var("MONGO_MIN_POOL_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            mongo_timeout_secs: env::var("MONGO_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            attempts_collection: env::var("ATTEMPTS_COLLECTION")
                .unwrap_or_else(|_| "test_attempts".to_string()),
            questions_collection: env::var("QUESTIONS_COLLECTION")
                .unwrap_or_else(|_| "questions".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            openai_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .map(SecretString::from),
            openai_api_base: env::var("OPENAI_API_BASE").ok().filter(|b| !b.trim().is_empty()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_JUDGMENT_MODEL.to_string()),
            status_window_minutes: env::var("STATUS_WINDOW_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(10),
            seed_questions: env::var("SEED_QUESTIONS")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),
        }
    }

    pub fn judgment_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// Log configuration gaps that degrade the service without stopping it.
    pub fn log_warnings(&self) {
        if self.openai_api_key.is_none() {
            log::warn!(
                "OPENAI_API_KEY is not set; judgment requests will fall back to fixed values"
            );
        }
        if self.cors_allowed_origin.is_none() {
            log::warn!("CORS_ALLOWED_ORIGIN is not set; allowing any origin");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "proctor-test".to_string(),
            mongo_max_pool_size: 4,
            mongo_min_pool_size: 1,
            mongo_timeout_secs: 2,
            attempts_collection: "test_attempts".to_string(),
            questions_collection: "questions".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            openai_api_key: None,
            openai_api_base: None,
            openai_model: DEFAULT_JUDGMENT_MODEL.to_string(),
            status_window_minutes: 10,
            seed_questions: false,
            cors_allowed_origin: None,
        }
    }
}

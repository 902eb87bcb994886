use std::env;

pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

/// Settings for the external language-model API used by the chat endpoint.
///
/// The key is optional on purpose: a missing key does not prevent the server
/// from starting, it only makes `/chat` fall back to its apology reply.
#[derive(Clone)]
pub struct AgentConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
}

impl AgentConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("MODEL_API_KEY").ok(),
            api_base: env::var("MODEL_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model: env::var("MODEL_NAME").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        }
    }
}

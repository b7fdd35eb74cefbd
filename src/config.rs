// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{AgentError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub agent: AgentConfig,
    pub model: ModelConfig,
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentConfig {
    pub name: String,
    pub reflection: bool,
    pub max_tool_rounds: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    OpenAi,
    Azure,
}

impl ModelProvider {
    /// Environment variable consulted when no key is configured explicitly.
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "OPENAI_API_KEY",
            ModelProvider::Azure => "AZURE_OPENAI_API_KEY",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    pub provider: ModelProvider,
    pub name: String,
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default)]
    pub azure_api_version: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    pub timeout_secs: u64,
}

impl ModelConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(self.provider.default_api_key_env()).ok())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    pub github: ToolLaunchConfig,
    pub sentry: ToolLaunchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolLaunchConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CODE_REVIEW")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            agent: AgentConfig {
                name: "AI Code Review & Issue Fixer".to_string(),
                reflection: true,
                max_tool_rounds: 10,
            },
            model: ModelConfig {
                provider: ModelProvider::OpenAi,
                name: "gpt-4o".to_string(),
                base_url: "https://api.openai.com/v1".to_string(),
                api_key: None,
                azure_api_version: None,
                temperature: None,
                timeout_secs: 300,
            },
            tools: ToolsConfig {
                github: ToolLaunchConfig {
                    command: "npx".to_string(),
                    args: vec![
                        "-y".to_string(),
                        "@modelcontextprotocol/server-github".to_string(),
                    ],
                },
                sentry: ToolLaunchConfig {
                    command: "python".to_string(),
                    args: vec!["-m".to_string(), "mcp_server_sentry".to_string()],
                },
            },
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AgentError::Config(
                "server.port must be greater than 0".to_string(),
            ));
        }

        if self.agent.max_tool_rounds == 0 {
            return Err(AgentError::Config(
                "agent.max_tool_rounds must be greater than 0".to_string(),
            ));
        }

        if self.model.name.trim().is_empty() {
            return Err(AgentError::Config("model.name must not be empty".to_string()));
        }

        if self.model.base_url.trim().is_empty() {
            return Err(AgentError::Config(
                "model.base_url must not be empty".to_string(),
            ));
        }

        if self.model.provider == ModelProvider::Azure && self.model.azure_api_version.is_none() {
            return Err(AgentError::Config(
                "model.azure_api_version is required for the azure provider".to_string(),
            ));
        }

        Ok(())
    }
}

// file: src/mcp/registry.rs
// description: process-wide registry of the two external tool descriptors
// reference: https://github.com/modelcontextprotocol/servers

use crate::config::ToolsConfig;
use crate::mcp::descriptor::ToolDescriptor;
use tracing::warn;

pub const GITHUB_TOKEN_ENV: &str = "GITHUB_PERSONAL_ACCESS_TOKEN";
pub const SENTRY_TOKEN_ENV: &str = "SENTRY_AUTH_TOKEN";

/// Read-only after construction, shared between all requests.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    source_control: ToolDescriptor,
    error_tracking: ToolDescriptor,
}

impl ToolRegistry {
    /// Reads the access tokens from the process environment once.
    pub fn from_env(config: &ToolsConfig) -> Self {
        Self::with_tokens(
            config,
            read_secret(GITHUB_TOKEN_ENV),
            read_secret(SENTRY_TOKEN_ENV),
        )
    }

    /// Missing tokens still produce a descriptor; the tool process reports the failure.
    pub fn with_tokens(
        config: &ToolsConfig,
        github_token: Option<String>,
        sentry_token: Option<String>,
    ) -> Self {
        let source_control = ToolDescriptor::new("github", &config.github.command)
            .with_args(config.github.args.iter().cloned())
            .with_env(GITHUB_TOKEN_ENV, github_token.unwrap_or_default());

        let error_tracking = ToolDescriptor::new("sentry", &config.sentry.command)
            .with_args(config.sentry.args.iter().cloned())
            .with_args(["--auth-token".to_string(), sentry_token.unwrap_or_default()]);

        Self {
            source_control,
            error_tracking,
        }
    }

    pub fn describe_source_control_tool(&self) -> &ToolDescriptor {
        &self.source_control
    }

    pub fn describe_error_tracking_tool(&self) -> &ToolDescriptor {
        &self.error_tracking
    }

    /// Looks a descriptor up by its short name (`github` or `sentry`).
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        [&self.source_control, &self.error_tracking]
            .into_iter()
            .find(|descriptor| descriptor.name == name)
    }
}

fn read_secret(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => {
            warn!("{} is not set; the tool process will likely reject requests", key);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_control_descriptor() {
        let config = Config::default_config();
        let registry = ToolRegistry::with_tokens(&config.tools, Some("ghp_123".into()), None);
        let github = registry.describe_source_control_tool();

        assert_eq!(github.command, "npx");
        assert_eq!(github.args, vec!["-y", "@modelcontextprotocol/server-github"]);
        assert_eq!(
            github.env.get(GITHUB_TOKEN_ENV).map(String::as_str),
            Some("ghp_123")
        );
    }

    #[test]
    fn test_error_tracking_descriptor_passes_token_as_argument() {
        let config = Config::default_config();
        let registry = ToolRegistry::with_tokens(&config.tools, None, Some("sntrys_abc".into()));
        let sentry = registry.describe_error_tracking_tool();

        assert_eq!(sentry.command, "python");
        assert_eq!(
            sentry.args,
            vec!["-m", "mcp_server_sentry", "--auth-token", "sntrys_abc"]
        );
        assert!(sentry.env.is_empty());
    }

    #[test]
    fn test_missing_tokens_still_construct() {
        let config = Config::default_config();
        let registry = ToolRegistry::with_tokens(&config.tools, None, None);

        assert_eq!(
            registry.describe_source_control_tool().env.get(GITHUB_TOKEN_ENV),
            Some(&String::new())
        );
        assert_eq!(
            registry.describe_error_tracking_tool().args.last(),
            Some(&String::new())
        );
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = ToolRegistry::with_tokens(&Config::default_config().tools, None, None);
        assert!(registry.get("github").is_some());
        assert!(registry.get("sentry").is_some());
        assert!(registry.get("jira").is_none());
    }
}

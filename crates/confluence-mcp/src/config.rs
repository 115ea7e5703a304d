//! Process configuration.
//!
//! Every setting can come from a flag or an environment variable; `main` loads
//! a `.env` file first so the variables may also live there.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use confluence_client::{ClientConfig, ClientError};
use secrecy::SecretString;
use thiserror::Error;

use crate::tools::attachments::DEFAULT_ATTACHMENT_DIR;

/// Command-line interface of the `confluence-mcp` binary.
#[derive(Debug, Parser)]
#[command(
    name = "confluence-mcp",
    version,
    about = "MCP server exposing read-only Confluence tools over stdio"
)]
pub struct Cli {
    /// Confluence hostname, e.g. `wiki.example.com`.
    #[arg(long, env = "CONFLUENCE_HOSTNAME")]
    pub hostname: Option<String>,

    /// Personal access token sent as a bearer credential. Read from
    /// `CONFLUENCE_TOKEN` only, never from argv, so it stays out of the
    /// process list.
    #[arg(skip = std::env::var("CONFLUENCE_TOKEN").ok())]
    pub token: Option<String>,

    /// Directory `download-confluence-attachment` writes to.
    #[arg(long, env = "CONFLUENCE_ATTACHMENT_DIR", default_value = DEFAULT_ATTACHMENT_DIR)]
    pub attachment_dir: PathBuf,

    /// Tools to register as disabled (listed, but calls are rejected).
    #[arg(long = "disable-tool", env = "CONFLUENCE_DISABLED_TOOLS", value_delimiter = ',')]
    pub disabled_tools: Vec<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "CONFLUENCE_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid setting {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Validated server settings.
#[derive(Debug)]
pub struct ServerConfig {
    pub client: ClientConfig,
    pub attachment_dir: PathBuf,
    pub disabled_tools: Vec<String>,
}

impl TryFrom<Cli> for ServerConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let hostname = non_empty(cli.hostname).ok_or(ConfigError::Missing("CONFLUENCE_HOSTNAME"))?;
        let token = non_empty(cli.token).ok_or(ConfigError::Missing("CONFLUENCE_TOKEN"))?;

        if cli.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "CONFLUENCE_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        let client = ClientConfig::new(&hostname, SecretString::from(token))?
            .with_timeout(Duration::from_secs(cli.timeout_secs));

        let disabled_tools = cli
            .disabled_tools
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        Ok(Self {
            client,
            attachment_dir: cli.attachment_dir,
            disabled_tools,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(hostname: Option<&str>, token: Option<&str>) -> Cli {
        Cli {
            hostname: hostname.map(str::to_string),
            token: token.map(str::to_string),
            attachment_dir: PathBuf::from(DEFAULT_ATTACHMENT_DIR),
            disabled_tools: vec![],
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = ServerConfig::try_from(cli(Some("wiki.example.com"), Some("t0k"))).unwrap();
        assert_eq!(
            config.client.api_base().unwrap().as_str(),
            "https://wiki.example.com/rest/api/"
        );
        assert_eq!(config.attachment_dir, PathBuf::from("./attachments"));
        assert!(config.disabled_tools.is_empty());
    }

    #[test]
    fn test_missing_hostname() {
        let err = ServerConfig::try_from(cli(None, Some("t0k"))).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("CONFLUENCE_HOSTNAME")));
    }

    #[test]
    fn test_empty_token() {
        let err = ServerConfig::try_from(cli(Some("wiki.example.com"), Some("  "))).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("CONFLUENCE_TOKEN")));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut args = cli(Some("wiki.example.com"), Some("t0k"));
        args.timeout_secs = 0;
        let err = ServerConfig::try_from(args).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_disabled_tools_are_trimmed() {
        let mut args = cli(Some("wiki.example.com"), Some("t0k"));
        args.disabled_tools = vec![" get-confluence-image ".into(), String::new()];
        let config = ServerConfig::try_from(args).unwrap();
        assert_eq!(config.disabled_tools, vec!["get-confluence-image"]);
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "confluence-mcp",
            "--hostname",
            "wiki.example.com",
            "--disable-tool",
            "get-confluence-image,download-confluence-attachment",
            "--timeout-secs",
            "10",
        ])
        .unwrap();
        assert_eq!(cli.hostname.as_deref(), Some("wiki.example.com"));
        assert_eq!(cli.disabled_tools.len(), 2);
        assert_eq!(cli.timeout_secs, 10);
    }

    #[test]
    fn test_token_is_not_a_flag() {
        let result = Cli::try_parse_from(["confluence-mcp", "--token", "t0k"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_command_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use code_review_agent::{
    AgentAdapter, AppState, CodeReviewResponse, Config, McpAgent, McpSession,
    SentryIssuesResponse, ToolRegistry, ToolSession,
    server::routes::{SENTRY_INSTRUCTION, review_instruction},
    utils::logging::{format_error, format_info, format_success},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "code_review_agent")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "AI code review and Sentry issue analysis over MCP tools", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Review a GitHub repository once and print the result
    Review {
        /// Repository URL, e.g. https://github.com/acme/widgets
        repo_url: String,
    },

    /// Analyze recent Sentry errors once and print the result
    Sentry,

    /// Launch a tool process and list the tools it exposes
    Tools {
        /// Tool name: github or sentry
        #[arg(default_value = "github")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    code_review_agent::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    let tools = ToolRegistry::from_env(&config.tools);

    match cli.command {
        Commands::Serve { host, port } => {
            cmd_serve(config, tools, host, port).await?;
        }
        Commands::Review { repo_url } => {
            cmd_review(&config, &tools, &repo_url).await?;
        }
        Commands::Sentry => {
            cmd_sentry(&config, &tools).await?;
        }
        Commands::Tools { name } => {
            cmd_tools(&tools, &name).await?;
        }
    }

    Ok(())
}

fn build_adapter(config: &Config) -> Result<AgentAdapter> {
    let agent = McpAgent::from_config(config).context("Failed to build agent")?;
    Ok(AgentAdapter::new(Arc::new(agent)))
}

async fn cmd_serve(
    mut config: Config,
    tools: ToolRegistry,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let adapter = build_adapter(&config)?;
    let state = Arc::new(AppState::new(config.agent.name.clone(), adapter, tools));

    info!("Starting {}", config.agent.name);
    code_review_agent::server::serve(&config.bind_address(), state)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

async fn cmd_review(config: &Config, tools: &ToolRegistry, repo_url: &str) -> Result<()> {
    let adapter = build_adapter(config)?;

    let review = adapter
        .execute::<CodeReviewResponse>(
            review_instruction(repo_url),
            tools.describe_source_control_tool(),
        )
        .await;

    match review {
        Ok(review) => {
            println!("{}", serde_json::to_string_pretty(&review)?);
            eprintln!("{}", format_success("Repository analyzed"));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error("Failed to analyze the repository."));
            Err(anyhow!(e))
        }
    }
}

async fn cmd_sentry(config: &Config, tools: &ToolRegistry) -> Result<()> {
    let adapter = build_adapter(config)?;

    let analysis = adapter
        .execute::<SentryIssuesResponse>(SENTRY_INSTRUCTION, tools.describe_error_tracking_tool())
        .await;

    match analysis {
        Ok(analysis) => {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            eprintln!("{}", format_success("Sentry logs analyzed"));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error("Failed to analyze Sentry logs."));
            Err(anyhow!(e))
        }
    }
}

async fn cmd_tools(tools: &ToolRegistry, name: &str) -> Result<()> {
    let descriptor = tools
        .get(name)
        .ok_or_else(|| anyhow!("Unknown tool '{}', expected github or sentry", name))?;

    let session = McpSession::start(descriptor)
        .await
        .with_context(|| format!("Failed to start {}", descriptor))?;

    let listed = session.list_tools().await;
    Box::new(session).close().await?;
    let listed = listed.context("Failed to list tools")?;

    eprintln!(
        "{}",
        format_info(&format!("{} exposes {} tool(s)", descriptor.name, listed.len()))
    );
    for tool in listed {
        let summary = tool.description.lines().next().unwrap_or_default();
        println!("  - {}: {}", tool.name, summary);
    }

    Ok(())
}

use anyhow::{bail, Context, Result};
use base64::Engine as _;
use clap::{Parser, Subcommand};
use portfolio_gateway::gateway::IMAGE_DATA_URI_PREFIX;
use portfolio_gateway::models::Config;
use portfolio_gateway::session::{ChatTranscript, HeaderBanner, SkillScanner, Timeline};
use portfolio_gateway::Gateway;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "portfolio-gateway")]
#[command(about = "Talk to the portfolio's AI features from the terminal")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ask the portfolio assistant a question.
    Chat {
        #[arg(value_name = "QUERY", required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Generate a header banner themed on a company.
    Header {
        #[arg(value_name = "COMPANY")]
        company: Option<String>,
        /// Write the generated JPEG here instead of printing its source.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Analyze a code screenshot against the portfolio projects.
    Analyze {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Print the career timeline.
    Timeline,
}

/// Decode a generated header into JPEG bytes.
///
/// Fails when generation fell back to the placeholder URL, since there is no
/// image to write.
fn header_image_bytes(src: &str) -> Result<Vec<u8>> {
    let Some(encoded) = src.strip_prefix(IMAGE_DATA_URI_PREFIX) else {
        bail!("No image was generated (fell back to {}); nothing written", src);
    };
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .context("Generated image is not valid base64")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let gateway = Gateway::from_config(&config);
    if gateway.is_degraded() {
        warn!("Running without an API key; AI features will return fallbacks");
    }

    match args.command {
        Command::Chat { query } => {
            let mut transcript = ChatTranscript::new();
            if let Some(reply) = transcript.send(&gateway, &query.join(" ")).await {
                println!("{}", reply.text);
            }
        }
        Command::Header { company, out } => {
            let banner = HeaderBanner::new();
            if let Some(company) = company {
                banner.set_company_name(company);
            }
            info!("Generating header for {}", banner.company_name());

            let src = banner
                .regenerate(&gateway)
                .await
                .context("Company name must not be empty")?;
            match out {
                Some(path) => {
                    let bytes = header_image_bytes(&src)?;
                    tokio::fs::write(&path, bytes)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("{}", path.display());
                }
                None => println!("{}", src),
            }
        }
        Command::Analyze { path } => {
            let mut scanner = SkillScanner::new();
            let analysis = scanner
                .analyze_file(&gateway, &path)
                .await
                .with_context(|| format!("Could not analyze {}", path.display()))?;
            println!("{}", analysis);
        }
        Command::Timeline => print!("{}", Timeline::default()),
    }

    Ok(())
}

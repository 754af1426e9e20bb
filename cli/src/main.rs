use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use versegate_client::{PassageClient, DEFAULT_QUERY, DEFAULT_VERSION};
use versegate_core::PassageResult;

#[derive(Parser)]
#[command(name = "versegate")]
#[command(about = "VerseGate — Bible Gateway passage retrieval and verse extraction")]
struct Cli {
    /// Passage reference to look up, e.g. "John 3:16"
    #[arg(default_value = DEFAULT_QUERY)]
    query: String,

    /// Translation code to fetch, e.g. ESV or NIV
    #[arg(long, default_value = DEFAULT_VERSION)]
    version: String,

    /// Override the passage lookup endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Print the result as pretty JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let client = match &cli.endpoint {
        Some(endpoint) => PassageClient::with_endpoint(endpoint.clone()),
        None => PassageClient::new(),
    };

    let result = client.search(&cli.query, &cli.version).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_passage(&result);
    }

    Ok(())
}

fn print_passage(result: &PassageResult) {
    println!("{}", result.reference);
    for verse in &result.verses {
        if let Some(heading) = &verse.heading {
            println!("\n{heading}");
        }
        let indent = if verse.blocks.iter().any(|b| b.poetry) {
            "    "
        } else {
            ""
        };
        println!("{indent}{} {}", verse.verse_label, verse.text.trim());
    }
}

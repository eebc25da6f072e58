use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tag_genie::config::parse_api_url;
use tag_genie::{Config, HttpSuggestClient, Locale, TagType, Terminal, Wizard, logging};

/// Describe a template or asset, pick suggested tags and save them to a file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the tag suggestion service
    #[arg(long, value_parser = parse_api_url)]
    api_url: Option<String>,

    /// UI language (en, fi, sv, no, da, et, lv, lt, ru)
    #[arg(short, long)]
    locale: Option<Locale>,

    /// What is being tagged: template or asset
    #[arg(short = 't', long = "type")]
    tag_type: Option<TagType>,

    /// Directory the tag file is written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose).context("Failed to initialize logging")?;

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if let Some(tag_type) = cli.tag_type {
        config.tag_type = tag_type;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    let client = HttpSuggestClient::new(&config.api_url, config.timeout)
        .context("Failed to build HTTP client")?;
    let mut wizard = Wizard::from_config(&config);

    let mut terminal = Terminal::new(io::stdin().lock(), io::stdout());
    terminal.run(&mut wizard, &client).await
}

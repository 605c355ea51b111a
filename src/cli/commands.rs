//! CLI commands and argument parsing

use crate::error::Error;
use crate::types::{
    Aspect, Color, Freshness, ImageContent, ImageSize, ImageType, License, SafeSearch,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// Paginated Bing image search from the command line
#[derive(Parser, Debug)]
#[command(name = "bing-image-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a search and print every page
    Search(SearchArgs),

    /// Print the default search configuration as YAML
    Defaults,
}

/// Arguments of the `search` command; flags override the config file
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Search terms
    pub query: Option<String>,

    /// Search config file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Subscription key
    #[arg(short, long, env = "BING_SEARCH_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Market code, e.g. en-US
    #[arg(long)]
    pub market: Option<String>,

    /// Off, Moderate or Strict
    #[arg(long, value_parser = parse_filter::<SafeSearch>)]
    pub safe_search: Option<SafeSearch>,

    #[arg(long, value_parser = parse_filter::<Aspect>)]
    pub aspect: Option<Aspect>,

    #[arg(long, value_parser = parse_filter::<Color>)]
    pub color: Option<Color>,

    #[arg(long, value_parser = parse_filter::<ImageContent>)]
    pub image_content: Option<ImageContent>,

    #[arg(long, value_parser = parse_filter::<ImageType>)]
    pub image_type: Option<ImageType>,

    #[arg(long, value_parser = parse_filter::<License>)]
    pub license: Option<License>,

    #[arg(long, value_parser = parse_filter::<Freshness>)]
    pub freshness: Option<Freshness>,

    #[arg(long, value_parser = parse_filter::<ImageSize>)]
    pub size: Option<ImageSize>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    #[arg(long)]
    pub min_width: Option<u32>,

    #[arg(long)]
    pub min_height: Option<u32>,

    #[arg(long)]
    pub max_width: Option<u32>,

    #[arg(long)]
    pub max_height: Option<u32>,

    /// Minimum file size in bytes
    #[arg(long)]
    pub min_file_size: Option<u64>,

    /// Maximum file size in bytes
    #[arg(long)]
    pub max_file_size: Option<u64>,

    /// Offset of the first result
    #[arg(long)]
    pub offset: Option<u64>,

    /// Maximum results per request
    #[arg(long)]
    pub count: Option<u32>,

    /// Total results wanted
    #[arg(short, long, allow_negative_numbers = true)]
    pub amount: Option<i64>,

    /// Session affinity token to reuse
    #[arg(long)]
    pub client_id: Option<String>,

    /// Client IP hint
    #[arg(long)]
    pub client_ip: Option<String>,

    /// Location hint, e.g. "lat:47.6;long:-122.1;re:100"
    #[arg(long)]
    pub location: Option<String>,

    /// Extra query parameter (KEY=VALUE, repeatable)
    #[arg(long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Extra request header (KEY=VALUE, repeatable)
    #[arg(long = "header", value_parser = parse_key_value)]
    pub headers: Vec<(String, String)>,

    /// Override the API endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON page per line
    Json,
    /// One image content URL per line
    Urls,
}

fn parse_filter<T: FromStr<Err = Error>>(s: &str) -> Result<T, String> {
    s.parse().map_err(|e: Error| e.to_string())
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

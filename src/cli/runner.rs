//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, SearchArgs};
use crate::config::SearchConfig;
use crate::error::{Result, ResultExt};
use crate::http::{HttpClientConfig, ReqwestTransport};
use crate::pagination::{Paginator, ResultPage};
use crate::types::OptionStringExt;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Search(args) => self.search(args).await,
            Commands::Defaults => self.defaults(),
        }
    }

    async fn search(&self, args: &SearchArgs) -> Result<()> {
        let start = Instant::now();
        let config = build_config(args)?;

        let http_config = HttpClientConfig::builder()
            .timeout(Duration::from_secs(args.timeout))
            .build();
        let transport = ReqwestTransport::with_config(http_config)?;
        let mut paginator = Paginator::with_transport(config, Arc::new(transport))?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let mut image_count = 0;

        while let Some(page) = paginator.next_page().await? {
            image_count += page.len();
            write_page(&mut out, &page, self.cli.format)?;
        }
        out.flush()?;

        info!(
            "Fetched {} image(s) in {} page(s) in {:?}",
            image_count,
            paginator.state().pages,
            start.elapsed()
        );
        Ok(())
    }

    fn defaults(&self) -> Result<()> {
        let yaml = serde_yaml::to_string(&SearchConfig::default())?;
        print!("{yaml}");
        Ok(())
    }
}

/// Merge the optional config file with command-line flags; flags win
pub fn build_config(args: &SearchArgs) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::from_file(path)
            .with_context(|| format!("Loading {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(query) = args.query.clone().none_if_empty() {
        config.query = query;
    }
    if let Some(key) = args.key.clone().none_if_empty() {
        config.key = Some(key);
    }

    override_opt(&mut config.market, args.market.clone());
    override_opt(&mut config.safe_search, args.safe_search);
    override_opt(&mut config.aspect, args.aspect);
    override_opt(&mut config.color, args.color);
    override_opt(&mut config.image_content, args.image_content);
    override_opt(&mut config.image_type, args.image_type);
    override_opt(&mut config.license, args.license);
    override_opt(&mut config.freshness, args.freshness);
    override_opt(&mut config.size, args.size);
    override_opt(&mut config.width, args.width);
    override_opt(&mut config.height, args.height);
    override_opt(&mut config.min_width, args.min_width);
    override_opt(&mut config.min_height, args.min_height);
    override_opt(&mut config.max_width, args.max_width);
    override_opt(&mut config.max_height, args.max_height);
    override_opt(&mut config.min_file_size, args.min_file_size);
    override_opt(&mut config.max_file_size, args.max_file_size);
    override_opt(&mut config.client_id, args.client_id.clone());
    override_opt(&mut config.client_ip, args.client_ip.clone());
    override_opt(&mut config.location, args.location.clone());

    if let Some(offset) = args.offset {
        config.offset = offset;
    }
    if let Some(count) = args.count {
        config.count = count;
    }
    if let Some(amount) = args.amount {
        config.amount = amount;
    }
    if let Some(endpoint) = &args.endpoint {
        config.endpoint.clone_from(endpoint);
    }

    config.query_params.extend(args.params.iter().cloned());
    config.header_params.extend(args.headers.iter().cloned());

    Ok(config)
}

fn override_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

fn write_page(out: &mut impl Write, page: &ResultPage, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, page)?;
            writeln!(out)?;
        }
        OutputFormat::Urls => {
            for image in &page.value {
                if let Some(url) = &image.content_url {
                    writeln!(out, "{url}")?;
                }
            }
        }
    }
    Ok(())
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use urlsource_engine::{load_request_config, OutputType, RequestConfig, TransportSettings};

use crate::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "urlsource", version, about = "Fetch a URL and extract a single value")]
pub struct Cli {
    /// Where log lines go.
    #[arg(long, value_enum, default_value_t = LogDestination::Terminal, global = true)]
    pub log: LogDestination,

    /// Log debug details of each request.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Perform the request and print the extracted value.
    Run(RunArgs),
    /// Write a request configuration built from flags to a settings file.
    Save(SaveArgs),
    /// Print the persisted form of a settings file.
    Show {
        #[arg(long)]
        config: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Settings file to start from; inline flags override its fields.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub request: RequestArgs,

    #[arg(long)]
    pub connect_timeout_secs: Option<u64>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Number of redirects to follow.
    #[arg(long, default_value_t = 0)]
    pub redirects: usize,

    /// Print the whole response as JSON instead of only the extracted value.
    #[arg(long)]
    pub full: bool,
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    #[arg(long)]
    pub config: PathBuf,

    #[command(flatten)]
    pub request: RequestArgs,
}

#[derive(Debug, Default, Args)]
pub struct RequestArgs {
    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub method: Option<String>,

    #[arg(long)]
    pub body: Option<String>,

    /// A request header as `Name: value`. May be repeated.
    #[arg(long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// JSON, XML, HTML or Text.
    #[arg(long)]
    pub output_type: Option<String>,

    /// JSON pointer, XPath or regex, depending on the output type.
    #[arg(long)]
    pub selector: Option<String>,
}

impl RequestArgs {
    /// Overlays the flags that were given on top of `base`.
    pub fn apply(self, base: RequestConfig) -> RequestConfig {
        let mut config = base;
        if let Some(url) = self.url {
            config.url = url;
        }
        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(body) = self.body {
            config.body = body;
        }
        config.headers.extend(self.headers);
        if let Some(output_type) = self.output_type {
            config.output_type = OutputType::from(output_type);
        }
        match self.selector {
            Some(selector) => config.with_selector(selector),
            None => config,
        }
    }
}

impl RunArgs {
    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.timeout_secs.map(Duration::from_secs),
            redirect_limit: self.redirects,
        }
    }

    pub fn request_config(&mut self) -> anyhow::Result<RequestConfig> {
        let base = match &self.config {
            Some(path) => load_request_config(path),
            None => RequestConfig::new("", OutputType::Text),
        };
        let config = std::mem::take(&mut self.request).apply(base);
        if config.url.is_empty() {
            bail!("no URL given; pass --url or a --config file that has one");
        }
        Ok(config)
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in {raw:?}"));
    }
    Ok((name.to_string(), value.trim_start().to_string()))
}

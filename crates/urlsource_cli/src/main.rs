mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use source_logging::source_info;
use urlsource_engine::{
    load_request_config, run_with_settings, save_request_config, serialize_request,
    OutputType, RequestConfig, Response,
};

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    logging::initialize(cli.log, level);

    match cli.command {
        Command::Run(mut args) => {
            let config = args.request_config()?;
            let response = run_with_settings(&config, args.transport_settings());
            if args.full {
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
            Ok(report(&response, args.full))
        }
        Command::Save(args) => {
            let config = args
                .request
                .apply(RequestConfig::new("", OutputType::default()));
            save_request_config(&args.config, &config)?;
            source_info!("Request settings written to {:?}", args.config);
            Ok(ExitCode::SUCCESS)
        }
        Command::Show { config } => {
            println!("{}", serialize_request(&load_request_config(&config)));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn report(response: &Response, already_printed: bool) -> ExitCode {
    match response {
        Response::Success { body_parsed, .. } => {
            if !already_printed {
                println!("{body_parsed}");
            }
            ExitCode::SUCCESS
        }
        Response::Failure { error_message, .. } => {
            if !already_printed {
                eprintln!("{error_message}");
            }
            ExitCode::FAILURE
        }
    }
}

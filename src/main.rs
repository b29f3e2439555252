use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use spdlog::{error, info, warn};

use folio::config::open_config;
use folio::generator::generate_site;
use folio::logger::configure_logger;
use folio::routes::RouteTable;
use folio::server::{server_run, AppState};
use folio::site::Site;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Write the static site to the output directory and exit
    #[arg(short, long)]
    generate: bool,

    /// Output directory for --generate. Overrides the configured one
    #[arg(short, long)]
    output: Option<String>,
}

/// Prints the success line, or logs the one failure line.
fn report_generation(result: Result<usize>, output_dir: &Path) -> ExitCode {
    match result {
        Ok(count) => {
            println!("Static site generated successfully! {} pages in {}", count, output_dir.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Static site generation failed: {:#}", err);
            spdlog::default_logger().flush();
            ExitCode::FAILURE
        }
    }
}

#[ntex::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = open_config(args.config_path.map(PathBuf::from))?;

    if let Err(err) = configure_logger(config.log.as_ref()) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let site = Site::from_config(&config)?;
    let routes = RouteTable::default();

    if args.generate {
        let output_dir = args.output.map(PathBuf::from).unwrap_or_else(|| config.paths.output_dir.clone());
        let result = generate_site(&site, &routes, &output_dir);
        return Ok(report_generation(result, &output_dir));
    }

    info!("Starting folio =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
    let state = AppState { site, routes };
    server_run(state, config.server.address.clone(), config.server.port).await?;
    Ok(ExitCode::SUCCESS)
}

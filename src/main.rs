use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use limitprobe::cli::Cli;
use limitprobe::report::{
    format::render_summary, FileReportSink, JsonReportSink, LogProgress, ReportSink,
};
use limitprobe::transport::{HttpTransport, REQUEST_TIMEOUT};
use limitprobe::{Target, TestRunner};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "limitprobe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Fails fast on missing custom parameters, before any request is sent.
    let profile = cli.resolve_profile()?;

    tracing::info!(
        hostname = %cli.hostname,
        speed = %profile.name,
        description = %profile.description,
        "Configuration loaded"
    );

    let target = Target::new(&cli.hostname, &cli.path, &cli.user);
    let transport = Arc::new(HttpTransport::new(REQUEST_TIMEOUT)?);
    let runner = TestRunner::new(profile, target, transport, Arc::new(LogProgress))?;

    let report = runner.run().await;
    print!("{}", render_summary(&report));

    let sink = FileReportSink::new(&cli.results_dir);
    if let Some(path) = sink.write(&report)? {
        println!("Results saved to: {}", path.display());
    }

    if cli.json {
        let sink = JsonReportSink::new(&cli.results_dir);
        if let Some(path) = sink.write(&report)? {
            println!("JSON results saved to: {}", path.display());
        }
    }

    Ok(())
}

mod cli;
mod validate;

use std::process;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

use mondesc_core::client::MetricServiceClient;
use mondesc_core::commands::list::list_descriptors;
use mondesc_core::connection;
use mondesc_core::error::MonitoringError;
use mondesc_core::format;
use mondesc_core::metadata;

/// Exit code offset for failures carrying a gRPC status code.
/// gRPC Cancelled=1, Unknown=2, so we offset by 64.
const STATUS_CODE_OFFSET: i32 = 64;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    let request = match validate::validate(&cli) {
        Ok(request) => request,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("Try 'mondesc --help' for more details.");
            process::exit(2);
        }
    };
    let kind = request.kind();

    let request_md =
        match metadata::request_metadata(&cli.header, cli.expand_headers, cli.access_token.as_deref())
        {
            Ok(md) => md,
            Err(e) => {
                eprintln!("{e}");
                eprintln!("Try 'mondesc --help' for more details.");
                process::exit(2);
            }
        };
    tracing::debug!(
        "request metadata:\n{}",
        metadata::metadata_to_string(&request_md)
    );

    let conn_config = cli.connection_config();
    let channel = match connection::create_channel(&conn_config).await {
        Ok(ch) => ch,
        Err(e) => {
            eprintln!("{e}");
            process::exit(exit_code(&e));
        }
    };
    let client = MetricServiceClient::new(channel).with_metadata(request_md);

    let mut sink = format::sink(cli.format, std::io::stdout());
    let listing = list_descriptors(&client, &request, &mut *sink);

    let result = tokio::select! {
        res = with_deadline(listing, cli.max_time) => res,
        _ = interrupted(tokio::signal::ctrl_c()) => {
            Err(MonitoringError::Cancelled("interrupted".into()))
        }
    };

    if let Err(err) = result {
        eprintln!(
            "Failed to list {} for project \"{}\": {err}",
            kind.plural(),
            request.project()
        );
        process::exit(exit_code(&err));
    }
}

/// Bound the whole listing (every page) by `--max-time`.
async fn with_deadline<T>(
    fut: impl std::future::Future<Output = mondesc_core::error::Result<T>>,
    max_time: Option<f64>,
) -> mondesc_core::error::Result<T> {
    match max_time {
        Some(secs) => tokio::time::timeout(connection::seconds("--max-time", secs)?, fut)
            .await
            .unwrap_or_else(|_| {
                Err(MonitoringError::Cancelled(format!(
                    "listing did not finish within {secs} seconds"
                )))
            }),
        None => fut.await,
    }
}

/// Resolves once `signal` reports an interrupt. If the handler could not be
/// installed, the listing runs on without one.
async fn interrupted(signal: impl std::future::Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        tracing::warn!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

/// Exit status for a failed listing: 64 + gRPC code, or 1 for local I/O.
fn exit_code(err: &MonitoringError) -> i32 {
    match err {
        MonitoringError::Io(_) => 1,
        other => STATUS_CODE_OFFSET + other.code() as i32,
    }
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by -v/--vv.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

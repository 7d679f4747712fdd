use clap::{Parser, Subcommand};

use mondesc_core::connection::{ConnectionConfig, DEFAULT_ENDPOINT};
use mondesc_core::descriptor::DescriptorKind;
use mondesc_core::format::Format;

/// Lists metric descriptors and monitored resource descriptors with the
/// Cloud Monitoring API.
///
/// The project defaults to the GCLOUD_PROJECT environment variable. Calls are
/// authenticated with an OAuth2 access token, e.g. the output of
/// `gcloud auth print-access-token`, passed with --access-token or the
/// GOOGLE_OAUTH_ACCESS_TOKEN environment variable.
#[derive(Parser, Debug)]
#[command(
    name = "mondesc",
    version,
    after_help = "Example usage:\n  \
        mondesc list\n  \
        mondesc list-resources -p my-project\n  \
        mondesc list --filter 'metric.type = starts_with(\"custom.googleapis.com/\")'\n\n\
        For more information, see https://cloud.google.com/monitoring/docs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    // -- Target --
    /// The project whose descriptors are listed.
    #[arg(
        short = 'p',
        long = "projectId",
        visible_alias = "project-id",
        env = "GCLOUD_PROJECT",
        global = true,
        value_name = "PROJECT"
    )]
    pub project_id: Option<String>,

    /// Restrict results with a monitoring filter, evaluated by the service.
    #[arg(long, global = true, value_name = "FILTER")]
    pub filter: Option<String>,

    /// Maximum number of results the service returns per page.
    #[arg(long, global = true, value_name = "N")]
    pub page_size: Option<u32>,

    // -- Connection --
    /// The MetricService endpoint, as host:port.
    #[arg(long, global = true, default_value = DEFAULT_ENDPOINT, value_name = "HOST:PORT")]
    pub endpoint: String,

    /// Use plain-text HTTP/2 when connecting (no TLS), e.g. for a local
    /// emulator.
    #[arg(long, global = true)]
    pub plaintext: bool,

    /// File containing trusted root certificates for verifying the server.
    /// Not valid with --plaintext.
    #[arg(long, global = true, value_name = "FILE")]
    pub cacert: Option<String>,

    /// The maximum time, in seconds, to wait for connection to be established.
    /// Defaults to 10 seconds.
    #[arg(long, global = true, allow_negative_numbers = true, value_name = "SECONDS")]
    pub connect_timeout: Option<f64>,

    /// The maximum total time the listing can take, in seconds.
    #[arg(long, global = true, allow_negative_numbers = true, value_name = "SECONDS")]
    pub max_time: Option<f64>,

    // -- Credentials and Metadata --
    /// OAuth2 access token sent as a bearer token.
    #[arg(
        long,
        global = true,
        env = "GOOGLE_OAUTH_ACCESS_TOKEN",
        hide_env_values = true,
        value_name = "TOKEN"
    )]
    pub access_token: Option<String>,

    /// Additional headers in 'name: value' format. May specify more than one
    /// via multiple flags.
    #[arg(short = 'H', global = true, value_name = "HEADER")]
    pub header: Vec<String>,

    /// If set, headers may use '${NAME}' syntax to reference environment
    /// variables.
    #[arg(long, global = true)]
    pub expand_headers: bool,

    /// If set, the specified value will be added to the User-Agent header.
    #[arg(long, global = true, value_name = "STRING")]
    pub user_agent: Option<String>,

    // -- Output --
    /// The output format: 'text' (one name per line) or 'json' (one object
    /// per line).
    #[arg(long, global = true, default_value = "text")]
    pub format: Format,

    /// Enable verbose logging on stderr.
    #[arg(short = 'v', global = true)]
    pub verbose: bool,

    /// Enable very verbose logging on stderr (includes page-level detail).
    #[arg(long = "vv", global = true)]
    pub very_verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Lists metric descriptors.
    List,
    /// Lists monitored resource descriptors.
    ListResources,
}

impl Command {
    pub fn kind(self) -> DescriptorKind {
        match self {
            Command::List => DescriptorKind::Metric,
            Command::ListResources => DescriptorKind::MonitoredResource,
        }
    }
}

impl Cli {
    /// Compute the verbosity level from CLI flags.
    /// 0 = default, 1 = -v, 2 = --vv
    pub fn verbosity(&self) -> u8 {
        if self.very_verbose {
            2
        } else if self.verbose {
            1
        } else {
            0
        }
    }

    /// Build a `ConnectionConfig` from CLI arguments.
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            endpoint: self.endpoint.clone(),
            plaintext: self.plaintext,
            cacert: self.cacert.clone(),
            connect_timeout: self.connect_timeout,
            request_timeout: self.max_time,
            user_agent: self.user_agent.clone(),
        }
    }
}

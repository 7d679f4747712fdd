use std::time::Duration;

use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};

use crate::error::{MonitoringError, Result};

/// Public Cloud Monitoring API endpoint.
pub const DEFAULT_ENDPOINT: &str = "monitoring.googleapis.com:443";

/// Default connection timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: f64 = 10.0;

/// Connection configuration for establishing a gRPC channel.
///
/// Decouples the library from clap: the CLI binary builds a
/// `ConnectionConfig` from its parsed arguments and passes it to
/// `create_channel()`.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// `host:port` of the MetricService.
    pub endpoint: String,

    /// Use plain-text HTTP/2 (no TLS), e.g. for a local emulator.
    pub plaintext: bool,

    /// File containing trusted root certificates for verifying the server.
    pub cacert: Option<String>,

    /// Maximum time, in seconds, to wait for connection to be established.
    pub connect_timeout: Option<f64>,

    /// Per-request timeout, in seconds.
    pub request_timeout: Option<f64>,

    /// Custom User-Agent string to prepend.
    pub user_agent: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            plaintext: false,
            cacert: None,
            connect_timeout: None,
            request_timeout: None,
            user_agent: None,
        }
    }
}

/// Build and eagerly connect a tonic Channel to the configured endpoint.
///
/// A connection failure is reported as `RemoteUnavailable`, so an unreachable
/// service is distinguishable from a bad flag value.
pub async fn create_channel(config: &ConnectionConfig) -> Result<Channel> {
    let scheme = if config.plaintext { "http" } else { "https" };
    let uri = format!("{scheme}://{}", config.endpoint);

    let mut endpoint = build_endpoint(&uri, config)?;

    if !config.plaintext {
        let tls = build_tls_config(config)?;
        endpoint = endpoint.tls_config(tls).map_err(|e| {
            MonitoringError::InvalidArgument(format!("TLS configuration error: {e}"))
        })?;
    }

    tracing::debug!(%uri, "connecting");
    let channel = endpoint.connect().await.map_err(|e| {
        MonitoringError::RemoteUnavailable(format!(
            "failed to connect to {}: {e}",
            config.endpoint
        ))
    })?;
    tracing::debug!(endpoint = %config.endpoint, "connected");

    Ok(channel)
}

/// Build common Endpoint configuration (timeouts, user-agent).
fn build_endpoint(uri: &str, config: &ConnectionConfig) -> Result<Endpoint> {
    let mut endpoint: Endpoint = Channel::from_shared(uri.to_string())
        .map_err(|e| MonitoringError::InvalidArgument(format!("invalid endpoint: {e}")))?;

    let connect_timeout = config
        .connect_timeout
        .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);
    endpoint = endpoint.connect_timeout(seconds("connect timeout", connect_timeout)?);

    if let Some(secs) = config.request_timeout {
        endpoint = endpoint.timeout(seconds("request timeout", secs)?);
    }

    let ua = build_user_agent(config);
    endpoint = endpoint.user_agent(ua.as_str()).map_err(|e| {
        MonitoringError::InvalidArgument(format!("failed to set user-agent: {e}"))
    })?;

    Ok(endpoint)
}

/// Convert a timeout in seconds, rejecting negative, NaN, infinite and
/// out-of-range values instead of panicking on them.
pub fn seconds(what: &str, secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| {
        MonitoringError::InvalidArgument(format!(
            "{what} must be a non-negative number of seconds, got {secs}"
        ))
    })
}

/// Build tonic's ClientTlsConfig: custom CA when given, native roots otherwise.
fn build_tls_config(config: &ConnectionConfig) -> Result<ClientTlsConfig> {
    let mut tls = ClientTlsConfig::new();

    if let Some(ref cacert_path) = config.cacert {
        let ca_pem = std::fs::read(cacert_path).map_err(|e| {
            MonitoringError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read CA certificate '{cacert_path}': {e}"),
            ))
        })?;
        tls = tls.ca_certificate(Certificate::from_pem(ca_pem));
    } else {
        tls = tls.with_native_roots();
    }

    Ok(tls)
}

/// Build the User-Agent string: "mondesc/<version>", prefixed with the
/// custom user-agent if one was given.
pub fn build_user_agent(config: &ConnectionConfig) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let base = format!("mondesc/{version}");

    match &config.user_agent {
        Some(custom) => format!("{custom} {base}"),
        None => base,
    }
}

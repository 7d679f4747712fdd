use base64::Engine;
use regex::Regex;
use std::sync::LazyLock;
use tonic::metadata::{AsciiMetadataValue, MetadataMap};

use crate::error::{MonitoringError, Result};

/// Regex for matching `${VAR_NAME}` patterns in header values.
static ENV_VAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+)\}").expect("env var regex is valid"));

/// Header carrying the OAuth2 bearer token.
const AUTHORIZATION: &str = "authorization";

/// Routing header Google front ends use to pick the backend for a resource.
pub const REQUEST_PARAMS_HEADER: &str = "x-goog-request-params";

/// Parse header strings in `"Name: Value"` format into a gRPC MetadataMap.
///
/// - Splits on the first `:` in each header string
/// - Header name is lowercased
/// - No colon means the value is empty
/// - Binary headers (name ending in `-bin`) have their value decoded from
///   base64, falling back to the raw string
///
/// Headers that are not valid metadata are dropped with a warning.
pub fn metadata_from_headers(headers: &[String]) -> MetadataMap {
    let mut map = MetadataMap::new();

    for header in headers {
        let (name, value) = match header.split_once(':') {
            Some((n, v)) => (n.trim().to_lowercase(), v.trim().to_string()),
            None => (header.trim().to_lowercase(), String::new()),
        };

        if name.is_empty() {
            continue;
        }

        if name.ends_with("-bin") {
            match tonic::metadata::BinaryMetadataKey::from_bytes(name.as_bytes()) {
                Ok(key) => {
                    let bytes = try_base64_decode(&value).unwrap_or_else(|| value.into_bytes());
                    let val = tonic::metadata::BinaryMetadataValue::from_bytes(&bytes);
                    map.append_bin(key, val);
                }
                Err(_) => {
                    tracing::warn!(%header, "header dropped: invalid binary metadata key");
                }
            }
        } else {
            match value.parse::<AsciiMetadataValue>() {
                Ok(val) => match tonic::metadata::AsciiMetadataKey::from_bytes(name.as_bytes()) {
                    Ok(key) => {
                        map.append(key, val);
                    }
                    Err(_) => {
                        tracing::warn!(%header, "header dropped: invalid metadata key");
                    }
                },
                Err(_) => {
                    tracing::warn!(%header, "header dropped: invalid metadata value");
                }
            }
        }
    }

    map
}

/// Try to decode a base64 string, padded or not.
fn try_base64_decode(value: &str) -> Option<Vec<u8>> {
    use base64::engine::general_purpose;

    let value = value.trim();
    general_purpose::STANDARD
        .decode(value)
        .or_else(|_| general_purpose::STANDARD_NO_PAD.decode(value))
        .ok()
}

/// Expand `${VAR}` references in header values with environment variable values.
///
/// Fails if any referenced environment variable is undefined.
pub fn expand_headers(headers: &[String]) -> Result<Vec<String>> {
    let mut result = Vec::with_capacity(headers.len());

    for header in headers {
        let (name, value) = match header.split_once(':') {
            Some((n, v)) => (n, v),
            None => (header.as_str(), ""),
        };

        let expanded = expand_env_vars(value)?;

        if header.contains(':') {
            result.push(format!("{name}:{expanded}"));
        } else {
            result.push(expanded);
        }
    }

    Ok(result)
}

/// Replace all `${VAR}` occurrences with their environment variable values.
fn expand_env_vars(input: &str) -> Result<String> {
    let mut result = String::with_capacity(input.len());
    let mut last_end = 0;

    for cap in ENV_VAR_REGEX.captures_iter(input) {
        let full_match = cap.get(0).expect("regex match exists");
        let var_name = &cap[1];

        result.push_str(&input[last_end..full_match.start()]);

        let var_value = std::env::var(var_name).map_err(|_| {
            MonitoringError::InvalidArgument(format!(
                "no value for environment variable {var_name}"
            ))
        })?;

        result.push_str(&var_value);
        last_end = full_match.end();
    }

    result.push_str(&input[last_end..]);
    Ok(result)
}

/// Build the metadata attached to every listing call.
///
/// User headers come first; an access token, when present, is sent as an
/// `authorization: Bearer` header and replaces any authorization header
/// given with `-H`.
pub fn request_metadata(
    headers: &[String],
    expand: bool,
    access_token: Option<&str>,
) -> Result<MetadataMap> {
    let headers = if expand {
        expand_headers(headers)?
    } else {
        headers.to_vec()
    };
    let mut md = metadata_from_headers(&headers);

    if let Some(token) = access_token.map(str::trim).filter(|t| !t.is_empty()) {
        let value: AsciiMetadataValue = format!("Bearer {token}").parse().map_err(|_| {
            MonitoringError::InvalidArgument("access token contains invalid characters".into())
        })?;
        md.insert(AUTHORIZATION, value);
    }

    Ok(md)
}

/// Format a MetadataMap as a human-readable string, one sorted
/// `name: value` pair per line. Authorization values are redacted.
pub fn metadata_to_string(md: &MetadataMap) -> String {
    if md.is_empty() {
        return "(empty)".to_string();
    }

    let mut lines: Vec<String> = Vec::new();

    for key_and_value in md.iter() {
        match key_and_value {
            tonic::metadata::KeyAndValueRef::Ascii(key, value) => {
                let val_str = if key.as_str() == AUTHORIZATION {
                    "<redacted>"
                } else {
                    value.to_str().unwrap_or("<non-utf8>")
                };
                lines.push(format!("{key}: {val_str}"));
            }
            tonic::metadata::KeyAndValueRef::Binary(key, value) => {
                let bytes = value.to_bytes().unwrap_or_default();
                let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
                lines.push(format!("{key}: {encoded}"));
            }
        }
    }

    lines.sort();
    lines.join("\n")
}

use std::time::Duration;

use mondesc_core::descriptor::{ListRequest, ProjectId};

use crate::cli::Cli;

/// Validate CLI flags and build the listing request.
///
/// Hard errors return `Err(message)`. Warnings are logged but do not
/// prevent execution.
pub fn validate(cli: &Cli) -> Result<ListRequest, String> {
    check_seconds("--connect-timeout", cli.connect_timeout)?;
    check_seconds("--max-time", cli.max_time)?;

    if cli.cacert.is_some() && cli.plaintext {
        return Err("The --cacert argument can only be used with TLS.".into());
    }

    if cli.page_size == Some(0) {
        return Err("The --page-size argument must be positive.".into());
    }

    let project = match cli.project_id.as_deref() {
        None => {
            return Err(
                "No project specified. Use --projectId or set GCLOUD_PROJECT.".into(),
            );
        }
        Some(id) => ProjectId::new(id).map_err(|_| {
            "The --projectId argument must not be empty.".to_string()
        })?,
    };

    if cli.access_token.is_none() && !cli.plaintext {
        tracing::warn!(
            "no access token given; requests will be unauthenticated (set --access-token or GOOGLE_OAUTH_ACCESS_TOKEN)"
        );
    }

    Ok(ListRequest::new(project, cli.command.kind())
        .with_filter(cli.filter.clone())
        .with_page_size(cli.page_size))
}

/// Timeouts must convert to a `Duration`: finite, non-negative and in range.
fn check_seconds(flag: &str, value: Option<f64>) -> Result<(), String> {
    match value {
        Some(t) if Duration::try_from_secs_f64(t).is_err() => Err(format!(
            "The {flag} argument must be a non-negative number of seconds, got '{t}'."
        )),
        _ => Ok(()),
    }
}

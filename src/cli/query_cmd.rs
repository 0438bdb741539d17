use anyhow::{Context, Result};

use crate::cli::output::{OutputFormat, OutputOptions};
use crate::cli::renderer;
use crate::core::dispatcher::{Action, Dispatcher};
use crate::core::models::request::InvocationRequest;

/// Flag values for a direct query, mapped onto invocation parameters.
#[derive(Debug, Default)]
pub struct QueryArgs {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub group_by: Option<String>,
    pub granularity: Option<String>,
    pub lookback_days: Option<u32>,
    pub monitor_arn: Option<String>,
}

pub fn build_request(action: Action, args: QueryArgs) -> InvocationRequest {
    InvocationRequest::new(&action.api_path(), Vec::new())
        .with_param("start_date", args.start_date)
        .with_param("end_date", args.end_date)
        .with_param("group_by", args.group_by)
        .with_param("granularity", args.granularity)
        .with_param("lookback_days", args.lookback_days)
        .with_param("monitor_arn", args.monitor_arn)
}

/// Run one action through the dispatcher and print its result body.
/// Exits with status 1 when the result is an error.
pub async fn run(
    dispatcher: &Dispatcher,
    action: Action,
    args: QueryArgs,
    opts: &OutputOptions,
) -> Result<()> {
    let request = build_request(action, args);
    let envelope = dispatcher.handle(&request).await;
    let body = envelope
        .body_json()
        .context("Failed to decode response body")?;

    match opts.format {
        OutputFormat::Text => println!("{}", renderer::render(action, &body, opts.use_color)),
        OutputFormat::Json => println!("{}", opts.to_json(&body)?),
    }

    if envelope.is_error() {
        if opts.verbose {
            eprintln!("{} returned HTTP {}", action.name(), envelope.status_code());
        }
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_request_only_includes_given_flags() {
        let request = build_request(
            Action::CostAndUsage,
            QueryArgs {
                group_by: Some("REGION".to_string()),
                ..QueryArgs::default()
            },
        );
        assert_eq!(request.api_path.as_deref(), Some("/get-cost-and-usage"));
        assert_eq!(request.parameters.len(), 1);
        assert_eq!(request.parameters[0].name, "group_by");
    }

    #[test]
    fn build_request_stringifies_lookback() {
        let request = build_request(
            Action::Anomalies,
            QueryArgs {
                lookback_days: Some(14),
                monitor_arn: Some("arn:m".to_string()),
                ..QueryArgs::default()
            },
        );
        assert_eq!(request.api_path.as_deref(), Some("/get-anomalies"));
        assert_eq!(request.parameters[0].value, "14");
        assert_eq!(request.parameters[1].value, "arn:m");
    }
}

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::OutputOptions;
use crate::core::dispatcher::Dispatcher;

/// Read an invocation event from `event` (or stdin) and print the response envelope.
pub async fn run(dispatcher: &Dispatcher, event: Option<&Path>, opts: &OutputOptions) -> Result<()> {
    let raw = match event {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read event from stdin")?;
            buf
        }
    };

    let envelope = dispatcher.handle_json(&raw).await;
    println!("{}", opts.to_json(&envelope)?);
    Ok(())
}

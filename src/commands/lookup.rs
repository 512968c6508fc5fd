//! Lookup command implementation

use console::Style;

use crate::cli::{LookupArgs, OutputFormat};
use crate::error::Result;
use crate::lookup::{LookupResult, lookup};

/// Render `result` as aligned `key value` lines
#[must_use]
pub fn render_text(result: &LookupResult) -> String {
    let fields = [
        ("id", &result.id),
        ("url", &result.url),
        ("path", &result.path),
        ("branch", &result.branch),
        ("tag", &result.tag),
        ("commit_sha", &result.commit_sha),
    ];
    let bold = Style::new().bold();
    let mut out = String::new();
    for (key, value) in fields {
        let label = format!("{key:<10}");
        out.push_str(&format!("{} {value}\n", bold.apply_to(label)));
    }
    out
}

/// Render `result` as a pretty-printed JSON object
///
/// # Errors
///
/// Fails only if serialization fails.
pub fn render_json(result: &LookupResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Run the lookup command
pub fn run(args: &LookupArgs) -> Result<()> {
    let transport = args.provider_config().into_transport()?;
    let params = args.request().into_params()?;
    let result = lookup(&params, &transport)?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&result)),
        OutputFormat::Json => println!("{}", render_json(&result)?),
    }
    Ok(())
}

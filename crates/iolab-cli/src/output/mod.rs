use std::fmt::Display;
use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a report to a string in the requested format.
pub fn render<T: Serialize + Display>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a report in the requested format. An empty text rendering prints
/// nothing at all.
pub fn output<T: Serialize + Display>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    write_report(&mut std::io::stdout().lock(), value, format)
}

/// [`output`] into any writer.
pub fn write_report<W, T>(out: &mut W, value: &T, format: OutputFormat) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize + Display,
{
    let rendered = render(value, format)?;
    if !rendered.is_empty() {
        writeln!(out, "{rendered}")?;
    }
    out.flush()?;
    Ok(())
}

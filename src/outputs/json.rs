//! JSON output for analyzer results.
//!
//! Every result type is written as its own pretty-printed file so the
//! rendering scripts can pick up exactly the piece they draw.

use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `value` to `{output_dir}/{file_name}`, replacing any old file.
///
/// # Returns
///
/// The path written.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), %file_name))]
pub async fn write_json<T: Serialize>(
    value: &T,
    output_dir: &Path,
    file_name: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(value)?;
    let path = output_dir.join(file_name);

    if let Err(e) = fs::write(&path, json).await {
        error!(path = %path.display(), error = %e, "Failed writing JSON");
        return Err(e.into());
    }
    info!(path = %path.display(), "Wrote JSON file");
    Ok(path)
}

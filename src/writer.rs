use std::fs;
use std::path::Path;
use tracing::info;

use crate::{DigestError, Result};

/// Write the rendered digest to `path`, replacing any previous file.
///
/// Missing parent directories are created.
pub fn write_digest(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DigestError::output(path, e))?;
    }

    fs::write(path, html).map_err(|e| DigestError::output(path, e))?;

    info!("Wrote {} bytes to {}", html.len(), path.display());
    Ok(())
}

//! Writing rendered output to disk
//!
//! The only phase with filesystem side effects. Its main responsibility is
//! to persist [`RenderResult`]s under an output directory.
//!
//! ## Process
//!
//! 0.  **Confine**: Every output must be a relative path that stays under
//!     the output directory. Nothing is written if any result escapes it.
//!
//! 1.  **Create Directories**: For each result, creates any necessary parent
//!     directories recursively.
//!
//! 2.  **Write Content**: Writes the rendered text, overwriting any existing
//!     file.
//!
//! 3.  **Set Permissions**: On Unix-like systems, scripts (flagged
//!     executable or ending in `.sh`) get mode `0o755`.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::render::RenderResult;

/// Mode given to generated scripts.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Whether `result` should be written as an executable script.
pub fn is_executable(result: &RenderResult) -> bool {
    result.executable || result.output.extension().is_some_and(|ext| ext == "sh")
}

/// Whether `output` names a location inside the directory it is joined to.
///
/// The check is lexical: absolute paths and any `..` component are refused.
pub fn is_confined(output: &Path) -> bool {
    output.components().next().is_some()
        && output
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// Write every result under `output_dir`, returning the written paths.
pub fn execute(results: &[RenderResult], output_dir: &Path) -> Result<Vec<PathBuf>> {
    if let Some(escaping) = results.iter().find(|result| !is_confined(&result.output)) {
        return Err(Error::Filesystem {
            message: format!(
                "Refusing to write '{}' outside the output directory",
                escaping.output.display()
            ),
        });
    }

    let mut written = Vec::with_capacity(results.len());

    for result in results {
        let full_path = output_dir.join(&result.output);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
                message: format!("Failed to create directory '{}': {}", parent.display(), e),
            })?;
        }

        fs::write(&full_path, &result.content).map_err(|e| Error::Filesystem {
            message: format!("Failed to write file '{}': {}", full_path.display(), e),
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if is_executable(result) {
                let perms = fs::Permissions::from_mode(EXECUTABLE_MODE);
                fs::set_permissions(&full_path, perms).map_err(|e| Error::Filesystem {
                    message: format!(
                        "Failed to set permissions on '{}': {}",
                        full_path.display(),
                        e
                    ),
                })?;
            }
        }

        debug!("Wrote {}", full_path.display());
        written.push(full_path);
    }

    Ok(written)
}

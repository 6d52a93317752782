//! Locating the compiled host-interface artifact on disk.
//!
//! Host engines load collective variables through a shared library placed
//! next to the tools using it. This module resolves the path of that
//! artifact so configuration files can refer to it; it does not load
//! anything itself.

use std::env;
use std::path::PathBuf;

use crate::Error;

/// Environment variable overriding the directory searched for the artifact
pub const PLUGIN_PATH_VARIABLE: &str = "COLVAR_PLUGIN_PATH";

/// Get the file name of the compiled host-interface artifact on the current
/// platform (e.g. `libcolvar_plugin.so` on Linux).
pub fn artifact_name() -> String {
    format!("{}colvar_plugin{}", env::consts::DLL_PREFIX, env::consts::DLL_SUFFIX)
}

/// Resolve the full path of the compiled host-interface artifact.
///
/// If the `COLVAR_PLUGIN_PATH` environment variable is set, the artifact is
/// expected in the directory it points to. Otherwise it is expected next to
/// the current executable.
pub fn artifact_path() -> Result<PathBuf, Error> {
    if let Some(directory) = env::var_os(PLUGIN_PATH_VARIABLE) {
        return Ok(PathBuf::from(directory).join(artifact_name()));
    }

    let executable = env::current_exe().map_err(|e| Error::Internal(format!(
        "could not resolve the current executable: {}", e
    )))?;
    let directory = executable.parent().ok_or_else(|| Error::Internal(format!(
        "the current executable {} has no parent directory", executable.display()
    )))?;

    return Ok(directory.join(artifact_name()));
}

//! Application directory resolution.

use std::path::PathBuf;

use anyhow::Context;

/// Directory under `$HOME` holding creation logs, one subdirectory per
/// credentials profile.
const DEFAULT_APP_SUBDIR: &str = ".amt-voucher/logs";

/// Resolve the application directory: the `--app-dir` flag when given,
/// otherwise `$HOME/.amt-voucher/logs`.
pub fn resolve_app_dir(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .context("HOME is not set; pass --app-dir explicitly")?;
    Ok(home.join(DEFAULT_APP_SUBDIR))
}

//! Where ochat keeps its files: `ochat.yml` and the `--verbose` log.
use std::path::PathBuf;

const APP_DIR: &str = "ochat";

/// Contents written to `ochat.yml` on first run.
pub const DEFAULT_CONFIG: &str = include_str!("../data/config.yml");

/// `$<env_var>/ochat` when the variable is set and non-empty, otherwise
/// `<platform>/ochat`, otherwise `fallback` with `~` expanded.
fn resolve_dir(env_var: &str, platform: Option<PathBuf>, fallback: &str) -> PathBuf {
    if let Some(base) = std::env::var_os(env_var).filter(|v| !v.is_empty()) {
        return PathBuf::from(base).join(APP_DIR);
    }
    match platform {
        Some(dir) => dir.join(APP_DIR),
        None => PathBuf::from(shellexpand::tilde(fallback).as_ref()),
    }
}

/// Directory holding `ochat.yml`.
pub fn get_config_dir() -> PathBuf {
    resolve_dir("XDG_CONFIG_HOME", dirs::config_dir(), "~/.config/ochat")
}

/// Directory holding `ochat.log`, created if missing.
pub fn get_log_dir() -> std::io::Result<PathBuf> {
    let path = resolve_dir(
        "XDG_DATA_HOME",
        dirs::data_local_dir(),
        "~/.local/share/ochat",
    );
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

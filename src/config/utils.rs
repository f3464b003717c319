#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use chrono::Local;
use eyre::{Context, Result};
use log::LevelFilter;
use regex::{Captures, Regex};

use super::{APP_NAME, Configuration, LogConfig, LogFile};

pub fn load_configuration(config_path: &str) -> Result<Configuration> {
    let raw = std::fs::read_to_string(config_path).wrap_err(format!("reading {}", config_path))?;
    toml::from_str(&raw).wrap_err("parsing configuration")
}

/// Sends every record to the configured log file as
/// `module/file:line timestamp [LEVEL] - message`.
pub fn init_logger(config: &LogConfig) -> Result<()> {
    let target = open_log_file(&config.file)?;

    let raw_level = config.level.as_deref().unwrap_or("info");
    let default_level =
        LevelFilter::from_str(raw_level).wrap_err(format!("parsing log level {}", raw_level))?;

    let mut builder = env_logger::Builder::new();
    builder.filter(None, default_level);
    for filter in config.filters.as_deref().unwrap_or_default() {
        let level = filter
            .level
            .as_deref()
            .and_then(|level| LevelFilter::from_str(level).ok())
            .unwrap_or(default_level);
        builder.filter(filter.module.as_deref(), level);
    }

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{}/{}:{} {} [{}] - {}",
                record.module_path().unwrap_or("unknown"),
                basename(record.file().unwrap_or("unknown")),
                record.line().unwrap_or(0),
                Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(target)))
        .try_init()
        .wrap_err("installing logger")
}

fn open_log_file(file: &LogFile) -> Result<File> {
    let path = resolve_path(&file.path).wrap_err(format!("resolving log file path {}", file.path))?;
    init_parent_dir(&path)?;
    OpenOptions::new()
        .create(true)
        .write(true)
        .append(file.append)
        .truncate(!file.append)
        .open(&path)
        .wrap_err(format!("opening log file {}", path))
}

pub fn basename(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

/// Expands `$VAR` and `${VAR}` (unset variables become empty) and makes the
/// result absolute.
pub fn resolve_path(path: &str) -> Result<String> {
    let re = Regex::new(r"\$\{?([A-Za-z_]+)\}?").wrap_err("compiling regex")?;
    let expanded = re.replace_all(path, |caps: &Captures| {
        std::env::var(&caps[1]).unwrap_or_default()
    });

    let absolute = std::path::absolute(expanded.as_ref())
        .wrap_err(format!("resolving path {}", expanded))?;
    Ok(absolute.to_string_lossy().into_owned())
}

/// First existing configuration file among:
/// * $XDG_CONFIG_HOME/chatty-sessions/config.toml
/// * $HOME/.config/chatty-sessions/config.toml
/// * $HOME/.chatty-sessions.toml
pub fn lookup_config_path() -> Option<String> {
    let home = env_or_current("HOME");
    [
        format!("{}/{}/config.toml", env_or_current("XDG_CONFIG_HOME"), APP_NAME),
        format!("{}/.config/{}/config.toml", home, APP_NAME),
        format!("{}/.{}.toml", home, APP_NAME),
    ]
    .into_iter()
    .find(|path| Path::new(path).exists())
}

/// Creates the parent directories of `path`.
pub fn init_parent_dir(path: &str) -> Result<()> {
    let dir = Path::new(path).parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir).wrap_err(format!("creating directory {}", dir.display()))
}

fn env_or_current(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| ".".to_string())
}

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const HOST: &str = "HUB_HOST";
    pub const PORT: &str = "PORT";
    /// Root for notes/ and todos/ (default: $HOME/local-hub-data)
    pub const DATA_DIR: &str = "HUB_DATA_DIR";
    /// Built frontend served at `/`. Skipped when the directory is missing.
    pub const WEB_DIST: &str = "HUB_WEB_DIST";
    pub const CLIPBOARD_SWEEP_SECS: &str = "CLIPBOARD_SWEEP_SECS";
}

/// Default values
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8081;
    pub const DATA_DIR_NAME: &str = "local-hub-data";
    pub const NOTES_DIR: &str = "notes";
    pub const TODOS_DIR: &str = "todos";
    pub const TODO_FILE: &str = "todo.txt";
    pub const WEB_DIST: &str = "./web/dist";
    pub const CLIPBOARD_SWEEP_SECS: u64 = 30;
}

/// Resolve the data directory: `HUB_DATA_DIR`, else `$HOME/local-hub-data`.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = env::var(env_vars::DATA_DIR) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    let home = env::var("HOME").unwrap_or_default();
    PathBuf::from(home).join(defaults::DATA_DIR_NAME)
}

/// Parse a numeric env var, warning and falling back on garbage
fn parse_env<T: std::str::FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("{}={:?} is not valid, using default {}", name, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub web_dist: PathBuf,
    pub clipboard_sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var(env_vars::HOST).unwrap_or_else(|_| defaults::HOST.to_string()),
            port: parse_env(env_vars::PORT, defaults::PORT),
            data_dir: data_dir(),
            web_dist: PathBuf::from(
                env::var(env_vars::WEB_DIST).unwrap_or_else(|_| defaults::WEB_DIST.to_string()),
            ),
            clipboard_sweep_interval: Duration::from_secs(
                parse_env(env_vars::CLIPBOARD_SWEEP_SECS, defaults::CLIPBOARD_SWEEP_SECS).max(1),
            ),
        }
    }

    /// Directory holding one markdown file per note
    pub fn notes_dir(&self) -> PathBuf {
        self.data_dir.join(defaults::NOTES_DIR)
    }

    /// The single append-only todo.txt file
    pub fn todo_file(&self) -> PathBuf {
        self.data_dir.join(defaults::TODOS_DIR).join(defaults::TODO_FILE)
    }

    /// Create the notes and todos directories. Failures only warn: later
    /// writes surface them to the caller.
    pub fn ensure_data_dirs(&self) {
        for dir in [self.notes_dir(), self.data_dir.join(defaults::TODOS_DIR)] {
            if let Err(e) = std::fs::create_dir_all(&dir) {
                log::warn!("Could not create {}: {}", dir.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_at(dir: PathBuf) -> Config {
        Config {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            data_dir: dir,
            web_dist: PathBuf::from(defaults::WEB_DIST),
            clipboard_sweep_interval: Duration::from_secs(defaults::CLIPBOARD_SWEEP_SECS),
        }
    }

    #[test]
    fn test_paths_are_rooted_in_data_dir() {
        let config = config_at(PathBuf::from("/data/hub"));
        assert_eq!(config.notes_dir(), PathBuf::from("/data/hub/notes"));
        assert_eq!(config.todo_file(), PathBuf::from("/data/hub/todos/todo.txt"));
    }

    #[test]
    fn test_ensure_data_dirs_creates_both() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_at(dir.path().join("hub"));
        config.ensure_data_dirs();
        assert!(config.notes_dir().is_dir());
        assert!(config.todo_file().parent().unwrap().is_dir());
    }

    #[test]
    fn test_parse_env_falls_back_on_garbage() {
        // SAFETY: the variable name is unique to this test.
        unsafe { env::set_var("HUB_TEST_PARSE_ENV_GARBAGE", "not-a-number") };
        assert_eq!(parse_env("HUB_TEST_PARSE_ENV_GARBAGE", 42u16), 42);
        unsafe { env::set_var("HUB_TEST_PARSE_ENV_GARBAGE", " 9000 ") };
        assert_eq!(parse_env("HUB_TEST_PARSE_ENV_GARBAGE", 42u16), 9000);
    }
}

//! Environment and configuration utilities.
//!
//! xdraft is configured entirely through the environment. Variables may
//! also be set in a `.env.local` file in the working directory, which is
//! read at startup; variables already set in the environment win.
//!
//! | Variable            | Meaning                                  | Default |
//! |---------------------|------------------------------------------|---------|
//! | `ANTHROPIC_API_KEY` | Anthropic API key                        | none    |
//! | `GEMINI_API_KEY`    | Google Gemini API key                    | none    |
//! | `XDRAFT_DATA_DIR`   | Directory holding reference posts        | `data`  |
//! | `XDRAFT_TIMEOUT`    | Seconds before an HTTP request times out | `120`   |

use log::{debug, warn};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File of environment variables read at startup.
pub const ENV_FILE: &str = ".env.local";

const DATA_DIR_VAR: &str = "XDRAFT_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "data";

const TIMEOUT_VAR: &str = "XDRAFT_TIMEOUT";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Loads variables from [`ENV_FILE`] in the working directory into the
/// environment, if it exists. Parent directories are not searched.
///
/// Returns true if the file was read.
pub fn load_env_file() -> bool {
    load_env_file_at(Path::new(ENV_FILE))
}

fn load_env_file_at(path: &Path) -> bool {
    match dotenv::from_path(path) {
        Ok(()) => {
            debug!("loaded environment from {}", path.display());
            true
        }
        Err(dotenv::Error::Io(_)) => false,
        Err(err) => {
            warn!("could not read {}: {err}", path.display());
            false
        }
    }
}

/// The directory holding reference posts.
///
/// # Examples
///
/// ```
/// use xdraft::conf::data_dir;
/// # use temp_env::with_var_unset;
/// # with_var_unset("XDRAFT_DATA_DIR", || {
/// assert_eq!(data_dir().to_str(), Some("data"));
/// # });
/// ```
pub fn data_dir() -> PathBuf {
    env::var_os(DATA_DIR_VAR)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// The directory holding the user's own posts.
pub fn voice_dir() -> PathBuf {
    data_dir().join("user-tweets")
}

/// The directory holding popular posts by others.
pub fn patterns_dir() -> PathBuf {
    data_dir().join("popular-tweets")
}

/// How long to wait for an HTTP request to complete.
///
/// Invalid values are ignored in favor of the default.
pub fn request_timeout() -> Duration {
    match env::var(TIMEOUT_VAR) {
        Ok(secs) => match secs.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!("ignoring invalid {TIMEOUT_VAR}: {secs}");
                DEFAULT_TIMEOUT
            }
        },
        Err(_) => DEFAULT_TIMEOUT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use temp_env::{with_var, with_var_unset};
    use tempfile::TempDir;

    #[test]
    fn it_loads_the_env_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ENV_FILE);
        fs::write(&path, "XDRAFT_ENV_FILE_TEST=loaded\n").unwrap();
        with_var_unset("XDRAFT_ENV_FILE_TEST", || {
            assert!(load_env_file_at(&path));
            assert_eq!(env::var("XDRAFT_ENV_FILE_TEST").as_deref(), Ok("loaded"));
        });
    }

    #[test]
    fn it_does_not_search_parent_directories_for_the_env_file() {
        let parent = TempDir::new().unwrap();
        fs::write(parent.path().join(ENV_FILE), "XDRAFT_PARENT_TEST=leaked\n").unwrap();
        let child = parent.path().join("child");
        fs::create_dir(&child).unwrap();
        with_var_unset("XDRAFT_PARENT_TEST", || {
            assert!(!load_env_file_at(&child.join(ENV_FILE)));
            assert!(env::var("XDRAFT_PARENT_TEST").is_err());
        });
    }

    #[test]
    fn it_does_not_override_the_environment() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ENV_FILE);
        fs::write(&path, "XDRAFT_OVERRIDE_TEST=from-file\n").unwrap();
        with_var("XDRAFT_OVERRIDE_TEST", Some("from-env"), || {
            assert!(load_env_file_at(&path));
            assert_eq!(env::var("XDRAFT_OVERRIDE_TEST").as_deref(), Ok("from-env"));
        });
    }

    #[test]
    fn it_reads_the_data_dir_from_the_environment() {
        with_var(DATA_DIR_VAR, Some("/srv/xdraft"), || {
            assert_eq!(data_dir(), PathBuf::from("/srv/xdraft"));
            assert_eq!(voice_dir(), PathBuf::from("/srv/xdraft/user-tweets"));
            assert_eq!(patterns_dir(), PathBuf::from("/srv/xdraft/popular-tweets"));
        });
    }

    #[test]
    fn it_defaults_the_data_dir() {
        with_var_unset(DATA_DIR_VAR, || {
            assert_eq!(voice_dir(), PathBuf::from("data/user-tweets"));
            assert_eq!(patterns_dir(), PathBuf::from("data/popular-tweets"));
        });
    }

    #[test]
    fn it_ignores_an_empty_data_dir() {
        with_var(DATA_DIR_VAR, Some(""), || {
            assert_eq!(data_dir(), PathBuf::from("data"));
        });
    }

    #[test]
    fn it_reads_the_timeout_from_the_environment() {
        with_var(TIMEOUT_VAR, Some("30"), || {
            assert_eq!(request_timeout(), Duration::from_secs(30));
        });
    }

    #[test]
    fn it_defaults_the_timeout() {
        with_var_unset(TIMEOUT_VAR, || {
            assert_eq!(request_timeout(), Duration::from_secs(120));
        });
    }

    #[test]
    fn it_ignores_invalid_timeouts() {
        for value in ["soon", "0", "-5"] {
            with_var(TIMEOUT_VAR, Some(value), || {
                assert_eq!(request_timeout(), Duration::from_secs(120), "{value}");
            });
        }
    }
}

use std::path::{Path, PathBuf};

use crate::index::SearchOptions;

mod env;

const ENV_BOOKMARKS_PATH: &str = "MARKHOP_BOOKMARKS_PATH";
const ENV_HISTORY_PATH: &str = "MARKHOP_HISTORY_PATH";
const ENV_CHROME_PROFILE: &str = "MARKHOP_CHROME_PROFILE";
const ENV_LOG_DIR: &str = "MARKHOP_LOG_DIR";
const ENV_SCRATCH_DIR: &str = "MARKHOP_SCRATCH_DIR";
const ENV_EMPTY_QUERY_LIMIT: &str = "MARKHOP_EMPTY_QUERY_LIMIT";
const ENV_TABS_LIMIT: &str = "MARKHOP_TABS_LIMIT";
const ENV_TABS_WINDOW_HOURS: &str = "MARKHOP_TABS_WINDOW_HOURS";

const CHROME_USER_DATA_DIR: &str = "Library/Application Support/Google/Chrome";
const DEFAULT_CHROME_PROFILE: &str = "Default";
const DEFAULT_LOG_DIR: &str = "Library/Logs/Markhop";
const DEFAULT_TABS_LIMIT: usize = 50;
const DEFAULT_TABS_WINDOW_HOURS: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabsConfig {
    pub limit: usize,
    pub window_hours: usize,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TABS_LIMIT,
            window_hours: DEFAULT_TABS_WINDOW_HOURS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bookmarks_path: PathBuf,
    pub history_path: PathBuf,
    pub scratch_dir: PathBuf,
    /// `None` disables the request log.
    pub log_dir: Option<PathBuf>,
    pub search: SearchOptions,
    pub tabs: TabsConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::from_lookup(&home, |name| std::env::var(name).ok())
    }

    /// Resolves every setting through `lookup`, falling back to the Chrome
    /// layout under `home`.
    pub fn from_lookup(home: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let profile = env::non_empty(lookup(ENV_CHROME_PROFILE))
            .unwrap_or_else(|| DEFAULT_CHROME_PROFILE.to_string());
        let profile_dir = home.join(CHROME_USER_DATA_DIR).join(profile);

        let raw_log_dir = lookup(ENV_LOG_DIR);
        let log_dir = if env::is_disabled(raw_log_dir.as_deref()) {
            None
        } else {
            Some(env::path_value(raw_log_dir).unwrap_or_else(|| home.join(DEFAULT_LOG_DIR)))
        };

        Self {
            bookmarks_path: env::path_value(lookup(ENV_BOOKMARKS_PATH))
                .unwrap_or_else(|| profile_dir.join("Bookmarks")),
            history_path: env::path_value(lookup(ENV_HISTORY_PATH))
                .unwrap_or_else(|| profile_dir.join("History")),
            scratch_dir: env::path_value(lookup(ENV_SCRATCH_DIR))
                .unwrap_or_else(std::env::temp_dir),
            log_dir,
            search: SearchOptions {
                empty_query_limit: env::usize_optional(lookup(ENV_EMPTY_QUERY_LIMIT)),
            },
            tabs: TabsConfig {
                limit: env::usize_value(lookup(ENV_TABS_LIMIT), DEFAULT_TABS_LIMIT, 1),
                window_hours: env::usize_value(
                    lookup(ENV_TABS_WINDOW_HOURS),
                    DEFAULT_TABS_WINDOW_HOURS,
                    1,
                ),
            },
        }
    }

    /// Configuration rooted in a single directory, with the request log off.
    #[must_use]
    pub fn for_paths(bookmarks_path: impl Into<PathBuf>, history_path: impl Into<PathBuf>) -> Self {
        Self {
            bookmarks_path: bookmarks_path.into(),
            history_path: history_path.into(),
            scratch_dir: std::env::temp_dir(),
            log_dir: None,
            search: SearchOptions::default(),
            tabs: TabsConfig::default(),
        }
    }
}

use std::path::Path;

use crate::config;

/// Load and validate settings. Config is optional: any problem falls back to
/// defaults and is returned so it can be logged once logging is up.
pub fn load_settings(path: Option<&Path>) -> (config::Settings, Option<String>) {
    let loaded = match path {
        Some(p) => config::Settings::load_from(Some(p)),
        None => config::Settings::load(),
    };

    let problem = match loaded {
        Ok(s) => match s.validate() {
            Ok(()) => return (s, None),
            Err(msg) => format!("invalid config, using defaults: {msg}"),
        },
        Err(e) => format!("failed to load config, using defaults: {e}"),
    };

    eprintln!("quaver: {problem}");
    (config::Settings::default(), Some(problem))
}

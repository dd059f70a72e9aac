use std::env;

pub const DEFAULT_API_HOST: &str = "https://api.discogs.com";

/// Read once from the environment at startup and handed to the Discogs
/// client. Credentials stay optional here: the service still comes up
/// without them and reports a configuration error per request instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub username: Option<String>,
    pub token: Option<String>,
    pub api_host: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            username: non_empty_var("DISCOGS_USERNAME"),
            token: non_empty_var("DISCOGS_TOKEN"),
            api_host: non_empty_var("DISCOGS_API_HOST")
                .unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

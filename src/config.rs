use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Movies table (title, overview, genres, keywords)
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Credits table (title, cast, crew)
    #[serde(default = "default_credits_path")]
    pub credits_path: String,

    /// OMDb API key. Poster lookups are disabled when unset.
    #[serde(default)]
    pub omdb_api_key: Option<String>,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Per-lookup poster timeout in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_movies_path() -> String {
    "data/movies.csv".to_string()
}

fn default_credits_path() -> String {
    "data/credits.csv".to_string()
}

fn default_omdb_api_url() -> String {
    "http://www.omdbapi.com/".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_secs(self.poster_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.movies_path, "data/movies.csv");
        assert_eq!(config.credits_path, "data/credits.csv");
        assert_eq!(config.omdb_api_key, None);
        assert_eq!(config.poster_timeout(), Duration::from_secs(5));
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides_from_environment() {
        let vars = vec![
            ("OMDB_API_KEY".to_string(), "abc123".to_string()),
            ("POSTER_TIMEOUT_SECS".to_string(), "2".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.omdb_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.poster_timeout(), Duration::from_secs(2));
        assert_eq!(config.port, 8080);
    }
}

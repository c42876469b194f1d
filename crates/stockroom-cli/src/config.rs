//! Configuration loading and types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the stockroom CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hosted backend settings
    pub supabase: SupabaseConfig,
}

/// Hosted backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    pub url: String,
    /// Anonymous-tier API key (public, not a privileged secret)
    pub anon_key: String,
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &PathBuf) -> eyre::Result<Self> {
        tracing::debug!(path = %path.display(), "loading configuration file");
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from the environment or default paths
    ///
    /// The `SUPABASE_URL` / `SUPABASE_ANON_KEY` pair wins over any file.
    ///
    /// # Errors
    /// Returns error if no configuration source yields a usable config.
    pub fn load_default() -> eyre::Result<Self> {
        if let (Ok(url), Ok(anon_key)) = (
            std::env::var("SUPABASE_URL"),
            std::env::var("SUPABASE_ANON_KEY"),
        ) {
            return Ok(Self {
                supabase: SupabaseConfig { url, anon_key },
            });
        }

        // Explicit config file path
        if let Ok(path) = std::env::var("STOCKROOM_CONFIG") {
            return Self::load(&PathBuf::from(path));
        }

        // Try common paths
        let paths = [
            PathBuf::from("stockroom.toml"),
            PathBuf::from("/etc/stockroom/stockroom.toml"),
            dirs::config_dir()
                .map(|p| p.join("stockroom/stockroom.toml"))
                .unwrap_or_default(),
        ];

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        eyre::bail!(
            "no configuration found: set SUPABASE_URL and SUPABASE_ANON_KEY, \
             or provide a stockroom.toml"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml_shape() {
        let config: Config = toml::from_str(
            r#"
            [supabase]
            url = "https://example.supabase.co"
            anon_key = "anon-key"
            "#,
        )
        .unwrap();

        assert_eq!(config.supabase.url, "https://example.supabase.co");
        assert_eq!(config.supabase.anon_key, "anon-key");
    }

    #[test]
    fn rejects_missing_key() {
        let result = toml::from_str::<Config>(
            r#"
            [supabase]
            url = "https://example.supabase.co"
            "#,
        );
        assert!(result.is_err());
    }
}

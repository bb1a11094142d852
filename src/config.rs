use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{AnalyzeArgs, ServeArgs};

/// Configuration file structure that mirrors CLI arguments
/// All fields are optional to allow partial configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Output format: text or json
    pub output: Option<String>,

    /// Save the JSON report to a file
    pub save: Option<String>,

    /// Skip headless-browser rendering
    pub no_render: Option<bool>,

    /// Verbose output
    pub verbose: Option<bool>,

    /// Address the HTTP service binds
    pub host: Option<String>,

    /// Port the HTTP service listens on
    pub port: Option<u16>,
}

/// Configuration file format based on file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                "toml" => Some(ConfigFormat::Toml),
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                _ => None,
            })
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Toml => &["toml"],
            ConfigFormat::Yaml => &["yaml", "yml"],
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let format = ConfigFormat::from_path(path)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))?;

        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            ConfigFormat::Toml => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
        };

        Ok(config)
    }

    /// Get the default configuration file paths to check (in order of priority)
    /// Returns paths in order: current directory, user config directory
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Check current directory first (highest priority)
        for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
            for ext in format.extensions() {
                paths.push(PathBuf::from(format!("rendersight.{}", ext)));
            }
        }

        // Check user config directory (~/.config/rendersight)
        // Use XDG_CONFIG_HOME if set, otherwise fall back to ~/.config
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .and_then(|p| {
                if p.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(p))
                }
            })
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        if let Some(config_home) = config_home {
            let config_dir = config_home.join("rendersight");
            for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
                for ext in format.extensions() {
                    paths.push(config_dir.join(format!("config.{}", ext)));
                }
            }
        }

        paths
    }

    /// Try to load configuration from default paths
    /// Returns the first configuration file found, or None if no config exists
    pub fn from_default_paths() -> Result<Option<Self>> {
        for path in Self::default_paths() {
            if path.exists() {
                return Ok(Some(Self::from_file(&path)?));
            }
        }
        Ok(None)
    }

    /// Merge this configuration with `analyze` arguments
    /// CLI arguments take precedence over config file values
    pub fn merge_with_analyze(&self, cli: &AnalyzeArgs) -> AnalyzeArgs {
        AnalyzeArgs {
            url: cli.url.clone(),
            output: if cli.output != "text" {
                cli.output.clone()
            } else {
                self.output.clone().unwrap_or_else(|| cli.output.clone())
            },
            save: cli.save.clone().or_else(|| self.save.clone()),
            no_render: if cli.no_render {
                cli.no_render
            } else {
                self.no_render.unwrap_or(cli.no_render)
            },
            verbose: if cli.verbose {
                cli.verbose
            } else {
                self.verbose.unwrap_or(cli.verbose)
            },
            config: cli.config.clone(),
        }
    }

    /// Merge this configuration with `serve` arguments
    /// CLI arguments take precedence over config file values
    pub fn merge_with_serve(&self, cli: &ServeArgs) -> ServeArgs {
        ServeArgs {
            host: if cli.host != "127.0.0.1" {
                cli.host.clone()
            } else {
                self.host.clone().unwrap_or_else(|| cli.host.clone())
            },
            port: if cli.port != 8080 {
                cli.port
            } else {
                self.port.unwrap_or(cli.port)
            },
            no_render: if cli.no_render {
                cli.no_render
            } else {
                self.no_render.unwrap_or(cli.no_render)
            },
            config: cli.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::NamedTempFile;

    fn analyze_defaults() -> AnalyzeArgs {
        AnalyzeArgs {
            url: "https://example.com".to_string(),
            output: "text".to_string(),
            save: None,
            no_render: false,
            verbose: false,
            config: None,
        }
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.toml")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.yaml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("config.txt")), None);
    }

    #[test]
    fn test_load_json_config() {
        let json_content = r#"
{
    "output": "json",
    "no_render": true,
    "port": 9090
}
        "#;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("json");
        fs::write(&temp_path, json_content).unwrap();

        let config = Config::from_file(&temp_path).unwrap();
        assert_eq!(config.output, Some("json".to_string()));
        assert_eq!(config.no_render, Some(true));
        assert_eq!(config.port, Some(9090));

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_load_toml_config() {
        let toml_content = r#"
output = "json"
no_render = true
host = "0.0.0.0"
        "#;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("toml");
        fs::write(&temp_path, toml_content).unwrap();

        let config = Config::from_file(&temp_path).unwrap();
        assert_eq!(config.output, Some("json".to_string()));
        assert_eq!(config.no_render, Some(true));
        assert_eq!(config.host, Some("0.0.0.0".to_string()));

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_load_yaml_config() {
        let yaml_content = r#"
output: "json"
verbose: true
port: 3000
        "#;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("yaml");
        fs::write(&temp_path, yaml_content).unwrap();

        let config = Config::from_file(&temp_path).unwrap();
        assert_eq!(config.output, Some("json".to_string()));
        assert_eq!(config.verbose, Some(true));
        assert_eq!(config.port, Some(3000));

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("json");
        fs::write(&temp_path, "{ invalid json }").unwrap();

        assert!(Config::from_file(&temp_path).is_err());

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_unsupported_format() {
        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("txt");
        fs::write(&temp_path, "content").unwrap();

        assert!(Config::from_file(&temp_path).is_err());

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_merge_with_analyze_defaults() {
        let config = Config {
            output: Some("json".to_string()),
            save: Some("report.json".to_string()),
            no_render: Some(true),
            ..Default::default()
        };

        let merged = config.merge_with_analyze(&analyze_defaults());
        assert_eq!(merged.url, "https://example.com");
        assert_eq!(merged.output, "json"); // from config
        assert_eq!(merged.save, Some("report.json".to_string())); // from config
        assert!(merged.no_render); // from config
    }

    #[test]
    fn test_merge_with_analyze_cli_overrides() {
        let config = Config {
            output: Some("json".to_string()),
            save: Some("from-config.json".to_string()),
            ..Default::default()
        };

        let mut cli = analyze_defaults();
        cli.output = "text".to_string();
        cli.save = Some("from-cli.json".to_string());
        cli.verbose = true;

        let merged = config.merge_with_analyze(&cli);
        assert_eq!(merged.save, Some("from-cli.json".to_string())); // CLI wins
        assert!(merged.verbose); // CLI value
    }

    #[test]
    fn test_merge_with_serve() {
        let config = Config {
            host: Some("0.0.0.0".to_string()),
            port: Some(9090),
            ..Default::default()
        };

        let cli = ServeArgs {
            host: "127.0.0.1".to_string(),
            port: 8080,
            no_render: false,
            config: None,
        };

        let merged = config.merge_with_serve(&cli);
        assert_eq!(merged.host, "0.0.0.0"); // from config
        assert_eq!(merged.port, 9090); // from config

        let cli_override = ServeArgs {
            host: "10.0.0.1".to_string(),
            port: 4000,
            no_render: false,
            config: None,
        };
        let merged = config.merge_with_serve(&cli_override);
        assert_eq!(merged.host, "10.0.0.1"); // CLI override
        assert_eq!(merged.port, 4000); // CLI override
    }

    #[test]
    #[serial]
    fn test_default_paths_with_xdg_config_home() {
        use std::env;

        unsafe {
            env::set_var("XDG_CONFIG_HOME", "/custom/config/path");
        }

        let paths = Config::default_paths();

        assert!(
            paths
                .iter()
                .any(|p| p.to_string_lossy().contains("/custom/config/path/rendersight"))
        );

        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_default_paths_with_empty_xdg_config_home() {
        use std::env;

        // Empty XDG_CONFIG_HOME falls back to ~/.config.
        unsafe {
            env::set_var("XDG_CONFIG_HOME", "");
        }

        let paths = Config::default_paths();
        assert!(!paths.is_empty());

        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_default_paths_exists() {
        let paths = Config::default_paths();
        assert!(!paths.is_empty());

        assert!(
            paths
                .iter()
                .any(|p| p.to_string_lossy().contains("rendersight.json"))
        );
        assert!(
            paths
                .iter()
                .any(|p| p.to_string_lossy().contains("rendersight.toml"))
        );
        assert!(
            paths
                .iter()
                .any(|p| p.to_string_lossy().contains("rendersight.yaml"))
        );
    }
}

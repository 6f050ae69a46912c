//! Configuration for licenz paths and endpoints.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (LICENZ_HOME, LICENZ_BACKEND_URL)
//! 2. Config file (.licenz/config.yaml)
//! 3. Defaults (~/.licenz, http://localhost:8080)
//!
//! Config file discovery searches the current directory and its parents
//! for .licenz/config.yaml.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<std::result::Result<ResolvedConfig, String>> = OnceLock::new();

const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub backend: Option<BackendConfig>,
    #[serde(default)]
    pub wallet: Option<WalletConfig>,
    #[serde(default)]
    pub mint: Option<MintConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MintConfig {
    pub chain: Option<String>,
    pub recipient: Option<String>,
    pub contract_address: Option<String>,
}

/// Backend endpoint settings with defaults applied
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub url: String,
    pub timeout_seconds: u64,
}

/// Mint settings with defaults applied
#[derive(Debug, Clone, Default)]
pub struct MintSettings {
    pub chain: Option<String>,
    pub recipient: Option<String>,
    pub contract_address: Option<String>,
}

/// Resolved configuration with absolute paths and defaults applied
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to licenz home (persistent state)
    pub home: PathBuf,
    /// Backend endpoint settings
    pub backend: BackendSettings,
    /// Wallet address used to scope backend listings
    pub wallet_address: Option<String>,
    /// Mint provider settings
    pub mint: MintSettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Path of the persisted NFT-status map
    pub fn status_path(&self) -> PathBuf {
        self.home.join("nft-status.json")
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".licenz").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".licenz");

    let config_file = find_config_file();
    let file = match config_file.as_deref() {
        Some(path) => Some(load_config_file(path)?),
        None => None,
    };

    let home = if let Ok(env_home) = std::env::var("LICENZ_HOME") {
        PathBuf::from(env_home)
    } else if let Some(home) = file.as_ref().and_then(|f| f.home.clone()) {
        PathBuf::from(home)
    } else {
        default_home
    };

    let file_backend = file.as_ref().and_then(|f| f.backend.clone());
    let url = if let Ok(env_url) = std::env::var("LICENZ_BACKEND_URL") {
        env_url
    } else {
        file_backend
            .as_ref()
            .and_then(|b| b.url.clone())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
    };

    let backend = BackendSettings {
        url,
        timeout_seconds: file_backend
            .as_ref()
            .and_then(|b| b.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
    };

    let wallet_address = file.as_ref().and_then(|f| {
        f.wallet.as_ref().and_then(|w| w.address.clone())
    });

    let mint = file
        .as_ref()
        .and_then(|f| f.mint.clone())
        .map(|m| MintSettings {
            chain: m.chain,
            recipient: m.recipient,
            contract_address: m.contract_address,
        })
        .unwrap_or_default();

    Ok(ResolvedConfig {
        home,
        backend,
        wallet_address,
        mint,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the licenz home directory (persistent state)
pub fn licenz_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

/// Get the persisted NFT-status file path ($LICENZ_HOME/nft-status.json)
pub fn status_path() -> Result<PathBuf> {
    Ok(config()?.status_path())
}

/// Get the backend endpoint settings
pub fn backend_settings() -> Result<BackendSettings> {
    Ok(config()?.backend.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let licenz_dir = temp.path().join(".licenz");
        std::fs::create_dir_all(&licenz_dir).unwrap();

        let config_path = licenz_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
backend:
  url: http://backend.local:9090
  timeout_seconds: 10
wallet:
  address: "0x742d35Cc6634C0532925a3b8D404d2E5B4C9a8a8"
mint:
  chain: sepolia
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(
            config.backend.as_ref().unwrap().url.as_deref(),
            Some("http://backend.local:9090")
        );
        assert_eq!(config.backend.unwrap().timeout_seconds, Some(10));
        assert_eq!(
            config.wallet.unwrap().address.as_deref(),
            Some("0x742d35Cc6634C0532925a3b8D404d2E5B4C9a8a8")
        );
        assert_eq!(config.mint.unwrap().chain.as_deref(), Some("sepolia"));
    }

    #[test]
    fn test_status_path_under_home() {
        let config = ResolvedConfig {
            home: PathBuf::from("/test/.licenz"),
            backend: BackendSettings {
                url: DEFAULT_BACKEND_URL.to_string(),
                timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            },
            wallet_address: None,
            mint: MintSettings::default(),
            config_file: None,
        };

        assert_eq!(
            config.status_path(),
            PathBuf::from("/test/.licenz/nft-status.json")
        );
    }
}

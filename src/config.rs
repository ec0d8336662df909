use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const BIND_ENV: &str = "PAIR_ANNOTATOR_BIND";
pub const ORIGINS_ENV: &str = "PAIR_ANNOTATOR_ORIGINS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// CORSで許可するオリジン（フロントエンドのURL）
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8000)),
            allowed_origins: vec!["http://localhost:3000".into()],
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    /// 設定ファイルを読み込み、環境変数で上書きする
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("pair-annotator").join("config.json"))
    }

    fn apply_env(&mut self) -> Result<()> {
        // 環境変数を優先
        if let Ok(bind) = std::env::var(BIND_ENV) {
            self.bind_address = parse_bind(&bind)?;
        }
        if let Ok(origins) = std::env::var(ORIGINS_ENV) {
            self.allowed_origins = parse_origins(&origins);
        }
        Ok(())
    }

    pub fn add_origin(&mut self, origin: &str) {
        let origin = origin.trim().trim_end_matches('/');
        if !origin.is_empty() && !self.allowed_origins.iter().any(|o| o == origin) {
            self.allowed_origins.push(origin.to_string());
        }
    }
}

pub fn parse_bind(value: &str) -> Result<SocketAddr> {
    value
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("アドレスが不正です ({}): {}", value, e)))
}

/// カンマ区切りのオリジン一覧
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

//! 插件配置模块
//!
//! 配置文件位于宿主的插件配置目录下：`<config path>/tsg.json`
//!
//! # 使用示例
//!
//! ```no_run
//! use std::path::Path;
//! use tsg_lib::config::ConfigManager;
//!
//! let path = ConfigManager::config_path(Path::new("/home/user/.ts3client/plugins"));
//! let config = ConfigManager::load(&path)?;
//! ConfigManager::save(&path, &config)?;
//! # Ok::<(), tsg_lib::config::ConfigError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hotkey::HotkeyConfig;

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "tsg.json";

/// 默认日志过滤规则
pub const DEFAULT_LOG_FILTER: &str = "tsg_lib=info,warn";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化/反序列化错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 配置结果类型
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 插件配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PluginConfig {
    /// 热键配置
    pub hotkeys: HotkeyConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` 过滤规则，`RUST_LOG` 优先
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 配置目录下的配置文件路径
    pub fn config_path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }

    /// 加载配置
    ///
    /// 文件不存在时返回默认配置
    pub fn load(path: &Path) -> ConfigResult<PluginConfig> {
        tracing::debug!(path = %path.display(), "Loading config");

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: PluginConfig = serde_json::from_str(&content)?;
            tracing::info!(path = %path.display(), "Config loaded successfully");
            Ok(config)
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(PluginConfig::default())
        }
    }

    /// 保存配置
    pub fn save(path: &Path, config: &PluginConfig) -> ConfigResult<()> {
        tracing::debug!(path = %path.display(), "Saving config");

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(path, content)?;

        tracing::info!(path = %path.display(), "Config saved successfully");
        Ok(())
    }
}

/// 全局配置状态
///
/// 使用 ArcSwap 实现无锁读取，按键回调线程读取时不会阻塞
pub struct GlobalConfig {
    config: ArcSwap<PluginConfig>,
}

impl GlobalConfig {
    /// 创建新的全局配置
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config: ArcSwap::new(Arc::new(config)),
        }
    }

    /// 获取当前配置
    pub fn get(&self) -> Arc<PluginConfig> {
        self.config.load_full()
    }

    /// 更新配置
    pub fn update(&self, config: PluginConfig) {
        self.config.store(Arc::new(config));
    }

    /// 更新热键配置
    pub fn set_hotkeys(&self, hotkeys: HotkeyConfig) {
        let mut config = (*self.config.load_full()).clone();
        config.hotkeys = hotkeys;
        self.config.store(Arc::new(config));
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self::new(PluginConfig::default())
    }
}

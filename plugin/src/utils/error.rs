//! 全局错误处理模块
//!
//! 聚合各模块的错误类型，供插件入口统一处理

use thiserror::Error;

use crate::config::ConfigError;
use crate::gkey::GkeyError;
use crate::host::HostError;

/// 插件错误类型
#[derive(Error, Debug)]
pub enum PluginError {
    /// 宿主调用错误
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// G-key 设备错误
    #[error("G-key error: {0}")]
    Gkey(#[from] GkeyError),

    /// 宿主尚未传入函数表
    #[error("Host functions have not been set")]
    FunctionsNotSet,

    /// 插件已初始化
    #[error("Plugin is already initialized")]
    AlreadyInitialized,
}

/// 插件结果类型
pub type PluginResult<T> = Result<T, PluginError>;

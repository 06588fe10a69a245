//! 宿主接口模块
//!
//! 将 TeamSpeak 客户端提供的函数表封装为若干能力 trait，
//! 使 PTT 逻辑可以脱离真实宿主进行测试
//!
//! # 模块结构
//!
//! - `interface` - 能力 trait（会话枚举、会话配置、错误翻译、日志输出）
//! - `error` - 宿主调用错误类型
//! - `ffi` - 宿主函数表与基于函数表的实现

mod error;
mod ffi;
mod interface;

pub use error::{HostError, HostResult, ERROR_OK};
pub use ffi::{FfiHost, HostFunctions};
pub use interface::{
    ClientVariable, ErrorTranslator, Host, LogLevel, LogSink, SessionConfig, SessionEnumerator,
    SessionHandle, INPUT_ACTIVE, INPUT_DEACTIVATED,
};

/// 写入宿主日志时使用的组件名称
pub const COMPONENT: &str = "TSG";

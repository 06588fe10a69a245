//! 宿主调用相关错误类型

use thiserror::Error;

/// 宿主调用成功时返回的错误码
pub const ERROR_OK: u32 = 0;

/// 宿主调用错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// 宿主函数返回了非零错误码
    #[error("{call} failed with error code {code:#06x}")]
    CallFailed { call: &'static str, code: u32 },

    /// 宿主函数表中缺少所需的函数
    #[error("Host function '{0}' is not available")]
    MissingFunction(&'static str),

    /// 字符串无法在宿主与插件之间传递
    #[error("Invalid string passed to or returned from '{0}'")]
    InvalidString(&'static str),
}

impl HostError {
    /// 获取宿主错误码（如果有）
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::CallFailed { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// 将宿主返回码转换为结果
    pub fn check(call: &'static str, code: u32) -> HostResult<()> {
        if code == ERROR_OK {
            Ok(())
        } else {
            Err(Self::CallFailed { call, code })
        }
    }
}

/// 宿主调用的结果类型
pub type HostResult<T> = Result<T, HostError>;

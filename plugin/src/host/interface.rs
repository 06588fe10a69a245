//! 宿主能力 trait
//!
//! 每个 trait 对应宿主函数表中的一组函数，可以单独模拟

use super::error::HostResult;

/// 语音会话句柄（服务器连接句柄）
///
/// 由宿主分配和管理，插件只通过它读写会话配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(u64);

impl SessionHandle {
    /// 从宿主句柄创建，`0` 表示无会话
    pub fn new(id: u64) -> Option<Self> {
        (id != 0).then_some(Self(id))
    }

    /// 获取原始句柄值
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// 客户端自身变量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum ClientVariable {
    /// 采集硬件是否可用（1 = 可用）
    InputHardware = 8,
    /// 输入是否被停用（见 [`INPUT_ACTIVE`] / [`INPUT_DEACTIVATED`]）
    InputDeactivated = 10,
}

impl ClientVariable {
    /// 宿主使用的变量编号
    pub fn flag(self) -> usize {
        self as usize
    }
}

/// `ClientVariable::InputDeactivated` 的取值：输入启用
pub const INPUT_ACTIVE: i32 = 0;
/// `ClientVariable::InputDeactivated` 的取值：输入停用
pub const INPUT_DEACTIVATED: i32 = 1;

/// 宿主日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum LogLevel {
    Critical = 0,
    Error = 1,
    Warning = 2,
    Debug = 3,
    Info = 4,
    Devel = 5,
}

/// 枚举当前所有语音会话
pub trait SessionEnumerator {
    /// 按宿主顺序返回所有会话句柄
    fn session_handles(&self) -> HostResult<Vec<SessionHandle>>;
}

/// 读写单个会话的配置
pub trait SessionConfig {
    /// 读取预处理器配置项（例如 `"vad"`）
    fn preprocessor_value(&self, session: SessionHandle, ident: &str) -> HostResult<String>;

    /// 写入预处理器配置项
    fn set_preprocessor_value(
        &self,
        session: SessionHandle,
        ident: &str,
        value: &str,
    ) -> HostResult<()>;

    /// 读取客户端自身整型变量
    fn self_variable(&self, session: SessionHandle, variable: ClientVariable) -> HostResult<i32>;

    /// 写入客户端自身整型变量（需要调用 `flush_self_updates` 生效）
    fn set_self_variable(
        &self,
        session: SessionHandle,
        variable: ClientVariable,
        value: i32,
    ) -> HostResult<()>;

    /// 提交待生效的自身变量修改
    fn flush_self_updates(&self, session: SessionHandle) -> HostResult<()>;
}

/// 将宿主错误码翻译为可读消息
pub trait ErrorTranslator {
    fn error_message(&self, code: u32) -> Option<String>;
}

/// 宿主日志输出
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, channel: &str, message: &str);
}

/// PTT 逻辑需要的全部宿主能力
pub trait Host: SessionEnumerator + SessionConfig + ErrorTranslator + Send + Sync {}

impl<T> Host for T where T: SessionEnumerator + SessionConfig + ErrorTranslator + Send + Sync {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_handle_zero_is_none() {
        assert!(SessionHandle::new(0).is_none());
        assert_eq!(SessionHandle::new(7).map(|h| h.id()), Some(7));
    }

    #[test]
    fn test_client_variable_flags() {
        assert_eq!(ClientVariable::InputHardware.flag(), 8);
        assert_eq!(ClientVariable::InputDeactivated.flag(), 10);
    }
}

//! 设备事件源

use thiserror::Error;

use super::event::KeyEvent;

/// 按键事件回调，可能在 SDK 的线程上调用
pub type KeyCallback = Box<dyn Fn(KeyEvent) + Send + Sync>;

/// G-key 相关错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GkeyError {
    /// SDK 初始化失败（通常是 Logitech Gaming Software 未运行）
    #[error("Failed to initialize G-key SDK")]
    InitFailed,

    /// 已经注册过回调
    #[error("G-key callback is already registered")]
    AlreadyRegistered,

    /// 当前构建不支持 G-key SDK
    #[error("G-key SDK is not available in this build")]
    Unavailable,
}

/// G-key 模块的结果类型
pub type GkeyResult<T> = Result<T, GkeyError>;

/// 设备事件源
///
/// 注册后每个按键事件都会调用回调，直到 `unregister`
pub trait DeviceEventSource: Send + Sync {
    fn register(&self, callback: KeyCallback) -> GkeyResult<()>;

    fn unregister(&self);
}

/// 当前平台的默认事件源
pub fn default_event_source() -> Box<dyn DeviceEventSource> {
    #[cfg(all(windows, feature = "gkey-sdk"))]
    return Box::new(LogitechGkeySdk::new());

    #[cfg(not(all(windows, feature = "gkey-sdk")))]
    return Box::new(UnavailableEventSource);
}

/// 未编译 SDK 时使用的事件源
#[cfg(not(all(windows, feature = "gkey-sdk")))]
struct UnavailableEventSource;

#[cfg(not(all(windows, feature = "gkey-sdk")))]
impl DeviceEventSource for UnavailableEventSource {
    fn register(&self, _callback: KeyCallback) -> GkeyResult<()> {
        tracing::warn!("Built without the gkey-sdk feature, G-keys will not be available");
        Err(GkeyError::Unavailable)
    }

    fn unregister(&self) {}
}

#[cfg(all(windows, feature = "gkey-sdk"))]
pub use sdk::LogitechGkeySdk;

#[cfg(all(windows, feature = "gkey-sdk"))]
mod sdk {
    use std::ffi::c_void;

    use parking_lot::Mutex;

    use super::{DeviceEventSource, GkeyError, GkeyResult, KeyCallback};
    use crate::encoding::wide_ptr_to_utf8;
    use crate::gkey::KeyEvent;

    type GkeyCallbackFn = unsafe extern "C" fn(u32, *const u16, *mut c_void);

    #[repr(C)]
    struct GkeyCallbackContext {
        callback: Option<GkeyCallbackFn>,
        context: *mut c_void,
    }

    #[link(name = "LogitechGkeyLib")]
    unsafe extern "C" {
        fn LogiGkeyInit(context: *mut GkeyCallbackContext) -> bool;
        fn LogiGkeyShutdown();
    }

    unsafe extern "C" fn on_gkey(code: u32, label: *const u16, context: *mut c_void) {
        if context.is_null() {
            return;
        }
        // SAFETY: context 指向 LogitechGkeySdk 持有的回调，注销前一直有效
        let callback = unsafe { &*(context as *const KeyCallback) };
        let event = KeyEvent::from_raw(code);

        if tracing::enabled!(tracing::Level::DEBUG) {
            // SAFETY: SDK 传入空指针或以 NUL 结尾的宽字符串
            match unsafe { wide_ptr_to_utf8(label) } {
                Ok(label) => tracing::debug!(?event, %label, "G-key event"),
                Err(e) => tracing::debug!(?event, error = %e, "G-key event with unreadable label"),
            }
        }

        callback(event);
    }

    /// Logitech G-key SDK 事件源
    pub struct LogitechGkeySdk {
        callback: Mutex<Option<Box<KeyCallback>>>,
    }

    impl LogitechGkeySdk {
        pub fn new() -> Self {
            Self {
                callback: Mutex::new(None),
            }
        }
    }

    impl Default for LogitechGkeySdk {
        fn default() -> Self {
            Self::new()
        }
    }

    impl DeviceEventSource for LogitechGkeySdk {
        fn register(&self, callback: KeyCallback) -> GkeyResult<()> {
            let mut slot = self.callback.lock();
            if slot.is_some() {
                return Err(GkeyError::AlreadyRegistered);
            }

            let callback = Box::new(callback);
            let mut context = GkeyCallbackContext {
                callback: Some(on_gkey),
                context: &*callback as *const KeyCallback as *mut c_void,
            };

            // SAFETY: SDK 复制 context，回调指针在注销前保持有效
            if !unsafe { LogiGkeyInit(&mut context) } {
                return Err(GkeyError::InitFailed);
            }

            *slot = Some(callback);
            tracing::info!("G-key SDK initialized");
            Ok(())
        }

        fn unregister(&self) {
            let mut slot = self.callback.lock();
            if slot.is_some() {
                // SAFETY: 只在初始化成功后调用
                unsafe { LogiGkeyShutdown() };
                *slot = None;
                tracing::info!("G-key SDK shut down");
            }
        }
    }

}

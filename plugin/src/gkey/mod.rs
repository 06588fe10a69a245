//! Logitech G-key 设备模块
//!
//! 解码 G-key SDK 的按键事件，并抽象 SDK 的回调注册
//!
//! # 模块结构
//!
//! - `event` - 按键事件及其打包格式
//! - `source` - 设备事件源 trait 与 SDK 绑定

mod event;
mod source;

pub use event::KeyEvent;
pub use source::{default_event_source, DeviceEventSource, GkeyError, GkeyResult, KeyCallback};

#[cfg(all(windows, feature = "gkey-sdk"))]
pub use source::LogitechGkeySdk;

//! 热键模块
//!
//! 把 G-key 事件分发为 PTT 切换
//!
//! # 功能
//!
//! - 指定的 G 键按下：开始说话
//! - 指定的 G 键松开：恢复按下前的语音设置
//! - 鼠标按键与其他 G 键：忽略

mod config;
mod handlers;

pub use config::HotkeyConfig;
pub use handlers::{DispatchResult, KeyEventDispatcher};

//! Push-to-Talk 状态适配模块
//!
//! 把按键的按下/松开映射为语音会话的 VAD 与输入停用设置，
//! 并在松开时恢复按下前的设置
//!
//! # 模块结构
//!
//! - `state` - PTT 状态与目标设置计算
//! - `outcome` - 单次切换的执行结果
//! - `adapter` - 活动会话解析与切换流程

mod adapter;
mod outcome;
mod state;

pub use adapter::{PttAdapter, VAD_CONFIG_KEY};
pub use outcome::{ApplyOutcome, ApplyStep};
pub use state::{PttState, PttTarget};

//! 热键处理器模块
//!
//! 实现 G 键按下/松开的具体处理逻辑

use std::sync::Arc;

use crate::config::GlobalConfig;
use crate::gkey::KeyEvent;
use crate::host::Host;
use crate::ptt::{ApplyOutcome, PttAdapter};

/// 单个按键事件的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    /// 非 PTT 按键，已忽略
    Ignored,
    /// 没有活动会话，事件被丢弃
    NoActiveSession,
    /// 已对活动会话执行切换
    Toggled(ApplyOutcome),
}

/// 按键事件分发器
pub struct KeyEventDispatcher<H> {
    adapter: Arc<PttAdapter<H>>,
    config: Arc<GlobalConfig>,
}

impl<H: Host> KeyEventDispatcher<H> {
    pub fn new(adapter: Arc<PttAdapter<H>>, config: Arc<GlobalConfig>) -> Self {
        Self { adapter, config }
    }

    /// PTT 适配器
    pub fn adapter(&self) -> &Arc<PttAdapter<H>> {
        &self.adapter
    }

    /// 处理按键事件
    ///
    /// 按下时开始说话，松开时恢复。失败只记录日志，
    /// 会话设置可能保持不一致直到下一次按键
    pub fn dispatch(&self, event: KeyEvent) -> DispatchResult {
        if !self.config.get().hotkeys.is_push_to_talk(&event) {
            tracing::trace!(?event, "Ignoring key event");
            return DispatchResult::Ignored;
        }

        let Some(session) = self.adapter.active_session() else {
            tracing::warn!(
                key_down = event.key_down,
                "PTT key event but no active session, ignoring"
            );
            return DispatchResult::NoActiveSession;
        };

        let outcome = self.adapter.set_push_to_talk(session, event.key_down);
        match &outcome {
            ApplyOutcome::Applied => {}
            ApplyOutcome::NotApplied { failed_step, .. } => {
                tracing::warn!(
                    session = session.id(),
                    step = %failed_step,
                    "Push-to-talk not applied"
                );
            }
            ApplyOutcome::PartiallyApplied {
                completed,
                failed_step,
                ..
            } => {
                tracing::warn!(
                    session = session.id(),
                    ?completed,
                    step = %failed_step,
                    "Push-to-talk partially applied, session settings may be inconsistent"
                );
            }
        }

        DispatchResult::Toggled(outcome)
    }
}

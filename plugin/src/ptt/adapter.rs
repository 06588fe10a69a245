//! PTT 适配器
//!
//! 负责解析当前活动的语音会话，并对其执行 PTT 切换

use std::sync::Arc;

use parking_lot::Mutex;

use super::outcome::{ApplyOutcome, ApplyStep};
use super::state::PttState;
use crate::host::{ClientVariable, Host, HostError, SessionHandle, INPUT_ACTIVE, INPUT_DEACTIVATED};

/// 预处理器中 VAD 配置项的名称
pub const VAD_CONFIG_KEY: &str = "vad";

const VAD_ENABLED: &str = "true";
const VAD_DISABLED: &str = "false";

/// PTT 适配器
///
/// 持有 PTT 状态，整个切换流程在同一把锁内完成，
/// 宿主回调与设备回调并发到达时不会交错执行
pub struct PttAdapter<H> {
    host: Arc<H>,
    state: Mutex<PttState>,
}

impl<H: Host> PttAdapter<H> {
    /// 创建处于空闲状态的适配器
    pub fn new(host: Arc<H>) -> Self {
        Self {
            host,
            state: Mutex::new(PttState::new()),
        }
    }

    /// 当前 PTT 状态
    pub fn state(&self) -> PttState {
        *self.state.lock()
    }

    /// 宿主引用
    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// 解析当前活动的语音会话
    ///
    /// 返回第一个采集硬件可用的会话。这是一个近似判断：
    /// 同时存在多个可用会话时只会选中列表中的第一个
    pub fn active_session(&self) -> Option<SessionHandle> {
        let handles = match self.host.session_handles() {
            Ok(handles) => handles,
            Err(e) => {
                self.report(&e, "Failed to retrieve server connection handlers");
                return None;
            }
        };

        for handle in handles {
            match self.host.self_variable(handle, ClientVariable::InputHardware) {
                Ok(0) => {}
                Ok(_) => {
                    tracing::debug!(session = handle.id(), "Resolved active session");
                    return Some(handle);
                }
                Err(e) => {
                    self.report(&e, "Failed to query input hardware, skipping session");
                }
            }
        }

        tracing::debug!("No session with active input hardware");
        None
    }

    /// 对会话执行 PTT 切换
    ///
    /// `should_talk` 为 true 表示按键按下。PTT 从空闲进入激活时会先记录
    /// 会话当前的 VAD 与输入设置，松开时据此恢复
    pub fn set_push_to_talk(&self, session: SessionHandle, should_talk: bool) -> ApplyOutcome {
        let mut state = self.state.lock();

        if state.needs_snapshot() {
            if let Err((step, e)) = self.snapshot(session, &mut state) {
                return ApplyOutcome::failed(Vec::new(), step, e);
            }
        }

        let target = state.target(should_talk);
        let mut completed = Vec::with_capacity(3);

        let vad_value = if target.vad_enabled {
            VAD_ENABLED
        } else {
            VAD_DISABLED
        };
        if let Err(e) = self
            .host
            .set_preprocessor_value(session, VAD_CONFIG_KEY, vad_value)
        {
            self.report(&e, "Failed to set VAD setting");
            return ApplyOutcome::failed(completed, ApplyStep::WriteVad, e);
        }
        completed.push(ApplyStep::WriteVad);

        let input_value = if target.input_active {
            INPUT_ACTIVE
        } else {
            INPUT_DEACTIVATED
        };
        if let Err(e) = self
            .host
            .set_self_variable(session, ClientVariable::InputDeactivated, input_value)
        {
            self.report(&e, "Failed to set input state");
            return ApplyOutcome::failed(completed, ApplyStep::WriteInput, e);
        }
        completed.push(ApplyStep::WriteInput);

        if let Err(e) = self.host.flush_self_updates(session) {
            self.report(&e, "Failed to flush client self updates");
            return ApplyOutcome::failed(completed, ApplyStep::Flush, e);
        }

        state.commit(should_talk);
        tracing::info!(
            session = session.id(),
            should_talk,
            vad_enabled = target.vad_enabled,
            input_active = target.input_active,
            "Push-to-talk applied"
        );
        ApplyOutcome::Applied
    }

    fn snapshot(
        &self,
        session: SessionHandle,
        state: &mut PttState,
    ) -> Result<(), (ApplyStep, HostError)> {
        let vad = self
            .host
            .preprocessor_value(session, VAD_CONFIG_KEY)
            .map_err(|e| {
                self.report(&e, "Failed to retrieve VAD setting");
                (ApplyStep::ReadVad, e)
            })?;

        let input = self
            .host
            .self_variable(session, ClientVariable::InputHardware)
            .map_err(|e| {
                self.report(&e, "Failed to retrieve input hardware state");
                (ApplyStep::ReadInput, e)
            })?;

        let vad_active = vad == VAD_ENABLED;
        let input_active = input != 0;
        state.capture(vad_active, input_active);

        tracing::debug!(
            session = session.id(),
            vad_active,
            input_active,
            "Captured session settings"
        );
        Ok(())
    }

    /// 记录宿主错误，优先使用宿主翻译的错误消息
    fn report(&self, error: &HostError, context: &str) {
        let message = error
            .code()
            .and_then(|code| self.host.error_message(code))
            .unwrap_or_else(|| error.to_string());

        tracing::error!(code = ?error.code(), error = %message, "{context}");
    }
}

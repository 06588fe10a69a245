//! 测试用的模拟宿主与模拟设备事件源

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tsg_lib::gkey::{DeviceEventSource, GkeyError, GkeyResult, KeyCallback, KeyEvent};
use tsg_lib::host::{
    ClientVariable, ErrorTranslator, HostError, HostResult, SessionConfig, SessionEnumerator,
    SessionHandle, INPUT_ACTIVE,
};

/// 模拟宿主记录的调用
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Call {
    ListSessions,
    GetVad,
    SetVad(String),
    GetInputHardware(u64),
    GetInputDeactivated,
    SetInput(i32),
    Flush,
}

/// 可以注入失败的调用类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fail {
    ListSessions,
    GetVad,
    SetVad,
    SetInput,
    Flush,
}

pub const FAILURE_CODE: u32 = 0x0200;

struct Inner {
    sessions: Vec<u64>,
    input_hardware: HashMap<u64, HostResult<i32>>,
    vad: String,
    input_deactivated: i32,
    failures: HashSet<Fail>,
    calls: Vec<Call>,
}

/// 模拟宿主
pub struct MockHost {
    inner: Mutex<Inner>,
}

impl MockHost {
    /// 单个会话 1，VAD、输入硬件与输入停用设置由参数指定
    pub fn new(vad: bool, input_hardware: i32, input_deactivated: i32) -> Self {
        let host = Self {
            inner: Mutex::new(Inner {
                sessions: vec![1],
                input_hardware: HashMap::new(),
                vad: if vad { "true" } else { "false" }.to_string(),
                input_deactivated,
                failures: HashSet::new(),
                calls: Vec::new(),
            }),
        };
        host.set_input_hardware(1, Ok(input_hardware));
        host
    }

    /// VAD 启用、输入硬件启用、输入启用
    pub fn vad_user() -> Self {
        Self::new(true, 1, INPUT_ACTIVE)
    }

    pub fn with_sessions(self, sessions: &[u64]) -> Self {
        self.inner.lock().sessions = sessions.to_vec();
        self
    }

    pub fn set_input_hardware(&self, session: u64, value: HostResult<i32>) {
        self.inner.lock().input_hardware.insert(session, value);
    }

    pub fn fail(&self, call: Fail) {
        self.inner.lock().failures.insert(call);
    }

    pub fn recover(&self, call: Fail) {
        self.inner.lock().failures.remove(&call);
    }

    pub fn vad(&self) -> String {
        self.inner.lock().vad.clone()
    }

    pub fn input_deactivated(&self) -> i32 {
        self.inner.lock().input_deactivated
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().calls.clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.inner.lock().calls.iter().filter(|c| *c == call).count()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }

    fn record(&self, call: Call, fail: Option<Fail>, name: &'static str) -> HostResult<()> {
        let mut inner = self.inner.lock();
        inner.calls.push(call);
        match fail {
            Some(fail) if inner.failures.contains(&fail) => Err(HostError::CallFailed {
                call: name,
                code: FAILURE_CODE,
            }),
            _ => Ok(()),
        }
    }
}

impl SessionEnumerator for MockHost {
    fn session_handles(&self) -> HostResult<Vec<SessionHandle>> {
        self.record(Call::ListSessions, Some(Fail::ListSessions), "list")?;
        Ok(self
            .inner
            .lock()
            .sessions
            .iter()
            .filter_map(|id| SessionHandle::new(*id))
            .collect())
    }
}

impl SessionConfig for MockHost {
    fn preprocessor_value(&self, _session: SessionHandle, ident: &str) -> HostResult<String> {
        assert_eq!(ident, "vad");
        self.record(Call::GetVad, Some(Fail::GetVad), "getPreProcessorConfigValue")?;
        Ok(self.inner.lock().vad.clone())
    }

    fn set_preprocessor_value(
        &self,
        _session: SessionHandle,
        ident: &str,
        value: &str,
    ) -> HostResult<()> {
        assert_eq!(ident, "vad");
        self.record(
            Call::SetVad(value.to_string()),
            Some(Fail::SetVad),
            "setPreProcessorConfigValue",
        )?;
        self.inner.lock().vad = value.to_string();
        Ok(())
    }

    fn self_variable(&self, session: SessionHandle, variable: ClientVariable) -> HostResult<i32> {
        match variable {
            ClientVariable::InputHardware => {
                self.record(Call::GetInputHardware(session.id()), None, "")?;
                self.inner
                    .lock()
                    .input_hardware
                    .get(&session.id())
                    .cloned()
                    .unwrap_or(Ok(0))
            }
            ClientVariable::InputDeactivated => {
                self.record(Call::GetInputDeactivated, None, "")?;
                Ok(self.inner.lock().input_deactivated)
            }
        }
    }

    fn set_self_variable(
        &self,
        _session: SessionHandle,
        variable: ClientVariable,
        value: i32,
    ) -> HostResult<()> {
        assert_eq!(variable, ClientVariable::InputDeactivated);
        self.record(
            Call::SetInput(value),
            Some(Fail::SetInput),
            "setClientSelfVariableAsInt",
        )?;
        self.inner.lock().input_deactivated = value;
        Ok(())
    }

    fn flush_self_updates(&self, _session: SessionHandle) -> HostResult<()> {
        self.record(Call::Flush, Some(Fail::Flush), "flushClientSelfUpdates")
    }
}

impl ErrorTranslator for MockHost {
    fn error_message(&self, code: u32) -> Option<String> {
        Some(format!("mock error {code:#x}"))
    }
}

/// 模拟设备事件源
#[derive(Clone, Default)]
pub struct MockEventSource {
    callback: Arc<Mutex<Option<KeyCallback>>>,
    fail_register: bool,
}

impl MockEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_register: true,
            ..Self::default()
        }
    }

    pub fn is_registered(&self) -> bool {
        self.callback.lock().is_some()
    }

    /// 模拟 SDK 触发按键事件
    pub fn press(&self, event: KeyEvent) {
        if let Some(callback) = self.callback.lock().as_ref() {
            callback(event);
        }
    }
}

impl DeviceEventSource for MockEventSource {
    fn register(&self, callback: KeyCallback) -> GkeyResult<()> {
        if self.fail_register {
            return Err(GkeyError::InitFailed);
        }
        let mut slot = self.callback.lock();
        if slot.is_some() {
            return Err(GkeyError::AlreadyRegistered);
        }
        *slot = Some(callback);
        Ok(())
    }

    fn unregister(&self) {
        *self.callback.lock() = None;
    }
}

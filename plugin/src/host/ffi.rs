//! 宿主函数表
//!
//! 宿主在 `ts3plugin_setFunctionPointers` 中传入函数表，
//! [`FfiHost`] 基于它实现各个能力 trait

use std::ffi::{c_char, c_int, c_uint, c_void, CStr, CString};
use std::path::PathBuf;
use std::ptr;

use super::error::{HostError, HostResult};
use super::interface::{
    ClientVariable, ErrorTranslator, LogLevel, LogSink, SessionConfig, SessionEnumerator,
    SessionHandle,
};

/// 配置路径缓冲区大小
const PATH_BUFSIZE: usize = 512;

type FreeMemoryFn = unsafe extern "C" fn(*mut c_void) -> c_uint;

/// 宿主函数表
///
/// 按客户端 `TS3Functions` 的顺序声明，插件不调用的项用指针宽度的占位填充。
/// 宿主按值传入整张表，这里只声明到 `getConfigPath` 为止的前缀，
/// 之后的项插件不会读取。
///
/// 各项为可空函数指针，缺失的函数在调用时返回 [`HostError::MissingFunction`]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HostFunctions {
    /// getClientLibVersion .. destroyServerConnectionHandler
    pub(crate) _client_lib: [usize; 4],
    pub get_error_message: Option<unsafe extern "C" fn(c_uint, *mut *mut c_char) -> c_uint>,
    pub free_memory: Option<FreeMemoryFn>,
    pub log_message:
        Option<unsafe extern "C" fn(*const c_char, c_int, *const c_char, u64) -> c_uint>,
    /// getPlaybackDeviceList .. getPreProcessorInfoValueFloat
    pub(crate) _sound: [usize; 27],
    pub get_pre_processor_config_value:
        Option<unsafe extern "C" fn(u64, *const c_char, *mut *mut c_char) -> c_uint>,
    pub set_pre_processor_config_value:
        Option<unsafe extern "C" fn(u64, *const c_char, *const c_char) -> c_uint>,
    /// getEncodeConfigValue .. getClientID
    pub(crate) _server_requests: [usize; 38],
    pub get_client_self_variable_as_int:
        Option<unsafe extern "C" fn(u64, usize, *mut c_int) -> c_uint>,
    /// getClientSelfVariableAsString
    pub(crate) _get_self_string: usize,
    pub set_client_self_variable_as_int: Option<unsafe extern "C" fn(u64, usize, c_int) -> c_uint>,
    /// setClientSelfVariableAsString
    pub(crate) _set_self_string: usize,
    pub flush_client_self_updates: Option<unsafe extern "C" fn(u64, *const c_char) -> c_uint>,
    /// getClientVariableAsInt .. getParentChannelOfChannel
    pub(crate) _client_and_channel: [usize; 17],
    pub get_server_connection_handler_list: Option<unsafe extern "C" fn(*mut *mut u64) -> c_uint>,
    /// getServerVariableAsInt .. getResourcesPath
    pub(crate) _server_to_resources: [usize; 84],
    pub get_config_path: Option<unsafe extern "C" fn(*mut c_char, usize)>,
}

impl Default for HostFunctions {
    fn default() -> Self {
        Self {
            _client_lib: [0; 4],
            get_error_message: None,
            free_memory: None,
            log_message: None,
            _sound: [0; 27],
            get_pre_processor_config_value: None,
            set_pre_processor_config_value: None,
            _server_requests: [0; 38],
            get_client_self_variable_as_int: None,
            _get_self_string: 0,
            set_client_self_variable_as_int: None,
            _set_self_string: 0,
            flush_client_self_updates: None,
            _client_and_channel: [0; 17],
            get_server_connection_handler_list: None,
            _server_to_resources: [0; 84],
            get_config_path: None,
        }
    }
}

/// 宿主分配的内存，离开作用域时交还宿主释放
struct HostAllocation {
    ptr: *mut c_void,
    free: Option<FreeMemoryFn>,
}

impl Drop for HostAllocation {
    fn drop(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        match self.free {
            // SAFETY: ptr 由宿主分配，且只释放一次
            Some(free) => unsafe {
                free(self.ptr);
            },
            None => tracing::warn!("freeMemory not available, leaking host allocation"),
        }
    }
}

/// 基于宿主函数表的宿主实现
#[derive(Debug, Clone, Copy)]
pub struct FfiHost {
    functions: HostFunctions,
}

impl FfiHost {
    pub fn new(functions: HostFunctions) -> Self {
        Self { functions }
    }

    fn require<F>(function: Option<F>, name: &'static str) -> HostResult<F> {
        function.ok_or(HostError::MissingFunction(name))
    }

    fn allocation(&self, ptr: *mut c_void) -> HostAllocation {
        HostAllocation {
            ptr,
            free: self.functions.free_memory,
        }
    }

    fn c_string(value: &str, call: &'static str) -> HostResult<CString> {
        CString::new(value).map_err(|_| HostError::InvalidString(call))
    }

    /// 宿主的插件配置目录
    pub fn config_path(&self) -> HostResult<PathBuf> {
        const CALL: &str = "getConfigPath";
        let get_config_path = Self::require(self.functions.get_config_path, CALL)?;

        let mut buffer = vec![0 as c_char; PATH_BUFSIZE];
        // SAFETY: 缓冲区长度与传入的大小一致
        unsafe { get_config_path(buffer.as_mut_ptr(), buffer.len()) };
        buffer[PATH_BUFSIZE - 1] = 0;

        // SAFETY: 缓冲区以 NUL 结尾
        let path = unsafe { CStr::from_ptr(buffer.as_ptr()) };
        let path = path.to_str().map_err(|_| HostError::InvalidString(CALL))?;
        Ok(PathBuf::from(path))
    }
}

impl SessionEnumerator for FfiHost {
    fn session_handles(&self) -> HostResult<Vec<SessionHandle>> {
        const CALL: &str = "getServerConnectionHandlerList";
        let list_fn = Self::require(self.functions.get_server_connection_handler_list, CALL)?;

        let mut list: *mut u64 = ptr::null_mut();
        // SAFETY: 宿主写入一个以 0 结尾的数组指针
        let code = unsafe { list_fn(&mut list) };
        let _guard = self.allocation(list.cast());
        HostError::check(CALL, code)?;

        let mut handles = Vec::new();
        if !list.is_null() {
            let mut index = 0;
            loop {
                // SAFETY: 数组以 0 结尾，遇到 0 前的元素都有效
                let id = unsafe { *list.add(index) };
                match SessionHandle::new(id) {
                    Some(handle) => handles.push(handle),
                    None => break,
                }
                index += 1;
            }
        }
        Ok(handles)
    }
}

impl SessionConfig for FfiHost {
    fn preprocessor_value(&self, session: SessionHandle, ident: &str) -> HostResult<String> {
        const CALL: &str = "getPreProcessorConfigValue";
        let get_value = Self::require(self.functions.get_pre_processor_config_value, CALL)?;
        let ident = Self::c_string(ident, CALL)?;

        let mut result: *mut c_char = ptr::null_mut();
        // SAFETY: ident 在调用期间有效，result 由宿主分配
        let code = unsafe { get_value(session.id(), ident.as_ptr(), &mut result) };
        let _guard = self.allocation(result.cast());
        HostError::check(CALL, code)?;

        if result.is_null() {
            return Err(HostError::InvalidString(CALL));
        }
        // SAFETY: 宿主返回以 NUL 结尾的字符串
        let value = unsafe { CStr::from_ptr(result) };
        Ok(value.to_string_lossy().into_owned())
    }

    fn set_preprocessor_value(
        &self,
        session: SessionHandle,
        ident: &str,
        value: &str,
    ) -> HostResult<()> {
        const CALL: &str = "setPreProcessorConfigValue";
        let set_value = Self::require(self.functions.set_pre_processor_config_value, CALL)?;
        let ident = Self::c_string(ident, CALL)?;
        let value = Self::c_string(value, CALL)?;

        // SAFETY: 两个字符串在调用期间有效
        let code = unsafe { set_value(session.id(), ident.as_ptr(), value.as_ptr()) };
        HostError::check(CALL, code)
    }

    fn self_variable(&self, session: SessionHandle, variable: ClientVariable) -> HostResult<i32> {
        const CALL: &str = "getClientSelfVariableAsInt";
        let get_var = Self::require(self.functions.get_client_self_variable_as_int, CALL)?;

        let mut value: c_int = 0;
        // SAFETY: value 是有效的输出指针
        let code = unsafe { get_var(session.id(), variable.flag(), &mut value) };
        HostError::check(CALL, code)?;
        Ok(value)
    }

    fn set_self_variable(
        &self,
        session: SessionHandle,
        variable: ClientVariable,
        value: i32,
    ) -> HostResult<()> {
        const CALL: &str = "setClientSelfVariableAsInt";
        let set_var = Self::require(self.functions.set_client_self_variable_as_int, CALL)?;

        // SAFETY: 参数均为值类型
        let code = unsafe { set_var(session.id(), variable.flag(), value) };
        HostError::check(CALL, code)
    }

    fn flush_self_updates(&self, session: SessionHandle) -> HostResult<()> {
        const CALL: &str = "flushClientSelfUpdates";
        let flush = Self::require(self.functions.flush_client_self_updates, CALL)?;

        // SAFETY: 返回码参数允许为空
        let code = unsafe { flush(session.id(), ptr::null()) };
        HostError::check(CALL, code)
    }
}

impl ErrorTranslator for FfiHost {
    fn error_message(&self, code: u32) -> Option<String> {
        let get_message = self.functions.get_error_message?;

        let mut message: *mut c_char = ptr::null_mut();
        // SAFETY: message 由宿主分配
        let result = unsafe { get_message(code, &mut message) };
        let _guard = self.allocation(message.cast());
        if HostError::check("getErrorMessage", result).is_err() || message.is_null() {
            return None;
        }

        // SAFETY: 宿主返回以 NUL 结尾的字符串
        let message = unsafe { CStr::from_ptr(message) };
        Some(message.to_string_lossy().into_owned())
    }
}

impl LogSink for FfiHost {
    fn log(&self, level: LogLevel, channel: &str, message: &str) {
        let Some(log_message) = self.functions.log_message else {
            return;
        };
        let message = CString::new(message.replace('\0', " ")).unwrap_or_default();
        let channel = CString::new(channel.replace('\0', " ")).unwrap_or_default();

        // SAFETY: 两个字符串在调用期间有效
        unsafe {
            log_message(message.as_ptr(), level as c_int, channel.as_ptr(), 0);
        }
    }
}

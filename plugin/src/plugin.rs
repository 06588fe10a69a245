//! 插件入口模块
//!
//! 实现宿主要求的 `ts3plugin_*` 导出函数。宿主的调用顺序为：
//!
//! ```text
//! ts3plugin_setFunctionPointers -> ts3plugin_init -> ... -> ts3plugin_shutdown
//! ```
//!
//! [`Plugin`] 保存初始化到关闭之间的运行时状态，
//! 不依赖真实宿主，可以直接在测试中使用

use std::ffi::{c_char, c_int, CStr};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{ConfigManager, GlobalConfig, PluginConfig, DEFAULT_LOG_FILTER};
use crate::gkey::{self, DeviceEventSource, KeyEvent};
use crate::host::{FfiHost, Host, HostFunctions, LogSink};
use crate::hotkey::KeyEventDispatcher;
use crate::ptt::PttAdapter;
use crate::utils::logging;
use crate::utils::{PluginError, PluginResult};

/// 插件 API 版本，必须与客户端的 API 主版本一致
pub const PLUGIN_API_VERSION: c_int = 20;

pub const PLUGIN_NAME: &CStr = c"TSG - Logitech G-Key Teamspeak plugin";
pub const PLUGIN_VERSION: &CStr = c"0.1";
pub const PLUGIN_AUTHOR: &CStr = c"Marco Casella";
pub const PLUGIN_DESCRIPTION: &CStr = c"This plugin allow to use logitech g-key with teamspeak 3.";

/// 插件运行时
///
/// 创建时向设备事件源注册按键回调，销毁时注销
pub struct Plugin<H> {
    dispatcher: Arc<KeyEventDispatcher<H>>,
    config: Arc<GlobalConfig>,
    source: Box<dyn DeviceEventSource>,
}

impl<H: Host + 'static> Plugin<H> {
    /// 启动插件
    pub fn start(
        host: Arc<H>,
        config: PluginConfig,
        source: Box<dyn DeviceEventSource>,
    ) -> PluginResult<Self> {
        let ptt_key = config.hotkeys.ptt_key_index;
        let config = Arc::new(GlobalConfig::new(config));
        let adapter = Arc::new(PttAdapter::new(host));
        let dispatcher = Arc::new(KeyEventDispatcher::new(adapter, Arc::clone(&config)));

        let handler = Arc::clone(&dispatcher);
        source.register(Box::new(move |event: KeyEvent| {
            handler.dispatch(event);
        }))?;

        tracing::info!(ptt_key, "Plugin started");
        Ok(Self {
            dispatcher,
            config,
            source,
        })
    }

    /// 按键事件分发器
    pub fn dispatcher(&self) -> &Arc<KeyEventDispatcher<H>> {
        &self.dispatcher
    }

    /// 运行时配置
    pub fn config(&self) -> &Arc<GlobalConfig> {
        &self.config
    }
}

impl<H> Drop for Plugin<H> {
    fn drop(&mut self) {
        self.source.unregister();
        tracing::info!("Plugin stopped");
    }
}

static HOST_FUNCTIONS: Mutex<Option<HostFunctions>> = parking_lot::const_mutex(None);
static RUNTIME: Mutex<Option<Plugin<FfiHost>>> = parking_lot::const_mutex(None);

fn load_config(host: &FfiHost) -> PluginResult<PluginConfig> {
    let config_dir = host.config_path()?;
    Ok(ConfigManager::load(&ConfigManager::config_path(&config_dir))?)
}

fn init_plugin(source: Box<dyn DeviceEventSource>) -> PluginResult<()> {
    let functions = HOST_FUNCTIONS
        .lock()
        .as_ref()
        .copied()
        .ok_or(PluginError::FunctionsNotSet)?;

    let mut runtime = RUNTIME.lock();
    if runtime.is_some() {
        return Err(PluginError::AlreadyInitialized);
    }

    let host = Arc::new(FfiHost::new(functions));
    logging::set_host_sink(Some(Arc::clone(&host) as Arc<dyn LogSink>));
    logging::init_logging(DEFAULT_LOG_FILTER);

    let config = load_config(&host).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        PluginConfig::default()
    });
    logging::set_log_filter(&config.logging.filter);

    *runtime = Some(Plugin::start(host, config, source)?);
    Ok(())
}

/// 插件名称
#[unsafe(no_mangle)]
pub extern "C" fn ts3plugin_name() -> *const c_char {
    PLUGIN_NAME.as_ptr()
}

/// 插件版本
#[unsafe(no_mangle)]
pub extern "C" fn ts3plugin_version() -> *const c_char {
    PLUGIN_VERSION.as_ptr()
}

/// 插件 API 版本
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "C" fn ts3plugin_apiVersion() -> c_int {
    PLUGIN_API_VERSION
}

/// 插件作者
#[unsafe(no_mangle)]
pub extern "C" fn ts3plugin_author() -> *const c_char {
    PLUGIN_AUTHOR.as_ptr()
}

/// 插件描述
#[unsafe(no_mangle)]
pub extern "C" fn ts3plugin_description() -> *const c_char {
    PLUGIN_DESCRIPTION.as_ptr()
}

/// 保存宿主函数表，必须在其他宿主相关调用之前
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "C" fn ts3plugin_setFunctionPointers(functions: HostFunctions) {
    *HOST_FUNCTIONS.lock() = Some(functions);
}

/// 初始化插件，返回 0 表示成功
#[unsafe(no_mangle)]
pub extern "C" fn ts3plugin_init() -> c_int {
    match init_plugin(gkey::default_event_source()) {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize plugin");
            1
        }
    }
}

/// 关闭插件并注销 G-key 回调
#[unsafe(no_mangle)]
pub extern "C" fn ts3plugin_shutdown() {
    let runtime = RUNTIME.lock().take();
    drop(runtime);
    logging::set_host_sink(None);
}

//! 按键分发与插件运行时集成测试

mod common;

use std::sync::Arc;

use common::{Call, Fail, MockEventSource, MockHost};
use tsg_lib::config::{GlobalConfig, PluginConfig};
use tsg_lib::gkey::{GkeyError, KeyEvent};
use tsg_lib::hotkey::{DispatchResult, HotkeyConfig, KeyEventDispatcher};
use tsg_lib::host::{INPUT_ACTIVE, INPUT_DEACTIVATED};
use tsg_lib::plugin::Plugin;
use tsg_lib::ptt::{ApplyOutcome, PttAdapter};
use tsg_lib::utils::PluginError;

fn dispatcher(host: MockHost, hotkeys: HotkeyConfig) -> (Arc<MockHost>, KeyEventDispatcher<MockHost>) {
    let host = Arc::new(host);
    let config = PluginConfig {
        hotkeys,
        ..Default::default()
    };
    let adapter = Arc::new(PttAdapter::new(Arc::clone(&host)));
    let dispatcher = KeyEventDispatcher::new(adapter, Arc::new(GlobalConfig::new(config)));
    (host, dispatcher)
}

// ============================================================================
// KeyEventDispatcher 测试
// ============================================================================

#[test]
fn test_key_down_and_up_toggle_ptt() {
    let (host, dispatcher) = dispatcher(MockHost::vad_user(), HotkeyConfig::default());

    let result = dispatcher.dispatch(KeyEvent::key(1, true));
    assert_eq!(result, DispatchResult::Toggled(ApplyOutcome::Applied));
    assert_eq!(host.vad(), "false");
    assert!(dispatcher.adapter().state().is_engaged());

    let result = dispatcher.dispatch(KeyEvent::key(1, false));
    assert_eq!(result, DispatchResult::Toggled(ApplyOutcome::Applied));
    assert_eq!(host.vad(), "true");
    assert!(!dispatcher.adapter().state().is_engaged());
}

#[test]
fn test_mouse_events_ignored() {
    let (host, dispatcher) = dispatcher(MockHost::vad_user(), HotkeyConfig::default());

    assert_eq!(
        dispatcher.dispatch(KeyEvent::mouse(1, true)),
        DispatchResult::Ignored
    );
    assert!(host.calls().is_empty());
}

#[test]
fn test_other_keys_ignored() {
    let (host, dispatcher) = dispatcher(MockHost::vad_user(), HotkeyConfig::new(3));

    assert_eq!(
        dispatcher.dispatch(KeyEvent::key(1, true)),
        DispatchResult::Ignored
    );
    assert_eq!(
        dispatcher.dispatch(KeyEvent::key(3, true)),
        DispatchResult::Toggled(ApplyOutcome::Applied)
    );
    assert_eq!(host.count(&Call::ListSessions), 1);
}

#[test]
fn test_m_state_filter() {
    let hotkeys = HotkeyConfig::default().with_m_state(2);
    let (_host, dispatcher) = dispatcher(MockHost::vad_user(), hotkeys);

    assert_eq!(
        dispatcher.dispatch(KeyEvent::key(1, true).with_m_state(1)),
        DispatchResult::Ignored
    );
    assert!(matches!(
        dispatcher.dispatch(KeyEvent::key(1, true).with_m_state(2)),
        DispatchResult::Toggled(_)
    ));
}

#[test]
fn test_no_active_session_drops_event() {
    let host = MockHost::vad_user();
    host.set_input_hardware(1, Ok(0));
    let (host, dispatcher) = dispatcher(host, HotkeyConfig::default());

    assert_eq!(
        dispatcher.dispatch(KeyEvent::key(1, true)),
        DispatchResult::NoActiveSession
    );
    assert_eq!(host.count(&Call::GetVad), 0);
    assert!(!dispatcher.adapter().state().is_engaged());
}

#[test]
fn test_failure_is_reported_and_next_event_recovers() {
    let (host, dispatcher) = dispatcher(
        MockHost::new(true, 1, INPUT_DEACTIVATED),
        HotkeyConfig::default(),
    );
    host.fail(Fail::Flush);

    let result = dispatcher.dispatch(KeyEvent::key(1, true));
    assert!(matches!(
        result,
        DispatchResult::Toggled(ApplyOutcome::PartiallyApplied { .. })
    ));

    host.recover(Fail::Flush);
    let result = dispatcher.dispatch(KeyEvent::key(1, true));
    assert_eq!(result, DispatchResult::Toggled(ApplyOutcome::Applied));
    assert_eq!(host.input_deactivated(), INPUT_ACTIVE);
}

// ============================================================================
// Plugin 运行时测试
// ============================================================================

#[test]
fn test_plugin_registers_and_handles_device_events() {
    let host = Arc::new(MockHost::vad_user());
    let source = MockEventSource::new();

    let plugin = Plugin::start(
        Arc::clone(&host),
        PluginConfig::default(),
        Box::new(source.clone()),
    )
    .unwrap();
    assert!(source.is_registered());

    source.press(KeyEvent::from_raw(0x0301));
    assert_eq!(host.vad(), "false");
    assert!(plugin.dispatcher().adapter().state().is_engaged());

    source.press(KeyEvent::from_raw(0x0201));
    assert_eq!(host.vad(), "true");
    assert!(!plugin.dispatcher().adapter().state().is_engaged());

    drop(plugin);
    assert!(!source.is_registered());
}

#[test]
fn test_plugin_hotkey_update_applies_live() {
    let host = Arc::new(MockHost::vad_user());
    let source = MockEventSource::new();
    let plugin = Plugin::start(
        Arc::clone(&host),
        PluginConfig::default(),
        Box::new(source.clone()),
    )
    .unwrap();

    plugin.config().set_hotkeys(HotkeyConfig::new(5));
    source.press(KeyEvent::key(1, true));
    assert!(host.calls().is_empty());

    source.press(KeyEvent::key(5, true));
    assert!(plugin.dispatcher().adapter().state().is_engaged());
}

#[test]
fn test_plugin_start_fails_when_sdk_fails() {
    let host = Arc::new(MockHost::vad_user());
    let result = Plugin::start(
        host,
        PluginConfig::default(),
        Box::new(MockEventSource::failing()),
    );

    assert!(matches!(
        result,
        Err(PluginError::Gkey(GkeyError::InitFailed))
    ));
}

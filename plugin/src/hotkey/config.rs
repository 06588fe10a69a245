//! 热键配置

use serde::{Deserialize, Serialize};

use crate::gkey::KeyEvent;

/// 默认的 PTT 按键（G1）
pub const DEFAULT_PTT_KEY_INDEX: u8 = 1;

/// 热键配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// PTT 按键序号（G1 = 1）
    pub ptt_key_index: u8,
    /// 只在指定的 M 键状态下响应，`None` 表示任意状态
    pub m_state: Option<u8>,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            ptt_key_index: DEFAULT_PTT_KEY_INDEX,
            m_state: None,
        }
    }
}

impl HotkeyConfig {
    /// 创建新的热键配置
    pub fn new(ptt_key_index: u8) -> Self {
        Self {
            ptt_key_index,
            m_state: None,
        }
    }

    /// 设置 PTT 按键
    pub fn with_ptt_key_index(mut self, ptt_key_index: u8) -> Self {
        self.ptt_key_index = ptt_key_index;
        self
    }

    /// 限定 M 键状态
    pub fn with_m_state(mut self, m_state: u8) -> Self {
        self.m_state = Some(m_state);
        self
    }

    /// 检查事件是否为 PTT 按键
    pub fn is_push_to_talk(&self, event: &KeyEvent) -> bool {
        if event.is_mouse || event.key_index != self.ptt_key_index {
            return false;
        }
        self.m_state.is_none_or(|m_state| m_state == event.m_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_g1_any_m_state() {
        let config = HotkeyConfig::default();
        assert_eq!(config.ptt_key_index, 1);
        assert!(config.m_state.is_none());
        assert!(config.is_push_to_talk(&KeyEvent::key(1, true).with_m_state(3)));
    }

    #[test]
    fn test_other_keys_and_mouse_ignored() {
        let config = HotkeyConfig::new(4);
        assert!(config.is_push_to_talk(&KeyEvent::key(4, false)));
        assert!(!config.is_push_to_talk(&KeyEvent::key(1, true)));
        assert!(!config.is_push_to_talk(&KeyEvent::mouse(4, true)));
    }

    #[test]
    fn test_m_state_filter() {
        let config = HotkeyConfig::default().with_ptt_key_index(2).with_m_state(2);
        assert!(config.is_push_to_talk(&KeyEvent::key(2, true).with_m_state(2)));
        assert!(!config.is_push_to_talk(&KeyEvent::key(2, true).with_m_state(1)));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: HotkeyConfig = serde_json::from_str(r#"{"ptt_key_index": 6}"#).unwrap();
        assert_eq!(config, HotkeyConfig::new(6));
    }
}

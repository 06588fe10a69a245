//! G-key 按键事件

const KEY_INDEX_MASK: u32 = 0xFF;
const KEY_DOWN_BIT: u32 = 1 << 8;
const M_STATE_SHIFT: u32 = 9;
const M_STATE_MASK: u32 = 0b11;
const MOUSE_BIT: u32 = 1 << 11;

/// G-key 按键事件
///
/// SDK 以 32 位打包值传递事件：
///
/// ```text
/// bits 0..8   按键序号（G1 = 1）
/// bit  8      是否按下
/// bits 9..11  M 键状态（M1 = 1）
/// bit  11     是否为鼠标按键
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key_index: u8,
    pub key_down: bool,
    pub m_state: u8,
    pub is_mouse: bool,
}

impl KeyEvent {
    /// 键盘 G 键事件
    pub fn key(key_index: u8, key_down: bool) -> Self {
        Self {
            key_index,
            key_down,
            m_state: 1,
            is_mouse: false,
        }
    }

    /// 鼠标按键事件
    pub fn mouse(button: u8, key_down: bool) -> Self {
        Self {
            key_index: button,
            key_down,
            m_state: 0,
            is_mouse: true,
        }
    }

    /// 指定 M 键状态
    pub fn with_m_state(mut self, m_state: u8) -> Self {
        self.m_state = m_state;
        self
    }

    /// 从 SDK 的打包值解码
    pub fn from_raw(raw: u32) -> Self {
        Self {
            key_index: (raw & KEY_INDEX_MASK) as u8,
            key_down: raw & KEY_DOWN_BIT != 0,
            m_state: ((raw >> M_STATE_SHIFT) & M_STATE_MASK) as u8,
            is_mouse: raw & MOUSE_BIT != 0,
        }
    }

    /// 编码为 SDK 的打包值
    pub fn to_raw(&self) -> u32 {
        let mut raw = u32::from(self.key_index);
        if self.key_down {
            raw |= KEY_DOWN_BIT;
        }
        raw |= (u32::from(self.m_state) & M_STATE_MASK) << M_STATE_SHIFT;
        if self.is_mouse {
            raw |= MOUSE_BIT;
        }
        raw
    }
}

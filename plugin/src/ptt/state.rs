//! PTT 状态

/// PTT 适配器状态
///
/// `vad_active` 与 `input_active` 是 PTT 从空闲进入激活时的快照，
/// 只在 `ptt_active` 为 false 时才会被覆盖
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PttState {
    ptt_active: bool,
    vad_active: bool,
    input_active: bool,
}

/// 一次切换需要写入会话的目标设置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PttTarget {
    /// VAD 是否启用
    pub vad_enabled: bool,
    /// 输入是否启用
    pub input_active: bool,
}

impl PttState {
    /// 创建空闲状态
    pub fn new() -> Self {
        Self::default()
    }

    /// PTT 是否处于激活状态
    pub fn is_engaged(&self) -> bool {
        self.ptt_active
    }

    /// 快照中的 VAD 设置
    pub fn vad_active(&self) -> bool {
        self.vad_active
    }

    /// 快照中的输入硬件启用设置
    pub fn input_active(&self) -> bool {
        self.input_active
    }

    /// 是否需要在本次切换前重新读取会话设置
    pub fn needs_snapshot(&self) -> bool {
        !self.ptt_active
    }

    /// 记录会话的当前设置
    pub fn capture(&mut self, vad_active: bool, input_active: bool) {
        self.vad_active = vad_active;
        self.input_active = input_active;
    }

    /// 根据快照计算目标设置
    ///
    /// 只有用户原本依赖 VAD 且输入硬件已启用时，按下 PTT 才会关闭 VAD；
    /// 原本启用的输入不会被停用
    pub fn target(&self, should_talk: bool) -> PttTarget {
        let vad_enabled = if should_talk && self.vad_active && self.input_active {
            false
        } else {
            self.vad_active
        };

        PttTarget {
            vad_enabled,
            input_active: should_talk || self.input_active,
        }
    }

    /// 切换成功后记录 PTT 是否激活
    pub fn commit(&mut self, should_talk: bool) {
        self.ptt_active = should_talk;
    }
}

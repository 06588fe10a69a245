//! PTT 切换结果

use crate::host::HostError;

/// 切换流程中的单个宿主调用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStep {
    /// 读取 VAD 设置
    ReadVad,
    /// 读取输入硬件启用状态
    ReadInput,
    /// 写入 VAD 设置
    WriteVad,
    /// 写入输入停用状态
    WriteInput,
    /// 提交自身变量修改
    Flush,
}

impl ApplyStep {
    /// 步骤名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReadVad => "read_vad",
            Self::ReadInput => "read_input",
            Self::WriteVad => "write_vad",
            Self::WriteInput => "write_input",
            Self::Flush => "flush",
        }
    }

    /// 是否会修改宿主状态
    pub fn is_write(&self) -> bool {
        matches!(self, Self::WriteVad | Self::WriteInput | Self::Flush)
    }
}

impl std::fmt::Display for ApplyStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 单次 PTT 切换的结果
///
/// 失败时不会回滚已经写入的设置，`PartiallyApplied` 列出已完成的写入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// 所有设置已写入并提交
    Applied,

    /// 未修改任何会话设置
    NotApplied { failed_step: ApplyStep, error: HostError },

    /// 部分设置已写入
    PartiallyApplied {
        completed: Vec<ApplyStep>,
        failed_step: ApplyStep,
        error: HostError,
    },
}

impl ApplyOutcome {
    /// 根据已完成的写入步骤构造失败结果
    pub(crate) fn failed(completed: Vec<ApplyStep>, failed_step: ApplyStep, error: HostError) -> Self {
        if completed.is_empty() {
            Self::NotApplied { failed_step, error }
        } else {
            Self::PartiallyApplied {
                completed,
                failed_step,
                error,
            }
        }
    }

    /// 是否全部成功
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// 会话设置是否可能与 PTT 状态不一致
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::PartiallyApplied { .. })
    }

    /// 失败的步骤（如果有）
    pub fn failed_step(&self) -> Option<ApplyStep> {
        match self {
            Self::Applied => None,
            Self::NotApplied { failed_step, .. } | Self::PartiallyApplied { failed_step, .. } => {
                Some(*failed_step)
            }
        }
    }

    /// 导致失败的宿主错误（如果有）
    pub fn error(&self) -> Option<&HostError> {
        match self {
            Self::Applied => None,
            Self::NotApplied { error, .. } | Self::PartiallyApplied { error, .. } => Some(error),
        }
    }
}

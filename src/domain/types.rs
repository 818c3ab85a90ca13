// ==========================================
// 航空货运网络配载优化系统 - 领域类型定义
// ==========================================
// 依据: Cargo_Network_Master_Spec.md - PART C1 路径与标签体系
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 路径类型 (Path Kind)
// ==========================================
// 直达 = 单航段 (OD 码即航段码), 中转 = 两航段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathKind {
    Direct,   // 直达市场
    Indirect, // 中转市场
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::Direct => write!(f, "DIRECT"),
            PathKind::Indirect => write!(f, "INDIRECT"),
        }
    }
}

// ==========================================
// 填充优先级标签 (Priority Type)
// ==========================================
// 红线: 所有配载结果必须可解释
// 标签由两个布尔量交叉得出: 是否最高 CM × 是否直达
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityType {
    OnlyOd,            // 航段上唯一贡献市场
    HighestCmDirect,   // 最高 CM + 直达
    HighestCmIndirect, // 最高 CM + 中转
    DirectLowerCm,     // 直达 + 非最高 CM
    IndirectLowerCm,   // 中转 + 非最高 CM
}

impl PriorityType {
    /// 报表展示用标签（交给报表协作方的文字形式）
    pub fn label(&self) -> &'static str {
        match self {
            PriorityType::OnlyOd => "Only OD",
            PriorityType::HighestCmDirect => "Highest CM - Direct",
            PriorityType::HighestCmIndirect => "Highest CM - Indirect",
            PriorityType::DirectLowerCm => "Direct - Lower CM",
            PriorityType::IndirectLowerCm => "Indirect - Lower CM",
        }
    }
}

impl fmt::Display for PriorityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

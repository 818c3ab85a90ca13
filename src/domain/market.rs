// ==========================================
// 航空货运网络配载优化系统 - 市场摄取记录与诊断模型
// ==========================================
// 依据: Cargo_Network_Master_Spec.md - PART C2 输入记录
// ==========================================
// 职责: 承载摄取协作方交付的已类型化记录 + 校验诊断
// 红线: 单行故障隔离,坏行不得阻断整批优化
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// RawDirectRecord - 直达市场原始记录
// ==========================================
// 来源: 摄取协作方（已类型化,未校验）
// 缺失字段以 None 表达,由校验器决定弃用或取零
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDirectRecord {
    pub row_number: usize,              // 源数据行号（诊断定位用）
    pub od_code: Option<String>,        // O-D 市场码（亦即自身航段码）
    pub cm_per_t: Option<f64>,          // 每吨边际贡献
    pub market_share_t: Option<f64>,    // 市场份额上限 (吨)
    pub own_capacity_t: Option<f64>,    // 自营航段舱位 (吨)
}

// ==========================================
// RawIndirectRecord - 中转市场原始记录
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIndirectRecord {
    pub row_number: usize,                 // 源数据行号
    pub od_code: Option<String>,           // O-D 市场码
    pub cm_per_t: Option<f64>,             // 每吨边际贡献
    pub market_share_t: Option<f64>,       // 市场份额上限 (吨)
    pub first_leg_code: Option<String>,    // 第一航段码
    pub first_leg_capacity_t: Option<f64>, // 第一航段舱位声明 (吨)
    pub second_leg_code: Option<String>,   // 第二航段码
    pub second_leg_capacity_t: Option<f64>, // 第二航段舱位声明 (吨)
}

// ==========================================
// ValidatedDirectRecord - 已校验直达记录
// ==========================================
// 必填字段已确认存在,缺省数值字段已取零
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatedDirectRecord {
    pub row_number: usize,
    pub od_code: String,
    pub cm_per_t: f64,
    pub market_share_t: f64,
    pub own_capacity_t: f64,
}

// ==========================================
// ValidatedIndirectRecord - 已校验中转记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatedIndirectRecord {
    pub row_number: usize,
    pub od_code: String,
    pub cm_per_t: f64,
    pub market_share_t: f64,
    pub first_leg_code: String,
    pub first_leg_capacity_t: f64,
    pub second_leg_code: String,
    pub second_leg_capacity_t: f64,
}

// ==========================================
// 摄取诊断等级 (Ingest Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngestLevel {
    Error,    // 必填字段缺失,整行弃用
    Conflict, // 重复 O-D（同批次内,后者覆盖前者）
    Warning,  // 可疑取值（负舱位等）,保留但标记
    Info,     // 提示信息
}

impl fmt::Display for IngestLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestLevel::Error => write!(f, "ERROR"),
            IngestLevel::Conflict => write!(f, "CONFLICT"),
            IngestLevel::Warning => write!(f, "WARNING"),
            IngestLevel::Info => write!(f, "INFO"),
        }
    }
}

// ==========================================
// IngestViolation - 单条诊断
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestViolation {
    pub row_number: usize,
    pub od_code: Option<String>,
    pub level: IngestLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// IngestSummary - 批次摘要
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestSummary {
    pub total_rows: usize, // 输入总行数（直达 + 中转）
    pub accepted: usize,   // 通过校验进入模型的行数
    pub discarded: usize,  // 弃用行数（Error 级别）
    pub warning: usize,    // Warning 级诊断条数
    pub conflict: usize,   // Conflict 级诊断条数
}

// ==========================================
// IngestReport - 摄取诊断报告
// ==========================================
// 宽松但可追责: 坏行不阻断运行,但每次弃用/冲突都留痕,
// 由调用方决定是否上报
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestReport {
    pub summary: IngestSummary,
    pub violations: Vec<IngestViolation>,
}

impl IngestReport {
    /// 是否存在 Error 级诊断（即有整行被弃用）
    pub fn has_discards(&self) -> bool {
        self.summary.discarded > 0
    }
}

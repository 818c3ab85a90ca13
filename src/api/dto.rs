// ==========================================
// 航空货运网络配载优化系统 - API DTO 定义
// ==========================================
// 依据: Network_Report_Contract_v1.0.md
// 职责: 定义交给报表/UI 协作方的响应结构
// ==========================================

use crate::domain::allocation::{LegContribution, LegTonnageSummary, OdAllocation};
use crate::domain::market::IngestReport;
use serde::{Deserialize, Serialize};

// ==========================================
// OD 配载摘要
// ==========================================

/// 单 OD 配载行（仅正吨位市场进入摘要）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OdAllocationDto {
    /// O-D 市场码
    pub od_code: String,

    /// 配载吨位（报表口径,保留 2 位）
    pub tonnage_t: f64,

    /// 每吨边际贡献
    pub cm_per_t: f64,

    /// 贡献利润（报表口径,保留 2 位）
    pub profit: f64,
}

impl From<&OdAllocation> for OdAllocationDto {
    fn from(allocation: &OdAllocation) -> Self {
        Self {
            od_code: allocation.od_code.clone(),
            tonnage_t: round2(allocation.tonnage_t),
            cm_per_t: allocation.cm_per_t,
            profit: round2(allocation.profit),
        }
    }
}

// ==========================================
// 航段贡献明细
// ==========================================

/// 航段贡献行（带解释标签与填充名次）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegContributionDto {
    /// 航段码
    pub leg_code: String,

    /// 贡献市场 O-D 码
    pub od_code: String,

    /// 每吨边际贡献
    pub cm_per_t: f64,

    /// 配载吨位
    pub tonnage_t: f64,

    /// 航段上的利润贡献
    pub profit: f64,

    /// 解释标签（"Only OD" / "Highest CM - Direct" / ...）
    pub priority_type: String,

    /// 填充名次（1 = 最优先,航段内连续且唯一）
    pub fill_priority_rank: u32,
}

impl From<&LegContribution> for LegContributionDto {
    fn from(record: &LegContribution) -> Self {
        Self {
            leg_code: record.leg_code.clone(),
            od_code: record.od_code.clone(),
            cm_per_t: record.cm_per_t,
            tonnage_t: round2(record.tonnage_t),
            profit: round2(record.profit),
            priority_type: record.priority_type.label().to_string(),
            fill_priority_rank: record.fill_priority_rank,
        }
    }
}

// ==========================================
// 航段吨位汇总
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegTonnageDto {
    /// 航段码
    pub leg_code: String,

    /// 航段吨位合计
    pub total_tonnage_t: f64,
}

impl From<&LegTonnageSummary> for LegTonnageDto {
    fn from(summary: &LegTonnageSummary) -> Self {
        Self {
            leg_code: summary.leg_code.clone(),
            total_tonnage_t: round2(summary.total_tonnage_t),
        }
    }
}

// ==========================================
// AllocationRunResponse - 一次配载运行的完整响应
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRunResponse {
    /// 运行标识 (UUID v4)
    pub run_id: String,

    /// 计算时间戳 (ISO 8601 / RFC 3339, UTC)
    pub as_of: String,

    /// OD 配载摘要（仅正吨位）
    pub od_allocations: Vec<OdAllocationDto>,

    /// 航段贡献明细（带标签与名次）
    pub leg_contributions: Vec<LegContributionDto>,

    /// 航段吨位汇总
    pub leg_totals: Vec<LegTonnageDto>,

    /// 全网总利润（LP 目标值,报表口径保留 2 位）
    pub total_profit: f64,

    /// 摄取诊断报告（弃用/冲突/可疑值留痕,由调用方决定是否上报）
    pub ingest: IngestReport,
}

// ==========================================
// 辅助函数
// ==========================================

/// 报表口径取整: 保留 2 位小数
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ==========================================
// 航空货运网络配载优化系统 - 配载决策领域模型
// ==========================================
// 依据: Cargo_Network_Master_Spec.md - PART C4 决策与解释输出
// ==========================================
// 红线: 决策与解释只读,产出后不可再修改
// ==========================================

use crate::domain::types::PriorityType;
use serde::{Deserialize, Serialize};

// ==========================================
// OdAllocation - 单 OD 配载量
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OdAllocation {
    pub od_code: String, // O-D 市场码
    pub tonnage_t: f64,  // 配载吨位 (≥ 0)
    pub cm_per_t: f64,   // 每吨边际贡献
    pub profit: f64,     // 贡献利润 = tonnage_t × cm_per_t
}

// ==========================================
// AllocationDecision - 全网配载决策
// ==========================================
// 求解器一次产出; 每条注册路径各有一条记录（含零吨位）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocationDecision {
    pub allocations: Vec<OdAllocation>, // 与注册表同序
    pub total_profit: f64,              // LP 目标值 = Σ tonnage × cm
}

impl AllocationDecision {
    /// 按 OD 码查配载吨位
    pub fn tonnage_of(&self, od_code: &str) -> Option<f64> {
        self.allocations
            .iter()
            .find(|a| a.od_code == od_code)
            .map(|a| a.tonnage_t)
    }
}

// ==========================================
// LegContribution - 航段贡献记录
// ==========================================
// 一条 = 一个 (航段, 正吨位 OD) 对,带解释标签与填充名次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegContribution {
    pub leg_code: String,            // 航段码
    pub od_code: String,             // 贡献市场 O-D 码
    pub cm_per_t: f64,               // 该市场每吨边际贡献
    pub tonnage_t: f64,              // 配载吨位
    pub profit: f64,                 // 航段上的利润贡献
    pub priority_type: PriorityType, // 解释标签
    pub fill_priority_rank: u32,     // 填充名次（1 = 最优先,航段内连续且唯一）
}

// ==========================================
// LegTonnageSummary - 航段吨位汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegTonnageSummary {
    pub leg_code: String,
    pub total_tonnage_t: f64, // 该航段全部贡献市场的吨位合计
}

// ==========================================
// LegBreakdown - 优先级分类器输出
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegBreakdown {
    pub contributions: Vec<LegContribution>, // 航段按注册顺序,段内按名次
    pub leg_totals: Vec<LegTonnageSummary>,  // 航段吨位汇总
}

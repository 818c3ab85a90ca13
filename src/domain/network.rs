// ==========================================
// 航空货运网络配载优化系统 - 网络领域模型
// ==========================================
// 依据: Cargo_Network_Master_Spec.md - PART C3 路径注册表与航段舱位
// ==========================================
// 红线: 航段舱位取所有声明的最小值（最紧约束生效）
// ==========================================

use crate::domain::types::PathKind;
use serde::{Deserialize, Serialize};

// ==========================================
// OdPath - OD 市场路径
// ==========================================
// 直达: legs 恰含一个元素且等于 od_code
// 中转: legs 含两个航段码（航段须存在于舱位表,不要求自身是 OD 市场）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OdPath {
    pub od_code: String,   // O-D 市场码
    pub cm_per_t: f64,     // 每吨边际贡献（可为负）
    pub legs: Vec<String>, // 途经航段序列（1 或 2 个）
    pub ceiling_t: f64,    // 市场配载上限 (吨)
}

impl OdPath {
    /// 路径类型（按航段数判定）
    pub fn kind(&self) -> PathKind {
        if self.legs.len() == 1 {
            PathKind::Direct
        } else {
            PathKind::Indirect
        }
    }

    /// 是否直达市场
    pub fn is_direct(&self) -> bool {
        self.legs.len() == 1
    }

    /// 是否途经指定航段
    ///
    /// 按成员判定: 同一航段在 legs 中重复出现只计一次
    pub fn traverses(&self, leg_code: &str) -> bool {
        self.legs.iter().any(|leg| leg == leg_code)
    }
}

// ==========================================
// FlightLegCapacity - 航段舱位
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightLegCapacity {
    pub leg_code: String, // 航段码（与直达 OD 码同命名空间）
    pub capacity_t: f64,  // 可用舱位 (吨) = 所有声明的最小值
}

// ==========================================
// NetworkModel - 网络模型（路径注册表 + 航段舱位表）
// ==========================================
// 构建一次,求解前不可变
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkModel {
    pub paths: Vec<OdPath>,           // 注册表,保留首次登记顺序
    pub legs: Vec<FlightLegCapacity>, // 舱位表,保留首次声明顺序
}

impl NetworkModel {
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// 按 OD 码查路径
    pub fn path(&self, od_code: &str) -> Option<&OdPath> {
        self.paths.iter().find(|p| p.od_code == od_code)
    }

    /// 按航段码查舱位
    pub fn leg(&self, leg_code: &str) -> Option<&FlightLegCapacity> {
        self.legs.iter().find(|l| l.leg_code == leg_code)
    }
}

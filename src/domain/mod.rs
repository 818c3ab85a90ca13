// ==========================================
// 航空货运网络配载优化系统 - 领域模型层
// ==========================================
// 依据: Cargo_Network_Master_Spec.md - PART C 数据模型
// ==========================================
// 职责: 定义领域实体、类型、摄取记录
// 红线: 不含求解逻辑,不含 I/O
// ==========================================

pub mod allocation;
pub mod market;
pub mod network;
pub mod types;

// 重导出核心类型
pub use allocation::{
    AllocationDecision, LegBreakdown, LegContribution, LegTonnageSummary, OdAllocation,
};
pub use market::{
    IngestLevel, IngestReport, IngestSummary, IngestViolation, RawDirectRecord,
    RawIndirectRecord, ValidatedDirectRecord, ValidatedIndirectRecord,
};
pub use network::{FlightLegCapacity, NetworkModel, OdPath};
pub use types::{PathKind, PriorityType};

// ==========================================
// 航空货运网络配载优化系统 - 核心库
// ==========================================
// 依据: Cargo_Network_Master_Spec.md - 系统宪法
// 技术栈: Rust (纯内存批计算)
// 系统定位: 决策支持系统 (配载解释权交给人工评审)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 摄取层 - 记录校验与诊断
pub mod ingest;

// 引擎层 - 建模/求解/优先级解释
pub mod engine;

// API 层 - 业务接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{PathKind, PriorityType};

// 领域实体
pub use domain::{
    AllocationDecision, FlightLegCapacity, IngestLevel, IngestReport, IngestSummary,
    IngestViolation, LegBreakdown, LegContribution, LegTonnageSummary, NetworkModel,
    OdAllocation, OdPath, RawDirectRecord, RawIndirectRecord, ValidatedDirectRecord,
    ValidatedIndirectRecord,
};

// 摄取
pub use ingest::RecordValidator;

// 引擎
pub use engine::{
    AllocationSolver, NetworkModelBuilder, PriorityClassifier, SolveError, SolveResult,
};

// API
pub use api::{AllocationApi, AllocationRunResponse, ApiError, ApiResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "航空货运网络配载优化系统";

// ==========================================
// 预编译检查
// ==========================================

// ==========================================
// 航空货运网络配载优化系统 - 引擎层
// ==========================================
// 依据: Cargo_Network_Master_Spec.md - PART D 引擎体系
// ==========================================
// 职责: 建模 → 求解 → 优先级解释,三段式批计算
// 红线: 求解必须全局最优; 所有配载结果必须输出可解释标签
// ==========================================

pub mod error;
pub mod model_builder;
pub mod priority;
pub mod simplex;
pub mod solver;

// 重导出核心引擎
pub use error::{SolveError, SolveResult};
pub use model_builder::NetworkModelBuilder;
pub use priority::PriorityClassifier;
pub use simplex::{LpConstraint, LpModel, LpSolution, LpStatus, SimplexConfig};
pub use solver::AllocationSolver;

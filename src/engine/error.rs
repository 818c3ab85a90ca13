// ==========================================
// 航空货运网络配载优化系统 - 引擎层错误类型
// ==========================================
// 依据: Rust 错误处理最佳实践
// 工具: thiserror 派生宏
// ==========================================
// 红线: 求解阶段大声失败,绝不返回部分/垃圾配载
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum SolveError {
    // ===== 模型状态错误 =====
    #[error("模型不可行: {0}")]
    Infeasible(String),

    #[error("目标函数无界（路径上限缺失会导致此错误,正常输入不应出现）")]
    Unbounded,

    // ===== 求解过程错误 =====
    #[error("单纯形迭代次数超限: {max_iterations}")]
    IterationLimit { max_iterations: usize },
}

/// Result 类型别名
pub type SolveResult<T> = Result<T, SolveError>;

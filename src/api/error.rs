// ==========================================
// 航空货运网络配载优化系统 - API层错误类型
// ==========================================
// 职责: 将引擎错误转换为调用方可解释的失败信号
// 红线: 要么完整一致的结果,要么显式失败,绝无混合
// ==========================================

use crate::engine::error::SolveError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 求解失败 =====
    #[error("配载求解失败: {0}")]
    Solve(#[from] SolveError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

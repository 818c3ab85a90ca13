// ==========================================
// 航空货运网络配载优化系统 - 配载求解引擎
// ==========================================
// 依据: Engine_Specs_v1.0.md - 5. Allocation Solver
// 职责: 网络模型 → LP → 全网配载决策
// ==========================================
// 红线: 只接受已证最优; 不可行/无界/超限一律大声失败,
// 绝不返回部分或零配载冒充结果
// ==========================================

use crate::domain::allocation::{AllocationDecision, OdAllocation};
use crate::domain::network::NetworkModel;
use crate::engine::error::{SolveError, SolveResult};
use crate::engine::simplex::{self, LpConstraint, LpModel, LpStatus, SimplexConfig};
use tracing::{debug, info, instrument};

// ==========================================
// AllocationSolver - 配载求解引擎
// ==========================================
pub struct AllocationSolver {
    config: SimplexConfig,
}

impl AllocationSolver {
    /// 构造函数（默认求解配置）
    pub fn new() -> Self {
        Self {
            config: SimplexConfig::default(),
        }
    }

    /// 指定求解配置
    pub fn with_config(config: SimplexConfig) -> Self {
        Self { config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 求解全网配载
    ///
    /// 目标: max Σ tonnage(path) × cm(path)
    /// 约束:
    /// - 每个航段: 途经路径吨位之和 ≤ 航段舱位
    /// - 每条路径: 0 ≤ 吨位 ≤ 市场上限
    ///
    /// # 返回
    /// - `Ok(AllocationDecision)`: 已证最优的完整决策
    /// - `Err(SolveError)`: 不可行（负舱位输入）/ 无界 / 迭代超限
    #[instrument(skip(self, model), fields(path_count = model.path_count(), leg_count = model.leg_count()))]
    pub fn solve(&self, model: &NetworkModel) -> SolveResult<AllocationDecision> {
        // 空模型: 零配载即最优,不算失败
        if model.is_empty() {
            debug!("空模型,返回零配载");
            return Ok(AllocationDecision::default());
        }

        let lp = self.build_lp(model);
        let solution = simplex::solve(&lp, &self.config);

        match solution.status {
            LpStatus::Optimal => {
                let decision = self.extract_decision(model, &solution.variables, solution.objective_value);
                info!(
                    total_profit = decision.total_profit,
                    "配载求解完成（已证最优）"
                );
                Ok(decision)
            }
            LpStatus::Infeasible => Err(SolveError::Infeasible(
                "航段舱位或市场上限存在负值".to_string(),
            )),
            LpStatus::Unbounded => Err(SolveError::Unbounded),
            LpStatus::IterationLimit => Err(SolveError::IterationLimit {
                max_iterations: self.config.max_iterations,
            }),
        }
    }

    // ==========================================
    // LP 构建
    // ==========================================

    /// 从强类型网络模型构建 LP
    ///
    /// 变量下标 = 注册表下标; OD 码全程作为数据携带,
    /// 不经过任何生成的变量名字符串
    fn build_lp(&self, model: &NetworkModel) -> LpModel {
        let n = model.path_count();

        let objective: Vec<f64> = model.paths.iter().map(|p| p.cm_per_t).collect();
        let mut constraints = Vec::with_capacity(model.leg_count() + n);

        // 航段舱位约束: 途经即计入（成员判定,重复航段只计一次）
        for leg in &model.legs {
            let coefficients: Vec<f64> = model
                .paths
                .iter()
                .map(|p| if p.traverses(&leg.leg_code) { 1.0 } else { 0.0 })
                .collect();
            constraints.push(LpConstraint {
                coefficients,
                rhs: leg.capacity_t,
            });
        }

        // 市场上限约束
        for (j, path) in model.paths.iter().enumerate() {
            let mut coefficients = vec![0.0; n];
            coefficients[j] = 1.0;
            constraints.push(LpConstraint {
                coefficients,
                rhs: path.ceiling_t,
            });
        }

        LpModel {
            objective,
            constraints,
        }
    }

    /// 顶点解 → 配载决策（与注册表同序,含零吨位路径）
    fn extract_decision(
        &self,
        model: &NetworkModel,
        variables: &[f64],
        objective_value: f64,
    ) -> AllocationDecision {
        let allocations = model
            .paths
            .iter()
            .zip(variables.iter())
            .map(|(path, &tonnage_t)| OdAllocation {
                od_code: path.od_code.clone(),
                tonnage_t,
                cm_per_t: path.cm_per_t,
                profit: tonnage_t * path.cm_per_t,
            })
            .collect();

        AllocationDecision {
            allocations,
            total_profit: objective_value,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for AllocationSolver {
    fn default() -> Self {
        Self::new()
    }
}

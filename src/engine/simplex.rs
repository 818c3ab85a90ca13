// ==========================================
// 航空货运网络配载优化系统 - 线性规划求解核心
// ==========================================
// 依据: Engine_Specs_v1.0.md - 4. LP Core
// 算法: 稠密单纯形法 (Dantzig 定价, 超限后切换 Bland 规则保证终止)
// ==========================================
// 标准形: max c·x  s.t.  A·x ≤ b, x ≥ 0
// 前置条件: 所有约束系数非负（本系统的约束均为 0/1 系数）。
// 在该前提下 b 出现负分量即为不可行证明,无需第一阶段。
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// LpConstraint - 单条 ≤ 约束
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LpConstraint {
    pub coefficients: Vec<f64>, // 与变量同序, 长度 = 变量数
    pub rhs: f64,               // 右端项
}

// ==========================================
// LpModel - 线性规划模型
// ==========================================
// 变量下标即领域对象下标,不经过任何名字字符串
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LpModel {
    pub objective: Vec<f64>,           // 目标系数 c (最大化)
    pub constraints: Vec<LpConstraint>, // 全部为 ≤ 约束
}

impl LpModel {
    pub fn variable_count(&self) -> usize {
        self.objective.len()
    }
}

// ==========================================
// SimplexConfig - 求解配置
// ==========================================
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimplexConfig {
    pub pivot_tol: f64,        // 主元/判优容差
    pub max_iterations: usize, // 迭代硬上限
    pub bland_after: usize,    // 超过该迭代数后切换 Bland 规则（防循环）
}

impl Default for SimplexConfig {
    fn default() -> Self {
        Self {
            pivot_tol: 1e-9,
            max_iterations: 10_000,
            bland_after: 1_000,
        }
    }
}

// ==========================================
// LpStatus - 求解状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LpStatus {
    Optimal,        // 已证最优顶点
    Infeasible,     // 可行域为空
    Unbounded,      // 目标无上界
    IterationLimit, // 达到迭代硬上限
}

// ==========================================
// LpSolution - 求解结果
// ==========================================
// variables / objective_value 仅在 Optimal 时有意义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LpSolution {
    pub status: LpStatus,
    pub variables: Vec<f64>,
    pub objective_value: f64,
}

impl LpSolution {
    fn non_optimal(status: LpStatus) -> Self {
        Self {
            status,
            variables: Vec::new(),
            objective_value: 0.0,
        }
    }
}

// ==========================================
// 求解入口
// ==========================================

/// 求解 max c·x, s.t. A·x ≤ b, x ≥ 0
///
/// 约束系数必须非负（调用方保证; debug 构建下断言）。
/// 目标值按最优顶点重算 c·x 返回,与逐变量利润严格一致。
pub fn solve(model: &LpModel, config: &SimplexConfig) -> LpSolution {
    let n = model.objective.len();
    let m = model.constraints.len();

    // 空模型: 原点即最优
    if n == 0 {
        return LpSolution {
            status: LpStatus::Optimal,
            variables: Vec::new(),
            objective_value: 0.0,
        };
    }

    for constraint in &model.constraints {
        debug_assert_eq!(constraint.coefficients.len(), n);
        debug_assert!(
            constraint.coefficients.iter().all(|&a| a >= 0.0),
            "约束系数必须非负"
        );
        // 系数非负 + x ≥ 0 ⇒ 左端恒 ≥ 0, 负右端不可满足
        if constraint.rhs < 0.0 {
            return LpSolution::non_optimal(LpStatus::Infeasible);
        }
    }

    // ==========================================
    // 初始化: 松弛基单纯形表
    // ==========================================
    // 行 = 约束, 列 = [结构变量 | 松弛变量 | RHS]
    let cols = n + m + 1;
    let mut tableau: Vec<Vec<f64>> = Vec::with_capacity(m);
    for (i, constraint) in model.constraints.iter().enumerate() {
        let mut row = vec![0.0; cols];
        row[..n].copy_from_slice(&constraint.coefficients);
        row[n + i] = 1.0;
        row[cols - 1] = constraint.rhs;
        tableau.push(row);
    }

    // 目标行: 结构变量取 -c, 松弛变量取 0
    let mut z_row = vec![0.0; cols];
    for (j, &c) in model.objective.iter().enumerate() {
        z_row[j] = -c;
    }

    // 当前基: 全部松弛变量
    let mut basis: Vec<usize> = (n..n + m).collect();

    // ==========================================
    // 主迭代
    // ==========================================
    let mut iterations: usize = 0;
    loop {
        // 入基变量选择
        let entering = if iterations < config.bland_after {
            // Dantzig: 最负既约成本
            let mut best: Option<(usize, f64)> = None;
            for j in 0..n + m {
                if z_row[j] < -config.pivot_tol {
                    match best {
                        Some((_, val)) if z_row[j] >= val => {}
                        _ => best = Some((j, z_row[j])),
                    }
                }
            }
            best.map(|(j, _)| j)
        } else {
            // Bland: 最小下标（保证有限终止）
            (0..n + m).find(|&j| z_row[j] < -config.pivot_tol)
        };

        let entering = match entering {
            Some(j) => j,
            None => break, // 无负既约成本 ⇒ 已最优
        };

        // 出基变量选择: 最小比率; 平局取最小基变量下标（Bland 兼容）
        let mut leaving: Option<usize> = None;
        let mut best_ratio = f64::INFINITY;
        for (i, row) in tableau.iter().enumerate() {
            let a = row[entering];
            if a > config.pivot_tol {
                let ratio = row[cols - 1] / a;
                let take = match leaving {
                    None => true,
                    Some(l) => {
                        ratio < best_ratio || (ratio == best_ratio && basis[i] < basis[l])
                    }
                };
                if take {
                    leaving = Some(i);
                    best_ratio = ratio;
                }
            }
        }

        let pivot_row = match leaving {
            Some(i) => i,
            // 入基列无正元 ⇒ 可沿该方向无限改进
            None => return LpSolution::non_optimal(LpStatus::Unbounded),
        };

        pivot(&mut tableau, &mut z_row, pivot_row, entering, cols);
        basis[pivot_row] = entering;

        iterations += 1;
        if iterations >= config.max_iterations {
            return LpSolution::non_optimal(LpStatus::IterationLimit);
        }
    }

    // ==========================================
    // 解提取
    // ==========================================
    let mut variables = vec![0.0; n];
    for (i, &basic) in basis.iter().enumerate() {
        if basic < n {
            // 比率检验保证 RHS 非负, max 只吸收数值尘埃
            variables[basic] = tableau[i][cols - 1].max(0.0);
        }
    }

    // 目标值按顶点重算,保证与逐变量利润一致
    let objective_value = variables
        .iter()
        .zip(model.objective.iter())
        .map(|(x, c)| x * c)
        .sum();

    LpSolution {
        status: LpStatus::Optimal,
        variables,
        objective_value,
    }
}

/// 以 (pivot_row, entering) 为主元做一次高斯消元
fn pivot(
    tableau: &mut [Vec<f64>],
    z_row: &mut [f64],
    pivot_row: usize,
    entering: usize,
    cols: usize,
) {
    let pivot_value = tableau[pivot_row][entering];
    for val in tableau[pivot_row].iter_mut() {
        *val /= pivot_value;
    }
    let pivot_vals = tableau[pivot_row].clone();

    for (i, row) in tableau.iter_mut().enumerate() {
        if i == pivot_row {
            continue;
        }
        let factor = row[entering];
        if factor == 0.0 {
            continue;
        }
        for j in 0..cols {
            row[j] -= factor * pivot_vals[j];
        }
    }

    let factor = z_row[entering];
    if factor != 0.0 {
        for j in 0..cols {
            z_row[j] -= factor * pivot_vals[j];
        }
    }
}

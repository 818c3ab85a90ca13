// ==========================================
// 航空货运网络配载优化系统 - 配载运行接口
// ==========================================
// 依据: Engine_Specs_v1.0.md - 1. 计算主流程
// 用途: 协调 校验 → 建模 → 求解 → 解释 四段批计算
// ==========================================
// 红线: 要么完整一致的响应,要么显式失败; 坏行永不中止整批
// ==========================================

use crate::api::dto::{
    round2, AllocationRunResponse, LegContributionDto, LegTonnageDto, OdAllocationDto,
};
use crate::api::error::ApiResult;
use crate::domain::market::{RawDirectRecord, RawIndirectRecord};
use crate::engine::{AllocationSolver, NetworkModelBuilder, PriorityClassifier};
use crate::ingest::RecordValidator;
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

// 正吨位判定容差（OD 摘要只收正吨位市场）
const POSITIVE_TONNAGE_TOL: f64 = 1e-9;

// ==========================================
// AllocationApi - 配载运行接口
// ==========================================
pub struct AllocationApi {
    validator: RecordValidator,
    builder: NetworkModelBuilder,
    solver: AllocationSolver,
    classifier: PriorityClassifier,
}

impl AllocationApi {
    /// 构造函数（默认引擎配置）
    pub fn new() -> Self {
        Self {
            validator: RecordValidator::new(),
            builder: NetworkModelBuilder::new(),
            solver: AllocationSolver::new(),
            classifier: PriorityClassifier::new(),
        }
    }

    /// 指定求解器（测试/调参用）
    pub fn with_solver(solver: AllocationSolver) -> Self {
        Self {
            validator: RecordValidator::new(),
            builder: NetworkModelBuilder::new(),
            solver,
            classifier: PriorityClassifier::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 执行一次配载运行
    ///
    /// 流程: 记录校验 → 网络建模 → LP 求解 → 优先级解释 → 组装响应。
    /// 同输入重跑幂等: 总利润必然复现（多最优顶点下逐路径配载可能不同）。
    ///
    /// # 参数
    /// - `direct`: 直达市场原始记录
    /// - `indirect`: 中转市场原始记录
    ///
    /// # 返回
    /// - `Ok(AllocationRunResponse)`: 完整响应（含摄取诊断）
    /// - `Err(ApiError)`: 求解失败（不可行/无界/超限）
    #[instrument(skip_all, fields(direct_rows = direct.len(), indirect_rows = indirect.len()))]
    pub fn run_allocation(
        &self,
        direct: &[RawDirectRecord],
        indirect: &[RawIndirectRecord],
    ) -> ApiResult<AllocationRunResponse> {
        // 1. 校验（坏行弃用留痕,不中止）
        let (validated_direct, validated_indirect, ingest) =
            self.validator.validate_batch(direct, indirect);

        // 2. 建模
        let model = self.builder.build(&validated_direct, &validated_indirect);

        // 3. 求解（失败即显式返回,不产出部分结果）
        let decision = self.solver.solve(&model)?;

        // 4. 解释
        let breakdown = self.classifier.classify(&model, &decision);

        // 5. 组装响应
        let od_allocations: Vec<OdAllocationDto> = decision
            .allocations
            .iter()
            .filter(|a| a.tonnage_t > POSITIVE_TONNAGE_TOL)
            .map(OdAllocationDto::from)
            .collect();

        let response = AllocationRunResponse {
            run_id: Uuid::new_v4().to_string(),
            as_of: Utc::now().to_rfc3339(),
            od_allocations,
            leg_contributions: breakdown
                .contributions
                .iter()
                .map(LegContributionDto::from)
                .collect(),
            leg_totals: breakdown.leg_totals.iter().map(LegTonnageDto::from).collect(),
            total_profit: round2(decision.total_profit),
            ingest,
        };

        info!(
            run_id = %response.run_id,
            od_count = response.od_allocations.len(),
            total_profit = response.total_profit,
            discarded_rows = response.ingest.summary.discarded,
            "配载运行完成"
        );

        Ok(response)
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for AllocationApi {
    fn default() -> Self {
        Self::new()
    }
}

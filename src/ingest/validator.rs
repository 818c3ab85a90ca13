// ==========================================
// 航空货运网络配载优化系统 - 记录校验器
// ==========================================
// 依据: Field_Mapping_Spec_v1.0.md - 数据质量与降级规则
// 职责: 原始记录 → 已校验记录 或 弃用留痕
// ==========================================
// 规则:
// - 必填字段缺失 → 整行弃用 (Error), 继续下一行
// - 数值字段缺失 → 取零, 不留痕（部分数据源常态）
// - 负舱位/负上限 → 保留但标记 (Warning), 可能导致模型不可行
// - 同批次重复 O-D → 标记 (Conflict), 后者覆盖前者
// ==========================================

use crate::domain::market::{
    IngestLevel, IngestReport, IngestSummary, IngestViolation, RawDirectRecord,
    RawIndirectRecord, ValidatedDirectRecord, ValidatedIndirectRecord,
};
use std::collections::HashSet;
use tracing::{debug, instrument};

// ==========================================
// RecordValidator - 记录校验器
// ==========================================
pub struct RecordValidator {
    // 无状态引擎,不需要注入依赖
}

impl RecordValidator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 校验整批记录
    ///
    /// # 参数
    /// - `direct`: 直达市场原始记录
    /// - `indirect`: 中转市场原始记录
    ///
    /// # 返回
    /// (已校验直达记录, 已校验中转记录, 诊断报告)
    #[instrument(skip_all, fields(direct_rows = direct.len(), indirect_rows = indirect.len()))]
    pub fn validate_batch(
        &self,
        direct: &[RawDirectRecord],
        indirect: &[RawIndirectRecord],
    ) -> (
        Vec<ValidatedDirectRecord>,
        Vec<ValidatedIndirectRecord>,
        IngestReport,
    ) {
        let mut violations = Vec::new();
        let mut seen_od: HashSet<String> = HashSet::new();

        let mut validated_direct = Vec::new();
        for record in direct {
            if let Some(valid) = self.validate_direct(record, &mut violations) {
                self.check_duplicate_od(&valid.od_code, valid.row_number, &mut seen_od, &mut violations);
                validated_direct.push(valid);
            }
        }

        let mut validated_indirect = Vec::new();
        for record in indirect {
            if let Some(valid) = self.validate_indirect(record, &mut violations) {
                self.check_duplicate_od(&valid.od_code, valid.row_number, &mut seen_od, &mut violations);
                validated_indirect.push(valid);
            }
        }

        let report = self.build_report(
            direct.len() + indirect.len(),
            validated_direct.len() + validated_indirect.len(),
            violations,
        );

        debug!(
            accepted = report.summary.accepted,
            discarded = report.summary.discarded,
            "记录校验完成"
        );

        (validated_direct, validated_indirect, report)
    }

    /// 校验单条直达记录
    ///
    /// # 返回
    /// - `Some(ValidatedDirectRecord)`: 通过校验
    /// - `None`: 必填字段缺失,整行弃用（诊断已写入 violations）
    fn validate_direct(
        &self,
        record: &RawDirectRecord,
        violations: &mut Vec<IngestViolation>,
    ) -> Option<ValidatedDirectRecord> {
        let od_code = match &record.od_code {
            Some(od) => od.clone(),
            None => {
                violations.push(IngestViolation {
                    row_number: record.row_number,
                    od_code: None,
                    level: IngestLevel::Error,
                    field: "od_code".to_string(),
                    message: "O-D 码缺失,整行弃用".to_string(),
                });
                return None;
            }
        };

        let cm_per_t = match record.cm_per_t {
            Some(cm) => cm,
            None => {
                violations.push(IngestViolation {
                    row_number: record.row_number,
                    od_code: Some(od_code),
                    level: IngestLevel::Error,
                    field: "cm_per_t".to_string(),
                    message: "CM 缺失,整行弃用".to_string(),
                });
                return None;
            }
        };

        // 缺省数值字段取零（部分数据源常态,不留痕）
        let market_share_t = record.market_share_t.unwrap_or(0.0);
        let own_capacity_t = record.own_capacity_t.unwrap_or(0.0);

        self.check_negative(record.row_number, &od_code, "market_share_t", market_share_t, violations);
        self.check_negative(record.row_number, &od_code, "own_capacity_t", own_capacity_t, violations);

        Some(ValidatedDirectRecord {
            row_number: record.row_number,
            od_code,
            cm_per_t,
            market_share_t,
            own_capacity_t,
        })
    }

    /// 校验单条中转记录
    fn validate_indirect(
        &self,
        record: &RawIndirectRecord,
        violations: &mut Vec<IngestViolation>,
    ) -> Option<ValidatedIndirectRecord> {
        let od_code = match &record.od_code {
            Some(od) => od.clone(),
            None => {
                violations.push(IngestViolation {
                    row_number: record.row_number,
                    od_code: None,
                    level: IngestLevel::Error,
                    field: "od_code".to_string(),
                    message: "O-D 码缺失,整行弃用".to_string(),
                });
                return None;
            }
        };

        let cm_per_t = match record.cm_per_t {
            Some(cm) => cm,
            None => {
                violations.push(IngestViolation {
                    row_number: record.row_number,
                    od_code: Some(od_code),
                    level: IngestLevel::Error,
                    field: "cm_per_t".to_string(),
                    message: "CM 缺失,整行弃用".to_string(),
                });
                return None;
            }
        };

        let first_leg_code = match &record.first_leg_code {
            Some(leg) => leg.clone(),
            None => {
                violations.push(IngestViolation {
                    row_number: record.row_number,
                    od_code: Some(od_code),
                    level: IngestLevel::Error,
                    field: "first_leg_code".to_string(),
                    message: "第一航段码缺失,整行弃用".to_string(),
                });
                return None;
            }
        };

        let second_leg_code = match &record.second_leg_code {
            Some(leg) => leg.clone(),
            None => {
                violations.push(IngestViolation {
                    row_number: record.row_number,
                    od_code: Some(od_code),
                    level: IngestLevel::Error,
                    field: "second_leg_code".to_string(),
                    message: "第二航段码缺失,整行弃用".to_string(),
                });
                return None;
            }
        };

        // 两航段相同: 约束中只按成员计一次,保留但标记
        if first_leg_code == second_leg_code {
            violations.push(IngestViolation {
                row_number: record.row_number,
                od_code: Some(od_code.clone()),
                level: IngestLevel::Warning,
                field: "second_leg_code".to_string(),
                message: format!("中转两航段相同: {}", first_leg_code),
            });
        }

        let market_share_t = record.market_share_t.unwrap_or(0.0);
        let first_leg_capacity_t = record.first_leg_capacity_t.unwrap_or(0.0);
        let second_leg_capacity_t = record.second_leg_capacity_t.unwrap_or(0.0);

        self.check_negative(record.row_number, &od_code, "market_share_t", market_share_t, violations);
        self.check_negative(record.row_number, &od_code, "first_leg_capacity_t", first_leg_capacity_t, violations);
        self.check_negative(record.row_number, &od_code, "second_leg_capacity_t", second_leg_capacity_t, violations);

        Some(ValidatedIndirectRecord {
            row_number: record.row_number,
            od_code,
            cm_per_t,
            market_share_t,
            first_leg_code,
            first_leg_capacity_t,
            second_leg_code,
            second_leg_capacity_t,
        })
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 负值检查（不拦截,只标记: 负值会传入 LP 并以不可行暴露）
    fn check_negative(
        &self,
        row_number: usize,
        od_code: &str,
        field: &str,
        value: f64,
        violations: &mut Vec<IngestViolation>,
    ) {
        if value < 0.0 {
            violations.push(IngestViolation {
                row_number,
                od_code: Some(od_code.to_string()),
                level: IngestLevel::Warning,
                field: field.to_string(),
                message: format!("{} 为负值: {:.3},可能导致模型不可行", field, value),
            });
        }
    }

    /// 重复 O-D 检查（同批次内,后者覆盖前者）
    fn check_duplicate_od(
        &self,
        od_code: &str,
        row_number: usize,
        seen_od: &mut HashSet<String>,
        violations: &mut Vec<IngestViolation>,
    ) {
        if !seen_od.insert(od_code.to_string()) {
            violations.push(IngestViolation {
                row_number,
                od_code: Some(od_code.to_string()),
                level: IngestLevel::Conflict,
                field: "od_code".to_string(),
                message: "重复 O-D（同批次内）,后者覆盖前者".to_string(),
            });
        }
    }

    /// 汇总诊断报告
    fn build_report(
        &self,
        total_rows: usize,
        accepted: usize,
        violations: Vec<IngestViolation>,
    ) -> IngestReport {
        let discarded = violations
            .iter()
            .filter(|v| matches!(v.level, IngestLevel::Error))
            .count();
        let warning = violations
            .iter()
            .filter(|v| matches!(v.level, IngestLevel::Warning))
            .count();
        let conflict = violations
            .iter()
            .filter(|v| matches!(v.level, IngestLevel::Conflict))
            .count();

        IngestReport {
            summary: IngestSummary {
                total_rows,
                accepted,
                discarded,
                warning,
                conflict,
            },
            violations,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for RecordValidator {
    fn default() -> Self {
        Self::new()
    }
}

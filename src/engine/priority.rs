// ==========================================
// 航空货运网络配载优化系统 - 填充优先级分类引擎
// ==========================================
// 依据: Engine_Specs_v1.0.md - 6. Priority Classifier
// ==========================================
// 职责: 解释每个航段的舱位被谁、以何种优先级吃掉
// 输入: 网络模型 + 配载决策
// 输出: 航段贡献记录（带标签与名次）+ 航段吨位汇总
// 红线: 名次必须 1..n 连续且唯一; 平局规则显式,绝不依赖输入顺序
// ==========================================

use crate::domain::allocation::{
    AllocationDecision, LegBreakdown, LegContribution, LegTonnageSummary,
};
use crate::domain::network::NetworkModel;
use crate::domain::types::PriorityType;
use std::cmp::Ordering;
use tracing::{debug, instrument};

// 正吨位判定容差（求解器数值尘埃不计入贡献行）
const POSITIVE_TONNAGE_TOL: f64 = 1e-9;

// ==========================================
// PriorityClassifier - 填充优先级分类引擎
// ==========================================
pub struct PriorityClassifier {
    // 无状态引擎,不需要注入依赖
}

/// 贡献行中间形态（排序/标注前）
#[derive(Debug, Clone)]
struct Contributor {
    od_code: String,
    cm_per_t: f64,
    tonnage_t: f64,
    is_direct: bool,
}

impl PriorityClassifier {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 分类整个网络的航段贡献
    ///
    /// 航段按注册表顺序输出; 每个航段内按填充名次输出。
    ///
    /// # 参数
    /// - `model`: 网络模型
    /// - `decision`: 配载决策
    ///
    /// # 返回
    /// 航段贡献记录 + 航段吨位汇总
    #[instrument(skip_all, fields(path_count = model.path_count(), leg_count = model.leg_count()))]
    pub fn classify(&self, model: &NetworkModel, decision: &AllocationDecision) -> LegBreakdown {
        let mut contributions = Vec::new();
        let mut leg_totals = Vec::new();

        for leg in &model.legs {
            let contributors = self.collect_contributors(model, decision, &leg.leg_code);
            if contributors.is_empty() {
                continue;
            }

            let total_tonnage_t = contributors.iter().map(|c| c.tonnage_t).sum();
            contributions.extend(self.rank_and_label(&leg.leg_code, contributors));
            leg_totals.push(LegTonnageSummary {
                leg_code: leg.leg_code.clone(),
                total_tonnage_t,
            });
        }

        debug!(
            contribution_rows = contributions.len(),
            legs_with_traffic = leg_totals.len(),
            "优先级分类完成"
        );

        LegBreakdown {
            contributions,
            leg_totals,
        }
    }

    // ==========================================
    // 分类规则
    // ==========================================

    /// 收集航段上的正吨位贡献市场
    fn collect_contributors(
        &self,
        model: &NetworkModel,
        decision: &AllocationDecision,
        leg_code: &str,
    ) -> Vec<Contributor> {
        model
            .paths
            .iter()
            .zip(decision.allocations.iter())
            .filter(|(path, allocation)| {
                allocation.tonnage_t > POSITIVE_TONNAGE_TOL && path.traverses(leg_code)
            })
            .map(|(path, allocation)| Contributor {
                od_code: path.od_code.clone(),
                cm_per_t: path.cm_per_t,
                tonnage_t: allocation.tonnage_t,
                is_direct: path.is_direct(),
            })
            .collect()
    }

    /// 单航段排序 + 标注
    ///
    /// 排序键:
    /// 1) CM 降序
    /// 2) 同 CM: 直达优先于中转
    /// 3) 同 CM 同类型: OD 码升序（显式末位键,保证严格全序）
    ///
    /// 标签: 唯一贡献 → Only OD; 否则按 (CM 是否并列最高) × (是否直达) 交叉。
    /// 多个市场并列最高 CM 时各自如实标注,不做去重。
    fn rank_and_label(&self, leg_code: &str, mut contributors: Vec<Contributor>) -> Vec<LegContribution> {
        if contributors.len() == 1 {
            let only = contributors.remove(0);
            return vec![self.to_record(leg_code, &only, PriorityType::OnlyOd, 1)];
        }

        let top_cm = contributors
            .iter()
            .map(|c| c.cm_per_t)
            .fold(f64::NEG_INFINITY, f64::max);

        contributors.sort_by(|a, b| Self::compare(a, b));

        contributors
            .iter()
            .enumerate()
            .map(|(position, contributor)| {
                let is_highest = contributor.cm_per_t == top_cm;
                let priority_type = match (is_highest, contributor.is_direct) {
                    (true, true) => PriorityType::HighestCmDirect,
                    (true, false) => PriorityType::HighestCmIndirect,
                    (false, true) => PriorityType::DirectLowerCm,
                    (false, false) => PriorityType::IndirectLowerCm,
                };
                self.to_record(leg_code, contributor, priority_type, position as u32 + 1)
            })
            .collect()
    }

    /// 贡献市场比较（返回 Less 表示 a 名次靠前）
    fn compare(a: &Contributor, b: &Contributor) -> Ordering {
        // 1. CM 降序
        match b.cm_per_t.total_cmp(&a.cm_per_t) {
            Ordering::Equal => {}
            other => return other,
        }

        // 2. 同 CM: 直达优先
        match (a.is_direct, b.is_direct) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }

        // 3. 末位键: OD 码升序
        a.od_code.cmp(&b.od_code)
    }

    /// 生成名次原因 (可解释性)
    ///
    /// # 参数
    /// - `record`: 航段贡献记录
    ///
    /// # 返回
    /// JSON 格式的名次原因字符串
    pub fn generate_rank_reason(&self, record: &LegContribution) -> String {
        serde_json::json!({
            "rank_keys": {
                "cm_per_t": record.cm_per_t,
                "priority_type": record.priority_type,
                "od_code": record.od_code,
            },
            "leg_code": record.leg_code,
            "fill_priority_rank": record.fill_priority_rank,
        })
        .to_string()
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn to_record(
        &self,
        leg_code: &str,
        contributor: &Contributor,
        priority_type: PriorityType,
        fill_priority_rank: u32,
    ) -> LegContribution {
        LegContribution {
            leg_code: leg_code.to_string(),
            od_code: contributor.od_code.clone(),
            cm_per_t: contributor.cm_per_t,
            tonnage_t: contributor.tonnage_t,
            profit: contributor.tonnage_t * contributor.cm_per_t,
            priority_type,
            fill_priority_rank,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for PriorityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::allocation::OdAllocation;
    use crate::domain::network::{FlightLegCapacity, OdPath};

    fn model_and_decision(entries: Vec<(OdPath, f64)>, legs: Vec<(&str, f64)>) -> (NetworkModel, AllocationDecision) {
        let allocations = entries
            .iter()
            .map(|(path, tonnage)| OdAllocation {
                od_code: path.od_code.clone(),
                tonnage_t: *tonnage,
                cm_per_t: path.cm_per_t,
                profit: tonnage * path.cm_per_t,
            })
            .collect();
        let total_profit = entries.iter().map(|(p, t)| t * p.cm_per_t).sum();
        let model = NetworkModel {
            paths: entries.into_iter().map(|(p, _)| p).collect(),
            legs: legs
                .into_iter()
                .map(|(code, capacity_t)| FlightLegCapacity {
                    leg_code: code.to_string(),
                    capacity_t,
                })
                .collect(),
        };
        let decision = AllocationDecision {
            allocations,
            total_profit,
        };
        (model, decision)
    }

    fn direct(od: &str, cm: f64, ceiling: f64) -> OdPath {
        OdPath {
            od_code: od.to_string(),
            cm_per_t: cm,
            legs: vec![od.to_string()],
            ceiling_t: ceiling,
        }
    }

    fn indirect(od: &str, cm: f64, ceiling: f64, leg1: &str, leg2: &str) -> OdPath {
        OdPath {
            od_code: od.to_string(),
            cm_per_t: cm,
            legs: vec![leg1.to_string(), leg2.to_string()],
            ceiling_t: ceiling,
        }
    }

    #[test]
    fn test_single_contributor_is_only_od() {
        let classifier = PriorityClassifier::new();
        let (model, decision) = model_and_decision(
            vec![(direct("DEL-BOM", 10.0, 100.0), 100.0)],
            vec![("DEL-BOM", 100.0)],
        );

        let breakdown = classifier.classify(&model, &decision);

        assert_eq!(breakdown.contributions.len(), 1);
        let record = &breakdown.contributions[0];
        assert_eq!(record.priority_type, PriorityType::OnlyOd);
        assert_eq!(record.fill_priority_rank, 1);
        assert_eq!(record.profit, 1000.0);
    }

    #[test]
    fn test_higher_cm_indirect_outranks_direct() {
        let classifier = PriorityClassifier::new();
        let (model, decision) = model_and_decision(
            vec![
                (direct("DEL-BOM", 10.0, 60.0), 20.0),
                (indirect("DEL-MAA", 20.0, 30.0, "DEL-BOM", "BOM-MAA"), 30.0),
            ],
            vec![("DEL-BOM", 50.0), ("BOM-MAA", 100.0)],
        );

        let breakdown = classifier.classify(&model, &decision);

        let del_bom: Vec<_> = breakdown
            .contributions
            .iter()
            .filter(|r| r.leg_code == "DEL-BOM")
            .collect();
        assert_eq!(del_bom.len(), 2);
        assert_eq!(del_bom[0].od_code, "DEL-MAA");
        assert_eq!(del_bom[0].priority_type, PriorityType::HighestCmIndirect);
        assert_eq!(del_bom[0].fill_priority_rank, 1);
        assert_eq!(del_bom[1].od_code, "DEL-BOM");
        assert_eq!(del_bom[1].priority_type, PriorityType::DirectLowerCm);
        assert_eq!(del_bom[1].fill_priority_rank, 2);

        // 第二航段上中转是唯一贡献
        let bom_maa: Vec<_> = breakdown
            .contributions
            .iter()
            .filter(|r| r.leg_code == "BOM-MAA")
            .collect();
        assert_eq!(bom_maa.len(), 1);
        assert_eq!(bom_maa[0].priority_type, PriorityType::OnlyOd);
    }

    #[test]
    fn test_cm_tie_direct_ranks_ahead_of_indirect() {
        let classifier = PriorityClassifier::new();
        let (model, decision) = model_and_decision(
            vec![
                (indirect("DEL-MAA", 15.0, 30.0, "DEL-BOM", "BOM-MAA"), 10.0),
                (direct("DEL-BOM", 15.0, 60.0), 20.0),
            ],
            vec![("DEL-BOM", 50.0), ("BOM-MAA", 100.0)],
        );

        let breakdown = classifier.classify(&model, &decision);

        let del_bom: Vec<_> = breakdown
            .contributions
            .iter()
            .filter(|r| r.leg_code == "DEL-BOM")
            .collect();
        // 同 CM: 直达拿名次 1,且两者都如实标为最高 CM
        assert_eq!(del_bom[0].od_code, "DEL-BOM");
        assert_eq!(del_bom[0].priority_type, PriorityType::HighestCmDirect);
        assert_eq!(del_bom[1].od_code, "DEL-MAA");
        assert_eq!(del_bom[1].priority_type, PriorityType::HighestCmIndirect);
    }

    #[test]
    fn test_zero_tonnage_paths_do_not_contribute() {
        let classifier = PriorityClassifier::new();
        let (model, decision) = model_and_decision(
            vec![
                (direct("DEL-BOM", 10.0, 60.0), 50.0),
                (indirect("DEL-MAA", -2.0, 30.0, "DEL-BOM", "BOM-MAA"), 0.0),
            ],
            vec![("DEL-BOM", 50.0), ("BOM-MAA", 100.0)],
        );

        let breakdown = classifier.classify(&model, &decision);

        // 零吨位路径不产生贡献行,航段上只剩唯一贡献
        assert_eq!(breakdown.contributions.len(), 1);
        assert_eq!(breakdown.contributions[0].priority_type, PriorityType::OnlyOd);
        // 无流量航段不进汇总
        assert_eq!(breakdown.leg_totals.len(), 1);
        assert_eq!(breakdown.leg_totals[0].leg_code, "DEL-BOM");
        assert_eq!(breakdown.leg_totals[0].total_tonnage_t, 50.0);
    }

    #[test]
    fn test_generate_rank_reason_is_json() {
        let classifier = PriorityClassifier::new();
        let (model, decision) = model_and_decision(
            vec![(direct("DEL-BOM", 10.0, 100.0), 100.0)],
            vec![("DEL-BOM", 100.0)],
        );

        let breakdown = classifier.classify(&model, &decision);
        let reason = classifier.generate_rank_reason(&breakdown.contributions[0]);

        let parsed: serde_json::Value = serde_json::from_str(&reason).unwrap();
        assert_eq!(parsed["rank_keys"]["priority_type"], "ONLY_OD");
        assert_eq!(parsed["fill_priority_rank"], 1);
    }

    #[test]
    fn test_ranks_are_contiguous_permutation() {
        let classifier = PriorityClassifier::new();
        let (model, decision) = model_and_decision(
            vec![
                (direct("DEL-BOM", 8.0, 20.0), 10.0),
                (indirect("DEL-MAA", 20.0, 30.0, "DEL-BOM", "BOM-MAA"), 15.0),
                (indirect("DEL-HYD", 12.0, 30.0, "DEL-BOM", "BOM-HYD"), 25.0),
            ],
            vec![("DEL-BOM", 50.0), ("BOM-MAA", 100.0), ("BOM-HYD", 100.0)],
        );

        let breakdown = classifier.classify(&model, &decision);

        let mut ranks: Vec<u32> = breakdown
            .contributions
            .iter()
            .filter(|r| r.leg_code == "DEL-BOM")
            .map(|r| r.fill_priority_rank)
            .collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3]);

        // 名次 1 必属最高 CM
        let top = breakdown
            .contributions
            .iter()
            .find(|r| r.leg_code == "DEL-BOM" && r.fill_priority_rank == 1)
            .unwrap();
        assert_eq!(top.od_code, "DEL-MAA");
        assert_eq!(top.cm_per_t, 20.0);
    }
}

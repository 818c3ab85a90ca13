// ==========================================
// 航空货运网络配载优化系统 - 网络建模引擎
// ==========================================
// 依据: Engine_Specs_v1.0.md - 3. Network Model Builder
// 职责: 已校验记录 → 路径注册表 + 航段舱位表
// ==========================================
// 规则:
// - 直达上限 = min(市场份额, 自营舱位); 中转上限 = 市场份额
// - 航段舱位 = 该航段所有声明的最小值（显式折叠,初值无界）
// - 重复 O-D 后者覆盖前者（保留首次登记位置,迭代顺序确定）
// ==========================================

use crate::domain::market::{ValidatedDirectRecord, ValidatedIndirectRecord};
use crate::domain::network::{FlightLegCapacity, NetworkModel, OdPath};
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// NetworkModelBuilder - 网络建模引擎
// ==========================================
pub struct NetworkModelBuilder {
    // 无状态引擎,不需要注入依赖
}

impl NetworkModelBuilder {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 构建网络模型
    ///
    /// # 参数
    /// - `direct`: 已校验直达市场记录
    /// - `indirect`: 已校验中转市场记录
    ///
    /// # 返回
    /// 不可变的网络模型（路径注册表 + 航段舱位表）
    #[instrument(skip_all, fields(direct_count = direct.len(), indirect_count = indirect.len()))]
    pub fn build(
        &self,
        direct: &[ValidatedDirectRecord],
        indirect: &[ValidatedIndirectRecord],
    ) -> NetworkModel {
        let paths = self.build_path_registry(direct, indirect);
        let legs = self.fold_leg_capacities(direct, indirect);

        debug!(
            path_count = paths.len(),
            leg_count = legs.len(),
            "网络模型构建完成"
        );

        NetworkModel { paths, legs }
    }

    /// 构建路径注册表
    ///
    /// 重复 O-D 覆盖语义: 后登记者覆盖前者,但保留首次位置
    fn build_path_registry(
        &self,
        direct: &[ValidatedDirectRecord],
        indirect: &[ValidatedIndirectRecord],
    ) -> Vec<OdPath> {
        let mut paths: Vec<OdPath> = Vec::with_capacity(direct.len() + indirect.len());
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in direct {
            let path = OdPath {
                od_code: record.od_code.clone(),
                cm_per_t: record.cm_per_t,
                legs: vec![record.od_code.clone()],
                ceiling_t: record.market_share_t.min(record.own_capacity_t),
            };
            Self::upsert_path(&mut paths, &mut index, path);
        }

        for record in indirect {
            let path = OdPath {
                od_code: record.od_code.clone(),
                cm_per_t: record.cm_per_t,
                legs: vec![record.first_leg_code.clone(), record.second_leg_code.clone()],
                ceiling_t: record.market_share_t,
            };
            Self::upsert_path(&mut paths, &mut index, path);
        }

        paths
    }

    /// 折叠航段舱位
    ///
    /// 纯函数: 每个航段初值无界,逐条声明向下取最小。
    /// 声明来源:
    /// - 直达市场: 自营舱位声明到自身航段码
    /// - 中转市场: 两个航段各自声明其航段舱位
    fn fold_leg_capacities(
        &self,
        direct: &[ValidatedDirectRecord],
        indirect: &[ValidatedIndirectRecord],
    ) -> Vec<FlightLegCapacity> {
        let mut legs: Vec<FlightLegCapacity> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in direct {
            Self::claim_leg(&mut legs, &mut index, &record.od_code, record.own_capacity_t);
        }
        for record in indirect {
            Self::claim_leg(&mut legs, &mut index, &record.first_leg_code, record.first_leg_capacity_t);
            Self::claim_leg(&mut legs, &mut index, &record.second_leg_code, record.second_leg_capacity_t);
        }

        legs
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 向折叠结果提交一条舱位声明
    fn claim_leg(
        legs: &mut Vec<FlightLegCapacity>,
        index: &mut HashMap<String, usize>,
        leg_code: &str,
        capacity_t: f64,
    ) {
        match index.get(leg_code) {
            Some(&i) => {
                legs[i].capacity_t = legs[i].capacity_t.min(capacity_t);
            }
            None => {
                index.insert(leg_code.to_string(), legs.len());
                legs.push(FlightLegCapacity {
                    leg_code: leg_code.to_string(),
                    // 首条声明与无界初值折叠后即自身
                    capacity_t: f64::INFINITY.min(capacity_t),
                });
            }
        }
    }

    fn upsert_path(paths: &mut Vec<OdPath>, index: &mut HashMap<String, usize>, path: OdPath) {
        match index.get(&path.od_code) {
            Some(&i) => paths[i] = path,
            None => {
                index.insert(path.od_code.clone(), paths.len());
                paths.push(path);
            }
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for NetworkModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

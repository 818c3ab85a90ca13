// ==========================================
// API 层端到端集成测试
// ==========================================
// 职责: 验证 AllocationApi 从原始记录到完整响应的全链路
// 场景: 校验降级 → 建模 → 求解 → 解释 → DTO 组装
// ==========================================

use air_cargo_network_opt::api::{AllocationApi, ApiError};
use air_cargo_network_opt::domain::market::{RawDirectRecord, RawIndirectRecord};
use air_cargo_network_opt::engine::SolveError;

const TOL: f64 = 1e-6;

// ==========================================
// 测试辅助函数
// ==========================================

/// 创建直达市场原始记录
fn raw_direct(row: usize, od: Option<&str>, cm: Option<f64>, share: f64, capacity: f64) -> RawDirectRecord {
    RawDirectRecord {
        row_number: row,
        od_code: od.map(|s| s.to_string()),
        cm_per_t: cm,
        market_share_t: Some(share),
        own_capacity_t: Some(capacity),
    }
}

/// 创建中转市场原始记录
fn raw_indirect(
    row: usize,
    od: &str,
    cm: f64,
    share: f64,
    leg1: &str,
    cap1: f64,
    leg2: &str,
    cap2: f64,
) -> RawIndirectRecord {
    RawIndirectRecord {
        row_number: row,
        od_code: Some(od.to_string()),
        cm_per_t: Some(cm),
        market_share_t: Some(share),
        first_leg_code: Some(leg1.to_string()),
        first_leg_capacity_t: Some(cap1),
        second_leg_code: Some(leg2.to_string()),
        second_leg_capacity_t: Some(cap2),
    }
}

// ==========================================
// 测试1: 全链路正常运行
// ==========================================
#[test]
fn test_full_run_produces_consistent_response() {
    let api = AllocationApi::new();

    let direct = vec![
        raw_direct(1, Some("DEL-BOM"), Some(10.0), 60.0, 50.0),
        raw_direct(2, Some("BOM-MAA"), Some(6.0), 80.0, 90.0),
    ];
    let indirect = vec![raw_indirect(1, "DEL-MAA", 20.0, 30.0, "DEL-BOM", 50.0, "BOM-MAA", 60.0)];

    let response = api.run_allocation(&direct, &indirect).unwrap();

    // 运行元数据齐备
    assert!(!response.run_id.is_empty());
    assert!(!response.as_of.is_empty());

    // OD 摘要仅含正吨位市场
    assert!(!response.od_allocations.is_empty());
    for allocation in &response.od_allocations {
        assert!(allocation.tonnage_t > 0.0);
        assert!((allocation.profit - allocation.tonnage_t * allocation.cm_per_t).abs() < 0.01);
    }

    // 高 CM 中转先吃共享航段
    let del_maa = response
        .od_allocations
        .iter()
        .find(|a| a.od_code == "DEL-MAA")
        .unwrap();
    assert!((del_maa.tonnage_t - 30.0).abs() < TOL);

    // 航段汇总 = 该航段全部贡献行吨位之和
    for total in &response.leg_totals {
        let sum: f64 = response
            .leg_contributions
            .iter()
            .filter(|r| r.leg_code == total.leg_code)
            .map(|r| r.tonnage_t)
            .sum();
        assert!((total.total_tonnage_t - sum).abs() < 0.01);
    }

    // 名次在每个航段内连续且唯一
    for total in &response.leg_totals {
        let mut ranks: Vec<u32> = response
            .leg_contributions
            .iter()
            .filter(|r| r.leg_code == total.leg_code)
            .map(|r| r.fill_priority_rank)
            .collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=ranks.len() as u32).collect::<Vec<_>>());
    }

    // 无坏行
    assert_eq!(response.ingest.summary.discarded, 0);
    assert_eq!(response.ingest.summary.accepted, 3);
}

// ==========================================
// 测试2: 坏行弃用留痕,不中止整批
// ==========================================
#[test]
fn test_malformed_rows_are_skipped_with_diagnostics() {
    let api = AllocationApi::new();

    let direct = vec![
        raw_direct(1, Some("DEL-BOM"), Some(10.0), 60.0, 50.0),
        raw_direct(2, None, Some(8.0), 40.0, 40.0), // O-D 缺失
        raw_direct(3, Some("DEL-CCU"), None, 40.0, 40.0), // CM 缺失
        raw_direct(4, Some("BOM-MAA"), Some(6.0), 80.0, 90.0),
    ];

    let response = api.run_allocation(&direct, &[]).unwrap();

    // 模型只含格式完好的行
    assert_eq!(response.ingest.summary.total_rows, 4);
    assert_eq!(response.ingest.summary.accepted, 2);
    assert_eq!(response.ingest.summary.discarded, 2);
    assert_eq!(response.od_allocations.len(), 2);

    // 诊断定位到行号
    let rows: Vec<usize> = response
        .ingest
        .violations
        .iter()
        .map(|v| v.row_number)
        .collect();
    assert!(rows.contains(&2));
    assert!(rows.contains(&3));
}

// ==========================================
// 测试3: 解释标签随响应交付
// ==========================================
#[test]
fn test_priority_labels_in_response() {
    let api = AllocationApi::new();

    let direct = vec![raw_direct(1, Some("DEL-BOM"), Some(10.0), 60.0, 50.0)];
    let indirect = vec![raw_indirect(1, "DEL-MAA", 20.0, 30.0, "DEL-BOM", 50.0, "BOM-MAA", 60.0)];

    let response = api.run_allocation(&direct, &indirect).unwrap();

    let del_bom_rows: Vec<_> = response
        .leg_contributions
        .iter()
        .filter(|r| r.leg_code == "DEL-BOM")
        .collect();
    assert_eq!(del_bom_rows.len(), 2);
    assert_eq!(del_bom_rows[0].priority_type, "Highest CM - Indirect");
    assert_eq!(del_bom_rows[1].priority_type, "Direct - Lower CM");

    let bom_maa_rows: Vec<_> = response
        .leg_contributions
        .iter()
        .filter(|r| r.leg_code == "BOM-MAA")
        .collect();
    assert_eq!(bom_maa_rows.len(), 1);
    assert_eq!(bom_maa_rows[0].priority_type, "Only OD");
}

// ==========================================
// 测试4: 负舱位输入 → 显式失败,无部分结果
// ==========================================
#[test]
fn test_negative_capacity_fails_whole_run() {
    let api = AllocationApi::new();

    let direct = vec![raw_direct(1, Some("DEL-BOM"), Some(10.0), 60.0, -5.0)];

    let result = api.run_allocation(&direct, &[]);

    assert!(matches!(
        result,
        Err(ApiError::Solve(SolveError::Infeasible(_)))
    ));
}

// ==========================================
// 测试5: 同输入重跑,总利润幂等
// ==========================================
// 多最优顶点下逐路径配载可能不同,按等价类断言目标值
#[test]
fn test_rerun_is_idempotent_on_total_profit() {
    let api = AllocationApi::new();

    let direct = vec![
        raw_direct(1, Some("DEL-BOM"), Some(10.0), 60.0, 50.0),
        raw_direct(2, Some("BOM-MAA"), Some(6.0), 80.0, 90.0),
    ];
    let indirect = vec![raw_indirect(1, "DEL-MAA", 20.0, 30.0, "DEL-BOM", 50.0, "BOM-MAA", 60.0)];

    let first = api.run_allocation(&direct, &indirect).unwrap();
    let second = api.run_allocation(&direct, &indirect).unwrap();

    assert_eq!(first.total_profit, second.total_profit);
    assert_ne!(first.run_id, second.run_id); // 运行标识每次新生成
}

// ==========================================
// 测试6: 空输入 → 空响应而非失败
// ==========================================
#[test]
fn test_empty_input_yields_empty_response() {
    let api = AllocationApi::new();

    let response = api.run_allocation(&[], &[]).unwrap();

    assert!(response.od_allocations.is_empty());
    assert!(response.leg_contributions.is_empty());
    assert_eq!(response.total_profit, 0.0);
    assert_eq!(response.ingest.summary.total_rows, 0);
}

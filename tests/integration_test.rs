//! 集成測試

use chrono::{Days, NaiveDate};
use mrp_planning::*;
use rust_decimal::Decimal;

fn day0() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()
}

fn item(code: &str, category: ItemCategory) -> Item {
    Item::new(code, format!("{code} 名稱")).with_category(category)
}

/// 製品 PROD-A001 的 BOM：
///
/// PROD-A001 → SEMI-A001 (1) → PART-001 (2)
///                           → MAT-001 (0.5)
///           → PART-002 (4)
fn sample_engine() -> PlanningEngine<InMemoryItemRepository, InMemoryStructureRepository, InMemoryStockRepository>
{
    let items: InMemoryItemRepository = vec![
        item("PROD-A001", ItemCategory::Product).with_safety_stock(Decimal::from(5)),
        item("SEMI-A001", ItemCategory::SemiProduct).with_lead_time(2),
        item("PART-001", ItemCategory::Part)
            .with_safety_stock(Decimal::from(100))
            .with_min_lot_size(Decimal::from(50))
            .with_lot_increment(Decimal::from(25))
            .with_lead_time(7)
            .with_safety_lead_time(3),
        item("PART-002", ItemCategory::Part),
        item("MAT-001", ItemCategory::Material).with_safety_stock(Decimal::from(30)),
    ]
    .into_iter()
    .collect();

    let structures: InMemoryStructureRepository = vec![
        StructureLink::new("PROD-A001", "SEMI-A001", Decimal::ONE).with_sequence(10),
        StructureLink::new("PROD-A001", "PART-002", Decimal::from(4)).with_sequence(20),
        StructureLink::new("SEMI-A001", "PART-001", Decimal::from(2)).with_sequence(10),
        StructureLink::new("SEMI-A001", "MAT-001", Decimal::new(5, 1)).with_sequence(20),
    ]
    .into_iter()
    .collect();

    let stock: InMemoryStockRepository = vec![
        StockSnapshot::new("PART-001", "WH-01", Decimal::from(20)),
        StockSnapshot::new("PART-001", "WH-02", Decimal::from(10)),
        StockSnapshot::new("MAT-001", "WH-01", Decimal::from(45)),
        StockSnapshot::new("PROD-A001", "WH-01", Decimal::from(2)),
    ]
    .into_iter()
    .collect();

    PlanningEngine::new(items, structures, stock)
}

#[test]
fn test_concrete_netting_scenario() {
    let items: InMemoryItemRepository = vec![item("X", ItemCategory::Part)
        .with_safety_stock(Decimal::from(100))
        .with_min_lot_size(Decimal::from(20))
        .with_lot_increment(Decimal::from(15))
        .with_lead_time(5)]
    .into_iter()
    .collect();
    let stock: InMemoryStockRepository = vec![StockSnapshot::new("X", "WH-01", Decimal::from(40))]
        .into_iter()
        .collect();
    let engine = PlanningEngine::new(items, InMemoryStructureRepository::new(), stock);

    let result = engine.run_planning(day0(), day0() + Days::new(30)).unwrap();

    assert_eq!(result.planned_orders.len(), 1);
    let order = &result.planned_orders[0];
    assert_eq!(order.quantity, Decimal::from(65));
    assert_eq!(order.order_type, PlannedOrderType::Purchase);
    assert_eq!(order.due_date, day0() + Days::new(5));

    let shortage = &result.shortage_items[0];
    assert_eq!(shortage.shortage_quantity, Decimal::from(60));
    assert_eq!(shortage.recommended_order_date, day0() - Days::new(5));
}

#[test]
fn test_multi_level_explosion() {
    let engine = sample_engine();
    let lines = engine.explode("PROD-A001", Decimal::from(10)).unwrap();

    let summary: Vec<_> = lines
        .iter()
        .map(|l| (l.level, l.item_code.as_str(), l.required_quantity))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, "SEMI-A001", Decimal::from(10)),
            (2, "PART-001", Decimal::from(20)),
            (2, "MAT-001", Decimal::from(5)),
            (1, "PART-002", Decimal::from(40)),
        ]
    );
    assert_eq!(lines[1].item_name, "PART-001 名稱");
}

#[test]
fn test_explosion_is_deterministic() {
    let engine = sample_engine();
    let first = engine.explode("PROD-A001", Decimal::from(3)).unwrap();
    let second = engine.explode("PROD-A001", Decimal::from(3)).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_explosion_errors() {
    let engine = sample_engine();

    assert!(matches!(
        engine.explode("NOPE", Decimal::ONE),
        Err(MrpError::ItemNotFound(_))
    ));
    assert!(matches!(
        engine.explode("PROD-A001", Decimal::ZERO),
        Err(MrpError::InvalidQuantity(_))
    ));
}

#[test]
fn test_cycle_is_reported_not_looped() {
    let items: InMemoryItemRepository = vec![item("A", ItemCategory::Product), item("B", ItemCategory::Part)]
        .into_iter()
        .collect();
    let structures: InMemoryStructureRepository = vec![
        StructureLink::new("A", "B", Decimal::ONE),
        StructureLink::new("B", "A", Decimal::ONE),
    ]
    .into_iter()
    .collect();
    let engine = PlanningEngine::new(items, structures, InMemoryStockRepository::new());

    match engine.explode("A", Decimal::ONE) {
        Err(MrpError::CyclicStructure { item_code, path }) => {
            assert_eq!(item_code, "A");
            assert_eq!(path, vec!["A", "B", "A"]);
        }
        other => panic!("expected cycle error, got {other:?}"),
    }
    assert!(matches!(engine.implode("A"), Err(MrpError::CyclicStructure { .. })));
}

#[test]
fn test_where_used() {
    let engine = sample_engine();

    let parents: Vec<_> = engine
        .where_used("PART-001")
        .unwrap()
        .into_iter()
        .map(|i| i.item_code)
        .collect();
    assert_eq!(parents, vec!["SEMI-A001"]);

    assert!(engine.where_used("PROD-A001").unwrap().is_empty());
    assert!(matches!(engine.where_used("NOPE"), Err(MrpError::ItemNotFound(_))));

    let links = engine.where_used_links("MAT-001").unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].quantity_per(), Some(Decimal::new(5, 1)));
}

#[test]
fn test_where_used_ignores_malformed_sibling_link() {
    let items: InMemoryItemRepository = vec![
        item("PROD-A001", ItemCategory::Product),
        item("PROD-B001", ItemCategory::Product),
        item("PART-001", ItemCategory::Part),
    ]
    .into_iter()
    .collect();
    let structures: InMemoryStructureRepository = vec![
        StructureLink::new("PROD-B001", "PART-001", Decimal::ONE).with_base_quantity(Decimal::ZERO),
        StructureLink::new("PROD-A001", "PART-001", Decimal::from(2)),
    ]
    .into_iter()
    .collect();
    let engine = PlanningEngine::new(items, structures, InMemoryStockRepository::new());

    let parents: Vec<_> = engine
        .where_used("PART-001")
        .unwrap()
        .into_iter()
        .map(|i| i.item_code)
        .collect();
    assert_eq!(parents, vec!["PROD-A001"]);

    let links = engine.where_used_links("PART-001").unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].parent_item_code, "PROD-A001");
}

#[test]
fn test_implode_reaches_top_level() {
    let engine = sample_engine();
    let lines = engine.implode("MAT-001").unwrap();

    let chain: Vec<_> = lines.iter().map(|l| (l.level, l.item_code.as_str())).collect();
    assert_eq!(chain, vec![(1, "SEMI-A001"), (2, "PROD-A001")]);
}

#[test]
fn test_run_planning_gates_and_sorts() {
    let engine = sample_engine();
    let result = engine.run_planning(day0(), day0() + Days::new(30)).unwrap();

    let codes: Vec<_> = result.planned_orders.iter().map(|o| o.item_code.as_str()).collect();
    // MAT-001 庫存 45 ≥ 安全庫存 30；SEMI-A001、PART-002 無安全庫存
    assert_eq!(codes, vec!["PART-001", "PROD-A001"]);

    let shortage_codes: Vec<_> = result.shortage_items.iter().map(|s| s.item_code.as_str()).collect();
    assert_eq!(shortage_codes, codes);

    // 100 - 30 = 70 → 50 + 25
    let part = result.planned_order("PART-001").unwrap();
    assert_eq!(part.quantity, Decimal::from(75));
    assert_eq!(part.release_date(), day0() + Days::new(7) - Days::new(10));
    assert_eq!(
        result.shortage_item("PART-001").unwrap().recommended_order_date,
        day0() - Days::new(10)
    );

    let product = result.planned_order("PROD-A001").unwrap();
    assert_eq!(product.order_type, PlannedOrderType::Manufacturing);
    assert_eq!(product.quantity, Decimal::from(3));
}

#[test]
fn test_serial_and_parallel_planning_agree() {
    let parallel = sample_engine().run_planning(day0(), day0()).unwrap();
    let serial = sample_engine()
        .with_config(PlanningConfig::new().with_parallel(false))
        .run_planning(day0(), day0())
        .unwrap();

    assert_eq!(parallel.planned_orders, serial.planned_orders);
    assert_eq!(parallel.shortage_items, serial.shortage_items);
}

#[test]
fn test_depth_limit_from_config() {
    let engine = sample_engine().with_config(PlanningConfig::new().with_max_explosion_depth(1));
    assert!(matches!(
        engine.explode("PROD-A001", Decimal::ONE),
        Err(MrpError::ExplosionDepthExceeded { max_depth: 1, .. })
    ));
}

struct UnavailableStructures;

impl StructureProvider for UnavailableStructures {
    fn find_by_parent(&self, _parent_item_code: &str) -> anyhow::Result<Vec<StructureLink>> {
        Err(anyhow::anyhow!("structure store unavailable"))
    }

    fn find_by_child(&self, _child_item_code: &str) -> anyhow::Result<Vec<StructureLink>> {
        Err(anyhow::anyhow!("structure store unavailable"))
    }
}

#[test]
fn test_provider_failure_propagates_unchanged() {
    let items: InMemoryItemRepository = vec![item("A", ItemCategory::Product)].into_iter().collect();
    let engine = PlanningEngine::new(items, UnavailableStructures, InMemoryStockRepository::new());

    let err = engine.explode("A", Decimal::ONE).unwrap_err();
    assert!(matches!(err, MrpError::DataAccess(_)));
    assert_eq!(err.to_string(), "structure store unavailable");

    assert!(matches!(engine.where_used("A"), Err(MrpError::DataAccess(_))));
}

#[test]
fn test_planning_result_json() {
    let result = sample_engine().run_planning(day0(), day0() + Days::new(30)).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["horizon_end"], "2025-12-01");
    assert_eq!(json["planned_orders"][0]["item_code"], "PART-001");
    assert_eq!(json["planned_orders"][1]["order_type"], "MANUFACTURING");
    assert_eq!(json["shortage_items"][0]["shortage_quantity"], "70");
}

//! 精密シャフト / ギアボックス 計劃範例
//!
//! 展示 BOM 正展開、使用先照會與淨需求計劃執行

use chrono::{Days, NaiveDate};
use mrp_planning::logging::init_tracing;
use mrp_planning::*;
use rust_decimal::Decimal;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    println!("===== MRP Planning Example =====\n");

    let engine = PlanningEngine::new(create_items(), create_bom()?, create_stock())
        .with_config(PlanningConfig::from_json(r#"{ "worker_threads": 2 }"#)?);

    // 步驟 1: 正展開
    println!("[1] Explode PROD-B001 x 10");
    for line in engine.explode("PROD-B001", Decimal::from(10))? {
        println!(
            "    {}{} {} × {} = {}",
            "  ".repeat(line.level as usize),
            line.item_code,
            line.item_name,
            line.quantity_per,
            line.required_quantity
        );
    }

    // 步驟 2: 使用先照會
    println!("\n[2] Where used: PART-001");
    for parent in engine.where_used("PART-001")? {
        println!("    {} {}", parent.item_code, parent.item_name);
    }

    // 步驟 3: 計劃執行
    let start = NaiveDate::from_ymd_opt(2025, 11, 1).ok_or("invalid date")?;
    let end = start + Days::new(30);
    println!("\n[3] Run planning {} ~ {}", start, end);
    let result = engine.run_planning(start, end)?;

    for order in &result.planned_orders {
        println!(
            "    {:<10} {:?} qty={} release={} due={}",
            order.item_code,
            order.order_type,
            order.quantity,
            order.release_date(),
            order.due_date
        );
    }
    for warning in &result.warnings {
        println!("    [{:?}] {} {}", warning.severity, warning.item_code, warning.message);
    }

    println!("\n[4] Result JSON");
    println!("{}", serde_json::to_string_pretty(&result.shortage_items)?);

    Ok(())
}

fn create_items() -> InMemoryItemRepository {
    let item = |code: &str, name: &str, category: ItemCategory, lead_time: u32, safety_stock: i64| {
        Item::new(code, name)
            .with_category(category)
            .with_lead_time(lead_time)
            .with_safety_stock(Decimal::from(safety_stock))
    };

    vec![
        item("PROD-A001", "精密シャフトA", ItemCategory::Product, 7, 100),
        item("PROD-B001", "ギアボックスアセンブリ", ItemCategory::Product, 14, 50),
        item("SEMI-A001", "加工済みシャフト", ItemCategory::SemiProduct, 5, 120),
        item("SEMI-B001", "ギアボックス本体", ItemCategory::SemiProduct, 7, 60),
        item("PART-001", "ベアリング 6205", ItemCategory::Part, 7, 100)
            .with_safety_lead_time(2)
            .with_min_lot_size(Decimal::from(50))
            .with_lot_increment(Decimal::from(25)),
        item("PART-002", "オイルシール φ20", ItemCategory::Part, 7, 100),
        item("MAT-001", "丸棒材 SUS304 φ20", ItemCategory::Material, 14, 500)
            .with_min_lot_size(Decimal::from(100))
            .with_lot_increment(Decimal::from(50)),
        item("MAT-002", "アルミダイキャスト素材", ItemCategory::Material, 21, 100),
        item("MAT-010", "包装材セット", ItemCategory::Material, 3, 500),
    ]
    .into_iter()
    .collect()
}

fn create_bom() -> Result<InMemoryStructureRepository> {
    let link = |parent: &str, child: &str, qty: Decimal, seq: u32| {
        StructureLink::new(parent, child, qty).with_sequence(seq)
    };

    let links = vec![
        link("PROD-A001", "SEMI-A001", Decimal::ONE, 1),
        link("PROD-A001", "PART-001", Decimal::ONE, 2),
        link("PROD-A001", "PART-002", Decimal::ONE, 3),
        link("PROD-A001", "MAT-010", Decimal::ONE, 4),
        link("SEMI-A001", "MAT-001", Decimal::new(5, 1), 1),
        link("PROD-B001", "SEMI-B001", Decimal::ONE, 1),
        link("PROD-B001", "PART-001", Decimal::from(2), 5),
        link("PROD-B001", "MAT-010", Decimal::ONE, 8),
        link("SEMI-B001", "MAT-002", Decimal::ONE, 1),
    ];

    // 載入前先檢查循環
    StructureGraph::from_links(links.clone())?.topological_order()?;
    Ok(links.into_iter().collect())
}

fn create_stock() -> InMemoryStockRepository {
    vec![
        StockSnapshot::new("PROD-A001", "WH-01", Decimal::from(60)),
        StockSnapshot::new("PART-001", "WH-01", Decimal::from(30)),
        StockSnapshot::new("PART-001", "WH-02", Decimal::from(12)),
        StockSnapshot::new("MAT-001", "WH-01", Decimal::from(180)),
        StockSnapshot::new("MAT-010", "WH-03", Decimal::from(800)),
    ]
    .into_iter()
    .collect()
}

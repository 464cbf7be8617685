//! 性質測試

use mrp_planning::*;
use mrp_calc::LotSizingCalculator;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn decimal_from_cents(cents: u32) -> Decimal {
    Decimal::new(i64::from(cents), 2)
}

proptest! {
    /// 訂購量 ≥ 不足量，且為 最小批量 + k × 增量 中的最小值
    #[test]
    fn lot_size_rounding_law(
        shortage in 1u32..1_000_000,
        min_lot in 1u32..100_000,
        increment in 1u32..100_000,
    ) {
        let s = decimal_from_cents(shortage);
        let m = decimal_from_cents(min_lot);
        let i = decimal_from_cents(increment);

        let q = LotSizingCalculator::order_quantity(s, m, i).unwrap();

        prop_assert!(q >= s);
        prop_assert!(q == m || ((q - m) % i).is_zero());
        if q > m {
            prop_assert!(q - i < s);
        }
    }

    /// 鏈狀 BOM：數量加倍時每行需求加倍，且結果穩定
    #[test]
    fn explosion_scales_linearly(
        ratios in prop::collection::vec(1u32..500, 1..8),
        quantity in 1u32..10_000,
    ) {
        let codes: Vec<String> = (0..=ratios.len()).map(|n| format!("N{n:02}")).collect();
        let items: InMemoryItemRepository = codes.iter().map(|c| Item::new(c.as_str(), c.as_str())).collect();
        let links = ratios.iter().enumerate().map(|(n, r)| {
            StructureLink::new(codes[n].as_str(), codes[n + 1].as_str(), decimal_from_cents(*r))
        });
        let graph = StructureGraph::from_links(links).unwrap();
        let engine = BomExplosionEngine::new(&graph, &items);

        let q = Decimal::from(quantity);
        let single = engine.explode("N00", q).unwrap();
        let double = engine.explode("N00", q * Decimal::from(2)).unwrap();
        let again = engine.explode("N00", q).unwrap();

        prop_assert_eq!(single.len(), ratios.len());
        prop_assert_eq!(&single, &again);
        for (a, b) in single.iter().zip(double.iter()) {
            prop_assert_eq!(a.level, b.level);
            prop_assert_eq!(&a.item_code, &b.item_code);
            prop_assert_eq!(a.required_quantity * Decimal::from(2), b.required_quantity);
        }
    }

    /// 基準數量為 2 與 5 的冪次時需求量可精確表示，加倍關係同樣嚴格成立
    #[test]
    fn explosion_scales_linearly_with_base_quantities(
        links in prop::collection::vec(
            (1u32..500, prop::sample::select(vec![1u32, 2, 4, 5, 8])),
            1..=4,
        ),
        quantity in 1u32..1_000,
    ) {
        let codes: Vec<String> = (0..=links.len()).map(|n| format!("N{n:02}")).collect();
        let items: InMemoryItemRepository = codes.iter().map(|c| Item::new(c.as_str(), c.as_str())).collect();
        let structure = links.iter().enumerate().map(|(n, (r, base))| {
            StructureLink::new(codes[n].as_str(), codes[n + 1].as_str(), decimal_from_cents(*r))
                .with_base_quantity(Decimal::from(*base))
        });
        let graph = StructureGraph::from_links(structure).unwrap();
        let engine = BomExplosionEngine::new(&graph, &items);

        let q = Decimal::from(quantity);
        let single = engine.explode("N00", q).unwrap();
        let double = engine.explode("N00", q * Decimal::from(2)).unwrap();

        prop_assert_eq!(single.len(), links.len());
        for (a, b) in single.iter().zip(double.iter()) {
            prop_assert_eq!(a.required_quantity * Decimal::from(2), b.required_quantity);
        }
    }

    /// 庫存 ≥ 安全庫存的品目不會出現在任何輸出中
    #[test]
    fn adequately_stocked_items_are_gated(
        safety_stock in 0u32..10_000,
        surplus in 0u32..10_000,
    ) {
        let item = Item::new("X", "x").with_safety_stock(Decimal::from(safety_stock));
        let on_hand = Decimal::from(safety_stock) + Decimal::from(surplus);
        let start = chrono::NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();

        let outcome = mrp_calc::NettingCalculator::net_item(&item, on_hand, start).unwrap();
        prop_assert!(outcome.is_none());
    }
}

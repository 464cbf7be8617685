//! 記憶體內資料來源（測試與示範用）

use std::collections::BTreeMap;

use crate::provider::{ItemProvider, StockProvider, StructureProvider};
use crate::{Item, StockSnapshot, StructureLink};

/// 記憶體內品目主檔（依品目代碼排序）
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: BTreeMap<String, Item>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 同代碼的品目會被覆蓋
    pub fn insert(&mut self, item: Item) {
        self.items.insert(item.item_code.clone(), item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Item> for InMemoryItemRepository {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut repository = Self::new();
        for item in iter {
            repository.insert(item);
        }
        repository
    }
}

impl ItemProvider for InMemoryItemRepository {
    fn find_all(&self) -> anyhow::Result<Vec<Item>> {
        Ok(self.items.values().cloned().collect())
    }

    fn find_by_code(&self, item_code: &str) -> anyhow::Result<Option<Item>> {
        Ok(self.items.get(item_code).cloned())
    }
}

/// 記憶體內 BOM（保留插入順序）
#[derive(Debug, Clone, Default)]
pub struct InMemoryStructureRepository {
    links: Vec<StructureLink>,
}

impl InMemoryStructureRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, link: StructureLink) {
        self.links.push(link);
    }

    pub fn links(&self) -> &[StructureLink] {
        &self.links
    }
}

impl FromIterator<StructureLink> for InMemoryStructureRepository {
    fn from_iter<I: IntoIterator<Item = StructureLink>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}

impl StructureProvider for InMemoryStructureRepository {
    fn find_by_parent(&self, parent_item_code: &str) -> anyhow::Result<Vec<StructureLink>> {
        Ok(self
            .links
            .iter()
            .filter(|l| l.parent_item_code == parent_item_code)
            .cloned()
            .collect())
    }

    fn find_by_child(&self, child_item_code: &str) -> anyhow::Result<Vec<StructureLink>> {
        Ok(self
            .links
            .iter()
            .filter(|l| l.child_item_code == child_item_code)
            .cloned()
            .collect())
    }
}

/// 記憶體內庫存
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockRepository {
    snapshots: Vec<StockSnapshot>,
}

impl InMemoryStockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, snapshot: StockSnapshot) {
        self.snapshots.push(snapshot);
    }
}

impl FromIterator<StockSnapshot> for InMemoryStockRepository {
    fn from_iter<I: IntoIterator<Item = StockSnapshot>>(iter: I) -> Self {
        Self {
            snapshots: iter.into_iter().collect(),
        }
    }
}

impl StockProvider for InMemoryStockRepository {
    fn find_all(&self) -> anyhow::Result<Vec<StockSnapshot>> {
        Ok(self.snapshots.clone())
    }
}

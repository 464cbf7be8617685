//! 外部資料來源介面
//!
//! 主檔、BOM 與庫存的儲存由外部負責；引擎只透過以下介面讀取快照。
//! 資料存取失敗以 `anyhow::Error` 返回，並由引擎原封不動地向上傳遞。

use crate::{Item, StockSnapshot, StructureLink};

/// 品目主檔來源
pub trait ItemProvider {
    /// 全部品目
    fn find_all(&self) -> anyhow::Result<Vec<Item>>;

    /// 依品目代碼查詢
    fn find_by_code(&self, item_code: &str) -> anyhow::Result<Option<Item>>;
}

/// BOM 來源
pub trait StructureProvider {
    /// 指定父件的全部子件連結
    fn find_by_parent(&self, parent_item_code: &str) -> anyhow::Result<Vec<StructureLink>>;

    /// 指定子件的全部父件連結
    fn find_by_child(&self, child_item_code: &str) -> anyhow::Result<Vec<StructureLink>>;
}

/// 庫存來源（未彙總）
pub trait StockProvider {
    fn find_all(&self) -> anyhow::Result<Vec<StockSnapshot>>;
}

impl<T: ItemProvider + ?Sized> ItemProvider for &T {
    fn find_all(&self) -> anyhow::Result<Vec<Item>> {
        (**self).find_all()
    }

    fn find_by_code(&self, item_code: &str) -> anyhow::Result<Option<Item>> {
        (**self).find_by_code(item_code)
    }
}

impl<T: StructureProvider + ?Sized> StructureProvider for &T {
    fn find_by_parent(&self, parent_item_code: &str) -> anyhow::Result<Vec<StructureLink>> {
        (**self).find_by_parent(parent_item_code)
    }

    fn find_by_child(&self, child_item_code: &str) -> anyhow::Result<Vec<StructureLink>> {
        (**self).find_by_child(child_item_code)
    }
}

impl<T: StockProvider + ?Sized> StockProvider for &T {
    fn find_all(&self) -> anyhow::Result<Vec<StockSnapshot>> {
        (**self).find_all()
    }
}

//! 部品構成圖

use chrono::NaiveDate;
use mrp_core::{MrpError, Result, StructureLink, StructureProvider};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// BOM 圖（記憶體內快照）
///
/// 同一父件下的子件依工順排列，工順相同時保留加入順序，
/// 因此相同輸入永遠得到相同的走訪順序。
#[derive(Debug, Clone, Default)]
pub struct StructureGraph {
    by_parent: BTreeMap<String, Vec<StructureLink>>,
    by_child: BTreeMap<String, Vec<StructureLink>>,
    link_count: usize,
}

impl StructureGraph {
    /// 創建空的 BOM 圖
    pub fn new() -> Self {
        Self::default()
    }

    /// 從連結清單建立
    pub fn from_links<I>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = StructureLink>,
    {
        let mut graph = Self::new();
        for link in links {
            graph.add_link(link)?;
        }
        Ok(graph)
    }

    /// 從連結清單建立，無效連結記錄警告後略過
    pub fn from_valid_links<I>(links: I) -> Self
    where
        I: IntoIterator<Item = StructureLink>,
    {
        let mut graph = Self::new();
        for link in links {
            if let Err(e) = graph.add_link(link) {
                tracing::warn!("略過無效 BOM 連結: {}", e);
            }
        }
        graph
    }

    /// 載入從根品目可到達的子圖（沿子件方向）
    pub fn load_reachable<P>(provider: &P, root_item_code: &str) -> Result<Self>
    where
        P: StructureProvider + ?Sized,
    {
        let mut graph = Self::new();
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::from([root_item_code.to_string()]);

        while let Some(code) = queue.pop_front() {
            if !visited.insert(code.clone()) {
                continue;
            }
            for link in provider.find_by_parent(&code)? {
                if !visited.contains(&link.child_item_code) {
                    queue.push_back(link.child_item_code.clone());
                }
                graph.add_link(link)?;
            }
        }

        tracing::debug!(
            "載入 BOM 子圖: 根 {}, 品目 {} 個, 連結 {} 筆",
            root_item_code,
            visited.len(),
            graph.link_count
        );
        Ok(graph)
    }

    /// 載入使用指定品目的全部上層結構（沿父件方向）
    pub fn load_users<P>(provider: &P, child_item_code: &str) -> Result<Self>
    where
        P: StructureProvider + ?Sized,
    {
        let mut graph = Self::new();
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::from([child_item_code.to_string()]);

        while let Some(code) = queue.pop_front() {
            if !visited.insert(code.clone()) {
                continue;
            }
            for link in provider.find_by_child(&code)? {
                if !visited.contains(&link.parent_item_code) {
                    queue.push_back(link.parent_item_code.clone());
                }
                graph.add_link(link)?;
            }
        }

        Ok(graph)
    }

    /// 加入連結（用量必須大於 0）
    pub fn add_link(&mut self, link: StructureLink) -> Result<()> {
        let invalid = |reason: &str| MrpError::InvalidStructureLink {
            parent: link.parent_item_code.clone(),
            child: link.child_item_code.clone(),
            reason: reason.to_string(),
        };

        if link.parent_item_code.is_empty() || link.child_item_code.is_empty() {
            return Err(invalid("品目代碼不可為空"));
        }
        match link.quantity_per() {
            Some(q) if q > Decimal::ZERO => {}
            _ => return Err(invalid("用量必須大於 0")),
        }

        let siblings = self.by_parent.entry(link.parent_item_code.clone()).or_default();
        let position = siblings.partition_point(|l| l.sequence <= link.sequence);
        siblings.insert(position, link.clone());

        let users = self.by_child.entry(link.child_item_code.clone()).or_default();
        let position = users.partition_point(|l| {
            (&l.parent_item_code, l.sequence) <= (&link.parent_item_code, link.sequence)
        });
        users.insert(position, link);

        self.link_count += 1;
        Ok(())
    }

    /// 指定父件的子件連結（依工順）
    pub fn children(&self, parent_item_code: &str) -> &[StructureLink] {
        self.by_parent
            .get(parent_item_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 指定日期有效的子件連結；`as_of` 為 `None` 時不過濾
    pub fn effective_children<'a>(
        &'a self,
        parent_item_code: &str,
        as_of: Option<NaiveDate>,
    ) -> impl Iterator<Item = &'a StructureLink> + 'a {
        self.children(parent_item_code)
            .iter()
            .filter(move |link| as_of.map_or(true, |date| link.is_effective_on(date)))
    }

    /// 指定子件的父件連結（依父件代碼、工順）
    pub fn parents(&self, child_item_code: &str) -> &[StructureLink] {
        self.by_child
            .get(child_item_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 是否為末端品目（無子件）
    pub fn is_leaf(&self, item_code: &str) -> bool {
        self.children(item_code).is_empty()
    }

    pub fn link_count(&self) -> usize {
        self.link_count
    }

    pub fn is_empty(&self) -> bool {
        self.link_count == 0
    }

    /// 圖中出現的全部品目代碼
    pub fn item_codes(&self) -> BTreeSet<&str> {
        self.by_parent
            .keys()
            .chain(self.by_child.keys())
            .map(String::as_str)
            .collect()
    }

    /// 拓撲排序：父件在前、末端品目在後
    ///
    /// 多層淨需求計算須依此順序處理，讓父件的相依需求先於子件確定。
    pub fn topological_order(&self) -> Result<Vec<String>> {
        let codes = self.item_codes();
        let mut in_degree: BTreeMap<&str, usize> = codes.iter().map(|&c| (c, 0)).collect();
        for links in self.by_parent.values() {
            for link in links {
                if let Some(degree) = in_degree.get_mut(link.child_item_code.as_str()) {
                    *degree += 1;
                }
            }
        }

        let mut ready: BTreeSet<&str> = in_degree
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(c, _)| *c)
            .collect();
        let mut order = Vec::with_capacity(codes.len());

        while let Some(code) = ready.pop_first() {
            order.push(code.to_string());
            for link in self.children(code) {
                if let Some(degree) = in_degree.get_mut(link.child_item_code.as_str()) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(link.child_item_code.as_str());
                    }
                }
            }
        }

        if order.len() < codes.len() {
            let remaining: BTreeSet<&str> = in_degree
                .iter()
                .filter(|(_, d)| **d > 0)
                .map(|(c, _)| *c)
                .collect();
            return Err(self.cycle_error(&remaining));
        }

        Ok(order)
    }

    /// 從未能排序的品目中找出一條實際的循環
    ///
    /// 剩餘品目都至少有一個同樣剩餘的父件，沿父件回溯必然回到走過的品目。
    fn cycle_error(&self, remaining: &BTreeSet<&str>) -> MrpError {
        let Some(&start) = remaining.first() else {
            return MrpError::CalculationError("拓撲排序失敗".to_string());
        };

        let mut walk: Vec<&str> = vec![start];
        let mut current = start;
        loop {
            let parent = self
                .parents(current)
                .iter()
                .map(|l| l.parent_item_code.as_str())
                .find(|p| remaining.contains(p));
            let Some(parent) = parent else {
                break;
            };
            if let Some(pos) = walk.iter().position(|&c| c == parent) {
                // walk 是由子往父記錄，反轉為父 → 子
                let mut cycle = vec![parent.to_string()];
                cycle.extend(walk[pos..].iter().rev().map(|c| c.to_string()));
                return MrpError::CyclicStructure {
                    item_code: parent.to_string(),
                    path: cycle,
                };
            }
            walk.push(parent);
            current = parent;
        }

        MrpError::CyclicStructure {
            item_code: start.to_string(),
            path: remaining.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl StructureProvider for StructureGraph {
    fn find_by_parent(&self, parent_item_code: &str) -> anyhow::Result<Vec<StructureLink>> {
        Ok(self.children(parent_item_code).to_vec())
    }

    fn find_by_child(&self, child_item_code: &str) -> anyhow::Result<Vec<StructureLink>> {
        Ok(self.parents(child_item_code).to_vec())
    }
}

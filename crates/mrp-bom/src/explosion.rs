//! BOM 正展開 / 逆展開

use chrono::NaiveDate;
use mrp_core::config::DEFAULT_MAX_EXPLOSION_DEPTH;
use mrp_core::{
    ExplosionLine, ImplosionLine, Item, ItemProvider, MrpError, PlanningContext, Result,
    StructureLink,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::graph::StructureGraph;

/// BOM 展開引擎
///
/// 以明確的堆疊走訪 BOM 圖，並保存從根到目前節點的祖先路徑；
/// 即將走訪的品目若已在路徑上，立即以 `CyclicStructure` 中止。
pub struct BomExplosionEngine<'a, I: ?Sized> {
    graph: &'a StructureGraph,
    items: &'a I,
    max_depth: usize,
    context: PlanningContext,
}

/// 正展開堆疊中的一層
///
/// 需求量以 `numerator / denominator` 累積：分子為根數量乘上沿途的必要數量，
/// 分母為沿途基準數量的乘積。每行只做一次除法，避免逐層捨入誤差累積。
struct ExplodeFrame<'g> {
    links: Vec<&'g StructureLink>,
    next: usize,
    numerator: Decimal,
    denominator: Decimal,
    quantity: Decimal,
    level: u32,
}

/// 逆展開堆疊中的一層
struct UsageFrame<'g> {
    links: Vec<&'g StructureLink>,
    next: usize,
    level: u32,
}

impl<'a, I> BomExplosionEngine<'a, I>
where
    I: ItemProvider + ?Sized,
{
    /// 創建新的展開引擎
    pub fn new(graph: &'a StructureGraph, items: &'a I) -> Self {
        Self {
            graph,
            items,
            max_depth: DEFAULT_MAX_EXPLOSION_DEPTH,
            context: PlanningContext::new(),
        }
    }

    /// 建構器模式：設置最大展開層級
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 建構器模式：設置取消/期限上下文
    pub fn with_context(mut self, context: PlanningContext) -> Self {
        self.context = context;
        self
    }

    /// 正展開（不過濾有效期間）
    pub fn explode(&self, root_item_code: &str, quantity: Decimal) -> Result<Vec<ExplosionLine>> {
        self.explode_as_of(root_item_code, quantity, None)
    }

    /// 正展開：計算根品目 `quantity` 個所需的全部下層品目
    ///
    /// 輸出為深度優先順序，子件依工順走訪；相同輸入得到相同輸出。
    pub fn explode_as_of(
        &self,
        root_item_code: &str,
        quantity: Decimal,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<ExplosionLine>> {
        if quantity <= Decimal::ZERO {
            return Err(MrpError::InvalidQuantity(quantity));
        }
        self.require_item(root_item_code)?;

        tracing::debug!(
            "BOM 展開開始: {} × {} (基準日: {:?})",
            root_item_code,
            quantity,
            as_of
        );

        let mut names = NameCache::default();
        let mut lines = Vec::new();
        let mut path = vec![root_item_code.to_string()];
        let mut stack = vec![ExplodeFrame {
            links: self.graph.effective_children(root_item_code, as_of).collect(),
            next: 0,
            numerator: quantity,
            denominator: Decimal::ONE,
            quantity,
            level: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            self.context.check()?;

            let Some(&link) = frame.links.get(frame.next) else {
                stack.pop();
                path.pop();
                continue;
            };
            frame.next += 1;
            let (numerator, denominator) = (frame.numerator, frame.denominator);
            let parent_quantity = frame.quantity;
            let level = frame.level + 1;

            let child = link.child_item_code.as_str();
            if path.iter().any(|ancestor| ancestor == child) {
                let mut cycle = path.clone();
                cycle.push(child.to_string());
                tracing::warn!("BOM 循環參照: {}", cycle.join(" → "));
                return Err(MrpError::CyclicStructure {
                    item_code: child.to_string(),
                    path: cycle,
                });
            }
            if level as usize > self.max_depth {
                return Err(MrpError::ExplosionDepthExceeded {
                    item_code: child.to_string(),
                    max_depth: self.max_depth,
                });
            }

            let quantity_per = link_ratio(link)?;
            // 分子或分母溢位時，改由父件需求量重新起算
            let (numerator, denominator, required_quantity) =
                scaled_requirement(numerator, denominator, link)
                    .or_else(|| scaled_requirement(parent_quantity, Decimal::ONE, link))
                    .ok_or_else(|| {
                        MrpError::CalculationError(format!(
                            "需求數量溢位: {} × {} ({})",
                            parent_quantity, quantity_per, child
                        ))
                    })?;

            lines.push(ExplosionLine {
                level,
                parent_item_code: link.parent_item_code.clone(),
                item_code: child.to_string(),
                item_name: names.get(self.items, child)?,
                sequence: link.sequence,
                quantity_per,
                required_quantity,
            });

            path.push(child.to_string());
            stack.push(ExplodeFrame {
                links: self.graph.effective_children(child, as_of).collect(),
                next: 0,
                numerator,
                denominator,
                quantity: required_quantity,
                level,
            });
        }

        tracing::debug!("BOM 展開完成: {} 共 {} 筆", root_item_code, lines.len());
        Ok(lines)
    }

    /// 使用先照會（單層）：直接使用該品目的父件
    ///
    /// 品目存在但無父件時返回空清單。
    pub fn where_used(&self, child_item_code: &str) -> Result<Vec<Item>> {
        self.require_item(child_item_code)?;

        let parent_codes: BTreeSet<&str> = self
            .graph
            .parents(child_item_code)
            .iter()
            .map(|l| l.parent_item_code.as_str())
            .collect();

        let mut parents = Vec::with_capacity(parent_codes.len());
        for code in parent_codes {
            match self.items.find_by_code(code)? {
                Some(item) => parents.push(item),
                None => tracing::warn!("使用先 {} 不在品目主檔中，略過", code),
            }
        }
        Ok(parents)
    }

    /// 使用先照會（單層）：返回原始 BOM 連結
    pub fn where_used_links(&self, child_item_code: &str) -> Result<Vec<StructureLink>> {
        self.require_item(child_item_code)?;
        Ok(self.graph.parents(child_item_code).to_vec())
    }

    /// 多層逆展開：所有直接或間接使用該品目的父件
    pub fn implode(&self, child_item_code: &str) -> Result<Vec<ImplosionLine>> {
        self.require_item(child_item_code)?;

        let mut names = NameCache::default();
        let mut lines = Vec::new();
        let mut path = vec![child_item_code.to_string()];
        let mut stack = vec![UsageFrame {
            links: self.graph.parents(child_item_code).iter().collect(),
            next: 0,
            level: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            self.context.check()?;

            let Some(&link) = frame.links.get(frame.next) else {
                stack.pop();
                path.pop();
                continue;
            };
            frame.next += 1;
            let level = frame.level + 1;

            let parent = link.parent_item_code.as_str();
            if path.iter().any(|descendant| descendant == parent) {
                let mut cycle = path.clone();
                cycle.push(parent.to_string());
                return Err(MrpError::CyclicStructure {
                    item_code: parent.to_string(),
                    path: cycle,
                });
            }
            if level as usize > self.max_depth {
                return Err(MrpError::ExplosionDepthExceeded {
                    item_code: parent.to_string(),
                    max_depth: self.max_depth,
                });
            }

            lines.push(ImplosionLine {
                level,
                child_item_code: link.child_item_code.clone(),
                item_code: parent.to_string(),
                item_name: names.get(self.items, parent)?,
                quantity_per: link_ratio(link)?,
            });

            path.push(parent.to_string());
            stack.push(UsageFrame {
                links: self.graph.parents(parent).iter().collect(),
                next: 0,
                level,
            });
        }

        Ok(lines)
    }

    fn require_item(&self, item_code: &str) -> Result<Item> {
        self.items
            .find_by_code(item_code)?
            .ok_or_else(|| MrpError::ItemNotFound(item_code.to_string()))
    }
}

/// 彙總展開結果：各品目跨層級的總需求
pub fn summarize_requirements(lines: &[ExplosionLine]) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for line in lines {
        *totals.entry(line.item_code.clone()).or_insert(Decimal::ZERO) += line.required_quantity;
    }
    totals
}

/// 乘入一條連結後的 (分子, 分母, 需求量)；任一步溢位時返回 `None`
fn scaled_requirement(
    numerator: Decimal,
    denominator: Decimal,
    link: &StructureLink,
) -> Option<(Decimal, Decimal, Decimal)> {
    let numerator = numerator.checked_mul(link.required_quantity)?;
    let denominator = denominator.checked_mul(link.base_quantity)?;
    let required = numerator.checked_div(denominator)?;
    Some((numerator, denominator, required))
}

fn link_ratio(link: &StructureLink) -> Result<Decimal> {
    link.quantity_per()
        .ok_or_else(|| MrpError::InvalidStructureLink {
            parent: link.parent_item_code.clone(),
            child: link.child_item_code.clone(),
            reason: "基準數量必須大於 0".to_string(),
        })
}

/// 單次展開內的品目名稱快取
#[derive(Default)]
struct NameCache {
    names: HashMap<String, String>,
}

impl NameCache {
    fn get<I: ItemProvider + ?Sized>(&mut self, items: &I, item_code: &str) -> Result<String> {
        if let Some(name) = self.names.get(item_code) {
            return Ok(name.clone());
        }
        let name = match items.find_by_code(item_code)? {
            Some(item) => item.item_name,
            None => {
                tracing::warn!("展開品目 {} 不在品目主檔中", item_code);
                String::new()
            }
        };
        self.names.insert(item_code.to_string(), name.clone());
        Ok(name)
    }
}

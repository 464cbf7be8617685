//! # MRP BOM Engine
//!
//! 部品構成圖、正展開與逆展開

pub mod explosion;
pub mod graph;

// Re-export 主要類型
pub use explosion::{summarize_requirements, BomExplosionEngine};
pub use graph::StructureGraph;

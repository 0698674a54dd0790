//! Fixed-depth hierarchical walk over the upstream.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::model::{ModelEntry, Node, SeedNode, TreeEntry};
use crate::request::{Fetcher, Level, Transport};
use crate::{info_time, warn_time};

/// Shape of one tree below its seeds.
#[async_trait]
pub trait Hierarchy: Send + Sync {
    type Child: Serialize + Send;

    /// Level requested for each seed.
    fn root_level(&self) -> Level;

    fn label(&self) -> &'static str;

    /// Turns the first-level nodes of one seed into its children, fetching deeper levels if any.
    async fn expand<T: Transport>(&self, fetcher: &Fetcher<T>, nodes: Vec<Value>) -> Vec<Self::Child>;
}

/// Province -> districts and wards, kept as the upstream sent them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Administrative;

#[async_trait]
impl Hierarchy for Administrative {
    type Child = Value;

    fn root_level(&self) -> Level {
        Level::District
    }

    fn label(&self) -> &'static str {
        "province"
    }

    async fn expand<T: Transport>(&self, _fetcher: &Fetcher<T>, nodes: Vec<Value>) -> Vec<Value> {
        nodes
    }
}

/// Brand -> model -> {body styles, years}.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vehicle;

#[async_trait]
impl Hierarchy for Vehicle {
    type Child = ModelEntry;

    fn root_level(&self) -> Level {
        Level::CarModel
    }

    fn label(&self) -> &'static str {
        "brand"
    }

    async fn expand<T: Transport>(&self, fetcher: &Fetcher<T>, nodes: Vec<Value>) -> Vec<ModelEntry> {
        let mut models = Vec::with_capacity(nodes.len());
        for value in nodes {
            let Some(node) = Node::from_value(&value) else {
                warn_time!("Skipping model of unexpected shape: {}", value);
                continue;
            };

            let mut model = ModelEntry::new(node);
            if let Some(id) = model.model_id.as_deref() {
                info_time!("  model: {}", model.model_name.as_deref().unwrap_or(id));
                model.body_styles = fetcher.children(id, Level::CarBodyStyles).await;
                model.years = fetcher.children(id, Level::CarModelYear).await;
            }
            models.push(model);
        }
        models
    }
}

/// Walks every seed in order and returns exactly one entry per seed.
///
/// A failed or empty branch yields an entry with no children; it never stops the walk.
pub async fn aggregate<H, T>(
    fetcher: &Fetcher<T>,
    hierarchy: &H,
    seeds: &[SeedNode],
) -> Vec<TreeEntry<H::Child>>
where
    H: Hierarchy,
    T: Transport,
{
    let mut tree = Vec::with_capacity(seeds.len());
    for (idx, seed) in seeds.iter().enumerate() {
        info_time!(
            "[{}/{}] {}: {}",
            idx + 1,
            seeds.len(),
            hierarchy.label(),
            seed.name
        );

        let nodes = fetcher.children(&seed.value, hierarchy.root_level()).await;
        let mut entry = TreeEntry::empty(seed);
        entry.children = hierarchy.expand(fetcher, nodes).await;
        tree.push(entry);
    }
    tree
}

//! Id-indexed arena over the blocks of one analysis job.

use super::{Block, BlockType};
use std::collections::HashMap;

/// The complete set of blocks for one analysis job.
///
/// Blocks keep the order the service emitted them in. Relationships stay as
/// id lists and are resolved through the index, so the graph never holds
/// references between blocks.
#[derive(Debug, Clone, Default)]
pub struct DocumentGraph {
    blocks: Vec<Block>,
    index: HashMap<String, usize>,
}

impl DocumentGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from blocks in service order.
    ///
    /// Ids are expected to be unique; if they are not, lookups return the
    /// first block carrying the id.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut index = HashMap::with_capacity(blocks.len());
        for (i, block) in blocks.iter().enumerate() {
            index.entry(block.id.clone()).or_insert(i);
        }
        if index.len() != blocks.len() {
            log::debug!(
                "DocumentGraph: {} duplicate block ids, first occurrence wins",
                blocks.len() - index.len()
            );
        }
        Self { blocks, index }
    }

    /// Look up a block by id.
    pub fn get(&self, id: &str) -> Option<&Block> {
        self.index.get(id).map(|&i| &self.blocks[i])
    }

    /// Check whether a block with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All blocks in service order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Iterate over blocks in service order.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Iterate over blocks of one type in service order.
    pub fn of_type(&self, block_type: BlockType) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(move |b| b.block_type == block_type)
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the graph has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Resolve the CHILD relationships of a block.
    ///
    /// Ids without a matching block are skipped.
    pub fn children<'a>(&'a self, block: &'a Block) -> impl Iterator<Item = &'a Block> + 'a {
        block.child_ids().filter_map(move |id| {
            let child = self.get(id);
            if child.is_none() {
                log::debug!("Block {}: skipping dangling child {}", block.id, id);
            }
            child
        })
    }

    /// Resolve the VALUE pairing of a key block.
    pub fn value_of(&self, block: &Block) -> Option<&Block> {
        let id = block.value_id()?;
        let value = self.get(id);
        if value.is_none() {
            log::debug!("Block {}: skipping dangling value {}", block.id, id);
        }
        value
    }

    /// Count relationship targets that do not resolve to any block.
    pub fn dangling_references(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| &b.relationships)
            .flat_map(|r| &r.ids)
            .filter(|id| !self.contains(id))
            .count()
    }

    /// Count blocks by type, in order of first appearance.
    pub fn type_counts(&self) -> Vec<(BlockType, usize)> {
        let mut counts: Vec<(BlockType, usize)> = Vec::new();
        for block in &self.blocks {
            match counts.iter_mut().find(|(t, _)| *t == block.block_type) {
                Some((_, n)) => *n += 1,
                None => counts.push((block.block_type, 1)),
            }
        }
        counts
    }

    /// Highest page number carried by any block (0 if none carry one).
    pub fn page_count(&self) -> u32 {
        self.blocks.iter().filter_map(|b| b.page).max().unwrap_or(0)
    }

    /// Consume the graph and return its blocks.
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl FromIterator<Block> for DocumentGraph {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self::from_blocks(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DocumentGraph {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

//! Block-graph reduction.
//!
//! Turns the flat block graph of one analysis job into three independent
//! outputs: LINE text in discovery order, key/value pairs in discovery order,
//! and one dense table per TABLE block. Incomplete graphs never fail; missing
//! references are skipped and missing text becomes an empty string.

mod grid;
mod options;
mod resolve;

pub use grid::SparseGrid;
pub use options::{Features, PageSelection, ReduceOptions, TextNormalization};
pub use resolve::{value_text, word_text};

use crate::model::{Block, BlockType, DocumentGraph, Extraction, FormEntry, Table};
use rayon::prelude::*;

/// Reduce a graph with default options.
pub fn reduce(graph: &DocumentGraph) -> Extraction {
    Reducer::default().reduce(graph)
}

/// Configurable block-graph reducer.
#[derive(Debug, Clone, Default)]
pub struct Reducer {
    options: ReduceOptions,
}

impl Reducer {
    /// Create a reducer with options.
    pub fn new(options: ReduceOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &ReduceOptions {
        &self.options
    }

    /// Reduce a graph into lines, forms, and tables.
    pub fn reduce(&self, graph: &DocumentGraph) -> Extraction {
        let features = self.options.features;
        let mut extraction = Extraction::new();
        let mut table_blocks = Vec::new();

        for block in graph.iter() {
            if !self.options.pages.includes_block_page(block.page) {
                continue;
            }
            match block.block_type {
                BlockType::Line if features.text => {
                    if let Some(ref text) = block.text {
                        extraction.lines.push(self.normalize(text.clone()));
                    }
                }
                BlockType::KeyValueSet if features.forms && block.is_key() => {
                    extraction.forms.push(self.form_entry(graph, block));
                }
                BlockType::Table if features.tables => table_blocks.push(block),
                _ => {}
            }
        }

        extraction.tables = if self.options.parallel {
            table_blocks
                .par_iter()
                .map(|block| self.table(graph, block))
                .collect()
        } else {
            table_blocks
                .iter()
                .map(|block| self.table(graph, block))
                .collect()
        };

        log::debug!(
            "Reducer: {} blocks -> {} lines, {} form entries, {} tables",
            graph.len(),
            extraction.lines.len(),
            extraction.forms.len(),
            extraction.tables.len()
        );

        extraction
    }

    fn form_entry(&self, graph: &DocumentGraph, key: &Block) -> FormEntry {
        FormEntry::new(
            self.normalize(word_text(graph, key)),
            self.normalize(value_text(graph, key)),
        )
    }

    fn table(&self, graph: &DocumentGraph, table: &Block) -> Table {
        let mut grid = SparseGrid::new();

        for cell in graph.children(table).filter(|b| b.is(BlockType::Cell)) {
            match (cell.row_index, cell.column_index) {
                (Some(row), Some(column)) => {
                    grid.insert(row, column, self.normalize(word_text(graph, cell)));
                }
                _ => log::warn!(
                    "Table {}: cell {} has no row/column index, skipping",
                    table.id,
                    cell.id
                ),
            }
        }

        grid.densify(&table.id, table.page)
    }

    fn normalize(&self, text: String) -> String {
        self.options.normalization.apply(text)
    }
}

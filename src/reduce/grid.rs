//! Sparse cell grid and densification.

use crate::model::{Table, TableRow};
use std::collections::{BTreeMap, BTreeSet};

/// Cells of one table keyed by source row, then source column.
///
/// The grid is ragged as built: rows only hold the columns that had a cell.
#[derive(Debug, Clone, Default)]
pub struct SparseGrid {
    cells: BTreeMap<u32, BTreeMap<u32, String>>,
}

impl SparseGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place text at a position. A later insert at the same position wins.
    pub fn insert(&mut self, row: u32, column: u32, text: String) {
        self.cells.entry(row).or_default().insert(column, text);
    }

    /// Number of placed cells.
    pub fn len(&self) -> usize {
        self.cells.values().map(BTreeMap::len).sum()
    }

    /// Check if no cell was placed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Fill the grid into a rectangle.
    ///
    /// Rows are the observed row indices ascending, columns the union of all
    /// observed column indices ascending. Gaps become empty strings.
    pub fn densify(self, source_id: &str, page: Option<u32>) -> Table {
        let columns: Vec<u32> = self
            .cells
            .values()
            .flat_map(|row| row.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut table = Table::new(source_id).on_page(page);
        table.column_indices = columns.clone();

        for (row_index, mut row) in self.cells {
            let cells = columns
                .iter()
                .map(|c| row.remove(c).unwrap_or_default())
                .collect();
            table.row_indices.push(row_index);
            table.add_row(TableRow::new(cells));
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_densify_fills_gap() {
        let mut grid = SparseGrid::new();
        grid.insert(1, 1, "A".to_string());
        grid.insert(1, 2, "B".to_string());
        grid.insert(2, 1, "C".to_string());

        let table = grid.densify("t", None);
        assert_eq!(
            table.to_grid(),
            vec![vec!["A", "B"], vec!["C", ""]]
        );
        assert_eq!(table.row_indices, vec![1, 2]);
        assert_eq!(table.column_indices, vec![1, 2]);
    }

    #[test]
    fn test_densify_orders_by_index() {
        let mut grid = SparseGrid::new();
        grid.insert(3, 2, "f".to_string());
        grid.insert(1, 5, "c".to_string());
        grid.insert(1, 2, "b".to_string());
        grid.insert(3, 1, "e".to_string());

        let table = grid.densify("t", Some(2));
        assert_eq!(table.column_indices, vec![1, 2, 5]);
        assert_eq!(table.row_indices, vec![1, 3]);
        assert_eq!(
            table.to_grid(),
            vec![vec!["", "b", "c"], vec!["e", "f", ""]]
        );
        assert_eq!(table.page, Some(2));
        assert!(table.is_rectangular());
    }

    #[test]
    fn test_insert_overwrites() {
        let mut grid = SparseGrid::new();
        grid.insert(1, 1, "old".to_string());
        grid.insert(1, 1, "new".to_string());
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.densify("t", None).cell(0, 0), Some("new"));
    }

    #[test]
    fn test_empty_grid() {
        let grid = SparseGrid::new();
        assert!(grid.is_empty());
        let table = grid.densify("t", None);
        assert!(table.is_empty());
        assert_eq!(table.source_id, "t");
    }
}

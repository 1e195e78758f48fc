use std::sync::Arc;

use ndarray::Array2;

/// A 2-D raster of cell values, shared across resolved inputs.
///
/// Cell data sits behind an [`Arc`], so cloning a `Grid` is O(1) and a
/// resolved value can own its payload without copying the raster. The data
/// itself is immutable once the grid is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Arc<Array2<f64>>,
}

impl Grid {
    /// Creates a grid with every cell set to `value`.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self::from_array(Array2::from_elem((rows, cols), value))
    }

    /// Wraps an existing array.
    #[must_use]
    pub fn from_array(cells: Array2<f64>) -> Self {
        Self {
            cells: Arc::new(cells),
        }
    }

    /// The `(rows, cols)` dimensions.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// The value at `(row, col)`, or `None` outside the raster.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get((row, col)).copied()
    }

    /// A view of the underlying array.
    #[must_use]
    pub fn as_array(&self) -> &Array2<f64> {
        &self.cells
    }

    /// Mean of all cell values; zero for an empty raster.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.cells.mean().unwrap_or(0.0)
    }
}

impl From<Array2<f64>> for Grid {
    fn from(cells: Array2<f64>) -> Self {
        Self::from_array(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn filled_grid_reports_shape_and_cells() {
        let grid = Grid::filled(2, 3, 1.5);

        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.get(1, 2), Some(1.5));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn mean_averages_all_cells() {
        let grid = Grid::from_array(array![[1.0, 2.0], [3.0, 6.0]]);
        assert_relative_eq!(grid.mean(), 3.0);
    }

    #[test]
    fn clones_share_the_same_cells() {
        let grid = Grid::filled(100, 100, 0.0);
        let copy = grid.clone();

        assert!(Arc::ptr_eq(&grid.cells, &copy.cells));
        assert_eq!(grid, copy);
    }
}

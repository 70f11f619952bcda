use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Footprint: the grid units one monitor covers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footprint {
    pub column: usize,
    pub row: usize,
    pub columns: usize,
    pub rows: usize,
}

impl Footprint {
    pub fn unit(column: usize, row: usize) -> Self {
        Self { column, row, columns: 1, rows: 1 }
    }

    pub fn new(column: usize, row: usize, columns: usize, rows: usize) -> Self {
        Self { column, row, columns, rows }
    }

    /// Number of grid units covered.
    pub fn units(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }

    pub fn is_clump(&self) -> bool {
        self.units() > 1
    }

    /// One past the last column covered, saturating.
    pub fn column_end(&self) -> usize {
        self.column.saturating_add(self.columns)
    }

    /// One past the last row covered, saturating.
    pub fn row_end(&self) -> usize {
        self.row.saturating_add(self.rows)
    }

    pub fn contains(&self, column: usize, row: usize) -> bool {
        column >= self.column && column < self.column_end() && row >= self.row && row < self.row_end()
    }

    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.column < other.column_end()
            && other.column < self.column_end()
            && self.row < other.row_end()
            && other.row < self.row_end()
    }

    pub fn fits(&self, width: usize, height: usize) -> bool {
        self.column_end() <= width && self.row_end() <= height
    }
}

// ---------------------------------------------------------------------------
// Cell: a footprint expressed as fractions of the whole array
// ---------------------------------------------------------------------------

/// One monitor's share of the array.
///
/// `position` is the center of the footprint and `size` its extent, both as
/// fractions of the array. `size` carries the monitor size factor, the center
/// does not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub footprint: Footprint,
    pub position: Vector2<f64>,
    pub size: Vector2<f64>,
}

impl Cell {
    pub fn from_footprint(
        footprint: Footprint,
        array_width: usize,
        array_height: usize,
        size_factor: f64,
    ) -> Self {
        let w = array_width as f64;
        let h = array_height as f64;
        let position = Vector2::new(
            (footprint.column as f64 + footprint.columns as f64 * 0.5) / w,
            (footprint.row as f64 + footprint.rows as f64 * 0.5) / h,
        );
        let size = Vector2::new(
            footprint.columns as f64 / w * size_factor,
            footprint.rows as f64 / h * size_factor,
        );
        Self { footprint, position, size }
    }

    pub fn column(&self) -> usize {
        self.footprint.column
    }

    pub fn row(&self) -> usize {
        self.footprint.row
    }

    /// Fractional area of the array covered by the visible monitor.
    pub fn area(&self) -> f64 {
        self.size.x * self.size.y
    }

    /// Lower-left corner in array fractions.
    pub fn min(&self) -> Vector2<f64> {
        self.position - self.size * 0.5
    }

    /// Upper-right corner in array fractions.
    pub fn max(&self) -> Vector2<f64> {
        self.position + self.size * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cell_centered_in_its_slot() {
        let c = Cell::from_footprint(Footprint::unit(1, 2), 4, 3, 1.0);
        assert!((c.position.x - 1.5 / 4.0).abs() < 1e-12);
        assert!((c.position.y - 2.5 / 3.0).abs() < 1e-12);
        assert!((c.size.x - 0.25).abs() < 1e-12);
        assert!((c.max().y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn clump_center_offset_by_half_extent() {
        // 2x3 clump at (0, 0) in a 4x4 grid: center at (1, 1.5) units.
        let c = Cell::from_footprint(Footprint::new(0, 0, 2, 3), 4, 4, 1.0);
        assert!((c.position.x - 0.25).abs() < 1e-12);
        assert!((c.position.y - 0.375).abs() < 1e-12);
        assert!((c.size.y - 0.75).abs() < 1e-12);
    }

    #[test]
    fn size_factor_shrinks_size_only() {
        let full = Cell::from_footprint(Footprint::unit(2, 0), 3, 3, 1.0);
        let gap = Cell::from_footprint(Footprint::unit(2, 0), 3, 3, 0.9);
        assert_eq!(full.position, gap.position);
        assert!((gap.size.x - 0.3).abs() < 1e-12);
    }

    #[test]
    fn footprint_overlap() {
        let a = Footprint::new(0, 0, 2, 2);
        assert!(a.overlaps(&Footprint::unit(1, 1)));
        assert!(!a.overlaps(&Footprint::unit(2, 0)));
        assert!(a.contains(1, 0));
        assert!(!a.contains(0, 2));
        assert!(a.fits(2, 2));
        assert!(!Footprint::new(1, 0, 2, 1).fits(2, 2));
    }

    #[test]
    fn huge_footprint_saturates_instead_of_overflowing() {
        let fp = Footprint::new(2, 1, usize::MAX, usize::MAX);
        assert_eq!(fp.units(), usize::MAX);
        assert!(!fp.fits(10, 10));
        assert!(fp.contains(5, 5));
        assert!(fp.overlaps(&Footprint::unit(3, 3)));
        assert!(!fp.overlaps(&Footprint::unit(0, 0)));
    }
}

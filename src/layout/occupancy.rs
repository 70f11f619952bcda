use super::cell::Footprint;

/// Which grid units are already claimed during one clumped layout pass.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    occupied: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, occupied: vec![false; width * height] }
    }

    fn index(&self, column: usize, row: usize) -> usize {
        column * self.height + row
    }

    pub fn is_occupied(&self, column: usize, row: usize) -> bool {
        self.occupied[self.index(column, row)]
    }

    pub fn occupy(&mut self, column: usize, row: usize) {
        let idx = self.index(column, row);
        self.occupied[idx] = true;
    }

    /// True when `fp` lies inside the grid and none of its units are taken.
    pub fn is_free(&self, fp: &Footprint) -> bool {
        if !fp.fits(self.width, self.height) {
            return false;
        }
        (fp.column..fp.column + fp.columns)
            .all(|c| (fp.row..fp.row + fp.rows).all(|r| !self.is_occupied(c, r)))
    }

    pub fn fill(&mut self, fp: &Footprint) {
        for c in fp.column..fp.column + fp.columns {
            for r in fp.row..fp.row + fp.rows {
                self.occupy(c, r);
            }
        }
    }

    pub fn is_full(&self) -> bool {
        self.occupied.iter().all(|&o| o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_and_query() {
        let mut grid = OccupancyGrid::new(3, 2);
        let clump = Footprint::new(1, 0, 2, 2);
        assert!(grid.is_free(&clump));
        grid.fill(&clump);
        assert!(grid.is_occupied(2, 1));
        assert!(!grid.is_occupied(0, 1));
        assert!(!grid.is_free(&Footprint::new(0, 0, 2, 1)));
        assert!(grid.is_free(&Footprint::new(0, 0, 1, 2)));
        assert!(!grid.is_full());
        grid.occupy(0, 0);
        grid.occupy(0, 1);
        assert!(grid.is_full());
    }

    #[test]
    fn out_of_bounds_is_not_free() {
        let grid = OccupancyGrid::new(2, 2);
        assert!(!grid.is_free(&Footprint::new(1, 1, 2, 1)));
        assert!(!grid.is_free(&Footprint::new(0, 0, 1, 3)));
    }
}

//! Walking path property-based and unit tests
//!
//! - Every drawn path cell lies inside the margin-bounded grid
//! - Consecutive duplicate cells are dropped while drawing

use proptest::prelude::*;
use shared::{Grid, GridSize, LayoutError, PathColor, PathDraft};
use uuid::Uuid;

// ============================================================================
// Property Test Strategies
// ============================================================================

fn grid_size_strategy() -> impl Strategy<Value = GridSize> {
    prop_oneof![
        Just(GridSize::Small),
        Just(GridSize::Medium),
        Just(GridSize::Large),
    ]
}

fn draw(grid: &Grid, pointer: Vec<(f64, f64)>) -> PathDraft {
    pointer
        .into_iter()
        .fold(PathDraft::start(PathColor::default()), |draft, (x, y)| {
            draft.extend(x, y, grid)
        })
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_path_cells_stay_inside_margin(
        size in grid_size_strategy(),
        pointer in prop::collection::vec((-10.0..50.0f64, -10.0..50.0f64), 1..40)
    ) {
        let grid = Grid::from(size);
        let draft = draw(&grid, pointer);

        let low = grid.boundary_margin;
        let high = grid.width - 1 - grid.boundary_margin;
        for cell in &draft.cells {
            prop_assert!(cell.x >= low && cell.x <= high);
            prop_assert!(cell.y >= low && cell.y <= high);
        }
        for pair in draft.cells.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_single_cell_path_cannot_finish() {
        let grid = Grid::from(GridSize::Small);
        let draft = draw(&grid, vec![(3.0, 3.0), (3.2, 2.9)]);
        assert_eq!(draft.cells.len(), 1);
        assert_eq!(
            draft.finish(Uuid::new_v4()).unwrap_err(),
            LayoutError::PathTooShort(1)
        );
    }
}

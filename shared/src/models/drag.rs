//! Interactive plot dragging

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::layout::{snap_axis, Grid, LayoutRules, Rectangle};
use crate::types::Position;

/// Smallest change, in cells, reported as a move
pub const DRAG_CHANGE_EPSILON: f64 = 0.1;

/// What a pointer movement did to the dragged plot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DragOutcome {
    /// Plot snapped to a new cell
    Moved { position: Position },
    /// Snapped cell equals the current one
    Unchanged,
    /// Snapped cell overlaps another plot and overlap is disallowed
    Blocked { position: Position },
}

/// Clamp a continuous position into the grid and snap it to a cell, without
/// change detection
pub fn snap_to_grid(plot: &Rectangle, raw_x: f64, raw_y: f64, grid: &Grid) -> Position {
    let raw_x = if raw_x.is_nan() { f64::from(plot.x) } else { raw_x };
    let raw_y = if raw_y.is_nan() { f64::from(plot.y) } else { raw_y };

    let margin = grid.boundary_margin;
    let max = grid.max_origin(plot.width, plot.height);
    Position::new(
        snap_axis(raw_x, margin, max.x),
        snap_axis(raw_y, margin, max.y),
    )
}

/// Constrain a proposed drag position. Returns the snapped cell only when it
/// differs from the plot's current cell; other plots are not consulted.
pub fn constrain_drag(plot: &Rectangle, raw_x: f64, raw_y: f64, grid: &Grid) -> Option<Position> {
    let snapped = snap_to_grid(plot, raw_x, raw_y, grid);
    let dx = (f64::from(snapped.x) - f64::from(plot.x)).abs();
    let dy = (f64::from(snapped.y) - f64::from(plot.y)).abs();
    (dx > DRAG_CHANGE_EPSILON || dy > DRAG_CHANGE_EPSILON).then_some(snapped)
}

/// [`constrain_drag`] with the farm's overlap policy applied against `others`.
/// The dragged plot itself is skipped when it appears in `others`.
pub fn constrain_drag_with(
    plot: &Rectangle,
    raw_x: f64,
    raw_y: f64,
    grid: &Grid,
    others: &[Rectangle],
    rules: &LayoutRules,
) -> DragOutcome {
    let Some(position) = constrain_drag(plot, raw_x, raw_y, grid) else {
        return DragOutcome::Unchanged;
    };

    if !rules.allow_overlap_on_drag {
        let moved = plot.moved_to(position);
        if others
            .iter()
            .any(|other| other.id != plot.id && other.overlaps(&moved))
        {
            return DragOutcome::Blocked { position };
        }
    }

    DragOutcome::Moved { position }
}

/// State of one drag gesture, threaded through pointer events by the host
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DragSession {
    pub plot_id: Uuid,
    pub original_position: Position,
    pub current_position: Position,
    /// Pointer offset from the plot origin at grab time, in cells
    pub grab_offset_x: f64,
    pub grab_offset_y: f64,
}

impl DragSession {
    /// Start dragging `plot` from a pointer at `(pointer_x, pointer_y)` cells
    pub fn begin(plot: &Rectangle, pointer_x: f64, pointer_y: f64) -> Self {
        Self {
            plot_id: plot.id,
            original_position: plot.position(),
            current_position: plot.position(),
            grab_offset_x: pointer_x - f64::from(plot.x),
            grab_offset_y: pointer_y - f64::from(plot.y),
        }
    }

    /// Apply a pointer movement. `plot` supplies the footprint; its stored
    /// position is ignored in favour of the session's current position.
    pub fn pointer_moved(
        self,
        plot: &Rectangle,
        pointer_x: f64,
        pointer_y: f64,
        grid: &Grid,
        others: &[Rectangle],
        rules: &LayoutRules,
    ) -> (Self, DragOutcome) {
        let dragged = plot.moved_to(self.current_position);
        let outcome = constrain_drag_with(
            &dragged,
            pointer_x - self.grab_offset_x,
            pointer_y - self.grab_offset_y,
            grid,
            others,
            rules,
        );

        let next = match outcome {
            DragOutcome::Moved { position } => Self {
                current_position: position,
                ..self
            },
            DragOutcome::Unchanged | DragOutcome::Blocked { .. } => self,
        };
        (next, outcome)
    }

    pub fn has_moved(&self) -> bool {
        self.current_position != self.original_position
    }

    /// End the gesture. Returns the position to persist, if any.
    pub fn finish(self) -> Option<Position> {
        self.has_moved().then_some(self.current_position)
    }

    /// Abort the gesture, returning where the plot started
    pub fn cancel(self) -> Position {
        self.original_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot(x: i32, y: i32, width: i32, height: i32) -> Rectangle {
        Rectangle::new(Uuid::new_v4(), x, y, width, height)
    }

    #[test]
    fn test_drag_snaps_to_nearest_cell() {
        let grid = Grid::new(30, 30);
        let p = plot(1, 1, 5, 3);
        assert_eq!(constrain_drag(&p, 4.5, 2.4, &grid), Some(Position::new(5, 2)));
    }

    #[test]
    fn test_drag_within_same_cell_is_unchanged() {
        let grid = Grid::new(30, 30);
        let p = plot(4, 4, 2, 2);
        assert_eq!(constrain_drag(&p, 4.3, 3.6, &grid), None);
    }

    #[test]
    fn test_drag_is_clamped_to_margin() {
        let grid = Grid::new(30, 30);
        let p = plot(10, 10, 5, 3);
        assert_eq!(constrain_drag(&p, -20.0, 99.0, &grid), Some(Position::new(1, 26)));
        assert_eq!(constrain_drag(&p, 40.0, -1.0, &grid), Some(Position::new(24, 1)));
    }

    #[test]
    fn test_drag_ignores_nan_axis() {
        let grid = Grid::new(30, 30);
        let p = plot(3, 3, 2, 2);
        assert_eq!(constrain_drag(&p, f64::NAN, 8.0, &grid), Some(Position::new(3, 8)));
        assert_eq!(constrain_drag(&p, f64::NAN, f64::NAN, &grid), None);
    }

    #[test]
    fn test_drag_is_pure() {
        let grid = Grid::new(20, 20);
        let p = plot(2, 2, 3, 3);
        let first = constrain_drag(&p, 7.7, 1.2, &grid);
        let second = constrain_drag(&p, 7.7, 1.2, &grid);
        assert_eq!(first, second);
    }

    #[test]
    fn test_overlap_allowed_by_default() {
        let grid = Grid::new(30, 30);
        let p = plot(1, 1, 3, 3);
        let other = plot(10, 1, 3, 3);
        let outcome =
            constrain_drag_with(&p, 10.0, 1.0, &grid, &[p, other], &LayoutRules::default());
        assert_eq!(outcome, DragOutcome::Moved { position: Position::new(10, 1) });
    }

    #[test]
    fn test_overlap_blocked_when_disallowed() {
        let grid = Grid::new(30, 30);
        let p = plot(1, 1, 3, 3);
        let other = plot(10, 1, 3, 3);
        let rules = LayoutRules {
            allow_overlap_on_drag: false,
            ..LayoutRules::default()
        };

        let blocked = constrain_drag_with(&p, 11.0, 2.0, &grid, &[p, other], &rules);
        assert_eq!(blocked, DragOutcome::Blocked { position: Position::new(11, 2) });

        // sliding up against the other plot's left edge is fine
        let touching = constrain_drag_with(&p, 7.0, 1.0, &grid, &[p, other], &rules);
        assert_eq!(touching, DragOutcome::Moved { position: Position::new(7, 1) });
    }

    #[test]
    fn test_session_tracks_grab_offset() {
        let grid = Grid::new(30, 30);
        let p = plot(5, 5, 4, 2);
        let others = [p];
        let rules = LayoutRules::default();

        // grabbed 1.5 cells into the plot
        let session = DragSession::begin(&p, 6.5, 5.5);
        let (session, outcome) = session.pointer_moved(&p, 6.7, 5.6, &grid, &others, &rules);
        assert_eq!(outcome, DragOutcome::Unchanged);

        let (session, outcome) = session.pointer_moved(&p, 9.5, 8.5, &grid, &others, &rules);
        assert_eq!(outcome, DragOutcome::Moved { position: Position::new(8, 8) });
        assert_eq!(session.current_position, Position::new(8, 8));

        let (session, outcome) = session.pointer_moved(&p, 9.6, 8.4, &grid, &others, &rules);
        assert_eq!(outcome, DragOutcome::Unchanged);

        assert_eq!(session.finish(), Some(Position::new(8, 8)));
        assert_eq!(session.cancel(), Position::new(5, 5));
    }

    #[test]
    fn test_session_returning_home_persists_nothing() {
        let grid = Grid::new(30, 30);
        let p = plot(5, 5, 2, 2);
        let rules = LayoutRules::default();
        let session = DragSession::begin(&p, 5.0, 5.0);
        let (session, _) = session.pointer_moved(&p, 9.0, 9.0, &grid, &[], &rules);
        let (session, _) = session.pointer_moved(&p, 5.2, 4.9, &grid, &[], &rules);
        assert!(!session.has_moved());
        assert_eq!(session.finish(), None);
    }

    #[test]
    fn test_blocked_move_keeps_session_position() {
        let grid = Grid::new(30, 30);
        let p = plot(1, 1, 3, 3);
        let other = plot(10, 1, 3, 3);
        let rules = LayoutRules {
            allow_overlap_on_drag: false,
            ..LayoutRules::default()
        };
        let session = DragSession::begin(&p, 1.0, 1.0);
        let (session, outcome) = session.pointer_moved(&p, 11.0, 1.0, &grid, &[p, other], &rules);
        assert!(matches!(outcome, DragOutcome::Blocked { .. }));
        assert_eq!(session.current_position, Position::new(1, 1));
    }
}

//! Piece placement on the canvas and pointer hit-testing

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, PIECE_GAP, PIECE_RADIUS};

/// Most pieces placed on one row before wrapping
const PIECES_PER_ROW: usize = 5;

/// Where each piece sits on screen
#[derive(Debug, Clone, PartialEq)]
pub struct PieceLayout {
    pub centers: Vec<Vec2>,
    pub radius: f32,
}

impl PieceLayout {
    /// Lay out `count` pieces in centered rows across the lower half of a
    /// `size` canvas
    pub fn new(count: usize, size: Vec2) -> Self {
        let radius = PIECE_RADIUS.min(size.x / (PIECES_PER_ROW as f32 * 2.0 + 2.0));
        let step = radius * 2.0 + PIECE_GAP;
        let rows = count.div_ceil(PIECES_PER_ROW).max(1);
        let top = size.y * 0.62 - (rows as f32 - 1.0) * step / 2.0;

        let centers = (0..count)
            .map(|i| {
                let row = i / PIECES_PER_ROW;
                let in_row = (count - row * PIECES_PER_ROW).min(PIECES_PER_ROW);
                let col = i % PIECES_PER_ROW;
                let row_width = (in_row as f32 - 1.0) * step;
                let x = size.x / 2.0 - row_width / 2.0 + col as f32 * step;
                let y = top + row as f32 * step;
                Vec2::new(x, y)
            })
            .collect();

        Self { centers, radius }
    }

    /// Layout for the default canvas size
    pub fn for_canvas(count: usize) -> Self {
        Self::new(count, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT))
    }

    /// Index of the piece under `point`, if any
    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        self.centers
            .iter()
            .position(|c| c.distance_squared(point) <= self.radius * self.radius)
    }
}

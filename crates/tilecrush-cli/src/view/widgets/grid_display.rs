use std::collections::BTreeSet;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tilecrush_engine::{GRID_SIZE, Grid, Position};

use crate::view::widgets::TileDisplay;

const CURSOR_MARKER: &str = "()";
const SELECTED_MARKER: &str = "[]";

#[derive(Debug)]
pub struct GridDisplay<'a> {
    grid: &'a Grid,
    selection: Option<&'a BTreeSet<Position>>,
    cursor: Option<Position>,
    fading: &'a [(Position, f64)],
    shimmer: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> GridDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            selection: None,
            cursor: None,
            fading: &[],
            shimmer: false,
            block: None,
        }
    }

    pub fn selection(self, selection: &'a BTreeSet<Position>) -> Self {
        Self {
            selection: Some(selection),
            ..self
        }
    }

    pub fn cursor(self, cursor: Position) -> Self {
        Self {
            cursor: Some(cursor),
            ..self
        }
    }

    /// Cells drawn as clear effects instead of their current tile.
    pub fn fading(self, fading: &'a [(Position, f64)]) -> Self {
        Self { fading, ..self }
    }

    pub fn shimmer(self, shimmer: bool) -> Self {
        Self { shimmer, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        GRID_SIZE as u16 * TileDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        GRID_SIZE as u16 * TileDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }

    /// Maps a terminal coordinate to the grid cell drawn there when this
    /// widget is rendered into `area`.
    pub fn position_at(&self, area: Rect, x: u16, y: u16) -> Option<Position> {
        let inner = self.block.inner_if_some(area);
        let col = usize::from(x.checked_sub(inner.x)? / TileDisplay::WIDTH);
        let row = usize::from(y.checked_sub(inner.y)? / TileDisplay::HEIGHT);
        let inside = x < inner.right() && y < inner.bottom();
        (inside && row < GRID_SIZE && col < GRID_SIZE).then(|| Position::new(row, col))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_area(inner: Rect, pos: Position) -> Rect {
        Rect::new(
            inner.x + pos.col as u16 * TileDisplay::WIDTH,
            inner.y + pos.row as u16 * TileDisplay::HEIGHT,
            TileDisplay::WIDTH,
            TileDisplay::HEIGHT,
        )
        .intersection(inner)
    }

    fn tile_display(&self, pos: Position) -> TileDisplay {
        if let Some(&(_, level)) = self.fading.iter().find(|(p, _)| *p == pos) {
            return TileDisplay::fading(level);
        }
        let tile = TileDisplay::from_tile(self.grid.get(pos), self.shimmer);
        if self.cursor == Some(pos) {
            tile.marked(CURSOR_MARKER)
        } else if self.selection.is_some_and(|s| s.contains(&pos)) {
            tile.marked(SELECTED_MARKER)
        } else {
            tile
        }
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let inner = self.block.inner_if_some(area);

        for pos in Grid::positions() {
            let cell = GridDisplay::cell_area(inner, pos);
            if !cell.is_empty() {
                self.tile_display(pos).render(cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::widgets::Block;

    use super::*;

    #[test]
    fn test_size_includes_border() {
        let grid = Grid::EMPTY;
        let display = GridDisplay::new(&grid).block(Block::bordered());
        assert_eq!(display.width(), 22);
        assert_eq!(display.height(), 12);
    }

    #[test]
    fn test_position_at_maps_cells() {
        let grid = Grid::EMPTY;
        let display = GridDisplay::new(&grid).block(Block::bordered());
        let area = Rect::new(5, 2, display.width(), display.height());

        // Border cells are outside the grid.
        assert_eq!(display.position_at(area, 5, 2), None);
        assert_eq!(display.position_at(area, 6, 3), Some(Position::new(0, 0)));
        assert_eq!(display.position_at(area, 7, 3), Some(Position::new(0, 0)));
        assert_eq!(display.position_at(area, 8, 3), Some(Position::new(0, 1)));
        assert_eq!(display.position_at(area, 25, 12), Some(Position::new(9, 9)));
        assert_eq!(display.position_at(area, 26, 12), None);
        assert_eq!(display.position_at(area, 6, 13), None);
    }

    #[test]
    fn test_render_marks_cursor_and_selection() {
        let grid = Grid::random(&mut rand::rng());
        let selection = BTreeSet::from([Position::new(0, 1)]);
        let display = GridDisplay::new(&grid)
            .cursor(Position::new(0, 0))
            .selection(&selection);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        (&display).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "(");
        assert_eq!(buf[(1, 0)].symbol(), ")");
        assert_eq!(buf[(2, 0)].symbol(), "[");
        assert_eq!(buf[(3, 0)].symbol(), "]");
    }

    #[test]
    fn test_fading_cell_overrides_marker() {
        let grid = Grid::random(&mut rand::rng());
        let fading = [(Position::new(0, 0), 1.0)];
        let display = GridDisplay::new(&grid)
            .cursor(Position::new(0, 0))
            .fading(&fading);
        assert_eq!(display.tile_display(Position::new(0, 0)), TileDisplay::fading(1.0));
    }
}

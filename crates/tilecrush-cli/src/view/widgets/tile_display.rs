use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use tilecrush_engine::Tile;

use crate::view::widgets::style;

/// A single grid cell, two terminal columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDisplay {
    style: Style,
    symbol: &'static str,
}

impl TileDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    /// Display for a cell's contents. Special tiles swap colors while
    /// `shimmer` is set.
    pub fn from_tile(tile: Option<Tile>, shimmer: bool) -> Self {
        let Some(tile) = tile else {
            return Self::new(style::EMPTY, "..");
        };
        let (style, symbol) = match tile {
            Tile::Red => (style::RED, ""),
            Tile::Green => (style::GREEN, ""),
            Tile::Blue => (style::BLUE, ""),
            Tile::Orange => (style::ORANGE, ""),
            Tile::Pink => (style::PINK, ""),
            Tile::Bonus => (style::BONUS, "$$"),
            Tile::Super => (style::SUPER, "<>"),
            Tile::Wildcard => (style::WILDCARD, "**"),
            Tile::Ultimate => (style::ULTIMATE, "@@"),
        };
        let style = if shimmer && tile.is_special() {
            style.add_modifier(style::SHIMMER)
        } else {
            style
        };
        Self::new(style, symbol)
    }

    /// Display for a cell that was just cleared; `level` runs from 1.0 down to 0.0.
    pub fn fading(level: f64) -> Self {
        if level > 0.5 {
            Self::new(style::FADE_BRIGHT, "++")
        } else {
            Self::new(style::FADE_DIM, "..")
        }
    }

    /// Replaces the symbol with `marker`, drawn over the tile's background.
    #[must_use]
    pub fn marked(self, marker: &'static str) -> Self {
        Self {
            style: self.style.patch(style::MARKER),
            symbol: marker,
        }
    }
}

impl Widget for TileDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &TileDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area with the style, not just the symbol.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

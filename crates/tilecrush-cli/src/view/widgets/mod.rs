use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{grid_display::*, stats_display::*, tile_display::*, tool_display::*};

mod grid_display;
mod stats_display;
mod tile_display;
mod tool_display;

mod color {
    use ratatui::style::Color;

    pub const RED: Color = Color::Rgb(220, 40, 40);
    pub const GREEN: Color = Color::Rgb(40, 190, 70);
    pub const BLUE: Color = Color::Rgb(50, 90, 230);
    pub const ORANGE: Color = Color::Rgb(255, 140, 0);
    pub const PINK: Color = Color::Rgb(255, 105, 180);
    pub const GOLD: Color = Color::Rgb(255, 215, 0);
    pub const SILVER: Color = Color::Rgb(200, 200, 215);
    pub const VIOLET: Color = Color::Rgb(150, 60, 220);
    pub const CRIMSON: Color = Color::Rgb(140, 0, 40);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(60, 60, 60);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const DIM: Style = fg_bg(color::GRAY, color::BLACK);
    pub const EMPTY: Style = fg_bg(color::DARK_GRAY, color::BLACK);

    pub const RED: Style = bg_only(color::RED);
    pub const GREEN: Style = bg_only(color::GREEN);
    pub const BLUE: Style = bg_only(color::BLUE);
    pub const ORANGE: Style = bg_only(color::ORANGE);
    pub const PINK: Style = bg_only(color::PINK);

    pub const BONUS: Style = fg_bg(color::BLACK, color::GOLD);
    pub const SUPER: Style = fg_bg(color::BLACK, color::SILVER);
    pub const WILDCARD: Style = fg_bg(color::WHITE, color::VIOLET);
    pub const ULTIMATE: Style = fg_bg(color::GOLD, color::CRIMSON);

    pub const SHIMMER: Modifier = Modifier::REVERSED;
    pub const MARKER: Style = Style::new().fg(color::WHITE).add_modifier(Modifier::BOLD);

    pub const FADE_BRIGHT: Style = fg_bg(color::BLACK, color::WHITE);
    pub const FADE_DIM: Style = fg_bg(color::WHITE, color::DARK_GRAY);

    pub const BORDER: Color = color::WHITE;
    pub const BORDER_FALLING: Color = color::GRAY;
    pub const BORDER_TOOL: Color = color::YELLOW;
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let sample = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(sample, |block| block.inner(sample));
    sample.height - inner.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let sample = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(sample, |block| block.inner(sample));
    sample.width - inner.width
}

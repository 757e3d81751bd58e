use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

/// The tool icon: remaining charges and whether tool mode is active.
///
/// Clicking anywhere inside it toggles tool mode.
#[derive(Debug)]
pub struct ToolDisplay<'a> {
    charges: u32,
    active: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ToolDisplay<'a> {
    pub fn new(charges: u32, active: bool) -> Self {
        Self {
            charges,
            active,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        2 + super::block_vertical_margin(self.block.as_ref())
    }

    fn status(&self) -> &'static str {
        match (self.active, self.charges) {
            (true, _) => "ACTIVE: click a tile",
            (false, 0) => "empty",
            (false, _) => "click to arm",
        }
    }
}

impl Widget for ToolDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let (charges_style, status_style) = if self.active {
            (style::DEFAULT.fg(style::BORDER_TOOL), style::DEFAULT.fg(style::BORDER_TOOL))
        } else if self.charges == 0 {
            (style::DIM, style::DIM)
        } else {
            (style::DEFAULT, style::DIM)
        };
        Text::from(vec![
            Line::styled(format!("HAMMER x{}", self.charges), charges_style),
            Line::styled(self.status(), status_style),
        ])
        .centered()
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(ToolDisplay::new(3, false).status(), "click to arm");
        assert_eq!(ToolDisplay::new(2, true).status(), "ACTIVE: click a tile");
        assert_eq!(ToolDisplay::new(0, false).status(), "empty");
    }
}

use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tilecrush_engine::{SessionStats, SpecialTier};

use crate::view::widgets::style;

/// Largest score shown as is; anything above is drawn as this value with a `+`.
pub const MAX_DISPLAY_SCORE: u64 = 9_999_999;

/// Rows at the top of the panel holding the score heading and value.
const SCORE_ROWS: u16 = 2;

pub struct StatsDisplay<'a> {
    stats: &'a SessionStats,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(stats: &'a SessionStats) -> Self {
        Self { stats, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }

    /// Whether the terminal cell `(x, y)` lies on the score rows, given the
    /// area the widget was rendered into.
    pub fn is_score_at(&self, area: Rect, x: u16, y: u16) -> bool {
        let inner = self.block.inner_if_some(area);
        Rect {
            height: SCORE_ROWS.min(inner.height),
            ..inner
        }
        .contains(Position::new(x, y))
    }
}

fn score_text(score: u64) -> String {
    if score > MAX_DISPLAY_SCORE {
        format!("{MAX_DISPLAY_SCORE}+")
    } else {
        score.to_string()
    }
}

type Value = &'static dyn Fn(&SessionStats) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    Heading(&'static str),
    FullValue(Value),
    LabelValue(&'static str, Value),
}

fn spawned(stats: &SessionStats, tier: SpecialTier) -> String {
    stats.spawns_by_tier()[tier.as_index()].to_string()
}

const ROWS: &[Row] = &[
    Row::Heading("SCORE:"),
    Row::FullValue(&|stats| score_text(stats.score())),
    Row::Empty,
    Row::LabelValue("TILES:", &|stats| stats.eliminated_tiles().to_string()),
    Row::LabelValue("GROUPS:", &|stats| stats.group_eliminations().to_string()),
    Row::LabelValue("TOOL:", &|stats| stats.tool_uses().to_string()),
    Row::Empty,
    Row::Heading("SPAWNED:"),
    Row::LabelValue("BONUS:", &|stats| spawned(stats, SpecialTier::Bonus)),
    Row::LabelValue("SUPER:", &|stats| spawned(stats, SpecialTier::Super)),
    Row::LabelValue("WILDCARD:", &|stats| spawned(stats, SpecialTier::Wildcard)),
    Row::LabelValue("ULTIMATE:", &|stats| spawned(stats, SpecialTier::Ultimate)),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;
        let row_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), row_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::Heading(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.stats), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style::DIM)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.stats), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}

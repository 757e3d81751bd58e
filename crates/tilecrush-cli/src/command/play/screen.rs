use std::cell::Cell;

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Position as ScreenPosition, Rect},
    style::Style,
    text::{Line, Text},
    widgets::Block,
};
use tilecrush_engine::{ClickOutcome, EliminationReport, GRID_SIZE, GameSession, Position};

use crate::{
    command::play::effects::ClearEffects,
    view::widgets::{GridDisplay, StatsDisplay, ToolDisplay, style},
};

/// Ticks the grid shows as falling after an elimination (500 ms at 60 Hz).
/// Cell clicks are ignored meanwhile.
const FALLING_TICKS: u32 = 30;

/// Ticks between shimmer phase flips of special tiles.
const SHIMMER_PERIOD: u64 = 15;

/// Charges granted by clicking the score while the hammer is armed.
const CHEAT_TOOL_CHARGES: u32 = 99;

const HELP: &str =
    "Click/Enter/Space (Eliminate) | Arrows (Move) | T (Tool) | R (Reset) | Q/Esc (Quit)";

#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    cursor: Position,
    effects: ClearEffects,
    falling_ticks: u32,
    frame: u64,
    message: Option<String>,
    // Where the last draw put the widgets, for mouse hit-testing.
    grid_area: Cell<Rect>,
    stats_area: Cell<Rect>,
    tool_area: Cell<Rect>,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            cursor: Position::new(GRID_SIZE / 2, GRID_SIZE / 2),
            effects: ClearEffects::new(),
            falling_ticks: 0,
            frame: 0,
            message: None,
            grid_area: Cell::new(Rect::default()),
            stats_area: Cell::new(Rect::default()),
            tool_area: Cell::new(Rect::default()),
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn is_falling(&self) -> bool {
        self.falling_ticks > 0
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.handle_mouse(mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        let Position { row, col } = self.cursor;
        match code {
            KeyCode::Left => self.cursor.col = col.saturating_sub(1),
            KeyCode::Right => self.cursor.col = (col + 1).min(GRID_SIZE - 1),
            KeyCode::Up => self.cursor.row = row.saturating_sub(1),
            KeyCode::Down => self.cursor.row = (row + 1).min(GRID_SIZE - 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.click(self.cursor),
            KeyCode::Char('t' | 'T') => self.toggle_tool(),
            KeyCode::Char('r' | 'R') => self.reset(),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn handle_mouse(&mut self, x: u16, y: u16) {
        let point = ScreenPosition::new(x, y);
        if self.tool_area.get().contains(point) {
            self.toggle_tool();
            return;
        }
        if self.session.is_tool_mode()
            && self
                .stats_display()
                .is_score_at(self.stats_area.get(), x, y)
        {
            self.session.set_tool_inventory(CHEAT_TOOL_CHARGES);
            self.message = Some(format!("Hammers refilled to {CHEAT_TOOL_CHARGES}"));
            return;
        }
        let grid = self.grid_display();
        if let Some(pos) = grid.position_at(self.grid_area.get(), x, y) {
            self.cursor = pos;
            self.click(pos);
        }
    }

    fn click(&mut self, pos: Position) {
        if self.is_falling() {
            return;
        }
        match self.session.on_cell_clicked(pos) {
            ClickOutcome::Eliminated { report, .. } | ClickOutcome::ToolUsed { report, .. } => {
                self.effects.start(&report.cleared);
                self.falling_ticks = FALLING_TICKS;
                self.message = Some(describe(&report));
            }
            ClickOutcome::SelectionToggled { .. } | ClickOutcome::Ignored => {}
        }
    }

    fn toggle_tool(&mut self) {
        let active = self.session.on_tool_icon_clicked();
        if !active && self.session.tool_inventory() == 0 {
            self.message = Some("No hammers left".to_owned());
        }
    }

    fn reset(&mut self) {
        self.session.reset();
        self.effects.clear();
        self.falling_ticks = 0;
        self.message = Some("New grid".to_owned());
    }

    pub fn update(&mut self) {
        self.frame += 1;
        self.falling_ticks = self.falling_ticks.saturating_sub(1);
        self.effects.tick();
    }

    fn grid_display(&self) -> GridDisplay<'_> {
        let (title, border) = if self.is_falling() {
            (" FALLING ", style::BORDER_FALLING)
        } else if self.session.is_tool_mode() {
            (" HAMMER ", style::BORDER_TOOL)
        } else {
            (" TILECRUSH ", style::BORDER)
        };
        GridDisplay::new(self.session.grid())
            .selection(self.session.selection())
            .cursor(self.cursor)
            .shimmer((self.frame / SHIMMER_PERIOD) % 2 == 1)
            .block(
                Block::bordered()
                    .title(Line::from(title).centered())
                    .border_style(Style::new().fg(border))
                    .style(style::DEFAULT),
            )
    }

    fn stats_display(&self) -> StatsDisplay<'_> {
        StatsDisplay::new(self.session.stats()).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .style(style::DEFAULT),
        )
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let fading = self.effects.levels();
        let grid = self.grid_display().fading(&fading);
        let stats = self.stats_display();
        let tool = ToolDisplay::new(self.session.tool_inventory(), self.session.is_tool_mode())
            .block(
                Block::bordered()
                    .title(Line::from("TOOL").centered())
                    .border_style(Style::new().fg(if self.session.is_tool_mode() {
                        style::BORDER_TOOL
                    } else {
                        style::BORDER
                    }))
                    .style(style::DEFAULT),
            );

        let side_height = stats.height() + tool.height();
        let [main_area, message_area, help_area] = Layout::vertical([
            Constraint::Length(grid.height().max(side_height)),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [grid_area, side_area] = Layout::horizontal([
            Constraint::Length(grid.width()),
            Constraint::Length(stats.width()),
        ])
        .flex(Flex::Center)
        .areas(main_area);
        let [grid_area] = Layout::vertical([Constraint::Length(grid.height())]).areas(grid_area);
        let [stats_area, tool_area] = Layout::vertical([
            Constraint::Length(stats.height()),
            Constraint::Length(tool.height()),
        ])
        .areas(side_area);

        self.grid_area.set(grid_area);
        self.stats_area.set(stats_area);
        self.tool_area.set(tool_area);

        frame.render_widget(&grid, grid_area);
        frame.render_widget(stats, stats_area);
        frame.render_widget(tool, tool_area);
        if let Some(message) = &self.message {
            frame.render_widget(Text::from(message.as_str()).centered(), message_area);
        }
        frame.render_widget(
            Text::from(HELP).style(style::DIM).centered(),
            help_area,
        );
    }
}

fn describe(report: &EliminationReport) -> String {
    let mut message = format!(
        "+{} for {} {} tile(s)",
        report.points,
        report.cleared.len(),
        report.nominal.name()
    );
    if let Some((pos, tier)) = report.spawned {
        message.push_str(&format!(", {tier} tile at {pos}"));
    }
    message
}

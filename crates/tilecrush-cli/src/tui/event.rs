use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Time to advance animations.
    Tick,
    /// Time to redraw.
    Render,
    /// Key input, mouse input or a resize.
    Crossterm(CrosstermEvent),
}

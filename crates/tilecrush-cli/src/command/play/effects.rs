use tilecrush_engine::{Position, Tile};

/// Ticks a clear effect stays visible (0.5 s at 60 Hz).
pub const CLEAR_EFFECT_TICKS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClearEffect {
    pos: Position,
    remaining: u32,
}

/// Fading markers over cells that were just cleared.
///
/// Purely cosmetic: the grid is already settled when an effect starts.
#[derive(Debug, Default, Clone)]
pub struct ClearEffects {
    effects: Vec<ClearEffect>,
}

impl ClearEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an effect on every cleared cell, restarting any still running there.
    pub fn start(&mut self, cleared: &[(Position, Tile)]) {
        self.effects
            .retain(|effect| !cleared.iter().any(|(pos, _)| *pos == effect.pos));
        self.effects
            .extend(cleared.iter().map(|&(pos, _)| ClearEffect {
                pos,
                remaining: CLEAR_EFFECT_TICKS,
            }));
    }

    pub fn tick(&mut self) {
        for effect in &mut self.effects {
            effect.remaining -= 1;
        }
        self.effects.retain(|effect| effect.remaining > 0);
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Active effects with their intensity, from 1.0 when started toward 0.0.
    pub fn levels(&self) -> Vec<(Position, f64)> {
        self.effects
            .iter()
            .map(|effect| {
                (
                    effect.pos,
                    f64::from(effect.remaining) / f64::from(CLEAR_EFFECT_TICKS),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleared() -> Vec<(Position, Tile)> {
        vec![
            (Position::new(0, 0), Tile::Red),
            (Position::new(0, 1), Tile::Red),
        ]
    }

    #[test]
    fn test_effects_expire_after_duration() {
        let mut effects = ClearEffects::new();
        effects.start(&cleared());
        assert_eq!(effects.levels().len(), 2);
        assert!(
            effects
                .levels()
                .iter()
                .all(|&(_, level)| (level - 1.0).abs() < f64::EPSILON)
        );

        for _ in 0..CLEAR_EFFECT_TICKS - 1 {
            effects.tick();
        }
        assert!(!effects.levels().is_empty());
        effects.tick();
        assert!(effects.levels().is_empty());
    }

    #[test]
    fn test_levels_fade() {
        let mut effects = ClearEffects::new();
        effects.start(&cleared());
        for _ in 0..CLEAR_EFFECT_TICKS / 2 {
            effects.tick();
        }
        let (_, level) = effects.levels()[0];
        assert!((level - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_restart_replaces_running_effect() {
        let mut effects = ClearEffects::new();
        effects.start(&cleared());
        effects.tick();
        effects.start(&cleared()[..1]);
        assert_eq!(effects.levels().len(), 2);
        let restarted = effects
            .levels()
            .into_iter()
            .find(|(pos, _)| *pos == Position::new(0, 0))
            .unwrap();
        assert!((restarted.1 - 1.0).abs() < f64::EPSILON);
    }
}

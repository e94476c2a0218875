//! The two-level cyclic progression over the mini-game variants. Lives are
//! informational only; there is no game-over path.

use bevy::prelude::*;

use super::invaders::{self, InvaderInput, InvadersState};
use super::pacman::{self, Heading, PacmanState};

/// Seconds between the shooter being cleared and the reset back to the first
/// level.
pub const RESET_DELAY_SECS: f64 = 3.0;
pub const STARTING_LIVES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameVariant {
    Pacman,
    SpaceInvaders,
}

impl GameVariant {
    pub fn cycled(self) -> Self {
        match self {
            GameVariant::Pacman => GameVariant::SpaceInvaders,
            GameVariant::SpaceInvaders => GameVariant::Pacman,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            GameVariant::Pacman => "PACMAN",
            GameVariant::SpaceInvaders => "INVADERS",
        }
    }
}

/// Pressed game keys, sampled once per tick from the input layer.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeySet {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Things a tick did, for sound cues and banners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    DotEaten,
    Shot,
    InvaderKilled,
    VariantSwitched(GameVariant),
    Completed,
    ResetToFirstLevel,
}

#[derive(Resource, Debug)]
pub struct ArcadeGame {
    pub variant: GameVariant,
    pub score: u32,
    pub lives: u32,
    /// One-shot guard so the completion sequence fires once per playthrough.
    pub completed: bool,
    pub pacman: PacmanState,
    pub invaders: InvadersState,
    reset_at: Option<f64>,
}

impl Default for ArcadeGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcadeGame {
    pub fn new() -> Self {
        Self {
            variant: GameVariant::Pacman,
            score: 0,
            lives: STARTING_LIVES,
            completed: false,
            pacman: PacmanState::new(),
            invaders: InvadersState::new(),
            reset_at: None,
        }
    }

    /// One simulation tick. `now` is seconds of elapsed app time.
    pub fn step(&mut self, keys: &KeySet, now: f64, events: &mut Vec<GameEvent>) {
        if let Some(at) = self.reset_at {
            if now >= at {
                self.reset_to_first_level(events);
            }
        }

        match self.variant {
            GameVariant::Pacman => self.step_pacman(keys, events),
            GameVariant::SpaceInvaders => self.step_invaders(keys, now, events),
        }
    }

    /// Manual variant cycling (the `G` binding). The entered variant's
    /// layout is rebuilt so it always starts fresh.
    pub fn cycle_variant(&mut self, events: &mut Vec<GameEvent>) {
        let next = self.variant.cycled();
        self.enter_variant(next);
        events.push(GameEvent::VariantSwitched(next));
    }

    fn step_pacman(&mut self, keys: &KeySet, events: &mut Vec<GameEvent>) {
        // Later checks win when several keys are held, so "up" dominates.
        if keys.right {
            self.pacman.set_heading(Heading::Right);
        }
        if keys.down {
            self.pacman.set_heading(Heading::Down);
        }
        if keys.left {
            self.pacman.set_heading(Heading::Left);
        }
        if keys.up {
            self.pacman.set_heading(Heading::Up);
        }

        let outcome = self.pacman.step();
        if outcome.dots_eaten > 0 {
            self.score += outcome.dots_eaten * pacman::DOT_SCORE;
            for _ in 0..outcome.dots_eaten {
                events.push(GameEvent::DotEaten);
            }
        }
        if outcome.cleared {
            self.score += pacman::CLEAR_BONUS;
            self.enter_variant(GameVariant::SpaceInvaders);
            events.push(GameEvent::VariantSwitched(GameVariant::SpaceInvaders));
        }
    }

    fn step_invaders(&mut self, keys: &KeySet, now: f64, events: &mut Vec<GameEvent>) {
        let input = InvaderInput {
            left: keys.left,
            right: keys.right,
            fire: keys.fire,
        };
        let outcome = self.invaders.step(input, now);

        for _ in 0..outcome.shots_fired {
            events.push(GameEvent::Shot);
        }
        if outcome.kills > 0 {
            self.score += outcome.kills * invaders::KILL_SCORE;
            for _ in 0..outcome.kills {
                events.push(GameEvent::InvaderKilled);
            }
        }

        if outcome.cleared && self.mark_completed() {
            self.score += invaders::CLEAR_BONUS;
            self.reset_at = Some(now + RESET_DELAY_SECS);
            events.push(GameEvent::Completed);
        }
    }

    /// Sets the one-shot completed flag; true only on the first call since
    /// the last reset to the first level.
    fn mark_completed(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        true
    }

    fn reset_to_first_level(&mut self, events: &mut Vec<GameEvent>) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.completed = false;
        self.reset_at = None;
        self.pacman = PacmanState::new();
        self.invaders = InvadersState::new();
        self.variant = GameVariant::Pacman;
        events.push(GameEvent::ResetToFirstLevel);
    }

    /// Rebuilds only the layout of the variant being entered; the other
    /// variant keeps its state until its own entry.
    fn enter_variant(&mut self, variant: GameVariant) {
        match variant {
            GameVariant::Pacman => self.pacman = PacmanState::new(),
            GameVariant::SpaceInvaders => self.invaders = InvadersState::new(),
        }
        self.variant = variant;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eat_everything(game: &mut ArcadeGame, events: &mut Vec<GameEvent>) {
        for dot in &mut game.pacman.dots {
            dot.eaten = true;
        }
        // Park the player away from any dot and step once so the clear is
        // observed.
        game.pacman.x = 10.0;
        game.pacman.y = 10.0;
        game.step(&KeySet::default(), 0.0, events);
    }

    fn shoot_everything(game: &mut ArcadeGame, now: f64, events: &mut Vec<GameEvent>) {
        for invader in &mut game.invaders.invaders {
            invader.alive = false;
        }
        game.step(&KeySet::default(), now, events);
    }

    #[test]
    fn starts_on_pacman_with_three_lives() {
        let game = ArcadeGame::new();
        assert_eq!(game.variant, GameVariant::Pacman);
        assert_eq!(game.score, 0);
        assert_eq!(game.lives, STARTING_LIVES);
        assert!(!game.completed);
    }

    #[test]
    fn eating_dots_scores_per_dot() {
        let mut game = ArcadeGame::new();
        let mut events = Vec::new();
        let target = game.pacman.dots[0];
        game.pacman.x = target.x - 1.0;
        game.pacman.y = target.y;
        game.step(&KeySet::default(), 0.0, &mut events);
        assert!(game.score >= pacman::DOT_SCORE);
        assert!(events.contains(&GameEvent::DotEaten));
    }

    #[test]
    fn clearing_pacman_switches_to_invaders_with_a_bonus() {
        let mut game = ArcadeGame::new();
        let mut events = Vec::new();
        let score_before = game.score;
        eat_everything(&mut game, &mut events);

        assert_eq!(game.variant, GameVariant::SpaceInvaders);
        assert_eq!(game.score, score_before + pacman::CLEAR_BONUS);
        assert!(events.contains(&GameEvent::VariantSwitched(GameVariant::SpaceInvaders)));
        // The invader layout alone was rebuilt.
        assert_eq!(game.invaders.alive_invaders(), InvadersState::new().alive_invaders());
    }

    #[test]
    fn pacman_dots_are_rebuilt_on_reentry() {
        let mut game = ArcadeGame::new();
        let mut events = Vec::new();
        eat_everything(&mut game, &mut events);
        assert_eq!(game.variant, GameVariant::SpaceInvaders);

        game.cycle_variant(&mut events);
        assert_eq!(game.variant, GameVariant::Pacman);
        assert_eq!(game.pacman.remaining_dots(), game.pacman.dots.len());
    }

    #[test]
    fn completing_invaders_sets_the_one_shot_flag_once() {
        let mut game = ArcadeGame::new();
        let mut events = Vec::new();
        eat_everything(&mut game, &mut events);

        events.clear();
        shoot_everything(&mut game, 100.0, &mut events);
        assert!(game.completed);
        assert_eq!(events.iter().filter(|e| **e == GameEvent::Completed).count(), 1);
        let score_after = game.score;

        // The cleared block stays cleared while the reset delay runs; no
        // second completion, no repeat bonus.
        events.clear();
        game.step(&KeySet::default(), 101.0, &mut events);
        game.step(&KeySet::default(), 102.0, &mut events);
        assert!(!events.contains(&GameEvent::Completed));
        assert_eq!(game.score, score_after);
    }

    #[test]
    fn reset_returns_to_pacman_after_the_delay() {
        let mut game = ArcadeGame::new();
        let mut events = Vec::new();
        eat_everything(&mut game, &mut events);
        shoot_everything(&mut game, 100.0, &mut events);

        events.clear();
        game.step(&KeySet::default(), 100.0 + RESET_DELAY_SECS - 0.1, &mut events);
        assert_eq!(game.variant, GameVariant::SpaceInvaders);

        game.step(&KeySet::default(), 100.0 + RESET_DELAY_SECS + 0.1, &mut events);
        assert_eq!(game.variant, GameVariant::Pacman);
        assert_eq!(game.score, 0);
        assert_eq!(game.lives, STARTING_LIVES);
        assert!(!game.completed);
        assert!(events.contains(&GameEvent::ResetToFirstLevel));
        assert_eq!(game.pacman.remaining_dots(), game.pacman.dots.len());
        assert_eq!(game.invaders.alive_invaders(), InvadersState::new().alive_invaders());
    }

    #[test]
    fn completed_flag_can_trip_again_after_a_reset() {
        let mut game = ArcadeGame::new();
        let mut events = Vec::new();
        eat_everything(&mut game, &mut events);
        shoot_everything(&mut game, 100.0, &mut events);
        game.step(&KeySet::default(), 100.0 + RESET_DELAY_SECS + 0.1, &mut events);
        assert!(!game.completed);

        eat_everything(&mut game, &mut events);
        events.clear();
        shoot_everything(&mut game, 200.0, &mut events);
        assert!(game.completed);
        assert!(events.contains(&GameEvent::Completed));
    }

    #[test]
    fn manual_cycle_rebuilds_the_entered_layout() {
        let mut game = ArcadeGame::new();
        let mut events = Vec::new();

        game.cycle_variant(&mut events);
        assert_eq!(game.variant, GameVariant::SpaceInvaders);
        assert!(events.contains(&GameEvent::VariantSwitched(GameVariant::SpaceInvaders)));

        // Kill a few invaders, cycle away and back: the layout is fresh.
        for invader in game.invaders.invaders.iter_mut().take(5) {
            invader.alive = false;
        }
        game.cycle_variant(&mut events);
        game.cycle_variant(&mut events);
        assert_eq!(game.invaders.alive_invaders(), InvadersState::new().alive_invaders());
    }

    #[test]
    fn shots_raise_events_for_the_sound_layer() {
        let mut game = ArcadeGame::new();
        let mut events = Vec::new();
        eat_everything(&mut game, &mut events);

        events.clear();
        let keys = KeySet {
            fire: true,
            ..KeySet::default()
        };
        game.step(&keys, 50.0, &mut events);
        assert!(events.contains(&GameEvent::Shot));
    }
}

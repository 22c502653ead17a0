//! Match state machine
//!
//! One match is a run of rounds against a single opponent, ending when either
//! side reaches the required number of round wins. Each round walks
//! `Ready -> Dealing -> Revealing -> Settled` and then either returns to
//! `Ready` for the next round or stops in `Concluded`, where the ledger is
//! settled. The pauses between stages live on the engine's timer queue and are
//! driven by [`MatchEngine::advance`].

use serde::Serialize;

use super::catalog::RankedItem;
use super::draw::{DrawSource, RandomDraw};
use super::ledger::CurrencyLedger;
use super::opponent::OpponentProfile;
use super::resolver::{resolve, RoundOutcome};
use crate::config::Settings;
use crate::pacing::{CancelToken, Pacer, Scheduler, Stage};

/// Stage of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchPhase {
    /// Waiting for the player to start a round
    Ready,
    /// Both vessels drawn, face down
    Dealing,
    /// Vessels face up, tallies updated
    Revealing,
    /// Round result on screen
    Settled,
    /// Match over, ledger settled
    Concluded,
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    /// Player reached the required wins
    Victory,
    /// Opponent reached the required wins
    Defeat,
    /// Round limit hit with neither side through
    Drawn,
}

impl MatchOutcome {
    /// Headline shown on the game-over panel
    pub fn headline(&self) -> &'static str {
        match self {
            MatchOutcome::Victory => ">>> MISSION SUCCESS <<<",
            MatchOutcome::Defeat => ">>> MISSION FAILED <<<",
            MatchOutcome::Drawn => ">>> CEASEFIRE <<<",
        }
    }
}

/// Mutable state of one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchState {
    pub player_wins: u32,
    pub opponent_wins: u32,
    /// 1-based round counter
    pub round_number: u32,
    pub phase: MatchPhase,
    /// Player's vessel for the current round
    pub player_item: Option<RankedItem>,
    /// Opponent's vessel for the current round
    pub opponent_item: Option<RankedItem>,
    /// Result of the most recently revealed round
    pub last_outcome: Option<RoundOutcome>,
    /// Set once the match concludes
    pub outcome: Option<MatchOutcome>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            player_wins: 0,
            opponent_wins: 0,
            round_number: 1,
            phase: MatchPhase::Ready,
            player_item: None,
            opponent_item: None,
            last_outcome: None,
            outcome: None,
        }
    }
}

impl MatchState {
    /// Create a fresh match state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a new round may be started
    pub fn can_start_round(&self) -> bool {
        self.phase == MatchPhase::Ready
    }

    /// Whether the drawn vessels should be shown face down
    pub fn face_down(&self) -> bool {
        self.phase == MatchPhase::Dealing
    }

    /// Whether the match is over
    pub fn is_concluded(&self) -> bool {
        self.phase == MatchPhase::Concluded
    }
}

/// Notable things that happened while driving the match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MatchEvent {
    /// Both vessels drawn
    Dealt {
        round: u32,
        player: RankedItem,
        opponent: RankedItem,
    },
    /// Round decided and tallies updated
    Revealed {
        round: u32,
        outcome: RoundOutcome,
        player_wins: u32,
        opponent_wins: u32,
    },
    /// Round result is on screen
    Settled { round: u32 },
    /// Next round is ready to start
    NextRound { round: u32 },
    /// Match over
    Concluded {
        outcome: MatchOutcome,
        /// Signed balance change actually applied
        credits_delta: i64,
        balance: u32,
    },
}

/// Queued stage transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Reveal,
    Settle,
    Advance,
}

/// Drives a single match against one opponent
pub struct MatchEngine {
    state: MatchState,
    opponent: OpponentProfile,
    wager: u32,
    required_wins: u32,
    round_limit: Option<u32>,
    draw: Box<dyn DrawSource>,
    pacer: Pacer,
    scheduler: Scheduler<Transition>,
    token: CancelToken,
}

impl MatchEngine {
    /// Create an engine for a match against `opponent`
    pub fn new(opponent: OpponentProfile, settings: &Settings) -> Self {
        let (draw, pacer) = match settings.seed {
            Some(seed) => (
                RandomDraw::seeded(seed),
                Pacer::seeded(settings.timings.clone(), seed.wrapping_add(1)),
            ),
            None => (RandomDraw::new(), Pacer::new(settings.timings.clone())),
        };

        Self {
            state: MatchState::new(),
            opponent,
            wager: settings.wager,
            required_wins: settings.required_wins,
            round_limit: settings.round_limit,
            draw: Box::new(draw),
            pacer,
            scheduler: Scheduler::new(),
            token: CancelToken::new(),
        }
    }

    /// Replace the draw source
    pub fn with_draw_source(mut self, draw: Box<dyn DrawSource>) -> Self {
        self.set_draw_source(draw);
        self
    }

    /// Swap the draw source on a live engine
    pub fn set_draw_source(&mut self, draw: Box<dyn DrawSource>) {
        self.draw = draw;
    }

    /// Current match state
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Opponent for this match
    pub fn opponent(&self) -> &OpponentProfile {
        &self.opponent
    }

    /// Credits lost on defeat
    pub fn wager(&self) -> u32 {
        self.wager
    }

    /// Number of stage transitions waiting on the clock
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Start a round
    ///
    /// Only acts in `Ready`; anywhere else it does nothing and returns `None`.
    pub fn start_round(&mut self) -> Option<MatchEvent> {
        if !self.state.can_start_round() {
            log::debug!(
                "Ignoring start_round in {:?} (round {})",
                self.state.phase,
                self.state.round_number
            );
            return None;
        }

        let player = self.draw.draw();
        let opponent = self.draw.draw();

        self.state.player_item = Some(player);
        self.state.opponent_item = Some(opponent);
        self.state.last_outcome = None;
        self.state.phase = MatchPhase::Dealing;

        let delay = self.pacer.delay(Stage::Draw);
        self.scheduler.schedule(delay, Transition::Reveal, &self.token);

        log::debug!(
            "Round {}: dealt {} vs {}",
            self.state.round_number,
            player,
            opponent
        );

        Some(MatchEvent::Dealt {
            round: self.state.round_number,
            player,
            opponent,
        })
    }

    /// Move the match clock forward and apply every transition that fell due
    pub fn advance(&mut self, elapsed_ms: u64, ledger: &mut CurrencyLedger) -> Vec<MatchEvent> {
        let deadline = self.scheduler.now().saturating_add(elapsed_ms);
        let mut events = Vec::new();

        while let Some(transition) = self.scheduler.pop_due(deadline) {
            events.extend(self.apply(transition, ledger));
        }
        self.scheduler.advance_to(deadline);

        events
    }

    /// Apply every pending transition immediately, ignoring the clock
    pub fn flush(&mut self, ledger: &mut CurrencyLedger) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        while let Some(transition) = self.scheduler.pop_next() {
            events.extend(self.apply(transition, ledger));
        }
        events
    }

    /// Drop pending transitions and start the match over
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.state = MatchState::new();
        log::info!("Match against {} reset", self.opponent.name);
    }

    /// Tear the match down without settling; used when leaving the screen
    ///
    /// Consumes the engine so a half-played round can never be resumed.
    /// Returns the state at the moment of the abort.
    pub fn abort(mut self) -> MatchState {
        if self.scheduler.pending() > 0 {
            log::info!(
                "Aborting match against {} in {:?}",
                self.opponent.name,
                self.state.phase
            );
        }
        self.cancel_pending();
        self.state
    }

    fn cancel_pending(&mut self) {
        self.token.cancel();
        self.scheduler.clear();
        self.token = CancelToken::new();
    }

    fn apply(&mut self, transition: Transition, ledger: &mut CurrencyLedger) -> Option<MatchEvent> {
        match transition {
            Transition::Reveal => self.reveal(),
            Transition::Settle => {
                self.state.phase = MatchPhase::Settled;
                let delay = self.pacer.delay(Stage::Settle);
                self.scheduler.schedule(delay, Transition::Advance, &self.token);
                Some(MatchEvent::Settled {
                    round: self.state.round_number,
                })
            }
            Transition::Advance => Some(self.finish_round(ledger)),
        }
    }

    fn reveal(&mut self) -> Option<MatchEvent> {
        let (Some(player), Some(opponent)) = (self.state.player_item, self.state.opponent_item)
        else {
            log::warn!("Reveal fired without a deal");
            return None;
        };

        let outcome = resolve(&player, &opponent, self.opponent.rule_modifier);
        match outcome {
            RoundOutcome::Win => self.state.player_wins += 1,
            RoundOutcome::Lose => self.state.opponent_wins += 1,
            RoundOutcome::Tie => {}
        }
        self.state.last_outcome = Some(outcome);
        self.state.phase = MatchPhase::Revealing;

        let delay = self.pacer.delay(Stage::Reveal);
        self.scheduler.schedule(delay, Transition::Settle, &self.token);

        log::debug!(
            "Round {}: {:?} ({}-{})",
            self.state.round_number,
            outcome,
            self.state.player_wins,
            self.state.opponent_wins
        );

        Some(MatchEvent::Revealed {
            round: self.state.round_number,
            outcome,
            player_wins: self.state.player_wins,
            opponent_wins: self.state.opponent_wins,
        })
    }

    fn finish_round(&mut self, ledger: &mut CurrencyLedger) -> MatchEvent {
        if self.state.player_wins >= self.required_wins {
            self.conclude(MatchOutcome::Victory, ledger)
        } else if self.state.opponent_wins >= self.required_wins {
            self.conclude(MatchOutcome::Defeat, ledger)
        } else if self
            .round_limit
            .is_some_and(|limit| self.state.round_number >= limit)
        {
            self.conclude(MatchOutcome::Drawn, ledger)
        } else {
            self.state.round_number += 1;
            self.state.phase = MatchPhase::Ready;
            MatchEvent::NextRound {
                round: self.state.round_number,
            }
        }
    }

    fn conclude(&mut self, outcome: MatchOutcome, ledger: &mut CurrencyLedger) -> MatchEvent {
        let before = ledger.balance();
        match outcome {
            MatchOutcome::Victory => ledger.credit(self.opponent.reward_on_win),
            MatchOutcome::Defeat => ledger.debit(self.wager),
            MatchOutcome::Drawn => {}
        }
        let credits_delta = ledger.balance() as i64 - before as i64;

        self.state.phase = MatchPhase::Concluded;
        self.state.outcome = Some(outcome);

        log::info!(
            "Match against {} concluded: {:?} after {} rounds ({:+} credits)",
            self.opponent.name,
            outcome,
            self.state.round_number,
            credits_delta
        );

        MatchEvent::Concluded {
            outcome,
            credits_delta,
            balance: ledger.balance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::draw::ScriptedDraw;
    use crate::game::opponent::ADMIRALS;

    fn engine(settings: &Settings, script: &[(u8, u8)]) -> MatchEngine {
        MatchEngine::new(ADMIRALS[0], settings)
            .with_draw_source(Box::new(ScriptedDraw::rounds(script)))
    }

    fn play_round(engine: &mut MatchEngine, ledger: &mut CurrencyLedger) -> Vec<MatchEvent> {
        engine.start_round();
        engine.flush(ledger)
    }

    #[test]
    fn test_stage_timing() {
        let settings = Settings::default();
        let mut ledger = CurrencyLedger::default();
        let mut engine = engine(&settings, &[(10, 4)]);

        let dealt = engine.start_round().unwrap();
        assert!(matches!(dealt, MatchEvent::Dealt { round: 1, .. }));
        assert_eq!(engine.state().phase, MatchPhase::Dealing);
        assert!(engine.state().face_down());

        assert!(engine.advance(499, &mut ledger).is_empty());
        assert_eq!(engine.state().phase, MatchPhase::Dealing);

        let events = engine.advance(1, &mut ledger);
        assert_eq!(events.len(), 1);
        assert_eq!(engine.state().phase, MatchPhase::Revealing);
        assert_eq!(engine.state().player_wins, 1);

        engine.advance(1000, &mut ledger);
        assert_eq!(engine.state().phase, MatchPhase::Settled);

        let events = engine.advance(2000, &mut ledger);
        assert_eq!(events, vec![MatchEvent::NextRound { round: 2 }]);
        assert_eq!(engine.state().phase, MatchPhase::Ready);
        assert_eq!(engine.pending_timers(), 0);
    }

    #[test]
    fn test_one_large_tick_runs_whole_round() {
        let settings = Settings::default();
        let mut ledger = CurrencyLedger::default();
        let mut engine = engine(&settings, &[(3, 12)]);

        engine.start_round();
        let events = engine.advance(settings.timings.round_length(), &mut ledger);
        assert_eq!(events.len(), 3);
        assert_eq!(engine.state().opponent_wins, 1);
        assert_eq!(engine.state().round_number, 2);
    }

    #[test]
    fn test_victory_credits_reward() {
        let settings = Settings::default();
        let mut ledger = CurrencyLedger::new(100);
        let mut engine = engine(&settings, &[(14, 2)]);

        for _ in 0..3 {
            play_round(&mut engine, &mut ledger);
        }

        let state = engine.state();
        assert_eq!(state.phase, MatchPhase::Concluded);
        assert_eq!(state.player_wins, 3);
        assert_eq!(state.outcome, Some(MatchOutcome::Victory));
        assert_eq!(ledger.balance(), 125);
    }

    #[test]
    fn test_defeat_debits_wager() {
        let settings = Settings::default();
        let mut ledger = CurrencyLedger::new(100);
        let mut engine = engine(&settings, &[(5, 9)]);

        let mut last = Vec::new();
        for _ in 0..3 {
            last = play_round(&mut engine, &mut ledger);
        }

        assert_eq!(engine.state().outcome, Some(MatchOutcome::Defeat));
        assert_eq!(ledger.balance(), 90);
        assert_eq!(
            last.last(),
            Some(&MatchEvent::Concluded {
                outcome: MatchOutcome::Defeat,
                credits_delta: -10,
                balance: 90,
            })
        );
    }

    #[test]
    fn test_defeat_clamps_balance() {
        let settings = Settings::default();
        let mut ledger = CurrencyLedger::new(4);
        let mut engine = engine(&settings, &[(2, 3)]);

        let mut last = Vec::new();
        for _ in 0..3 {
            last = play_round(&mut engine, &mut ledger);
        }

        assert_eq!(ledger.balance(), 0);
        assert!(matches!(
            last.last(),
            Some(MatchEvent::Concluded {
                credits_delta: -4,
                ..
            })
        ));
    }

    #[test]
    fn test_close_match_goes_to_five() {
        let settings = Settings::default();
        let mut ledger = CurrencyLedger::new(100);
        let mut engine = engine(&settings, &[(9, 8), (8, 9), (9, 8), (8, 9), (9, 8)]);

        for _ in 0..5 {
            play_round(&mut engine, &mut ledger);
        }

        let state = engine.state();
        assert_eq!(state.round_number, 5);
        assert_eq!((state.player_wins, state.opponent_wins), (3, 2));
        assert_eq!(state.outcome, Some(MatchOutcome::Victory));
        assert_eq!(ledger.balance(), 125);
    }

    #[test]
    fn test_ties_consume_rounds_without_ending() {
        let settings = Settings::default();
        let mut ledger = CurrencyLedger::new(100);
        let mut engine = engine(&settings, &[(7, 7)]);

        for _ in 0..5 {
            play_round(&mut engine, &mut ledger);
        }

        let state = engine.state();
        assert_eq!(state.round_number, 6);
        assert_eq!(state.player_wins, 0);
        assert_eq!(state.opponent_wins, 0);
        assert_eq!(state.phase, MatchPhase::Ready);
        assert_eq!(ledger.balance(), 100);
    }

    #[test]
    fn test_round_limit_draws_match() {
        let settings = Settings::capped_preset();
        let mut ledger = CurrencyLedger::new(100);
        let mut engine = engine(&settings, &[(7, 7)]);

        for _ in 0..5 {
            play_round(&mut engine, &mut ledger);
        }

        let state = engine.state();
        assert_eq!(state.round_number, 5);
        assert_eq!(state.outcome, Some(MatchOutcome::Drawn));
        assert_eq!(ledger.balance(), 100);
    }

    #[test]
    fn test_ties_favor_opponent_rule() {
        let settings = Settings::default();
        let mut ledger = CurrencyLedger::new(100);
        let mut engine = MatchEngine::new(ADMIRALS[1], &settings)
            .with_draw_source(Box::new(ScriptedDraw::rounds(&[(11, 11)])));

        for _ in 0..3 {
            play_round(&mut engine, &mut ledger);
        }

        assert_eq!(engine.state().opponent_wins, 3);
        assert_eq!(engine.state().outcome, Some(MatchOutcome::Defeat));
        assert_eq!(ledger.balance(), 90);
    }

    #[test]
    fn test_start_round_ignored_mid_round() {
        let settings = Settings::default();
        let mut engine = engine(&settings, &[(6, 4), (13, 2)]);

        engine.start_round();
        let snapshot = engine.state().clone();

        assert!(engine.start_round().is_none());
        assert_eq!(engine.state(), &snapshot);
        assert_eq!(engine.pending_timers(), 1);
    }

    #[test]
    fn test_start_round_ignored_when_concluded() {
        let settings = Settings::default();
        let mut ledger = CurrencyLedger::new(100);
        let mut engine = engine(&settings, &[(14, 2)]);

        for _ in 0..3 {
            play_round(&mut engine, &mut ledger);
        }
        let snapshot = engine.state().clone();

        assert!(engine.start_round().is_none());
        assert!(engine.flush(&mut ledger).is_empty());
        assert_eq!(engine.state(), &snapshot);
        assert_eq!(ledger.balance(), 125);
    }

    #[test]
    fn test_reset_cancels_pending_round() {
        let settings = Settings::default();
        let mut ledger = CurrencyLedger::new(100);
        let mut engine = engine(&settings, &[(14, 2)]);

        play_round(&mut engine, &mut ledger);
        engine.start_round();
        engine.advance(600, &mut ledger);
        assert_eq!(engine.state().player_wins, 2);

        engine.reset();
        assert_eq!(engine.state(), &MatchState::new());
        assert!(engine.advance(10_000, &mut ledger).is_empty());
        assert_eq!(engine.state(), &MatchState::new());

        // The reset engine plays on normally
        assert!(engine.start_round().is_some());
        assert_eq!(engine.flush(&mut ledger).len(), 3);
    }

    #[test]
    fn test_abort_never_settles() {
        let settings = Settings::default();
        let mut ledger = CurrencyLedger::new(100);
        let mut engine = engine(&settings, &[(2, 14)]);

        play_round(&mut engine, &mut ledger);
        play_round(&mut engine, &mut ledger);
        engine.start_round();
        assert_eq!(engine.pending_timers(), 1);

        let last = engine.abort();
        assert_eq!(last.phase, MatchPhase::Dealing);
        assert_eq!(last.opponent_wins, 2);
        assert!(last.outcome.is_none());
        assert_eq!(ledger.balance(), 100);
    }

    #[test]
    fn test_victory_pays_opponent_reward() {
        let settings = Settings::default();
        let mut ledger = CurrencyLedger::new(100);
        let mut engine = MatchEngine::new(ADMIRALS[1], &settings)
            .with_draw_source(Box::new(ScriptedDraw::rounds(&[(14, 5)])));

        let mut last = Vec::new();
        for _ in 0..3 {
            last = play_round(&mut engine, &mut ledger);
        }

        assert_eq!(engine.state().outcome, Some(MatchOutcome::Victory));
        assert_eq!(ledger.balance(), 140);
        assert_eq!(
            last.last(),
            Some(&MatchEvent::Concluded {
                outcome: MatchOutcome::Victory,
                credits_delta: 40,
                balance: 140,
            })
        );
    }

    #[test]
    fn test_instant_settings_resolve_on_zero_tick() {
        let settings = Settings::instant();
        let mut ledger = CurrencyLedger::new(100);
        let mut engine = engine(&settings, &[(12, 3)]);

        engine.start_round();
        let events = engine.advance(0, &mut ledger);
        assert_eq!(events.len(), 3);
        assert_eq!(engine.state().phase, MatchPhase::Ready);
    }
}

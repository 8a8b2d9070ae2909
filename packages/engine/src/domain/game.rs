//! The `Game` facade: the synchronous method-call surface consumed by the
//! room/session collaborator.
//!
//! One instance per table, exclusively owned; every operation is a
//! non-blocking in-memory transformation that either completes its state
//! transition or fails before mutating anything observable. Call
//! serialization per instance is the collaborator's responsibility.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, error, info, warn};

use crate::domain::cards::Card;
use crate::domain::dealing::{deal_from_tail, full_deck, shuffle};
use crate::domain::hands::RankedHand;
use crate::domain::hints::{candidate_plays, HintCache};
use crate::domain::legality::check_valid_play;
use crate::domain::roles::{assign_roles, locate_holder, locate_role_cards, GameMode};
use crate::domain::rules::{HAND_SIZE, PLAYERS};
use crate::domain::scoring::{apply_outcome, ScoreResult};
use crate::domain::snapshot::{state_for_player, GameView};
use crate::domain::state::{GameState, Player, PlayerId};
use crate::domain::turns::{
    active_player_count, all_others_passed, is_eligible, next_eligible_index, reset_pile,
};
use crate::domain::win::{evaluate, GameOutcome};
use crate::errors::{EngineError, RuleViolationKind, SetupIssueKind};

/// Result of an accepted play.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayOutcome {
    /// Classification of the accepted hand.
    pub hand: RankedHand,
    /// The player emptied their hand with this play.
    pub player_finished: bool,
    /// The game reached a terminal result.
    pub game_over: bool,
    pub score_result: Option<ScoreResult>,
}

/// Result of an accepted pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PassOutcome {
    /// Every other active player passed; the table was cleared and the lead
    /// returned.
    pub pile_cleared: bool,
    /// Set only on the fatal turn-advancement path.
    pub game_over: bool,
    pub score_result: Option<ScoreResult>,
}

/// A suggested play plus the cycle index to send on the next request.
#[derive(Debug, Clone, PartialEq)]
pub struct Hint {
    pub cards: Vec<Card>,
    pub next_index: usize,
}

/// In-memory rule engine for one table.
pub struct Game {
    room_id: String,
    pub(crate) state: GameState,
    rng: ChaCha20Rng,
    hints: HintCache,
}

impl Game {
    /// New game with an OS-entropy shuffle seed.
    pub fn new(room_id: impl Into<String>) -> Self {
        Self::with_seed(room_id, rand::random())
    }

    /// New game with a fixed shuffle seed, for tests and simulation.
    pub fn with_seed(room_id: impl Into<String>, seed: [u8; 32]) -> Self {
        Self {
            room_id: room_id.into(),
            state: GameState::default(),
            rng: ChaCha20Rng::from_seed(seed),
            hints: HintCache::default(),
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn started(&self) -> bool {
        self.state.started
    }

    pub fn finished(&self) -> bool {
        self.state.finished
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    /// Connected, unfinished player count; the room layer force-ends the
    /// game when this drops below two.
    pub fn active_player_count(&self) -> usize {
        active_player_count(&self.state.players)
    }

    pub fn current_player_id(&self) -> Option<PlayerId> {
        if self.state.finished {
            return None;
        }
        self.state
            .current_player
            .and_then(|idx| self.state.players.get(idx))
            .map(|p| p.id)
    }

    /// Seat a player before the game starts. False if the table is full,
    /// the id is already seated, or the slot is taken.
    pub fn add_player(&mut self, id: PlayerId, name: impl Into<String>, slot: u8) -> bool {
        if self.state.started
            || self.state.players.len() >= PLAYERS
            || self
                .state
                .players
                .iter()
                .any(|p| p.id == id || p.slot == slot)
        {
            return false;
        }
        self.state.players.push(Player::new(id, name, slot));
        self.state.players.sort_by_key(|p| p.slot);
        true
    }

    /// Pre-game: frees the seat. Mid-game: only marks the player
    /// disconnected; there is no structural removal while a game runs.
    pub fn remove_player(&mut self, id: PlayerId) {
        if self.state.started {
            self.set_player_connected(id, false);
        } else {
            self.state.players.retain(|p| p.id != id);
        }
    }

    pub fn set_player_connected(&mut self, id: PlayerId, connected: bool) {
        if let Some(player) = self.state.player_mut(id) {
            player.connected = connected;
            debug!(
                room_id = %self.room_id,
                player_id = id,
                connected,
                "Player connection status changed"
            );
        }
    }

    /// Reset, shuffle, deal, assign roles, and hand the lead to the
    /// Diamond-4 holder. Cumulative scores carry over; everything else is
    /// repopulated. On error nothing observable has changed and the game
    /// must not be treated as started.
    pub fn start_game(&mut self) -> Result<(), EngineError> {
        if self.state.players.len() != PLAYERS {
            return Err(EngineError::setup(
                SetupIssueKind::PlayerCount,
                format!("Need exactly {PLAYERS} players to start"),
            ));
        }

        // Build the deal on locals so a corrupt deal leaves no trace.
        let mut deck = full_deck();
        shuffle(&mut deck, &mut self.rng);
        let hands = deal_from_tail(&mut deck, PLAYERS, HAND_SIZE)?;
        let (s3, sa) = locate_role_cards(&hands)?;
        let d4 = locate_holder(&hands, Card::DIAMOND_FOUR).ok_or_else(|| {
            EngineError::setup(
                SetupIssueKind::MissingDiamondFour,
                "Diamond-4 missing from deal",
            )
        })?;

        for (player, hand) in self.state.players.iter_mut().zip(hands) {
            player.hand = hand;
            player.connected = true;
            player.finished = false;
            player.role = None;
        }
        let mode = assign_roles(&mut self.state.players, s3, sa);

        self.state.deck = deck;
        self.state.center_pile.clear();
        self.state.last_hand = None;
        self.state.current_player = Some(d4);
        self.state.first_turn = true;
        self.state.started = true;
        self.state.finished = false;
        self.state.winner = None;
        self.state.mode = Some(mode);
        self.state.finish_order.clear();
        self.state.consecutive_passes = 0;
        self.state.last_player_who_played = None;
        self.hints.invalidate();

        info!(
            room_id = %self.room_id,
            mode = ?mode,
            lead_slot = self.state.players[d4].slot,
            "Game started"
        );
        Ok(())
    }

    /// Play a set of cards for `player_id`.
    pub fn play_card(
        &mut self,
        player_id: PlayerId,
        cards: &[Card],
    ) -> Result<PlayOutcome, EngineError> {
        let idx = self.require_actor(player_id)?;

        for (i, card) in cards.iter().enumerate() {
            if cards[i + 1..].contains(card) {
                return Err(EngineError::rule(
                    RuleViolationKind::DuplicateCards,
                    format!("Card {card} selected more than once"),
                ));
            }
        }
        let hand = &self.state.players[idx].hand;
        if !cards.iter().all(|c| hand.contains(c)) {
            return Err(EngineError::rule(
                RuleViolationKind::CardsNotHeld,
                "Selected cards are not in your hand",
            ));
        }

        let ranked = check_valid_play(cards, self.state.last_hand.as_ref(), self.state.first_turn)?;

        // Validation done; commit the play.
        let player = &mut self.state.players[idx];
        player.hand.retain(|c| !cards.contains(c));
        let player_finished = player.hand.is_empty();
        self.state.center_pile = ranked.cards.clone();
        self.state.last_hand = Some(ranked.clone());
        self.state.last_player_who_played = Some(player_id);
        self.state.consecutive_passes = 0;
        self.state.first_turn = false;
        self.hints.invalidate();
        debug!(
            room_id = %self.room_id,
            player_id,
            category = ?ranked.category(),
            size = ranked.cards.len(),
            "Play accepted"
        );

        let mut outcome = PlayOutcome {
            hand: ranked,
            player_finished,
            game_over: false,
            score_result: None,
        };

        if player_finished {
            self.state.finish_order.push(player_id);
            self.state.players[idx].finished = true;
            if self.state.winner.is_none() {
                self.state.winner = Some(player_id);
            }
            info!(
                room_id = %self.room_id,
                player_id,
                place = self.state.finish_order.len(),
                "Player finished"
            );

            if let Some(result) = self.instant_outcome() {
                outcome.score_result = Some(self.finish_with(result));
                outcome.game_over = true;
                return Ok(outcome);
            }

            if self.state.finish_order.len() == self.state.players.len() - 1 {
                // Only one player left; append them and settle.
                if let Some(last) = self.state.players.iter().find(|p| !p.finished) {
                    self.state.finish_order.push(last.id);
                }
                let result = match self.instant_outcome() {
                    Some(result) => result,
                    None => {
                        warn!(
                            room_id = %self.room_id,
                            finish_order = ?self.state.finish_order,
                            "No matched result with all but one finished; scoring as a draw"
                        );
                        GameOutcome::Draw
                    }
                };
                outcome.score_result = Some(self.finish_with(result));
                outcome.game_over = true;
                return Ok(outcome);
            }
        }

        match next_eligible_index(&self.state.players, idx) {
            Ok(next) => self.state.current_player = Some(next),
            Err(err) => {
                outcome.score_result = self.force_end_for_fault(&err);
                outcome.game_over = true;
            }
        }
        Ok(outcome)
    }

    /// Pass the turn. Illegal when the table is clear or the passer led the
    /// table hand.
    pub fn handle_pass(&mut self, player_id: PlayerId) -> Result<PassOutcome, EngineError> {
        let idx = self.require_actor(player_id)?;

        if self.state.last_hand.is_none() || self.state.last_player_who_played == Some(player_id) {
            return Err(EngineError::rule(
                RuleViolationKind::MustPlay,
                "You must play a hand",
            ));
        }

        self.state.consecutive_passes += 1;
        self.hints.invalidate();
        debug!(room_id = %self.room_id, player_id, "Player passed");

        if all_others_passed(&self.state) {
            let leader_id = self
                .state
                .last_player_who_played
                .take()
                .unwrap_or(player_id);
            reset_pile(&mut self.state);

            let leader_idx = self.state.player_index(leader_id).unwrap_or(idx);
            if is_eligible(&self.state.players[leader_idx]) {
                self.state.current_player = Some(leader_idx);
            } else {
                // The round winner is gone; the lead moves on from their seat.
                match next_eligible_index(&self.state.players, leader_idx) {
                    Ok(next) => self.state.current_player = Some(next),
                    Err(err) => {
                        let score_result = self.force_end_for_fault(&err);
                        return Ok(PassOutcome {
                            pile_cleared: true,
                            game_over: true,
                            score_result,
                        });
                    }
                }
            }
            info!(
                room_id = %self.room_id,
                leader_id,
                "All other active players passed; table cleared"
            );
            return Ok(PassOutcome {
                pile_cleared: true,
                game_over: false,
                score_result: None,
            });
        }

        match next_eligible_index(&self.state.players, idx) {
            Ok(next) => {
                self.state.current_player = Some(next);
                Ok(PassOutcome {
                    pile_cleared: false,
                    game_over: false,
                    score_result: None,
                })
            }
            Err(err) => {
                let score_result = self.force_end_for_fault(&err);
                Ok(PassOutcome {
                    pile_cleared: false,
                    game_over: true,
                    score_result,
                })
            }
        }
    }

    /// Suggest a legal play, cycling through the cached candidate list on
    /// repeated requests.
    pub fn find_hint(
        &mut self,
        player_id: PlayerId,
        cycle_index: usize,
    ) -> Result<Hint, EngineError> {
        let idx = self.require_actor(player_id)?;

        if self.hints.is_populated_for(player_id) {
            let next = (cycle_index + 1) % self.hints.plays.len();
            return Ok(Hint {
                cards: self.hints.plays[next].clone(),
                next_index: next,
            });
        }

        let player = &self.state.players[idx];
        let candidates = candidate_plays(
            &player.hand,
            self.state.last_hand.as_ref(),
            self.state.first_turn,
        );
        if candidates.is_empty() {
            self.hints.invalidate();
            return Err(EngineError::rule(
                RuleViolationKind::NoLegalPlay,
                "No legal play available",
            ));
        }
        self.hints.populate(player_id, &candidates);
        Ok(Hint {
            cards: self.hints.plays[0].clone(),
            next_index: 0,
        })
    }

    /// Force the terminal state: back-fill the finish order by ascending
    /// remaining hand size and settle scores. Idempotent; None when the
    /// game is already finished.
    pub fn end_game(&mut self, reason: &str) -> Option<ScoreResult> {
        if self.state.finished {
            return None;
        }
        self.state.finished = true;
        self.state.started = false;
        self.state.current_player = None;
        self.hints.invalidate();
        info!(room_id = %self.room_id, reason, "Game ended");

        let mut remaining: Vec<(usize, PlayerId)> = self
            .state
            .players
            .iter()
            .filter(|p| !self.state.finish_order.contains(&p.id))
            .map(|p| (p.hand.len(), p.id))
            .collect();
        remaining.sort_by_key(|&(len, _)| len);
        self.state
            .finish_order
            .extend(remaining.into_iter().map(|(_, id)| id));

        let outcome = match self.instant_outcome() {
            Some(outcome) => outcome,
            None => {
                warn!(
                    room_id = %self.room_id,
                    finish_order = ?self.state.finish_order,
                    "Fallback scoring without a matched result; scoring as a draw"
                );
                GameOutcome::Draw
            }
        };
        let mode = self.state.mode.unwrap_or(GameMode::Standard);
        Some(apply_outcome(&mut self.state.players, mode, outcome))
    }

    /// Skip a current player who just became unavailable, without
    /// synthesizing a pass.
    pub fn force_advance_turn(&mut self) -> Result<(), EngineError> {
        if !self.state.started || self.state.finished {
            return Err(EngineError::rule(
                RuleViolationKind::GameNotActive,
                "Game is not running",
            ));
        }
        let from = self.state.require_current("force_advance_turn")?;
        match next_eligible_index(&self.state.players, from) {
            Ok(next) => {
                self.state.current_player = Some(next);
                self.hints.invalidate();
                Ok(())
            }
            Err(err) => {
                self.force_end_for_fault(&err);
                Err(err)
            }
        }
    }

    /// Read-only projection for one recipient.
    pub fn state_for_player(&self, requesting_id: PlayerId) -> GameView {
        state_for_player(&self.state, requesting_id)
    }

    /// Common per-action checks: game running, player seated, their turn,
    /// connected, not finished.
    fn require_actor(&self, player_id: PlayerId) -> Result<usize, EngineError> {
        if !self.state.started || self.state.finished {
            return Err(EngineError::rule(
                RuleViolationKind::GameNotActive,
                "Game has not started or is already over",
            ));
        }
        let idx = self.state.player_index(player_id).ok_or_else(|| {
            EngineError::rule(RuleViolationKind::UnknownPlayer, "Player is not seated")
        })?;
        if self.state.current_player != Some(idx) {
            return Err(EngineError::rule(
                RuleViolationKind::OutOfTurn,
                "It is not your turn",
            ));
        }
        let player = &self.state.players[idx];
        if !player.connected {
            return Err(EngineError::rule(
                RuleViolationKind::Disconnected,
                "You are disconnected",
            ));
        }
        if player.finished {
            return Err(EngineError::rule(
                RuleViolationKind::AlreadyFinished,
                "You have already finished",
            ));
        }
        Ok(idx)
    }

    fn instant_outcome(&self) -> Option<GameOutcome> {
        let mode = self.state.mode?;
        evaluate(mode, &self.state.finish_roles())
    }

    /// Settle a matched terminal result.
    fn finish_with(&mut self, outcome: GameOutcome) -> ScoreResult {
        self.state.finished = true;
        self.state.started = false;
        self.state.current_player = None;
        self.hints.invalidate();
        let mode = self.state.mode.unwrap_or(GameMode::Standard);
        info!(room_id = %self.room_id, %outcome, "Game result determined");
        apply_outcome(&mut self.state.players, mode, outcome)
    }

    /// Structural fault: log every player's state and force-end with a
    /// generic reason.
    fn force_end_for_fault(&mut self, err: &EngineError) -> Option<ScoreResult> {
        let player_states: Vec<(String, bool, bool)> = self
            .state
            .players
            .iter()
            .map(|p| (p.name.clone(), p.finished, p.connected))
            .collect();
        error!(
            room_id = %self.room_id,
            error = %err,
            ?player_states,
            "Turn advancement failed; force-ending game"
        );
        self.state.current_player = None;
        self.end_game("turn advancement error")
    }
}

//! In-memory self-play driver over the engine facade.
//!
//! Runs a full game with scripted bot policies, checking engine invariants
//! at every step. Any invariant breach or stuck game is a simulator error
//! with enough context to reproduce the run from its seed.

use clap::ValueEnum;
use engine::{Card, EngineError, Game, GameOutcome, PlayerId, RuleViolationKind, ScoreResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::debug;

const PLAYERS: usize = 4;
const DECK_SIZE: usize = 52;

/// Generous bound: a four-player game resolves in far fewer actions.
const STEP_LIMIT: usize = 2_000;

/// How a bot chooses among the legal candidate plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// Always the weakest legal play.
    Greedy,
    /// A uniformly random legal play.
    Random,
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("game {game_no}: engine rejected a simulator action: {source}")]
    Rejected {
        game_no: u32,
        #[source]
        source: EngineError,
    },
    #[error("game {game_no}: no progress after {steps} steps")]
    Stuck { game_no: u32, steps: usize },
    #[error("game {game_no}: invariant breached: {detail}")]
    Invariant { game_no: u32, detail: String },
}

/// Outcome of one simulated game.
#[derive(Debug, Clone)]
pub struct GameReport {
    pub outcome: GameOutcome,
    pub score_result: ScoreResult,
    /// Slot of the first player to empty their hand.
    pub winner_slot: u8,
    pub steps: usize,
}

pub struct Simulator {
    game_no: u32,
    policy: Policy,
    rng: ChaCha20Rng,
}

impl Simulator {
    pub fn new(game_no: u32, policy: Policy, seed: [u8; 32]) -> Self {
        Self {
            game_no,
            policy,
            rng: ChaCha20Rng::from_seed(seed),
        }
    }

    /// Seat four bots, start, and drive the game to its terminal result.
    pub fn run(&mut self, seed: [u8; 32]) -> Result<GameReport, SimError> {
        let mut game = Game::with_seed(format!("sim-{}", self.game_no), seed);
        for slot in 0..PLAYERS as u8 {
            let id = PlayerId::from(slot) + 1;
            assert!(game.add_player(id, format!("bot-{slot}"), slot));
        }
        game.start_game()
            .map_err(|source| SimError::Rejected {
                game_no: self.game_no,
                source,
            })?;

        let mut steps = 0;
        loop {
            steps += 1;
            if steps > STEP_LIMIT {
                return Err(SimError::Stuck {
                    game_no: self.game_no,
                    steps,
                });
            }

            let pid = game.current_player_id().ok_or_else(|| SimError::Invariant {
                game_no: self.game_no,
                detail: "running game has no current player".into(),
            })?;
            let cards_before = self.total_cards(&game)?;
            let finished_before = game
                .players()
                .iter()
                .filter(|p| p.finished)
                .count();

            let step = match self.choose_play(&mut game, pid)? {
                Some(cards) => {
                    let outcome = game.play_card(pid, &cards).map_err(|source| {
                        SimError::Rejected {
                            game_no: self.game_no,
                            source,
                        }
                    })?;
                    debug!(
                        game_no = self.game_no,
                        player_id = pid,
                        played = cards.len(),
                        "bot played"
                    );
                    self.check_play_invariants(
                        &game,
                        cards_before,
                        cards.len(),
                        finished_before,
                    )?;
                    (outcome.game_over, outcome.score_result)
                }
                None => {
                    let outcome = game.handle_pass(pid).map_err(|source| {
                        SimError::Rejected {
                            game_no: self.game_no,
                            source,
                        }
                    })?;
                    debug!(game_no = self.game_no, player_id = pid, "bot passed");
                    (outcome.game_over, outcome.score_result)
                }
            };

            if let (true, Some(score_result)) = step {
                let winner_slot = game
                    .players()
                    .iter()
                    .find(|p| p.hand.is_empty())
                    .map(|p| p.slot)
                    .ok_or_else(|| SimError::Invariant {
                        game_no: self.game_no,
                        detail: "terminal game has no finished player".into(),
                    })?;
                return Ok(GameReport {
                    outcome: score_result.outcome,
                    score_result,
                    winner_slot,
                    steps,
                });
            }
        }
    }

    /// Enumerate the hint cycle and pick per policy; None means pass.
    fn choose_play(
        &mut self,
        game: &mut Game,
        pid: PlayerId,
    ) -> Result<Option<Vec<Card>>, SimError> {
        let first = match game.find_hint(pid, 0) {
            Ok(hint) => hint,
            Err(err) if err.rule_kind() == Some(RuleViolationKind::NoLegalPlay) => {
                return Ok(None);
            }
            Err(source) => {
                return Err(SimError::Rejected {
                    game_no: self.game_no,
                    source,
                })
            }
        };

        if self.policy == Policy::Greedy {
            return Ok(Some(first.cards));
        }

        // Random policy wants the full candidate list; walk the cycle until
        // it wraps back to the weakest play.
        let mut candidates = vec![first.cards];
        let mut idx = first.next_index;
        loop {
            let hint = game.find_hint(pid, idx).map_err(|source| SimError::Rejected {
                game_no: self.game_no,
                source,
            })?;
            if hint.next_index == 0 {
                break;
            }
            idx = hint.next_index;
            candidates.push(hint.cards);
        }
        let pick = self.rng.random_range(0..candidates.len());
        Ok(Some(candidates.swap_remove(pick)))
    }

    fn total_cards(&self, game: &Game) -> Result<usize, SimError> {
        let in_hands: usize = game.players().iter().map(|p| p.hand.len()).sum();
        if in_hands > DECK_SIZE {
            return Err(SimError::Invariant {
                game_no: self.game_no,
                detail: format!("{in_hands} cards in hands exceeds the deck"),
            });
        }
        Ok(in_hands)
    }

    fn check_play_invariants(
        &self,
        game: &Game,
        cards_before: usize,
        played: usize,
        finished_before: usize,
    ) -> Result<(), SimError> {
        let cards_after = self.total_cards(game)?;
        if cards_after != cards_before - played {
            return Err(SimError::Invariant {
                game_no: self.game_no,
                detail: format!(
                    "card conservation broken: {cards_before} - {played} != {cards_after}"
                ),
            });
        }
        let finished_after = game.players().iter().filter(|p| p.finished).count();
        if finished_after < finished_before {
            return Err(SimError::Invariant {
                game_no: self.game_no,
                detail: "finished player count decreased".into(),
            });
        }
        Ok(())
    }
}

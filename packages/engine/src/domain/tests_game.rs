//! Scenario tests driving the `Game` facade end to end.

use crate::domain::cards::Card;
use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::game::Game;
use crate::domain::roles::{GameMode, Role};
use crate::domain::rules::{DECK_SIZE, HAND_SIZE, PLAYERS};
use crate::domain::test_state_helpers::started_game_with_hands;
use crate::domain::win::GameOutcome;
use crate::errors::{EngineError, RuleViolationKind, SetupIssueKind};

fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).unwrap()
}

fn rule_kind(err: EngineError) -> RuleViolationKind {
    err.rule_kind().expect("expected a rule violation")
}

fn full_table() -> Game {
    let mut game = Game::with_seed("room-1", [7; 32]);
    for slot in 0..PLAYERS as u8 {
        let id = i64::from(slot) + 1;
        assert!(game.add_player(id, test_support::unique_str("player"), slot));
    }
    game
}

mod seating {
    use super::*;

    #[test]
    fn rejects_duplicate_ids_slots_and_overflow() {
        let mut game = Game::with_seed("room-1", [0; 32]);
        assert!(game.add_player(1, "a", 0));
        assert!(!game.add_player(1, "again", 1));
        assert!(game.add_player(2, "b", 1));
        assert!(!game.add_player(3, "slot-taken", 1));
        assert!(game.add_player(3, "c", 2));
        assert!(game.add_player(4, "d", 3));
        assert!(!game.add_player(5, "fifth", 3));
    }

    #[test]
    fn players_are_kept_in_slot_order() {
        let mut game = Game::with_seed("room-1", [0; 32]);
        assert!(game.add_player(10, "late-slot", 3));
        assert!(game.add_player(11, "early-slot", 0));
        let slots: Vec<u8> = game.players().iter().map(|p| p.slot).collect();
        assert_eq!(slots, vec![0, 3]);
    }

    #[test]
    fn remove_before_start_frees_the_seat() {
        let mut game = full_table();
        game.remove_player(2);
        assert_eq!(game.players().len(), 3);
        assert!(game.add_player(9, "replacement", 1));
    }

    #[test]
    fn remove_mid_game_only_disconnects() {
        let mut game = full_table();
        game.start_game().unwrap();
        game.remove_player(2);
        assert_eq!(game.players().len(), PLAYERS);
        assert!(!game.players().iter().find(|p| p.id == 2).unwrap().connected);
    }

    #[test]
    fn cannot_seat_after_start() {
        let mut game = full_table();
        game.start_game().unwrap();
        game.remove_player(2);
        assert!(!game.add_player(9, "too-late", 1));
    }
}

mod starting {
    use super::*;

    #[test]
    fn start_needs_exactly_four_players() {
        let mut game = Game::with_seed("room-1", [0; 32]);
        game.add_player(1, "a", 0);
        game.add_player(2, "b", 1);
        let err = game.start_game().unwrap_err();
        assert!(matches!(
            err,
            EngineError::Setup {
                kind: SetupIssueKind::PlayerCount,
                ..
            }
        ));
        assert!(!game.started());
    }

    #[test]
    fn start_deals_everything_and_seats_the_diamond_four_holder() {
        let mut game = full_table();
        game.start_game().unwrap();

        assert!(game.started());
        assert!(!game.finished());
        assert!(game.state.deck.is_empty());
        let total: usize = game.players().iter().map(|p| p.hand.len()).sum();
        assert_eq!(total, DECK_SIZE);
        for player in game.players() {
            assert_eq!(player.hand.len(), HAND_SIZE);
            let mut sorted = player.hand.clone();
            sorted.sort_unstable();
            assert_eq!(player.hand, sorted);
        }

        let leader = game.current_player_id().unwrap();
        assert!(game
            .state
            .player(leader)
            .unwrap()
            .hand
            .contains(&Card::DIAMOND_FOUR));
        assert!(game.state.first_turn);
    }

    #[test]
    fn start_assigns_roles_consistent_with_the_mode() {
        let mut game = full_table();
        game.start_game().unwrap();
        let mode = game.state.mode.unwrap();
        let landlord_side = game
            .players()
            .iter()
            .filter(|p| {
                matches!(p.role, Some(Role::Landlord) | Some(Role::DoubleLandlord))
            })
            .count();
        match mode {
            GameMode::Standard => assert_eq!(landlord_side, 2),
            GameMode::DoubleLandlord => assert_eq!(landlord_side, 1),
        }
        assert!(game.players().iter().all(|p| p.role.is_some()));
    }

    #[test]
    fn restart_preserves_cumulative_scores() {
        let mut game = full_table();
        game.start_game().unwrap();
        game.state.player_mut(1).unwrap().score = 5;
        game.state.finished = true;
        game.state.started = false;
        game.start_game().unwrap();
        assert_eq!(game.state.player(1).unwrap().score, 5);
        assert!(game.state.finish_order.is_empty());
        assert!(game.state.winner.is_none());
    }
}

mod playing {
    use super::*;

    #[test]
    fn opening_play_must_contain_the_diamond_four() {
        let mut game = started_game_with_hands([
            cards(&["4D", "6C", "3S"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        let err = game.play_card(1, &cards(&["6C"])).unwrap_err();
        assert_eq!(rule_kind(err), RuleViolationKind::FirstPlayNeedsDiamondFour);

        let outcome = game.play_card(1, &cards(&["4D"])).unwrap();
        assert!(!outcome.player_finished);
        assert!(!game.state.first_turn);
        assert_eq!(game.state.center_pile, cards(&["4D"]));
    }

    #[test]
    fn turn_rotates_counter_clockwise_after_a_play() {
        let mut game = started_game_with_hands([
            cards(&["4D", "3S"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        game.play_card(1, &cards(&["4D"])).unwrap();
        // Seat 0 acted; counter-clockwise rotation hands the turn to seat 3.
        assert_eq!(game.current_player_id(), Some(4));
        game.play_card(4, &cards(&["9C"])).unwrap();
        assert_eq!(game.current_player_id(), Some(3));
    }

    #[test]
    fn rejects_out_of_turn_unknown_and_unheld_cards() {
        let mut game = started_game_with_hands([
            cards(&["4D", "3S"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        assert_eq!(
            rule_kind(game.play_card(3, &cards(&["6D"])).unwrap_err()),
            RuleViolationKind::OutOfTurn
        );
        assert_eq!(
            rule_kind(game.play_card(99, &cards(&["4D"])).unwrap_err()),
            RuleViolationKind::UnknownPlayer
        );
        assert_eq!(
            rule_kind(game.play_card(1, &cards(&["KD"])).unwrap_err()),
            RuleViolationKind::CardsNotHeld
        );
        assert_eq!(
            rule_kind(game.play_card(1, &cards(&["4D", "4D"])).unwrap_err()),
            RuleViolationKind::DuplicateCards
        );
    }

    #[test]
    fn rejects_actions_before_start_and_after_finish() {
        let mut game = full_table();
        assert_eq!(
            rule_kind(game.play_card(1, &cards(&["4D"])).unwrap_err()),
            RuleViolationKind::GameNotActive
        );
        game.start_game().unwrap();
        game.end_game("test teardown").unwrap();
        assert_eq!(
            rule_kind(game.handle_pass(1).unwrap_err()),
            RuleViolationKind::GameNotActive
        );
    }

    #[test]
    fn disconnected_current_player_cannot_act() {
        let mut game = started_game_with_hands([
            cards(&["4D", "3S"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        game.set_player_connected(1, false);
        assert_eq!(
            rule_kind(game.play_card(1, &cards(&["4D"])).unwrap_err()),
            RuleViolationKind::Disconnected
        );
    }

    #[test]
    fn play_removes_cards_and_conserves_the_rest() {
        let mut game = started_game_with_hands([
            cards(&["4D", "3S", "6C"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        let before: usize = game.players().iter().map(|p| p.hand.len()).sum();
        game.play_card(1, &cards(&["4D"])).unwrap();
        let after: usize = game.players().iter().map(|p| p.hand.len()).sum();
        assert_eq!(after, before - 1);
        assert!(!game.state.player(1).unwrap().hand.contains(&Card::DIAMOND_FOUR));
    }
}

mod passing {
    use super::*;

    fn mid_round_game() -> Game {
        let mut game = started_game_with_hands([
            cards(&["4D", "3S"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        game.play_card(1, &cards(&["4D"])).unwrap();
        game
    }

    #[test]
    fn cannot_pass_on_a_clear_table() {
        let mut game = started_game_with_hands([
            cards(&["4D", "3S"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        assert_eq!(
            rule_kind(game.handle_pass(1).unwrap_err()),
            RuleViolationKind::MustPlay
        );
    }

    #[test]
    fn round_leader_cannot_pass_on_their_own_hand() {
        let mut game = mid_round_game();
        // 4 -> 3 -> 2 pass; the pile clears and player 1 leads again.
        game.handle_pass(4).unwrap();
        game.handle_pass(3).unwrap();
        let outcome = game.handle_pass(2).unwrap();
        assert!(outcome.pile_cleared);
        assert_eq!(game.current_player_id(), Some(1));
        assert_eq!(
            rule_kind(game.handle_pass(1).unwrap_err()),
            RuleViolationKind::MustPlay
        );
    }

    #[test]
    fn pass_round_clears_the_pile_and_returns_the_lead() {
        let mut game = mid_round_game();
        assert!(!game.handle_pass(4).unwrap().pile_cleared);
        assert!(!game.handle_pass(3).unwrap().pile_cleared);
        let outcome = game.handle_pass(2).unwrap();
        assert!(outcome.pile_cleared);
        assert!(game.state.center_pile.is_empty());
        assert!(game.state.last_hand.is_none());
        assert_eq!(game.state.consecutive_passes, 0);
        assert_eq!(game.current_player_id(), Some(1));
    }

    #[test]
    fn an_intervening_play_resets_the_pass_count() {
        let mut game = mid_round_game();
        game.handle_pass(4).unwrap();
        game.play_card(3, &cards(&["6D"])).unwrap();
        assert_eq!(game.state.consecutive_passes, 0);
        // A fresh pass round must again collect passes from all others.
        game.handle_pass(2).unwrap();
        assert!(!game.handle_pass(1).unwrap().pile_cleared);
        assert!(game.handle_pass(4).unwrap().pile_cleared);
        assert_eq!(game.current_player_id(), Some(3));
    }

    #[test]
    fn lead_moves_on_when_the_round_winner_disconnected() {
        let mut game = mid_round_game();
        game.set_player_connected(1, false);
        // With the leader disconnected only two passes are needed.
        game.handle_pass(4).unwrap();
        let outcome = game.handle_pass(3).unwrap();
        assert!(outcome.pile_cleared);
        // Player 1 cannot lead; the lead continues counter-clockwise from
        // their seat.
        assert_eq!(game.current_player_id(), Some(4));
    }
}

mod finishing {
    use super::*;

    #[test]
    fn two_landlords_out_first_is_a_grand_win() {
        let mut game = started_game_with_hands([
            cards(&["4D", "3S"]),
            cards(&["AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        assert_eq!(game.state.mode, Some(GameMode::Standard));

        game.play_card(1, &cards(&["4D"])).unwrap();
        game.handle_pass(4).unwrap();
        game.handle_pass(3).unwrap();
        game.handle_pass(2).unwrap();

        let outcome = game.play_card(1, &cards(&["3S"])).unwrap();
        assert!(outcome.player_finished);
        assert!(!outcome.game_over);
        assert_eq!(game.state.winner, Some(1));
        assert_eq!(game.current_player_id(), Some(4));

        // Player 1 is out; the pass round now needs two passes.
        game.handle_pass(4).unwrap();
        assert!(game.handle_pass(3).unwrap().pile_cleared);
        assert_eq!(game.current_player_id(), Some(4));

        game.play_card(4, &cards(&["8D"])).unwrap();
        game.handle_pass(3).unwrap();
        let outcome = game.play_card(2, &cards(&["AS"])).unwrap();
        assert!(outcome.player_finished);
        assert!(outcome.game_over);
        assert!(game.finished());
        assert_eq!(game.current_player_id(), None);

        let result = outcome.score_result.unwrap();
        assert_eq!(result.outcome, GameOutcome::LandlordGrandWin);
        assert_eq!(result.score_changes[&1], 2);
        assert_eq!(result.score_changes[&2], 2);
        assert_eq!(result.score_changes[&3], -2);
        assert_eq!(result.score_changes[&4], -2);
    }

    #[test]
    fn double_landlord_finishing_first_ends_instantly() {
        let mut game = started_game_with_hands([
            cards(&["4D", "3S", "AS"]),
            cards(&["5D", "5C"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        assert_eq!(game.state.mode, Some(GameMode::DoubleLandlord));

        game.play_card(1, &cards(&["4D"])).unwrap();
        game.handle_pass(4).unwrap();
        game.handle_pass(3).unwrap();
        game.handle_pass(2).unwrap();

        game.play_card(1, &cards(&["AS"])).unwrap();
        game.handle_pass(4).unwrap();
        game.handle_pass(3).unwrap();
        game.handle_pass(2).unwrap();

        let outcome = game.play_card(1, &cards(&["3S"])).unwrap();
        assert!(outcome.game_over);
        let result = outcome.score_result.unwrap();
        assert_eq!(result.outcome, GameOutcome::DoubleLandlordGrandWin);
        assert_eq!(result.score_changes[&1], 6);
        assert_eq!(result.score_changes[&2], -2);
        assert_eq!(result.score_changes[&3], -2);
        assert_eq!(result.score_changes[&4], -2);
    }

    #[test]
    fn three_farmers_out_first_is_a_farmer_grand_win() {
        let mut game = started_game_with_hands([
            cards(&["3S", "AS", "5D", "5C"]),
            cards(&["4D"]),
            cards(&["7D"]),
            cards(&["6D"]),
        ]);
        assert_eq!(game.state.mode, Some(GameMode::DoubleLandlord));

        let outcome = game.play_card(2, &cards(&["4D"])).unwrap();
        assert!(outcome.player_finished);
        assert!(!outcome.game_over);

        game.handle_pass(1).unwrap();
        game.play_card(4, &cards(&["6D"])).unwrap();
        let outcome = game.play_card(3, &cards(&["7D"])).unwrap();
        assert!(outcome.game_over);
        let result = outcome.score_result.unwrap();
        assert_eq!(result.outcome, GameOutcome::FarmerGrandWin);
        assert_eq!(result.score_changes[&1], -6);
        assert_eq!(result.score_changes[&2], 2);
    }

    #[test]
    fn finished_players_keep_their_hand_owned_rounds() {
        // The round leader finishing still holds the table; others must beat
        // the hand or pass, and the cleared lead skips the finished leader.
        let mut game = started_game_with_hands([
            cards(&["4D", "3S"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        game.play_card(1, &cards(&["4D"])).unwrap();
        game.handle_pass(4).unwrap();
        game.handle_pass(3).unwrap();
        game.handle_pass(2).unwrap();
        game.play_card(1, &cards(&["3S"])).unwrap();

        // Nothing beats the 3S single except nothing here; two passes clear.
        assert_eq!(
            rule_kind(game.play_card(4, &cards(&["9C"])).unwrap_err()),
            RuleViolationKind::DoesNotBeat
        );
        game.handle_pass(4).unwrap();
        assert!(game.handle_pass(3).unwrap().pile_cleared);
        assert_eq!(game.current_player_id(), Some(4));
    }
}

mod hints {
    use super::*;

    #[test]
    fn hint_returns_the_weakest_play_then_cycles() {
        let mut game = started_game_with_hands([
            cards(&["4D", "6C", "6H"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "3S"]),
            cards(&["8D", "9C"]),
        ]);
        game.state.first_turn = false;

        let first = game.find_hint(1, 0).unwrap();
        assert_eq!(first.cards, cards(&["4D"]));
        assert_eq!(first.next_index, 0);

        let second = game.find_hint(1, first.next_index).unwrap();
        assert_eq!(second.next_index, 1);
        assert_ne!(second.cards, first.cards);

        // Cycling wraps back to the weakest play.
        let mut idx = second.next_index;
        let len = 4; // three singles plus the pair of sixes
        for _ in 0..len - 1 {
            idx = game.find_hint(1, idx).unwrap().next_index;
        }
        assert_eq!(idx, 0);
    }

    #[test]
    fn first_turn_hints_include_the_diamond_four() {
        let mut game = started_game_with_hands([
            cards(&["4D", "6C", "3S"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        let hint = game.find_hint(1, 0).unwrap();
        assert!(hint.cards.contains(&Card::DIAMOND_FOUR));
    }

    #[test]
    fn hint_cache_invalidated_by_a_play() {
        let mut game = started_game_with_hands([
            cards(&["4D", "6C", "3S"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        game.find_hint(1, 0).unwrap();
        game.play_card(1, &cards(&["4D"])).unwrap();
        // A fresh cache for the next player starts at the weakest play.
        let hint = game.find_hint(4, 5).unwrap();
        assert_eq!(hint.next_index, 0);
        assert_eq!(hint.cards, cards(&["8D"]));
    }

    #[test]
    fn no_legal_play_is_an_error() {
        let mut game = started_game_with_hands([
            cards(&["4D", "3S"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        game.play_card(1, &cards(&["4D"])).unwrap();
        game.play_card(4, &cards(&["9C"])).unwrap();
        // Player 3 holds only 6D and 7D; nothing beats the 9C.
        assert_eq!(
            rule_kind(game.find_hint(3, 0).unwrap_err()),
            RuleViolationKind::NoLegalPlay
        );
    }
}

mod ending {
    use super::*;

    #[test]
    fn end_game_backfills_by_remaining_hand_size() {
        let mut game = started_game_with_hands([
            cards(&["4D"]),
            cards(&["5D", "5C"]),
            cards(&["6D", "7D", "3S"]),
            cards(&["8D", "9C", "TD", "AS"]),
        ]);
        let result = game.end_game("room emptied").unwrap();
        assert_eq!(game.state.finish_order, vec![1, 2, 3, 4]);
        assert!(game.finished());
        assert!(!game.started());
        assert_eq!(game.current_player_id(), None);
        // The two farmers hold the smallest hands, so the back-filled order
        // opens F, F.
        assert_eq!(result.outcome, GameOutcome::FarmerGrandWin);
        assert_eq!(result.score_changes[&1], 2);
        assert_eq!(result.score_changes[&3], -2);
    }

    #[test]
    fn end_game_respects_already_finished_players() {
        let mut game = started_game_with_hands([
            cards(&["4D", "3S"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        game.play_card(1, &cards(&["4D"])).unwrap();
        game.handle_pass(4).unwrap();
        game.handle_pass(3).unwrap();
        game.handle_pass(2).unwrap();
        game.play_card(1, &cards(&["3S"])).unwrap();

        game.end_game("room emptied").unwrap();
        assert_eq!(game.state.finish_order[0], 1);
        assert_eq!(game.state.finish_order.len(), 4);
    }

    #[test]
    fn end_game_is_idempotent() {
        let mut game = started_game_with_hands([
            cards(&["4D"]),
            cards(&["5D"]),
            cards(&["6D", "3S"]),
            cards(&["8D", "AS"]),
        ]);
        assert!(game.end_game("first").is_some());
        assert!(game.end_game("second").is_none());
    }

    #[test]
    fn end_game_without_roles_scores_as_a_draw() {
        // A game force-ended with no role cards dealt (hand-crafted state)
        // falls back to a zero-delta draw.
        let mut game = started_game_with_hands([
            cards(&["4D"]),
            cards(&["5D"]),
            cards(&["6D"]),
            cards(&["8D"]),
        ]);
        let result = game.end_game("room emptied").unwrap();
        assert_eq!(result.outcome, GameOutcome::Draw);
        assert!(result.score_changes.values().all(|&d| d == 0));
    }

    #[test]
    fn force_advance_skips_an_unavailable_current_player() {
        let mut game = started_game_with_hands([
            cards(&["4D", "3S"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        game.set_player_connected(1, false);
        game.force_advance_turn().unwrap();
        assert_eq!(game.current_player_id(), Some(4));
    }

    #[test]
    fn active_count_tracks_disconnects() {
        let mut game = started_game_with_hands([
            cards(&["4D", "3S"]),
            cards(&["5D", "AS"]),
            cards(&["6D", "7D"]),
            cards(&["8D", "9C"]),
        ]);
        assert_eq!(game.active_player_count(), 4);
        game.set_player_connected(2, false);
        game.set_player_connected(3, false);
        assert_eq!(game.active_player_count(), 2);
    }
}

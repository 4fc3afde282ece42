//! Stack and priority integration tests.
//!
//! These tests drive spells through the priority round: casting, passing,
//! responding and resolving in last-in, first-out order.

mod common;

use common::*;
use mtg_rules::cards::catalog;
use mtg_rules::{Action, ActionError, Keyword, Phase, Zone};

// =============================================================================
// Resolution Order
// =============================================================================

/// A response cast on top of a spell resolves first.
#[test]
fn test_response_resolves_before_original_spell() {
    let mut game = main_phase_game(10);
    plains(&mut game, P0, 4);
    plains(&mut game, P1, 2);
    let light = put(&mut game, catalog::banishing_light(), P0, Zone::Hand);
    let technique = put(&mut game, catalog::dual_sun_technique(), P1, Zone::Hand);
    let blade = put(&mut game, catalog::illvoi_galeblade(), P1, Zone::Battlefield);

    assert!(game.execute_action(P0, &Action::cast_targeting(light, &[blade])));
    assert!(game.execute_action(P0, &Action::PassPriority));
    assert_eq!(game.state.priority_player, P1);

    assert!(game.execute_action(P1, &Action::cast_targeting(technique, &[blade])));
    assert_eq!(game.state.stack.len(), 2);

    // Player 1 is tapped out and passes automatically; player 0 passes.
    assert_eq!(game.state.priority_player, P0);
    assert!(game.execute_action(P0, &Action::PassPriority));

    assert_eq!(game.state.stack.len(), 1);
    assert!(game.state.card(blade).unwrap().has_keyword(Keyword::DoubleStrike));
    assert_eq!(game.state.card(technique).unwrap().zone, Zone::Graveyard);
    assert_eq!(game.state.priority_player, P0);

    assert!(game.execute_action(P0, &Action::PassPriority));
    assert!(game.state.stack.is_empty());
    assert_eq!(game.state.card(blade).unwrap().zone, Zone::Exile);
    assert_eq!(game.state.card(light).unwrap().zone, Zone::Battlefield);
}

/// Sorcery-speed spells and lands wait for an empty stack.
#[test]
fn test_sorcery_speed_waits_for_empty_stack() {
    let mut game = main_phase_game(11);
    plains(&mut game, P0, 5);
    let land = land_in_hand(&mut game, P0);
    let light = put(&mut game, catalog::banishing_light(), P0, Zone::Hand);
    let drone = put(&mut game, catalog::dockworker_drone(), P0, Zone::Hand);
    let blade = put(&mut game, catalog::illvoi_galeblade(), P1, Zone::Battlefield);

    assert!(game.execute_action(P0, &Action::cast_targeting(light, &[blade])));

    let actions = game.get_legal_actions(P0);
    assert!(!actions.contains(&Action::cast(drone)));
    assert!(!actions.contains(&Action::PlayLand { card: land }));
    assert!(matches!(
        game.try_execute(P0, &Action::cast(drone)),
        Err(ActionError::Illegal(_))
    ));
}

/// Flash creatures can be cast while a spell is waiting.
#[test]
fn test_flash_creature_at_instant_speed() {
    let mut game = main_phase_game(12);
    plains(&mut game, P0, 4);
    put(&mut game, catalog::island(), P0, Zone::Battlefield);
    let light = put(&mut game, catalog::banishing_light(), P0, Zone::Hand);
    let blade = put(&mut game, catalog::illvoi_galeblade(), P0, Zone::Hand);
    let victim = ready_creature(&mut game, P1, 1, 1);

    assert!(game.execute_action(P0, &Action::cast_targeting(light, &[victim])));
    assert!(game.get_legal_actions(P0).contains(&Action::cast(blade)));
    assert!(game.execute_action(P0, &Action::cast(blade)));

    assert_eq!(game.state.card(blade).unwrap().zone, Zone::Battlefield);
    assert_eq!(game.state.stack.len(), 1);
}

// =============================================================================
// Priority
// =============================================================================

/// Two passes with an empty stack advance exactly one phase.
#[test]
fn test_two_passes_advance_phase() {
    let mut game = main_phase_game(13);
    plains(&mut game, P0, 1);
    plains(&mut game, P1, 1);

    assert!(game.execute_action(P0, &Action::PassPriority));
    assert_eq!(game.state.priority_player, P1);
    assert_eq!(game.state.phase, Phase::Main1);

    assert!(game.execute_action(P1, &Action::PassPriority));
    assert_eq!(game.state.phase, Phase::CombatBegin);
    assert_eq!(game.state.priority_player, P0);
}

/// Only the priority holder may act.
#[test]
fn test_out_of_turn_action_rejected() {
    let mut game = main_phase_game(14);
    plains(&mut game, P0, 1);
    let land = land_in_hand(&mut game, P1);

    assert!(game.get_legal_actions(P1).is_empty());
    assert_eq!(
        game.try_execute(P1, &Action::PlayLand { card: land }),
        Err(ActionError::NotPriorityHolder { player: P1, holder: P0 })
    );
    assert_eq!(game.state.card(land).unwrap().zone, Zone::Hand);
}

// =============================================================================
// Rejected Casts
// =============================================================================

/// A cast naming an illegal target is refused up front and leaves no trace
/// in the action history.
#[test]
fn test_illegal_target_cast_not_recorded() {
    let mut game = main_phase_game(15);
    plains(&mut game, P0, 3);
    let light = put(&mut game, catalog::banishing_light(), P0, Zone::Hand);
    let own = put(&mut game, catalog::illvoi_galeblade(), P0, Zone::Battlefield);

    let result = game.try_execute(P0, &Action::cast_targeting(light, &[own]));

    assert!(matches!(result, Err(ActionError::Illegal(_))));
    assert!(game.state.history.is_empty());
    assert_eq!(game.state.card(light).unwrap().zone, Zone::Hand);
    assert_eq!(game.state.mana_sources(P0).len(), 3);
}

/// A cast that fails while choosing targets is not recorded either.
#[test]
fn test_failed_target_prompt_not_recorded() {
    let mut game = main_phase_game(16);
    plains(&mut game, P0, 3);
    let light = put(&mut game, catalog::banishing_light(), P0, Zone::Hand);
    put(&mut game, catalog::dockworker_drone(), P1, Zone::Battlefield);

    // No decision source and target prompts carry no default.
    assert!(!game.execute_action(P0, &Action::cast(light)));
    assert!(game.state.history.is_empty());
    assert_eq!(game.state.card(light).unwrap().zone, Zone::Hand);
    assert_eq!(game.state.mana_sources(P0).len(), 3);
}

/// Accepted actions are recorded in order.
#[test]
fn test_accepted_actions_recorded() {
    let mut game = main_phase_game(17);
    let land = land_in_hand(&mut game, P0);
    land_in_hand(&mut game, P0);

    assert!(game.execute_action(P0, &Action::PlayLand { card: land }));

    assert_eq!(game.state.history.len(), 1);
    let record = &game.state.history[0];
    assert_eq!(record.player, P0);
    assert_eq!(record.action, Action::PlayLand { card: land });
    assert_eq!(record.turn, 2);
    assert_eq!(record.sequence, 0);
}

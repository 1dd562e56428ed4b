//! End-to-end tests for round advancement over the full engine.

use league_bracket_web::{
    advance_round, create_bracket, round_list, standings, update_score, BracketError, GroupStatus,
    PlayerId, PlayerStatus, Role, RoundStatus, Tournament,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use uuid::Uuid;

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Tournament with `n` registered players plus one host.
fn tournament_with_players(capacity: u32, n: usize) -> Tournament {
    let mut t = create_bracket("spring-cup", capacity).unwrap();
    t.register_player("the-host", "diamond", Role::Host).unwrap();
    for i in 0..n {
        t.register_player(format!("player-{i}"), "gold", Role::Player)
            .unwrap();
    }
    t
}

/// Report strictly decreasing scores for every entry of every group in a round.
fn score_round(t: &mut Tournament, round_index: u32) {
    let groups: Vec<(Uuid, Vec<PlayerId>)> = t
        .round(round_index)
        .unwrap()
        .groups
        .iter()
        .map(|g| (g.id, g.entries.iter().map(|e| e.player_id).collect()))
        .collect();
    for (group_id, players) in groups {
        for (i, player_id) in players.iter().enumerate() {
            let score = 100 - i as u32 * 10;
            update_score(t, group_id, *player_id, score).unwrap();
        }
    }
}

#[test]
fn non_host_cannot_advance_and_nothing_changes() {
    let mut t = tournament_with_players(16, 16);
    let before = t.clone();
    for role in [Role::Player, Role::Manager] {
        assert_eq!(
            advance_round(&mut t, 1, role, &mut rng()),
            Err(BracketError::InvalidAuth)
        );
        assert_eq!(t, before);
    }
}

#[test]
fn opening_round_needs_three_quarters_of_capacity() {
    let mut t = tournament_with_players(16, 8);
    let before = t.clone();
    assert_eq!(
        advance_round(&mut t, 1, Role::Host, &mut rng()),
        Err(BracketError::InsufficientPlayers {
            required: 12,
            available: 8
        })
    );
    assert_eq!(t, before);
}

#[test]
fn opening_round_seats_the_full_pool() {
    let mut t = tournament_with_players(16, 16);
    advance_round(&mut t, 1, Role::Host, &mut rng()).unwrap();

    let round = t.round(1).unwrap();
    assert_eq!(round.status, RoundStatus::InProgress);
    assert_eq!(round.groups.len(), 2);

    let mut placed = HashSet::new();
    for group in &round.groups {
        assert_eq!(group.status, GroupStatus::InProgress);
        assert_eq!(group.entries.len(), 8);
        for entry in &group.entries {
            assert_eq!(entry.score, 0);
            assert!(placed.insert(entry.player_id), "player placed twice");
        }
    }
    assert_eq!(placed.len(), 16);

    for p in t.players.iter().filter(|p| p.role == Role::Player) {
        assert_eq!(p.status, PlayerStatus::Progress);
    }
    // The host is not a competitor and is never seated.
    let host = t.players.iter().find(|p| p.role == Role::Host).unwrap();
    assert_eq!(host.status, PlayerStatus::Registered);
}

#[test]
fn advancing_a_played_round_seats_top_five_of_each_group() {
    let mut t = tournament_with_players(16, 16);
    advance_round(&mut t, 1, Role::Host, &mut rng()).unwrap();
    score_round(&mut t, 1);

    // Top five of each group, by reported score.
    let mut expected: HashSet<PlayerId> = HashSet::new();
    for group in &t.round(1).unwrap().groups {
        let rows = standings(&t, group.id).unwrap();
        expected.extend(rows.iter().take(5).map(|r| r.player_id));
    }

    advance_round(&mut t, 1, Role::Host, &mut rng()).unwrap();

    let round1 = t.round(1).unwrap();
    assert_eq!(round1.status, RoundStatus::Complete);
    for group in &round1.groups {
        assert_eq!(group.status, GroupStatus::Complete);
    }

    let round2 = t.round(2).unwrap();
    assert_eq!(round2.status, RoundStatus::InProgress);
    assert_eq!(round2.groups.len(), 1);
    let seated: HashSet<PlayerId> = round2.groups[0]
        .entries
        .iter()
        .map(|e| e.player_id)
        .collect();
    assert_eq!(seated, expected);
    assert_eq!(seated.len(), 10);

    // Everyone not seated in round 2 has dropped out.
    for p in t.players.iter().filter(|p| p.role == Role::Player) {
        if seated.contains(&p.id) {
            assert_eq!(p.status, PlayerStatus::Progress);
        } else {
            assert_eq!(p.status, PlayerStatus::DroppedOut);
        }
    }
}

#[test]
fn final_round_marks_finalists_without_assignment() {
    let mut t = tournament_with_players(16, 16);
    advance_round(&mut t, 1, Role::Host, &mut rng()).unwrap();
    score_round(&mut t, 1);
    advance_round(&mut t, 1, Role::Host, &mut rng()).unwrap();
    score_round(&mut t, 2);
    advance_round(&mut t, 2, Role::Host, &mut rng()).unwrap();

    assert_eq!(t.round(2).unwrap().status, RoundStatus::Complete);
    let finalists = t
        .players
        .iter()
        .filter(|p| p.status == PlayerStatus::Progress)
        .count();
    assert_eq!(finalists, 5);

    // A finished round cannot be advanced again.
    assert_eq!(
        advance_round(&mut t, 2, Role::Host, &mut rng()),
        Err(BracketError::RoundNotReady)
    );
}

#[test]
fn boundary_tie_keeps_six_in_the_final() {
    let mut t = tournament_with_players(8, 8);
    advance_round(&mut t, 1, Role::Host, &mut rng()).unwrap();

    let group = &t.round(1).unwrap().groups[0];
    let group_id = group.id;
    let players: Vec<PlayerId> = group.entries.iter().map(|e| e.player_id).collect();
    // Ranks 1,2,3,4,5,5,7,8.
    for (player_id, score) in players.iter().zip([10u32, 9, 8, 7, 6, 6, 5, 4]) {
        update_score(&mut t, group_id, *player_id, score).unwrap();
    }

    advance_round(&mut t, 1, Role::Host, &mut rng()).unwrap();
    let surviving = t
        .players
        .iter()
        .filter(|p| p.status == PlayerStatus::Progress)
        .count();
    assert_eq!(surviving, 6);
}

#[test]
fn later_rounds_cannot_be_populated_out_of_order() {
    let mut t = tournament_with_players(16, 16);
    assert_eq!(
        advance_round(&mut t, 2, Role::Host, &mut rng()),
        Err(BracketError::RoundNotReady)
    );
    assert_eq!(
        advance_round(&mut t, 3, Role::Host, &mut rng()),
        Err(BracketError::RoundNotFound)
    );
}

#[test]
fn standings_report_scores_and_competition_ranks() {
    let mut t = tournament_with_players(8, 8);
    advance_round(&mut t, 1, Role::Host, &mut rng()).unwrap();

    let group_id = t.round(1).unwrap().groups[0].id;
    let players: Vec<PlayerId> = t.round(1).unwrap().groups[0]
        .entries
        .iter()
        .map(|e| e.player_id)
        .collect();
    for (player_id, score) in players.iter().zip([3u32, 2, 2, 1, 0, 0, 0, 0]) {
        update_score(&mut t, group_id, *player_id, score).unwrap();
    }

    let rows = standings(&t, group_id).unwrap();
    let head: Vec<(u32, u32)> = rows.iter().take(4).map(|r| (r.score, r.rank)).collect();
    assert_eq!(head, vec![(3, 1), (2, 2), (2, 2), (1, 4)]);
    assert_eq!(rows[4].rank, 5);
}

#[test]
fn standings_for_unknown_group_is_not_found() {
    let t = tournament_with_players(8, 8);
    assert_eq!(
        standings(&t, Uuid::new_v4()),
        Err(BracketError::MatchNotFound)
    );
}

#[test]
fn score_update_rejects_unknown_group_and_player() {
    let mut t = tournament_with_players(8, 8);
    advance_round(&mut t, 1, Role::Host, &mut rng()).unwrap();
    let group_id = t.round(1).unwrap().groups[0].id;

    assert_eq!(
        update_score(&mut t, Uuid::new_v4(), Uuid::new_v4(), 3),
        Err(BracketError::MatchNotFound)
    );
    let stranger = Uuid::new_v4();
    assert_eq!(
        update_score(&mut t, group_id, stranger, 3),
        Err(BracketError::PlayerNotFound(stranger))
    );
}

#[test]
fn duplicate_game_id_is_rejected() {
    let mut t = create_bracket("spring-cup", 8).unwrap();
    t.register_player("Faker", "challenger", Role::Player).unwrap();
    assert_eq!(
        t.register_player("faker", "gold", Role::Player),
        Err(BracketError::DuplicatePlayer)
    );
}

#[test]
fn round_list_tracks_the_live_round() {
    let mut t = tournament_with_players(16, 16);
    let info = round_list(&t);
    assert_eq!(info.live_round, 0);
    let sizes: Vec<u32> = info.rounds.iter().map(|r| r.size).collect();
    assert_eq!(sizes, vec![16, 8]);

    advance_round(&mut t, 1, Role::Host, &mut rng()).unwrap();
    assert_eq!(round_list(&t).live_round, 1);

    score_round(&mut t, 1);
    advance_round(&mut t, 1, Role::Host, &mut rng()).unwrap();
    assert_eq!(round_list(&t).live_round, 2);
}

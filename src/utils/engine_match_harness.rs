//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other through a
//! `GameSession`, so every engine move passes the same checks a human move
//! does. An optional seeded random opening prefix varies the games.

use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::chess_errors::ChessResult;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::session::game_session::{GameSession, SessionConfig};
use crate::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    /// The side to move had no move its engine could get accepted.
    NoMoveAvailable(Color),
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWinCheckmate { player: PlayerId, color: Color },
    DrawStalemate,
    NoMoveAvailable { player: PlayerId },
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    pub max_plies: u16,
    /// Random plies played before the engines take over.
    pub opening_plies: u8,
    pub session: SessionConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_plies: 2,
            session: SessionConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub opening_moves: Vec<String>,
    pub played_moves: Vec<String>,
    /// Reported only; the match keeps going past the fifty-move mark.
    pub fifty_move_draw_claimable: bool,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 4,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
}

impl MatchSeriesStats {
    pub fn player1_avg_move_time_ms(&self) -> f64 {
        avg_ns_per_move_ms(self.player1_total_time_ns, self.player1_moves)
    }

    pub fn player2_avg_move_time_ms(&self) -> f64 {
        avg_ns_per_move_ms(self.player2_total_time_ns, self.player2_moves)
    }

    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms(),
            self.player2_avg_move_time_ms()
        )
    }
}

/// Play one seeded match from the starting position. `engine_white` plays White.
pub fn play_engine_match(
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    seed: u64,
    config: MatchConfig,
) -> ChessResult<MatchResult> {
    play_engine_match_from_state(engine_white, engine_black, GameState::new_game(), seed, config)
}

/// Play one seeded match from a caller-provided position, for curated
/// endgame or tactics suites.
pub fn play_engine_match_from_state(
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    start_state: GameState,
    seed: u64,
    config: MatchConfig,
) -> ChessResult<MatchResult> {
    let mut session = GameSession::with_state(start_state, config.session);
    engine_white.new_game();
    engine_black.new_game();

    let mut opener = RandomEngine::new(seed);
    let mut opening_moves = Vec::new();
    for _ in 0..config.opening_plies {
        match session.play_engine_turn(&mut opener)? {
            Some(record) => opening_moves.push(record.to_string()),
            None => break,
        }
    }

    let mut result = MatchResult {
        outcome: MatchOutcome::DrawMaxPlies,
        final_state: GameState::new_empty(),
        opening_moves,
        played_moves: Vec::new(),
        fifty_move_draw_claimable: false,
        white_move_count: 0,
        black_move_count: 0,
        white_total_time_ns: 0,
        black_total_time_ns: 0,
    };

    for _ in 0..config.max_plies {
        if let Some(outcome) = terminal_outcome(&session) {
            result.outcome = outcome;
            break;
        }

        let mover = session.state().side_to_move;
        let started = Instant::now();
        let played = match mover {
            Color::White => session.play_engine_turn(engine_white)?,
            Color::Black => session.play_engine_turn(engine_black)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::White => {
                result.white_move_count = result.white_move_count.saturating_add(1);
                result.white_total_time_ns = result.white_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Black => {
                result.black_move_count = result.black_move_count.saturating_add(1);
                result.black_total_time_ns = result.black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let Some(record) = played else {
            result.outcome = MatchOutcome::NoMoveAvailable(mover);
            break;
        };
        result.played_moves.push(record.to_string());
        result.fifty_move_draw_claimable |= session.is_fifty_move_draw_claimable();
        session.drain_events();
    }

    if result.outcome == MatchOutcome::DrawMaxPlies {
        if let Some(outcome) = terminal_outcome(&session) {
            result.outcome = outcome;
        }
    }
    result.final_state = session.state().clone();
    debug!(
        outcome = ?result.outcome,
        fen = %result.final_state.get_fen(),
        "match finished\n{}",
        render_game_state(&result.final_state)
    );
    Ok(result)
}

fn terminal_outcome(session: &GameSession) -> Option<MatchOutcome> {
    match session.winner() {
        Some(Color::White) => Some(MatchOutcome::WhiteWinCheckmate),
        Some(Color::Black) => Some(MatchOutcome::BlackWinCheckmate),
        None if session.is_checkmate() => match session.state().side_to_move {
            Color::White => Some(MatchOutcome::BlackWinCheckmate),
            Color::Black => Some(MatchOutcome::WhiteWinCheckmate),
        },
        None if session.is_stalemate() => Some(MatchOutcome::DrawStalemate),
        None => None,
    }
}

/// Play a series and aggregate win/loss/draw statistics. Colors are
/// assigned per game from `base_seed`, and each factory receives the
/// game's seed.
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> ChessResult<MatchSeriesStats>
where
    F1: Fn(u64) -> Box<dyn Engine>,
    F2: Fn(u64) -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_white = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let mut player1 = player1_factory(seed);
        let mut player2 = player2_factory(seed);

        let result = if player1_is_white {
            play_engine_match(player1.as_mut(), player2.as_mut(), seed, config.per_game)?
        } else {
            play_engine_match(player2.as_mut(), player1.as_mut(), seed, config.per_game)?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_white {
            (
                result.white_move_count,
                result.black_move_count,
                result.white_total_time_ns,
                result.black_total_time_ns,
            )
        } else {
            (
                result.black_move_count,
                result.white_move_count,
                result.black_total_time_ns,
                result.white_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let player_for = |color: Color| {
            if (color == Color::White) == player1_is_white {
                PlayerId::Player1
            } else {
                PlayerId::Player2
            }
        };

        let mapped = match result.outcome {
            MatchOutcome::WhiteWinCheckmate | MatchOutcome::BlackWinCheckmate => {
                let color = if result.outcome == MatchOutcome::WhiteWinCheckmate {
                    Color::White
                } else {
                    Color::Black
                };
                let player = player_for(color);
                match player {
                    PlayerId::Player1 => stats.player1_wins += 1,
                    PlayerId::Player2 => stats.player2_wins += 1,
                }
                SeriesOutcome::PlayerWinCheckmate { player, color }
            }
            MatchOutcome::DrawStalemate => {
                stats.draws += 1;
                SeriesOutcome::DrawStalemate
            }
            MatchOutcome::NoMoveAvailable(color) => {
                stats.draws += 1;
                SeriesOutcome::NoMoveAvailable {
                    player: player_for(color),
                }
            }
            MatchOutcome::DrawMaxPlies => {
                stats.draws += 1;
                SeriesOutcome::DrawMaxPlies
            }
        };
        stats.outcomes.push(mapped);

        info!(
            game = i + 1,
            games = config.games,
            seed,
            player1_is_white,
            outcome = ?mapped,
            plies = result.played_moves.len(),
            "series game finished"
        );
    }

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_one_ply::OnePlyEngine;
    use crate::game_state::chess_types::Square;

    #[test]
    fn random_vs_one_ply_match_runs_to_a_result() {
        let mut white = RandomEngine::new(42);
        let mut black = OnePlyEngine::new();
        let config = MatchConfig {
            max_plies: 24,
            opening_plies: 2,
            ..MatchConfig::default()
        };
        let result = play_engine_match(&mut white, &mut black, 42, config).expect("match should run");

        assert_eq!(result.opening_moves.len(), 2);
        assert!(result.white_move_count + result.black_move_count > 0);
        assert_eq!(
            result.final_state.move_history.len(),
            result.opening_moves.len() + result.played_moves.len()
        );
    }

    #[test]
    fn seeded_matches_replay_identically() {
        let config = MatchConfig {
            max_plies: 16,
            ..MatchConfig::default()
        };
        let first = play_engine_match(&mut RandomEngine::new(5), &mut RandomEngine::new(6), 9, config)
            .expect("match");
        let second = play_engine_match(&mut RandomEngine::new(5), &mut RandomEngine::new(6), 9, config)
            .expect("match");
        assert_eq!(first.played_moves, second.played_moves);
        assert_eq!(first.outcome, second.outcome);
    }

    #[test]
    fn max_plies_caps_the_game() {
        let config = MatchConfig {
            max_plies: 1,
            opening_plies: 0,
            ..MatchConfig::default()
        };
        let result = play_engine_match(&mut OnePlyEngine::new(), &mut OnePlyEngine::new(), 0, config)
            .expect("match");
        assert_eq!(result.outcome, MatchOutcome::DrawMaxPlies);
        assert_eq!(result.played_moves.len(), 1);
        assert_eq!(result.final_state.side_to_move, Color::Black);
    }

    #[test]
    fn curated_positions_detect_mate_on_the_board() {
        let mated = GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .expect("FEN should parse");
        let config = MatchConfig {
            opening_plies: 0,
            ..MatchConfig::default()
        };
        let result = play_engine_match_from_state(
            &mut OnePlyEngine::new(),
            &mut OnePlyEngine::new(),
            mated,
            0,
            config,
        )
        .expect("match");
        assert_eq!(result.outcome, MatchOutcome::BlackWinCheckmate);
        assert!(result.played_moves.is_empty());
    }

    #[test]
    fn a_captured_king_ends_the_match() {
        // White's pinned knight has just taken on c3, leaving e1 open to the rook.
        let mut exposed = GameState::from_fen("4r1k1/8/8/8/8/2q5/4N3/4K3 w - - 0 1")
            .expect("FEN should parse");
        exposed
            .apply_move(
                Square::from_algebraic("e2").expect("square"),
                Square::from_algebraic("c3").expect("square"),
                None,
            )
            .expect("pseudo-legal capture");
        let config = MatchConfig {
            opening_plies: 0,
            ..MatchConfig::default()
        };
        let result = play_engine_match_from_state(
            &mut OnePlyEngine::new(),
            &mut OnePlyEngine::new(),
            exposed,
            0,
            config,
        )
        .expect("match");

        assert_eq!(result.played_moves, vec!["e8e1".to_owned()]);
        assert_eq!(result.outcome, MatchOutcome::BlackWinCheckmate);
        assert_eq!(result.final_state.find_king(Color::White), None);
    }

    #[test]
    fn series_counts_every_game() {
        let stats = play_engine_match_series(
            |seed| Box::new(RandomEngine::new(seed)),
            |_| Box::new(OnePlyEngine::new()),
            MatchSeriesConfig {
                games: 2,
                base_seed: 777,
                per_game: MatchConfig {
                    max_plies: 12,
                    ..MatchConfig::default()
                },
            },
        )
        .expect("series should run");

        assert_eq!(stats.games, 2);
        assert_eq!(stats.outcomes.len(), 2);
        assert_eq!(
            u32::from(stats.player1_wins + stats.player2_wins + stats.draws),
            2
        );
        assert!(stats.player1_avg_move_time_ms() >= 0.0);
        assert!(stats.report().starts_with("games=2"));
    }
}

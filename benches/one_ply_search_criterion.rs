use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use mailbox_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use mailbox_chess::game_state::game_state::GameState;
use mailbox_chess::move_generation::legal_move_generator::generate_legal_moves;
use mailbox_chess::moves::piece_legality::possible_moves;
use mailbox_chess::search::board_scoring::PieceSquareScorer;
use mailbox_chess::search::one_ply_search::{one_ply_search, SelectorConfig};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    legal_moves: usize,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: STARTING_POSITION_FEN,
        legal_moves: 20,
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        legal_moves: 48,
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        legal_moves: 14,
    },
];

fn bench_one_ply(c: &mut Criterion) {
    let mut group = c.benchmark_group("one_ply_search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    let config = SelectorConfig::default();
    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");

        // Correctness guard before benchmarking.
        let legal = generate_legal_moves(&game, game.side_to_move).len();
        assert_eq!(legal, case.legal_moves, "legal move count mismatch for {}", case.name);

        group.throughput(Throughput::Elements(case.legal_moves as u64));
        group.bench_with_input(BenchmarkId::new("select", case.name), &game, |b, game| {
            b.iter(|| {
                let result = one_ply_search(black_box(game), &PieceSquareScorer, &config, None)
                    .expect("search should succeed");
                black_box(result.best_move)
            });
        });
    }

    group.finish();
}

fn bench_legality_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("legality_scan");
    group.sample_size(30);

    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        group.bench_with_input(BenchmarkId::new("all_pieces", case.name), &game, |b, game| {
            b.iter(|| {
                let total: usize = game
                    .occupied()
                    .map(|(square, _)| possible_moves(black_box(game), square).len())
                    .sum();
                black_box(total)
            });
        });
    }

    group.finish();
}

criterion_group!(one_ply_benches, bench_one_ply, bench_legality_scan);
criterion_main!(one_ply_benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ludo_engine::core::{GameRng, GameState, PlayerId, RulesConfig};
use ludo_engine::lifecycle::{draw_die, start_match};
use ludo_engine::rules::{Ludo, RulesEngine};

/// Positions sampled from seeded self-play, each with a die pending.
fn gen_states(n: usize) -> Vec<GameState> {
    let rules = Ludo::new(RulesConfig::default().with_home_lane_advance());
    let players: Vec<PlayerId> = ["a", "b", "c", "d"].into_iter().map(PlayerId::new).collect();
    let mut rng = GameRng::new(0xA5A5_0123);
    let mut out = Vec::with_capacity(n);

    while out.len() < n {
        let mut state = start_match(&players, &mut rng).expect("start");
        while out.len() < n {
            let Some(player) = state.current_player().cloned() else { break };
            let Ok(rolled) = draw_die(&state, &mut rng) else { break };
            out.push(rolled.clone());

            state = match rules.legal_moves(&rolled, &player).first() {
                Some(mv) => rules.apply_move(&rolled, &player, mv).expect("legal").state,
                None => rules.pass_turn(&rolled, &player).expect("pass"),
            };
        }
    }
    out
}

fn bench_legal_moves(c: &mut Criterion) {
    let rules = Ludo::default();
    let mut g = c.benchmark_group("ludo_legal");
    for &n in &[256usize, 4096usize] {
        let states = gen_states(n);
        g.bench_with_input(BenchmarkId::new("legal_moves_batch", n), &states, |b, s| {
            b.iter(|| {
                for state in s.iter() {
                    if let Some(player) = state.current_player() {
                        black_box(rules.legal_moves(black_box(state), player));
                    }
                }
            })
        });
    }
    g.finish();
}

fn bench_apply_move(c: &mut Criterion) {
    let rules = Ludo::default();
    let states = gen_states(1024);
    c.bench_function("ludo_apply_first_move", |b| {
        b.iter(|| {
            for state in &states {
                let Some(player) = state.current_player() else { continue };
                if let Some(mv) = rules.legal_moves(state, player).first() {
                    black_box(rules.apply_move(state, player, mv).ok());
                }
            }
        })
    });
}

criterion_group!(benches, bench_legal_moves, bench_apply_move);
criterion_main!(benches);

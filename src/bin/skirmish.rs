//! Headless skirmish driver.
//!
//! Runs a short AI-vs-AI match on procedural terrain at a fixed 60 Hz step
//! and prints a running summary. Useful for exercising the whole simulation
//! core (terrain queries, combat, projectiles, abilities, particles)
//! without a renderer attached.

use glam::Vec3;
use log::info;

use nova_arena_engine::game::combatant::ControlMode;
use nova_arena_engine::game::config::ShipKind;
use nova_arena_engine::game::state::GameState;
use nova_arena_engine::game::terrain::generate_arena_mesh;
use nova_arena_engine::world::ArenaBounds;

const FIXED_DT: f32 = 1.0 / 60.0;
const MATCH_SECONDS: f32 = 60.0;

fn main() {
    env_logger::init();

    let bounds = ArenaBounds::default();
    let mesh = generate_arena_mesh(bounds.half_extent, 96, 12.0, 8.0);
    info!(
        "arena mesh: {} vertices, {} triangles",
        mesh.vertices.len(),
        mesh.triangle_count()
    );

    let mut game = match GameState::with_defaults(&mesh, bounds) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("failed to set up match: {err}");
            std::process::exit(1);
        }
    };

    // Two AI squads facing off across the arena
    game.spawn_combatant(
        ShipKind::Raptor,
        0,
        ControlMode::Ai,
        Vec3::new(0.0, 25.0, -60.0),
    );
    game.spawn_combatant(
        ShipKind::Hellfire,
        0,
        ControlMode::Ai,
        Vec3::new(10.0, 25.0, -60.0),
    );
    game.spawn_wave(ShipKind::Hydra, 1, 2, 60.0);
    game.spawn_wave(ShipKind::Spear, 1, 1, 40.0);

    let frames = (MATCH_SECONDS / FIXED_DT) as usize;
    for frame in 0..frames {
        game.update(FIXED_DT);

        if frame % 300 == 0 {
            let alive = game.combatants().iter().filter(|c| c.is_alive()).count();
            println!(
                "t={:6.2}s  alive={}  projectiles={}  particles={}",
                game.total_time(),
                alive,
                game.projectiles().len(),
                game.particles().particle_count(),
            );
        }

        let (blue_alive, red_alive) = team_counts(&game);
        if blue_alive == 0 || red_alive == 0 {
            break;
        }
    }

    println!("--- match over at t={:.2}s ---", game.total_time());
    for c in game.combatants() {
        println!(
            "#{:<3} {:10} team={} alive={:5} health={:7.1} hits={} kills={}",
            c.id,
            c.stats.name,
            c.team,
            c.is_alive(),
            c.health.max(0.0),
            game.feed().hits(c.id),
            game.feed().kills(c.id),
        );
    }
    if let Some(t) = game.feed().last_kill_time() {
        println!("last kill at t={t:.2}s");
    }
}

fn team_counts(game: &GameState) -> (usize, usize) {
    let blue = game
        .combatants()
        .iter()
        .filter(|c| c.is_alive() && c.team == 0)
        .count();
    let red = game
        .combatants()
        .iter()
        .filter(|c| c.is_alive() && c.team == 1)
        .count();
    (blue, red)
}

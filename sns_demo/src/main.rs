//! Headless frame driver
//!
//! Builds a small procedural level, orbits the camera around the player and
//! logs the number of objects drawn per frame. Culling is switched off for
//! the second half of the run.
//!
//! Usage: sns_demo [settings.toml]

use glam::Vec3;
use sns_engine::sns::camera::Camera;
use sns_engine::sns::config::GameConfig;
use sns_engine::sns::physics::KinematicControllerFactory;
use sns_engine::sns::render::{MeshHandle, RecordingCommandList, ShaderHandle};
use sns_engine::sns::scene::{BoundingBox, HitResult, ImportedNode, MeshData, Scene, SceneBuilder};
use sns_engine::sns::Result;
use sns_engine::{engine_error, engine_info};

const FRAMES: u32 = 240;
const ORBIT_SPEED: f32 = 90.0;
const ATTACK_RANGE: f32 = 1.5;
const ATTACK_DAMAGE: i32 = 25;
const CONTACT_RANGE: f32 = 1.0;
const SHADOW_SHADER: ShaderHandle = ShaderHandle(0);

fn box_mesh(name: &str, mesh: u32, center: Vec3, half_extents: Vec3) -> MeshData {
    MeshData {
        name: name.to_string(),
        mesh: MeshHandle(mesh),
        positions: BoundingBox::from_center_half_extents(center, half_extents).corners().to_vec(),
    }
}

fn build_level(scene: &mut Scene, config: &GameConfig) -> Result<()> {
    let mut factory = KinematicControllerFactory::new();
    let mut builder = SceneBuilder::new(&config.scene, &mut factory);

    let mut level = ImportedNode::new("level").with_child(
        ImportedNode::new(format!("{}ground", config.scene.static_prefix))
            .with_mesh(box_mesh("ground", 1, Vec3::new(0.0, -0.5, 0.0), Vec3::new(100.0, 0.5, 100.0))),
    );
    for i in 0..8 {
        let angle = (i as f32 * 45.0).to_radians();
        let center = Vec3::new(angle.cos() * 15.0, 1.0, angle.sin() * 15.0);
        level = level.with_child(
            ImportedNode::new(format!("crate_{}", i)).with_mesh(box_mesh("crate", 2, center, Vec3::splat(1.0))),
        );
    }
    builder.build(scene, &level)?;

    for (i, spawn) in [Vec3::new(0.0, 1.0, -30.0), Vec3::new(25.0, 1.0, 10.0), Vec3::new(-25.0, 1.0, 10.0)]
        .into_iter()
        .enumerate()
    {
        let enemy = ImportedNode::new("enemies").with_child(
            ImportedNode::new(format!("{}{}", config.scene.enemy_prefix, i))
                .with_mesh(box_mesh("mob", 3, Vec3::ZERO, Vec3::new(0.5, 1.0, 0.5))),
        );
        builder.set_placement(spawn, 1.0);
        builder.build(scene, &enemy)?;
    }

    let player = ImportedNode::new("player").with_child(
        ImportedNode::new("hero")
            .with_mesh(box_mesh("body", 4, Vec3::ZERO, Vec3::new(0.4, 0.9, 0.4)))
            .with_mesh(box_mesh("sword", 5, Vec3::new(0.6, 0.0, 0.0), Vec3::new(0.05, 0.6, 0.05))),
    );
    builder.set_placement(Vec3::new(0.0, 0.9, 0.0), 1.0);
    builder.build_character(scene, &player)
}

/// Hit every enemy within reach of the player.
fn player_attacks(scene: &mut Scene, player: Vec3) {
    for enemy in scene.enemies_mut() {
        if enemy.position().distance(player) > ATTACK_RANGE {
            continue;
        }
        if let Some(HitResult::Killed) = enemy.hit(ATTACK_DAMAGE) {
            engine_info!("sns::Demo", "'{}' slain, respawned at {}", enemy.name(), enemy.position());
        }
    }
}

fn run(config: GameConfig) -> Result<()> {
    let mut scene = Scene::from_config(&config)?;
    build_level(&mut scene, &config)?;
    engine_info!("sns::Demo", "Level ready: {} nodes, {} drawables", scene.node_count(), scene.drawable_count());

    let player = scene.character().map(|node| node.position()).unwrap_or_default();
    let mut camera = Camera::new(config.camera, player)?;
    let mut command_list = RecordingCommandList::new();
    let dt = 1.0 / config.window.refresh_rate.max(1) as f32;

    for frame in 0..FRAMES {
        if frame == FRAMES / 2 {
            let enabled = scene.toggle_culling();
            engine_info!("sns::Demo", "Culling {}", if enabled { "on" } else { "off" });
        }

        camera.rotate(ORBIT_SPEED * dt, 0.0);
        let player = match scene.character_mut() {
            Some(hero) => {
                hero.update_rotation(camera.yaw_degrees());
                hero.move_character(2.0 * dt, 0.0, dt);
                hero.position()
            }
            None => Vec3::ZERO,
        };
        camera.set_target(player);
        scene.update_enemies(player, dt);
        player_attacks(&mut scene, player);
        let taken = scene.apply_enemy_contacts(CONTACT_RANGE);
        if taken > 0 {
            let hp = scene.character().and_then(|node| node.role().as_character()).map_or(0, |hero| hero.hp());
            engine_info!("sns::Demo", "Hero took {} damage, {} hp left", taken, hp);
        }

        command_list.clear();
        let shadows = scene.render_depth_frame(&camera, SHADOW_SHADER, &mut command_list)?;
        let stats = scene.render_frame(&camera, &mut command_list)?;
        if frame % 30 == 0 {
            engine_info!("sns::Demo", "Frame {}: {} (shadow casters: {})", frame, stats, shadows.visible_objects);
        }
    }
    Ok(())
}

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path),
        None => Ok(GameConfig::default()),
    };

    if let Err(e) = config.and_then(run) {
        engine_error!("sns::Demo", "{}", e);
        std::process::exit(1);
    }
}

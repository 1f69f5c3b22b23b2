use std::collections::HashMap;

use clap::Parser;
use glam::Vec2;
use sprite_actor::actions::{ActionCallback, CallbackQueue};
use sprite_actor::audio::LogSoundPlayer;
use sprite_actor::config::EngineConfig;
use sprite_actor::geometry::Rect;
use sprite_actor::render::{FrameAnimation, SheetRenderer};
use sprite_actor::scene::{DepthGrid, DepthVector, SceneId, StageScene};
use sprite_actor::{ActorContext, SpriteActor};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Walk target X (world units)
    #[arg(long, default_value = "900")]
    target_x: f32,

    /// Walk target Y (world units)
    #[arg(long, default_value = "500")]
    target_y: f32,

    /// Maximum number of ticks to simulate
    #[arg(long, default_value = "600")]
    ticks: usize,

    /// Seconds per tick
    #[arg(long, default_value = "0.016")]
    dt: f32,
}

const STAGE: SceneId = SceneId(1);

fn demo_renderer() -> SheetRenderer {
    let mut renderer = SheetRenderer::new(48, 96);
    for (row, dir) in ["front", "back", "right"].iter().enumerate() {
        let row = row as u16;
        let stand = FrameAnimation::new(format!("stand.{}", dir), row, 0, 1, 0.0);
        let walk = FrameAnimation::new(format!("walk.{}", dir), row, 1, 6, 0.1);
        renderer.add_animation(stand);
        renderer.add_animation(walk);
    }
    renderer
}

fn main() -> anyhow::Result<()> {
    let config = EngineConfig::load()?;

    let default_filter = if config.debug.verbose_logging {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    let bounds = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    let mut grid = DepthGrid::new(40.0, 48, 27);
    grid.fill_with(|_, row| 1.2 - row as f32 * 0.02);
    let mut scene = StageScene::new(bounds, Vec2::new(1280.0, 720.0))
        .with_depth_vector(DepthVector::new(1.2, 0.7))
        .with_background(grid);

    let mut actor = SpriteActor::new(demo_renderer());
    actor.set_scene(Some(STAGE));
    actor.set_depth_type(config.actor.depth_type);
    actor.set_walking_speed(config.walking_speed()?);
    scene.set_follow(Some(actor.id()));
    scene.camera_mut().set_follow_smoothness(Some(0.25));

    let mut scenes = HashMap::new();
    scenes.insert(STAGE, scene);
    let mut audio = LogSoundPlayer;
    let mut callbacks = CallbackQueue::new();

    {
        let mut ctx =
            ActorContext::new(&mut scenes, &mut audio, &mut callbacks, config.world.scale);
        actor.set_position(Vec2::new(200.0, 100.0), &mut *ctx.scenes);
        actor.stand();
        actor.goto(
            Vec2::new(args.target_x, args.target_y),
            Some(ActionCallback::new("arrived")),
            &mut ctx,
        );
    }

    log::info!("Starting walk: {}", actor);

    let mut arrived = false;
    for tick in 0..args.ticks {
        {
            let mut ctx =
                ActorContext::new(&mut scenes, &mut audio, &mut callbacks, config.world.scale);
            actor.update(args.dt, &mut ctx);
        }
        if let Some(stage) = scenes.get_mut(&STAGE) {
            stage.update(args.dt);
        }

        for callback in callbacks.drain() {
            log::info!("Tick {}: {} fired", tick, callback);
            arrived |= callback.name() == "arrived";
        }
        if arrived {
            break;
        }
        if tick % 30 == 0 {
            log::debug!("Tick {}: {}", tick, actor);
        }
    }

    if !arrived {
        log::warn!("Gave up after {} ticks: {}", args.ticks, actor);
    }

    if let Some(stage) = scenes.get(&STAGE) {
        log::info!("Camera at {:?}", stage.camera().position());
    }
    log::info!("Final state:\n{}", actor.save_ron(config.world.scale)?);
    Ok(())
}

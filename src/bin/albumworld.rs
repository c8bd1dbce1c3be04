//! Headless runner: loads a world config, clicks through the menu, and steps
//! the render loop at a fixed rate.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use futures::FutureExt;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

use albumworld::world::{SilentAudio, WORLD_MESSAGE};
use albumworld::{FileAssetLoader, HeadlessRenderer, MessageBus, Stage, WorldConfig, WorldController};

#[derive(Parser, Debug)]
#[command(name = "albumworld", version)]
struct Cli {
    /// World configuration JSON. Asset urls resolve relative to its directory.
    config: PathBuf,

    /// Frames to render after the click.
    #[arg(long, default_value_t = 900)]
    frames: u64,

    /// Fixed frame rate of the simulated loop.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Overrides the replication seed from the config.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = WorldConfig::from_path(&cli.config)
        .with_context(|| format!("reading world config {}", cli.config.display()))?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let bus = MessageBus::new();
    bus.subscribe(WORLD_MESSAGE, |msg| {
        if !msg.message.is_empty() {
            println!("> {}", msg.message);
        }
    });

    let loader = Rc::new(FileAssetLoader::new(&cli.config));
    let mut world = WorldController::new(config, bus, Rc::new(SilentAudio), loader, HeadlessRenderer::default());

    let mut pool = LocalPool::new();
    pool.run_until(world.start()).context("rendering the menu")?;

    let pipeline = world.handle_click().context("world was already started")?;
    pool.spawner()
        .spawn_local(pipeline.map(|result| {
            if let Err(err) = result {
                log::error!("World initialization failed: {err}");
            }
        }))
        .context("spawning the world pipeline")?;

    let step = Duration::from_secs_f64(1.0 / f64::from(cli.fps.max(1)));
    for _ in 0..cli.frames {
        pool.run_until_stalled();
        world.frame(step);
    }
    pool.run_until_stalled();

    let stage = world.stage();
    let frame = world.backend().last_frame.clone().unwrap_or_default();
    println!(
        "stage: {stage}, frames: {}, scene: '{}', drawables: {}",
        world.backend().frames_rendered,
        frame.scene,
        frame.drawables
    );
    if stage != Stage::Active {
        anyhow::bail!("world did not become active after {} frames (stage: {stage})", cli.frames);
    }
    Ok(())
}

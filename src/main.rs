//! Island Defense entry point.
//!
//! Built on:
//! - **raylib** for windowing, input and drawing
//! - **bevy_ecs** for the game simulation
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and the island layout, falling back to defaults
//! 2. Build the ECS world ([`game::init_world`]) and schedule
//! 3. Each frame: poll mouse/keyboard, step the simulation, update effects,
//!    render
//!
//! With `--headless` no window is opened; the simulation runs a fixed number
//! of 1/60 s steps and logs every scoreboard change.
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! cargo run --release -- --headless --frames 1200 --seed 7
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use clap::Parser;
use island_defense::game;
use island_defense::resources::effectsview::EffectsView;
use island_defense::resources::gameconfig::GameConfig;
use island_defense::resources::input::InputMode;
use island_defense::resources::layout::IslandLayout;
use island_defense::resources::worldtime::WorldTime;
use island_defense::systems::input::poll_desktop_input;
use island_defense::systems::render::render_frame;
use std::path::PathBuf;

const HEADLESS_DT: f32 = 1.0 / 60.0;

/// Island Defense
#[derive(Parser)]
#[command(version, about = "Defend the floating village by throwing trees, rocks and monsters.")]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Island layout JSON, overriding the one named in the config.
    #[arg(long, value_name = "PATH")]
    layout: Option<PathBuf>,

    /// RNG seed, overriding the config. 0 seeds from the clock.
    #[arg(long)]
    seed: Option<u64>,

    /// Run the simulation without a window.
    #[arg(long)]
    headless: bool,

    /// Number of frames to simulate in headless mode.
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Write the effective configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> GameConfig {
    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(layout) = &cli.layout {
        config.layout_path = Some(layout.clone());
    }
    config
}

fn load_layout(config: &GameConfig) -> IslandLayout {
    let Some(path) = &config.layout_path else {
        return IslandLayout::default();
    };
    IslandLayout::load_from_file(path).unwrap_or_else(|e| {
        log::warn!("{}; using the built-in island", e);
        IslandLayout::default()
    })
}

fn run_headless(config: &GameConfig, layout: IslandLayout, frames: u32) {
    let (mut world, feed) = game::init_world(config, layout, InputMode::Desktop);
    let mut schedule = game::build_schedule();
    for _ in 0..frames {
        game::step(&mut world, &mut schedule, HEADLESS_DT);
        let frame = world.resource::<WorldTime>().frame_count;
        for update in feed.scoreboard.try_iter() {
            log::info!(
                "frame {} | wave {} | monsters {} | score {} | village {}/{}{}",
                frame,
                update.wave,
                update.monsters_remaining,
                update.score,
                update.village_hp,
                update.village_max_hp,
                update
                    .message
                    .map(|m| format!(" | {}", m))
                    .unwrap_or_default()
            );
        }
        feed.effects.try_iter().for_each(drop);
    }
}

fn run_windowed(config: &GameConfig, layout: IslandLayout) {
    let mut builder = raylib::init();
    builder
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Island Defense");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);

    let (mut world, feed) = game::init_world(config, layout, InputMode::Desktop);
    let mut schedule = game::build_schedule();
    let mut view = EffectsView::new(feed);

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        poll_desktop_input(&mut world, &rl);
        game::step(&mut world, &mut schedule, dt);
        view.update(&mut world, dt);
        render_frame(&mut rl, &thread, &mut world, &view);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli);

    if let Some(path) = &cli.write_config {
        let mut out = config.clone();
        out.config_path = path.clone();
        if let Err(e) = out.save_to_file() {
            log::error!("{}", e);
            std::process::exit(1);
        }
        println!("Config written to {}", path.display());
        return;
    }

    let layout = load_layout(&config);
    log::info!("Island Defense starting");
    if cli.headless {
        run_headless(&config, layout, cli.frames);
    } else {
        run_windowed(&config, layout);
    }
}

/// Entry point and game loop.

mod config;
mod domain;
mod muse;
mod sim;
mod ui;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use crossterm::event::KeyCode;

use config::GameConfig;
use domain::entity::{FrameInput, Keys};
use domain::geom::Vec2;
use sim::event::GameEvent;
use sim::level::MAP_MUSIC;
use sim::step;
use sim::world::{Phase, WorldState};
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

/// Liquid Rigidity: a terminal arcade game, plus a random music picker.
#[derive(Parser)]
#[command(version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Play the game (the default).
    Play(PlayArgs),
    /// Pick a random key, style and image to make music with.
    Muse {
        /// Print one selection and exit.
        #[arg(long)]
        once: bool,
        /// Directory to pick images from (default: from config).
        #[arg(long, value_name = "DIR")]
        images: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// Seed for a repeatable session.
    #[arg(long)]
    seed: Option<u64>,
    /// Config file to use instead of searching for config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Command::Muse { once, images, seed }) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
            let config = GameConfig::load(None);
            for warning in &config.warnings {
                log::warn!("{warning}");
            }
            let dir = images.unwrap_or(config.assets.images_dir);
            muse::run(once, &dir, seed)
        }
        Some(Command::Play(args)) => play(args),
        None => play(cli.play),
    }
}

/// Stdout is the game screen, so logs go to a file.
fn init_file_logger(path: &Path) {
    match File::create(path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("Cannot open log file {}: {e}. Logging disabled.", path.display()),
    }
}

fn play(args: PlayArgs) -> anyhow::Result<()> {
    let config = GameConfig::load(args.config.as_deref());
    init_file_logger(&config.log_file);
    for warning in &config.warnings {
        log::warn!("{warning}");
    }

    let seed = args.seed.or(config.seed);
    log::info!("starting session (seed: {seed:?})");
    let mut world = WorldState::new(config.timing.clone(), seed);
    let mut sound = SoundEngine::new(&config.assets.sounds_dir);

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        let _ = renderer.cleanup();
        return Err(e).context("terminal init failed");
    }

    let result = game_loop(&mut world, &mut renderer, sound.as_mut(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    result?;

    log::info!("session over");
    println!("Thanks for playing Liquid Rigidity!");
    Ok(())
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    mut sound: Option<&mut SoundEngine>,
    config: &GameConfig,
) -> anyhow::Result<()> {
    let mut kb = InputState::new();
    kb.honor_release = renderer.key_release;
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(config.timing.tick_rate_ms);

    // Clicks and presses land between ticks; hold them for the next one.
    let mut pending = PendingInput::default();

    loop {
        kb.drain_events();
        gp.update();

        if kb.ctrl_c_pressed() {
            break;
        }
        if handle_meta(world, sound.as_deref_mut(), &kb, &gp) {
            break;
        }

        if !world.paused {
            pending.collect(world, &kb, &gp);
        }

        if last_tick.elapsed() >= tick_rate {
            let input = pending.take(detect_movement(&kb, &gp));
            let events = step::step(world, input);
            process_events(sound.as_deref_mut(), &events);
            last_tick = Instant::now();
        }

        renderer.render(world).context("render failed")?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];

fn detect_movement(kb: &InputState, gp: &GamepadState) -> Keys {
    let pad = gp.movement();
    let key = |codes: &[KeyCode]| kb.any_held(codes) || kb.any_pressed(codes);
    Keys {
        left: key(KEYS_LEFT) || pad.left,
        right: key(KEYS_RIGHT) || pad.right,
        up: key(KEYS_UP) || pad.up,
        down: key(KEYS_DOWN) || pad.down,
    }
}

#[derive(Default)]
struct PendingInput {
    click: Option<Vec2>,
    confirm: bool,
    pick: Option<usize>,
}

impl PendingInput {
    fn collect(&mut self, world: &WorldState, kb: &InputState, gp: &GamepadState) {
        if let Some((col, row)) = kb.last_click() {
            if let Some(point) = world.viewport.to_logical(col, row) {
                self.click = Some(point);
            }
        }
        if gp.fire_pressed() {
            if let Some(player) = &world.player {
                self.click = Some(gp.aim_target(player.rect.center_vec()));
            }
        }
        if kb.any_pressed(KEYS_CONFIRM) || gp.confirm_pressed() {
            self.confirm = true;
        }
        if let Some(digit) = kb.digit_pressed() {
            self.pick = Some(digit);
        }
    }

    fn take(&mut self, keys: Keys) -> FrameInput {
        let PendingInput { click, confirm, pick } = std::mem::take(self);
        FrameInput { keys, click, confirm, pick }
    }
}

/// Pause and leave keys. Returns true when the game should quit.
fn handle_meta(
    world: &mut WorldState,
    sound: Option<&mut SoundEngine>,
    kb: &InputState,
    gp: &GamepadState,
) -> bool {
    if kb.was_pressed(KeyCode::F(1)) {
        world.paused = !world.paused;
        log::info!("{}", if world.paused { "paused" } else { "resumed" });
    }

    if kb.was_pressed(KeyCode::Esc) || gp.cancel_pressed() {
        match world.phase {
            Phase::CharacterSelect | Phase::Map => return true,
            Phase::Intro(_) | Phase::Playing(_) => {
                world.paused = false;
                let events = step::abandon_level(world);
                process_events(sound, &events);
            }
            // The banner returns to the map on its own.
            Phase::Banner | Phase::HotDog => {}
        }
    }

    false
}

fn process_events(sound: Option<&mut SoundEngine>, events: &[GameEvent]) {
    for event in events {
        log_event(event);
    }
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        match event {
            GameEvent::EnteredMap => sfx.play_music(MAP_MUSIC),
            GameEvent::LevelStarted(level) => sfx.play_music(&level.music_key()),
            GameEvent::WeaponFired { character, .. } => sfx.play_weapon(*character),
            GameEvent::WaterFired
            | GameEvent::BrainCollected { .. }
            | GameEvent::AnimalRescued { .. }
            | GameEvent::DataCollected { .. } => sfx.play_pickup(),
            GameEvent::EnemyDestroyed { .. }
            | GameEvent::AnimalCaught { .. }
            | GameEvent::FlameDoused { .. }
            | GameEvent::DataMissed { .. } => sfx.play_hit(),
            GameEvent::LevelFinished { won, .. } => {
                sfx.stop_music();
                if *won { sfx.play_win() } else { sfx.play_lose() }
            }
            GameEvent::LevelAbandoned(_) => sfx.stop_music(),
            _ => {}
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::CharacterChosen(c) => {
            log::info!("character chosen: {} ({})", c.name(), c.weapon())
        }
        GameEvent::DoorLocked { door } => log::info!("door {door} is locked"),
        GameEvent::LevelStarted(level) => {
            log::info!("level {} started: {}", level.number(), level.title())
        }
        GameEvent::WeaponFired { character, target } => log::info!(
            "{} fired {} at ({:.0}, {:.0})",
            character.name(), character.weapon(), target.x, target.y,
        ),
        GameEvent::BrainCollected { total } => log::info!("brain collected ({total})"),
        GameEvent::AnimalCaught { remaining } => {
            log::info!("animal caught, {remaining} left")
        }
        GameEvent::AnimalRescued { remaining } => {
            log::info!("animal rescued, {remaining} left")
        }
        GameEvent::LevelFinished { level, won } => log::info!(
            "level {} {}",
            level.number(),
            if *won { "won" } else { "lost" },
        ),
        GameEvent::LevelAbandoned(level) => log::info!("level {} abandoned", level.number()),
        other => log::debug!("{other:?}"),
    }
}

/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. HUD message timer
///   2. Phase dispatch
///      - CharacterSelect: a 1–5 pick, or up/down then confirm, creates
///        the player
///      - Map: free movement, door contact
///      - Intro: start button (click or confirm)
///      - Playing: the level's own step, outcome → banner
///      - Banner / HotDog: countdown, then back to the map
///
/// Esc is not a phase input: the loop calls `abandon_level` directly.

use crate::domain::entity::{FrameInput, Player};
use crate::domain::geom::{SCREEN_H, SCREEN_W};
use crate::domain::roster::Character;
use super::event::GameEvent;
use super::level::{door_rects, LevelId};
use super::levels::{Anchor, LevelCtx, Outcome, Scene, Tone};
use super::story;
use super::world::{Banner, Phase, WorldState};

/// How long the locked-door notice stays up.
const NOTICE_TICKS: u32 = 90;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState, input: FrameInput) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();
    if world.paused { return events; }

    world.tick += 1;

    if world.message_timer > 0 {
        world.message_timer -= 1;
        if world.message_timer == 0 { world.message.clear(); }
    }

    match world.phase {
        Phase::CharacterSelect => step_select(world, &input, &mut events),
        Phase::Map => step_map(world, &input, &mut events),
        Phase::Intro(level) => step_intro(world, level, &input, &mut events),
        Phase::Playing(level) => step_playing(world, level, &input, &mut events),
        Phase::Banner | Phase::HotDog => step_banner(world, &mut events),
    }
    world.last_keys = input.keys;

    events
}

/// Leave the current intro or level for the map. Nothing is recorded.
/// Returns no events outside an intro or level.
pub fn abandon_level(world: &mut WorldState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if let Some(level) = world.active_level() {
        events.push(GameEvent::LevelAbandoned(level));
        enter_map(world, &mut events);
    }
    events
}

// ══════════════════════════════════════════════════════════════
// Phase transitions
// ══════════════════════════════════════════════════════════════

fn enter_map(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    world.phase = Phase::Map;
    world.scene = None;
    world.banner = None;
    if let Some(p) = world.player.as_mut() {
        p.rect.set_center(SCREEN_W / 2, SCREEN_H / 2);
    }
    events.push(GameEvent::EnteredMap);
}

fn finish_level(
    world: &mut WorldState,
    level: LevelId,
    outcome: Outcome,
    events: &mut Vec<GameEvent>,
) {
    let won = outcome.won();
    world.record.record(level, won);
    events.push(GameEvent::LevelFinished { level, won });

    let ticks_left = world.timing.banner_ticks;
    let (phase, banner) = match outcome {
        Outcome::Banner { text, tone, anchor, .. } => {
            (Phase::Banner, Banner { text, tone, anchor, ticks_left })
        }
        Outcome::HotDog => (
            Phase::HotDog,
            Banner {
                text: "Enjoy your hot dog!".to_string(),
                tone: Tone::Alert,
                anchor: Anchor::Bottom,
                ticks_left,
            },
        ),
    };
    world.phase = phase;
    world.banner = Some(banner);
}

// ══════════════════════════════════════════════════════════════
// Per-phase steps
// ══════════════════════════════════════════════════════════════

fn step_select(world: &mut WorldState, input: &FrameInput, events: &mut Vec<GameEvent>) {
    let count = Character::ALL.len();
    let last = world.last_keys;
    if input.keys.up && !last.up {
        world.select_cursor = (world.select_cursor + count - 1) % count;
    }
    if input.keys.down && !last.down {
        world.select_cursor = (world.select_cursor + 1) % count;
    }

    let chosen = match input.pick {
        Some(n) => Character::from_choice(n),
        None if input.confirm => Character::ALL.get(world.select_cursor).copied(),
        None => None,
    };
    let Some(character) = chosen else { return };
    world.player = Some(Player::new(character));
    events.push(GameEvent::CharacterChosen(character));
    enter_map(world, events);
}

fn step_map(world: &mut WorldState, input: &FrameInput, events: &mut Vec<GameEvent>) {
    let Some(player) = world.player.as_mut() else {
        world.phase = Phase::CharacterSelect;
        return;
    };
    player.update(input.keys);

    let rect = player.rect;
    let Some(door) = door_rects().iter().position(|d| rect.collides(d)) else { return };

    match LevelId::from_door(door) {
        Some(level) => {
            world.phase = Phase::Intro(level);
            events.push(GameEvent::IntroShown(level));
        }
        None => {
            player.rect.set_center(SCREEN_W / 2, SCREEN_H / 2);
            let number = door + 1;
            world.set_message(&format!("Door {number} is locked."), NOTICE_TICKS);
            events.push(GameEvent::DoorLocked { door: number });
        }
    }
}

fn step_intro(
    world: &mut WorldState,
    level: LevelId,
    input: &FrameInput,
    events: &mut Vec<GameEvent>,
) {
    let button = story::intro(level).button;
    let pressed = input.confirm || input.click.is_some_and(|c| button.contains_point(c));
    if !pressed { return; }

    let Some(player) = world.player.as_mut() else { return };
    world.scene = Some(Scene::build(level, player, &mut world.rng, world.tick));
    world.phase = Phase::Playing(level);
    events.push(GameEvent::LevelStarted(level));
}

fn step_playing(
    world: &mut WorldState,
    level: LevelId,
    input: &FrameInput,
    events: &mut Vec<GameEvent>,
) {
    let (Some(player), Some(scene)) = (world.player.as_mut(), world.scene.as_mut()) else {
        enter_map(world, events);
        return;
    };
    let mut ctx = LevelCtx {
        player,
        rng: &mut world.rng,
        tick: world.tick,
        timing: &world.timing,
    };
    if let Some(outcome) = scene.step(&mut ctx, input, events) {
        finish_level(world, level, outcome, events);
    }
}

fn step_banner(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    let done = match world.banner.as_mut() {
        Some(b) => {
            b.ticks_left = b.ticks_left.saturating_sub(1);
            b.ticks_left == 0
        }
        None => true,
    };
    if done {
        enter_map(world, events);
    }
}

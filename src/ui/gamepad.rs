/// Gamepad input tracker using gilrs.
///
/// Button roles come from the `[gamepad]` section of config.toml via
/// `load_button_config()`. Default roles:
///   D-pad / Left Stick    →  Movement
///   Right Stick           →  Aim
///   A / R1                →  Fire
///   Start / A             →  Confirm
///   Select / B            →  Back to map / Quit

use std::collections::HashSet;

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::domain::entity::Keys;
use crate::domain::geom::Vec2;

const STICK_DEADZONE: f32 = 0.25;

/// How far in front of the player a pad shot is aimed.
const AIM_REACH: f32 = 200.0;

/// Face, shoulder and menu buttons a role can be bound to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,
    B,
    X,
    Y,
    L1,
    R1,
    L2,
    R2,
    Start,
    Select,
}

/// Accepted config names per button (matched case-insensitively).
const BUTTON_NAMES: [(Btn, &[&str]); 10] = [
    (Btn::A, &["A", "SOUTH"]),
    (Btn::B, &["B", "EAST"]),
    (Btn::X, &["X", "WEST"]),
    (Btn::Y, &["Y", "NORTH"]),
    (Btn::L1, &["L1", "LB", "LEFTTRIGGER"]),
    (Btn::R1, &["R1", "RB", "RIGHTTRIGGER"]),
    (Btn::L2, &["L2", "LT", "LEFTTRIGGER2"]),
    (Btn::R2, &["R2", "RT", "RIGHTTRIGGER2"]),
    (Btn::Start, &["START"]),
    (Btn::Select, &["SELECT", "BACK"]),
];

impl Btn {
    fn from_name(name: &str) -> Option<Btn> {
        let upper = name.trim().to_uppercase();
        BUTTON_NAMES
            .iter()
            .find(|(_, names)| names.contains(&upper.as_str()))
            .map(|(btn, _)| *btn)
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(button: Button) -> Option<Btn> {
        Some(match button {
            Button::South => Btn::A,
            Button::East => Btn::B,
            Button::West => Btn::X,
            Button::North => Btn::Y,
            Button::LeftTrigger => Btn::L1,
            Button::RightTrigger => Btn::R1,
            Button::LeftTrigger2 => Btn::L2,
            Button::RightTrigger2 => Btn::R2,
            Button::Start => Btn::Start,
            Button::Select => Btn::Select,
            _ => return None,
        })
    }
}

/// Role → buttons, as loaded from config.
#[derive(Debug)]
struct Roles {
    fire: Vec<Btn>,
    confirm: Vec<Btn>,
    cancel: Vec<Btn>,
}

impl Default for Roles {
    fn default() -> Self {
        Roles {
            fire: vec![Btn::A, Btn::R1],
            confirm: vec![Btn::Start, Btn::A],
            cancel: vec![Btn::Select, Btn::B],
        }
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    held: HashSet<Btn>,
    /// Buttons that went down since the last `update()`.
    pressed: HashSet<Btn>,

    dpad: Keys,
    /// Stick deflections as reported by gilrs (+y is up).
    left_stick: (f32, f32),
    right_stick: (f32, f32),

    /// Last non-zero movement, in screen orientation (+y down).
    last_move: Vec2,

    roles: Roles,

    pub connected: bool,
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs, connected) = match Gilrs::new() {
            Ok(g) => {
                let any_pad = g.gamepads().next().is_some();
                (Some(g), any_pad)
            }
            Err(e) => {
                log::warn!("gamepad support unavailable: {e}");
                (None, false)
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs,
            held: HashSet::new(),
            pressed: HashSet::new(),
            dpad: Keys::default(),
            left_stick: (0.0, 0.0),
            right_stick: (0.0, 0.0),
            last_move: Vec2::new(0.0, -1.0),
            roles: Roles::default(),
            connected,
        }
    }

    /// Apply button roles from config. Unknown names are skipped; a role
    /// left with no valid button keeps its default.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        fn bind(slot: &mut Vec<Btn>, names: &[String]) {
            let btns: Vec<Btn> = names.iter().filter_map(|n| Btn::from_name(n)).collect();
            if !btns.is_empty() {
                *slot = btns;
            }
        }
        bind(&mut self.roles.fire, &cfg.fire);
        bind(&mut self.roles.confirm, &cfg.confirm);
        bind(&mut self.roles.cancel, &cfg.cancel);
    }

    /// Poll pending pad events. Call once per frame.
    pub fn update(&mut self) {
        self.pressed.clear();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();

        let movement = self.movement();
        let (dx, dy) = movement.direction();
        if dx != 0 || dy != 0 {
            self.last_move = Vec2::new(dx as f32, dy as f32);
        }
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let Some(gilrs) = self.gilrs.as_mut() else { return };
        let events: Vec<EventType> = std::iter::from_fn(|| gilrs.next_event())
            .map(|e| e.event)
            .collect();

        for event in events {
            match event {
                EventType::ButtonPressed(button, _) => self.on_button(button, true),
                EventType::ButtonReleased(button, _) => self.on_button(button, false),
                EventType::AxisChanged(axis, value, _) => self.on_axis(axis, value),
                EventType::Connected => {
                    self.connected = true;
                    log::info!("gamepad connected");
                }
                EventType::Disconnected => {
                    self.connected = false;
                    self.release_all();
                    log::info!("gamepad disconnected");
                }
                _ => {}
            }
        }
    }

    #[cfg(feature = "gamepad")]
    fn on_button(&mut self, button: Button, down: bool) {
        let dpad = match button {
            Button::DPadUp => Some(&mut self.dpad.up),
            Button::DPadDown => Some(&mut self.dpad.down),
            Button::DPadLeft => Some(&mut self.dpad.left),
            Button::DPadRight => Some(&mut self.dpad.right),
            _ => None,
        };
        if let Some(flag) = dpad {
            *flag = down;
            return;
        }

        let Some(btn) = Btn::from_gilrs(button) else { return };
        if down {
            if self.held.insert(btn) {
                self.pressed.insert(btn);
            }
        } else {
            self.held.remove(&btn);
        }
    }

    #[cfg(feature = "gamepad")]
    fn on_axis(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::LeftStickX => self.left_stick.0 = value,
            Axis::LeftStickY => self.left_stick.1 = value,
            Axis::RightStickX => self.right_stick.0 = value,
            Axis::RightStickY => self.right_stick.1 = value,
            _ => {}
        }
    }

    // ── Role queries ──

    fn role_pressed(&self, btns: &[Btn]) -> bool {
        btns.iter().any(|b| self.pressed.contains(b))
    }

    pub fn fire_pressed(&self) -> bool {
        self.role_pressed(&self.roles.fire)
    }

    pub fn confirm_pressed(&self) -> bool {
        self.role_pressed(&self.roles.confirm)
    }

    pub fn cancel_pressed(&self) -> bool {
        self.role_pressed(&self.roles.cancel)
    }

    /// Held directions from the d-pad and the left stick.
    pub fn movement(&self) -> Keys {
        let (sx, sy) = self.left_stick;
        Keys {
            left: self.dpad.left || sx < -STICK_DEADZONE,
            right: self.dpad.right || sx > STICK_DEADZONE,
            up: self.dpad.up || sy > STICK_DEADZONE,
            down: self.dpad.down || sy < -STICK_DEADZONE,
        }
    }

    /// Where a pad shot from `origin` should land: along the right stick
    /// when it is deflected, otherwise along the last movement.
    pub fn aim_target(&self, origin: Vec2) -> Vec2 {
        let stick = Vec2::new(self.right_stick.0, -self.right_stick.1);
        let dir = if stick.length() > STICK_DEADZONE { stick } else { self.last_move };
        match dir.normalized() {
            Some(unit) => origin + unit * AIM_REACH,
            None => origin,
        }
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn release_all(&mut self) {
        self.held.clear();
        self.pressed.clear();
        self.dpad = Keys::default();
        self.left_stick = (0.0, 0.0);
        self.right_stick = (0.0, 0.0);
    }
}

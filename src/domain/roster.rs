/// The band: five playable characters.
/// Properties are queried via methods so the roster lives in one place.

use super::geom::{Rgb, BLACK, ORANGE, PINK, RED, WHITE};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Character {
    Daniel,
    Rob,
    Pete,
    Seb,
    Hera,
}

impl Character {
    /// Selection order on the welcome screen (keys 1–5).
    pub const ALL: [Character; 5] = [
        Character::Daniel,
        Character::Rob,
        Character::Pete,
        Character::Seb,
        Character::Hera,
    ];

    /// Character for a 1-based menu choice.
    pub fn from_choice(n: usize) -> Option<Character> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            Character::Daniel => "Daniel",
            Character::Rob => "Rob",
            Character::Pete => "Pete",
            Character::Seb => "Seb",
            Character::Hera => "Hera",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Character::Daniel => RED,
            Character::Rob => PINK,
            Character::Pete => BLACK,
            Character::Seb => ORANGE,
            Character::Hera => WHITE,
        }
    }

    pub fn weapon(self) -> &'static str {
        match self {
            Character::Daniel => "vocal blast",
            Character::Rob => "guitar riff",
            Character::Pete => "synth wave",
            Character::Seb => "drum smash",
            Character::Hera => "bass pulse",
        }
    }

    /// Pixels per tick.
    pub fn speed(self) -> i32 {
        match self {
            Character::Daniel => 4,
            Character::Hera => 6,
            _ => 5,
        }
    }

    /// File name of the weapon sound inside the sounds directory.
    pub fn weapon_sound_file(self) -> String {
        format!("{}_weapon.mp3", self.name().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices_map_in_order() {
        assert_eq!(Character::from_choice(1), Some(Character::Daniel));
        assert_eq!(Character::from_choice(5), Some(Character::Hera));
        assert_eq!(Character::from_choice(0), None);
        assert_eq!(Character::from_choice(6), None);
    }

    #[test]
    fn speeds_match_roster() {
        assert_eq!(Character::Daniel.speed(), 4);
        assert_eq!(Character::Rob.speed(), 5);
        assert_eq!(Character::Hera.speed(), 6);
    }

    #[test]
    fn weapon_sound_is_lowercase() {
        assert_eq!(Character::Seb.weapon_sound_file(), "seb_weapon.mp3");
    }
}

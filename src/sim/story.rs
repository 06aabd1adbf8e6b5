/// Level intros: the story card shown before each level starts.

use crate::domain::geom::{Rect, SCREEN_H, SCREEN_W};
use super::level::LevelId;

pub struct Intro {
    pub lines: &'static [&'static str],
    /// Logical y of the first line; lines are 40 px apart.
    pub first_line_y: i32,
    pub button: Rect,
    pub button_label: &'static str,
    /// Extra hint drawn above the button.
    pub prompt: Option<&'static str>,
}

pub const LINE_SPACING: i32 = 40;

const FOUNTAIN: &[&str] = &[
    "There it was, just like old faithful...",
    "The eternal Fountain of Filth.",
    "I took a walk straight out of town,",
    "but stopped and took my time for pleasure.",
    "It was there I found the fountain,",
    "spewing filth that consumed the land.",
    "Now, you must fight the filth,",
    "and destroy the fountain to escape its grip.",
    "Prepare for the first challenge: The Fountain of Filth.",
];

const ORIGINS: &[&str] = &[
    "Man began his career on Earth as a sex-obsessed ape.",
    "He wished only to make his sex life the source of all happiness",
    "through the eating of brains.",
    "However, he has achieved the exact opposite.",
    "It has become the primary source of dissatisfaction and suffering.",
    "",
    "Prepare yourself to delve into the dark origins of human intelligence,",
    "and face the consequences of the gruesome brain-eating practice.",
    "Welcome to Level 2: The Beginning Was the End.",
];

const RESCUE: &[&str] = &[
    "In our time, the defense of the innocent and the defense of the Earth",
    "are of the utmost importance. The greed and selfishness of society",
    "is destroying our world and killing animals by the billions.",
    "",
    "NO MORE shall we tolerate these acts.",
    "You must rescue the animals from humans before it's too late.",
    "Set the animals free or scare the humans away to save the planet.",
    "",
    "Welcome to Level 3: Vegan Hate.",
];

const HOT_DOG: &[&str] = &[
    "Hunger strikes in the dead of night.",
    "The neon glow of 7-Eleven calls to you.",
    "Hot dogs rolling on the grill, fulfilling every need.",
    "Navigate the maze of alleys and streets,",
    "find the 7-Eleven, and satisfy your craving.",
    "",
    "Welcome to Level 4: Seven-11 Hot Dog.",
];

const COMBUSTION: &[&str] = &[
    "As a child, I feared Spontaneous Human Combustion (SHC)...",
    "Flames bursting from nowhere, consuming loved ones.",
    "Now, in this nightmare, a man has caught fire!",
    "Use your water pistol to extinguish the flames.",
    "If the flames grow too large, it's game over!",
];

const DATA_DATE: &[&str] = &[
    "Lonely nights, staring at a TV screen...",
    "Lost in cyberspace, I call for a 'data date'.",
    "Collect all the data points to make a connection,",
    "but beware the roaming glitches and viruses!",
    "Hurry up, the clock is ticking...",
];

pub fn intro(level: LevelId) -> Intro {
    let narrow = Rect::new(SCREEN_W / 2 - 75, SCREEN_H - 100, 150, 50);
    let wide = Rect::new(SCREEN_W / 2 - 100, SCREEN_H - 100, 200, 50);
    match level {
        LevelId::Gallery => Intro {
            lines: FOUNTAIN, first_line_y: 50, button: narrow,
            button_label: "Start Level", prompt: None,
        },
        LevelId::Harvest => Intro {
            lines: ORIGINS, first_line_y: 50, button: narrow,
            button_label: "Start Level", prompt: None,
        },
        LevelId::Rescue => Intro {
            lines: RESCUE, first_line_y: 50, button: narrow,
            button_label: "Start Level", prompt: None,
        },
        LevelId::Maze => Intro {
            lines: HOT_DOG, first_line_y: 50, button: narrow,
            button_label: "Start Level", prompt: None,
        },
        LevelId::Blaze => Intro {
            lines: COMBUSTION, first_line_y: 100, button: wide,
            button_label: "Start Level 5", prompt: None,
        },
        LevelId::Datafall => Intro {
            lines: DATA_DATE, first_line_y: 100, button: wide,
            button_label: "Start", prompt: Some("Click the button to begin!"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geom::Vec2;

    #[test]
    fn every_level_has_a_story() {
        for level in LevelId::ALL {
            let i = intro(level);
            assert!(!i.lines.is_empty());
            let last_y = i.first_line_y + LINE_SPACING * (i.lines.len() as i32 - 1);
            assert!(last_y < i.button.top(), "{level:?} text overlaps its button");
        }
    }

    #[test]
    fn button_centre_is_clickable() {
        let b = intro(LevelId::Blaze).button;
        assert!(b.contains_point(b.center_vec()));
        assert!(!b.contains_point(Vec2::new(10.0, 10.0)));
    }
}

/// Random music generator: picks a key, a style and a picture to write to.
///
/// Runs as a line-oriented prompt on the terminal, or prints a single
/// selection with `--once`.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub const PITCHES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

pub const MODES: [&str; 12] = [
    "Major", "Minor", "Dorian", "Phrygian", "Lydian", "Mixolydian", "Locrian",
    "Harmonic Minor", "Melodic Minor", "Pentatonic Major", "Pentatonic Minor", "Blues",
];

pub const STYLES: [&str; 15] = [
    "Jazz", "Blues", "Rock", "Classical", "Pop", "Funk", "Electronic", "Hip-Hop",
    "Reggae", "Folk", "Country", "Ambient", "Metal", "Latin", "Soul",
];

const WELCOME: &str = "Welcome to the Random Music Generator!";
const MENU: &str = "[g] Generate Random Music   [q] Exit";

/// A pitch class and a mode, e.g. "F# Dorian".
pub fn random_key<R: Rng>(rng: &mut R) -> String {
    let pitch = PITCHES[rng.gen_range(0..PITCHES.len())];
    let mode = MODES[rng.gen_range(0..MODES.len())];
    format!("{pitch} {mode}")
}

pub fn random_style<R: Rng>(rng: &mut R) -> &'static str {
    STYLES[rng.gen_range(0..STYLES.len())]
}

/// A random file from `dir`. Entries are sorted first so a seeded
/// generator always picks the same file.
pub fn random_image<R: Rng>(rng: &mut R, dir: &Path) -> anyhow::Result<PathBuf> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read images directory {}", dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    match files.choose(rng) {
        Some(path) => Ok(path.clone()),
        None => bail!("no images in {}", dir.display()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub key: String,
    pub style: &'static str,
    pub image: PathBuf,
}

impl Selection {
    pub fn generate<R: Rng>(rng: &mut R, images_dir: &Path) -> anyhow::Result<Self> {
        let key = random_key(rng);
        let style = random_style(rng);
        let image = random_image(rng, images_dir)?;
        Ok(Selection { key, style, image })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key: {}\nStyle: {}", self.key, self.style)
    }
}

fn print_selection<W: Write>(out: &mut W, selection: &Selection) -> io::Result<()> {
    writeln!(out, "{selection}")?;
    writeln!(out, "Image: {}", selection.image.display())
}

/// Entry point for the `muse` subcommand.
pub fn run(once: bool, images_dir: &Path, seed: Option<u64>) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if once {
        let selection = Selection::generate(&mut rng, images_dir)?;
        log::debug!("generated {} / {}", selection.key, selection.style);
        print_selection(&mut out, &selection).context("cannot write to stdout")?;
        return Ok(());
    }

    let stdin = io::stdin();
    prompt_loop(&mut rng, images_dir, stdin.lock(), &mut out)
}

/// Reads commands line by line until `q` or end of input.
/// A failed selection is reported and the prompt stays open.
fn prompt_loop<R: Rng, I: BufRead, W: Write>(
    rng: &mut R,
    images_dir: &Path,
    input: I,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "{WELCOME}")?;
    writeln!(out, "{MENU}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("cannot read from stdin")?;
        match line.trim() {
            "q" | "Q" => break,
            "" | "g" | "G" => match Selection::generate(rng, images_dir) {
                Ok(selection) => {
                    log::debug!("generated {} / {}", selection.key, selection.style);
                    print_selection(out, &selection)?;
                }
                Err(e) => {
                    log::warn!("selection failed: {e:#}");
                    writeln!(out, "Error: {e:#}")?;
                }
            },
            other => writeln!(out, "Unknown command '{other}'")?,
        }
        writeln!(out, "{MENU}")?;
        out.flush()?;
    }
    Ok(())
}

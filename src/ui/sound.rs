/// Sound engine: looping music tracks, weapon samples and procedural
/// 8-bit jingles via rodio.
///
/// Music and weapon sounds are read from the sounds directory
/// (`<key>_music.mp3`, `<name>_weapon.mp3`). A missing file is logged once
/// and replaced by silence (music) or a generated blip (weapons).
/// Jingles are generated as in-memory WAV buffers at init time.
///
/// Compile with `--no-default-features` or without "sound" feature
/// to disable audio entirely (the stub SoundEngine does nothing).

use crate::domain::roster::Character;

/// Pitch of the stand-in blip when a weapon sample is missing.
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn weapon_blip_freq(character: Character) -> f32 {
    match character {
        Character::Daniel => 330.0,
        Character::Rob => 440.0,
        Character::Pete => 523.0,
        Character::Seb => 196.0,
        Character::Hera => 659.0,
    }
}

#[cfg(feature = "sound")]
mod inner {
    use std::collections::HashSet;
    use std::f32::consts::TAU;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

    use super::weapon_blip_freq;
    use crate::domain::roster::Character;

    const SAMPLE_RATE: u32 = 22050;
    const MUSIC_VOLUME: f32 = 0.5;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sounds_dir: PathBuf,
        music: Option<Sink>,
        /// Track keys already reported missing.
        missing: HashSet<String>,
        weapons: Vec<(Character, Arc<Vec<u8>>)>,
        sfx_pickup: Arc<Vec<u8>>,
        sfx_hit: Arc<Vec<u8>>,
        sfx_win: Arc<Vec<u8>>,
        sfx_lose: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new(sounds_dir: &Path) -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    log::warn!("no audio output, continuing silently: {e}");
                    return None;
                }
            };

            let weapons = Character::ALL
                .iter()
                .map(|&c| {
                    let path = sounds_dir.join(c.weapon_sound_file());
                    let bytes = std::fs::read(&path).unwrap_or_else(|e| {
                        log::warn!("{}: {e}; using a generated blip", path.display());
                        make_wav(&gen_blip(weapon_blip_freq(c), 0.12, 0.3))
                    });
                    (c, Arc::new(bytes))
                })
                .collect();

            Some(SoundEngine {
                _stream: stream,
                handle,
                sounds_dir: sounds_dir.to_path_buf(),
                music: None,
                missing: HashSet::new(),
                weapons,
                sfx_pickup: Arc::new(make_wav(&gen_pickup())),
                sfx_hit: Arc::new(make_wav(&gen_hit())),
                sfx_win: Arc::new(make_wav(&gen_win())),
                sfx_lose: Arc::new(make_wav(&gen_lose())),
            })
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach();
                }
            }
        }

        /// Loop `<sounds_dir>/<key>_music.mp3`, replacing the current track.
        pub fn play_music(&mut self, key: &str) {
            self.stop_music();
            let path = self.sounds_dir.join(format!("{key}_music.mp3"));
            let bytes = match std::fs::read(&path) {
                Ok(b) => b,
                Err(e) => {
                    if self.missing.insert(key.to_string()) {
                        log::warn!("{}: {e}; no music for '{key}'", path.display());
                    }
                    return;
                }
            };
            match Decoder::new_looped(Cursor::new(bytes)) {
                Ok(dec) => {
                    if let Ok(sink) = Sink::try_new(&self.handle) {
                        sink.append(dec);
                        sink.set_volume(MUSIC_VOLUME);
                        self.music = Some(sink);
                    }
                }
                Err(e) => log::warn!("{}: cannot decode: {e}", path.display()),
            }
        }

        pub fn stop_music(&mut self) {
            if let Some(s) = self.music.take() { s.stop(); }
        }

        pub fn play_weapon(&self, character: Character) {
            if let Some((_, buf)) = self.weapons.iter().find(|(c, _)| *c == character) {
                self.play(buf);
            }
        }

        pub fn play_pickup(&self) { self.play(&self.sfx_pickup); }
        pub fn play_hit(&self) { self.play(&self.sfx_hit); }
        pub fn play_win(&self) { self.play(&self.sfx_win); }
        pub fn play_lose(&self) { self.play(&self.sfx_lose); }
    }

    // ── Jingles ──

    /// Overtones as (multiple of the fundamental, weight).
    type Timbre = &'static [(f32, f32)];

    const PURE: Timbre = &[(1.0, 1.0)];
    const BRIGHT: Timbre = &[(1.0, 0.7), (3.0, 0.3)];
    const BRASS: Timbre = &[(1.0, 0.6), (2.0, 0.3), (3.0, 0.1)];

    fn fade(p: f32) -> f32 { 1.0 - p }
    fn pluck(p: f32) -> f32 { 1.0 - p.sqrt() }
    fn hold(p: f32) -> f32 { 1.0 - 0.3 * p }

    fn sample_count(secs: f32) -> usize {
        (SAMPLE_RATE as f32 * secs) as usize
    }

    /// Plays `freqs` back to back, `secs` each. `env` maps the position
    /// inside a note (0..1) to its gain.
    fn melody(freqs: &[f32], secs: f32, timbre: Timbre, env: fn(f32) -> f32, gain: f32) -> Vec<f32> {
        let n = sample_count(secs);
        freqs
            .iter()
            .flat_map(|&freq| {
                (0..n).map(move |i| {
                    let t = i as f32 / SAMPLE_RATE as f32;
                    let wave: f32 = timbre
                        .iter()
                        .map(|&(mult, weight)| (TAU * freq * mult * t).sin() * weight)
                        .sum();
                    wave * env(i as f32 / n as f32) * gain
                })
            })
            .collect()
    }

    fn gen_blip(freq: f32, secs: f32, gain: f32) -> Vec<f32> {
        melody(&[freq], secs, PURE, fade, gain)
    }

    /// C6 E6 G6.
    fn gen_pickup() -> Vec<f32> {
        melody(&[1047.0, 1319.0, 1568.0], 0.045, BRIGHT, pluck, 0.25)
    }

    /// Falling tone under seeded noise.
    fn gen_hit() -> Vec<f32> {
        let n = sample_count(0.12);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        (0..n)
            .map(|i| {
                let p = i as f32 / n as f32;
                let t = i as f32 / SAMPLE_RATE as f32;
                let tone = (TAU * (500.0 - 300.0 * p) * t).sin();
                let noise: f32 = rng.gen_range(-1.0..1.0);
                (0.4 * tone + 0.6 * noise) * (1.0 - p).powf(0.8) * 0.3
            })
            .collect()
    }

    /// C5 E5 G5 C6, then a ringing C6.
    fn gen_win() -> Vec<f32> {
        let mut out = melody(&[523.0, 659.0, 784.0, 1047.0], 0.1, BRASS, hold, 0.3);
        out.extend(melody(&[1047.0], 0.25, PURE, fade, 0.3));
        out
    }

    /// A4 F#4 D#4 C4, last quarter faded out.
    fn gen_lose() -> Vec<f32> {
        let mut out = melody(&[440.0, 370.0, 311.0, 261.0], 0.12, PURE, hold, 0.3);
        let tail = out.len() / 4;
        let from = out.len() - tail;
        for (i, v) in out[from..].iter_mut().enumerate() {
            *v *= 1.0 - i as f32 / tail as f32;
        }
        out
    }

    /// 16-bit mono PCM in a RIFF container, for `Decoder`.
    fn make_wav(samples: &[f32]) -> Vec<u8> {
        const BITS: u16 = 16;
        const CHANNELS: u16 = 1;
        let block = CHANNELS * BITS / 8;

        let pcm: Vec<u8> = samples
            .iter()
            .flat_map(|s| ((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16).to_le_bytes())
            .collect();
        let pcm_len = pcm.len() as u32;

        let mut wav = Vec::with_capacity(44 + pcm.len());
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + pcm_len).to_le_bytes());
        wav.extend_from_slice(b"WAVEfmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&CHANNELS.to_le_bytes());
        wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        wav.extend_from_slice(&(SAMPLE_RATE * block as u32).to_le_bytes());
        wav.extend_from_slice(&block.to_le_bytes());
        wav.extend_from_slice(&BITS.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&pcm_len.to_le_bytes());
        wav.extend(pcm);
        wav
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn wav_header_matches_payload() {
            let samples = gen_blip(440.0, 0.01, 0.5);
            let wav = make_wav(&samples);
            assert_eq!(&wav[0..4], b"RIFF");
            assert_eq!(&wav[8..12], b"WAVE");
            assert_eq!(wav.len(), 44 + samples.len() * 2);
            let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
            assert_eq!(data_size as usize, samples.len() * 2);
        }

        #[test]
        fn jingles_stay_in_range() {
            for s in [gen_pickup(), gen_hit(), gen_win(), gen_lose()] {
                assert!(!s.is_empty());
                assert!(s.iter().all(|v| v.abs() <= 1.0));
            }
        }

        #[test]
        fn generated_wav_decodes() {
            let wav = make_wav(&gen_pickup());
            assert!(Decoder::new(Cursor::new(wav)).is_ok());
        }
    }
}

// Without the "sound" feature every call is a no-op.

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new(_sounds_dir: &std::path::Path) -> Option<Self> { Some(SoundEngine) }
    pub fn play_music(&mut self, _key: &str) {}
    pub fn stop_music(&mut self) {}
    pub fn play_weapon(&self, _character: Character) {}
    pub fn play_pickup(&self) {}
    pub fn play_hit(&self) {}
    pub fn play_win(&self) {}
    pub fn play_lose(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_character_has_a_distinct_blip() {
        let mut freqs: Vec<i32> = Character::ALL.iter().map(|&c| weapon_blip_freq(c) as i32).collect();
        freqs.sort_unstable();
        freqs.dedup();
        assert_eq!(freqs.len(), Character::ALL.len());
    }
}

//! Audio service handed to the session at construction
//!
//! The session only ever asks for one-shot effects; music control is for the
//! driver. `AudioManager` tracks volumes and playback state and logs each
//! request; wiring it to an output device is up to the embedding frontend.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Lasso leaves the player's hand
    WebShoot,
}

/// Background music state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MusicState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

pub trait AudioService {
    /// Fire-and-forget one-shot effect
    fn play(&mut self, effect: SoundEffect);
    /// Start looping background music from the top
    fn play_music(&mut self);
    fn stop_music(&mut self);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
    /// Music volume (0.0 - 1.0)
    fn set_music_volume(&mut self, vol: f32);
    fn is_music_playing(&self) -> bool;
    fn stop_all(&mut self);
}

/// Default audio backend
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music: MusicState,
    effects_played: u32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music: MusicState::Stopped,
            effects_played: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    pub fn music_state(&self) -> MusicState {
        self.music
    }

    /// Number of effects actually played (silent requests excluded)
    pub fn effects_played(&self) -> u32 {
        self.effects_played
    }
}

impl AudioService for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.effects_played += 1;
        log::debug!("Playing {:?} at volume {:.2}", effect, vol);
    }

    fn play_music(&mut self) {
        self.music = MusicState::Playing;
        log::info!("Background music started (volume {:.2})", self.effective_music_volume());
    }

    fn stop_music(&mut self) {
        if self.music != MusicState::Stopped {
            log::info!("Background music stopped");
        }
        self.music = MusicState::Stopped;
    }

    fn pause_music(&mut self) {
        if self.music == MusicState::Playing {
            self.music = MusicState::Paused;
        }
    }

    fn resume_music(&mut self) {
        if self.music == MusicState::Paused {
            self.music = MusicState::Playing;
        }
    }

    fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    fn is_music_playing(&self) -> bool {
        self.music == MusicState::Playing
    }

    fn stop_all(&mut self) {
        self.stop_music();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_effects_are_dropped() {
        let mut audio = AudioManager::new();
        audio.play(SoundEffect::WebShoot);
        audio.set_muted(true);
        audio.play(SoundEffect::WebShoot);
        assert_eq!(audio.effects_played(), 1);
        assert_eq!(audio.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_music_pause_resume() {
        let mut audio = AudioManager::new();
        audio.pause_music();
        assert_eq!(audio.music_state(), MusicState::Stopped);
        audio.play_music();
        audio.pause_music();
        assert!(!audio.is_music_playing());
        audio.resume_music();
        assert!(audio.is_music_playing());
        audio.stop_all();
        assert_eq!(audio.music_state(), MusicState::Stopped);
    }

    #[test]
    fn test_volumes_clamped() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(2.0);
        audio.set_music_volume(-1.0);
        assert_eq!(audio.effective_music_volume(), 0.0);
        audio.set_music_volume(0.5);
        assert!((audio.effective_music_volume() - 0.5).abs() < 1e-6);
    }
}

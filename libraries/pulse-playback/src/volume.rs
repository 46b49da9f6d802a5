//! Volume and mute bookkeeping
//!
//! Volume is a linear level in 0.0-1.0 handed straight to the media
//! resource. Mute is a separate flag; the level is left untouched while
//! muted and the last non-zero level is remembered for unmuting.

use serde::{Deserialize, Serialize};

/// Volume icon level shown next to the slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeIcon {
    /// Muted or zero volume
    Muted,

    /// Below half volume
    Low,

    /// Half volume or more
    High,
}

/// Volume controller with mute memory
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (level preserved)
    muted: bool,

    /// Last non-zero level saved when muting
    before_mute: f32,

    /// Level restored when `before_mute` is zero
    fallback: f32,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (clamped to 0.0-1.0)
    /// * `fallback` - Level restored on unmute when nothing was remembered
    pub fn new(level: f32, fallback: f32) -> Self {
        let level = sanitize(level);

        Self {
            level,
            muted: level == 0.0,
            before_mute: level,
            fallback,
        }
    }

    /// Set volume level (0.0-1.0)
    ///
    /// Zero mutes, anything above zero unmutes. Returns false for NaN.
    pub fn set_level(&mut self, level: f32) -> bool {
        if level.is_nan() {
            return false;
        }

        self.level = sanitize(level);
        self.muted = self.level == 0.0;
        true
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Toggle mute state
    ///
    /// Muting remembers the current level if it is non-zero. Unmuting
    /// restores the remembered level, or the fallback if it was zero.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.level = if self.before_mute > 0.0 {
                self.before_mute
            } else {
                self.fallback
            };
            self.muted = false;
        } else {
            if self.level > 0.0 {
                self.before_mute = self.level;
            }
            self.muted = true;
        }
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level remembered for unmuting
    pub fn before_mute(&self) -> f32 {
        self.before_mute
    }

    /// Effective output volume (0.0 while muted)
    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    /// Icon level for the current state
    pub fn icon(&self) -> VolumeIcon {
        if self.muted || self.level == 0.0 {
            VolumeIcon::Muted
        } else if self.level < 0.5 {
            VolumeIcon::Low
        } else {
            VolumeIcon::High
        }
    }
}

fn sanitize(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.75, 0.1)
    }
}

//! Configuration loading
//!
//! Reads an optional TOML file, then overrides from `PULSE_`-prefixed
//! environment variables (e.g. `PULSE_VOLUME=0.5`).

use crate::error::{PlaybackError, Result};
use crate::types::PlaybackConfig;
use std::path::Path;

impl PlaybackConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            } else {
                tracing::debug!("Config file {} not found, using defaults", path.display());
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("PULSE")
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config: PlaybackConfig = settings
            .build()
            .map_err(|e| PlaybackError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlaybackError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration ranges
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(PlaybackError::Config(format!(
                "volume must be within 0.0-1.0, got {}",
                self.volume
            )));
        }

        if !(self.unmute_fallback_volume > 0.0 && self.unmute_fallback_volume <= 1.0) {
            return Err(PlaybackError::Config(format!(
                "unmute_fallback_volume must be within (0.0, 1.0], got {}",
                self.unmute_fallback_volume
            )));
        }

        if !self.position_update_interval.is_finite() || self.position_update_interval < 0.0 {
            return Err(PlaybackError::Config(format!(
                "position_update_interval must be a non-negative number, got {}",
                self.position_update_interval
            )));
        }

        Ok(())
    }

    /// Copy with out-of-range values replaced by usable ones
    ///
    /// Used for configs built in code, which skip [`PlaybackConfig::validate`].
    /// A NaN volume or fallback takes the default; other volumes are clamped.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut config = self.clone();

        if config.volume.is_nan() {
            tracing::warn!("volume is NaN, using {}", defaults.volume);
            config.volume = defaults.volume;
        } else if !(0.0..=1.0).contains(&config.volume) {
            tracing::warn!("volume {} out of range, clamping", config.volume);
            config.volume = config.volume.clamp(0.0, 1.0);
        }

        if !(config.unmute_fallback_volume > 0.0 && config.unmute_fallback_volume <= 1.0) {
            tracing::warn!(
                "unmute_fallback_volume {} unusable, using {}",
                config.unmute_fallback_volume,
                defaults.unmute_fallback_volume
            );
            config.unmute_fallback_volume = defaults.unmute_fallback_volume;
        }

        if !config.position_update_interval.is_finite() || config.position_update_interval < 0.0 {
            tracing::warn!(
                "position_update_interval {} unusable, using {}",
                config.position_update_interval,
                defaults.position_update_interval
            );
            config.position_update_interval = defaults.position_update_interval;
        }

        config
    }
}

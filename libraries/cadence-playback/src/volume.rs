//! Volume control
//!
//! Volume range is 0-100%, handed to the host element as a linear amplitude
//! in `0.0..=1.0`. The host applies its own output curve.

/// Volume level with a mute flag that preserves it
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller, clamping `level` to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain to push to the host element: `level / 100`, or 0.0 if muted
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            f32::from(self.level) / 100.0
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_volume_level_clamps() {
        let mut vol = Volume::new(50);
        vol.set_level(150);
        assert_eq!(vol.level(), 100);
    }

    #[test]
    fn gain_is_linear_in_level() {
        assert_eq!(Volume::new(0).gain(), 0.0);
        assert!((Volume::new(100).gain() - 1.0).abs() < 0.001);
        assert!((Volume::new(50).gain() - 0.5).abs() < 0.001);
        assert!((Volume::new(25).gain() - 0.25).abs() < 0.001);
    }

    #[test]
    fn mute_preserves_level() {
        let mut vol = Volume::new(80);
        vol.toggle_mute();

        assert!(vol.is_muted());
        assert_eq!(vol.gain(), 0.0);
        assert_eq!(vol.level(), 80);

        vol.toggle_mute();
        assert!((vol.gain() - 0.8).abs() < 0.001);
    }
}

//! Volume control with linear scaling
//!
//! Volume is an integer percentage 0-100 mapped straight onto the media
//! output's normalized gain (v/100). The percentage is what gets
//! persisted and shown to the user, the gain is what the output consumes.

/// Volume level as the user sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,
}

impl Volume {
    /// Create a volume control, clamping the level to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
        }
    }

    /// Set volume level (0-100, clamped)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Normalized gain for the media output (level / 100)
    pub fn gain(&self) -> f32 {
        f32::from(self.level) / 100.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(80);
        assert_eq!(vol.level(), 80);
    }

    #[test]
    fn set_volume_level() {
        let mut vol = Volume::new(50);
        vol.set_level(75);
        assert_eq!(vol.level(), 75);

        // Clamp to 100
        vol.set_level(150);
        assert_eq!(vol.level(), 100);
    }

    #[test]
    fn gain_is_level_over_100() {
        assert_eq!(Volume::new(0).gain(), 0.0);
        assert_eq!(Volume::new(50).gain(), 0.5);
        assert_eq!(Volume::new(73).gain(), 0.73);
        assert_eq!(Volume::new(100).gain(), 1.0);
    }

    #[test]
    fn default_is_half_volume() {
        let vol = Volume::default();
        assert_eq!(vol.level(), 50);
        assert_eq!(vol.gain(), 0.5);
    }
}

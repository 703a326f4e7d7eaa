/// Base lifecycle state shared by every scene entity.
///
/// Tracks how long the entity has been alive and, optionally, a duration
/// after which it marks itself dead. Death is advisory: the owning Scene
/// prunes dead entities at the start of each frame.
#[derive(Debug, Clone, Default)]
pub struct Lifetime {
    time_alive: f32,
    duration: Option<f32>,
    dead: bool,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// A lifetime that expires after `duration` seconds.
    pub fn with_duration(duration: f32) -> Self {
        Self {
            time_alive: 0.0,
            duration: Some(duration),
            dead: false,
        }
    }

    /// Advance the age by `dt` seconds, expiring if past the duration.
    pub fn tick(&mut self, dt: f32) {
        self.time_alive += dt;
        if let Some(duration) = self.duration {
            if self.time_alive > duration {
                self.dead = true;
            }
        }
    }

    /// Mark dead immediately, regardless of duration.
    pub fn kill(&mut self) {
        self.dead = true;
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Total seconds this entity has been updated.
    pub fn time_alive(&self) -> f32 {
        self.time_alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undated_lifetime_never_expires() {
        let mut life = Lifetime::new();
        life.tick(1000.0);
        assert!(!life.is_dead());
    }

    #[test]
    fn expires_past_duration() {
        let mut life = Lifetime::with_duration(1.0);
        life.tick(0.9);
        assert!(!life.is_dead());
        life.tick(0.2);
        assert!(life.is_dead());
    }

    #[test]
    fn kill_is_immediate() {
        let mut life = Lifetime::new();
        life.kill();
        assert!(life.is_dead());
    }

    #[test]
    fn time_alive_accumulates() {
        let mut life = Lifetime::new();
        life.tick(0.5);
        life.tick(0.25);
        assert!((life.time_alive() - 0.75).abs() < 1e-6);
    }
}

/// Engine configuration. Defaults match the deployed board.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Reference resolution width; the scale factor is
    /// `canvas_width / reference_width`.
    pub reference_width: f32,
    /// Reference resolution height (16:9 against the width).
    pub reference_height: f32,
    /// Fraction of the viewport height reserved for the status bar at
    /// the bottom; the board occupies the rest.
    pub status_bar_fraction: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            reference_width: 1280.0,
            reference_height: 720.0,
            status_bar_fraction: 0.12,
        }
    }
}

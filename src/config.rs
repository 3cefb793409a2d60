use std::time::Duration;

/// Fixed presentation settings shared by the window and the HTML export.
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    /// Wall-clock time between frames.
    pub interval: Duration,
    /// Lower and upper y-axis bound, applied on every frame.
    pub y_range: (f64, f64),
    pub x_label: String,
    pub y_label: String,
    pub u_label: String,
    pub v_label: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(20),
            y_range: (-3.0, 3.0),
            x_label: "Position (x)".to_string(),
            y_label: "Concentration".to_string(),
            u_label: "u(x)".to_string(),
            v_label: "v(x)".to_string(),
        }
    }
}

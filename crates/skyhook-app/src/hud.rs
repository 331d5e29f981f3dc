//! Speed and rope readout, shown in the window title.

use std::fmt;

/// Telemetry values computed each rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Telemetry {
    /// Player speed in metres per second.
    pub speed: f32,
    /// Rope length while the grapple is attached.
    pub rope_length: Option<f32>,
}

/// Formats as `Speed: 12.3 m/s | Rope: 40.0 m`, or `Rope: --` when detached.
impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Speed: {:.1} m/s | Rope: ", self.speed)?;
        match self.rope_length {
            Some(length) => write!(f, "{length:.1} m"),
            None => f.write_str("--"),
        }
    }
}

/// Window title carrying the telemetry readout.
pub fn format_title(base: &str, telemetry: &Telemetry) -> String {
    format!("{base} | {telemetry}")
}

use chrono::{DateTime, Utc};

/// File name of the image export.
pub const PNG_NAME: &str = "tile-text.png";
/// File name of the vector export.
pub const SVG_NAME: &str = "tile-text.svg";

/// `tile-text-<unix millis>.webm`
pub fn timestamped_webm(now: DateTime<Utc>) -> String {
    format!("tile-text-{}.webm", now.timestamp_millis())
}

// Crate error type. Every variant states *where* things went wrong.
// The paint core itself is infallible; these come from the shell around it
// (window, camera, config file, export).
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String),   // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Camera init error: {0}")]
    CameraInit(String),   // Opening/starting the camera failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String),  // Grabbing/decoding a frame failed
    #[error("Config read error ({path}): {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    ConfigInvalid(String),
    #[error("Export error: {0}")]
    Export(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_stage() {
        let e = Error::CameraFrame("Fetch frame: timeout".into());
        assert_eq!(e.to_string(), "Camera frame error: Fetch frame: timeout");
        let e = Error::ConfigInvalid("smoothing_window must be >= 1".into());
        assert!(e.to_string().starts_with("Invalid config"));
    }
}

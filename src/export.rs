// Save the composited canvas as a PNG under the configured output directory.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use gesture_painter::{Error, FrameBuffer};
use log::info;

/// `<dir>/drawing_<unix seconds>.png`
pub fn export_path(dir: &Path, at: SystemTime) -> PathBuf {
    let secs = at.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    dir.join(format!("drawing_{secs}.png"))
}

pub fn save_png(frame: &FrameBuffer, dir: &Path) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::Export(format!("create {}: {e}", dir.display())))?;
    let path = export_path(dir, SystemTime::now());
    frame
        .to_rgb_image()
        .save(&path)
        .map_err(|e| Error::Export(format!("write {}: {e}", path.display())))?;
    info!("saved drawing to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn path_uses_unix_seconds() {
        let at = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(
            export_path(Path::new("output"), at),
            PathBuf::from("output/drawing_1700000000.png")
        );
    }

    #[test]
    fn saves_readable_png() {
        let dir = std::env::temp_dir().join(format!("gesture-painter-export-{}", std::process::id()));
        let mut fb = FrameBuffer::new(4, 3);
        fb.pixels[0] = 0x00FF_0000;
        let path = save_png(&fb, &dir).unwrap();
        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back.dimensions(), (4, 3));
        assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0]);
        let _ = std::fs::remove_dir_all(&dir);
    }
}

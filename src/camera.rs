// Webcam capture. Frames come back mirrored (selfie view) so moving your
// hand right moves the pointer right, packed as 0x00RRGGBB for the window.

use gesture_painter::{Color, Error, FrameBuffer};

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

use log::info;

pub struct CameraCapture {
    cam: Camera, // the opened device, already streaming
    width: u32,  // actual stream size, may differ from what we asked for
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` and start streaming near the requested size.
    /// Visual: the webcam light turns on.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(CameraIndex::Index(index), req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The stream may settle on a different resolution than requested.
        let actual = cam.resolution();
        info!("camera {index} streaming at {}x{}", actual.width(), actual.height());

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Block until the next frame arrives and return it mirrored.
    /// Visual: one fresh video still, like looking into a mirror.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        // Pack RGB bytes into the 0x00RRGGBB words minifb wants.
        let (w, h) = rgb_img.dimensions();
        let mut pixels = Vec::with_capacity((w as usize) * (h as usize));
        for (_x, _y, pixel) in rgb_img.enumerate_pixels() {
            pixels.push(Color::rgb(pixel[0], pixel[1], pixel[2]).to_u32());
        }

        let mut fb = FrameBuffer { width: w as usize, height: h as usize, pixels };
        mirror_rows(&mut fb);
        Ok(fb)
    }

    /// Stream size; the window and paint layer are made to match it.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Flip left/right in place.
/// Visual: raising your right hand raises the hand on the right of the screen.
fn mirror_rows(fb: &mut FrameBuffer) {
    if fb.width == 0 {
        return;
    }
    for row in fb.pixels.chunks_exact_mut(fb.width) {
        row.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_flips_each_row() {
        let mut fb = FrameBuffer { width: 3, height: 2, pixels: vec![1, 2, 3, 4, 5, 6] };
        mirror_rows(&mut fb);
        assert_eq!(fb.pixels, vec![3, 2, 1, 6, 5, 4]);
    }
}

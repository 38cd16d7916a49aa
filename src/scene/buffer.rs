use image::{Rgb, RgbImage};

/// Color buffer and z-buffer of one render.
/// Both are row-major with (0, 0) in the top left of buffer index space.
pub struct FrameBuffer {
    color: RgbImage,
    // Minimum depth seen so far, +inf where nothing was drawn.
    depth: Vec<f32>,
}

impl FrameBuffer {
    /// Black color buffer and an empty z-buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let n_pixels = (width as usize) * (height as usize);
        return Self {
            color: RgbImage::new(width, height),
            depth: vec![f32::INFINITY; n_pixels],
        };
    }

    pub fn width(&self) -> u32 {
        return self.color.width();
    }

    pub fn height(&self) -> u32 {
        return self.color.height();
    }

    pub fn color(&self) -> &RgbImage {
        return &self.color;
    }

    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        return self.depth[self.index(x, y)];
    }

    /// Depth test and write in one step.
    /// Color and depth are written only if `z` is strictly nearer than the stored depth.
    pub fn test_and_set(&mut self, x: u32, y: u32, z: f32, color: Rgb<u8>) -> bool {
        let index = self.index(x, y);
        if !(z < self.depth[index]) {
            return false;
        }
        self.depth[index] = z;
        self.color.put_pixel(x, y, color);
        return true;
    }

    /// Grayscale view of the z-buffer: the nearest fragment is white, the farthest dark gray,
    /// untouched pixels stay black.
    pub fn depth_image(&self) -> RgbImage {
        let finite = self.depth.iter().copied().filter(|z| z.is_finite());
        let z_min = finite.clone().fold(f32::INFINITY, f32::min);
        let z_max = finite.fold(f32::NEG_INFINITY, f32::max);
        let range = z_max - z_min;

        return RgbImage::from_fn(self.width(), self.height(), |x, y| {
            let z = self.depth_at(x, y);
            if !z.is_finite() {
                return Rgb([0, 0, 0]);
            }
            let nearness = if range > 0.0 { (z_max - z) / range } else { 1.0 };
            let level = (64.0 + 191.0 * nearness) as u8;
            return Rgb([level, level, level]);
        });
    }

    fn index(&self, x: u32, y: u32) -> usize {
        return y as usize * self.width() as usize + x as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    #[test]
    fn starts_black_and_infinitely_deep() {
        let fb = FrameBuffer::new(4, 3);
        assert_eq!((fb.width(), fb.height()), (4, 3));
        assert!(fb.color().pixels().all(|p| *p == Rgb([0, 0, 0])));
        assert_eq!(fb.depth_at(3, 2), f32::INFINITY);
    }

    #[test]
    fn nearer_fragment_wins() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(fb.test_and_set(1, 0, 0.5, WHITE));
        assert!(!fb.test_and_set(1, 0, 0.7, RED));
        assert_eq!(*fb.color().get_pixel(1, 0), WHITE);
        assert!(fb.test_and_set(1, 0, 0.2, RED));
        assert_eq!(*fb.color().get_pixel(1, 0), RED);
        assert_eq!(fb.depth_at(1, 0), 0.2);
    }

    #[test]
    fn equal_depth_does_not_overwrite() {
        let mut fb = FrameBuffer::new(1, 1);
        assert!(fb.test_and_set(0, 0, 0.5, WHITE));
        assert!(!fb.test_and_set(0, 0, 0.5, RED));
        assert_eq!(*fb.color().get_pixel(0, 0), WHITE);
    }

    #[test]
    fn nan_depth_is_rejected() {
        let mut fb = FrameBuffer::new(1, 1);
        assert!(!fb.test_and_set(0, 0, f32::NAN, WHITE));
        assert_eq!(fb.depth_at(0, 0), f32::INFINITY);
    }

    #[test]
    fn depth_image_brightest_where_nearest() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.test_and_set(0, 0, 0.1, WHITE);
        fb.test_and_set(1, 0, 0.9, WHITE);
        let depth = fb.depth_image();
        assert_eq!(*depth.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*depth.get_pixel(1, 0), Rgb([64, 64, 64]));
        assert_eq!(*depth.get_pixel(2, 0), Rgb([0, 0, 0]));
    }
}

use crate::color::Color;
use crate::error::{Error, Result};

/// A one-dimensional frame of [`Color`]s for an LED strip.
///
/// The pixel count is fixed at construction; a different length needs a
/// new image. An image may carry a background image of the same length
/// that shines through transparent foreground pixels when
/// [`composite()`](Image::composite) is taken. Backgrounds are
/// themselves images, so stacked layers compose recursively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pixels: Vec<Color>,
    background: Option<Box<Image>>,
}

impl Image {
    /// New fully transparent image with `n` pixels.
    pub fn new(n: usize) -> Result<Image> {
        Image::filled(n, Color::TRANSPARENT)
    }

    /// New image with `n` pixels, all set to `fill`.
    pub fn filled(n: usize, fill: Color) -> Result<Image> {
        if n == 0 {
            return Err(Error::InvalidArgument(
                "an image must have at least one pixel".into(),
            ));
        }
        Ok(Image {
            pixels: vec![fill; n],
            background: None,
        })
    }

    /// New image from existing pixel data.
    pub fn from_pixels(pixels: Vec<Color>) -> Result<Image> {
        if pixels.is_empty() {
            return Err(Error::InvalidArgument(
                "an image must have at least one pixel".into(),
            ));
        }
        Ok(Image {
            pixels,
            background: None,
        })
    }

    /// New transparent image layered over `background`.
    ///
    /// The pixel count is inferred from the background. Until
    /// foreground pixels are written, the composite equals the
    /// background's composite.
    pub fn over_background(background: Image) -> Image {
        Image {
            pixels: vec![Color::TRANSPARENT; background.len()],
            background: Some(Box::new(background)),
        }
    }

    /// Number of pixels. Fixed for the lifetime of the image.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        // Construction rejects zero-length images.
        false
    }

    pub fn background(&self) -> Option<&Image> {
        self.background.as_deref()
    }

    /// Attaches a background of the same length, replacing any previous
    /// one.
    pub fn set_background(&mut self, background: Image) -> Result<()> {
        if background.len() != self.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                actual: background.len(),
            });
        }
        self.background = Some(Box::new(background));
        Ok(())
    }

    pub fn take_background(&mut self) -> Option<Image> {
        self.background.take().map(|bg| *bg)
    }

    pub fn get(&self, index: usize) -> Result<Color> {
        self.check_index(index)?;
        Ok(self.pixels[index])
    }

    pub fn set(&mut self, index: usize, color: Color) -> Result<()> {
        self.check_index(index)?;
        self.pixels[index] = color;
        Ok(())
    }

    pub fn get_range(&self, start: usize, end: usize) -> Result<&[Color]> {
        self.check_range(start, end)?;
        Ok(&self.pixels[start..end])
    }

    /// Writes `colors` to the pixels in `[start, end)`.
    ///
    /// Fails with [`Error::LengthMismatch`] if `colors` does not hold
    /// exactly `end - start` entries.
    pub fn set_range(&mut self, start: usize, end: usize, colors: &[Color]) -> Result<()> {
        self.check_range(start, end)?;
        if colors.len() != end - start {
            return Err(Error::LengthMismatch {
                expected: end - start,
                actual: colors.len(),
            });
        }
        self.pixels[start..end].copy_from_slice(colors);
        Ok(())
    }

    /// Sets all pixels to `color`. The background is untouched.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Resets all pixels to transparent. The background is untouched.
    pub fn clear(&mut self) {
        self.fill(Color::TRANSPARENT);
    }

    /// Scales the alpha of every pixel by `factor`, in place.
    ///
    /// `factor` outside `[0,1]` is rejected before any pixel changes.
    pub fn apply_opacity(&mut self, factor: f32) -> Result<()> {
        // Validate before touching any pixel
        Color::TRANSPARENT.scale_opacity(factor)?;
        for pixel in &mut self.pixels {
            *pixel = pixel.scale_opacity(factor)?;
        }
        Ok(())
    }

    /// The effective visible buffer: foreground alpha-composited over
    /// the background stack.
    ///
    /// Pure; the image is not mutated and repeated calls without
    /// intervening writes return identical buffers. Without a
    /// background this is a plain copy of the pixels.
    pub fn composite(&self) -> Vec<Color> {
        match &self.background {
            None => self.pixels.clone(),
            Some(bg) => self
                .pixels
                .iter()
                .zip(bg.composite())
                .map(|(fg, below)| fg.blend_over(below))
                .collect(),
        }
    }

    /// Reverses the pixel order, flipping the image.
    pub fn reverse(&mut self) {
        self.pixels.reverse();
    }

    /// Inverts the color channels of every pixel. Alpha is untouched.
    pub fn invert(&mut self) {
        for pixel in &mut self.pixels {
            *pixel = Color::rgba(255 - pixel.r, 255 - pixel.g, 255 - pixel.b, pixel.a);
        }
    }

    /// Mirrors the first half of the image onto the second half.
    ///
    /// Odd lengths keep the middle pixel: `[a, b, c]` becomes
    /// `[a, b, a]`, `[a, b, c, d]` becomes `[a, b, b, a]`.
    pub fn mirror(&mut self) {
        let n = self.len();
        if n < 2 {
            return;
        }
        let half = n / 2;
        let mut front: Vec<Color> = self.pixels[..n - half].to_vec();
        front.reverse();
        self.pixels[half..].copy_from_slice(&front);
    }

    /// Shifts all pixels by `n` positions with wrap-around.
    ///
    /// Positive `n` shifts to the right, negative to the left.
    pub fn rotate(&mut self, n: isize) {
        let len = self.len() as isize;
        let shift = n.rem_euclid(len) as usize;
        self.pixels.rotate_right(shift);
    }

    /// Rotates the (r, g, b) channel triple of every pixel by `n`.
    ///
    /// A multiple of 3 leaves the image unchanged. Alpha is untouched.
    pub fn channel_shift(&mut self, n: isize) {
        let shift = n.rem_euclid(3);
        if shift == 0 {
            return;
        }
        for pixel in &mut self.pixels {
            let mut channels = [pixel.r, pixel.g, pixel.b];
            channels.rotate_right(shift as usize);
            *pixel = Color::rgba(channels[0], channels[1], channels[2], pixel.a);
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end || end > self.len() {
            return Err(Error::IndexOutOfRange {
                index: end,
                len: self.len(),
            });
        }
        Ok(())
    }
}

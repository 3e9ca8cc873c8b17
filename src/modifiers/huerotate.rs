use palette::{FromColor, Hsv, Srgb};

use crate::color::Color;
use crate::error::Result;
use crate::image::Image;
use crate::modifiers::Modifier;

/// Looping color shift that rotates every pixel's hue each tick.
///
/// The rotation is applied in HSV space so brightness and saturation
/// stay put. Alpha is untouched. This modifier never completes.
pub struct HueRotate {
    degrees_per_tick: f32,
}

impl HueRotate {
    pub fn new(degrees_per_tick: f32) -> HueRotate {
        HueRotate { degrees_per_tick }
    }
}

impl Modifier for HueRotate {
    fn name(&self) -> &str {
        "hue-rotate"
    }

    fn apply(&mut self, image: &mut Image, _tick: u64) -> Result<()> {
        for i in 0..image.len() {
            let pixel = image.get(i)?;
            let mut hsv = Hsv::from_color(pixel.to_srgb());
            hsv.hue = hsv.hue + self.degrees_per_tick;
            image.set(i, Color::from_srgb(Srgb::from_color(hsv), pixel.a))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::ModifierState;

    #[test]
    fn rotates_red_towards_green() {
        let mut img = Image::filled(1, Color::RED).unwrap();
        let mut rotate = HueRotate::new(120.0);
        rotate.apply(&mut img, 0).unwrap();

        let pixel = img.get(0).unwrap();
        assert_eq!(pixel, Color::GREEN);
        assert_eq!(rotate.state(), ModifierState::Active);
    }

    #[test]
    fn keeps_alpha() {
        let mut img = Image::filled(1, Color::BLUE.with_alpha(42)).unwrap();
        HueRotate::new(33.0).apply(&mut img, 0).unwrap();
        assert_eq!(img.get(0).unwrap().a, 42);
    }

    #[test]
    fn full_turn_is_identity() {
        let mut img = Image::filled(1, Color::ORANGE).unwrap();
        let mut rotate = HueRotate::new(90.0);
        for tick in 0..4 {
            rotate.apply(&mut img, tick).unwrap();
        }
        let pixel = img.get(0).unwrap();
        // Four quarter turns land back on orange, give or take rounding.
        assert!((pixel.r as i32 - 255).abs() <= 2);
        assert!((pixel.g as i32 - 127).abs() <= 2);
        assert!((pixel.b as i32).abs() <= 2);
    }
}

use crate::error::Result;
use crate::image::Image;
use crate::modifiers::Modifier;

/// Looping wrap-around scroll by a fixed number of pixels per tick.
///
/// Positive steps move the image to the right, negative to the left.
pub struct Scroll {
    step: isize,
}

impl Scroll {
    pub fn new(step: isize) -> Scroll {
        Scroll { step }
    }
}

impl Modifier for Scroll {
    fn name(&self) -> &str {
        "scroll"
    }

    fn apply(&mut self, image: &mut Image, _tick: u64) -> Result<()> {
        image.rotate(self.step);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn scrolls_with_wrap_around() {
        let mut img = Image::from_pixels(vec![Color::RED, Color::GREEN, Color::BLUE]).unwrap();
        let mut scroll = Scroll::new(1);
        scroll.apply(&mut img, 0).unwrap();
        assert_eq!(
            img.composite(),
            vec![Color::BLUE, Color::RED, Color::GREEN]
        );

        // Three steps of one pixel are a full cycle.
        scroll.apply(&mut img, 1).unwrap();
        scroll.apply(&mut img, 2).unwrap();
        assert_eq!(
            img.composite(),
            vec![Color::RED, Color::GREEN, Color::BLUE]
        );
    }
}

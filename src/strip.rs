use std::sync::{Arc, Mutex};

use log;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::image::Image;
use crate::modifiers::ModifierChain;
use crate::sink::Sink;

/// Diagnostic marker drawn at index 0 when `show_index` is on.
pub const INDEX_MARKER: Color = Color::WHITE;

/// An addressable strip of `n` pixels bound to an output sink.
///
/// The strip samples its current image into exactly `n` colors each
/// tick and flushes them to the sink. The image source is shared:
/// external code may hold the same handle and mutate the image between
/// ticks (single owner mutates, readers snapshot via `composite()`).
/// The strip spawns no threads; the caller's render loop decides the
/// cadence and invokes [`render_tick`](Strip::render_tick)
/// sequentially.
pub struct Strip {
    n: usize,
    show_index: bool,
    image: Arc<Mutex<Image>>,
    chain: ModifierChain,
    sink: Box<dyn Sink>,
}

impl Strip {
    /// Creates a strip with `n > 0` pixels flushing to `sink`.
    pub fn new(n: usize, sink: Box<dyn Sink>, show_index: bool) -> Result<Strip> {
        if n == 0 {
            return Err(Error::InvalidArgument(
                "a strip must have at least one pixel".into(),
            ));
        }
        log::debug!("Creating strip with {n} pixels");
        Ok(Strip {
            n,
            show_index,
            image: Arc::new(Mutex::new(Image::new(n)?)),
            chain: ModifierChain::new(),
            sink,
        })
    }

    /// Number of pixels handed to the sink each tick.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Attaches a new frame source.
    ///
    /// The image may have any length; sampling resolves mismatches at
    /// render time.
    pub fn set_image(&mut self, image: Arc<Mutex<Image>>) {
        self.image = image;
    }

    /// Shared handle on the current frame source.
    pub fn image(&self) -> Arc<Mutex<Image>> {
        Arc::clone(&self.image)
    }

    /// The strip's modifier chain, applied at the start of every tick.
    pub fn chain_mut(&mut self) -> &mut ModifierChain {
        &mut self.chain
    }

    /// Renders one tick: modifiers, compositing, sampling, sink flush,
    /// strictly in that order.
    ///
    /// The composited image is mapped to exactly `n` colors with a
    /// nearest-index rule: output pixel `i` takes source pixel
    /// `floor(i * src_len / n)`, for down- and upsampling alike. No
    /// new colors are invented by interpolation. Sink rejections
    /// surface as [`Error::SinkUnavailable`]; the strip does not
    /// retry.
    pub fn render_tick(&mut self, tick: u64) -> Result<()> {
        let composited = {
            let mut image = self.image.lock().unwrap();
            self.chain.apply(&mut image, tick)?;
            image.composite()
        };

        let mut frame = sample(&composited, self.n);
        if self.show_index {
            frame[0] = INDEX_MARKER;
        }
        self.sink.flush(&frame)
    }
}

/// Nearest-index resampling of `src` to exactly `n` colors.
fn sample(src: &[Color], n: usize) -> Vec<Color> {
    if src.len() == n {
        return src.to_vec();
    }
    (0..n).map(|i| src[i * src.len() / n]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn strip_with_sink(n: usize, show_index: bool) -> (Strip, Arc<Mutex<Vec<Vec<Color>>>>) {
        let sink = MemorySink::new();
        let frames = sink.frames();
        let strip = Strip::new(n, Box::new(sink), show_index).unwrap();
        (strip, frames)
    }

    fn shades(n: usize) -> Vec<Color> {
        (0..n).map(|i| Color::rgb(i as u8, 0, 0)).collect()
    }

    #[test]
    fn rejects_zero_pixels() {
        assert!(matches!(
            Strip::new(0, Box::new(MemorySink::new()), false),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn upsamples_by_nearest_index() {
        let (mut strip, frames) = strip_with_sink(10, false);
        let src = shades(5);
        strip.set_image(Arc::new(Mutex::new(
            Image::from_pixels(src.clone()).unwrap(),
        )));
        strip.render_tick(0).unwrap();

        let frames = frames.lock().unwrap();
        assert_eq!(frames[0].len(), 10);
        for i in 0..10 {
            assert_eq!(frames[0][i], src[i * 5 / 10]);
        }
    }

    #[test]
    fn downsamples_by_nearest_index() {
        let (mut strip, frames) = strip_with_sink(10, false);
        let src = shades(20);
        strip.set_image(Arc::new(Mutex::new(
            Image::from_pixels(src.clone()).unwrap(),
        )));
        strip.render_tick(0).unwrap();

        let frames = frames.lock().unwrap();
        assert_eq!(frames[0].len(), 10);
        for i in 0..10 {
            assert_eq!(frames[0][i], src[i * 20 / 10]);
        }
    }

    #[test]
    fn matching_length_passes_through() {
        let (mut strip, frames) = strip_with_sink(3, false);
        let src = vec![Color::RED, Color::GREEN, Color::BLUE];
        strip.set_image(Arc::new(Mutex::new(
            Image::from_pixels(src.clone()).unwrap(),
        )));
        strip.render_tick(0).unwrap();
        assert_eq!(frames.lock().unwrap()[0], src);
    }

    #[test]
    fn show_index_overlays_marker() {
        let (mut strip, frames) = strip_with_sink(3, true);
        strip.set_image(Arc::new(Mutex::new(
            Image::from_pixels(vec![Color::RED, Color::GREEN, Color::BLUE]).unwrap(),
        )));
        strip.render_tick(0).unwrap();
        assert_eq!(
            frames.lock().unwrap()[0],
            vec![INDEX_MARKER, Color::GREEN, Color::BLUE]
        );
    }

    #[test]
    fn modifiers_run_before_sampling() {
        use crate::modifiers::Scroll;

        let (mut strip, frames) = strip_with_sink(3, false);
        strip.set_image(Arc::new(Mutex::new(
            Image::from_pixels(vec![Color::RED, Color::GREEN, Color::BLUE]).unwrap(),
        )));
        strip.chain_mut().append(Box::new(Scroll::new(1)));
        strip.render_tick(0).unwrap();
        assert_eq!(
            frames.lock().unwrap()[0],
            vec![Color::BLUE, Color::RED, Color::GREEN]
        );
    }

    #[test]
    fn modifier_failure_skips_the_flush() {
        use crate::modifiers::Modifier;

        struct Broken;
        impl Modifier for Broken {
            fn name(&self) -> &str {
                "broken"
            }
            fn apply(&mut self, _image: &mut Image, _tick: u64) -> Result<()> {
                Err(Error::InvalidArgument("broken".into()))
            }
        }

        let (mut strip, frames) = strip_with_sink(3, false);
        strip.chain_mut().append(Box::new(Broken));
        assert!(matches!(
            strip.render_tick(0),
            Err(Error::ModifierFailure { .. })
        ));
        assert!(frames.lock().unwrap().is_empty());
    }

    #[test]
    fn rejecting_sink_surfaces_as_unavailable() {
        struct DeadSink;
        impl Sink for DeadSink {
            fn flush(&mut self, _colors: &[Color]) -> Result<()> {
                Err(Error::SinkUnavailable("gone".into()))
            }
        }

        let mut strip = Strip::new(2, Box::new(DeadSink), false).unwrap();
        assert!(matches!(
            strip.render_tick(0),
            Err(Error::SinkUnavailable(_))
        ));
    }

    #[test]
    fn shared_image_mutation_shows_up_next_tick() {
        let (mut strip, frames) = strip_with_sink(2, false);
        let image = strip.image();
        strip.render_tick(0).unwrap();
        image.lock().unwrap().fill(Color::CYAN);
        strip.render_tick(1).unwrap();

        let frames = frames.lock().unwrap();
        assert_eq!(frames[0], vec![Color::TRANSPARENT, Color::TRANSPARENT]);
        assert_eq!(frames[1], vec![Color::CYAN, Color::CYAN]);
    }
}

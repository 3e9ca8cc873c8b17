use crate::color::Color;
use crate::error::{Error, Result};
use crate::image::Image;

/// Plays a stream of generated frames into a shared image.
///
/// An animation wraps an infinite (or finite) frame iterator and a
/// playback flag. While playback is on, [`advance`](Animation::advance)
/// pulls the next frame and makes it the current one; with playback
/// off, or once the iterator runs dry, the current frame is held.
pub struct Animation {
    frames: Box<dyn Iterator<Item = Image> + Send>,
    current: Image,
    playback: bool,
}

impl Animation {
    pub fn new(frames: Box<dyn Iterator<Item = Image> + Send>, pixels: usize) -> Result<Animation> {
        Ok(Animation {
            frames,
            current: Image::new(pixels)?,
            playback: true,
        })
    }

    pub fn playback(&self) -> bool {
        self.playback
    }

    /// Pauses or resumes frame consumption.
    pub fn set_playback(&mut self, playback: bool) {
        self.playback = playback;
    }

    /// Steps the animation and returns the current frame.
    pub fn advance(&mut self) -> &Image {
        if self.playback {
            if let Some(frame) = self.frames.next() {
                self.current = frame;
            }
        }
        &self.current
    }

    pub fn current(&self) -> &Image {
        &self.current
    }
}

/// Blink effect alternating between an 'on' and an 'off' image.
///
/// Each state holds for a configurable number of frames, starting with
/// 'on'. The iterator never ends.
pub fn blink(
    pixels: usize,
    on: Color,
    off: Color,
    on_frames: usize,
    off_frames: usize,
) -> Result<impl Iterator<Item = Image>> {
    if on_frames == 0 && off_frames == 0 {
        return Err(Error::InvalidArgument(
            "blink needs at least one frame per cycle".into(),
        ));
    }
    let on_img = Image::filled(pixels, on)?;
    let off_img = Image::filled(pixels, off)?;

    let cycle: Vec<Image> = std::iter::repeat(on_img)
        .take(on_frames)
        .chain(std::iter::repeat(off_img).take(off_frames))
        .collect();
    Ok(cycle.into_iter().cycle())
}

/// A ball dropped onto the strip, bouncing with decaying energy.
///
/// Gravity pulls towards index 0; each bounce keeps `elasticity` of
/// the velocity. The ball draws as a bright head with a short fading
/// tail. The iterator ends once the ball has come to rest.
pub fn bouncing_ball(
    pixels: usize,
    color: Color,
    tail: usize,
    elasticity: f32,
    velocity: f32,
    pos: f32,
) -> Result<impl Iterator<Item = Image>> {
    if !(0.0..1.0).contains(&elasticity) {
        return Err(Error::InvalidArgument(format!(
            "elasticity must be in [0, 1), got {elasticity}"
        )));
    }
    // Probe once so a bad pixel count fails at construction.
    Image::new(pixels)?;

    const GRAVITY: f32 = -0.15;
    let mut pos = pos.max(0.0).min(pixels as f32 - 1.0);
    let mut velocity = velocity;

    Ok(std::iter::from_fn(move || {
        velocity += GRAVITY;
        pos += velocity;
        if pos <= 0.0 {
            pos = -pos;
            velocity = -velocity * elasticity;
            // At rest once a bounce cannot reach a full pixel anymore
            if velocity < 0.5 {
                return None;
            }
        }

        let mut frame = Image::new(pixels).ok()?;
        let head = (pos.round() as usize).min(pixels - 1);
        frame.set(head, color).ok()?;
        for t in 1..=tail {
            if t > head {
                break;
            }
            let fade = 1.0 - t as f32 / (tail + 1) as f32;
            let faded = color.scale_opacity(fade).ok()?;
            frame.set(head - t, faded).ok()?;
        }
        Some(frame)
    }))
}

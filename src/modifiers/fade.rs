use crate::color::Color;
use crate::error::{Error, Result};
use crate::image::Image;
use crate::modifiers::{Modifier, ModifierState};

/// One-shot opacity ramp from fully transparent to the image's own
/// alpha values.
///
/// On its first application the fade snapshots the image's alpha
/// channel as the ramp target and starts counting ticks. Every tick
/// the alphas are set to `target * elapsed / duration`; once the ramp
/// finishes the targets are restored exactly, the modifier reports
/// [`ModifierState::Completed`] and all further ticks leave the image
/// untouched.
pub struct FadeIn {
    duration: u64,
    start: Option<u64>,
    targets: Vec<u8>,
    state: ModifierState,
}

impl FadeIn {
    /// `duration` is the ramp length in ticks and must be positive.
    pub fn new(duration: u64) -> Result<FadeIn> {
        if duration == 0 {
            return Err(Error::InvalidArgument(
                "fade duration must be at least one tick".into(),
            ));
        }
        Ok(FadeIn {
            duration,
            start: None,
            targets: Vec::new(),
            state: ModifierState::Idle,
        })
    }
}

impl Modifier for FadeIn {
    fn name(&self) -> &str {
        "fade-in"
    }

    fn apply(&mut self, image: &mut Image, tick: u64) -> Result<()> {
        if self.state == ModifierState::Completed {
            return Ok(());
        }

        let start = match self.start {
            Some(start) => start,
            None => {
                // Activation: the current alphas become the ramp target.
                self.targets = (0..image.len())
                    .map(|i| image.get(i).map(|c| c.a))
                    .collect::<Result<_>>()?;
                self.start = Some(tick);
                self.state = ModifierState::Active;
                tick
            }
        };

        if tick < start {
            return Err(Error::InvalidArgument(format!(
                "tick {tick} is before the fade started at {start}"
            )));
        }
        if self.targets.len() != image.len() {
            return Err(Error::LengthMismatch {
                expected: self.targets.len(),
                actual: image.len(),
            });
        }

        let elapsed = tick - start;
        let factor = (elapsed as f32 / self.duration as f32).min(1.0);
        for (i, &target) in self.targets.iter().enumerate() {
            let pixel = image.get(i)?;
            let alpha = if elapsed >= self.duration {
                target
            } else {
                (target as f32 * factor).round() as u8
            };
            image.set(i, Color { a: alpha, ..pixel })?;
        }

        if elapsed >= self.duration {
            self.state = ModifierState::Completed;
        }
        Ok(())
    }

    fn state(&self) -> ModifierState {
        self.state
    }
}

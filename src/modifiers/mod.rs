pub mod fade;
pub mod huerotate;
pub mod scroll;

pub use fade::FadeIn;
pub use huerotate::HueRotate;
pub use scroll::Scroll;

use crate::error::{Error, Result};
use crate::image::Image;

/// Lifecycle of a modifier across ticks.
///
/// A modifier starts `Idle`, becomes `Active` on its first application
/// and either stays there (looping effects) or ends up `Completed`
/// (one-shot effects), after which applying it is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierState {
    Idle,
    Active,
    Completed,
}

/// A stateful per-tick image transformation.
///
/// Modifiers mutate the image in place and may carry state across
/// ticks (phase, start tick, captured targets). The tick index comes
/// from the caller's render loop and is the only notion of time.
pub trait Modifier {
    /// Identifies the modifier in chains and error reports.
    fn name(&self) -> &str;

    fn apply(&mut self, image: &mut Image, tick: u64) -> Result<()>;

    /// Looping modifiers stay `Active` forever, which is the default.
    fn state(&self) -> ModifierState {
        ModifierState::Active
    }
}

/// An ordered pipeline of modifiers applied once per tick.
///
/// Each modifier sees the output of the previous one; application
/// order is insertion order. An empty chain is the identity transform.
#[derive(Default)]
pub struct ModifierChain {
    modifiers: Vec<Box<dyn Modifier>>,
}

impl ModifierChain {
    pub fn new() -> ModifierChain {
        ModifierChain::default()
    }

    pub fn append(&mut self, modifier: Box<dyn Modifier>) {
        self.modifiers.push(modifier);
    }

    /// Detaches and returns the first modifier with the given name.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Modifier>> {
        let idx = self.modifiers.iter().position(|m| m.name() == name)?;
        Some(self.modifiers.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Runs every modifier in insertion order.
    ///
    /// If one fails, the remaining modifiers are skipped for this tick
    /// and the error names the failing modifier. The image keeps
    /// whatever partial state the failing modifier produced; callers
    /// needing atomicity snapshot the image beforehand.
    pub fn apply(&mut self, image: &mut Image, tick: u64) -> Result<()> {
        for modifier in &mut self.modifiers {
            if let Err(err) = modifier.apply(image, tick) {
                return Err(Error::ModifierFailure {
                    name: modifier.name().to_string(),
                    reason: err.to_string(),
                });
            }
        }
        Ok(())
    }
}

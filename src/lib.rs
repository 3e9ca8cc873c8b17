//! Frame compositing and rendering for one-dimensional addressable
//! LED strips.
//!
//! Frames are [`Image`]s of RGBA [`Color`]s, optionally layered over
//! background images. A [`ModifierChain`] mutates the image once per
//! tick, the [`Strip`] samples the composited result to its pixel
//! count and flushes it to a [`Sink`] — a hardware driver
//! ([`olaoutput::OlaOutput`]) or a monitor emulation
//! ([`sink::TerminalSink`]). The render loop itself belongs to the
//! caller; [`intervaltimer::IntervalTimer`] helps pacing it.

pub mod color;
pub mod error;
pub mod image;
pub mod intervaltimer;
pub mod modifiers;
pub mod olaoutput;
pub mod settings;
pub mod sink;
pub mod strip;
pub mod visuals;

pub use color::Color;
pub use error::{Error, Result};
pub use image::Image;
pub use modifiers::{Modifier, ModifierChain, ModifierState};
pub use sink::Sink;
pub use strip::Strip;

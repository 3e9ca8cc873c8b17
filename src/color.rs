use palette::Srgb;
use rand::Rng;

use crate::error::{Error, Result};

/// An RGBA color with 8-bit channels.
///
/// Colors are immutable values. Alpha controls how much of the layer
/// below shines through when compositing: `255` is fully opaque, `0`
/// fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 127, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const LIME: Color = Color::rgb(127, 255, 0);
    pub const SPRING_GREEN: Color = Color::rgb(0, 255, 127);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const AZURE: Color = Color::rgb(0, 127, 255);
    pub const VIOLET: Color = Color::rgb(127, 0, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const PINK: Color = Color::rgb(255, 0, 127);
    pub const LIGHT_GRAY: Color = Color::rgb(191, 191, 191);
    pub const GRAY: Color = Color::rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::rgb(63, 63, 63);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// Copy of the color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Color {
        Color { a, ..self }
    }

    /// Alpha-composites `self` over `bottom`.
    ///
    /// Standard "over" compositing: each channel is
    /// `top*a + bottom*(1-a)` with `a` being the top alpha in `[0,1]`,
    /// and the result alpha is `top.a + bottom.a*(1-a)`. A fully
    /// transparent top yields `bottom` unchanged, a fully opaque top
    /// yields `self` unchanged.
    pub fn blend_over(self, bottom: Color) -> Color {
        let a = self.a as f32 / 255.0;
        let mix = |top: u8, bot: u8| (top as f32 * a + bot as f32 * (1.0 - a)).round() as u8;
        Color {
            r: mix(self.r, bottom.r),
            g: mix(self.g, bottom.g),
            b: mix(self.b, bottom.b),
            a: (self.a as f32 + bottom.a as f32 * (1.0 - a)).round() as u8,
        }
    }

    /// Copy of the color with alpha multiplied by `factor`.
    ///
    /// The color channels are unchanged. `factor` must be in `[0,1]`,
    /// anything else (NaN included) is rejected with
    /// [`Error::InvalidArgument`] rather than clamped.
    pub fn scale_opacity(self, factor: f32) -> Result<Color> {
        if !(0.0..=1.0).contains(&factor) {
            return Err(Error::InvalidArgument(format!(
                "opacity factor must be in [0, 1], got {factor}"
            )));
        }
        Ok(Color {
            a: (self.a as f32 * factor).round() as u8,
            ..self
        })
    }

    /// Conversion to a float [`palette`] color, alpha dropped.
    pub fn to_srgb(self) -> Srgb<f32> {
        Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// Conversion from a float [`palette`] color, channels clamped.
    pub fn from_srgb(rgb: Srgb<f32>, alpha: u8) -> Color {
        Color {
            r: channel(rgb.red * 255.0),
            g: channel(rgb.green * 255.0),
            b: channel(rgb.blue * 255.0),
            a: alpha,
        }
    }
}

fn channel(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// The 3 primary colors.
pub const PRIMARY_COLORS: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];

/// The 6 secondary colors.
pub const SECONDARY_COLORS: [Color; 6] = [
    Color::RED,
    Color::YELLOW,
    Color::GREEN,
    Color::CYAN,
    Color::BLUE,
    Color::MAGENTA,
];

/// The 12 tertiary colors.
pub const TERTIARY_COLORS: [Color; 12] = [
    Color::RED,
    Color::ORANGE,
    Color::YELLOW,
    Color::LIME,
    Color::GREEN,
    Color::SPRING_GREEN,
    Color::CYAN,
    Color::AZURE,
    Color::BLUE,
    Color::VIOLET,
    Color::MAGENTA,
    Color::PINK,
];

/// Rainbow color from a color wheel looping every 765 positions.
///
/// Red sits at position 0, green at 255, blue at 510. Negative
/// positions wrap around.
pub fn wheel(pos: f32) -> Color {
    let pos = pos.rem_euclid(255.0 * 3.0);
    let (r, g, b) = if pos < 255.0 {
        (255.0 - pos, pos, 0.0)
    } else if pos < 510.0 {
        (0.0, 510.0 - pos, pos - 255.0)
    } else {
        (pos - 510.0, 0.0, 765.0 - pos)
    };
    Color::rgb(channel(r), channel(g), channel(b))
}

/// Color of a black body at a kelvin temperature.
///
/// Valid between 1000 K and 40000 K with the white point around
/// ~5500 K. Lower temperatures appear orange/reddish, higher ones
/// blueish. Out-of-range temperatures are clamped.
pub fn kelvin(temperature: f32) -> Color {
    // https://gist.github.com/petrklus/b1f427accdf7438606a6
    let k = temperature.clamp(1000.0, 40000.0) / 100.0;
    let r = if k <= 66.0 {
        255.0
    } else {
        329.69 * (k - 60.0).powf(-0.13)
    };
    let g = if k <= 66.0 {
        99.47 * k.ln() - 161.11
    } else {
        288.12 * (k - 60.0).powf(-0.07)
    };
    let b = if k >= 66.0 {
        255.0
    } else if k <= 19.0 {
        0.0
    } else {
        138.51 * (k - 10.0).ln() - 305.04
    };
    Color::rgb(channel(r), channel(g), channel(b))
}

/// Heat color for a celsius temperature between 0 and 2500.
///
/// Progresses from black over red and yellow to white with rising
/// temperature. Out-of-range temperatures are clamped.
pub fn heat(celsius: f32) -> Color {
    const STOPS: [f32; 5] = [0.0, 0.4, 0.6, 0.9, 1.0];
    const RAMP: [(f32, f32, f32); 5] = [
        (0.0, 0.0, 0.0),
        (180.0, 35.0, 35.0),
        (230.0, 105.0, 5.0),
        (230.0, 230.0, 55.0),
        (255.0, 255.0, 255.0),
    ];

    let t = celsius.clamp(0.0, 2500.0) / 2500.0;
    let idx = STOPS
        .iter()
        .filter(|&&stop| t > stop)
        .count()
        .saturating_sub(1)
        .min(STOPS.len() - 2);
    let frac = (t - STOPS[idx]) / (STOPS[idx + 1] - STOPS[idx]);
    let lerp = |from: f32, to: f32| from + (to - from) * frac;
    Color::rgb(
        channel(lerp(RAMP[idx].0, RAMP[idx + 1].0)),
        channel(lerp(RAMP[idx].1, RAMP[idx + 1].1)),
        channel(lerp(RAMP[idx].2, RAMP[idx + 1].2)),
    )
}

/// Random opaque color with a random value on each channel.
pub fn random() -> Color {
    let mut rng = rand::thread_rng();
    Color::rgb(rng.gen(), rng.gen(), rng.gen())
}

/// Random opaque gray with the same value on all channels.
pub fn random_gray() -> Color {
    let v = rand::thread_rng().gen();
    Color::rgb(v, v, v)
}

/// Random pick from [`PRIMARY_COLORS`].
pub fn random_primary() -> Color {
    PRIMARY_COLORS[rand::thread_rng().gen_range(0..PRIMARY_COLORS.len())]
}

/// Random pick from [`SECONDARY_COLORS`].
pub fn random_secondary() -> Color {
    SECONDARY_COLORS[rand::thread_rng().gen_range(0..SECONDARY_COLORS.len())]
}

/// Random pick from [`TERTIARY_COLORS`].
pub fn random_tertiary() -> Color {
    TERTIARY_COLORS[rand::thread_rng().gen_range(0..TERTIARY_COLORS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_transparent_top_keeps_bottom() {
        let bottom = Color::rgba(12, 200, 99, 170);
        let top = Color::RED.with_alpha(0);
        assert_eq!(top.blend_over(bottom), bottom);
    }

    #[test]
    fn blend_opaque_top_keeps_top() {
        let bottom = Color::rgba(12, 200, 99, 170);
        let top = Color::rgb(1, 2, 3);
        assert_eq!(top.blend_over(bottom), top);
    }

    #[test]
    fn blend_half_red_over_green() {
        let blended = Color::RED.with_alpha(128).blend_over(Color::GREEN);
        assert_eq!(blended, Color::rgba(128, 127, 0, 255));
    }

    #[test]
    fn scale_opacity_rounds() {
        let c = Color::WHITE;
        assert_eq!(c.scale_opacity(0.0).unwrap().a, 0);
        assert_eq!(c.scale_opacity(0.5).unwrap().a, 128);
        assert_eq!(c.scale_opacity(1.0).unwrap().a, 255);
        assert_eq!(c.scale_opacity(1.0).unwrap(), c);
    }

    #[test]
    fn scale_opacity_rejects_bad_factors() {
        assert!(Color::RED.scale_opacity(-0.1).is_err());
        assert!(Color::RED.scale_opacity(1.1).is_err());
        assert!(Color::RED.scale_opacity(f32::NAN).is_err());
    }

    #[test]
    fn wheel_hits_primaries() {
        assert_eq!(wheel(0.0), Color::RED);
        assert_eq!(wheel(255.0), Color::GREEN);
        assert_eq!(wheel(510.0), Color::BLUE);
        // Wraps in both directions
        assert_eq!(wheel(765.0), Color::RED);
        assert_eq!(wheel(-255.0), wheel(510.0));
    }

    #[test]
    fn kelvin_white_point() {
        assert_eq!(kelvin(6600.0), Color::WHITE);
        let candle = kelvin(1500.0);
        assert_eq!(candle.r, 255);
        assert!(candle.b < 50);
    }

    #[test]
    fn heat_endpoints() {
        assert_eq!(heat(0.0), Color::BLACK);
        assert_eq!(heat(2500.0), Color::WHITE);
        assert_eq!(heat(-10.0), Color::BLACK);
    }
}

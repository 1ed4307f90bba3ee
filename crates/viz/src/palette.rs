//! Color constants for the particle field: a narrow cyan band, full
//! saturation, lightness randomized within [`LIGHTNESS_BASE`,
//! `LIGHTNESS_BASE + LIGHTNESS_SPREAD`).

pub const FIELD_HUE: f32 = 0.5;
pub const FIELD_SATURATION: f32 = 1.0;

pub const LIGHTNESS_BASE: f32 = 0.5;
pub const LIGHTNESS_SPREAD: f32 = 0.2;

/// HSL → RGB, all components in [0, 1].
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    if saturation <= 0.0 {
        return [lightness, lightness, lightness];
    }

    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;

    [
        hue_to_channel(p, q, hue + 1.0 / 3.0),
        hue_to_channel(p, q, hue),
        hue_to_channel(p, q, hue - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn field_hue_is_pure_cyan_at_half_lightness() {
        let [r, g, b] = hsl_to_rgb(FIELD_HUE, FIELD_SATURATION, 0.5);
        assert_relative_eq!(r, 0.0);
        assert_relative_eq!(g, 1.0);
        assert_relative_eq!(b, 1.0);
    }

    #[test]
    fn zero_saturation_is_gray() {
        assert_eq!(hsl_to_rgb(0.73, 0.0, 0.4), [0.4, 0.4, 0.4]);
    }

    #[test]
    fn lightness_band_stays_in_unit_range() {
        for step in 0..=20 {
            let lightness = LIGHTNESS_BASE + LIGHTNESS_SPREAD * step as f32 / 20.0;
            for channel in hsl_to_rgb(FIELD_HUE, FIELD_SATURATION, lightness) {
                assert!((0.0..=1.0).contains(&channel), "channel out of range: {channel}");
            }
        }
    }
}

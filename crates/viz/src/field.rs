//! Static particle substrate for the reactive visualization: points spread
//! (approximately) uniformly over a sphere shell, each with a color drawn
//! from the palette's lightness band.

use std::f32::consts::TAU;

use rand::Rng;

use crate::Error;
use crate::palette::{
    FIELD_HUE, FIELD_SATURATION, LIGHTNESS_BASE, LIGHTNESS_SPREAD, hsl_to_rgb,
};

#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub count: usize,
    pub inner_radius: f32,
    pub radius_jitter: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            inner_radius: 2.0,
            radius_jitter: 0.5,
        }
    }
}

/// Generated once per visualization instance and never mutated afterwards;
/// per-frame motion is applied downstream via [`crate::FrameParams`], not by
/// rewriting the points.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PointField {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
}

impl PointField {
    /// Sample `config.count` points on the shell `[inner_radius,
    /// inner_radius + radius_jitter)`.
    ///
    /// Uses the inverse-CDF construction: `theta ~ U[0, 2π)` and
    /// `cos(phi) ~ U[-1, 1]`. Drawing `phi` uniformly instead would cluster
    /// points at the poles.
    pub fn generate<R: Rng + ?Sized>(config: &FieldConfig, rng: &mut R) -> Result<Self, Error> {
        if config.count == 0 {
            return Err(Error::InvalidPointCount);
        }

        let mut positions = Vec::with_capacity(config.count);
        let mut colors = Vec::with_capacity(config.count);

        for _ in 0..config.count {
            let theta = rng.r#gen::<f32>() * TAU;
            let phi = (rng.r#gen::<f32>() * 2.0 - 1.0).acos();
            let r = config.inner_radius + rng.r#gen::<f32>() * config.radius_jitter;

            positions.push([
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            ]);

            let lightness = LIGHTNESS_BASE + rng.r#gen::<f32>() * LIGHTNESS_SPREAD;
            colors.push(hsl_to_rgb(FIELD_HUE, FIELD_SATURATION, lightness));
        }

        Ok(Self { positions, colors })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

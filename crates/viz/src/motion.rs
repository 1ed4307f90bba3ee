//! Per-frame animation parameters for the particle field.
//!
//! Pure functions of (elapsed time, spectral frame, speaking flag): no
//! internal state, safe at any caller cadence. Visual smoothness is the
//! render loop's concern, not this module's.

#[derive(Debug, Clone)]
pub struct MotionConfig {
    /// Spin rates in rad/s; `rate_y` > `rate_z` gives the slow tumble.
    pub rate_y: f32,
    pub rate_z: f32,
    /// Breathing frequency of the scale pulse, rad/s.
    pub pulse_rate: f32,
    /// Pulse amplitude while silent.
    pub base_intensity: f32,
    /// How strongly the spectral average widens the pulse while speaking.
    pub gain: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            rate_y: 0.1,
            rate_z: 0.05,
            pulse_rate: 2.0,
            base_intensity: 0.05,
            gain: 0.2,
        }
    }
}

/// What the host renderer applies to the particle field this frame.
/// Derived, ephemeral, recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameParams {
    pub rotation_y: f32,
    pub rotation_z: f32,
    pub scale: f32,
}

/// Mean of the spectral magnitudes; 0 for an empty frame.
pub fn spectral_average(spectral: &[f32]) -> f32 {
    if spectral.is_empty() {
        0.0
    } else {
        spectral.iter().sum::<f32>() / spectral.len() as f32
    }
}

/// Pulse amplitude for the current frame. While silent the field breathes
/// at `base_intensity`; while speaking the spectral average widens it.
/// Magnitudes are treated as already normalized to [0, 1] — out-of-range
/// samples pass through unclamped.
pub fn pulse_intensity(spectral: &[f32], speaking: bool, config: &MotionConfig) -> f32 {
    if speaking {
        config.base_intensity + spectral_average(spectral) * config.gain
    } else {
        config.base_intensity
    }
}

/// Derive this frame's rotation and scale. `elapsed_secs` must be
/// monotonically non-decreasing across calls; rotation grows without bound
/// and wraps naturally in the trig consumers downstream.
pub fn compute_frame(
    elapsed_secs: f32,
    spectral: &[f32],
    speaking: bool,
    config: &MotionConfig,
) -> FrameParams {
    let intensity = pulse_intensity(spectral, speaking, config);

    FrameParams {
        rotation_y: elapsed_secs * config.rate_y,
        rotation_z: elapsed_secs * config.rate_z,
        scale: 1.0 + (elapsed_secs * config.pulse_rate).sin() * intensity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rotations_follow_elapsed_time() {
        let config = MotionConfig::default();
        let params = compute_frame(10.0, &[], false, &config);

        assert_relative_eq!(params.rotation_y, 1.0);
        assert_relative_eq!(params.rotation_z, 0.5);
    }

    #[test]
    fn empty_spectral_means_base_intensity_even_while_speaking() {
        let config = MotionConfig::default();

        assert_relative_eq!(pulse_intensity(&[], true, &config), config.base_intensity);
        assert_relative_eq!(pulse_intensity(&[], false, &config), config.base_intensity);
    }

    #[test]
    fn silence_ignores_spectral_data() {
        let config = MotionConfig::default();
        assert_relative_eq!(
            pulse_intensity(&[0.9, 0.9, 0.9], false, &config),
            config.base_intensity
        );
    }

    #[test]
    fn speaking_intensity_matches_reference_constants() {
        // average of [0.2, 0.8] is 0.5, so 0.05 + 0.5 * 0.2
        let config = MotionConfig::default();
        assert_relative_eq!(
            pulse_intensity(&[0.2, 0.8], true, &config),
            0.15,
            epsilon = 1e-6
        );
    }

    #[test]
    fn scale_at_time_zero_is_unity() {
        let params = compute_frame(0.0, &[0.2, 0.8], true, &MotionConfig::default());
        assert_relative_eq!(params.scale, 1.0);
    }

    #[test]
    fn scale_grows_with_average_while_pulse_is_positive() {
        let config = MotionConfig::default();
        // sin(0.5 * 2.0) > 0
        let quiet = compute_frame(0.5, &[0.1], true, &config);
        let loud = compute_frame(0.5, &[0.9], true, &config);
        assert!(loud.scale > quiet.scale);
    }

    #[test]
    fn scale_shrinks_with_average_while_pulse_is_negative() {
        let config = MotionConfig::default();
        // sin(2.0 * 2.0) < 0
        let quiet = compute_frame(2.0, &[0.1], true, &config);
        let loud = compute_frame(2.0, &[0.9], true, &config);
        assert!(loud.scale < quiet.scale);
    }

    #[test]
    fn scale_stays_within_intensity_envelope() {
        let config = MotionConfig::default();
        let spectral = [0.2, 0.8];
        let intensity = pulse_intensity(&spectral, true, &config);

        let mut t = 0.0f32;
        while t < 10.0 {
            let params = compute_frame(t, &spectral, true, &config);
            assert!(params.scale >= 1.0 - intensity - 1e-6);
            assert!(params.scale <= 1.0 + intensity + 1e-6);
            t += 0.05;
        }
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_relative_eq!(spectral_average(&[]), 0.0);
        assert_relative_eq!(spectral_average(&[0.5]), 0.5);
    }
}

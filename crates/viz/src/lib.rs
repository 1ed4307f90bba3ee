pub mod field;
pub mod motion;
pub mod palette;

mod error;

pub use error::Error;
pub use field::{FieldConfig, PointField};
pub use motion::{FrameParams, MotionConfig, compute_frame, pulse_intensity, spectral_average};

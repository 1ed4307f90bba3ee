#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("particle count must be positive")]
    InvalidPointCount,
}

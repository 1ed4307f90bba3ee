pub mod store;

pub use store::{ConsoleFrame, ConsoleState};

mod control;
mod event;
mod message;

pub use control::ControlMessage;
pub use event::{ConsoleEvent, Vitals};
pub use message::{Message, Role};

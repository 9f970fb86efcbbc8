pub mod encoder;

pub use encoder::{encode_switch, CommandValue, ControlPayload};

//! Dialog continuation: decides whether a prediction is final and builds
//! the reply that carries a conversation to its next turn.

pub mod conversation;
pub mod protocol;

pub use conversation::*;
pub use protocol::*;

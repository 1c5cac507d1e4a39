pub mod chat;
pub mod preset;
pub mod stdio;
pub mod tooling;

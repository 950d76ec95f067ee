pub mod backend;
pub mod botnoi;
pub mod form;
pub mod gemini;
pub mod player;
pub mod prompts;
pub mod server;
pub mod session;
pub mod speakers;
pub mod types;
pub mod wire;

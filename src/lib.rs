pub mod ai;
pub mod app;
pub mod chunk;
pub mod config;
pub mod consult;
pub mod language;
pub mod prompt;
pub mod session;
pub mod speech;
pub mod translate;
pub mod types;

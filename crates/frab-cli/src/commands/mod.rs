pub mod daemon;
pub mod event;
pub mod refresh;

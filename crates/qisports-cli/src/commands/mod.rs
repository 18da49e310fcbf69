pub mod config;
pub mod preview;
pub mod simulate;
pub mod split;

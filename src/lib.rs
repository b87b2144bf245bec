//! Interactive Resort Map Library
//!
//! An orbital resort map core that can run independently or with a Bevy UI.

pub mod map;

#[cfg(feature = "ui")]
pub mod ui;

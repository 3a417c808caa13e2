//! Red-light / green-light game engine.
//!
//! Person-confidence scores from an external detector are smoothed into a
//! movement decision; a two-phase game machine turns that decision and a
//! fixed phase cycle into ON/OFF commands for a remote actuator.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod feed;
pub mod game;
pub mod link;
pub mod runner;
pub mod telemetry;

pub use config::{ConfigError, GameConfig};
pub use game::{Command, GameEngine, GamePhase};
pub use runner::{GameLoop, PollReport};

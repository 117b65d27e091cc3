//! A self-driving grid snake that chases coins, drawn into an RGBA frame
//! buffer. Meant as an animated backdrop: it takes nothing but a viewport
//! size and never reports failure.

pub mod agent;
pub mod canvas;
pub mod config;
pub mod effects;
pub mod error;
pub mod frame_loop;
pub mod grid;
pub mod random;
pub mod render;
pub mod sim;

pub use canvas::Canvas;
pub use config::SimConfig;
pub use error::ConfigError;
pub use frame_loop::{FrameLoop, FrameScheduler};
pub use grid::{Dir, Grid, Pos};
pub use random::{RandSource, RandomSource, ScriptedSource};
pub use sim::{GridAgentSimulation, ResetReason, TickOutcome};

//! Tick-driven grid snake.
//!
//! The simulation core (`snake`, `food`, `cadence`, `score`, `game`) is pure
//! and deterministic under a seed. Terminal input, drawing, sound and
//! settings storage are collaborators wired together by `driver` and the
//! binary.

pub mod audio;
pub mod cadence;
pub mod config;
pub mod driver;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;

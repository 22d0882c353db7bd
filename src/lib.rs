//! Zoomable, pannable Minesweeper board renderer.
//!
//! A [`Viewport`] owns the pan/zoom transform and an ordered paint list.
//! A [`Field`] lays out a fixed grid of [`Cell`]s, registers them with the
//! viewport, and hit-tests pointer input against the current transform.

pub mod assets;
pub mod cell;
pub mod config;
pub mod error;
pub mod field;
pub mod geom;
pub mod graphics;
pub mod input;
pub mod registry;
pub mod sprite;
pub mod viewport;

pub use assets::{NumberSprite, SpriteId, SpriteSheet};
pub use cell::{Cell, CellState, MineCount};
pub use config::Config;
pub use error::{MinefieldError, Result};
pub use field::{Field, GridIndex};
pub use geom::Vec2;
pub use viewport::Viewport;

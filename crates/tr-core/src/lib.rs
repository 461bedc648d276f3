//! `tr-core` — foundational types for the `tickreg` framework.
//!
//! This crate is a dependency of every other `tr-*` crate.  It has no `tr-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `SlotId`, `CategoryId`                                |
//! | [`frame`]       | `Frame`, `FrameClock`                                 |
//! | [`config`]      | `DispatchConfig` (TOML-loadable)                      |
//! | [`error`]       | `TickError`, `TickResult`                             |

pub mod config;
pub mod error;
pub mod frame;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::DispatchConfig;
pub use error::{TickError, TickResult};
pub use frame::{Frame, FrameClock};
pub use ids::{CategoryId, SlotId};

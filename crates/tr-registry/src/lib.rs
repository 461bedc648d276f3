//! `tr-registry` — dense registry of live elements with a once-per-frame pass.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`element`]    | `Tickable` trait, `SlotHandle` back-reference             |
//! | [`registry`]   | `Registry<T>`, `RegistryStats`                            |
//!
//! # Removal during a pass
//!
//! A pass walks slots from `count - 1` down to `0`.  Elements may register
//! and unregister (themselves or others) from inside their own tick.  The
//! registry picks one of three removal strategies by comparing the removed
//! slot against the pass cursor:
//!
//! ```text
//!   slot == count - 1          → clear the top slot            O(1)
//!   cursor <= slot (or idle)   → swap the top element in       O(1)
//!   cursor >  slot             → shift (slot, count) down by 1 O(n), cursor -= 1
//! ```
//!
//! Every element live when a pass starts is ticked exactly once, unless it
//! is unregistered before its turn.  An element registered during a pass is
//! appended at slot `count`.  It is ticked in that same pass only if the slot
//! is below the cursor, which happens only after the running tick has
//! removed top slots.  Otherwise it waits for the next pass.

pub mod element;
pub mod registry;


pub use element::{SlotHandle, Tickable};
pub use registry::{MAX_SLOTS, Registry, RegistryStats};

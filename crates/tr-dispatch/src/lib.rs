//! `tr-dispatch` — runs every element category once per frame.
//!
//! # Frame loop
//!
//! ```text
//! for frame in 0..config.total_frames:
//!   on_frame_start
//!   for category in table order:      ← fixed at registration time
//!       ticked = category.run_pass()  ← Registry::iterate
//!       on_pass_end
//!   on_frame_end
//!   on_report                         ← every report_interval_frames
//! ```
//!
//! Categories are listed explicitly at startup with [`DispatcherBuilder`];
//! nothing is discovered at run time.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | Uses `FxHashMap` for the category name index.           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tr_core::DispatchConfig;
//! use tr_dispatch::{DispatcherBuilder, NoopObserver};
//!
//! let mut dispatcher = DispatcherBuilder::new(DispatchConfig::default())
//!     .category::<Bullet>("bullets")
//!     .category::<Enemy>("enemies")
//!     .build()?;
//! let bullets = dispatcher.registry::<Bullet>().unwrap();
//! bullets.add(Rc::new(Bullet::new()));
//! dispatcher.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod dispatcher;
pub mod entry;
pub mod observer;


pub use builder::DispatcherBuilder;
pub use dispatcher::{CategorySummary, Dispatcher};
pub use entry::TickEntry;
pub use observer::{DispatchObserver, NoopObserver};

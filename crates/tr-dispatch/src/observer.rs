//! Dispatcher observer trait for progress reporting.

use tr_core::{CategoryId, Frame};

use crate::CategorySummary;

/// Callbacks invoked by [`Dispatcher::run`][crate::Dispatcher::run] and
/// [`Dispatcher::run_frame`][crate::Dispatcher::run_frame].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — population printer
///
/// ```rust,ignore
/// struct Population;
///
/// impl DispatchObserver for Population {
///     fn on_report(&mut self, frame: Frame, summaries: &[CategorySummary]) {
///         for s in summaries {
///             println!("{frame}: {} live {}", s.name, s.live);
///         }
///     }
/// }
/// ```
pub trait DispatchObserver {
    /// Called before the first category runs.
    fn on_frame_start(&mut self, _frame: Frame) {}

    /// Called after each category's pass completes successfully.
    fn on_pass_end(&mut self, _frame: Frame, _category: CategoryId, _name: &str, _ticked: usize) {}

    /// Called after every category has run.  `ticked` is the frame total.
    fn on_frame_end(&mut self, _frame: Frame, _ticked: usize) {}

    /// Called every `config.report_interval_frames` frames, after
    /// `on_frame_end`.
    fn on_report(&mut self, _frame: Frame, _summaries: &[CategorySummary]) {}

    /// Called once after `run` finishes its last frame.
    fn on_run_end(&mut self, _final_frame: Frame) {}
}

/// A [`DispatchObserver`] that does nothing.
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}

//! The `Tickable` trait — the extension point for user element types.

use std::cell::Cell;

use tr_core::{SlotId, TickResult};

use crate::Registry;

/// An element's record of where it lives in its registry.
///
/// Embedded in the element and read by anyone, but only the registry writes
/// it.  Holds [`SlotId::INVALID`] while the element is not registered.
#[derive(Debug, Default)]
pub struct SlotHandle(Cell<SlotId>);

impl SlotHandle {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self) -> SlotId {
        self.0.get()
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        self.0.get().is_valid()
    }

    #[inline]
    pub(crate) fn set(&self, slot: SlotId) {
        self.0.set(slot);
    }
}

/// Anything that reacts once per pass.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use tr_core::TickResult;
/// use tr_registry::{Registry, SlotHandle, Tickable};
///
/// struct Fuse { slot: SlotHandle, remaining: Cell<u32> }
///
/// impl Tickable for Fuse {
///     fn slot(&self) -> &SlotHandle { &self.slot }
///
///     fn tick(&self, registry: &Registry<Self>) -> TickResult<()> {
///         let left = self.remaining.get().saturating_sub(1);
///         self.remaining.set(left);
///         if left == 0 {
///             registry.unregister(self);
///         }
///         Ok(())
///     }
/// }
///
/// let registry = Registry::with_initial_capacity(4);
/// registry.add(Rc::new(Fuse { slot: SlotHandle::new(), remaining: Cell::new(2) }));
/// registry.iterate().unwrap();
/// assert_eq!(registry.len(), 1);
/// registry.iterate().unwrap();
/// assert!(registry.is_empty());
/// ```
pub trait Tickable: Sized {
    /// The element's slot back-reference.
    fn slot(&self) -> &SlotHandle;

    /// Called once per pass while the element is registered.
    ///
    /// `registry` is the registry running the pass.  The tick may call
    /// [`Registry::add`], [`Registry::remove`], or [`Registry::unregister`]
    /// on it, for itself or for any other element.
    ///
    /// An `Err` stops the pass: elements not yet visited are skipped for this
    /// pass and the error is returned from [`Registry::iterate`].
    fn tick(&self, registry: &Registry<Self>) -> TickResult<()>;
}

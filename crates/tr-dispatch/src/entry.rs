//! `TickEntry` — the type-erased "run one pass now" entry point.

use tr_core::TickResult;
use tr_registry::{Registry, Tickable};

/// Object-safe view of one category's registry.
///
/// The dispatcher stores categories as `Rc<dyn TickEntry>` so registries of
/// different element types can share one table.  Hosts that schedule
/// categories themselves can call [`run_pass`][Self::run_pass] directly.
pub trait TickEntry {
    /// Tick every live element of this category once.  Returns ticks delivered.
    fn run_pass(&self) -> TickResult<usize>;

    /// Live elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated slots.
    fn capacity(&self) -> usize;

    /// Rust type name of the element type, for diagnostics.
    fn element_type(&self) -> &'static str;
}

impl<T: Tickable> TickEntry for Registry<T> {
    fn run_pass(&self) -> TickResult<usize> {
        self.iterate()
    }

    fn len(&self) -> usize {
        Registry::len(self)
    }

    fn capacity(&self) -> usize {
        Registry::capacity(self)
    }

    fn element_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

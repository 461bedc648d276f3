//! `Registry<T>` — dense slot storage and the per-frame pass.
//!
//! # Layout
//!
//! ```text
//!   slots:  [ e0 | e1 | e2 | ... | e(count-1) | None | ... | None ]
//!             ╰──────────── live ───────────╯ ╰──── spare ─────╯
//!   slots.len() == capacity
//! ```
//!
//! Slots `[0, count)` always hold live elements with no gaps, and every live
//! element's [`SlotHandle`][crate::SlotHandle] names its own index.  Capacity
//! doubles when full and never shrinks.
//!
//! # Threading
//!
//! `Registry` is `!Sync`.  All mutation goes through a `RefCell`, and no
//! borrow is held while an element ticks, so a tick may re-enter `add`,
//! `remove`, and `unregister` freely.  Removed elements are dropped only
//! after the borrow is released, so an element's `Drop` may unregister
//! other elements too.

use std::cell::RefCell;
use std::rc::Rc;

use tr_core::{DispatchConfig, SlotId, TickError, TickResult};
use tracing::{debug, trace, warn};

use crate::Tickable;

/// Cursor value outside of a pass.  Compares below every slot, so removals
/// outside a pass always take the swap path.
const IDLE: isize = -1;

/// Most slots a registry can hold.  `u32::MAX` itself is `SlotId::INVALID`,
/// so live slots are `0..u32::MAX`.
pub const MAX_SLOTS: usize = u32::MAX as usize;

/// Slot id for a live index.  Callers keep `index < MAX_SLOTS`.
#[inline]
fn slot_id(index: usize) -> SlotId {
    debug_assert!(index < MAX_SLOTS, "slot index {index} out of id range");
    SlotId(index as u32)
}

/// Capacity after one growth step: `initial` from empty, otherwise double,
/// never beyond `MAX_SLOTS`.
pub(crate) fn grown_capacity(old: usize, initial: usize) -> usize {
    let next = if old == 0 { initial } else { old.saturating_add(old) };
    next.min(MAX_SLOTS)
}

// ── RegistryStats ─────────────────────────────────────────────────────────────

/// Counters describing a registry's storage and history.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct RegistryStats {
    /// Live elements.
    pub count: usize,
    /// Allocated slots (live + spare).
    pub capacity: usize,
    /// Number of storage reallocations so far.
    pub grow_events: u32,
    /// Total elements relocated by order-preserving shift-removes.  Swap and
    /// top-slot removals never add to this.
    pub shifted_moves: u64,
    /// Passes started.
    pub passes: u64,
}

// ── Slots (borrowed state) ────────────────────────────────────────────────────

struct Slots<T> {
    slots:            Vec<Option<Rc<T>>>,
    count:            usize,
    /// Slot being visited by the running pass, or `IDLE`.
    cursor:           isize,
    in_pass:          bool,
    initial_capacity: usize,
    grow_events:      u32,
    shifted_moves:    u64,
    passes:           u64,
}

impl<T: Tickable> Slots<T> {
    fn grow(&mut self) {
        let old = self.slots.len();
        let new = grown_capacity(old, self.initial_capacity);
        self.slots.reserve_exact(new - old);
        self.slots.resize_with(new, || None);
        self.grow_events += 1;
        debug!(from = old, to = new, "registry storage grown");
    }

    fn push(&mut self, element: Rc<T>) -> SlotId {
        assert!(self.count < MAX_SLOTS, "registry full: all {MAX_SLOTS} slot ids in use");
        if self.count == self.slots.len() {
            self.grow();
        }
        let slot = slot_id(self.count);
        element.slot().set(slot);
        self.slots[self.count] = Some(element);
        self.count += 1;
        slot
    }

    /// Vacate `slot` and restore density.  Returns the removed element so the
    /// caller can drop it outside the borrow.
    fn take(&mut self, slot: usize) -> Option<Rc<T>> {
        if slot >= self.count {
            warn!(slot, count = self.count, "remove of unoccupied slot ignored");
            return None;
        }

        self.count -= 1;
        let last = self.count;
        let removed = self.slots[slot].take();

        if slot == last {
            // Top slot: nothing above it to compact.
        } else if self.cursor <= slot as isize {
            // Everything above the cursor has already been visited this pass
            // (or no pass is running), so relocating the top element is safe.
            let moved = self.slots[last].take();
            if let Some(element) = &moved {
                element.slot().set(slot_id(slot));
            }
            self.slots[slot] = moved;
        } else {
            // The pass has not reached `slot` yet.  A swap would drop a
            // visited element below the cursor, so shift instead and keep the
            // cursor on the element it was visiting.
            self.slots[slot..=last].rotate_left(1);
            for (i, cell) in self.slots[slot..last].iter().enumerate() {
                if let Some(element) = cell {
                    element.slot().set(slot_id(slot + i));
                }
            }
            self.shifted_moves += (last - slot) as u64;
            self.cursor -= 1;
        }

        if let Some(element) = &removed {
            element.slot().set(SlotId::INVALID);
        }
        removed
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Dense registry of live `T` elements, ticked once per pass from the highest
/// slot to the lowest.
///
/// Create one registry per element category and keep it alive for the life
/// of the process.  Storage is not allocated until the first [`add`].
///
/// [`add`]: Registry::add
pub struct Registry<T: Tickable> {
    inner: RefCell<Slots<T>>,
}

impl<T: Tickable> Default for Registry<T> {
    fn default() -> Self {
        Self::new(&DispatchConfig::default())
    }
}

impl<T: Tickable> Registry<T> {
    /// Create an empty registry sized by `config.initial_capacity`.
    pub fn new(config: &DispatchConfig) -> Self {
        Self::with_initial_capacity(config.initial_capacity)
    }

    /// Create an empty registry whose first allocation holds
    /// `initial_capacity` slots.  Zero is bumped to one; values above
    /// [`MAX_SLOTS`] are clamped.
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            inner: RefCell::new(Slots {
                slots:            Vec::new(),
                count:            0,
                cursor:           IDLE,
                in_pass:          false,
                initial_capacity: initial_capacity.clamp(1, MAX_SLOTS),
                grow_events:      0,
                shifted_moves:    0,
                passes:           0,
            }),
        }
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Register `element` and return its slot.
    ///
    /// The element must not already be registered; doing so is a caller bug
    /// and is not detected.  The new element takes slot `len()`.  During a
    /// pass that slot is normally above the cursor, so the element is first
    /// ticked next pass.  If the running tick has already removed top slots
    /// so that `len() < cursor`, the new slot is below the cursor and the
    /// element is ticked later in this same pass.
    ///
    /// # Panics
    ///
    /// Panics if the registry already holds [`MAX_SLOTS`] elements, the
    /// limit of the slot id range.  Like allocation failure, this is fatal.
    pub fn add(&self, element: Rc<T>) -> SlotId {
        self.inner.borrow_mut().push(element)
    }

    /// Unregister whatever element occupies `slot`.
    ///
    /// Slots outside `[0, len)` are ignored.  The removed element's handle is
    /// reset to [`SlotId::INVALID`].
    pub fn remove(&self, slot: SlotId) {
        if !slot.is_valid() {
            return;
        }
        let removed = self.inner.borrow_mut().take(slot.index());
        drop(removed);
    }

    /// Unregister `element`, located through its own slot handle.
    ///
    /// Does nothing if the element is not registered here, so calling this
    /// twice is harmless.
    pub fn unregister(&self, element: &T) {
        if !self.contains(element) {
            trace!("unregister of element not in this registry ignored");
            return;
        }
        self.remove(element.slot().get());
    }

    // ── Pass ──────────────────────────────────────────────────────────────

    /// Tick every live element once, from the highest slot down to slot 0.
    ///
    /// Returns the number of ticks delivered.  The cursor is re-read after
    /// every tick because a tick may move it by removing a lower slot.
    ///
    /// # Errors
    ///
    /// - [`TickError::ReentrantPass`] if called from inside one of this
    ///   registry's own ticks.
    /// - Whatever error an element tick returns.  Elements not yet visited
    ///   are skipped for this pass; the registry itself stays consistent.
    pub fn iterate(&self) -> TickResult<usize> {
        {
            let mut s = self.inner.borrow_mut();
            if s.in_pass {
                return Err(TickError::ReentrantPass);
            }
            s.in_pass = true;
            s.cursor = s.count as isize - 1;
            s.passes += 1;
        }
        let _guard = PassGuard(self);

        let mut ticked = 0;
        loop {
            let current = {
                let s = self.inner.borrow();
                if s.cursor < 0 {
                    break;
                }
                s.slots[s.cursor as usize].clone()
            };

            if let Some(element) = current {
                element.tick(self)?;
                ticked += 1;
            }

            // Top-slot removals during the tick can leave the cursor above
            // the live region; everything still live below it is unvisited.
            let mut s = self.inner.borrow_mut();
            s.cursor = (s.cursor - 1).min(s.count as isize - 1);
        }

        trace!(ticked, "registry pass complete");
        Ok(ticked)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.inner.borrow().count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated slots, live or spare.
    pub fn capacity(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    /// `true` while a pass is running.
    pub fn is_iterating(&self) -> bool {
        self.inner.borrow().in_pass
    }

    /// Slot the running pass is visiting, or `None` outside a pass.
    pub fn cursor(&self) -> Option<SlotId> {
        let s = self.inner.borrow();
        (s.in_pass && s.cursor >= 0).then(|| slot_id(s.cursor as usize))
    }

    /// The element at `slot`, if live.
    pub fn get(&self, slot: SlotId) -> Option<Rc<T>> {
        let s = self.inner.borrow();
        if slot.index() >= s.count {
            return None;
        }
        s.slots[slot.index()].clone()
    }

    /// `true` if this exact element (by identity) is live in this registry.
    pub fn contains(&self, element: &T) -> bool {
        let slot = element.slot().get();
        let s = self.inner.borrow();
        slot.index() < s.count
            && s.slots[slot.index()]
                .as_ref()
                .is_some_and(|stored| std::ptr::eq(Rc::as_ptr(stored), element))
    }

    /// Snapshot of live elements in slot order.
    pub fn elements(&self) -> Vec<Rc<T>> {
        let s = self.inner.borrow();
        s.slots[..s.count].iter().flatten().cloned().collect()
    }

    /// Check the density invariant: slots `[0, count)` are populated with
    /// elements whose handles name their own slot, and no spare slot holds
    /// anything.
    pub fn is_dense(&self) -> bool {
        let s = self.inner.borrow();
        let live_ok = s.slots[..s.count].iter().enumerate().all(|(i, cell)| {
            cell.as_ref().is_some_and(|e| e.slot().get() == slot_id(i))
        });
        live_ok && s.slots[s.count..].iter().all(Option::is_none)
    }

    pub fn stats(&self) -> RegistryStats {
        let s = self.inner.borrow();
        RegistryStats {
            count:         s.count,
            capacity:      s.slots.len(),
            grow_events:   s.grow_events,
            shifted_moves: s.shifted_moves,
            passes:        s.passes,
        }
    }
}

/// Returns the registry to idle when a pass ends, including by error or
/// unwinding.
struct PassGuard<'a, T: Tickable>(&'a Registry<T>);

impl<T: Tickable> Drop for PassGuard<'_, T> {
    fn drop(&mut self) {
        let mut s = self.0.inner.borrow_mut();
        s.in_pass = false;
        s.cursor = IDLE;
    }
}

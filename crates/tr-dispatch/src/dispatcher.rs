//! The `Dispatcher` struct and its frame loop.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::rc::Rc;

use tr_core::{CategoryId, DispatchConfig, FrameClock, TickError, TickResult};
use tr_registry::{Registry, Tickable};
use tracing::{debug, trace};

use crate::{DispatchObserver, TickEntry};

#[cfg(feature = "fx-hash")]
type NameIndex = rustc_hash::FxHashMap<String, CategoryId>;
#[cfg(not(feature = "fx-hash"))]
type NameIndex = HashMap<String, CategoryId>;

// ── Category table ────────────────────────────────────────────────────────────

/// One row of the dispatch table.  `entry` and `typed` point at the same
/// registry; `typed` exists so [`Dispatcher::registry`] can hand back the
/// concrete `Rc<Registry<T>>`.
struct Category {
    name:  String,
    entry: Rc<dyn TickEntry>,
    typed: Rc<dyn Any>,
}

/// Point-in-time description of one category, passed to
/// [`DispatchObserver::on_report`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySummary {
    pub id:       CategoryId,
    pub name:     String,
    pub live:     usize,
    pub capacity: usize,
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Owns one [`Registry`] per element category and runs each once per frame.
///
/// Categories run in the order they were registered; that order is the
/// stable slot each category occupies within every frame.
///
/// The dispatcher is single-threaded.  Registries are shared out as
/// `Rc<Registry<T>>` so elements of one category can register elements of
/// another from inside their ticks.
///
/// Create via [`DispatcherBuilder`][crate::DispatcherBuilder], or with
/// [`Dispatcher::new`] followed by [`register`][Self::register].
pub struct Dispatcher {
    /// Configuration shared by every registry this dispatcher creates.
    pub config: DispatchConfig,

    /// Tracks the frame about to run.
    pub clock: FrameClock,

    categories: Vec<Category>,
    by_type:    HashMap<TypeId, CategoryId>,
    by_name:    NameIndex,
}

impl Dispatcher {
    /// Create an empty dispatcher.  Fails if `config` does not validate.
    pub fn new(config: DispatchConfig) -> TickResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock:      FrameClock::new(),
            categories: Vec::new(),
            by_type:    HashMap::new(),
            by_name:    NameIndex::default(),
        })
    }

    // ── Category table ────────────────────────────────────────────────────

    /// Add a category for element type `T` under `name`, creating its
    /// registry.  The category runs after every category registered before it.
    ///
    /// # Errors
    ///
    /// [`TickError::DuplicateCategory`] if `T` or `name` is already present.
    pub fn register<T: Tickable + 'static>(&mut self, name: impl Into<String>) -> TickResult<CategoryId> {
        let name = name.into();
        if self.by_type.contains_key(&TypeId::of::<T>()) || self.by_name.contains_key(&name) {
            return Err(TickError::DuplicateCategory(name));
        }
        let id = CategoryId::try_from(self.categories.len())
            .map_err(|_| TickError::Config("too many categories".into()))?;

        let registry: Rc<Registry<T>> = Rc::new(Registry::new(&self.config));
        self.categories.push(Category {
            name:  name.clone(),
            entry: Rc::clone(&registry) as Rc<dyn TickEntry>,
            typed: registry as Rc<dyn Any>,
        });
        self.by_type.insert(TypeId::of::<T>(), id);
        self.by_name.insert(name.clone(), id);

        debug!(%id, name = %name, element = std::any::type_name::<T>(), "category registered");
        Ok(id)
    }

    /// The registry for element type `T`, or `None` if `T` was never registered.
    pub fn registry<T: Tickable + 'static>(&self) -> Option<Rc<Registry<T>>> {
        let id = self.by_type.get(&TypeId::of::<T>())?;
        Rc::clone(&self.categories[id.index()].typed)
            .downcast::<Registry<T>>()
            .ok()
    }

    pub fn category_id(&self, name: &str) -> Option<CategoryId> {
        self.by_name.get(name).copied()
    }

    pub fn category_name(&self, id: CategoryId) -> Option<&str> {
        self.categories.get(id.index()).map(|c| c.name.as_str())
    }

    /// The "run one pass now" entry point for a category.
    pub fn entry(&self, id: CategoryId) -> TickResult<Rc<dyn TickEntry>> {
        self.categories
            .get(id.index())
            .map(|c| Rc::clone(&c.entry))
            .ok_or(TickError::UnknownCategory(id))
    }

    /// Number of registered categories.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Live element count summed over all categories.
    pub fn total_live(&self) -> usize {
        self.categories.iter().map(|c| c.entry.len()).sum()
    }

    /// Current state of every category, in table order.
    pub fn summaries(&self) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .enumerate()
            .map(|(i, c)| CategorySummary {
                id:       CategoryId(i as u16),
                name:     c.name.clone(),
                live:     c.entry.len(),
                capacity: c.entry.capacity(),
            })
            .collect()
    }

    // ── Frame loop ────────────────────────────────────────────────────────

    /// Run `config.total_frames` frames from the current frame.
    pub fn run<O: DispatchObserver>(&mut self, observer: &mut O) -> TickResult<()> {
        self.run_frames(self.config.total_frames, observer)?;
        observer.on_run_end(self.clock.current);
        Ok(())
    }

    /// Run exactly `n` frames from the current frame.
    ///
    /// Useful for tests and hosts that step the dispatcher incrementally.
    pub fn run_frames<O: DispatchObserver>(&mut self, n: u64, observer: &mut O) -> TickResult<()> {
        for _ in 0..n {
            self.run_frame(observer)?;
        }
        Ok(())
    }

    /// Run one pass of every category, in table order, then advance the
    /// clock.  Returns the total number of ticks delivered.
    ///
    /// If a pass fails, later categories do not run this frame, the clock is
    /// not advanced, and the error is returned.
    pub fn run_frame<O: DispatchObserver>(&mut self, observer: &mut O) -> TickResult<usize> {
        let frame = self.clock.current;
        observer.on_frame_start(frame);

        let mut total = 0;
        for (i, category) in self.categories.iter().enumerate() {
            let id = CategoryId(i as u16);
            trace!(%frame, name = %category.name, live = category.entry.len(), "pass start");
            let ticked = category.entry.run_pass()?;
            observer.on_pass_end(frame, id, &category.name, ticked);
            total += ticked;
        }

        observer.on_frame_end(frame, total);
        if frame.is_on_interval(self.config.report_interval_frames) {
            observer.on_report(frame, &self.summaries());
        }

        self.clock.advance();
        Ok(total)
    }
}

//! Fluent builder for constructing a [`Dispatcher`].

use tr_core::{DispatchConfig, TickResult};
use tr_registry::Tickable;

use crate::Dispatcher;

type Registration = Box<dyn FnOnce(&mut Dispatcher) -> TickResult<()>>;

/// Fluent builder for [`Dispatcher`].
///
/// The list of `.category::<T>(name)` calls is the program's complete set of
/// element categories, in the order they run each frame.
///
/// # Example
///
/// ```rust,ignore
/// let mut dispatcher = DispatcherBuilder::new(config)
///     .category::<Spawner>("spawners")
///     .category::<Particle>("particles")
///     .build()?;
/// dispatcher.run(&mut NoopObserver)?;
/// ```
pub struct DispatcherBuilder {
    config:        DispatchConfig,
    registrations: Vec<Registration>,
}

impl DispatcherBuilder {
    pub fn new(config: DispatchConfig) -> Self {
        Self { config, registrations: Vec::new() }
    }

    /// Append a category for element type `T`.
    pub fn category<T: Tickable + 'static>(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.registrations.push(Box::new(move |d: &mut Dispatcher| {
            d.register::<T>(name).map(|_| ())
        }));
        self
    }

    /// Validate the config, create every registry, and return a ready-to-run
    /// [`Dispatcher`].
    ///
    /// # Errors
    ///
    /// - [`TickError::Config`][tr_core::TickError::Config] for an invalid config.
    /// - [`TickError::DuplicateCategory`][tr_core::TickError::DuplicateCategory]
    ///   if a type or name appears twice.
    pub fn build(self) -> TickResult<Dispatcher> {
        let mut dispatcher = Dispatcher::new(self.config)?;
        for register in self.registrations {
            register(&mut dispatcher)?;
        }
        Ok(dispatcher)
    }
}

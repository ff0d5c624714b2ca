//! Controller discovery.

use indexmap::IndexMap;
use tracing::debug;

use crate::descriptor::ControllerDescriptor;
use crate::expression::Controller;

/// Controllers keyed by their route controller name.
///
/// Lookups are ASCII case-insensitive, so `/api/Foo` and `/api/foo` both
/// find `FooController`.
///
/// # Example
///
/// ```ignore
/// let mut registry = ControllerRegistry::new();
/// registry.register::<FooController>();
/// assert!(registry.get("FOO").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ControllerRegistry {
    controllers: IndexMap<String, &'static ControllerDescriptor>,
}

impl ControllerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers controller `C`.
    pub fn register<C: Controller>(&mut self) -> &mut Self {
        self.register_descriptor(C::descriptor())
    }

    /// Registers a controller by descriptor.
    ///
    /// A later registration with the same controller name replaces the
    /// earlier one.
    pub fn register_descriptor(&mut self, descriptor: &'static ControllerDescriptor) -> &mut Self {
        let name = descriptor.controller_name();
        debug!(controller = %name, type_name = descriptor.type_name(), "registering controller");
        self.controllers.insert(name, descriptor);
        self
    }

    /// Returns the controller named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static ControllerDescriptor> {
        self.controllers.get(&name.to_ascii_lowercase()).copied()
    }

    /// Returns the number of registered controllers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Returns true if no controllers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Iterates over the registered controllers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static ControllerDescriptor> + '_ {
        self.controllers.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ActionMethod;
    use std::sync::OnceLock;

    struct FooController;

    impl Controller for FooController {
        type Actions = ();

        fn descriptor() -> &'static ControllerDescriptor {
            static DESCRIPTOR: OnceLock<ControllerDescriptor> = OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                ControllerDescriptor::new::<FooController>("FooController")
                    .action(ActionMethod::new::<FooController>("FooController", "get"))
            })
        }
    }

    #[test]
    fn test_registry_lookup_ignores_case() {
        let mut registry = ControllerRegistry::new();
        registry.register::<FooController>();

        assert_eq!(registry.len(), 1);
        assert!(registry.get("foo").is_some());
        assert!(registry.get("FOO").is_some());
        assert!(registry.get("bar").is_none());
    }

    #[test]
    fn test_registry_replaces_same_name() {
        let mut registry = ControllerRegistry::new();
        registry
            .register::<FooController>()
            .register::<FooController>();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.iter().count(), 1);
    }
}

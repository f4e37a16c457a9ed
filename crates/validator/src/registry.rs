//! Process-wide registry of named predicate functions
//!
//! Logic expressions can call named predicates. Three are built in
//! (`isEmpty`, `isNotEmpty`, `isOrEmpty`); everything else is contributed
//! at startup through [`FunctionRegistry::register`] or a
//! [`FunctionProvider`]. The registry is write-at-startup / read-many:
//! registration takes a write lock, every context build takes a snapshot
//! under a read lock.

use crate::value::is_empty_value;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::warn;
use veridian_expression::EvaluationContext;

/// A named predicate: variadic values in, bool out.
pub type Predicate = veridian_expression::PredicateFn;

/// A bundle of named predicates contributed by one provider.
pub trait FunctionProvider {
    /// The named functions this provider contributes.
    fn functions(&self) -> Vec<(String, Predicate)>;
}

/// Registry of externally contributed check functions.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: RwLock<HashMap<Arc<str>, Predicate>>,
}

static GLOBAL: LazyLock<Arc<FunctionRegistry>> =
    LazyLock::new(|| Arc::new(FunctionRegistry::new()));

impl FunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by [`Validator::new`](crate::Validator::new).
    #[must_use]
    pub fn global() -> Arc<FunctionRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Registers a predicate. On a name collision the newest registration
    /// wins and a warning is emitted.
    pub fn register(&self, name: impl Into<Arc<str>>, predicate: Predicate) {
        let name = name.into();
        let replaced = self
            .functions
            .write()
            .insert(Arc::clone(&name), predicate)
            .is_some();
        if replaced {
            warn!(
                %name,
                "check function already registered; the newest registration replaces it"
            );
        }
    }

    /// Registers every function a provider contributes.
    pub fn install(&self, provider: &dyn FunctionProvider) {
        for (name, predicate) in provider.functions() {
            self.register(name, predicate);
        }
    }

    /// Whether a function is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.read().contains_key(name)
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.read().len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.read().is_empty()
    }

    /// A point-in-time copy of the table, merged into each new context.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<Arc<str>, Predicate> {
        self.functions.read().clone()
    }
}

/// Installs the built-in predicates on a context. Registered functions are
/// overlaid afterwards, so an external registration may shadow a built-in
/// (with the collision warning at registration time).
pub(crate) fn install_builtins(context: &mut EvaluationContext) {
    context.set_function(
        "isEmpty",
        Arc::new(|args: &[Value]| args.iter().all(is_empty_value)),
    );
    context.set_function(
        "isNotEmpty",
        Arc::new(|args: &[Value]| !args.is_empty() && !args.iter().any(is_empty_value)),
    );
    context.set_function(
        "isOrEmpty",
        Arc::new(|args: &[Value]| args.iter().any(is_empty_value)),
    );
}

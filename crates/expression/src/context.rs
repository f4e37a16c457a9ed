//! Evaluation context for expression execution
//!
//! The context carries everything an expression may reference: name→value
//! bindings scoped to one object instance, and name→predicate functions.
//! Both tables are populated when the context is built and read-only for the
//! rest of the context's lifetime.
//!
//! Parent chaining is materialized as data: [`EvaluationContext::chain_parent`]
//! installs the binding `"parent"` holding the parent context's root object.
//! Since the parent's root object contains its own `"parent"` entry, a path
//! like `parent.parent.name` reads arbitrarily far up the chain with nothing
//! but ordinary property access.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A named predicate callable from expressions: variadic values in, bool out.
pub type PredicateFn = Arc<dyn Fn(&[Value]) -> bool + Send + Sync>;

/// Scoped name→value bindings plus named predicate functions.
#[derive(Clone, Default)]
pub struct EvaluationContext {
    bindings: Map<String, Value>,
    functions: HashMap<Arc<str>, PredicateFn>,
}

impl EvaluationContext {
    /// Create a new empty evaluation context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for constructing contexts
    #[must_use]
    pub fn builder() -> EvaluationContextBuilder {
        EvaluationContextBuilder::default()
    }

    /// Look up a binding by name.
    #[must_use]
    pub fn binding(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// All bindings of this context.
    #[must_use]
    pub fn bindings(&self) -> &Map<String, Value> {
        &self.bindings
    }

    /// Install or replace a binding.
    pub fn set_binding(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Look up a predicate function by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&PredicateFn> {
        self.functions.get(name)
    }

    /// Install or replace a predicate function.
    pub fn set_function(&mut self, name: impl Into<Arc<str>>, function: PredicateFn) {
        self.functions.insert(name.into(), function);
    }

    /// The context's root object: all bindings as one JSON object.
    ///
    /// This is what a child context sees under its `"parent"` binding.
    #[must_use]
    pub fn root(&self) -> Value {
        Value::Object(self.bindings.clone())
    }

    /// Chain this context under `parent` by installing the `"parent"`
    /// binding. Applied recursively by construction: the parent's root
    /// already carries the grandparent under its own `"parent"` key.
    pub fn chain_parent(&mut self, parent: &EvaluationContext) {
        self.bindings.insert("parent".to_owned(), parent.root());
    }
}

impl fmt::Debug for EvaluationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationContext")
            .field("bindings", &self.bindings)
            .field(
                "functions",
                &self.functions.keys().collect::<Vec<&Arc<str>>>(),
            )
            .finish()
    }
}

/// Builder for creating evaluation contexts
#[derive(Clone, Default)]
pub struct EvaluationContextBuilder {
    bindings: Map<String, Value>,
    functions: HashMap<Arc<str>, PredicateFn>,
    parent: Option<Value>,
}

impl EvaluationContextBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding
    #[must_use]
    pub fn binding(mut self, name: impl Into<String>, value: Value) -> Self {
        self.bindings.insert(name.into(), value);
        self
    }

    /// Add a predicate function
    #[must_use]
    pub fn function(mut self, name: impl Into<Arc<str>>, function: PredicateFn) -> Self {
        self.functions.insert(name.into(), function);
        self
    }

    /// Chain under a parent context
    #[must_use]
    pub fn parent(mut self, parent: &EvaluationContext) -> Self {
        self.parent = Some(parent.root());
        self
    }

    /// Build the evaluation context
    #[must_use]
    pub fn build(self) -> EvaluationContext {
        let mut bindings = self.bindings;
        if let Some(parent) = self.parent {
            bindings.insert("parent".to_owned(), parent);
        }
        EvaluationContext {
            bindings,
            functions: self.functions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let ctx = EvaluationContext::builder()
            .binding("name", json!("alice"))
            .binding("age", json!(30))
            .build();

        assert_eq!(ctx.binding("name"), Some(&json!("alice")));
        assert_eq!(ctx.binding("age"), Some(&json!(30)));
        assert_eq!(ctx.binding("missing"), None);
    }

    #[test]
    fn test_parent_chain_materialized() {
        let grandparent = EvaluationContext::builder()
            .binding("id", json!("g"))
            .build();
        let mut parent = EvaluationContext::builder()
            .binding("id", json!("p"))
            .build();
        parent.chain_parent(&grandparent);
        let mut child = EvaluationContext::builder()
            .binding("id", json!("c"))
            .build();
        child.chain_parent(&parent);

        let root = child.binding("parent").unwrap();
        assert_eq!(root["id"], json!("p"));
        assert_eq!(root["parent"]["id"], json!("g"));
    }

    #[test]
    fn test_functions() {
        let always: PredicateFn = Arc::new(|_args| true);
        let ctx = EvaluationContext::builder()
            .function("always", always)
            .build();

        assert!(ctx.function("always").is_some());
        assert!(ctx.function("never").is_none());
        assert!((ctx.function("always").unwrap())(&[]));
    }
}

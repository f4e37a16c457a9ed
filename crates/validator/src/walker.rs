//! The object-graph walker
//!
//! [`Validator`] is the entry point: it walks a value recursively,
//! dispatching on shape (scalar / list / map / bean), builds one evaluation
//! context per bean (chained to the enclosing bean's context), evaluates
//! each field's rule, and accumulates path-prefixed violations.
//!
//! All walk state is explicit — a context stack and a [`RecursionScope`]
//! counter threaded through the recursion — so concurrent validations are
//! isolated by construction. Recursion depth is unbounded: a cyclic object
//! graph (a bean reachable from itself through cascades or context
//! materialization) will recurse until the stack runs out.

use crate::core::{CheckResult, Violation};
use crate::evaluator;
use crate::fields::{Checkable, resolve};
use crate::logic::LogicEvaluator;
use crate::registry::{FunctionRegistry, install_builtins};
use crate::rule::RuleSet;
use crate::value::FieldValue;
use std::sync::Arc;
use veridian_expression::{EvaluationContext, ExpressionEngine};

// ============================================================================
// VALIDATOR
// ============================================================================

/// Recursive object-graph validator.
///
/// # Examples
///
/// ```rust
/// use veridian_validator::prelude::*;
///
/// struct Address {
///     city: String,
/// }
///
/// checkable! {
///     impl Checkable for Address;
///     fields(this) {
///         city: this.city.as_field_value() => Rule::new([CheckKind::Required]);
///     }
/// }
///
/// struct Person {
///     name: String,
///     addr: Address,
/// }
///
/// checkable! {
///     impl Checkable for Person;
///     fields(this) {
///         name: this.name.as_field_value() => Rule::new([CheckKind::Required]);
///         addr: FieldValue::bean(&this.addr) => Rule::default().with_cascade(true);
///     }
/// }
///
/// let person = Person {
///     name: "alice".into(),
///     addr: Address { city: String::new() },
/// };
///
/// let validator = Validator::new();
/// let violations = validator.validate(&person).unwrap();
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].path(), "addr.city");
/// ```
pub struct Validator {
    logic: Arc<dyn LogicEvaluator>,
    functions: Arc<FunctionRegistry>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// A validator with the default expression engine and the global
    /// function registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            logic: Arc::new(ExpressionEngine::new()),
            functions: FunctionRegistry::global(),
        }
    }

    /// Replaces the logic-expression evaluator.
    #[must_use]
    pub fn with_logic_evaluator(mut self, logic: Arc<dyn LogicEvaluator>) -> Self {
        self.logic = logic;
        self
    }

    /// Replaces the function registry (useful for test isolation).
    #[must_use]
    pub fn with_functions(mut self, functions: Arc<FunctionRegistry>) -> Self {
        self.functions = functions;
        self
    }

    /// Validates a bean using its attached rule metadata.
    pub fn validate(&self, target: &dyn Checkable) -> CheckResult<Vec<Violation>> {
        Walk::new(self, None).bean(target)
    }

    /// Validates a bean with externally supplied rules; per field, an
    /// external entry takes precedence over the attached metadata.
    pub fn validate_with(
        &self,
        target: &dyn Checkable,
        rules: &RuleSet,
    ) -> CheckResult<Vec<Violation>> {
        Walk::new(self, Some(rules)).bean(target)
    }

    /// Validates a top-level value of any shape: list elements are
    /// prefixed `[i].`, map values `[key].`, beans validate as in
    /// [`Validator::validate`]. Scalars have no attached rules and produce
    /// nothing.
    pub fn validate_value(&self, value: &FieldValue<'_>) -> CheckResult<Vec<Violation>> {
        Walk::new(self, None).value(value)
    }

    /// [`Validator::validate_value`] with externally supplied rules.
    pub fn validate_value_with(
        &self,
        value: &FieldValue<'_>,
        rules: &RuleSet,
    ) -> CheckResult<Vec<Violation>> {
        Walk::new(self, Some(rules)).value(value)
    }

    /// True iff [`Validator::validate`] produces no violations.
    pub fn is_valid(&self, target: &dyn Checkable) -> CheckResult<bool> {
        Ok(self.validate(target)?.is_empty())
    }

    /// True iff [`Validator::validate_with`] produces no violations.
    pub fn is_valid_with(&self, target: &dyn Checkable, rules: &RuleSet) -> CheckResult<bool> {
        Ok(self.validate_with(target, rules)?.is_empty())
    }

    /// Evaluates a single rule against a single named value, outside any
    /// object walk — the per-parameter path of an interception layer. No
    /// context is active, so logic checks pass fail-open.
    pub fn check_field(
        &self,
        name: &str,
        value: &FieldValue<'_>,
        rule: &crate::rule::Rule,
    ) -> CheckResult<Vec<Violation>> {
        evaluator::check_field(name, value, rule, None, &*self.logic)
    }
}

// ============================================================================
// WALK STATE
// ============================================================================

/// Depth counter for one logical top-level call. The context tree lives
/// exactly as long as the outermost scope: it is torn down only when the
/// counter returns to zero, however deep cascades and collections recursed
/// in between.
#[derive(Debug, Default)]
struct RecursionScope {
    depth: usize,
}

impl RecursionScope {
    fn enter(&mut self) {
        self.depth += 1;
    }

    fn exit(&mut self) -> usize {
        self.depth -= 1;
        self.depth
    }
}

struct Walk<'v> {
    validator: &'v Validator,
    external: Option<&'v RuleSet>,
    contexts: Vec<EvaluationContext>,
    scope: RecursionScope,
}

impl<'v> Walk<'v> {
    fn new(validator: &'v Validator, external: Option<&'v RuleSet>) -> Self {
        Self {
            validator,
            external,
            contexts: Vec::new(),
            scope: RecursionScope::default(),
        }
    }

    /// Shape dispatch, re-entered recursively.
    fn value(&mut self, value: &FieldValue<'_>) -> CheckResult<Vec<Violation>> {
        match value {
            FieldValue::Null | FieldValue::Scalar(_) => Ok(Vec::new()),
            FieldValue::List(items) => {
                let mut out = Vec::new();
                for (index, item) in items.iter().enumerate() {
                    let nested = self.value(item)?;
                    out.extend(nested.into_iter().map(|v| v.prefix_index(index)));
                }
                Ok(out)
            }
            FieldValue::Map(entries) => {
                let mut out = Vec::new();
                for (key, item) in entries {
                    let nested = self.value(item)?;
                    out.extend(nested.into_iter().map(|v| v.prefix_key(key)));
                }
                Ok(out)
            }
            FieldValue::Bean(bean) => self.bean(*bean),
        }
    }

    fn bean(&mut self, bean: &dyn Checkable) -> CheckResult<Vec<Violation>> {
        self.scope.enter();
        let result = self.bean_scoped(bean);
        if self.scope.exit() == 0 {
            // Outermost exit: the whole context tree goes away.
            self.contexts.clear();
        }
        result
    }

    fn bean_scoped(&mut self, bean: &dyn Checkable) -> CheckResult<Vec<Violation>> {
        let context = self.build_context(bean)?;
        self.contexts.push(context);
        let result = self.bean_fields(bean);
        // Restore the caller's active context; a cascaded bean must not
        // leak its context upward.
        self.contexts.pop();
        result
    }

    fn bean_fields(&mut self, bean: &dyn Checkable) -> CheckResult<Vec<Violation>> {
        let mut out = Vec::new();
        for (binding, rule) in resolve(bean, self.external)? {
            let Some(rule) = rule else {
                // Fields without a rule are not validated at all.
                continue;
            };
            match &binding.value {
                FieldValue::List(items) => {
                    for (index, item) in items.iter().enumerate() {
                        let nested = self.value(item)?;
                        out.extend(
                            nested
                                .into_iter()
                                .map(|v| v.prefix_index(index).prefix_field(&binding.name)),
                        );
                    }
                }
                FieldValue::Map(entries) => {
                    for (key, item) in entries {
                        let nested = self.value(item)?;
                        out.extend(
                            nested
                                .into_iter()
                                .map(|v| v.prefix_key(key).prefix_field(&binding.name)),
                        );
                    }
                }
                FieldValue::Bean(nested_bean) => {
                    out.extend(self.check_binding(&binding.name, &binding.value, rule)?);
                    if rule.cascade() {
                        let nested = self.bean(*nested_bean)?;
                        out.extend(nested.into_iter().map(|v| v.prefix_field(&binding.name)));
                    }
                }
                FieldValue::Null | FieldValue::Scalar(_) => {
                    out.extend(self.check_binding(&binding.name, &binding.value, rule)?);
                }
            }
        }
        Ok(out)
    }

    fn check_binding(
        &self,
        name: &str,
        value: &FieldValue<'_>,
        rule: &crate::rule::Rule,
    ) -> CheckResult<Vec<Violation>> {
        evaluator::check_field(
            name,
            value,
            rule,
            self.contexts.last(),
            &*self.validator.logic,
        )
    }

    /// Builds the context for `bean`: every field bound by name, chained to
    /// the enclosing context when one is active, with built-in predicates
    /// and the registry snapshot installed.
    fn build_context(&self, bean: &dyn Checkable) -> CheckResult<EvaluationContext> {
        let mut context = EvaluationContext::new();
        for binding in bean.fields()? {
            let value = binding.value.to_value()?;
            context.set_binding(binding.name, value);
        }
        if let Some(parent) = self.contexts.last() {
            context.chain_parent(parent);
        }
        install_builtins(&mut context);
        for (name, predicate) in self.validator.functions.snapshot() {
            context.set_function(name, predicate);
        }
        Ok(context)
    }
}

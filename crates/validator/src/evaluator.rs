//! Per-kind rule evaluation
//!
//! Every kind on a rule is evaluated independently — there is no
//! short-circuit across kinds, and violations from all of them accumulate.
//! When a rule lists both MinLength and MaxLength, the paired range
//! thresholds are evaluated in addition to the single thresholds; the
//! overlap is intentional.

use crate::core::{CheckError, Violation};
use crate::logic::LogicEvaluator;
use crate::messages::{Qualifier, format_message};
use crate::rule::{CheckKind, Rule};
use crate::value::{FieldValue, mixed_length};
use regex::Regex;
use tracing::debug;
use veridian_expression::EvaluationContext;

/// Evaluates `rule` against one field binding, returning its violations.
///
/// `context` is consulted only by Logic checks; every other kind works on
/// the raw value. Fatal conditions (a regex that does not compile, a logic
/// expression with broken syntax) surface as [`CheckError::RuleDefinition`].
pub(crate) fn check_field(
    name: &str,
    value: &FieldValue<'_>,
    rule: &Rule,
    context: Option<&EvaluationContext>,
    logic: &dyn LogicEvaluator,
) -> Result<Vec<Violation>, CheckError> {
    let mut violations = Vec::new();
    if rule.kinds().is_empty() {
        return Ok(violations);
    }

    let empty = value.is_empty();
    let skip_on_empty = rule.null_skip() && empty;

    for kind in rule.kinds() {
        match kind {
            CheckKind::Required => {
                if empty {
                    violations.push(Violation::new(
                        name,
                        format_message(rule.required_msg(), &[name]),
                    ));
                }
            }

            CheckKind::ExactLength => {
                if skip_on_empty {
                    continue;
                }
                let text = value.display_for_length();
                if let Some(expected) = rule.length() {
                    if text.chars().count() != expected {
                        violations.push(length_violation(name, rule, Qualifier::Standard, expected));
                    }
                }
                if let Some(expected) = rule.mix_length() {
                    if mixed_length(&text) != expected {
                        violations.push(length_violation(name, rule, Qualifier::Standard, expected));
                    }
                }
            }

            CheckKind::MinLength => {
                if skip_on_empty {
                    continue;
                }
                let text = value.display_for_length();
                if let Some(min) = rule.length() {
                    if text.chars().count() < min {
                        violations.push(length_violation(name, rule, Qualifier::Min, min));
                    }
                }
                if let Some(min) = rule.mix_length() {
                    if mixed_length(&text) < min {
                        violations.push(length_violation(name, rule, Qualifier::Min, min));
                    }
                }
            }

            CheckKind::MaxLength => {
                if skip_on_empty {
                    continue;
                }
                let text = value.display_for_length();
                if let Some(max) = rule.length() {
                    if text.chars().count() > max {
                        violations.push(length_violation(name, rule, Qualifier::Max, max));
                    }
                }
                if let Some(max) = rule.mix_length() {
                    if mixed_length(&text) > max {
                        violations.push(length_violation(name, rule, Qualifier::Max, max));
                    }
                }
            }

            CheckKind::Liveable => {
                if skip_on_empty {
                    continue;
                }
                if rule.liveable().is_empty() {
                    continue;
                }
                let text = value.display_string();
                let matched = text
                    .as_deref()
                    .is_some_and(|text| rule.liveable().iter().any(|live| live == text));
                if !matched {
                    violations.push(Violation::new(
                        name,
                        format_message(rule.liveable_msg(), &[name]),
                    ));
                }
            }

            CheckKind::Regex => {
                if skip_on_empty {
                    continue;
                }
                if rule.regex().is_empty() {
                    continue;
                }
                let text = value.display_for_length();
                for pattern in rule.regex() {
                    let regex = Regex::new(pattern).map_err(|err| CheckError::RuleDefinition {
                        field: name.to_owned(),
                        reason: format!("regex '{pattern}' does not compile: {err}"),
                    })?;
                    // All patterns must match; the first miss is the violation.
                    if !regex.is_match(&text) {
                        violations.push(Violation::new(
                            name,
                            format_message(rule.regex_msg(), &[name]),
                        ));
                        break;
                    }
                }
            }

            CheckKind::Logic => {
                if skip_on_empty {
                    continue;
                }
                let Some(expression) = rule.logic() else {
                    continue;
                };
                if !logic_check(name, expression, context, logic)? {
                    violations.push(Violation::new(
                        name,
                        format_message(rule.logic_msg(), &[name]),
                    ));
                }
            }
        }
    }

    // Paired range thresholds, active only when both bound kinds are listed.
    if rule.has_kind(CheckKind::MinLength) && rule.has_kind(CheckKind::MaxLength) && !skip_on_empty
    {
        let text = value.display_for_length();
        if let Some((min, max)) = rule.length_range() {
            let len = text.chars().count();
            if len < min {
                violations.push(length_violation(name, rule, Qualifier::Min, min));
            }
            if len > max {
                violations.push(length_violation(name, rule, Qualifier::Max, max));
            }
        }
        if let Some((min, max)) = rule.mix_length_range() {
            let mixed = mixed_length(&text);
            if mixed < min {
                violations.push(length_violation(name, rule, Qualifier::Min, min));
            }
            if mixed > max {
                violations.push(length_violation(name, rule, Qualifier::Max, max));
            }
        }
    }

    Ok(violations)
}

/// Runs one logic expression. Fail-open: evaluation failures and a missing
/// context both count as passed, with a diagnostic. Broken expression
/// syntax is fatal.
fn logic_check(
    name: &str,
    expression: &str,
    context: Option<&EvaluationContext>,
    logic: &dyn LogicEvaluator,
) -> Result<bool, CheckError> {
    let Some(context) = context else {
        debug!(field = name, "no evaluation context active; logic check passes");
        return Ok(true);
    };
    match logic.eval_bool(expression, context) {
        Ok(passed) => Ok(passed),
        Err(err) if err.is_syntax() => Err(CheckError::RuleDefinition {
            field: name.to_owned(),
            reason: err.to_string(),
        }),
        Err(err) => {
            debug!(field = name, error = %err, "logic check failed to evaluate; treating as passed");
            Ok(true)
        }
    }
}

fn length_violation(name: &str, rule: &Rule, qualifier: Qualifier, threshold: usize) -> Violation {
    Violation::new(
        name,
        format_message(
            rule.length_msg(),
            &[name, qualifier.label(), &threshold.to_string()],
        ),
    )
}

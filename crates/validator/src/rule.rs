//! Rule metadata
//!
//! A [`Rule`] is an immutable description of the checks attached to one
//! field: which kinds run, their thresholds/sets/patterns, the cascade and
//! null-skip policies, and the message template per kind. Rules are built
//! once at configuration time and never mutated afterwards.
//!
//! A [`RuleSet`] is an ordered `field name → Rule` map. It backs both input
//! mechanisms: metadata attached to a type through its
//! [`Checkable`](crate::Checkable) implementation, and externally supplied
//! rules handed to [`Validator::validate_with`](crate::Validator::validate_with)
//! (which take precedence per field).

use crate::messages;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::borrow::Cow;
use tracing::warn;

// ============================================================================
// CHECK KIND
// ============================================================================

/// The kinds of check a rule can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// The value must be non-empty.
    Required,
    /// The value's length must equal the configured threshold.
    ExactLength,
    /// The value's length must be at least the configured threshold.
    MinLength,
    /// The value's length must be at most the configured threshold.
    MaxLength,
    /// The value's string form must be one of an enumerated set.
    Liveable,
    /// Every configured regex pattern must find a match.
    Regex,
    /// A conditional expression evaluated against the scoped context.
    Logic,
}

impl CheckKind {
    /// Parses the textual kind names used by externally supplied rule data
    /// (case-insensitive): `required`, `length`, `minLength`, `maxLength`,
    /// `liveable`, `regex`, `logic`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "required" => Some(Self::Required),
            "length" => Some(Self::ExactLength),
            "minlength" => Some(Self::MinLength),
            "maxlength" => Some(Self::MaxLength),
            "liveable" => Some(Self::Liveable),
            "regex" => Some(Self::Regex),
            "logic" => Some(Self::Logic),
            _ => None,
        }
    }
}

// ============================================================================
// RULE
// ============================================================================

/// Immutable check metadata for one field.
///
/// # Examples
///
/// ```rust
/// use veridian_validator::{CheckKind, Rule};
///
/// let code = Rule::new([CheckKind::Required, CheckKind::Regex])
///     .with_regex(["^[A-Z]{2}[0-9]+$"]);
///
/// let note = Rule::new([CheckKind::MinLength, CheckKind::MaxLength])
///     .with_length_range(1, 140)
///     .with_null_skip(true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    kinds: SmallVec<[CheckKind; 4]>,
    cascade: bool,
    null_skip: bool,
    length: Option<usize>,
    mix_length: Option<usize>,
    length_range: Option<(usize, usize)>,
    mix_length_range: Option<(usize, usize)>,
    liveable: Vec<String>,
    regex: Vec<String>,
    logic: Option<String>,
    required_msg: Cow<'static, str>,
    length_msg: Cow<'static, str>,
    liveable_msg: Cow<'static, str>,
    regex_msg: Cow<'static, str>,
    logic_msg: Cow<'static, str>,
}

impl Default for Rule {
    /// A rule with no kinds: never evaluated, useful as a cascade-only
    /// marker (`Rule::default().with_cascade(true)`).
    fn default() -> Self {
        Self {
            kinds: SmallVec::new(),
            cascade: false,
            null_skip: false,
            length: None,
            mix_length: None,
            length_range: None,
            mix_length_range: None,
            liveable: Vec::new(),
            regex: Vec::new(),
            logic: None,
            required_msg: Cow::Borrowed(messages::REQUIRED_MSG),
            length_msg: Cow::Borrowed(messages::LENGTH_MSG),
            liveable_msg: Cow::Borrowed(messages::LIVEABLE_MSG),
            regex_msg: Cow::Borrowed(messages::REGEX_MSG),
            logic_msg: Cow::Borrowed(messages::LOGIC_MSG),
        }
    }
}

impl Rule {
    /// Creates a rule with the given check kinds.
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = CheckKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Creates a rule from textual kind names (externally supplied rule
    /// data). Unknown names are skipped with a warning.
    #[must_use]
    pub fn from_tests<'a>(tests: impl IntoIterator<Item = &'a str>) -> Self {
        let kinds = tests.into_iter().filter_map(|t| {
            let kind = CheckKind::parse(t);
            if kind.is_none() {
                warn!(test = t, "unknown check kind ignored");
            }
            kind
        });
        Self::new(kinds)
    }

    // ── builder ─────────────────────────────────────────────────────────

    /// Also validate the nested bean this field holds, prefixing its
    /// violations with the field name.
    #[must_use]
    pub fn with_cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    /// Skip every non-Required check when the value is empty.
    #[must_use]
    pub fn with_null_skip(mut self, null_skip: bool) -> Self {
        self.null_skip = null_skip;
        self
    }

    /// Plain-length threshold shared by ExactLength/MinLength/MaxLength.
    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Mixed-length threshold (double-width characters count as 2).
    #[must_use]
    pub fn with_mix_length(mut self, mix_length: usize) -> Self {
        self.mix_length = Some(mix_length);
        self
    }

    /// Plain-length range, evaluated in addition to the single thresholds
    /// when the kinds include both MinLength and MaxLength.
    #[must_use]
    pub fn with_length_range(mut self, min: usize, max: usize) -> Self {
        self.length_range = Some((min, max));
        self
    }

    /// Mixed-length range, same activation as [`Rule::with_length_range`].
    #[must_use]
    pub fn with_mix_length_range(mut self, min: usize, max: usize) -> Self {
        self.mix_length_range = Some((min, max));
        self
    }

    /// The enumerated set of acceptable string forms.
    #[must_use]
    pub fn with_liveable<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.liveable = values.into_iter().map(Into::into).collect();
        self
    }

    /// Regex patterns, AND-combined: every pattern must find a match.
    #[must_use]
    pub fn with_regex<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regex = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// The conditional expression evaluated against the scoped context.
    #[must_use]
    pub fn with_logic(mut self, expression: impl Into<String>) -> Self {
        self.logic = Some(expression.into());
        self
    }

    /// Overrides the required-check template (`{0}` = field name).
    #[must_use]
    pub fn with_required_msg(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.required_msg = template.into();
        self
    }

    /// Overrides the length-check template (`{0}`/`{1}`/`{2}`).
    #[must_use]
    pub fn with_length_msg(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.length_msg = template.into();
        self
    }

    /// Overrides the liveable-check template (`{0}` = field name).
    #[must_use]
    pub fn with_liveable_msg(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.liveable_msg = template.into();
        self
    }

    /// Overrides the regex-check template (`{0}` = field name).
    #[must_use]
    pub fn with_regex_msg(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.regex_msg = template.into();
        self
    }

    /// Overrides the logic-check template (`{0}` = field name).
    #[must_use]
    pub fn with_logic_msg(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.logic_msg = template.into();
        self
    }

    // ── accessors ───────────────────────────────────────────────────────

    /// The check kinds, in declaration order.
    #[must_use]
    pub fn kinds(&self) -> &[CheckKind] {
        &self.kinds
    }

    /// Whether the kind list contains `kind`.
    #[must_use]
    pub fn has_kind(&self, kind: CheckKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Cascade policy.
    #[must_use]
    pub fn cascade(&self) -> bool {
        self.cascade
    }

    /// Null-skip policy.
    #[must_use]
    pub fn null_skip(&self) -> bool {
        self.null_skip
    }

    /// Plain-length threshold.
    #[must_use]
    pub fn length(&self) -> Option<usize> {
        self.length
    }

    /// Mixed-length threshold.
    #[must_use]
    pub fn mix_length(&self) -> Option<usize> {
        self.mix_length
    }

    /// Plain-length range.
    #[must_use]
    pub fn length_range(&self) -> Option<(usize, usize)> {
        self.length_range
    }

    /// Mixed-length range.
    #[must_use]
    pub fn mix_length_range(&self) -> Option<(usize, usize)> {
        self.mix_length_range
    }

    /// The liveable set.
    #[must_use]
    pub fn liveable(&self) -> &[String] {
        &self.liveable
    }

    /// The regex patterns.
    #[must_use]
    pub fn regex(&self) -> &[String] {
        &self.regex
    }

    /// The logic expression, if any.
    #[must_use]
    pub fn logic(&self) -> Option<&str> {
        self.logic.as_deref()
    }

    /// Required-check template.
    #[must_use]
    pub fn required_msg(&self) -> &str {
        &self.required_msg
    }

    /// Length-check template.
    #[must_use]
    pub fn length_msg(&self) -> &str {
        &self.length_msg
    }

    /// Liveable-check template.
    #[must_use]
    pub fn liveable_msg(&self) -> &str {
        &self.liveable_msg
    }

    /// Regex-check template.
    #[must_use]
    pub fn regex_msg(&self) -> &str {
        &self.regex_msg
    }

    /// Logic-check template.
    #[must_use]
    pub fn logic_msg(&self) -> &str {
        &self.logic_msg
    }
}

// ============================================================================
// RULE SET
// ============================================================================

/// Ordered `field name → Rule` map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: IndexMap<String, Rule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.insert(name, rule);
        self
    }

    /// Inserts or replaces the rule for `name`.
    pub fn insert(&mut self, name: impl Into<String>, rule: Rule) {
        self.rules.insert(name.into(), rule);
    }

    /// Looks up the rule for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Whether a rule exists for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Merges `other` in; existing entries win (own fields shadow the
    /// fields of an embedded ancestor).
    pub fn merge(&mut self, other: &RuleSet) {
        for (name, rule) in &other.rules {
            if !self.rules.contains_key(name) {
                self.rules.insert(name.clone(), rule.clone());
            }
        }
    }
}

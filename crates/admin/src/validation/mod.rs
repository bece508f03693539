//! Declarative field validation.
//!
//! A [`Schema`] is an ordered list of [`FieldRules`], each mapping a field name
//! to an ordered list of checks paired with the message shown when the check
//! fails. Values are read through the [`FormValues`] trait so the same schema
//! can be evaluated for a single field (on change or blur) or for the whole
//! form (on submit) with identical results.
//!
//! Only the first failing rule of a field is reported. Text rules pass on
//! blank input, which is how optional fields are expressed: leave `required`
//! off. [`Check::MinItems`] and [`Check::IsTrue`] always apply.

pub mod patterns;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use backoffice_core::Email;
use regex::Regex;
use serde::Serialize;

/// A field value as seen by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Free text, selects and enum values in their wire form.
    Text(&'a str),
    /// Multi-select values (e.g. role permissions).
    List(&'a [String]),
    /// Numeric inputs.
    Number(i64),
    /// Checkboxes and toggles.
    Flag(bool),
    /// A select bound to a record reference; `None` is the placeholder option.
    Selected(Option<i64>),
    /// The form has no such field.
    Absent,
}

impl FieldValue<'_> {
    /// Whether the value counts as "not filled in".
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Number(_) | Self::Flag(_) => false,
            Self::Selected(choice) => choice.is_none(),
            Self::Absent => true,
        }
    }
}

/// Read access to a form's current values by field name.
pub trait FormValues {
    /// Return the value of `name`, or [`FieldValue::Absent`] for unknown fields.
    fn field(&self, name: &str) -> FieldValue<'_>;
}

/// A single check a field value must pass.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// Text must be non-blank, lists non-empty, selects chosen.
    Required,
    /// Minimum length in characters.
    MinLength(usize),
    /// Maximum length in characters.
    MaxLength(usize),
    /// Text must match the regular expression.
    Pattern(&'static LazyLock<Regex>),
    /// Text must be a well-formed email address.
    Email,
    /// Text must be an absolute http(s) URL.
    Url,
    /// Text must be one of the listed wire values.
    OneOf(&'static [&'static str]),
    /// Every list entry must be one of the listed values.
    EachOneOf(&'static [&'static str]),
    /// List must hold at least this many entries.
    MinItems(usize),
    /// Number must be at least this value.
    AtLeast(i64),
    /// Number must be at most this value.
    AtMost(i64),
    /// Value must equal the value of another field.
    SameAs(&'static str),
    /// Flag must be set.
    IsTrue,
}

impl Check {
    fn passes(&self, value: FieldValue<'_>, values: &(impl FormValues + ?Sized)) -> bool {
        if let Self::Required = self {
            return !value.is_blank();
        }
        if value.is_blank() && !matches!(self, Self::IsTrue | Self::MinItems(_)) {
            return true;
        }

        match (self, value) {
            (Self::MinLength(min), FieldValue::Text(s)) => s.chars().count() >= *min,
            (Self::MaxLength(max), FieldValue::Text(s)) => s.chars().count() <= *max,
            (Self::Pattern(re), FieldValue::Text(s)) => re.is_match(s),
            (Self::Email, FieldValue::Text(s)) => Email::parse(s).is_ok(),
            (Self::Url, FieldValue::Text(s)) => url::Url::parse(s)
                .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host()),
            (Self::OneOf(allowed), FieldValue::Text(s)) => allowed.contains(&s),
            (Self::EachOneOf(allowed), FieldValue::List(items)) => {
                items.iter().all(|item| allowed.contains(&item.as_str()))
            }
            (Self::MinItems(min), FieldValue::List(items)) => items.len() >= *min,
            (Self::AtLeast(min), FieldValue::Number(n)) => n >= *min,
            (Self::AtMost(max), FieldValue::Number(n)) => n <= *max,
            (Self::SameAs(other), v) => values.field(other) == v,
            (Self::IsTrue, v) => v == FieldValue::Flag(true),
            // A check applied to a value of the wrong shape is a schema bug;
            // it never blocks the user.
            _ => true,
        }
    }
}

/// A check paired with the message shown when it fails.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// What is checked.
    pub check: Check,
    /// Message surfaced next to the field.
    pub message: &'static str,
}

/// The ordered rules for one field.
#[derive(Debug, Clone)]
pub struct FieldRules {
    name: &'static str,
    rules: Vec<Rule>,
}

impl FieldRules {
    /// Start an empty rule list for `name`.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Field name these rules apply to.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Append an arbitrary check.
    #[must_use]
    pub fn check(mut self, check: Check, message: &'static str) -> Self {
        self.rules.push(Rule { check, message });
        self
    }

    /// Field must be filled in.
    #[must_use]
    pub fn required(self, message: &'static str) -> Self {
        self.check(Check::Required, message)
    }

    /// Minimum length in characters.
    #[must_use]
    pub fn min_length(self, min: usize, message: &'static str) -> Self {
        self.check(Check::MinLength(min), message)
    }

    /// Maximum length in characters.
    #[must_use]
    pub fn max_length(self, max: usize, message: &'static str) -> Self {
        self.check(Check::MaxLength(max), message)
    }

    /// Must match a pattern from [`patterns`].
    #[must_use]
    pub fn pattern(self, re: &'static LazyLock<Regex>, message: &'static str) -> Self {
        self.check(Check::Pattern(re), message)
    }

    /// Must be an email address.
    #[must_use]
    pub fn email(self, message: &'static str) -> Self {
        self.check(Check::Email, message)
    }

    /// Must be an http(s) URL.
    #[must_use]
    pub fn url(self, message: &'static str) -> Self {
        self.check(Check::Url, message)
    }

    /// Must be one of `allowed`.
    #[must_use]
    pub fn one_of(self, allowed: &'static [&'static str], message: &'static str) -> Self {
        self.check(Check::OneOf(allowed), message)
    }

    /// Every entry must be one of `allowed`.
    #[must_use]
    pub fn each_one_of(self, allowed: &'static [&'static str], message: &'static str) -> Self {
        self.check(Check::EachOneOf(allowed), message)
    }

    /// At least `min` entries.
    #[must_use]
    pub fn min_items(self, min: usize, message: &'static str) -> Self {
        self.check(Check::MinItems(min), message)
    }

    /// Number of at least `min`.
    #[must_use]
    pub fn at_least(self, min: i64, message: &'static str) -> Self {
        self.check(Check::AtLeast(min), message)
    }

    /// Number of at most `max`.
    #[must_use]
    pub fn at_most(self, max: i64, message: &'static str) -> Self {
        self.check(Check::AtMost(max), message)
    }

    /// Must equal the value of `other`.
    #[must_use]
    pub fn same_as(self, other: &'static str, message: &'static str) -> Self {
        self.check(Check::SameAs(other), message)
    }

    /// Flag must be checked.
    #[must_use]
    pub fn is_true(self, message: &'static str) -> Self {
        self.check(Check::IsTrue, message)
    }

    fn first_failure(&self, values: &(impl FormValues + ?Sized)) -> Option<&'static str> {
        let value = values.field(self.name);
        self.rules
            .iter()
            .find(|rule| !rule.check.passes(value, values))
            .map(|rule| rule.message)
    }
}

/// A form's complete validation schema.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldRules>,
}

impl Schema {
    /// Create an empty schema.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add the rules for one field.
    #[must_use]
    pub fn field(mut self, rules: FieldRules) -> Self {
        self.fields.push(rules);
        self
    }

    /// Names of all fields with rules, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldRules::name)
    }

    /// Validate a single field, returning its first failing message.
    ///
    /// Fields without rules always pass.
    #[must_use]
    pub fn validate_field(
        &self,
        values: &(impl FormValues + ?Sized),
        field: &str,
    ) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|rules| rules.name == field)
            .and_then(|rules| rules.first_failure(values))
    }

    /// Validate every field at once.
    ///
    /// # Errors
    ///
    /// Returns the first failing message of each invalid field.
    pub fn validate(&self, values: &(impl FormValues + ?Sized)) -> Result<(), FieldErrors> {
        let errors: BTreeMap<_, _> = self
            .fields
            .iter()
            .filter_map(|rules| rules.first_failure(values).map(|msg| (rules.name, msg)))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FieldErrors(errors))
        }
    }
}

/// Field-level validation failures, keyed by field name.
#[derive(thiserror::Error, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[error("{} field(s) failed validation", .0.len())]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(field, msg)| (*field, *msg))
    }

    /// A single failure, for checks that happen outside a schema.
    #[must_use]
    pub fn single(field: &'static str, message: &'static str) -> Self {
        Self(BTreeMap::from([(field, message)]))
    }

    pub(crate) fn set(&mut self, field: &'static str, message: Option<&'static str>) {
        match message {
            Some(msg) => {
                self.0.insert(field, msg);
            }
            None => {
                self.0.remove(field);
            }
        }
    }
}

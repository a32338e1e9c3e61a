//! Create-form model with the browser's constraint validation: `required`
//! fields must be non-empty and typed inputs must parse. A form that fails
//! here is never submitted.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    LongText,
    Email,
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM`
    Time,
    /// Numeric id of another record, picked from a select.
    Reference,
    Choice(&'static [&'static str]),
}

impl InputKind {
    fn accepts(&self, value: &str) -> bool {
        match self {
            InputKind::Text | InputKind::LongText => true,
            InputKind::Email => is_email(value),
            InputKind::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
            InputKind::Time => NaiveTime::parse_from_str(value, "%H:%M").is_ok(),
            InputKind::Reference => value.parse::<i64>().map(|id| id > 0).unwrap_or(false),
            InputKind::Choice(options) => options.contains(&value),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            InputKind::Text | InputKind::LongText => "text",
            InputKind::Email => "an email address",
            InputKind::Date => "a date (YYYY-MM-DD)",
            InputKind::Time => "a time (HH:MM)",
            InputKind::Reference => "a record id",
            InputKind::Choice(_) => "one of the listed options",
        }
    }
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub required: bool,
}

pub const fn required(name: &'static str, label: &'static str, kind: InputKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required: true,
    }
}

pub const fn optional(name: &'static str, label: &'static str, kind: InputKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required: false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    Mismatch(&'static str),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub problems: Vec<(String, FieldProblem)>,
}

impl ValidationError {
    fn single(field: &str, problem: FieldProblem) -> Self {
        Self {
            problems: vec![(field.to_string(), problem)],
        }
    }

    pub fn missing_fields(&self) -> Vec<&str> {
        self.problems
            .iter()
            .filter(|(_, p)| *p == FieldProblem::Missing)
            .map(|(f, _)| f.as_str())
            .collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .problems
            .iter()
            .map(|(field, problem)| match problem {
                FieldProblem::Missing => format!("{}: please fill out this field", field),
                FieldProblem::Mismatch(expected) => format!("{}: expected {}", field, expected),
                FieldProblem::Unknown => format!("{}: no such field", field),
            })
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone)]
pub struct FormState {
    fields: &'static [FieldSpec],
    values: BTreeMap<&'static str, String>,
}

impl FormState {
    pub fn new(fields: &'static [FieldSpec]) -> Self {
        Self {
            fields,
            values: BTreeMap::new(),
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    fn spec(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), ValidationError> {
        let spec = self
            .spec(name)
            .ok_or_else(|| ValidationError::single(name, FieldProblem::Unknown))?;
        self.values.insert(spec.name, value.into());
        Ok(())
    }

    pub fn set_all<'a, I>(&mut self, pairs: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in pairs {
            self.set(name, value)?;
        }
        Ok(())
    }

    /// Current value, empty when never set.
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn check_validity(&self) -> Result<(), ValidationError> {
        let mut problems = Vec::new();
        for spec in self.fields {
            let value = self.value(spec.name);
            if value.is_empty() {
                if spec.required {
                    problems.push((spec.name.to_string(), FieldProblem::Missing));
                }
                continue;
            }
            if !spec.kind.accepts(value) {
                problems.push((spec.name.to_string(), FieldProblem::Mismatch(spec.kind.expected())));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { problems })
        }
    }

    pub fn text(&self, name: &str) -> String {
        self.value(name).to_string()
    }

    pub fn optional_text(&self, name: &str) -> Option<String> {
        Some(self.value(name)).filter(|v| !v.is_empty()).map(str::to_string)
    }

    pub fn date(&self, name: &str) -> Result<NaiveDate, ValidationError> {
        NaiveDate::parse_from_str(self.value(name), "%Y-%m-%d")
            .map_err(|_| ValidationError::single(name, FieldProblem::Mismatch(InputKind::Date.expected())))
    }

    /// Parsed date, or `None` when the field was left empty.
    pub fn optional_date(&self, name: &str) -> Result<Option<NaiveDate>, ValidationError> {
        if self.value(name).is_empty() {
            return Ok(None);
        }
        self.date(name).map(Some)
    }

    pub fn id(&self, name: &str) -> Result<i64, ValidationError> {
        self.value(name)
            .parse::<i64>()
            .map_err(|_| ValidationError::single(name, FieldProblem::Mismatch(InputKind::Reference.expected())))
    }
}

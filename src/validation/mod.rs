//! Request validation chains.
//!
//! A chain is an ordered list of [`FieldRule`]s. Each rule reads one field
//! from the path parameters or the JSON body, runs its sanitizers and checks
//! in declaration order, and writes the sanitized value back so the handler
//! sees what was validated. Every check of every rule runs; failures are
//! collected rather than short-circuited.
//!
//! Handlers receive validated input through the [`Validated`] extractor,
//! which rejects the request with HTTP 400 before the handler is called.

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
};
use chrono::NaiveDate;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::ApiError;
use crate::models::DATE_FORMAT;

pub mod requests;
pub mod rules;

static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]+$").expect("valid alphanumeric pattern"));

static DAY_MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("valid date pattern"));

/// Where a rule reads its field from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Param,
    Body,
}

/// One failed check, serialized as `{ "<field>": "<message>" }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.message)?;
        map.end()
    }
}

#[derive(Debug, Clone)]
enum Step {
    Trim,
    Escape,
    NotEmpty(&'static str),
    Alphanumeric(&'static str),
    Numeric(&'static str),
    Date(&'static str),
    DateBetween {
        min: NaiveDate,
        max: NaiveDate,
        message: &'static str,
    },
}

/// Ordered sanitizers and checks for a single field
#[derive(Debug, Clone)]
pub struct FieldRule {
    location: Location,
    field: &'static str,
    steps: Vec<Step>,
}

/// Start a rule on a path parameter
pub fn param(field: &'static str) -> FieldRule {
    FieldRule::new(Location::Param, field)
}

/// Start a rule on a JSON body field
pub fn body(field: &'static str) -> FieldRule {
    FieldRule::new(Location::Body, field)
}

impl FieldRule {
    fn new(location: Location, field: &'static str) -> Self {
        Self {
            location,
            field,
            steps: Vec::new(),
        }
    }

    fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn trim(self) -> Self {
        self.step(Step::Trim)
    }

    /// Replace HTML-significant characters with entities
    pub fn escape(self) -> Self {
        self.step(Step::Escape)
    }

    pub fn not_empty(self, message: &'static str) -> Self {
        self.step(Step::NotEmpty(message))
    }

    /// ASCII letters and digits only; the empty string fails
    pub fn alphanumeric(self, message: &'static str) -> Self {
        self.step(Step::Alphanumeric(message))
    }

    /// Optionally signed integer that fits in an i64
    pub fn numeric(self, message: &'static str) -> Self {
        self.step(Step::Numeric(message))
    }

    /// Calendar date written `DD-MM-YYYY`
    pub fn date(self, message: &'static str) -> Self {
        self.step(Step::Date(message))
    }

    /// Inclusive date bounds. Values that do not parse are left to [`FieldRule::date`].
    pub fn date_between(self, min: NaiveDate, max: NaiveDate, message: &'static str) -> Self {
        self.step(Step::DateBetween { min, max, message })
    }

    fn apply(&self, input: &mut Input, errors: &mut Vec<FieldError>) {
        let mut value = input.get(self.location, self.field).to_owned();

        for step in &self.steps {
            let failed = match step {
                Step::Trim => {
                    value = value.trim().to_owned();
                    None
                }
                Step::Escape => {
                    value = escape(&value);
                    None
                }
                Step::NotEmpty(message) => value.is_empty().then_some(*message),
                Step::Alphanumeric(message) => (!ALPHANUMERIC.is_match(&value)).then_some(*message),
                Step::Numeric(message) => value.parse::<i64>().is_err().then_some(*message),
                Step::Date(message) => parse_date(&value).is_none().then_some(*message),
                Step::DateBetween { min, max, message } => match parse_date(&value) {
                    Some(date) if date < *min || date > *max => Some(*message),
                    _ => None,
                },
            };

            if let Some(message) = failed {
                errors.push(FieldError::new(self.field, message));
            }
        }

        input.set(self.location, self.field, value);
    }
}

/// Run every rule against `input`, sanitizing it in place.
/// Returns all failures in declaration order.
pub fn run(rules: &[FieldRule], input: &mut Input) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    for rule in rules {
        rule.apply(input, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse a `DD-MM-YYYY` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !DAY_MONTH_YEAR.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Path parameters and body fields of a request, as text
#[derive(Debug, Clone, Default)]
pub struct Input {
    params: HashMap<String, String>,
    body: HashMap<String, String>,
}

impl Input {
    /// Build from raw path parameters and a JSON body. Strings are kept,
    /// numbers and booleans use their textual form, anything else counts as
    /// missing. A body that is not an object has no fields.
    pub fn new(params: HashMap<String, String>, body: Value) -> Self {
        let body = match body {
            Value::Object(fields) => fields
                .into_iter()
                .filter_map(|(key, value)| {
                    let text = match value {
                        Value::String(text) => text,
                        Value::Number(number) => number.to_string(),
                        Value::Bool(flag) => flag.to_string(),
                        _ => return None,
                    };
                    Some((key, text))
                })
                .collect(),
            _ => HashMap::new(),
        };

        Self { params, body }
    }

    /// Field value, or the empty string when absent
    pub fn get(&self, location: Location, field: &str) -> &str {
        let fields = match location {
            Location::Param => &self.params,
            Location::Body => &self.body,
        };
        fields.get(field).map(String::as_str).unwrap_or_default()
    }

    fn set(&mut self, location: Location, field: &'static str, value: String) {
        let fields = match location {
            Location::Param => &mut self.params,
            Location::Body => &mut self.body,
        };
        fields.insert(field.to_string(), value);
    }

    pub fn text(&self, location: Location, field: &str) -> String {
        self.get(location, field).to_string()
    }

    pub fn integer(&self, location: Location, field: &'static str) -> Result<i64, FieldError> {
        self.get(location, field)
            .parse()
            .map_err(|_| FieldError::new(field, format!("{field} must be an integer")))
    }

    pub fn date(&self, location: Location, field: &'static str) -> Result<NaiveDate, FieldError> {
        parse_date(self.get(location, field))
            .ok_or_else(|| FieldError::new(field, format!("{field} must be a DD-MM-YYYY date")))
    }
}

/// A request type that can be built once its rule chain has passed
pub trait Validate: Sized {
    fn rules() -> Vec<FieldRule>;

    fn from_input(input: &Input) -> Result<Self, FieldError>;
}

/// Extractor running `T`'s validation chain over the path and body
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        // Routes without parameters have nothing to extract
        let params = match Path::<HashMap<String, String>>::from_request_parts(&mut parts, state).await {
            Ok(Path(params)) => params,
            Err(_) => HashMap::new(),
        };

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|rejection| ApiError::Body(rejection.body_text()))?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        let mut input = Input::new(params, body);
        run(&T::rules(), &mut input).map_err(ApiError::Validation)?;

        T::from_input(&input)
            .map(Validated)
            .map_err(|error| ApiError::Validation(vec![error]))
    }
}

//! Response expectations.
//!
//! An [`Assertion`] is one predicate over a captured HTTP response: status
//! equality, JSON property presence, exact value, primitive type, the
//! null-or-type disjunction, or an array length comparison.

use serde::{Deserialize, Serialize};

/// JSON primitive type names, as the upstream contract speaks of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonType {
    /// A JSON string.
    String,
    /// A JSON number.
    Number,
    /// A JSON boolean.
    Boolean,
    /// A JSON object.
    Object,
    /// A JSON array.
    Array,
    /// The JSON null value.
    Null,
}

impl JsonType {
    /// Returns the type name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
        }
    }

    /// Returns true if the value is of this type.
    #[must_use]
    pub fn matches(self, value: &serde_json::Value) -> bool {
        use serde_json::Value;
        matches!(
            (self, value),
            (Self::String, Value::String(_))
                | (Self::Number, Value::Number(_))
                | (Self::Boolean, Value::Bool(_))
                | (Self::Object, Value::Object(_))
                | (Self::Array, Value::Array(_))
                | (Self::Null, Value::Null)
        )
    }
}

/// Returns true iff `value` is exactly JSON `null` or matches the expected
/// primitive type.
///
/// Pure and total: never panics, never errors.
#[must_use]
pub fn is_null_or_type(value: &serde_json::Value, expected: JsonType) -> bool {
    value.is_null() || expected.matches(value)
}

/// Expected status code value or range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (e.g. 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => status >= *min && status <= *max,
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
        }
    }

    /// Create a "success" expectation (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }

    /// Create an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

/// Comparison operators for numeric assertions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    /// Equal to.
    Equals,
    /// Not equal to.
    NotEquals,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal to.
    GreaterThanOrEqual,
    /// Less than.
    LessThan,
    /// Less than or equal to.
    LessThanOrEqual,
}

impl ComparisonOperator {
    /// Get the symbol for this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
        }
    }

    /// Apply the operator to two usize operands.
    #[must_use]
    pub const fn compare(self, actual: usize, expected: usize) -> bool {
        match self {
            Self::Equals => actual == expected,
            Self::NotEquals => actual != expected,
            Self::GreaterThan => actual > expected,
            Self::GreaterThanOrEqual => actual >= expected,
            Self::LessThan => actual < expected,
            Self::LessThanOrEqual => actual <= expected,
        }
    }
}

/// One expectation to evaluate against a response.
///
/// JSON paths use a simple subset: `$.a.b`, `a[0]`, `a[*]`. A `[*]` segment
/// fans the remaining path out over every element of the array; the
/// assertion holds only if there is at least one match and every match
/// passes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Check the response status code.
    StatusCode {
        /// Expected status code or range.
        expected: StatusExpectation,
    },
    /// Check a JSON path exists and optionally equals an exact value.
    JsonPath {
        /// JSONPath expression (e.g. `$.response.items`).
        path: String,
        /// Expected value; `None` asserts presence only.
        expected: Option<serde_json::Value>,
    },
    /// Check the value at a JSON path has the given primitive type.
    JsonPathType {
        /// JSONPath expression.
        path: String,
        /// Expected primitive type.
        expected: JsonType,
    },
    /// Check the value at a JSON path is exactly null or has the given type.
    JsonPathNullOrType {
        /// JSONPath expression.
        path: String,
        /// Type accepted besides null.
        expected: JsonType,
    },
    /// Compare the length of the array at a JSON path.
    JsonPathCount {
        /// JSONPath expression; must resolve to an array.
        path: String,
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Length to compare against.
        count: usize,
    },
}

impl Assertion {
    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code {}", expected.description()),
            Self::JsonPath {
                path,
                expected: Some(v),
            } => format!("JSON {path} equals {v}"),
            Self::JsonPath {
                path,
                expected: None,
            } => format!("JSON {path} exists"),
            Self::JsonPathType { path, expected } => {
                format!("JSON {path} is {}", expected.as_str())
            }
            Self::JsonPathNullOrType { path, expected } => {
                format!("JSON {path} is null or {}", expected.as_str())
            }
            Self::JsonPathCount {
                path,
                operator,
                count,
            } => format!("JSON {path} length {} {count}", operator.symbol()),
        }
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

//! Feature value representation.
//!
//! Every cell of a dataset holds a [`Value`]: either a categorical string or
//! a continuous number. Columns are homogeneous; the type of a column is the
//! type of its value in the first row.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The semantic type of a feature column or label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Discrete string-valued data.
    Categorical,
    /// Real-valued numeric data.
    Continuous,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Categorical => write!(f, "categorical"),
            ValueType::Continuous => write!(f, "continuous"),
        }
    }
}

/// A single feature value.
///
/// By convention, categorical data are given as strings whereas continuous
/// data are given as floating point numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Categorical(String),
    Continuous(f64),
}

impl Value {
    /// The semantic type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Categorical(_) => ValueType::Categorical,
            Value::Continuous(_) => ValueType::Continuous,
        }
    }

    /// The categorical payload, if this value is categorical.
    pub fn as_categorical(&self) -> Option<&str> {
        match self {
            Value::Categorical(category) => Some(category),
            Value::Continuous(_) => None,
        }
    }

    /// The continuous payload, if this value is continuous.
    pub fn as_continuous(&self) -> Option<f64> {
        match self {
            Value::Categorical(_) => None,
            Value::Continuous(number) => Some(*number),
        }
    }

    /// Total order over values of the same type.
    ///
    /// Continuous NaN sorts after every finite number. Across types,
    /// categorical sorts before continuous, although columns never mix types.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Categorical(a), Value::Categorical(b)) => a.cmp(b),
            (Value::Continuous(a), Value::Continuous(b)) => {
                a.partial_cmp(b).unwrap_or_else(|| match (a.is_nan(), b.is_nan()) {
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    _ => Ordering::Equal,
                })
            }
            (Value::Categorical(_), Value::Continuous(_)) => Ordering::Less,
            (Value::Continuous(_), Value::Categorical(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Categorical(category) => write!(f, "{}", category),
            Value::Continuous(number) => write!(f, "{}", number),
        }
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Continuous(number)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Continuous(number as f64)
    }
}

impl From<&str> for Value {
    fn from(category: &str) -> Self {
        Value::Categorical(category.to_string())
    }
}

impl From<String> for Value {
    fn from(category: String) -> Self {
        Value::Categorical(category)
    }
}

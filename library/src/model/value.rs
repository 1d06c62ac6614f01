use serde::Serialize;
use std::collections::HashMap;

use crate::error::LibraryError;
use crate::model::image::Image;

/// A value flowing through a node pin.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[serde(untagged)]
pub enum NodeValue {
    Integer(i64),
    Boolean(bool),
    String(String),
    Images(Vec<Image>),
}

impl NodeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeValue::Integer(_) => "integer",
            NodeValue::Boolean(_) => "boolean",
            NodeValue::String(_) => "string",
            NodeValue::Images(_) => "images",
        }
    }

    pub fn get_as<T: TryGetValue<T>>(&self) -> Option<T> {
        T::try_get(self)
    }
}

impl From<i64> for NodeValue {
    fn from(value: i64) -> Self {
        NodeValue::Integer(value)
    }
}

impl From<usize> for NodeValue {
    fn from(value: usize) -> Self {
        NodeValue::Integer(value as i64)
    }
}

impl From<bool> for NodeValue {
    fn from(value: bool) -> Self {
        NodeValue::Boolean(value)
    }
}

impl From<String> for NodeValue {
    fn from(value: String) -> Self {
        NodeValue::String(value)
    }
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        NodeValue::String(value.to_string())
    }
}

impl From<Vec<Image>> for NodeValue {
    fn from(value: Vec<Image>) -> Self {
        NodeValue::Images(value)
    }
}

impl From<Image> for NodeValue {
    fn from(value: Image) -> Self {
        NodeValue::Images(vec![value])
    }
}

impl std::fmt::Display for NodeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeValue::Integer(i) => write!(f, "{}", i),
            NodeValue::Boolean(b) => write!(f, "{}", b),
            NodeValue::String(s) => write!(f, "{}", s),
            NodeValue::Images(images) => {
                let sizes: Vec<String> = images
                    .iter()
                    .map(|img| format!("{}x{}", img.width, img.height))
                    .collect();
                write!(f, "<{} image(s): {}>", images.len(), sizes.join(", "))
            }
        }
    }
}

pub trait TryGetValue<T> {
    fn try_get(v: &NodeValue) -> Option<T>;
}

impl TryGetValue<i64> for i64 {
    fn try_get(v: &NodeValue) -> Option<i64> {
        match v {
            NodeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl TryGetValue<bool> for bool {
    fn try_get(v: &NodeValue) -> Option<bool> {
        match v {
            NodeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl TryGetValue<String> for String {
    fn try_get(v: &NodeValue) -> Option<String> {
        match v {
            NodeValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl TryGetValue<Vec<Image>> for Vec<Image> {
    fn try_get(v: &NodeValue) -> Option<Vec<Image>> {
        match v {
            NodeValue::Images(images) => Some(images.clone()),
            _ => None,
        }
    }
}

/// Typed read access to a node's resolved inputs.
#[derive(Clone, Copy)]
pub struct NodeInputs<'a> {
    values: &'a HashMap<String, NodeValue>,
}

impl<'a> NodeInputs<'a> {
    pub fn new(values: &'a HashMap<String, NodeValue>) -> Self {
        Self { values }
    }

    fn require<T: TryGetValue<T>>(&self, key: &str, expected: &str) -> Result<T, LibraryError> {
        match self.values.get(key) {
            Some(value) => value.get_as::<T>().ok_or_else(|| {
                LibraryError::invalid_argument(format!(
                    "input '{}' must be {}, got {}",
                    key,
                    expected,
                    value.type_name()
                ))
            }),
            None => Err(LibraryError::invalid_argument(format!(
                "missing input '{}'",
                key
            ))),
        }
    }

    pub fn string(&self, key: &str) -> Result<String, LibraryError> {
        self.require::<String>(key, "a string")
    }

    pub fn integer(&self, key: &str) -> Result<i64, LibraryError> {
        self.require::<i64>(key, "an integer")
    }

    pub fn boolean(&self, key: &str) -> Result<bool, LibraryError> {
        self.require::<bool>(key, "a boolean")
    }

    pub fn images(&self, key: &str) -> Result<&'a [Image], LibraryError> {
        match self.values.get(key) {
            Some(NodeValue::Images(images)) => Ok(images),
            Some(other) => Err(LibraryError::invalid_argument(format!(
                "input '{}' must be an image batch, got {}",
                key,
                other.type_name()
            ))),
            None => Err(LibraryError::invalid_argument(format!(
                "missing input '{}'",
                key
            ))),
        }
    }

    pub fn optional_integer(&self, key: &str) -> Result<Option<i64>, LibraryError> {
        match self.values.get(key) {
            Some(_) => self.integer(key).map(Some),
            None => Ok(None),
        }
    }

    /// Missing optional strings read as empty, matching unconnected text pins.
    pub fn string_or_empty(&self, key: &str) -> Result<String, LibraryError> {
        match self.values.get(key) {
            Some(_) => self.string(key),
            None => Ok(String::new()),
        }
    }
}

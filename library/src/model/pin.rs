//! Pin (socket) definitions for node inputs and outputs.

use serde::{Deserialize, Serialize};

use crate::model::value::NodeValue;

/// Data type carried by a pin.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PinDataType {
    /// Batch of images
    Image,
    /// Integer value (i64)
    Integer,
    /// Boolean value
    Boolean,
    /// Text string
    String,
    /// One string out of a fixed option list
    Enum,
}

impl std::fmt::Display for PinDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PinDataType::Image => "IMAGE",
            PinDataType::Integer => "INT",
            PinDataType::Boolean => "BOOLEAN",
            PinDataType::String => "STRING",
            PinDataType::Enum => "ENUM",
        };
        write!(f, "{}", s)
    }
}

/// Direction of a pin.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    Input,
    Output,
}

/// Definition of a pin on a node type.
#[derive(Serialize, Clone, Debug)]
pub struct PinDefinition {
    /// Internal name used by the host (e.g. "folder_path", "quality")
    pub name: String,
    /// Display name shown in the UI (e.g. "Folder Path")
    pub display_name: String,
    pub direction: PinDirection,
    pub data_type: PinDataType,
    /// Value used when the host leaves the input unset
    pub default_value: Option<NodeValue>,
    /// Inclusive bounds for integer inputs
    pub range: Option<(i64, i64)>,
    /// Allowed values for enum inputs
    pub options: Vec<String>,
    /// Optional inputs may be absent after defaults are applied
    pub optional: bool,
}

impl PinDefinition {
    pub fn input(name: &str, display_name: &str, data_type: PinDataType) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            direction: PinDirection::Input,
            data_type,
            default_value: None,
            range: None,
            options: Vec::new(),
            optional: false,
        }
    }

    pub fn output(name: &str, display_name: &str, data_type: PinDataType) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            direction: PinDirection::Output,
            data_type,
            default_value: None,
            range: None,
            options: Vec::new(),
            optional: false,
        }
    }

    pub fn with_default(mut self, value: impl Into<NodeValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Whether `value` has the shape this pin expects.
    pub fn accepts(&self, value: &NodeValue) -> bool {
        matches!(
            (self.data_type, value),
            (PinDataType::Image, NodeValue::Images(_))
                | (PinDataType::Integer, NodeValue::Integer(_))
                | (PinDataType::Boolean, NodeValue::Boolean(_))
                | (PinDataType::String, NodeValue::String(_))
                | (PinDataType::Enum, NodeValue::String(_))
        )
    }
}

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, anyhow, bail};
use file_nodes::io::load_image;
use file_nodes::model::{PinDataType, PinDefinition};
use file_nodes::{ExecutionContext, NodeTypeDefinition, NodeValue, PluginManager};
use log::{debug, info};
use serde_json::{Map, Value};

/// Splits `name=value` at the first `=`.
pub fn split_assignment(raw: &str) -> anyhow::Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim(), value))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| anyhow!("input '{}' is not of the form name=value", raw))
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => bail!("'{}' is not a boolean", other),
    }
}

/// Converts a command-line string into the value type `pin` expects.
pub fn parse_value(pin: Option<&PinDefinition>, value: &str) -> anyhow::Result<NodeValue> {
    let Some(pin) = pin else {
        return Ok(NodeValue::from(value));
    };
    let parsed = match pin.data_type {
        PinDataType::Integer => NodeValue::Integer(
            value
                .trim()
                .parse()
                .with_context(|| format!("input '{}' expects an integer", pin.name))?,
        ),
        PinDataType::Boolean => NodeValue::Boolean(
            parse_bool(value).with_context(|| format!("input '{}'", pin.name))?,
        ),
        PinDataType::String | PinDataType::Enum => NodeValue::from(value),
        PinDataType::Image => {
            let mut images = Vec::new();
            for path in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let image = load_image(Path::new(path))
                    .with_context(|| format!("loading image '{}'", path))?;
                images.push(image);
            }
            if images.is_empty() {
                bail!("input '{}' needs at least one image path", pin.name);
            }
            NodeValue::Images(images)
        }
    };
    Ok(parsed)
}

pub fn parse_inputs(
    definition: &NodeTypeDefinition,
    raw_inputs: &[String],
) -> anyhow::Result<HashMap<String, NodeValue>> {
    let mut inputs = HashMap::new();
    for raw in raw_inputs {
        let (name, value) = split_assignment(raw)?;
        let value = parse_value(definition.input(name), value)?;
        inputs.insert(name.to_string(), value);
    }
    Ok(inputs)
}

/// Runs `type_id` `repeat` times and returns one JSON object of named outputs per run.
pub fn run_node(
    manager: &PluginManager,
    ctx: &ExecutionContext,
    type_id: &str,
    raw_inputs: &[String],
    repeat: u32,
) -> anyhow::Result<Vec<Value>> {
    let definition = manager
        .get_definition(type_id)
        .ok_or_else(|| anyhow!("unknown node type '{}'", type_id))?;
    let inputs = parse_inputs(&definition, raw_inputs)?;
    debug!("run {} with {} input(s)", type_id, inputs.len());

    let mut runs = Vec::with_capacity(repeat as usize);
    for run in 0..repeat.max(1) {
        let outputs = manager.execute_named(type_id, &inputs, ctx)?;
        let mut object = Map::new();
        for (name, value) in outputs {
            object.insert(name, serde_json::to_value(&value)?);
        }
        info!("{} run {} finished", type_id, run + 1);
        runs.push(Value::Object(object));
    }
    Ok(runs)
}

pub fn describe(definition: &NodeTypeDefinition) -> anyhow::Result<Value> {
    Ok(serde_json::to_value(definition)?)
}

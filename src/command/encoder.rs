/// On/off control commands for IoT devices
use serde_json::{json, Map, Value};

use crate::error::CommandError;
use crate::grouping::iot::IotModel;

const QUICK_RUN: &str = "quick_run";
const QUICK_STOP: &str = "quick_stop";

/// Valve position sent when opening a position-controlled valve.
const FULLY_OPEN: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandValue {
    Int(i64),
    Text(String),
}

impl CommandValue {
    fn render(&self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Int(value) => json!(value),
            Self::Text(value) => json!(value),
        }
    }
}

/// Encoded control command, ready for the vendor control endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPayload {
    model: IotModel,
    fields: Vec<(&'static str, CommandValue)>,
}

impl ControlPayload {
    pub fn model(&self) -> IotModel {
        self.model
    }

    /// Command name (`quick_run` or `quick_stop`).
    pub fn command(&self) -> &str {
        self.fields
            .iter()
            .find(|(name, _)| *name == "cmd")
            .and_then(|(_, value)| match value {
                CommandValue::Text(text) => Some(text.as_str()),
                CommandValue::Int(_) => None,
            })
            .unwrap_or_default()
    }

    pub fn is_switch_on(&self) -> bool {
        self.command() == QUICK_RUN
    }

    /// Fields as string pairs, in wire order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        self.fields
            .iter()
            .map(|(name, value)| (*name, value.render()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.render())
    }

    /// `application/x-www-form-urlencoded` rendering.
    pub fn to_form_body(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.fields {
            serializer.append_pair(name, &value.render());
        }
        serializer.finish()
    }

    /// JSON envelope the local API expects: `{"command":[{...}]}`.
    pub fn to_json(&self) -> Value {
        let command: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect();
        json!({ "command": [command] })
    }
}

/// Build the command that switches a device on or off.
///
/// # Arguments
/// * `id` - Device id as reported in its `dev_id<n>` key
/// * `model` - Model name (`WFC01`) or numeric model code (`1`)
/// * `on` - Desired state
///
/// # Returns
/// The encoded command, or an error for an empty id or an unsupported model.
/// Nothing is encoded unless every input is valid.
pub fn encode_switch(id: &str, model: &str, on: bool) -> Result<ControlPayload, CommandError> {
    let id = validate_id(id)?;
    let model: IotModel = model.parse()?;
    let code = i64::from(model.code());

    use CommandValue::{Int, Text};
    let mut fields = match (on, model) {
        (true, IotModel::Wfc02) => vec![
            ("position", Int(FULLY_OPEN)),
            ("always_on", Int(1)),
            ("val_type", Int(1)),
            ("val", Int(0)),
            ("cmd", Text(QUICK_RUN.to_string())),
        ],
        (true, _) => vec![
            ("on_type", Int(0)),
            ("off_type", Int(0)),
            ("always_on", Int(1)),
            ("on_time", Int(0)),
            ("off_time", Int(0)),
            ("val_type", Int(1)),
            ("val", Int(0)),
            ("cmd", Text(QUICK_RUN.to_string())),
        ],
        (false, _) => vec![("cmd", Text(QUICK_STOP.to_string()))],
    };
    fields.extend([("id", id), ("model", Int(code))]);

    Ok(ControlPayload { model, fields })
}

fn validate_id(id: &str) -> Result<CommandValue, CommandError> {
    let trimmed = id.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_graphic()) {
        return Err(CommandError::InvalidDeviceId(id.to_string()));
    }
    // Only ids that render back identically go out as numbers
    Ok(match trimmed.parse::<i64>() {
        Ok(number) if number.to_string() == trimmed => CommandValue::Int(number),
        _ => CommandValue::Text(trimmed.to_string()),
    })
}

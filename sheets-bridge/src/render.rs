use crate::control_id::{self, ControlId, SEPARATOR};
use chrono::{DateTime, Utc};
use model::channel::message::{CreateMessage, Embed, EmbedField};
use model::interaction::{ActionRow, Button, ButtonStyle, Component, MAX_BUTTONS_PER_ROW};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const APPROVAL_COLOR: u32 = 0x3498db;
pub const NOTIFICATION_COLOR: u32 = 0xf39c12;
pub const SURVEY_COLOR: u32 = 0x9b59b6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Approval,
    Notification,
    Survey,
}

impl MessageKind {
    fn default_title(self) -> &'static str {
        match self {
            MessageKind::Approval => "Needs approval",
            MessageKind::Notification => "Notification",
            MessageKind::Survey => "Survey",
        }
    }

    fn default_description(self) -> &'static str {
        match self {
            MessageKind::Approval => "Please review the following",
            MessageKind::Notification => "This is a notification",
            MessageKind::Survey => "Please choose your answer",
        }
    }

    pub fn color(self) -> u32 {
        match self {
            MessageKind::Approval => APPROVAL_COLOR,
            MessageKind::Notification => NOTIFICATION_COLOR,
            MessageKind::Survey => SURVEY_COLOR,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            MessageKind::Approval => "📋",
            MessageKind::Notification => "📢",
            MessageKind::Survey => "📊",
        }
    }
}

impl FromStr for MessageKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approval" => Ok(MessageKind::Approval),
            "notification" => Ok(MessageKind::Notification),
            "survey" => Ok(MessageKind::Survey),
            _ => Err(UnknownKind(s.to_owned())),
        }
    }
}

#[derive(Debug)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported message type \"{}\"", self.0)
    }
}

/// A webhook's `data`, interpreted according to its `type`.
#[derive(Debug, Clone)]
pub enum MessageRequest {
    Approval(RequestData),
    Notification(RequestData),
    Survey(SurveyData),
}

#[derive(Deserialize, Debug, Clone)]
pub struct RequestData {
    #[serde(deserialize_with = "deserialize_subject_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<RequestField>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SurveyData {
    #[serde(flatten)]
    pub request: RequestData,
    #[serde(default)]
    pub options: Option<Vec<SurveyOption>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RequestField {
    #[serde(deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub value: String,
    #[serde(default)]
    pub inline: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SurveyOption {
    #[serde(deserialize_with = "deserialize_text")]
    pub label: String,
}

impl MessageRequest {
    pub fn from_parts(kind: MessageKind, data: Value) -> serde_json::Result<MessageRequest> {
        Ok(match kind {
            MessageKind::Approval => MessageRequest::Approval(serde_json::from_value(data)?),
            MessageKind::Notification => MessageRequest::Notification(serde_json::from_value(data)?),
            MessageKind::Survey => MessageRequest::Survey(serde_json::from_value(data)?),
        })
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            MessageRequest::Approval(_) => MessageKind::Approval,
            MessageRequest::Notification(_) => MessageKind::Notification,
            MessageRequest::Survey(_) => MessageKind::Survey,
        }
    }

    pub fn subject_id(&self) -> &str {
        match self {
            MessageRequest::Approval(data) | MessageRequest::Notification(data) => &data.id,
            MessageRequest::Survey(data) => &data.request.id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStyle {
    Primary,
    Success,
    Danger,
    Secondary,
}

impl From<ControlStyle> for ButtonStyle {
    fn from(style: ControlStyle) -> Self {
        match style {
            ControlStyle::Primary => ButtonStyle::Primary,
            ControlStyle::Success => ButtonStyle::Success,
            ControlStyle::Danger => ButtonStyle::Danger,
            ControlStyle::Secondary => ButtonStyle::Secondary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub id: String,
    pub label: String,
    pub style: ControlStyle,
}

impl Control {
    fn new(id: ControlId, label: impl Into<String>, style: ControlStyle) -> Control {
        Control {
            id: id.to_string(),
            label: label.into(),
            style,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedMessage {
    pub kind: MessageKind,
    pub title: String,
    pub description: String,
    pub color: u32,
    pub timestamp: DateTime<Utc>,
    pub fields: Vec<EmbedField>,
    pub controls: Vec<Control>,
}

pub fn render(request: MessageRequest, timestamp: DateTime<Utc>) -> RenderedMessage {
    let kind = request.kind();

    let (data, controls) = match request {
        MessageRequest::Approval(data) => {
            let controls = vec![
                Control::new(
                    ControlId::new(control_id::APPROVE, data.id.as_str()),
                    "✅ Approve",
                    ControlStyle::Success,
                ),
                Control::new(
                    ControlId::new(control_id::REJECT, data.id.as_str()),
                    "❌ Reject",
                    ControlStyle::Danger,
                ),
            ];
            (data, controls)
        }

        MessageRequest::Notification(data) => {
            let controls = vec![Control::new(
                ControlId::new(control_id::CONFIRM, data.id.as_str()),
                "👍 Mark as read",
                ControlStyle::Primary,
            )];
            (data, controls)
        }

        MessageRequest::Survey(SurveyData { request, options }) => {
            // options past the first row are dropped
            let controls = options
                .unwrap_or_default()
                .into_iter()
                .take(MAX_BUTTONS_PER_ROW)
                .enumerate()
                .map(|(index, option)| {
                    Control::new(
                        ControlId::new(control_id::SURVEY, request.id.as_str()).with_index(index),
                        option.label,
                        ControlStyle::Secondary,
                    )
                })
                .collect();
            (request, controls)
        }
    };

    let fields = data
        .fields
        .unwrap_or_default()
        .into_iter()
        .map(|field| EmbedField {
            name: field.name,
            value: field.value,
            inline: field.inline.unwrap_or(false),
        })
        .collect();

    RenderedMessage {
        kind,
        title: non_empty_or(data.title, kind.default_title()),
        description: non_empty_or(data.description, kind.default_description()),
        color: kind.color(),
        timestamp,
        fields,
        controls,
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

impl RenderedMessage {
    pub fn to_embed(&self) -> Embed {
        let embed = Embed::rich()
            .title(format!("{} {}", self.kind.icon(), self.title))
            .description(self.description.as_str())
            .color(self.color)
            .timestamp(self.timestamp);

        self.fields
            .iter()
            .fold(embed, |embed, field| embed.field(&field.name, &field.value, field.inline))
    }

    pub fn into_create_message(self) -> CreateMessage {
        let embed = self.to_embed();

        // Discord rejects empty action rows
        let components = if self.controls.is_empty() {
            Vec::new()
        } else {
            let buttons = self
                .controls
                .into_iter()
                .map(|control| {
                    Component::Button(Button::new(control.id, control.label, control.style.into()))
                })
                .collect();

            vec![Component::ActionRow(ActionRow::new(buttons))]
        };

        CreateMessage {
            content: None,
            embeds: vec![embed],
            components,
        }
    }
}

fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

fn deserialize_subject_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let id = deserialize_text(deserializer)?;

    if id.is_empty() {
        Err(D::Error::custom("id must not be empty"))
    } else if id.contains(SEPARATOR) {
        Err(D::Error::custom(format!(
            "id must not contain \"{}\"",
            SEPARATOR
        )))
    } else {
        Ok(id)
    }
}

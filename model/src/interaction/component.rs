use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;

use crate::Snowflake;

/// Discord allows at most five buttons in a single action row.
pub const MAX_BUTTONS_PER_ROW: usize = 5;

#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum Component {
    ActionRow(ActionRow),
    Button(Button),
    /// Select menus, and component types newer than this model, which are passed through untouched
    /// when a message is edited.
    Other(Value),
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum ComponentType {
    ActionRow = 1,
    Button = 2,
    StringSelect = 3,
    TextInput = 4,
    UserSelect = 5,
    RoleSelect = 6,
    MentionableSelect = 7,
    ChannelSelect = 8,
}

impl TryFrom<u64> for ComponentType {
    type Error = Box<str>;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::ActionRow,
            2 => Self::Button,
            3 => Self::StringSelect,
            4 => Self::TextInput,
            5 => Self::UserSelect,
            6 => Self::RoleSelect,
            7 => Self::MentionableSelect,
            8 => Self::ChannelSelect,
            _ => Err(format!("invalid component type \"{}\"", value).into_boxed_str())?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ActionRow {
    pub r#type: ComponentType,
    pub components: Vec<Component>,
}

impl ActionRow {
    pub fn new(components: Vec<Component>) -> ActionRow {
        ActionRow {
            r#type: ComponentType::ActionRow,
            components,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Button {
    pub r#type: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<Box<str>>,
    pub style: ButtonStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<PartialEmoji>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Box<str>>,
    #[serde(default = "bool::default")]
    pub disabled: bool,
}

impl Button {
    pub fn new(custom_id: impl Into<Box<str>>, label: impl Into<Box<str>>, style: ButtonStyle) -> Button {
        Button {
            r#type: ComponentType::Button,
            label: Some(label.into()),
            custom_id: Some(custom_id.into()),
            style,
            emoji: None,
            url: None,
            disabled: false,
        }
    }
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum ButtonStyle {
    Primary = 1,
    Secondary = 2,
    Success = 3,
    Danger = 4,
    Link = 5,
    Premium = 6,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PartialEmoji {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Box<str>>,
    #[serde(default)]
    pub animated: bool,
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        let component_type = value
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| D::Error::custom("component type was not an integer"))?;

        let component = match ComponentType::try_from(component_type) {
            Ok(ComponentType::ActionRow) => serde_json::from_value(value).map(Component::ActionRow),
            Ok(ComponentType::Button) => serde_json::from_value(value).map(Component::Button),
            _ => Ok(Component::Other(value)),
        }
        .map_err(D::Error::custom)?;

        Ok(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_button_wire_format() {
        let row = Component::ActionRow(ActionRow::new(vec![Component::Button(Button::new(
            "confirm_7",
            "👍 Mark as read",
            ButtonStyle::Primary,
        ))]));

        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({
                "type": 1,
                "components": [{
                    "type": 2,
                    "custom_id": "confirm_7",
                    "label": "👍 Mark as read",
                    "style": 1,
                    "disabled": false
                }]
            })
        );
    }

    #[test]
    fn test_select_menu_passes_through() {
        let raw = json!({
            "type": 1,
            "components": [{"type": 3, "custom_id": "pick", "options": []}]
        });

        let row: Component = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&row).unwrap(), raw);
    }

    #[test]
    fn test_component_type_must_be_integer() {
        assert!(serde_json::from_value::<Component>(json!({"type": "button"})).is_err());
        assert!(matches!(
            serde_json::from_value::<Component>(json!({"type": 99})).unwrap(),
            Component::Other(_)
        ));
    }
}

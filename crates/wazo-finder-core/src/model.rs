//! Wire types for the Wazo confd API and the enriched device record.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier that the API may encode as a JSON string or number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => EntityId(s),
            Raw::Number(n) => EntityId(n.to_string()),
        })
    }
}

/// Generic `{items, total}` collection envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> Collection<T> {
    /// Reported total, falling back to the number of items returned.
    pub fn total(&self) -> u64 {
        self.total.unwrap_or(self.items.len() as u64)
    }
}

/// Device entry returned by the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceSummary {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub tenant_uuid: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Full device record from `GET /devices/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceDetail {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl DeviceDetail {
    /// Profile label: template id if set, else model, else "N/A".
    pub fn profile_name(&self) -> String {
        match (non_empty(&self.template_id), non_empty(&self.model)) {
            (Some(template), _) => format!("Template ID: {}", template),
            (None, Some(model)) => format!("Model: {}", model),
            (None, None) => "N/A".to_string(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Extension {
    #[serde(default)]
    pub exten: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Line {
    pub id: EntityId,
    #[serde(default)]
    pub device_id: Option<EntityId>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

impl Line {
    pub fn has_exten(&self, exten: &str) -> bool {
        self.extensions.iter().any(|e| e.exten == exten)
    }

    pub fn first_exten(&self) -> Option<&str> {
        self.extensions.first().map(|e| e.exten.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineRef {
    pub id: EntityId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub lines: Vec<LineRef>,
}

impl User {
    pub fn has_line(&self, line_id: &EntityId) -> bool {
        self.lines.iter().any(|l| &l.id == line_id)
    }
}

/// Device record assembled by the resolver.
///
/// `line_exten` and the user fields stay `None` when the device has no
/// associated line; that state is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Device {
    pub id: Option<EntityId>,
    pub mac: Option<String>,
    pub label: Option<String>,
    pub tenant_uuid: Option<String>,
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_exten: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_lastname: Option<String>,
}

impl Device {
    pub fn from_summary(summary: DeviceSummary) -> Self {
        Self {
            id: summary.id,
            mac: summary.mac,
            label: summary.label,
            tenant_uuid: summary.tenant_uuid,
            ..Default::default()
        }
    }

    pub fn is_linked(&self) -> bool {
        self.line_id.is_some()
    }

    /// Label if known, else the given fallback.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(fallback)
    }

    /// "First Last", or `None` when neither name is known.
    pub fn user_fullname(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.user_firstname, &self.user_lastname]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

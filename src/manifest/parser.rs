use super::{DisplayMode, Icon, ManifestError, Purpose, Size, WebAppManifest};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Tokens of a manifest "set of strings" member.
///
/// Producers disagree on the encoding, so both a space separated string and
/// an array of strings are accepted.
#[derive(Debug, Clone, Copy)]
pub enum StringSet<'a> {
    Separated(&'a str),
    Array(&'a [Value]),
}

impl<'a> StringSet<'a> {
    /// Walks the tokens again from the source value on every call.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        match *self {
            StringSet::Separated(s) => Box::new(s.split_whitespace()),
            StringSet::Array(values) => Box::new(values.iter().filter_map(Value::as_str)),
        }
    }
}

/// Returns `None` when the member is missing or neither a string nor an array,
/// which callers must tell apart from an empty set.
pub fn parse_string_set(value: Option<&Value>) -> Option<StringSet<'_>> {
    match value? {
        Value::String(s) => Some(StringSet::Separated(s)),
        Value::Array(values) => Some(StringSet::Array(values)),
        _ => None,
    }
}

pub fn parse_icon_sizes(icon: &Map<String, Value>) -> Vec<Size> {
    match parse_string_set(icon.get("sizes")) {
        Some(set) => set.iter().filter_map(Size::parse).collect(),
        None => Vec::new(),
    }
}

/// Purposes of one icon entry. A missing `purpose` member means `any`; a
/// present member with only unknown keywords gives an empty set.
pub fn parse_purposes(icon: &Map<String, Value>) -> BTreeSet<Purpose> {
    let Some(set) = parse_string_set(icon.get("purpose")) else {
        return BTreeSet::from([Purpose::Any]);
    };

    set.iter().filter_map(Purpose::from_token).collect()
}

/// Builds the icon at `index` of the `icons` array.
///
/// `Ok(None)` means the entry is skipped: it is not an object, or it lists
/// purposes none of which are understood.
///
/// An absent `purpose` defaults to `any` instead of rejecting the entry. This
/// asymmetry is probably unintended; it is kept for compatibility.
pub fn parse_icon(index: usize, value: &Value) -> Result<Option<Icon>, ManifestError> {
    let Some(obj) = value.as_object() else {
        return Ok(None);
    };

    let purpose = parse_purposes(obj);
    if purpose.is_empty() {
        return Ok(None);
    }

    let src = match obj.get("src").and_then(Value::as_str) {
        Some(src) if !src.is_empty() => src.to_string(),
        Some(_) => {
            return Err(ManifestError::MalformedIconEntry {
                index,
                reason: "empty src".to_string(),
            })
        }
        None => {
            return Err(ManifestError::MalformedIconEntry {
                index,
                reason: "missing src".to_string(),
            })
        }
    };

    Ok(Some(Icon {
        src,
        sizes: parse_icon_sizes(obj),
        icon_type: obj.get("type").and_then(Value::as_str).map(str::to_string),
        purpose,
    }))
}

/// Reads the `icons` member of a manifest document. Never fails: a missing or
/// non-array member gives an empty list and bad entries are dropped.
pub fn parse_icons(json: &Value) -> Vec<Icon> {
    let Some(array) = json.get("icons").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut icons = Vec::with_capacity(array.len());
    for (index, value) in array.iter().enumerate() {
        match parse_icon(index, value) {
            Ok(Some(icon)) => icons.push(icon),
            Ok(None) => debug!("Skipping icon entry {}", index),
            Err(e) => warn!("Dropping manifest icon: {}", e),
        }
    }
    icons
}

/// `MINIMAL_UI` becomes `minimal-ui`.
pub fn serialize_enum_name(name: &str) -> String {
    name.to_lowercase().replace('_', "-")
}

pub fn serialize_icons(icons: &[Icon]) -> Value {
    Value::Array(icons.iter().map(serialize_icon).collect())
}

fn serialize_icon(icon: &Icon) -> Value {
    let mut obj = Map::new();
    obj.insert("src".to_string(), Value::String(icon.src.clone()));
    obj.insert("sizes".to_string(), Value::String(join_tokens(icon.sizes.iter())));
    if let Some(icon_type) = &icon.icon_type {
        obj.insert("type".to_string(), Value::String(icon_type.clone()));
    }
    obj.insert("purpose".to_string(), Value::String(join_tokens(icon.purpose.iter())));
    Value::Object(obj)
}

fn join_tokens<T: ToString>(items: impl Iterator<Item = T>) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join(" ")
}

pub struct WebAppManifestParser;

impl WebAppManifestParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, json_str: &str) -> Result<WebAppManifest, ManifestError> {
        let value: Value = serde_json::from_str(json_str)?;
        self.parse_value(&value)
    }

    pub fn parse_value(&self, value: &Value) -> Result<WebAppManifest, ManifestError> {
        let short_name = optional_string(value, "short_name");
        let name = optional_string(value, "name")
            .or_else(|| short_name.clone())
            .ok_or_else(|| ManifestError::MissingField("name".to_string()))?;
        let start_url = optional_string(value, "start_url")
            .ok_or_else(|| ManifestError::MissingField("start_url".to_string()))?;

        Ok(WebAppManifest {
            name,
            short_name,
            description: optional_string(value, "description"),
            start_url,
            scope: optional_string(value, "scope"),
            display: value
                .get("display")
                .and_then(Value::as_str)
                .map(Self::parse_display_mode)
                .unwrap_or_default(),
            theme_color: optional_string(value, "theme_color"),
            background_color: optional_string(value, "background_color"),
            icons: parse_icons(value),
        })
    }

    fn parse_display_mode(display: &str) -> DisplayMode {
        match display {
            "fullscreen" => DisplayMode::Fullscreen,
            "standalone" => DisplayMode::Standalone,
            "minimal-ui" => DisplayMode::MinimalUi,
            "browser" => DisplayMode::Browser,
            other => {
                debug!("Unknown display mode {:?}, using default", other);
                DisplayMode::default()
            }
        }
    }

    pub fn serialize(&self, manifest: &WebAppManifest) -> Value {
        let mut obj = Map::new();
        obj.insert("name".to_string(), Value::String(manifest.name.clone()));
        obj.insert("start_url".to_string(), Value::String(manifest.start_url.clone()));
        obj.insert("display".to_string(), Value::String(manifest.display.as_str().to_string()));
        obj.insert("icons".to_string(), serialize_icons(&manifest.icons));

        let optional = [
            ("short_name", &manifest.short_name),
            ("description", &manifest.description),
            ("scope", &manifest.scope),
            ("theme_color", &manifest.theme_color),
            ("background_color", &manifest.background_color),
        ];
        for (key, field) in optional {
            if let Some(v) = field {
                obj.insert(key.to_string(), Value::String(v.clone()));
            }
        }

        Value::Object(obj)
    }
}

fn optional_string(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

impl Default for WebAppManifestParser {
    fn default() -> Self {
        Self::new()
    }
}

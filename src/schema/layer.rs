//! Serializable pieces of the schema descriptor.
use serde::{ser::SerializeMap, Serialize, Serializer};

#[derive(Debug, Clone, Serialize)]
pub struct Anchoring {
    pub location: bool,
    pub stream: bool,
    pub time: bool,
}

/// Attribute declaration of a layer.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Attribute {
    Typed {
        #[serde(rename = "isGlobal")]
        is_global: bool,
        #[serde(rename = "type")]
        kind: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        values: Option<Vec<String>>,
        nullable: bool,
    },
    Ref {
        #[serde(rename = "ref")]
        reference: &'static str,
    },
    /// JSON object attribute and the type of each of its keys.
    Object(Attributes),
    KeyType {
        #[serde(rename = "type")]
        kind: &'static str,
    },
    Literal(&'static str),
}

impl Attribute {
    pub fn text(nullable: bool) -> Self {
        Attribute::Typed {
            is_global: false,
            kind: "text",
            values: None,
            nullable,
        }
    }

    pub fn categorical(values: &[String], nullable: bool) -> Self {
        Attribute::Typed {
            is_global: false,
            kind: "categorical",
            values: Some(values.to_vec()),
            nullable,
        }
    }

    pub fn flag() -> Self {
        Self::categorical(&["yes".to_string(), "no".to_string()], false)
    }
}

/// Attributes keyed by name, serialized as a JSON object in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Attributes(Vec<(&'static str, Attribute)>);

impl Attributes {
    pub fn with(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.0.push((name, attribute));
        self
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, attribute) in &self.0 {
            map.serialize_entry(name, attribute)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    #[serde(rename = "abstract")]
    pub r#abstract: bool,
    pub layer_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchoring: Option<Anchoring>,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSlot {
    pub media_type: &'static str,
    pub is_optional: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_keep_order() {
        let attrs = Attributes::default()
            .with("form", Attribute::text(false))
            .with("who", Attribute::Ref { reference: "who" })
            .with("unclear", Attribute::flag());
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(
            json,
            r#"{"form":{"isGlobal":false,"type":"text","nullable":false},"who":{"ref":"who"},"unclear":{"isGlobal":false,"type":"categorical","values":["yes","no"],"nullable":false}}"#
        );
    }
}

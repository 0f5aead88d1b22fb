/*! Schema descriptor

JSON document describing the produced layers to the corpus platform.
Categorical domains (part-of-speech tags, document metadata values) are
discovered while converting, in first-seen order.
!*/
mod layer;

use std::{collections::BTreeMap, fs::File, io::BufWriter, path::Path};

use serde::Serialize;

use crate::config::CorpusMeta;
use crate::error::Error;
use crate::registry::DocumentTable;

pub use layer::{Anchoring, Attribute, Attributes, Layer, MediaSlot};

/// Deduplicated values, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Domain(Vec<String>);

impl Domain {
    /// Adds a non-empty value. Returns `true` if it was unseen.
    pub fn add(&mut self, value: &str) -> bool {
        if value.is_empty() || self.0.iter().any(|v| v == value) {
            return false;
        }
        self.0.push(value.to_string());
        true
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }
}

/// Categorical document attributes, except `id` whose values are document names.
pub const DOCUMENT_CATEGORIES: [&str; 4] =
    ["transcriptor", "tool", "transcription_phase", "normalisation"];

/// Metadata column of a document attribute: `transcription_phase` -> `Transcription phase`.
pub fn column_name(attribute: &str) -> String {
    let spaced = attribute.replace('_', " ").to_lowercase();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Domain sizes, used to roll back a failed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSnapshot {
    xpos: usize,
    ids: usize,
    documents: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Schema {
    corpus: CorpusMeta,
    xpos: Domain,
    ids: Domain,
    documents: Vec<Domain>,
}

#[derive(Serialize)]
struct Meta<'a> {
    #[serde(flatten)]
    corpus: &'a CorpusMeta,
    #[serde(rename = "mediaSlots")]
    media_slots: BTreeMap<&'static str, MediaSlot>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Descriptor<'a> {
    meta: Meta<'a>,
    first_class: BTreeMap<&'static str, &'static str>,
    layer: BTreeMap<&'static str, Layer>,
    global_attributes: BTreeMap<&'static str, Attribute>,
    tracks: serde_json::Value,
}

impl Schema {
    pub fn new(corpus: CorpusMeta) -> Self {
        Self {
            corpus,
            xpos: Domain::default(),
            ids: Domain::default(),
            documents: vec![Domain::default(); DOCUMENT_CATEGORIES.len()],
        }
    }

    pub fn xpos(&self) -> &Domain {
        &self.xpos
    }

    pub fn register_xpos(&mut self, xpos: &str) -> bool {
        self.xpos.add(xpos)
    }

    /// Adds the document name and its categorical metadata values.
    pub fn register_document(&mut self, document: &str, table: &DocumentTable) {
        self.ids.add(document);
        for (attribute, domain) in DOCUMENT_CATEGORIES.iter().zip(self.documents.iter_mut()) {
            if let Some(value) = table.value(document, &column_name(attribute)) {
                domain.add(value);
            }
        }
    }

    /// Values of a document attribute (`id` or one of [DOCUMENT_CATEGORIES]).
    pub fn document_domain(&self, attribute: &str) -> Option<&Domain> {
        if attribute == "id" {
            return Some(&self.ids);
        }
        DOCUMENT_CATEGORIES
            .iter()
            .position(|a| *a == attribute)
            .map(|idx| &self.documents[idx])
    }

    pub fn snapshot(&self) -> SchemaSnapshot {
        SchemaSnapshot {
            xpos: self.xpos.len(),
            ids: self.ids.len(),
            documents: self.documents.iter().map(Domain::len).collect(),
        }
    }

    pub fn restore(&mut self, snapshot: &SchemaSnapshot) {
        self.xpos.truncate(snapshot.xpos);
        self.ids.truncate(snapshot.ids);
        for (domain, len) in self.documents.iter_mut().zip(&snapshot.documents) {
            domain.truncate(*len);
        }
    }

    fn layers(&self) -> BTreeMap<&'static str, Layer> {
        let stream_time = || {
            Some(Anchoring {
                location: false,
                stream: true,
                time: true,
            })
        };

        let token = Layer {
            r#abstract: false,
            layer_type: "unit",
            contains: None,
            anchoring: stream_time(),
            attributes: Attributes::default()
                .with("form", Attribute::text(false))
                .with("lemma", Attribute::text(false))
                .with("xpos", Attribute::categorical(self.xpos.values(), true))
                .with("unclear", Attribute::flag())
                .with("truncated", Attribute::flag())
                .with("vocal", Attribute::flag())
                .with("pause_before", Attribute::flag())
                .with("pause_after", Attribute::flag())
                .with("unintelligible", Attribute::flag()),
        };

        let segment = Layer {
            r#abstract: false,
            layer_type: "span",
            contains: Some("Token"),
            anchoring: stream_time(),
            attributes: Attributes::default()
                .with("who", Attribute::Ref { reference: "who" })
                .with("audio", Attribute::text(false))
                .with("file_present", Attribute::flag()),
        };

        let mut document_attributes = Attributes::default()
            .with("id", Attribute::categorical(self.ids.values(), false))
            .with("title", Attribute::text(true));
        for (attribute, domain) in DOCUMENT_CATEGORIES.iter().zip(&self.documents) {
            document_attributes =
                document_attributes.with(*attribute, Attribute::categorical(domain.values(), true));
        }
        let document = Layer {
            r#abstract: false,
            layer_type: "span",
            contains: Some("Segment"),
            anchoring: stream_time(),
            attributes: document_attributes.with("who", Attribute::Ref { reference: "who" }),
        };

        let incident = Layer {
            r#abstract: false,
            layer_type: "unit",
            contains: None,
            anchoring: Some(Anchoring {
                location: false,
                stream: true,
                time: false,
            }),
            attributes: Attributes::default().with(
                "meta",
                Attribute::Object(
                    Attributes::default().with("description", Attribute::KeyType { kind: "text" }),
                ),
            ),
        };

        [
            ("Token", token),
            ("Segment", segment),
            ("Document", document),
            ("Incident", incident),
        ]
        .into_iter()
        .collect()
    }

    fn global_attributes() -> BTreeMap<&'static str, Attribute> {
        let keys = Attributes::default()
            .with("sex", Attribute::KeyType { kind: "text" })
            .with("birth", Attribute::KeyType { kind: "date" })
            .with("occupation", Attribute::KeyType { kind: "text" })
            .with("residence", Attribute::KeyType { kind: "text" })
            .with("dialect", Attribute::KeyType { kind: "text" });
        let who = Attribute::Object(
            Attributes::default()
                .with("type", Attribute::Literal("dict"))
                .with("keys", Attribute::Object(keys)),
        );
        [("who", who)].into_iter().collect()
    }

    fn descriptor(&self) -> Descriptor<'_> {
        Descriptor {
            meta: Meta {
                corpus: &self.corpus,
                media_slots: [(
                    "audio",
                    MediaSlot {
                        media_type: "audio",
                        is_optional: false,
                    },
                )]
                .into_iter()
                .collect(),
            },
            first_class: [
                ("document", "Document"),
                ("segment", "Segment"),
                ("token", "Token"),
            ]
            .into_iter()
            .collect(),
            layer: self.layers(),
            global_attributes: Self::global_attributes(),
            tracks: serde_json::json!({ "layers": { "Segment": { "split": ["who"] } } }),
        }
    }

    /// Full descriptor as a JSON value. Object keys come out sorted.
    pub fn to_json(&self) -> Result<serde_json::Value, Error> {
        Ok(serde_json::to_value(self.descriptor())?)
    }

    /// Writes the descriptor, keeping attributes in declaration order.
    pub fn write(&self, path: &Path) -> Result<(), Error> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.descriptor())?;
        Ok(())
    }
}

//! Speaker registry.
use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use log::debug;
use serde::Serialize;

use crate::error::Error;

/// A speaker and its free-form properties (sex, birth, occupation, residence, dialect...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Person {
    properties: BTreeMap<String, String>,
}

impl Person {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: String) {
        self.properties.insert(key.to_string(), value);
    }

    /// JSON object holding the properties.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Speakers keyed by id, kept in registration order.
#[derive(Debug, Default, Clone)]
pub struct PersonRegistry {
    order: Vec<String>,
    people: HashMap<String, Person>,
}

impl PersonRegistry {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse `<person>` elements.
    ///
    /// The `id` (usually `xml:id`) and `sex` attributes are read from the element,
    /// every child element becomes a property, unwrapping an eventual `<unclear>` wrapper.
    pub fn parse(xml: &str) -> Result<Self, Error> {
        let doc = roxmltree::Document::parse(xml)?;
        let mut registry = Self::default();

        for node in doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "person")
        {
            let id = match node.attributes().find(|a| a.name() == "id") {
                Some(attr) => attr.value().trim().to_string(),
                None => {
                    debug!("skipping person without id at {:?}", node.range());
                    continue;
                }
            };

            let mut person = Person::default();
            if let Some(sex) = node.attribute("sex") {
                person.set("sex", sex.trim().to_string());
            }

            for child in node.children().filter(|c| c.is_element()) {
                let holder = child
                    .children()
                    .find(|c| c.is_element() && c.tag_name().name() == "unclear")
                    .unwrap_or(child);
                let value = holder.text().unwrap_or_default().trim().to_string();
                person.set(child.tag_name().name(), value);
            }

            registry.insert(id, person);
        }

        Ok(registry)
    }

    /// Insert or replace a speaker.
    pub fn insert(&mut self, id: String, person: Person) {
        if !self.people.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.people.insert(id, person);
    }

    /// Registers an empty speaker if `id` is unknown. Returns `true` if it was added.
    pub fn ensure(&mut self, id: &str) -> bool {
        if self.people.contains_key(id) {
            return false;
        }
        self.insert(id.to_string(), Person::default());
        true
    }

    /// Mutable access to a speaker, registering it if needed.
    pub fn entry(&mut self, id: &str) -> &mut Person {
        if !self.people.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.people.entry(id.to_string()).or_default()
    }

    pub fn get(&self, id: &str) -> Option<&Person> {
        self.people.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.people.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop speakers registered after the first `len` ones.
    pub fn truncate(&mut self, len: usize) {
        for id in self.order.drain(len.min(self.order.len())..) {
            self.people.remove(&id);
        }
    }

    /// Speakers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Person)> {
        self.order
            .iter()
            .filter_map(|id| self.people.get(id).map(|p| (id.as_str(), p)))
    }
}

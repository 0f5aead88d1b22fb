/*! Node classification

Children of a segment container are mapped onto a closed set of [Tag]s,
then turned into [Node]s: tokens (words and pseudo tokens), incidents and pauses.
Anything else is ignored.
!*/
use log::debug;
use roxmltree::Node as XmlNode;

use crate::config::Config;

/// Source tags with a meaning for the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Word,
    Unclear,
    Vocal,
    Deletion,
    Gap,
    Incident,
    Pause,
    Other,
}

/// Fixed part of the vocabulary. The word tag is configurable.
pub const TAG_TABLE: &[(&str, Tag)] = &[
    ("unclear", Tag::Unclear),
    ("vocal", Tag::Vocal),
    ("del", Tag::Deletion),
    ("gap", Tag::Gap),
    ("incident", Tag::Incident),
    ("pause", Tag::Pause),
];

impl Tag {
    pub fn from_name(name: &str, token_tag: &str) -> Self {
        if name == token_tag {
            return Tag::Word;
        }
        TAG_TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, t)| *t)
            .unwrap_or(Tag::Other)
    }

    /// Tags producing a token row.
    pub fn is_token(&self) -> bool {
        match self {
            Tag::Word | Tag::Unclear | Tag::Vocal | Tag::Deletion | Tag::Gap => true,
            Tag::Incident | Tag::Pause | Tag::Other => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenFlags {
    pub unclear: bool,
    pub truncated: bool,
    pub vocal: bool,
    pub unintelligible: bool,
    pub pause_before: bool,
    pub pause_after: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenNode {
    pub form: String,
    pub lemma: String,
    pub xpos: String,
    pub flags: TokenFlags,
}

impl TokenNode {
    /// Length of the form, in characters.
    pub fn len(&self) -> usize {
        self.form.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.form.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Token(TokenNode),
    Incident { description: String },
    Pause,
    Ignored,
}

/// Turns segment children into [Node]s.
#[derive(Debug, Clone)]
pub struct Classifier {
    token_tag: String,
    lemma_attribute: String,
    xpos_attribute: String,
}

impl Classifier {
    pub fn new(config: &Config) -> Self {
        Self {
            token_tag: config.token_tag.clone(),
            lemma_attribute: config.lemma_attribute.clone(),
            xpos_attribute: config.xpos_attribute.clone(),
        }
    }

    pub fn tag(&self, node: &XmlNode) -> Tag {
        Tag::from_name(node.tag_name().name(), &self.token_tag)
    }

    /// Classifies every element child of `container`, in document order.
    ///
    /// Pause flags look at the direct element siblings, whatever their tag.
    pub fn classify_children(&self, container: XmlNode) -> Vec<Node> {
        let children: Vec<XmlNode> = container.children().filter(|c| c.is_element()).collect();
        let tags: Vec<Tag> = children.iter().map(|c| self.tag(c)).collect();

        children
            .iter()
            .enumerate()
            .map(|(idx, child)| {
                let before = idx > 0 && tags[idx - 1] == Tag::Pause;
                let after = tags.get(idx + 1) == Some(&Tag::Pause);
                self.classify(*child, tags[idx], before, after)
            })
            .collect()
    }

    fn classify(&self, node: XmlNode, tag: Tag, pause_before: bool, pause_after: bool) -> Node {
        match tag {
            Tag::Word | Tag::Unclear | Tag::Vocal | Tag::Deletion | Tag::Gap => {
                let target = if tag == Tag::Unclear {
                    match node.first_element_child() {
                        Some(inner) => inner,
                        None => {
                            debug!("empty unclear element at {:?}", node.range());
                            return Node::Ignored;
                        }
                    }
                } else {
                    node
                };

                let flags = TokenFlags {
                    unclear: tag == Tag::Unclear,
                    truncated: tag == Tag::Deletion,
                    vocal: tag == Tag::Vocal,
                    unintelligible: tag == Tag::Gap,
                    pause_before,
                    pause_after,
                };
                Node::Token(self.token(target, flags))
            }
            Tag::Incident => Node::Incident {
                description: node
                    .descendants()
                    .find(|d| d.is_element() && d.tag_name().name() == "desc")
                    .and_then(|d| d.text())
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            },
            Tag::Pause => Node::Pause,
            Tag::Other => Node::Ignored,
        }
    }

    fn token(&self, node: XmlNode, flags: TokenFlags) -> TokenNode {
        // first child's text, else own text
        let form = match node
            .first_element_child()
            .and_then(|c| c.text())
            .filter(|t| !t.trim().is_empty())
        {
            Some(text) => text.to_string(),
            None => node
                .children()
                .filter(|c| c.is_text())
                .filter_map(|c| c.text())
                .collect(),
        };
        let attribute = |name: &str| node.attribute(name).unwrap_or_default().trim().to_string();

        TokenNode {
            form: form.trim().to_string(),
            lemma: attribute(&self.lemma_attribute),
            xpos: attribute(&self.xpos_attribute),
            flags,
        }
    }
}

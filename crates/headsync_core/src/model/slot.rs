//! Head slot identities and the ownership registry.
//!
//! # Invariants
//! - A slot maps to at most one owned node.
//! - Registry entries are only created by the synchronizer.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Fixed element id of the structured-data script.
pub const STRUCTURED_DATA_ID: &str = "page-structured-data";
/// MIME type of the structured-data script.
pub const STRUCTURED_DATA_TYPE: &str = "application/ld+json";
/// Constant `og:type` content.
pub const OG_TYPE_WEBSITE: &str = "website";
/// Constant `twitter:card` content.
pub const TWITTER_CARD_LARGE_IMAGE: &str = "summary_large_image";

/// Tag shape a slot is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotKind {
    /// `<meta name="..." content="...">`
    MetaName,
    /// `<meta property="..." content="...">`
    MetaProperty,
    /// `<link rel="..." href="...">`
    Link,
    /// `<script type="application/ld+json" id="...">text</script>`
    Script,
}

impl SlotKind {
    /// Element tag name.
    pub fn tag(self) -> &'static str {
        match self {
            Self::MetaName | Self::MetaProperty => "meta",
            Self::Link => "link",
            Self::Script => "script",
        }
    }

    /// Attribute that identifies the slot on its element.
    pub fn key_attribute(self) -> &'static str {
        match self {
            Self::MetaName => "name",
            Self::MetaProperty => "property",
            Self::Link => "rel",
            Self::Script => "id",
        }
    }

    /// Attribute that carries the written value. `None` means text content.
    pub fn value_attribute(self) -> Option<&'static str> {
        match self {
            Self::MetaName | Self::MetaProperty => Some("content"),
            Self::Link => Some("href"),
            Self::Script => None,
        }
    }
}

/// Logical tag identity `(kind, key)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadSlot {
    pub kind: SlotKind,
    pub key: &'static str,
}

impl HeadSlot {
    pub const DESCRIPTION: Self = Self::meta_name("description");
    pub const CANONICAL: Self = Self::link("canonical");
    pub const OG_TITLE: Self = Self::meta_property("og:title");
    pub const OG_DESCRIPTION: Self = Self::meta_property("og:description");
    pub const OG_TYPE: Self = Self::meta_property("og:type");
    pub const OG_URL: Self = Self::meta_property("og:url");
    pub const OG_IMAGE: Self = Self::meta_property("og:image");
    pub const TWITTER_CARD: Self = Self::meta_name("twitter:card");
    pub const TWITTER_TITLE: Self = Self::meta_name("twitter:title");
    pub const TWITTER_DESCRIPTION: Self = Self::meta_name("twitter:description");
    pub const TWITTER_IMAGE: Self = Self::meta_name("twitter:image");
    pub const STRUCTURED_DATA: Self = Self::script(STRUCTURED_DATA_ID);

    pub const fn meta_name(key: &'static str) -> Self {
        Self {
            kind: SlotKind::MetaName,
            key,
        }
    }

    pub const fn meta_property(key: &'static str) -> Self {
        Self {
            kind: SlotKind::MetaProperty,
            key,
        }
    }

    pub const fn link(key: &'static str) -> Self {
        Self {
            kind: SlotKind::Link,
            key,
        }
    }

    pub const fn script(key: &'static str) -> Self {
        Self {
            kind: SlotKind::Script,
            key,
        }
    }

    /// Every slot the synchronizer may own, in write order.
    pub fn managed() -> &'static [HeadSlot] {
        MANAGED_SLOTS
    }
}

const MANAGED_SLOTS: &[HeadSlot] = &[
    HeadSlot::DESCRIPTION,
    HeadSlot::CANONICAL,
    HeadSlot::OG_TITLE,
    HeadSlot::OG_DESCRIPTION,
    HeadSlot::OG_TYPE,
    HeadSlot::OG_URL,
    HeadSlot::OG_IMAGE,
    HeadSlot::TWITTER_CARD,
    HeadSlot::TWITTER_TITLE,
    HeadSlot::TWITTER_DESCRIPTION,
    HeadSlot::TWITTER_IMAGE,
    HeadSlot::STRUCTURED_DATA,
];

impl Display for HeadSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}=\"{}\"]",
            self.kind.tag(),
            self.kind.key_attribute(),
            self.key
        )
    }
}

/// Opaque handle to one node in a head store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Slot -> owned node mapping.
#[derive(Debug, Default, Clone)]
pub struct SlotRegistry {
    owned: BTreeMap<HeadSlot, NodeId>,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: &HeadSlot) -> Option<NodeId> {
        self.owned.get(slot).copied()
    }

    /// Records ownership; returns the node previously owned for the slot.
    pub fn insert(&mut self, slot: HeadSlot, node: NodeId) -> Option<NodeId> {
        self.owned.insert(slot, node)
    }

    pub fn remove(&mut self, slot: &HeadSlot) -> Option<NodeId> {
        self.owned.remove(slot)
    }

    pub fn contains(&self, slot: &HeadSlot) -> bool {
        self.owned.contains_key(slot)
    }

    pub fn len(&self) -> usize {
        self.owned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeadSlot, &NodeId)> {
        self.owned.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{HeadSlot, NodeId, SlotKind, SlotRegistry};

    #[test]
    fn slot_display_matches_selector_shape() {
        assert_eq!(HeadSlot::CANONICAL.to_string(), r#"link[rel="canonical"]"#);
        assert_eq!(
            HeadSlot::OG_TITLE.to_string(),
            r#"meta[property="og:title"]"#
        );
        assert_eq!(
            HeadSlot::STRUCTURED_DATA.to_string(),
            r#"script[id="page-structured-data"]"#
        );
    }

    #[test]
    fn value_attribute_depends_on_kind() {
        assert_eq!(SlotKind::MetaName.value_attribute(), Some("content"));
        assert_eq!(SlotKind::Link.value_attribute(), Some("href"));
        assert_eq!(SlotKind::Script.value_attribute(), None);
    }

    #[test]
    fn managed_slots_are_unique() {
        let mut slots = HeadSlot::managed().to_vec();
        let total = slots.len();
        slots.sort();
        slots.dedup();
        assert_eq!(slots.len(), total);
    }

    #[test]
    fn registry_keeps_one_node_per_slot() {
        let mut registry = SlotRegistry::new();
        assert!(registry.insert(HeadSlot::DESCRIPTION, NodeId(1)).is_none());
        assert_eq!(
            registry.insert(HeadSlot::DESCRIPTION, NodeId(2)),
            Some(NodeId(1))
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&HeadSlot::DESCRIPTION), Some(NodeId(2)));

        assert_eq!(registry.remove(&HeadSlot::DESCRIPTION), Some(NodeId(2)));
        assert!(registry.is_empty());
    }
}

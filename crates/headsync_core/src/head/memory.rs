//! In-memory head store.
//!
//! Mirrors the observable parts of a document head (title, ordered tag nodes)
//! so synchronizer behavior can be exercised without a browser.

use crate::head::{HeadStore, HeadStoreError, HeadStoreResult};
use crate::model::slot::{HeadSlot, NodeId, SlotKind, STRUCTURED_DATA_TYPE};
use std::collections::BTreeMap;

/// One tag node held by `MemoryHeadStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryNode {
    pub slot: HeadSlot,
    /// `None` until the first write.
    pub value: Option<String>,
}

/// Head store backed by ordered in-memory nodes.
#[derive(Debug, Default, Clone)]
pub struct MemoryHeadStore {
    title: String,
    // NodeId values are allocated monotonically, so key order is document order.
    nodes: BTreeMap<NodeId, MemoryNode>,
    next_id: u64,
}

impl MemoryHeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pre-existing node as if another agent had added it.
    pub fn inject(&mut self, slot: HeadSlot, value: impl Into<String>) -> NodeId {
        let id = self.allocate(slot);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.value = Some(value.into());
        }
        id
    }

    /// Value of the first node matching `slot`.
    pub fn value(&self, slot: &HeadSlot) -> Option<&str> {
        self.nodes
            .values()
            .find(|node| node.slot == *slot)
            .and_then(|node| node.value.as_deref())
    }

    pub fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(&id)
    }

    /// Total number of tag nodes (title excluded).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &MemoryNode)> {
        self.nodes.iter()
    }

    /// Serializes the head as HTML, one element per line.
    pub fn render_html(&self) -> String {
        let mut lines = vec![format!("<title>{}</title>", escape_html(&self.title))];
        for node in self.nodes.values() {
            lines.push(render_node(node));
        }
        lines.join("\n")
    }

    fn allocate(&mut self, slot: HeadSlot) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(id, MemoryNode { slot, value: None });
        id
    }
}

impl HeadStore for MemoryHeadStore {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn find_first(&self, slot: &HeadSlot) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.slot == *slot)
            .map(|(id, _)| *id)
    }

    fn create(&mut self, slot: &HeadSlot) -> HeadStoreResult<NodeId> {
        Ok(self.allocate(*slot))
    }

    fn write(&mut self, node: NodeId, value: &str) -> HeadStoreResult<()> {
        let entry = self
            .nodes
            .get_mut(&node)
            .ok_or(HeadStoreError::Detached(node))?;
        entry.value = Some(value.to_string());
        Ok(())
    }

    fn remove(&mut self, node: NodeId) -> bool {
        self.nodes.remove(&node).is_some()
    }

    fn count(&self, slot: &HeadSlot) -> usize {
        self.nodes.values().filter(|node| node.slot == *slot).count()
    }
}

fn render_node(node: &MemoryNode) -> String {
    let kind = node.slot.kind;
    let value = node.value.as_deref().unwrap_or_default();
    match kind {
        SlotKind::Script => format!(
            r#"<script type="{STRUCTURED_DATA_TYPE}" id="{}">{value}</script>"#,
            node.slot.key
        ),
        _ => format!(
            r#"<{} {}="{}" {}="{}">"#,
            kind.tag(),
            kind.key_attribute(),
            node.slot.key,
            kind.value_attribute().unwrap_or("content"),
            escape_html(value)
        ),
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

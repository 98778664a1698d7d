//! `HeadStore` bound to the live browser document.

use headsync_core::model::slot::{SlotKind, STRUCTURED_DATA_TYPE};
use headsync_core::{HeadSlot, HeadStore, HeadStoreError, HeadStoreResult, NodeId};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

struct TrackedElement {
    slot: HeadSlot,
    element: Element,
}

/// Document head adapter.
///
/// Elements are tracked by handle so ownership survives without re-querying;
/// selectors are only used to adopt pre-existing tags and to count.
pub struct DomHeadStore {
    document: Document,
    elements: RefCell<BTreeMap<NodeId, TrackedElement>>,
    next_id: Cell<u64>,
}

impl DomHeadStore {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            elements: RefCell::new(BTreeMap::new()),
            next_id: Cell::new(0),
        }
    }

    /// Adapter over `window.document`, if running in a window context.
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::new(document))
    }

    fn track(&self, slot: HeadSlot, element: Element) -> NodeId {
        let mut elements = self.elements.borrow_mut();
        elements.retain(|_, tracked| tracked.element.is_connected());
        if let Some((id, _)) = elements
            .iter()
            .find(|(_, tracked)| tracked.element == element)
        {
            return *id;
        }
        let id = NodeId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        elements.insert(id, TrackedElement { slot, element });
        id
    }
}

impl HeadStore for DomHeadStore {
    fn set_title(&mut self, title: &str) {
        self.document.set_title(title);
    }

    fn title(&self) -> String {
        self.document.title()
    }

    fn find_first(&self, slot: &HeadSlot) -> Option<NodeId> {
        let element = self
            .document
            .query_selector(&slot.to_string())
            .ok()
            .flatten()?;
        Some(self.track(*slot, element))
    }

    fn create(&mut self, slot: &HeadSlot) -> HeadStoreResult<NodeId> {
        let head = self
            .document
            .head()
            .ok_or_else(|| HeadStoreError::Backend("document has no <head>".to_string()))?;
        let element = self
            .document
            .create_element(slot.kind.tag())
            .map_err(backend)?;
        element
            .set_attribute(slot.kind.key_attribute(), slot.key)
            .map_err(backend)?;
        if slot.kind == SlotKind::Script {
            element
                .set_attribute("type", STRUCTURED_DATA_TYPE)
                .map_err(backend)?;
        }
        head.append_child(&element).map_err(backend)?;
        Ok(self.track(*slot, element))
    }

    fn write(&mut self, node: NodeId, value: &str) -> HeadStoreResult<()> {
        let elements = self.elements.borrow();
        let tracked = elements
            .get(&node)
            .filter(|tracked| tracked.element.is_connected())
            .ok_or(HeadStoreError::Detached(node))?;
        match tracked.slot.kind.value_attribute() {
            Some(name) => tracked.element.set_attribute(name, value).map_err(backend),
            None => {
                tracked.element.set_text_content(Some(value));
                Ok(())
            }
        }
    }

    fn remove(&mut self, node: NodeId) -> bool {
        let Some(tracked) = self.elements.borrow_mut().remove(&node) else {
            return false;
        };
        let attached = tracked.element.is_connected();
        tracked.element.remove();
        attached
    }

    fn forget(&mut self, node: NodeId) {
        self.elements.borrow_mut().remove(&node);
    }

    fn count(&self, slot: &HeadSlot) -> usize {
        self.document
            .query_selector_all(&slot.to_string())
            .map(|list| list.length() as usize)
            .unwrap_or(0)
    }
}

fn backend(err: JsValue) -> HeadStoreError {
    HeadStoreError::Backend(format!("{err:?}"))
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Display visibility as an ownership tree.
//!
//! Every display (the clock window, its settings and help panels, ...) is a
//! node in a [`DisplayTree`].  [`DisplayTree::set_visible`] is the single
//! entry point: showing a node affects only that node, hiding it hides its
//! whole subtree depth-first.  Observers subscribed to a node are called with
//! the new value every time that node's visibility is set, including by a
//! cascade.

use std::fmt;

/// Handle to a node of a [`DisplayTree`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DisplayId(usize);

/// Handle returned by [`DisplayTree::subscribe`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct DisplayNode {
    name: String,
    visible: bool,
    parent: Option<DisplayId>,
    children: Vec<DisplayId>,
}

struct Observer {
    id: ObserverId,
    node: DisplayId,
    callback: Box<dyn FnMut(bool)>,
}

/// Standard overlay displays built by [`DisplayTree::overlay`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OverlayDisplays {
    pub main: DisplayId,
    pub settings: DisplayId,
    pub help: DisplayId,
}

/// Arena of display nodes.  All nodes start hidden.
#[derive(Default)]
pub struct DisplayTree {
    nodes: Vec<DisplayNode>,
    observers: Vec<Observer>,
    next_observer: u64,
}

impl fmt::Debug for DisplayTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for node in &self.nodes {
            list.entry(&(node.name.as_str(), node.visible));
        }
        list.finish()
    }
}

impl DisplayTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// The clock window with its settings and help panels as children.
    pub fn overlay() -> (Self, OverlayDisplays) {
        let mut tree = Self::new();
        let main = tree.add_root("main");
        let settings = tree.add_child(main, "settings");
        let help = tree.add_child(main, "help");
        (tree, OverlayDisplays { main, settings, help })
    }

    pub fn add_root(&mut self, name: impl Into<String>) -> DisplayId {
        self.push(name.into(), None)
    }

    pub fn add_child(&mut self, parent: DisplayId, name: impl Into<String>) -> DisplayId {
        let id = self.push(name.into(), Some(parent));
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(id);
        }
        id
    }

    fn push(&mut self, name: String, parent: Option<DisplayId>) -> DisplayId {
        let id = DisplayId(self.nodes.len());
        self.nodes.push(DisplayNode {
            name,
            visible: false,
            parent,
            children: Vec::new(),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<DisplayId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(DisplayId)
    }

    pub fn name(&self, id: DisplayId) -> Option<&str> {
        self.nodes.get(id.0).map(|n| n.name.as_str())
    }

    pub fn parent(&self, id: DisplayId) -> Option<DisplayId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: DisplayId) -> &[DisplayId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// `false` for unknown handles.
    pub fn is_visible(&self, id: DisplayId) -> bool {
        self.nodes.get(id.0).is_some_and(|n| n.visible)
    }

    /// Show or hide `id`.  Hiding cascades to every descendant, parents
    /// before children.
    pub fn set_visible(&mut self, id: DisplayId, visible: bool) {
        if id.0 >= self.nodes.len() {
            tracing::warn!(?id, "set_visible on unknown display");
            return;
        }
        if visible {
            self.assign(id, true);
            return;
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            self.assign(next, false);
            stack.extend(self.nodes[next.0].children.iter().rev().copied());
        }
    }

    /// Flip `id` and return its new visibility.
    pub fn toggle(&mut self, id: DisplayId) -> bool {
        let visible = !self.is_visible(id);
        self.set_visible(id, visible);
        self.is_visible(id)
    }

    /// Call `callback` with the new value whenever `id`'s visibility is set.
    pub fn subscribe(&mut self, id: DisplayId, callback: impl FnMut(bool) + 'static) -> ObserverId {
        let observer = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push(Observer {
            id: observer,
            node: id,
            callback: Box::new(callback),
        });
        observer
    }

    /// Remove an observer; returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, observer: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id != observer);
        self.observers.len() != before
    }

    fn assign(&mut self, id: DisplayId, visible: bool) {
        let node = &mut self.nodes[id.0];
        if node.visible != visible {
            tracing::trace!(display = %node.name, visible, "display visibility changed");
        }
        node.visible = visible;
        for observer in self.observers.iter_mut().filter(|o| o.node == id) {
            (observer.callback)(visible);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_overlay_starts_hidden() {
        let (tree, ids) = DisplayTree::overlay();
        assert_eq!(tree.len(), 3);
        assert!(!tree.is_visible(ids.main));
        assert_eq!(tree.children(ids.main), &[ids.settings, ids.help]);
        assert_eq!(tree.parent(ids.help), Some(ids.main));
        assert_eq!(tree.find("settings"), Some(ids.settings));
        assert_eq!(tree.name(ids.help), Some("help"));
    }

    #[test]
    fn showing_does_not_cascade() {
        let (mut tree, ids) = DisplayTree::overlay();
        tree.set_visible(ids.main, true);
        assert!(tree.is_visible(ids.main));
        assert!(!tree.is_visible(ids.settings));
        assert!(!tree.is_visible(ids.help));
    }

    #[test]
    fn hiding_cascades_depth_first() {
        let (mut tree, ids) = DisplayTree::overlay();
        let nested = tree.add_child(ids.settings, "advanced");
        for id in [ids.main, ids.settings, ids.help, nested] {
            tree.set_visible(id, true);
        }

        let order = Rc::new(RefCell::new(Vec::new()));
        for id in [ids.main, ids.settings, nested, ids.help] {
            let order = Rc::clone(&order);
            tree.subscribe(id, move |v| order.borrow_mut().push((id, v)));
        }

        tree.set_visible(ids.main, false);
        assert!(!tree.is_visible(ids.settings));
        assert!(!tree.is_visible(ids.help));
        assert!(!tree.is_visible(nested));
        assert_eq!(
            *order.borrow(),
            vec![
                (ids.main, false),
                (ids.settings, false),
                (nested, false),
                (ids.help, false)
            ]
        );
    }

    #[test]
    fn hiding_a_child_leaves_parent() {
        let (mut tree, ids) = DisplayTree::overlay();
        tree.set_visible(ids.main, true);
        tree.set_visible(ids.settings, true);
        tree.set_visible(ids.settings, false);
        assert!(tree.is_visible(ids.main));
    }

    #[test]
    fn test_toggle_and_unsubscribe() {
        let (mut tree, ids) = DisplayTree::overlay();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let observer = tree.subscribe(ids.main, move |v| sink.borrow_mut().push(v));

        assert!(tree.toggle(ids.main));
        assert!(!tree.toggle(ids.main));
        assert!(tree.unsubscribe(observer));
        assert!(!tree.unsubscribe(observer));
        tree.toggle(ids.main);

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn unknown_handles_are_ignored() {
        let (mut tree, _) = DisplayTree::overlay();
        let other = DisplayId(99);
        tree.set_visible(other, true);
        assert!(!tree.is_visible(other));
        assert!(tree.children(other).is_empty());
    }
}

//! Per-session interaction state
//!
//! Drag state machine:
//!
//! ```text
//! Idle --drag_start(node)--> Dragging(node, pos)
//! Dragging --drag_move(pos)--> Dragging(node, pos)
//! Dragging --drag_end--> Idle
//! ```
//!
//! Dragging pins the node, so the layout simulator leaves it alone. The
//! state only touches node positions and pins; it never adds or removes
//! nodes or edges.

use std::collections::{BTreeSet, HashSet};

use crate::domain::document::RelationshipType;
use crate::domain::graph::{GraphEdge, KnowledgeGraph, Position};

use super::viewport::Viewport;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        node_id: String,
        /// World coordinate last assigned to the node
        position: Position,
    },
}

/// Drag, viewport, edge filter, selection and hover for one view
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    drag: DragState,
    viewport: Viewport,
    /// `None` shows every relationship type
    relationship_filter: Option<BTreeSet<RelationshipType>>,
    selected: Option<String>,
    hovered: Option<String>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn dragged_node(&self) -> Option<&str> {
        match &self.drag {
            DragState::Dragging { node_id, .. } => Some(node_id),
            DragState::Idle => None,
        }
    }

    /// Pin a node at its current position and start dragging it
    ///
    /// A drag already in progress is ended first. Returns false for unknown
    /// nodes.
    pub fn drag_start(&mut self, graph: &mut KnowledgeGraph, node_id: &str) -> bool {
        if !graph.contains_node(node_id) {
            return false;
        }
        self.drag_end(graph);

        let Some(node) = graph.node_mut(node_id) else {
            return false;
        };
        let position = node.position;
        node.pin(position);
        self.drag = DragState::Dragging {
            node_id: node_id.to_string(),
            position,
        };
        true
    }

    /// Move the dragged node to the world point under `screen`
    pub fn drag_move(&mut self, graph: &mut KnowledgeGraph, screen: Position) -> bool {
        let world = self.viewport.screen_to_world(screen);
        let DragState::Dragging { node_id, position } = &mut self.drag else {
            return false;
        };

        match graph.node_mut(node_id) {
            Some(node) => {
                node.pin(world);
                *position = world;
                true
            }
            None => {
                // the graph was rebuilt without this node
                self.drag = DragState::Idle;
                false
            }
        }
    }

    /// Release the pin and return to idle
    pub fn drag_end(&mut self, graph: &mut KnowledgeGraph) -> bool {
        match std::mem::take(&mut self.drag) {
            DragState::Dragging { node_id, .. } => {
                if let Some(node) = graph.node_mut(&node_id) {
                    node.unpin();
                }
                true
            }
            DragState::Idle => false,
        }
    }

    /// Re-apply the drag pin to a freshly built graph
    ///
    /// A rebuilt graph starts without pins. Call this before running the
    /// layout so the dragged node stays where the pointer left it. If the
    /// node no longer exists the drag is abandoned. Returns true when a pin
    /// was applied.
    pub fn apply_pins(&mut self, graph: &mut KnowledgeGraph) -> bool {
        let DragState::Dragging { node_id, position } = &self.drag else {
            return false;
        };

        match graph.node_mut(node_id) {
            Some(node) => {
                node.pin(*position);
                true
            }
            None => {
                self.drag = DragState::Idle;
                false
            }
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Show only edges of the given types
    pub fn set_relationship_filter(&mut self, types: impl IntoIterator<Item = RelationshipType>) {
        self.relationship_filter = Some(types.into_iter().collect());
    }

    pub fn clear_relationship_filter(&mut self) {
        self.relationship_filter = None;
    }

    pub fn relationship_filter(&self) -> Option<&BTreeSet<RelationshipType>> {
        self.relationship_filter.as_ref()
    }

    pub fn is_edge_visible(&self, edge: &GraphEdge) -> bool {
        self.relationship_filter
            .as_ref()
            .is_none_or(|types| types.contains(&edge.edge_type))
    }

    pub fn visible_edges<'a>(&self, graph: &'a KnowledgeGraph) -> Vec<&'a GraphEdge> {
        graph
            .edges()
            .iter()
            .filter(|e| self.is_edge_visible(e))
            .collect()
    }

    pub fn select(&mut self, node_id: Option<String>) {
        self.selected = node_id;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn hover(&mut self, node_id: Option<String>) {
        self.hovered = node_id;
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// The selected node plus its neighbours through visible edges
    pub fn highlighted_nodes<'a>(&self, graph: &'a KnowledgeGraph) -> HashSet<&'a str> {
        let Some(selected) = self.selected.as_deref().and_then(|id| graph.node(id)) else {
            return HashSet::new();
        };

        let mut highlighted = HashSet::from([selected.id.as_str()]);
        for edge in graph.edges_of(&selected.id) {
            if !self.is_edge_visible(edge) {
                continue;
            }
            if let Some(other) = edge.other_end(&selected.id) {
                highlighted.insert(other);
            }
        }
        highlighted
    }
}

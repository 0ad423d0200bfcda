//! Force-directed layout
//!
//! A fixed number of iterations with linear cooling:
//!
//! - pairwise repulsion `repulsion / d²`, with `d` floored at 1
//! - edge attraction `d × weight × attraction` along the edge
//! - centering `(center − p) × centering`
//!
//! Velocities are recomputed each iteration, scaled by the cooling factor and
//! integrated into positions. Pinned nodes never move.

use std::collections::HashMap;
use std::f32::consts::TAU;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::domain::graph::{KnowledgeGraph, Position};

use super::canvas::Canvas;

/// Distance floor for repulsion
const MIN_DISTANCE: f32 = 1.0;

/// Runs the force simulation over a graph snapshot
#[derive(Debug)]
pub struct ForceLayout {
    config: LayoutConfig,
    rng: StdRng,
}

impl ForceLayout {
    /// Create a layout with entropy-seeded initial placement
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a layout with a fixed seed (reproducible placement)
    pub fn with_seed(config: LayoutConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Position every node of `graph` inside `canvas`
    ///
    /// Nodes found in `prior` start from that position; the rest start at a
    /// random point on the canvas. Pinned nodes stay at their pinned coordinate.
    pub fn run(
        &mut self,
        graph: &mut KnowledgeGraph,
        canvas: &Canvas,
        prior: &HashMap<String, Position>,
    ) {
        if graph.is_empty() {
            debug!("Empty graph, nothing to lay out");
            return;
        }

        let mut seeded = 0usize;
        for node in graph.nodes_mut() {
            node.position = match (node.pinned, prior.get(&node.id)) {
                (Some(pinned), _) => pinned,
                (None, Some(previous)) => {
                    seeded += 1;
                    *previous
                }
                (None, None) => canvas.random_position(&mut self.rng),
            };
        }

        let springs: Vec<(usize, usize, f32)> = graph
            .edges()
            .iter()
            .filter_map(|edge| {
                let source = graph.node_index(&edge.source_node_id)?;
                let target = graph.node_index(&edge.target_node_id)?;
                (source != target).then_some((source, target, edge.weight))
            })
            .collect();

        let iterations = self.config.iterations;
        for i in 0..iterations {
            let alpha = self.config.alpha * (1.0 - i as f32 / iterations as f32);
            self.step(graph, &springs, canvas, alpha);
        }

        if iterations == 0 {
            clamp_unpinned(graph, canvas);
        }

        debug!(
            nodes = graph.node_count(),
            springs = springs.len(),
            iterations,
            seeded_from_prior = seeded,
            "Layout simulation complete"
        );
    }

    fn step(
        &self,
        graph: &mut KnowledgeGraph,
        springs: &[(usize, usize, f32)],
        canvas: &Canvas,
        alpha: f32,
    ) {
        let positions: Vec<Position> = graph.nodes().iter().map(|n| n.position).collect();
        let count = positions.len();
        let mut velocity = vec![[0.0f32; 2]; count];

        for i in 0..count {
            for j in (i + 1)..count {
                let dx = positions[i].x - positions[j].x;
                let dy = positions[i].y - positions[j].y;
                let distance = (dx * dx + dy * dy).sqrt();
                let (ux, uy) = if distance > f32::EPSILON {
                    (dx / distance, dy / distance)
                } else {
                    // coincident nodes: spread along a golden-angle direction
                    let angle = ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * TAU;
                    (angle.cos(), angle.sin())
                };

                let d = distance.max(MIN_DISTANCE);
                let force = self.config.repulsion / (d * d);
                velocity[i][0] += ux * force;
                velocity[i][1] += uy * force;
                velocity[j][0] -= ux * force;
                velocity[j][1] -= uy * force;
            }
        }

        for &(source, target, weight) in springs {
            let dx = positions[target].x - positions[source].x;
            let dy = positions[target].y - positions[source].y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance <= f32::EPSILON {
                continue;
            }

            let force = distance * weight * self.config.attraction;
            let (ux, uy) = (dx / distance, dy / distance);
            velocity[source][0] += ux * force;
            velocity[source][1] += uy * force;
            velocity[target][0] -= ux * force;
            velocity[target][1] -= uy * force;
        }

        let center = canvas.center();
        for (v, p) in velocity.iter_mut().zip(&positions) {
            v[0] += (center.x - p.x) * self.config.centering;
            v[1] += (center.y - p.y) * self.config.centering;
        }

        for (node, v) in graph.nodes_mut().iter_mut().zip(&velocity) {
            if let Some(pinned) = node.pinned {
                node.position = pinned;
                continue;
            }
            let next = Position::new(
                node.position.x + v[0] * alpha,
                node.position.y + v[1] * alpha,
            );
            node.position = canvas.clamp(next);
        }
    }
}

fn clamp_unpinned(graph: &mut KnowledgeGraph, canvas: &Canvas) {
    for node in graph.nodes_mut() {
        if !node.is_pinned() {
            node.position = canvas.clamp(node.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::RelationshipType;
    use crate::domain::graph::{GraphEdge, GraphNode, NodeKind};

    fn triangle() -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new();
        for id in ["a", "b", "c"] {
            graph.add_node(GraphNode::new(id, id, NodeKind::Document));
        }
        graph.add_edge(GraphEdge::new("a", "b", RelationshipType::References, 0.5));
        graph.add_edge(GraphEdge::new("b", "c", RelationshipType::References, 0.5));
        graph
    }

    #[test]
    fn test_nodes_stay_within_margins() {
        let canvas = Canvas::new(1200.0, 800.0, 50.0);
        let mut graph = triangle();
        ForceLayout::new(LayoutConfig::default()).run(&mut graph, &canvas, &HashMap::new());

        for node in graph.nodes() {
            assert!((50.0..=1150.0).contains(&node.position.x), "{:?}", node);
            assert!((50.0..=750.0).contains(&node.position.y), "{:?}", node);
        }
    }

    #[test]
    fn test_pinned_node_keeps_its_coordinate() {
        let canvas = Canvas::new(1200.0, 800.0, 50.0);
        let mut graph = triangle();
        // outside the margins on purpose; pins are never clamped
        graph.node_mut("b").unwrap().pin(Position::new(10.0, 5.0));

        ForceLayout::with_seed(LayoutConfig::default(), 3).run(&mut graph, &canvas, &HashMap::new());
        assert_eq!(graph.node("b").unwrap().position, Position::new(10.0, 5.0));
    }

    #[test]
    fn test_seeded_layout_is_reproducible() {
        let canvas = Canvas::default();
        let mut first = triangle();
        let mut second = triangle();
        ForceLayout::with_seed(LayoutConfig::default(), 42).run(&mut first, &canvas, &HashMap::new());
        ForceLayout::with_seed(LayoutConfig::default(), 42).run(&mut second, &canvas, &HashMap::new());
        assert_eq!(first.positions(), second.positions());
    }

    #[test]
    fn test_prior_positions_seed_the_simulation() {
        let config = LayoutConfig {
            iterations: 1,
            alpha: 0.0,
            ..LayoutConfig::default()
        };
        let prior = HashMap::from([
            ("a".to_string(), Position::new(100.0, 100.0)),
            ("b".to_string(), Position::new(200.0, 300.0)),
            ("c".to_string(), Position::new(900.0, 600.0)),
        ]);

        let mut graph = triangle();
        ForceLayout::new(config).run(&mut graph, &Canvas::default(), &prior);
        assert_eq!(graph.positions(), prior);
    }

    #[test]
    fn test_coincident_nodes_are_pushed_apart() {
        let config = LayoutConfig {
            iterations: 10,
            attraction: 0.0,
            centering: 0.0,
            ..LayoutConfig::default()
        };
        let prior = HashMap::from([
            ("a".to_string(), Position::new(600.0, 400.0)),
            ("b".to_string(), Position::new(600.0, 400.0)),
            ("c".to_string(), Position::new(300.0, 200.0)),
        ]);

        let mut graph = triangle();
        ForceLayout::new(config).run(&mut graph, &Canvas::default(), &prior);
        let a = graph.node("a").unwrap().position;
        let b = graph.node("b").unwrap().position;
        assert!(a.distance_to(b) > 1.0);
    }

    #[test]
    fn test_tiny_canvas_and_empty_graph() {
        let mut graph = triangle();
        let canvas = Canvas::new(20.0, 20.0, 50.0);
        ForceLayout::with_seed(LayoutConfig::default(), 1).run(&mut graph, &canvas, &HashMap::new());
        assert!(graph.nodes().iter().all(|n| n.position == Position::new(10.0, 10.0)));

        let mut empty = KnowledgeGraph::new();
        ForceLayout::new(LayoutConfig::default()).run(&mut empty, &canvas, &HashMap::new());
        assert!(empty.is_empty());
    }
}

//! Deterministic seeding and final rescale into the drawing space.

use crate::error::Result;
use crate::graph::Graph;
use crate::vector::Vector;
use crate::{LayoutEngine, check_positions, check_space};

/// Places vertex `u` at angle `2π·u/n` on the ellipse inscribed in the
/// drawing space. Topology-independent and seed-free, so every run starts
/// from the same configuration. Axes beyond the second stay at the midpoint.
#[derive(Debug, Clone)]
pub struct CirclePlacement<const D: usize> {
    pub space: [f64; D],
}

impl<const D: usize> CirclePlacement<D> {
    pub fn new(space: [f64; D]) -> Self {
        Self { space }
    }
}

impl<const D: usize> LayoutEngine<D> for CirclePlacement<D> {
    fn run(&self, graph: &Graph, positions: &mut [Vector<D>]) -> Result<()> {
        check_positions(graph, positions)?;
        check_space(&self.space)?;

        let n = graph.vertex_count();
        for u in 0..n {
            let angle = 2.0 * std::f64::consts::PI * u as f64 / n as f64;
            for dim in 0..D {
                positions[u][dim] = self.space[dim] / 2.0;
            }
            if D >= 1 {
                positions[u][0] += self.space[0] / 2.0 * angle.cos();
            }
            if D >= 2 {
                positions[u][1] += self.space[1] / 2.0 * angle.sin();
            }
        }
        Ok(())
    }
}

/// Affinely maps each axis's coordinate range onto `[0, space[axis]]`.
///
/// An axis on which every vertex shares one coordinate has no range to
/// stretch; such points land on the axis midpoint instead of dividing by
/// zero.
pub fn normalize_to_space<const D: usize>(positions: &mut [Vector<D>], space: &[f64; D]) {
    if positions.is_empty() {
        return;
    }
    for dim in 0..D {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in positions.iter() {
            min = min.min(p[dim]);
            max = max.max(p[dim]);
        }
        let width = max - min;
        for p in positions.iter_mut() {
            p[dim] = if width > 0.0 {
                (p[dim] - min) / width * space[dim]
            } else {
                space[dim] / 2.0
            };
        }
    }
}

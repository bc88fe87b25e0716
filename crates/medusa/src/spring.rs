//! Spring-electrical layout engines.
//!
//! Both engines run a fixed number of iterations with a linearly decreasing
//! displacement cap (the cooling temperature). Within one iteration all
//! forces are accumulated from the position snapshot taken at its start and
//! only then applied, so no vertex observes another's in-progress move.

use crate::error::Result;
use crate::graph::Graph;
use crate::kdtree::KdTree;
use crate::options::{self, Options};
use crate::vector::Vector;
use crate::{DEFAULT_OPENING_ANGLE, LayoutEngine, check_positions, check_space};

/// Fruchterman-Reingold style simulation.
///
/// Repulsion `k²/d` between every vertex pair, attraction `d²/k` along every
/// edge, with `k = sqrt(area)/n`. Positions are clamped into the drawing
/// bounds per axis after each move.
#[derive(Debug, Clone)]
pub struct SpringElectrical<const D: usize> {
    pub space: [f64; D],
    pub iterations: usize,
    pub use_spatial_approximation: bool,
    pub opening_angle: f64,
}

impl<const D: usize> SpringElectrical<D> {
    pub fn new(space: [f64; D]) -> Self {
        Self {
            space,
            iterations: 100,
            use_spatial_approximation: false,
            opening_angle: DEFAULT_OPENING_ANGLE,
        }
    }

    pub fn configure(&mut self, options: &Options) -> Result<()> {
        if let Some(v) = options::parse_usize(options, "iterations")? {
            self.iterations = v;
        }
        if let Some(v) = options::parse_bool(options, "use_spatial_approximation")? {
            self.use_spatial_approximation = v;
        }
        if let Some(v) = options::parse_positive_f64(options, "opening_angle")? {
            self.opening_angle = v;
        }
        Ok(())
    }
}

impl<const D: usize> LayoutEngine<D> for SpringElectrical<D> {
    fn run(&self, graph: &Graph, positions: &mut [Vector<D>]) -> Result<()> {
        check_positions(graph, positions)?;
        check_space(&self.space)?;

        let n = graph.vertex_count();
        if n == 0 {
            return Ok(());
        }
        let area: f64 = self.space.iter().product();
        let k = area.sqrt() / n as f64;
        let min_extent = self.space.iter().copied().fold(f64::INFINITY, f64::min);
        tracing::debug!(
            n,
            k,
            iterations = self.iterations,
            approximate = self.use_spatial_approximation,
            "spring-electrical layout"
        );

        let attractive = |d: f64| d * d / k;
        let repulsive = |d: f64| k * k / d;

        let mut velocity = vec![Vector::<D>::zero(); n];
        for i in (1..=self.iterations).rev() {
            let temperature = min_extent * i as f64 / self.iterations as f64;
            for v in velocity.iter_mut() {
                *v = Vector::zero();
            }

            if self.use_spatial_approximation {
                let tree = KdTree::build(positions, self.opening_angle);
                for u in 0..n {
                    velocity[u] += tree.repulsion(positions[u]) * (k * k);
                }
            } else {
                for u in 0..n {
                    for v in 0..n {
                        if u == v {
                            continue;
                        }
                        let diff = positions[v] - positions[u];
                        let d = diff.norm();
                        if d > 0.0 {
                            velocity[u] -= diff.unit() * repulsive(d);
                        }
                    }
                }
            }

            for u in 0..n {
                for &(v, _) in graph.neighbors(u) {
                    if v == u {
                        continue;
                    }
                    let diff = positions[v] - positions[u];
                    velocity[u] += diff.unit() * attractive(diff.norm());
                }
            }

            for u in 0..n {
                let speed = velocity[u].norm();
                if speed > 0.0 {
                    positions[u] += velocity[u].unit() * speed.min(temperature);
                }
                for dim in 0..D {
                    positions[u][dim] = positions[u][dim].clamp(0.0, self.space[dim]);
                }
            }
        }
        Ok(())
    }
}

/// Scaled spring-electrical variant (Walshaw's model).
///
/// Separates the ideal-distance scale (`separation_constant`, applied to the
/// Dim-th-root area term) from the strength of the global repulsive field
/// (`force_constant`), and divides each edge-spring pull by the vertex
/// degree so hubs are not dragged disproportionately.
#[derive(Debug, Clone)]
pub struct ScaledSpring<const D: usize> {
    pub space: [f64; D],
    pub iterations: usize,
    pub separation_constant: f64,
    pub force_constant: f64,
    pub use_spatial_approximation: bool,
    pub opening_angle: f64,
}

impl<const D: usize> ScaledSpring<D> {
    pub fn new(space: [f64; D]) -> Self {
        Self {
            space,
            iterations: 50,
            separation_constant: 2.0,
            force_constant: 0.01,
            use_spatial_approximation: true,
            opening_angle: DEFAULT_OPENING_ANGLE,
        }
    }

    pub fn configure(&mut self, options: &Options) -> Result<()> {
        if let Some(v) = options::parse_usize(options, "iterations")? {
            self.iterations = v;
        }
        if let Some(v) = options::parse_positive_f64(options, "separation_constant")? {
            self.separation_constant = v;
        }
        if let Some(v) = options::parse_positive_f64(options, "force_constant")? {
            self.force_constant = v;
        }
        if let Some(v) = options::parse_bool(options, "use_spatial_approximation")? {
            self.use_spatial_approximation = v;
        }
        if let Some(v) = options::parse_positive_f64(options, "opening_angle")? {
            self.opening_angle = v;
        }
        Ok(())
    }
}

impl<const D: usize> LayoutEngine<D> for ScaledSpring<D> {
    fn run(&self, graph: &Graph, positions: &mut [Vector<D>]) -> Result<()> {
        check_positions(graph, positions)?;
        check_space(&self.space)?;

        let n = graph.vertex_count();
        if n == 0 {
            return Ok(());
        }
        let area: f64 = self.space.iter().product();
        let k = self.separation_constant * (area / n as f64).powf(1.0 / D as f64);
        let min_extent = self.space.iter().copied().fold(f64::INFINITY, f64::min);
        tracing::debug!(
            n,
            k,
            iterations = self.iterations,
            approximate = self.use_spatial_approximation,
            "scaled spring-electrical layout"
        );

        // Global repulsive field; negative, so it pushes along -diff.
        let global = |d: f64| -(k * k / d) * self.force_constant;

        let mut velocity = vec![Vector::<D>::zero(); n];
        for i in (1..=self.iterations).rev() {
            let temperature = min_extent * i as f64 / self.iterations as f64;
            for v in velocity.iter_mut() {
                *v = Vector::zero();
            }

            if self.use_spatial_approximation {
                let tree = KdTree::build(positions, self.opening_angle);
                for u in 0..n {
                    velocity[u] +=
                        tree.repulsion(positions[u]) * (k * k * self.force_constant);
                }
            } else {
                for u in 0..n {
                    for v in 0..n {
                        if u == v {
                            continue;
                        }
                        let diff = positions[v] - positions[u];
                        let d = diff.norm();
                        if d > 0.0 {
                            velocity[u] += diff.unit() * global(d);
                        }
                    }
                }
            }

            for u in 0..n {
                let degree = graph.degree(u) as f64;
                for &(v, _) in graph.neighbors(u) {
                    if v == u {
                        continue;
                    }
                    let diff = positions[v] - positions[u];
                    let d = diff.norm();
                    if d > 0.0 {
                        // The spring term replaces the global field between
                        // neighbors, hence the subtraction.
                        velocity[u] += diff.unit() * ((d - k) / degree - global(d));
                    }
                }
            }

            for u in 0..n {
                let speed = velocity[u].norm();
                if speed > 0.0 {
                    positions[u] += velocity[u].unit() * speed.min(temperature);
                }
            }
        }
        Ok(())
    }
}

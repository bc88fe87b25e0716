//! Stress-majorization layout (Kamada-Kawai pivot scheme).
//!
//! Vertex positions are optimized so Euclidean distances match
//! graph-theoretic target distances, minimizing
//! `Σ strength·(actual − target)²` over vertex pairs. The optimizer repeats
//! local Newton steps on the vertex with the largest energy gradient,
//! propagating that vertex's changed contribution to every other gradient
//! incrementally instead of recomputing the full gradient field.

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::options::{self, Options};
use crate::vector::Vector;
use crate::{LayoutEngine, check_positions, check_space};

// Determinants below this magnitude are treated as singular and yield a
// zero step instead of a non-finite position.
const SINGULAR_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone)]
pub struct StressMajorization<const D: usize> {
    pub space: [f64; D],
    pub tolerance: f64,
    pub spring_strength: f64,
}

impl<const D: usize> StressMajorization<D> {
    pub fn new(space: [f64; D]) -> Self {
        Self {
            space,
            tolerance: 1e-6,
            spring_strength: 1.0,
        }
    }

    pub fn configure(&mut self, options: &Options) -> Result<()> {
        if let Some(v) = options::parse_positive_f64(options, "tolerance")? {
            self.tolerance = v;
        }
        Ok(())
    }

    /// Total stress energy of `positions` under this engine's target
    /// distances. Exposed for diagnostics; the optimizer never evaluates it.
    pub fn energy(&self, graph: &Graph, positions: &[Vector<D>]) -> Result<f64> {
        check_positions(graph, positions)?;
        let targets = Targets::build(graph, &self.space, self.spring_strength);
        let n = graph.vertex_count();
        let mut total = 0.0;
        for u in 0..n {
            for v in u + 1..n {
                let strength = targets.strength[u][v];
                if strength == 0.0 {
                    continue;
                }
                let d = positions[u].dist(&positions[v]);
                let residual = d - targets.dist[u][v];
                total += 0.5 * strength * residual * residual;
            }
        }
        Ok(total)
    }
}

impl<const D: usize> LayoutEngine<D> for StressMajorization<D> {
    fn run(&self, graph: &Graph, positions: &mut [Vector<D>]) -> Result<()> {
        if !(1..=3).contains(&D) {
            return Err(Error::UnsupportedDimension { dim: D });
        }
        check_positions(graph, positions)?;
        check_space(&self.space)?;

        let n = graph.vertex_count();
        if n <= 1 {
            return Ok(());
        }
        let targets = Targets::build(graph, &self.space, self.spring_strength);
        tracing::debug!(n, tolerance = self.tolerance, "stress-majorization layout");

        // Full gradient once; afterwards only incremental updates.
        let mut partials: Vec<Vector<D>> = (0..n)
            .map(|u| gradient(&targets, positions, u))
            .collect();
        let mut pivot = 0;
        let mut max_delta = 0.0f64;
        for (u, p) in partials.iter().enumerate() {
            let delta = p.norm();
            if delta > max_delta {
                pivot = u;
                max_delta = delta;
            }
        }

        let mut global = ConvergenceTracker::new(self.tolerance);
        while !global.converged(max_delta) {
            tracing::trace!(pivot, max_delta, "pivot selected");

            // Snapshot the pivot's contribution to every other gradient
            // before moving it.
            let before: Vec<Vector<D>> = (0..n)
                .map(|u| partial(&targets, positions, u, pivot))
                .collect();

            // Newton steps on the pivot until its own gradient stabilizes.
            let mut local = ConvergenceTracker::new(self.tolerance);
            loop {
                let hessian = local_hessian(&targets, positions, pivot);
                let Some(step) = solve(&hessian, -partials[pivot]) else {
                    // Near-singular Hessian: keep the position as is.
                    break;
                };
                if !step.is_finite() {
                    break;
                }
                positions[pivot] += step;
                partials[pivot] = gradient(&targets, positions, pivot);
                max_delta = partials[pivot].norm();
                if local.converged(max_delta) {
                    break;
                }
            }

            // Replace the pivot's old contribution with the new one and pick
            // whichever vertex now carries the largest gradient.
            let moved = pivot;
            for u in 0..n {
                let after = partial(&targets, positions, u, moved);
                partials[u] += after - before[u];
                let delta = partials[u].norm();
                if delta > max_delta {
                    pivot = u;
                    max_delta = delta;
                }
            }
        }
        Ok(())
    }
}

/// Target distances and spring strengths derived once from the topology.
struct Targets {
    dist: Vec<Vec<f64>>,
    strength: Vec<Vec<f64>>,
}

impl Targets {
    fn build<const D: usize>(graph: &Graph, space: &[f64; D], spring_strength: f64) -> Self {
        let n = graph.vertex_count();
        let mut dist = vec![vec![f64::INFINITY; n]; n];
        let mut strength = vec![vec![0.0; n]; n];

        for u in 0..n {
            for &(v, w) in graph.neighbors(u) {
                dist[u][v] = dist[u][v].min(w);
                dist[v][u] = dist[v][u].min(w);
            }
        }
        for (u, row) in dist.iter_mut().enumerate() {
            row[u] = 0.0;
        }
        // Floyd-Warshall over intermediate pivots.
        for p in 0..n {
            for u in 0..n {
                if dist[u][p] == f64::INFINITY {
                    continue;
                }
                for v in 0..n {
                    let through = dist[u][p] + dist[p][v];
                    if through < dist[u][v] {
                        dist[u][v] = through;
                    }
                }
            }
        }

        // Rescale so the largest finite distance spans the largest drawing
        // extent. Unreachable pairs keep strength 0 and take no part in the
        // energy sum.
        let mut max_dist = 0.0f64;
        for u in 0..n {
            for v in u + 1..n {
                if dist[u][v].is_finite() {
                    max_dist = max_dist.max(dist[u][v]);
                }
            }
        }
        if max_dist > 0.0 {
            let max_extent = space.iter().copied().fold(0.0f64, f64::max);
            let scale = max_extent / max_dist;
            for u in 0..n {
                for v in u + 1..n {
                    let d = dist[u][v];
                    if d.is_finite() && d > 0.0 {
                        dist[u][v] = scale * d;
                        dist[v][u] = dist[u][v];
                        // Strength derives from the unscaled distance.
                        strength[u][v] = spring_strength / (d * d);
                        strength[v][u] = strength[u][v];
                    }
                }
            }
        }

        Self { dist, strength }
    }
}

/// Gradient contribution of vertex `v` to vertex `u`.
fn partial<const D: usize>(
    targets: &Targets,
    positions: &[Vector<D>],
    u: usize,
    v: usize,
) -> Vector<D> {
    if u == v {
        return Vector::zero();
    }
    let strength = targets.strength[u][v];
    if strength == 0.0 {
        return Vector::zero();
    }
    let diff = positions[u] - positions[v];
    let d = diff.norm();
    if d == 0.0 {
        // Coincident vertices have no defined gradient direction.
        return Vector::zero();
    }
    let target = targets.dist[u][v];
    (diff - diff * (target / d)) * strength
}

fn gradient<const D: usize>(targets: &Targets, positions: &[Vector<D>], u: usize) -> Vector<D> {
    let mut res = Vector::zero();
    for v in 0..positions.len() {
        res += partial(targets, positions, u, v);
    }
    res
}

/// Dim×Dim second-derivative aggregate of the energy with respect to the
/// pivot's position, every other vertex held fixed.
fn local_hessian<const D: usize>(
    targets: &Targets,
    positions: &[Vector<D>],
    pivot: usize,
) -> [[f64; D]; D] {
    let mut h = [[0.0; D]; D];
    for u in 0..positions.len() {
        if u == pivot || targets.strength[pivot][u] == 0.0 {
            continue;
        }
        let diff = positions[pivot] - positions[u];
        let d2 = diff.norm2();
        if d2 == 0.0 {
            continue;
        }
        let d = d2.sqrt();
        let inv_d3 = 1.0 / (d2 * d);
        let target = targets.dist[pivot][u];
        let strength = targets.strength[pivot][u];
        for i in 0..D {
            for j in 0..D {
                if i == j {
                    h[i][j] += strength * (1.0 + target * (diff[i] * diff[i] - d2) * inv_d3);
                } else {
                    h[i][j] += strength * target * diff[i] * diff[j] * inv_d3;
                }
            }
        }
    }
    h
}

/// Closed-form solve of `mat · x = rhs`, specialized per dimension (direct
/// division for 1D, Cramer's rule for 2D and 3D). `None` marks a numerically
/// singular system.
fn solve<const D: usize>(mat: &[[f64; D]; D], rhs: Vector<D>) -> Option<Vector<D>> {
    let mut out = Vector::zero();
    match D {
        1 => {
            if mat[0][0].abs() <= SINGULAR_EPSILON {
                return None;
            }
            out[0] = rhs[0] / mat[0][0];
        }
        2 => {
            let denom = mat[0][0] * mat[1][1] - mat[1][0] * mat[0][1];
            if denom.abs() <= SINGULAR_EPSILON {
                return None;
            }
            out[0] = (rhs[0] * mat[1][1] - rhs[1] * mat[0][1]) / denom;
            out[1] = (mat[0][0] * rhs[1] - mat[1][0] * rhs[0]) / denom;
        }
        3 => {
            let denom = mat[0][0] * (mat[1][1] * mat[2][2] - mat[2][1] * mat[1][2])
                - mat[1][0] * (mat[0][1] * mat[2][2] - mat[2][1] * mat[0][2])
                + mat[2][0] * (mat[0][1] * mat[1][2] - mat[1][1] * mat[0][2]);
            if denom.abs() <= SINGULAR_EPSILON {
                return None;
            }
            let x_num = rhs[0] * (mat[1][1] * mat[2][2] - mat[2][1] * mat[1][2])
                - rhs[1] * (mat[0][1] * mat[2][2] - mat[2][1] * mat[0][2])
                + rhs[2] * (mat[0][1] * mat[1][2] - mat[1][1] * mat[0][2]);
            let y_num = mat[0][0] * (rhs[1] * mat[2][2] - rhs[2] * mat[1][2])
                - mat[1][0] * (rhs[0] * mat[2][2] - rhs[2] * mat[0][2])
                + mat[2][0] * (rhs[0] * mat[1][2] - rhs[1] * mat[0][2]);
            let z_num = mat[0][0] * (mat[1][1] * rhs[2] - mat[2][1] * rhs[1])
                - mat[1][0] * (mat[0][1] * rhs[2] - mat[2][1] * rhs[0])
                + mat[2][0] * (mat[0][1] * rhs[1] - mat[1][1] * rhs[0]);
            out[0] = x_num / denom;
            out[1] = y_num / denom;
            out[2] = z_num / denom;
        }
        _ => return None,
    }
    Some(out)
}

/// Reports convergence for one scope once the observed gradient magnitude,
/// or its relative change between observations, drops below the tolerance.
/// The global and local stopping criteria each get their own tracker.
#[derive(Debug, Clone)]
struct ConvergenceTracker {
    tolerance: f64,
    last: Option<f64>,
}

impl ConvergenceTracker {
    fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            last: None,
        }
    }

    fn converged(&mut self, delta: f64) -> bool {
        let Some(last) = self.last.replace(delta) else {
            // Never converge on the first observation.
            return false;
        };
        if delta < self.tolerance {
            return true;
        }
        let base = last.max(delta);
        base > 0.0 && (last - delta).abs() / base < self.tolerance
    }
}

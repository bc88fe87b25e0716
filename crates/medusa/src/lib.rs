//! Force-directed graph layout.
//!
//! Computes 2D/3D coordinates for the vertices of a weighted undirected
//! graph: spring-electrical simulation (exact or Barnes-Hut approximated
//! repulsion) and stress majorization over graph-theoretic target
//! distances, generic over the drawing dimension.
//!
//! The caller owns the position array; engines mutate it in place. The
//! [`layout`] driver runs the full pipeline: deterministic circle seeding,
//! the selected engine, then normalization into the drawing bounds.

pub mod error;
pub mod graph;
pub mod kdtree;
pub mod options;
pub mod placement;
pub mod spring;
pub mod stress;
pub mod vector;

pub use error::{Error, Result};
pub use graph::Graph;
pub use kdtree::KdTree;
pub use options::Options;
pub use placement::{CirclePlacement, normalize_to_space};
pub use spring::{ScaledSpring, SpringElectrical};
pub use stress::StressMajorization;
pub use vector::Vector;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extent-to-distance ratio below which a kd-tree subtree is collapsed into
/// one aggregate body.
pub const DEFAULT_OPENING_ANGLE: f64 = 0.7;

/// A layout strategy operating on a caller-owned position array.
///
/// `run` mutates `positions` in place; it never seeds or normalizes them.
/// The slice must be index-aligned with the graph's vertex ids.
pub trait LayoutEngine<const D: usize> {
    fn run(&self, graph: &Graph, positions: &mut [Vector<D>]) -> Result<()>;
}

/// Explicit tagged choice of iterative layout algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    SpringElectrical,
    #[default]
    ScaledSpring,
    StressMajorization,
}

/// Runs the complete pipeline for `graph` inside `space`: circle placement,
/// the selected engine configured from `options`, then per-axis
/// normalization, so every returned coordinate lies in `[0, space[axis]]`.
///
/// Configuration errors surface before any position is computed.
pub fn layout<const D: usize>(
    graph: &Graph,
    algorithm: Algorithm,
    space: [f64; D],
    options: &Options,
) -> Result<Vec<Vector<D>>> {
    let mut positions = vec![Vector::zero(); graph.vertex_count()];
    CirclePlacement::new(space).run(graph, &mut positions)?;

    match algorithm {
        Algorithm::SpringElectrical => {
            let mut engine = SpringElectrical::new(space);
            engine.configure(options)?;
            engine.run(graph, &mut positions)?;
        }
        Algorithm::ScaledSpring => {
            let mut engine = ScaledSpring::new(space);
            engine.configure(options)?;
            engine.run(graph, &mut positions)?;
        }
        Algorithm::StressMajorization => {
            let mut engine = StressMajorization::new(space);
            engine.configure(options)?;
            engine.run(graph, &mut positions)?;
        }
    }

    normalize_to_space(&mut positions, &space);
    Ok(positions)
}

pub(crate) fn check_positions<const D: usize>(
    graph: &Graph,
    positions: &[Vector<D>],
) -> Result<()> {
    if positions.len() != graph.vertex_count() {
        return Err(Error::PositionLenMismatch {
            positions: positions.len(),
            vertices: graph.vertex_count(),
        });
    }
    Ok(())
}

pub(crate) fn check_space<const D: usize>(space: &[f64; D]) -> Result<()> {
    if space.iter().any(|&extent| !(extent > 0.0)) {
        return Err(Error::EmptySpace);
    }
    Ok(())
}

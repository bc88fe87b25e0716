//! Weighted undirected graph with a vertex count fixed at construction.

use crate::error::{Error, Result};

/// Adjacency is stored symmetrically: `add_edge(u, v, w)` registers the edge
/// in both endpoints' lists, so symmetry never has to be inferred later.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl Graph {
    pub fn new(vertices: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertices],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Adds an undirected edge. Both endpoints and the weight are validated
    /// before either adjacency list is touched.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: f64) -> Result<()> {
        let vertices = self.adjacency.len();
        for index in [u, v] {
            if index >= vertices {
                return Err(Error::VertexOutOfBounds { index, vertices });
            }
        }
        // The negated comparison also rejects NaN.
        if !(weight >= 0.0) {
            return Err(Error::NegativeWeight { weight });
        }

        self.adjacency[u].push((v, weight));
        self.adjacency[v].push((u, weight));
        Ok(())
    }

    pub fn neighbors(&self, u: usize) -> &[(usize, f64)] {
        &self.adjacency[u]
    }

    pub fn degree(&self, u: usize) -> usize {
        self.adjacency[u].len()
    }
}

//! Barnes-Hut space-partitioning tree for approximate pairwise repulsion.
//!
//! The tree is built from a snapshot of vertex positions and queried for the
//! aggregate repulsion `Σ (p - q) / ‖p - q‖²` a point receives from every
//! other point. Subtrees whose bounding-box extent is small relative to
//! their distance from the query point are collapsed into a single body at
//! their centroid, which turns the O(n²) pairwise pass into O(n log n).
//!
//! A tree is valid only for the positions it was built from; callers rebuild
//! it on every force-evaluation pass.

use crate::vector::Vector;

const LEAF_CAPACITY: usize = 4;

pub struct KdTree<const D: usize> {
    // Reordered copy of the positions; nodes reference ranges of it.
    points: Vec<Vector<D>>,
    nodes: Vec<Node<D>>,
    root: Option<usize>,
    opening_angle: f64,
}

struct Node<const D: usize> {
    lo: Vector<D>,
    hi: Vector<D>,
    sum: Vector<D>,
    first: usize,
    last: usize,
    children: Option<(usize, usize)>,
}

impl<const D: usize> KdTree<D> {
    /// Builds the tree over a snapshot of `positions`.
    ///
    /// `opening_angle` is the extent-to-distance ratio below which a subtree
    /// is treated as one aggregate body; smaller values force more exact
    /// expansion, and at `0.0` the query matches the brute-force sum.
    pub fn build(positions: &[Vector<D>], opening_angle: f64) -> Self {
        let mut tree = Self {
            points: positions.to_vec(),
            nodes: Vec::with_capacity(2 * positions.len() / LEAF_CAPACITY + 1),
            root: None,
            opening_angle,
        };
        if !tree.points.is_empty() {
            tree.root = Some(tree.build_range(0, tree.points.len(), 0));
        }
        tree
    }

    /// Approximate repulsion exerted on `point` by every stored point other
    /// than `point` itself (self-exclusion by coordinate equality).
    pub fn repulsion(&self, point: Vector<D>) -> Vector<D> {
        match self.root {
            Some(root) => self.repulsion_from(root, point),
            None => Vector::zero(),
        }
    }

    fn build_range(&mut self, first: usize, last: usize, split_dim: usize) -> usize {
        if last - first <= LEAF_CAPACITY {
            let mut lo = self.points[first];
            let mut hi = self.points[first];
            let mut sum = Vector::zero();
            for i in first..last {
                sum += self.points[i];
                for dim in 0..D {
                    lo[dim] = lo[dim].min(self.points[i][dim]);
                    hi[dim] = hi[dim].max(self.points[i][dim]);
                }
            }
            self.nodes.push(Node {
                lo,
                hi,
                sum,
                first,
                last,
                children: None,
            });
            return self.nodes.len() - 1;
        }

        // Median split on the current dimension; the split dimension rotates
        // with recursion depth.
        let mid = (first + last) / 2;
        self.points[first..last].select_nth_unstable_by(mid - first, |a, b| {
            a[split_dim]
                .partial_cmp(&b[split_dim])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let next_dim = (split_dim + 1) % D;
        let left = self.build_range(first, mid, next_dim);
        let right = self.build_range(mid, last, next_dim);

        let mut lo = self.nodes[left].lo;
        let mut hi = self.nodes[left].hi;
        for dim in 0..D {
            lo[dim] = lo[dim].min(self.nodes[right].lo[dim]);
            hi[dim] = hi[dim].max(self.nodes[right].hi[dim]);
        }
        let sum = self.nodes[left].sum + self.nodes[right].sum;
        self.nodes.push(Node {
            lo,
            hi,
            sum,
            first,
            last,
            children: Some((left, right)),
        });
        self.nodes.len() - 1
    }

    fn repulsion_from(&self, node: usize, point: Vector<D>) -> Vector<D> {
        let n = &self.nodes[node];

        let Some((left, right)) = n.children else {
            let mut res = Vector::zero();
            for i in n.first..n.last {
                if self.points[i] != point {
                    let diff = point - self.points[i];
                    res += diff / diff.norm2();
                }
            }
            return res;
        };

        let count = (n.last - n.first) as f64;
        let centroid = n.sum / count;
        let mut extent = 0.0f64;
        for dim in 0..D {
            extent = extent.max(n.hi[dim] - n.lo[dim]);
        }
        let diff = point - centroid;
        let d = diff.norm();
        if d > 0.0 && extent / d <= self.opening_angle {
            return diff / (d * d) * count;
        }

        self.repulsion_from(left, point) + self.repulsion_from(right, point)
    }
}

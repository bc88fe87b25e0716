use medusa::{KdTree, Vector};

// Deterministic LCG so the point set is stable across runs.
fn scatter(n: usize) -> Vec<Vector<2>> {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..n)
        .map(|_| Vector([next() * 100.0, next() * 100.0]))
        .collect()
}

fn brute_force(points: &[Vector<2>], p: Vector<2>) -> Vector<2> {
    let mut res = Vector::zero();
    for &q in points {
        if q != p {
            let diff = p - q;
            res += diff / diff.norm2();
        }
    }
    res
}

#[test]
fn zero_opening_angle_matches_brute_force() {
    let points = scatter(64);
    let tree = KdTree::build(&points, 0.0);
    for &p in &points {
        let approx = tree.repulsion(p);
        let exact = brute_force(&points, p);
        assert!(
            (approx - exact).norm() < 1e-9,
            "approx {approx:?} vs exact {exact:?}"
        );
    }
}

#[test]
fn small_opening_angle_stays_close_to_brute_force() {
    let points = scatter(128);
    let tree = KdTree::build(&points, 0.3);
    for &p in &points {
        let approx = tree.repulsion(p);
        let exact = brute_force(&points, p);
        let scale = exact.norm().max(1e-3);
        assert!(
            (approx - exact).norm() / scale < 0.5,
            "approx {approx:?} vs exact {exact:?}"
        );
    }
}

#[test]
fn coarse_opening_angle_still_yields_finite_forces() {
    let points = scatter(128);
    let tree = KdTree::build(&points, 50.0);
    for &p in &points {
        assert!(tree.repulsion(p).is_finite());
    }
}

#[test]
fn single_point_receives_no_self_repulsion() {
    let points = vec![Vector([3.0, 4.0])];
    let tree = KdTree::build(&points, 0.7);
    assert_eq!(tree.repulsion(points[0]), Vector::zero());
}

#[test]
fn coincident_points_exclude_each_other() {
    // Both copies sit at the query point; the contract excludes by
    // coordinate equality, so nothing repels.
    let points = vec![Vector([5.0, 5.0]), Vector([5.0, 5.0])];
    let tree = KdTree::build(&points, 0.0);
    assert_eq!(tree.repulsion(points[0]), Vector::zero());
}

#[test]
fn empty_point_set_is_allowed() {
    let points: Vec<Vector<2>> = Vec::new();
    let tree = KdTree::build(&points, 0.7);
    assert_eq!(tree.repulsion(Vector([1.0, 2.0])), Vector::zero());
}

#[test]
fn three_dimensional_queries_match_brute_force() {
    let flat = scatter(48);
    let points: Vec<Vector<3>> = flat
        .iter()
        .enumerate()
        .map(|(i, p)| Vector([p[0], p[1], (i % 7) as f64 * 10.0]))
        .collect();
    let tree = KdTree::build(&points, 0.0);
    for &p in &points {
        let mut exact = Vector::zero();
        for &q in &points {
            if q != p {
                let diff = p - q;
                exact += diff / diff.norm2();
            }
        }
        assert!((tree.repulsion(p) - exact).norm() < 1e-9);
    }
}

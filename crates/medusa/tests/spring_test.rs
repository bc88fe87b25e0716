use medusa::{
    Algorithm, Graph, LayoutEngine, Options, ScaledSpring, SpringElectrical, Vector,
};

fn opts(entries: &[(&str, &str)]) -> Options {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn path_graph(n: usize) -> Graph {
    let mut g = Graph::new(n);
    for u in 0..n.saturating_sub(1) {
        g.add_edge(u, u + 1, 1.0).unwrap();
    }
    g
}

#[test]
fn zero_iterations_is_a_no_op() {
    let g = path_graph(3);
    let mut engine = SpringElectrical::new([100.0, 100.0]);
    engine.configure(&opts(&[("iterations", "0")])).unwrap();

    let mut pos = vec![
        Vector([10.0, 20.0]),
        Vector([30.0, 40.0]),
        Vector([50.0, 60.0]),
    ];
    let before = pos.clone();
    engine.run(&g, &mut pos).unwrap();
    assert_eq!(pos, before);
}

#[test]
fn zero_iterations_is_a_no_op_for_the_scaled_variant() {
    let g = path_graph(3);
    let mut engine = ScaledSpring::new([100.0, 100.0]);
    engine.configure(&opts(&[("iterations", "0")])).unwrap();

    let mut pos = vec![
        Vector([10.0, 20.0]),
        Vector([30.0, 40.0]),
        Vector([50.0, 60.0]),
    ];
    let before = pos.clone();
    engine.run(&g, &mut pos).unwrap();
    assert_eq!(pos, before);
}

#[test]
fn isolated_vertices_end_up_at_opposite_extremes() {
    let g = Graph::new(2);
    let pos = medusa::layout::<2>(
        &g,
        Algorithm::SpringElectrical,
        [100.0, 100.0],
        &Options::default(),
    )
    .unwrap();

    assert!((pos[0][0] - pos[1][0]).abs() > 100.0 - 1e-6);
    for p in &pos {
        for dim in 0..2 {
            assert!(p[dim] >= -1e-9 && p[dim] <= 100.0 + 1e-9);
        }
    }
}

#[test]
fn single_vertex_lands_at_the_center() {
    let g = Graph::new(1);
    let pos = medusa::layout::<2>(
        &g,
        Algorithm::ScaledSpring,
        [100.0, 100.0],
        &Options::default(),
    )
    .unwrap();
    assert_eq!(pos[0], Vector([50.0, 50.0]));
}

#[test]
fn spring_layout_stays_inside_the_drawing_space() {
    let mut g = Graph::new(5);
    for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 2)] {
        g.add_edge(u, v, 1.0).unwrap();
    }
    for algorithm in [Algorithm::SpringElectrical, Algorithm::ScaledSpring] {
        let pos =
            medusa::layout::<2>(&g, algorithm, [120.0, 80.0], &Options::default()).unwrap();
        for p in &pos {
            assert!(p.is_finite());
            assert!(p[0] >= -1e-9 && p[0] <= 120.0 + 1e-9);
            assert!(p[1] >= -1e-9 && p[1] <= 80.0 + 1e-9);
        }
    }
}

#[test]
fn approximate_repulsion_tracks_the_exact_engine() {
    let g = path_graph(12);
    let seed: Vec<Vector<2>> = (0..12)
        .map(|u| Vector([10.0 + 7.0 * u as f64, 90.0 - 6.0 * u as f64]))
        .collect();

    let mut exact_engine = SpringElectrical::new([100.0, 100.0]);
    exact_engine
        .configure(&opts(&[("iterations", "5")]))
        .unwrap();
    let mut exact = seed.clone();
    exact_engine.run(&g, &mut exact).unwrap();

    let mut approx_engine = SpringElectrical::new([100.0, 100.0]);
    approx_engine
        .configure(&opts(&[
            ("iterations", "5"),
            ("use_spatial_approximation", "true"),
            ("opening_angle", "1e-12"),
        ]))
        .unwrap();
    let mut approx = seed;
    approx_engine.run(&g, &mut approx).unwrap();

    for (a, b) in exact.iter().zip(&approx) {
        assert!((*a - *b).norm() < 1e-6, "{a:?} vs {b:?}");
    }
}

#[test]
fn scaled_variant_spreads_a_star_more_evenly() {
    // Hub with eight leaves; degree normalization keeps the hub from being
    // pulled apart by its spokes, and every leaf keeps a positive distance
    // from the hub.
    let mut g = Graph::new(9);
    for leaf in 1..9 {
        g.add_edge(0, leaf, 1.0).unwrap();
    }
    let pos = medusa::layout::<2>(
        &g,
        Algorithm::ScaledSpring,
        [100.0, 100.0],
        &Options::default(),
    )
    .unwrap();
    for leaf in 1..9 {
        assert!(pos[0].dist(&pos[leaf]) > 1.0);
    }
}

use medusa::{Error, Options, ScaledSpring, SpringElectrical, StressMajorization};

fn opts(entries: &[(&str, &str)]) -> Options {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn unrecognized_keys_are_ignored() {
    let mut engine = SpringElectrical::<2>::new([100.0, 100.0]);
    engine
        .configure(&opts(&[("no_such_option", "whatever"), ("tolerance", "x")]))
        .unwrap();
    assert_eq!(engine.iterations, 100);
    assert!(!engine.use_spatial_approximation);
}

#[test]
fn recognized_keys_override_defaults() {
    let mut engine = ScaledSpring::<2>::new([100.0, 100.0]);
    engine
        .configure(&opts(&[
            ("iterations", "7"),
            ("separation_constant", "3.5"),
            ("force_constant", "0.2"),
            ("use_spatial_approximation", "off"),
            ("opening_angle", "1.5"),
        ]))
        .unwrap();
    assert_eq!(engine.iterations, 7);
    assert_eq!(engine.separation_constant, 3.5);
    assert_eq!(engine.force_constant, 0.2);
    assert!(!engine.use_spatial_approximation);
    assert_eq!(engine.opening_angle, 1.5);
}

#[test]
fn unparsable_iteration_counts_are_rejected() {
    let mut engine = SpringElectrical::<2>::new([100.0, 100.0]);
    let err = engine
        .configure(&opts(&[("iterations", "abc")]))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOption { ref key, .. } if key == "iterations"));
    assert_eq!(engine.iterations, 100);
}

#[test]
fn opening_angle_must_be_positive() {
    let mut engine = SpringElectrical::<2>::new([100.0, 100.0]);
    assert!(engine.configure(&opts(&[("opening_angle", "-1")])).is_err());
    assert!(engine.configure(&opts(&[("opening_angle", "0")])).is_err());
    assert!(engine.configure(&opts(&[("opening_angle", "NaN")])).is_err());
}

#[test]
fn booleans_accept_the_usual_spellings_only() {
    let mut engine = ScaledSpring::<2>::new([100.0, 100.0]);
    for value in ["true", "1", "yes", "on"] {
        engine
            .configure(&opts(&[("use_spatial_approximation", value)]))
            .unwrap();
        assert!(engine.use_spatial_approximation);
    }
    for value in ["false", "0", "no", "off"] {
        engine
            .configure(&opts(&[("use_spatial_approximation", value)]))
            .unwrap();
        assert!(!engine.use_spatial_approximation);
    }
    assert!(matches!(
        engine.configure(&opts(&[("use_spatial_approximation", "banana")])),
        Err(Error::InvalidOption { .. })
    ));
}

#[test]
fn tolerance_must_be_positive() {
    let mut engine = StressMajorization::<2>::new([100.0, 100.0]);
    assert!(engine.configure(&opts(&[("tolerance", "0")])).is_err());
    engine.configure(&opts(&[("tolerance", "1e-3")])).unwrap();
    assert_eq!(engine.tolerance, 1e-3);
}

//! Identical inputs give identical storages and identical ordered problems.


use tabmap_core::config::EngineConfig;
use tabmap_core::hash::hash_column;
use tabmap_exec::{digest_result, scalar, Engine, MapRequest};
use test_data_gen::{doubles, generate_longs};

#[test]
fn test_repeated_runs_have_equal_digests() {
    let engine = Engine::new(EngineConfig::default()).expect("config");
    let input = generate_longs(5_000, 13);
    let request = MapRequest::binary("mod", &input, scalar(0i64));

    let first = engine.execute_uncancellable(&request).expect("first run");
    let second = engine.execute_uncancellable(&request).expect("second run");

    assert_eq!(first, second);
    assert_eq!(
        digest_result(&first).expect("digest"),
        digest_result(&second).expect("digest")
    );
}

#[test]
fn test_checkpoint_interval_does_not_change_output() {
    let input = doubles(&[Some(1.25), Some(2.5), None, Some(-0.75), Some(f64::INFINITY)]);
    let request = MapRequest::ternary("round", &input, scalar(1i64), scalar(true));

    let coarse = Engine::new(EngineConfig::default().with_checkpoint_interval(1024))
        .expect("config")
        .execute_uncancellable(&request)
        .expect("coarse polling");
    let fine = Engine::new(EngineConfig::default().with_checkpoint_interval(1))
        .expect("config")
        .execute_uncancellable(&request)
        .expect("fine polling");

    assert_eq!(
        digest_result(&coarse).expect("digest"),
        digest_result(&fine).expect("digest")
    );
}

#[test]
fn test_problems_are_row_ordered() {
    let engine = Engine::new(EngineConfig::default()).expect("config");
    let input = generate_longs(300, 0);
    let result = engine
        .execute_uncancellable(&MapRequest::binary("div", &input, scalar(0i64)))
        .expect("div by zero");

    let rows: Vec<usize> = result.problems.iter().map(|p| p.row).collect();
    assert_eq!(rows, (0..300).collect::<Vec<_>>());
}

#[test]
fn test_different_outputs_have_different_digests() {
    let engine = Engine::new(EngineConfig::default()).expect("config");
    let input = generate_longs(64, 0);

    let plus_one = engine
        .execute_uncancellable(&MapRequest::binary("add", &input, scalar(1i64)))
        .expect("add 1");
    let plus_two = engine
        .execute_uncancellable(&MapRequest::binary("add", &input, scalar(2i64)))
        .expect("add 2");

    assert_ne!(hash_column(&plus_one.storage), hash_column(&plus_two.storage));
    assert_ne!(
        digest_result(&plus_one).expect("digest"),
        digest_result(&plus_two).expect("digest")
    );
}

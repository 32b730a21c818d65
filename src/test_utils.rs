use crate::Sign::{Negative, Positive};
use crate::SignedNetwork;

/// A small network with three non-trivial components:
///
///  - `e` with a positive self-loop,
///  - `b_1 <-> b_2` forming a negative cycle,
///  - `d_1, d_2, d_3` with one positive and one negative cycle.
///
/// The components are connected through `c`, which is regulated by the input `a`.
pub fn build_test_network() -> SignedNetwork {
    let names = ["a", "b_1", "b_2", "c", "d_1", "d_2", "d_3", "e"];
    let mut network = SignedNetwork::new(names.iter().map(|it| it.to_string()).collect())
        .unwrap();
    let regulations = [
        ("a", Positive, "c"),
        ("b_1", Positive, "b_2"),
        ("b_2", Negative, "b_1"),
        ("b_2", Positive, "c"),
        ("c", Positive, "d_2"),
        ("c", Positive, "e"),
        ("d_1", Positive, "d_3"),
        ("d_3", Negative, "d_2"),
        ("d_2", Positive, "d_1"),
        ("d_1", Positive, "d_2"),
        ("e", Positive, "e"),
    ];
    for (regulator, sign, target) in regulations {
        network.add_regulation(regulator, sign, target).unwrap();
    }
    network
}

/// Enable log output in tests (`RUST_LOG=debug cargo test`).
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

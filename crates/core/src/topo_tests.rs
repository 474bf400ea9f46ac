// SPDX-License-Identifier: MIT

use super::*;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn edges(pairs: &[(&str, &str)]) -> BTreeSet<(String, String)> {
    pairs
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

#[test]
fn linear_chain_orders_dependency_first() {
    let nodes = set(&["a", "b"]);
    // a depends on b
    let order = topo_sort(&nodes, &edges(&[("a", "b")])).unwrap();
    assert_eq!(order, vec!["b".to_string(), "a".to_string()]);
}

#[test]
fn isolated_nodes_are_included() {
    let nodes = set(&["a", "b", "c"]);
    let order = topo_sort(&nodes, &edges(&[("a", "b")])).unwrap();
    assert_eq!(order.len(), 3);
    assert!(order.contains(&"c".to_string()));
}

#[test]
fn cycle_is_detected_and_names_residual_nodes() {
    let nodes = set(&["x", "y"]);
    let err = topo_sort(&nodes, &edges(&[("x", "y"), ("y", "x")])).unwrap_err();
    match err {
        CoreError::CycleDetected { nodes } => {
            assert_eq!(nodes, vec!["x".to_string(), "y".to_string()]);
        }
        other => panic!("expected CycleDetected, got {other:?}"),
    }
}

#[test]
fn ties_break_lexicographically_for_determinism() {
    let nodes = set(&["z", "m", "a"]);
    let order = topo_sort(&nodes, &BTreeSet::new()).unwrap();
    assert_eq!(order, vec!["a".to_string(), "m".to_string(), "z".to_string()]);
}

#[test]
fn same_input_always_produces_same_output() {
    let nodes = set(&["a", "b", "c", "d"]);
    let e = edges(&[("a", "b"), ("b", "c"), ("d", "c")]);
    let first = topo_sort(&nodes, &e).unwrap();
    for _ in 0..10 {
        assert_eq!(topo_sort(&nodes, &e).unwrap(), first);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn acyclic_edges_always_sort(n in 2usize..8) {
            let nodes: BTreeSet<String> = (0..n).map(|i| format!("n{i}")).collect();
            // Only edges i -> j where i < j: guaranteed acyclic.
            let mut e = BTreeSet::new();
            for i in 0..n {
                for j in (i + 1)..n {
                    if (i + j) % 2 == 0 {
                        e.insert((format!("n{i}"), format!("n{j}")));
                    }
                }
            }
            let order = topo_sort(&nodes, &e).unwrap();
            prop_assert_eq!(order.len(), n);
        }
    }
}

use super::*;

#[derive(Debug)]
struct Node {
    children: Vec<Node>,
}

fn nested(depth: usize) -> Node {
    let mut node = Node {
        children: Vec::new(),
    };
    for _ in 0..depth {
        node = Node {
            children: vec![node],
        };
    }
    node
}

fn depth_of(node: &Node) -> usize {
    ensure_sufficient_stack(|| 1 + node.children.iter().map(depth_of).max().unwrap_or(0))
}

fn dismantle(mut node: Node) {
    // Iterative drop so the test itself does not overflow on teardown.
    while let Some(child) = node.children.pop() {
        node = child;
    }
}

#[test]
fn shallow_tree_depth() {
    let tree = nested(10);
    assert_eq!(depth_of(&tree), 11);
    dismantle(tree);
}

#[test]
fn deep_tree_depth() {
    // 100k levels would overflow a typical 8MB stack without growth.
    let tree = nested(100_000);
    assert_eq!(depth_of(&tree), 100_001);
    dismantle(tree);
}

#[test]
fn returns_closure_result() {
    assert_eq!(ensure_sufficient_stack(|| 42), 42);
}

#[test]
fn works_with_result_type() {
    let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(123));
    assert_eq!(result, Ok(123));
}

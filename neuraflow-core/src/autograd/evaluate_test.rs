use crate::error::NeuraFlowError;
use crate::graph::Graph;
use approx::assert_relative_eq;

#[test]
fn test_linear_into_mse_gradients() -> Result<(), NeuraFlowError> {
    let mut graph: Graph = Graph::new();
    let x = graph.input(3.0);
    let w = graph.input(2.0);
    let b = graph.input(1.0);
    let lin = graph.linear(x, w, b)?;
    let y = graph.input(10.0);
    let loss = graph.mean_squared_error(lin, y)?;

    let order = graph.topological_sort(&[x, w, b, y])?;
    graph.forward_and_backward(&order)?;

    assert_eq!(graph.value(lin)?, Some(7.0));
    assert_eq!(graph.value(loss)?, Some(9.0));

    // The loss seeds y - a = 3 into the Linear node.
    assert_relative_eq!(graph.gradient(loss, lin)?, 3.0);
    assert_relative_eq!(graph.gradient(loss, y)?, -3.0);
    assert_relative_eq!(graph.gradient(lin, w)?, 9.0);
    assert_relative_eq!(graph.gradient(lin, b)?, 3.0);
    assert_relative_eq!(graph.gradient(lin, x)?, 6.0);

    // Leaves collect what their consumer recorded for them.
    assert_relative_eq!(graph.gradient(w, w)?, 9.0);
    assert_relative_eq!(graph.gradient(b, b)?, 3.0);
    assert_relative_eq!(graph.gradient(x, x)?, 6.0);
    assert_relative_eq!(graph.gradient(y, y)?, -3.0);
    assert_eq!(graph.gradients(w)?, &[9.0]);
    Ok(())
}

#[test]
fn test_combine_broadcasts_upstream_cost() -> Result<(), NeuraFlowError> {
    let mut graph: Graph = Graph::new();
    let a = graph.input(2.0);
    let b = graph.input(5.0);
    let c = graph.input(1.0);
    let sum = graph.combine(&[a, b, c])?;
    let target = graph.input(12.0);
    let _loss = graph.mean_squared_error(sum, target)?;

    let order = graph.topological_sort(&[a, b, c, target])?;
    graph.forward_and_backward(&order)?;

    assert_eq!(graph.value(sum)?, Some(8.0));
    // Upstream cost is 12 - 8 = 4, broadcast rather than split.
    assert_eq!(graph.gradients(sum)?, &[4.0, 4.0, 4.0]);
    for leaf in [a, b, c] {
        assert_relative_eq!(graph.gradient(leaf, leaf)?, 4.0);
    }
    Ok(())
}

#[test]
fn test_sigmoid_chain_gradients() -> Result<(), NeuraFlowError> {
    let mut graph: Graph = Graph::new();
    let x = graph.input(0.0);
    let w = graph.input(1.0);
    let b = graph.input(0.0);
    let lin = graph.linear(x, w, b)?;
    let act = graph.sigmoid(lin)?;
    let y = graph.input(1.0);
    let _loss = graph.mean_squared_error(act, y)?;

    let order = graph.topological_sort(&[x, w, b, y])?;
    graph.forward_and_backward(&order)?;

    assert_eq!(graph.value(act)?, Some(0.5));
    // cost into the sigmoid: 1 - 0.5; local derivative 0.25
    assert_relative_eq!(graph.gradient(act, lin)?, 0.125);
    assert_relative_eq!(graph.gradient(b, b)?, 0.125);
    assert_relative_eq!(graph.gradient(w, w)?, 0.0);
    Ok(())
}

#[test]
fn test_shared_parameter_accumulates_over_consumers() -> Result<(), NeuraFlowError> {
    let mut graph: Graph = Graph::new();
    let x1 = graph.input(1.0);
    let x2 = graph.input(2.0);
    let w = graph.input(1.0);
    let b = graph.input(0.0);
    let l1 = graph.linear(x1, w, b)?;
    let l2 = graph.linear(x2, w, b)?;
    let sum = graph.combine(&[l1, l2])?;
    let y = graph.input(5.0);
    let _loss = graph.mean_squared_error(sum, y)?;

    let order = graph.topological_sort(&[x1, x2, w, b, y])?;
    graph.forward_and_backward(&order)?;

    // sum = 3, cost = 2 on both paths
    assert_relative_eq!(graph.gradient(w, w)?, 1.0 * 2.0 + 2.0 * 2.0);
    assert_relative_eq!(graph.gradient(b, b)?, 4.0);
    Ok(())
}

#[test]
fn test_node_read_through_two_slots() -> Result<(), NeuraFlowError> {
    // lin = x * x + b, so d/dx = 2x * cost
    let mut graph: Graph = Graph::new();
    let x = graph.input(3.0);
    let b = graph.input(0.0);
    let lin = graph.linear(x, x, b)?;
    let y = graph.input(10.0);
    let _loss = graph.mean_squared_error(lin, y)?;

    let order = graph.topological_sort(&[x, b, y])?;
    graph.forward_and_backward(&order)?;

    assert_eq!(graph.value(lin)?, Some(9.0));
    assert_relative_eq!(graph.gradient(lin, x)?, 2.0 * 3.0 * 1.0);
    assert_relative_eq!(graph.gradient(x, x)?, 6.0);
    Ok(())
}

#[test]
fn test_forward_is_idempotent() -> Result<(), NeuraFlowError> {
    let mut graph: Graph = Graph::new();
    let x = graph.input(0.3);
    let w = graph.input(-1.2);
    let b = graph.input(0.4);
    let lin = graph.linear(x, w, b)?;
    let act = graph.sigmoid(lin)?;

    let order = graph.topological_sort(&[x, w, b])?;
    graph.forward(&order)?;
    let first: Vec<Option<f64>> = graph.nodes().map(|n| n.value()).collect();
    graph.forward(&order)?;
    let second: Vec<Option<f64>> = graph.nodes().map(|n| n.value()).collect();
    assert_eq!(first, second);
    assert!(graph.value(act)?.is_some());
    Ok(())
}

#[test]
fn test_gradients_do_not_leak_between_examples() -> Result<(), NeuraFlowError> {
    let mut graph: Graph = Graph::new();
    let x = graph.input(3.0);
    let w = graph.input(2.0);
    let b = graph.input(1.0);
    let lin = graph.linear(x, w, b)?;
    let y = graph.input(10.0);
    let _loss = graph.mean_squared_error(lin, y)?;
    let order = graph.topological_sort(&[x, w, b, y])?;

    graph.forward_and_backward(&order)?;
    assert_relative_eq!(graph.gradient(w, w)?, 9.0);

    // Second example: x = 1, y = 4 -> a = 3, cost = 1
    graph.set_value(x, 1.0)?;
    graph.set_value(y, 4.0)?;
    graph.forward_and_backward(&order)?;
    assert_relative_eq!(graph.gradient(w, w)?, 1.0);
    assert_relative_eq!(graph.gradient(b, b)?, 1.0);
    assert_eq!(graph.gradients(w)?.len(), 1);
    Ok(())
}

#[test]
fn test_backward_before_forward() -> Result<(), NeuraFlowError> {
    let mut graph: Graph = Graph::new();
    let x = graph.input(1.0);
    let s = graph.sigmoid(x)?;
    let order = graph.topological_sort(&[x])?;

    assert_eq!(
        graph.backward(&order),
        Err(NeuraFlowError::NotEvaluated { node: s })
    );
    Ok(())
}

#[test]
fn test_forward_out_of_order() -> Result<(), NeuraFlowError> {
    let mut graph: Graph = Graph::new();
    let x = graph.input(1.0);
    let s1 = graph.sigmoid(x)?;
    let s2 = graph.sigmoid(s1)?;

    assert_eq!(
        graph.forward(&[x, s2, s1]),
        Err(NeuraFlowError::NotEvaluated { node: s1 })
    );
    Ok(())
}

#[test]
fn test_backward_over_partial_order() -> Result<(), NeuraFlowError> {
    let mut graph: Graph = Graph::new();
    let x = graph.input(1.0);
    let s1 = graph.sigmoid(x)?;
    let _s2 = graph.sigmoid(s1)?;
    let order = graph.topological_sort(&[x])?;
    graph.forward(&order)?;

    // s2 is a consumer of s1 but is left out of the pass.
    let err = graph.backward(&[x, s1]).unwrap_err();
    assert!(matches!(err, NeuraFlowError::MissingGradient { .. }));
    Ok(())
}

#[test]
fn test_backward_rejects_stale_consumer_slots() -> Result<(), NeuraFlowError> {
    let mut graph: Graph = Graph::new();
    let x = graph.input(0.5);
    let s1 = graph.sigmoid(x)?;
    let s2 = graph.sigmoid(s1)?;
    let y = graph.input(1.0);
    let _loss = graph.mean_squared_error(s2, y)?;
    let full = graph.topological_sort(&[x, y])?;
    graph.forward_and_backward(&full)?;
    let before = graph.gradient(s1, x)?;

    // s2 still holds slots from the first example; they must not be reused.
    graph.set_value(y, -100.0)?;
    graph.forward(&full)?;
    assert_eq!(
        graph.backward(&[x, s1]),
        Err(NeuraFlowError::MissingGradient { node: s2 })
    );
    assert_eq!(graph.gradient(s1, x)?, before);
    Ok(())
}

#[test]
fn test_failed_backward_leaves_gradients_untouched() -> Result<(), NeuraFlowError> {
    let mut graph: Graph = Graph::new();
    let x = graph.input(2.0);
    let w = graph.input(1.5);
    let b = graph.input(0.0);
    let lin = graph.linear(x, w, b)?;
    let y = graph.input(1.0);
    let _loss = graph.mean_squared_error(lin, y)?;
    let order = graph.topological_sort(&[x, w, b, y])?;
    graph.forward_and_backward(&order)?;
    let before = graph.gradient(w, w)?;

    // A new consumer of x that has never been forwarded.
    let late = graph.sigmoid(x)?;
    let order = graph.topological_sort(&[x, w, b, y])?;
    assert_eq!(
        graph.backward(&order),
        Err(NeuraFlowError::NotEvaluated { node: late })
    );
    assert_eq!(graph.gradient(w, w)?, before);
    assert_eq!(graph.gradients(lin)?.len(), 3);
    Ok(())
}

#[test]
fn test_loss_ignores_its_consumers() -> Result<(), NeuraFlowError> {
    let mut graph: Graph = Graph::new();
    let a = graph.input(3.0);
    let y = graph.input(1.0);
    let loss = graph.mean_squared_error(a, y)?;
    let squashed = graph.sigmoid(loss)?;
    let sum = graph.combine(&[loss, a])?;

    let order = graph.topological_sort(&[a, y])?;
    assert_eq!(order.len(), 5);
    graph.forward_and_backward(&order)?;

    assert_eq!(graph.value(loss)?, Some(4.0));
    assert_relative_eq!(graph.value(squashed)?.unwrap(), 1.0 / (1.0 + (-4.0f64).exp()));
    assert_eq!(graph.value(sum)?, Some(7.0));

    // Neither consumer has a consumer of its own, so both pass back zero.
    assert_relative_eq!(graph.gradient(squashed, loss)?, 0.0);
    assert_eq!(graph.gradients(sum)?, &[0.0, 0.0]);

    // The loss still seeds y - a and -(y - a).
    assert_relative_eq!(graph.gradient(loss, a)?, -2.0);
    assert_relative_eq!(graph.gradient(loss, y)?, 2.0);
    assert_relative_eq!(graph.gradient(a, a)?, -2.0);

    // The loss does not need its consumers in the pass.
    graph.backward(&[loss])?;
    assert_relative_eq!(graph.gradient(loss, a)?, -2.0);
    Ok(())
}

use neuraflow_core::{Graph, NeuraFlowError, NodeId};

/// Initialise `env_logger` once; later calls are no-ops.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Single-output perceptron: one `Linear(x_i, w_i, b_i)` per feature, summed by
/// a `Combine`, optionally squashed by a `Sigmoid`, scored by a
/// `MeanSquaredError` against a label Input.
#[allow(dead_code)]
pub struct Perceptron {
    pub features: Vec<NodeId>,
    pub trainables: Vec<NodeId>,
    pub label: NodeId,
    pub output: NodeId,
    pub loss: NodeId,
    pub order: Vec<NodeId>,
}

#[allow(dead_code)]
pub fn build_perceptron(
    graph: &mut Graph,
    n_features: usize,
    with_sigmoid: bool,
) -> Result<Perceptron, NeuraFlowError> {
    let mut features = Vec::with_capacity(n_features);
    let mut trainables = Vec::with_capacity(2 * n_features);
    let mut linears = Vec::with_capacity(n_features);
    for _ in 0..n_features {
        let x = graph.input(0.0);
        let w = graph.input(0.0);
        let b = graph.input(0.0);
        linears.push(graph.linear(x, w, b)?);
        features.push(x);
        trainables.extend([w, b]);
    }
    let sum = graph.combine(&linears)?;
    let output = if with_sigmoid { graph.sigmoid(sum)? } else { sum };
    let label = graph.input(0.0);
    let loss = graph.mean_squared_error(output, label)?;

    let mut seeds = features.clone();
    seeds.extend(&trainables);
    seeds.push(label);
    let order = graph.topological_sort(&seeds)?;

    Ok(Perceptron {
        features,
        trainables,
        label,
        output,
        loss,
        order,
    })
}

/// Writes one example's features and label into the network inputs.
#[allow(dead_code)]
pub fn feed(
    graph: &mut Graph,
    net: &Perceptron,
    props: &[f64],
    label: f64,
) -> Result<(), NeuraFlowError> {
    for (&x, &v) in net.features.iter().zip(props) {
        graph.set_value(x, v)?;
    }
    graph.set_value(net.label, label)
}

use approx::assert_abs_diff_eq;
use block_model::likelihood;
use block_model::{
    EstimatorOptions, ErEstimator, ErrorKind, GraphEstimator, GraphInput, GraphModel, GraphModelError,
    SbmEstimator,
};
use ndarray::prelude::*;

fn two_cliques() -> Array2<i64> {
    array![
        [0, 1, 1, 0, 0, 0],
        [1, 0, 1, 0, 0, 0],
        [1, 1, 0, 1, 0, 0],
        [0, 0, 1, 0, 1, 1],
        [0, 0, 0, 1, 0, 1],
        [0, 0, 0, 1, 1, 0]
    ]
}

#[test]
fn integer_and_boolean_graphs_fit_the_same() -> anyhow::Result<()> {
    let labels = ["a", "a", "a", "b", "b", "b"];

    let mut from_int = SbmEstimator::new(EstimatorOptions::sbm());
    from_int.fit(&two_cliques().into(), Some(&labels[..]))?;

    let mut from_bool = SbmEstimator::new(EstimatorOptions::sbm());
    from_bool.fit(&two_cliques().mapv(|x| x != 0).into(), Some(&labels[..]))?;

    assert_eq!(from_int.block_p()?, from_bool.block_p()?);
    assert_abs_diff_eq!(from_int.block_p()?[(0, 0)], 6.0 / 9.0);
    assert_abs_diff_eq!(from_int.block_p()?[(0, 1)], 1.0 / 9.0);
    Ok(())
}

#[test]
fn dynamic_input_boundary() -> anyhow::Result<()> {
    let text = String::from("not a graph");
    let err = GraphInput::from_value(&text).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(err, GraphModelError::UnsupportedInput(_)));

    let graph = GraphInput::from_value(&two_cliques())?;
    let mut er = ErEstimator::new(EstimatorOptions::erdos_renyi());
    er.fit(&graph)?;
    assert_abs_diff_eq!(er.p()?, 14.0 / 36.0);
    Ok(())
}

#[test]
fn scores_agree_with_likelihood_module() -> anyhow::Result<()> {
    let graph: GraphInput = two_cliques().into();
    let labels = [0, 0, 0, 1, 1, 1];
    let opts = EstimatorOptions {
        directed: false,
        loops: false,
        ..EstimatorOptions::sbm()
    };

    let mut sbm = SbmEstimator::new(opts);
    sbm.fit(&graph, Some(&labels[..]))?;

    let adj = graph.to_adjacency()?;
    let expected = likelihood::score_samples(&adj, sbm.p_mat()?, false, false, None)?.sum();
    let score = sbm.score(&graph, None)?;
    assert_abs_diff_eq!(score, expected);

    let k = sbm.n_parameters()?;
    assert_eq!(k, 4 + 2);
    assert_abs_diff_eq!(sbm.bic(&graph)?, 2.0 * 6.0_f64.ln() * k as f64 - 2.0 * score);

    // a 3 x 3 graph cannot be scored by a 6-vertex model
    let small: GraphInput = Array2::<f64>::zeros((3, 3)).into();
    assert_eq!(sbm.score(&small, None).unwrap_err().kind(), ErrorKind::Validation);
    Ok(())
}

#[test]
fn sbm_defaults_differ_from_er_defaults() {
    let sbm = SbmEstimator::<u8>::new(EstimatorOptions::default());
    let er = ErEstimator::new(EstimatorOptions::erdos_renyi());
    assert!(sbm.options().loops);
    assert!(!er.options().loops);
    assert!(sbm.options().directed && er.options().directed);
    assert_eq!(er.n_parameters(), Err(GraphModelError::NotFitted));
}

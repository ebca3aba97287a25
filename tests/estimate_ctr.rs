//! End-to-end behaviour of `estimate_ctr` across estimators and engines

mod common;

use common::*;
use ctr_stats::ctr_core::execution::sequential;
use ctr_stats::prelude::*;
use tracing::info;

fn all_estimators() -> Vec<CtrEstimator> {
    vec![
        CtrEstimator::mean_ratio(),
        CtrEstimator::weighted_mean_ratio(),
        CtrEstimator::laplace_bayes(),
        CtrEstimator::regression(Transform::Identity),
        CtrEstimator::regression(Transform::Log1p),
    ]
}

#[test]
fn test_seeded_runs_are_bit_identical() -> anyhow::Result<()> {
    init_tracing();
    let data = synthetic_campaigns(80, 0.03, 1).with_weight_scheme(WeightScheme::LogImpressions);
    let config = BootstrapConfig::new().with_resamples(250).with_seed(99);

    for estimator in all_estimators() {
        let a = estimate_ctr(&data, &estimator, &config)?;
        let b = estimate_ctr(&data, &estimator, &config)?;
        let c = estimate_ctr_with_engine(sequential(), &data, &estimator, &config)?;

        assert_eq!(a.bootstrap_values, b.bootstrap_values, "{}", estimator.method());
        assert_eq!(a.bootstrap_values, c.bootstrap_values, "{}", estimator.method());
        assert_eq!(a.variance_estimate.to_bits(), c.variance_estimate.to_bits());
        assert_eq!(a.point_estimate.to_bits(), c.point_estimate.to_bits());
    }
    Ok(())
}

#[test]
fn test_variance_is_non_negative() -> anyhow::Result<()> {
    init_tracing();
    let data = synthetic_campaigns(40, 0.05, 2).with_weight_scheme(WeightScheme::Impressions);

    for seed in 0..5 {
        let config = BootstrapConfig::new().with_resamples(100).with_seed(seed);
        for estimator in all_estimators() {
            let result = estimate_ctr(&data, &estimator, &config)?;
            assert!(result.variance_estimate >= 0.0);
            assert!(result.variance_estimate.is_finite());
            assert_eq!(result.bootstrap_values.len(), 100);
            assert_eq!(result.n_campaigns, 40);
        }
    }
    Ok(())
}

#[test]
fn test_variance_estimate_stabilises_with_more_resamples() -> anyhow::Result<()> {
    init_tracing();
    let data = synthetic_campaigns(60, 0.02, 3);
    let estimator = CtrEstimator::mean_ratio();

    let variances = |resamples: usize| -> anyhow::Result<Vec<f64>> {
        (0..20)
            .map(|seed| -> anyhow::Result<f64> {
                let config = BootstrapConfig::new()
                    .with_resamples(resamples)
                    .with_seed(1000 + seed);
                Ok(estimate_ctr(&data, &estimator, &config)?.variance_estimate)
            })
            .collect()
    };

    let few = variances(30)?;
    let many = variances(2000)?;
    info!(few = spread(&few), many = spread(&many), "spread of variance estimates");
    assert!(
        spread(&many) < spread(&few),
        "spread with 2000 resamples {} should be below spread with 30 resamples {}",
        spread(&many),
        spread(&few)
    );
    Ok(())
}

#[test]
fn test_importance_resampling_recovers_weighted_mean() -> anyhow::Result<()> {
    init_tracing();
    let data = synthetic_campaigns(200, 0.04, 4).with_weight_scheme(WeightScheme::LogImpressions);

    let weighted_point = WeightedMeanRatioEstimator.estimate(&data)?;

    let config = BootstrapConfig::new()
        .with_resamples(4000)
        .with_weighted(true)
        .with_seed(5);
    let bootstrap = Bootstrap::sequential(config).run(&data, &MeanRatioEstimator)?;

    assert!(bootstrap.weighted);
    assert_relative_eq!(bootstrap.mean(), weighted_point, epsilon = 1e-3);
    Ok(())
}

#[test]
fn test_driver_pairs_weighted_estimator_with_importance_resampling() -> anyhow::Result<()> {
    init_tracing();
    let data = synthetic_campaigns(150, 0.03, 6).with_weight_scheme(WeightScheme::LogImpressions);
    let config = BootstrapConfig::new().with_resamples(3000).with_seed(8);

    let result = estimate_ctr(&data, &CtrEstimator::weighted_mean_ratio(), &config)?;
    info!(
        point = result.point_estimate,
        variance = result.variance_estimate,
        "weighted mean ratio"
    );
    assert!(result.weighted);

    let resampled_mean =
        result.bootstrap_values.iter().sum::<f64>() / result.bootstrap_values.len() as f64;
    assert_relative_eq!(resampled_mean, result.point_estimate, epsilon = 1e-3);
    Ok(())
}

#[test]
fn test_driver_pairs_weighted_regression_with_importance_resampling() -> anyhow::Result<()> {
    init_tracing();
    let data = synthetic_campaigns(300, 0.03, 12).with_weight_scheme(WeightScheme::LogImpressions);
    let estimator: CtrEstimator = RegressionEstimator::new()
        .with_transform(Transform::Log1p)
        .with_weighting(RegressionWeighting::Dataset)
        .into();
    let config = BootstrapConfig::new().with_resamples(2000).with_seed(13);

    let result = estimate_ctr(&data, &estimator, &config)?;
    info!(
        point = result.point_estimate,
        variance = result.variance_estimate,
        "weighted regression"
    );

    assert!(result.weighted);
    assert_eq!(result.method, EstimationMethod::Regression);

    let wls = RegressionEstimator::new()
        .with_transform(Transform::Log1p)
        .with_weighting(RegressionWeighting::Dataset)
        .estimate(&data)?;
    assert_eq!(result.point_estimate, wls);

    // OLS on importance-resampled data targets the WLS coefficient
    let resampled_mean =
        result.bootstrap_values.iter().sum::<f64>() / result.bootstrap_values.len() as f64;
    info!(wls, resampled_mean, "regression coefficients");
    assert_relative_eq!(resampled_mean, wls, max_relative = 0.02);
    Ok(())
}

#[test]
fn test_zero_impression_campaign() {
    init_tracing();
    let data = CampaignDataset::from_counts(&[(5, 0)]).unwrap();
    let config = BootstrapConfig::new().with_resamples(20).with_seed(1);

    let mean = estimate_ctr(&data, &CtrEstimator::mean_ratio(), &config);
    assert!(matches!(mean, Err(Error::Division { index: 0 })));

    let smoothed = estimate_ctr(&data, &CtrEstimator::laplace_bayes(), &config).unwrap();
    assert_relative_eq!(smoothed.point_estimate, 3.0);
    assert_eq!(smoothed.variance_estimate, 0.0);

    let clamped = CtrEstimator::from(LaplaceBayesEstimator::new().with_clamp(ClampPolicy::UnitInterval));
    let result = estimate_ctr(&data, &clamped, &config).unwrap();
    assert_relative_eq!(result.point_estimate, 1.0);

    let regression = estimate_ctr(&data, &CtrEstimator::regression(Transform::Identity), &config);
    assert!(matches!(regression, Err(Error::DegenerateInput(_))));
}

#[test]
fn test_zero_click_campaigns_shrink_by_volume() {
    let data = CampaignDataset::from_counts(&[(0, 100), (0, 10_000)]).unwrap();
    let config = BootstrapConfig::new().with_resamples(50).with_seed(2);

    let mean = estimate_ctr(&data, &CtrEstimator::mean_ratio(), &config).unwrap();
    assert_eq!(mean.point_estimate, 0.0);
    assert_eq!(mean.variance_estimate, 0.0);

    let smoothed = LaplaceBayesEstimator::new().estimate(&data).unwrap();
    assert!(smoothed[0] > smoothed[1]);
    assert!(smoothed[1] > 0.0);
}

#[test]
fn test_proportional_campaigns_agree() {
    let data = CampaignDataset::from_counts(&[(1, 100), (2, 200)]).unwrap();
    let config = BootstrapConfig::new().with_resamples(50).with_seed(3);

    for estimator in [
        CtrEstimator::mean_ratio(),
        CtrEstimator::weighted_mean_ratio(),
        CtrEstimator::regression(Transform::Identity),
    ] {
        let result = estimate_ctr(&data, &estimator, &config).unwrap();
        assert_relative_eq!(result.point_estimate, 0.01, epsilon = 1e-12);
        assert_relative_eq!(result.variance_estimate, 0.0, epsilon = 1e-20);
    }
}

#[test]
fn test_config_from_json_drives_run() -> anyhow::Result<()> {
    let data = synthetic_campaigns(30, 0.02, 7);
    let config = BootstrapConfig::from_json(r#"{ "resample_count": 64, "seed": 21 }"#)?;

    let result = estimate_ctr(&data, &CtrEstimator::mean_ratio(), &config)?;
    assert_eq!(result.resample_count, 64);
    assert_eq!(result.seed, 21);
    assert_eq!(result.sample_size, 30);
    Ok(())
}

#[test]
fn test_intervals_bracket_point_estimate() -> anyhow::Result<()> {
    let data = synthetic_campaigns(100, 0.03, 8);
    let config = BootstrapConfig::new().with_resamples(1000).with_seed(9);
    let result = estimate_ctr(&data, &CtrEstimator::mean_ratio(), &config)?;

    let normal = result.normal_interval(0.95)?;
    assert!(normal.contains(result.point_estimate));

    let percentile = result.percentile_interval(0.95)?;
    assert!(percentile.contains(result.point_estimate));
    assert!(percentile.overlaps(&normal));
    Ok(())
}

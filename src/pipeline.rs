//! End-to-end batch processing.
//!
//! One run takes an uploaded table through normalization, market
//! resolution, model training and prediction, salary adjustment and parity
//! analysis. Each run owns its table and model.
//!
//! The market source and the model trainer are both injected; the defaults
//! are the offline estimator and a random forest built from the model
//! settings.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{adjust_salary, analyze_parity};
use crate::config::AdvisorConfig;
use crate::error::{EngineError, EngineResult};
use crate::ingest::{Normalizer, RawTable};
use crate::market::{MarketEstimator, OfflineMarketEstimator, resolve_market_ctc};
use crate::models::{BatchReport, EmployeeRecommendation};
use crate::prediction::{FeatureMatrix, ForestTrainer, Predictor, Trainer, save_model};

/// Produces salary recommendations for uploaded employee tables.
///
/// `T` trains the model that supplies each employee's raw prediction.
#[derive(Clone)]
pub struct SalaryAdvisor<T = ForestTrainer> {
    config: Arc<AdvisorConfig>,
    normalizer: Normalizer,
    estimator: Arc<dyn MarketEstimator>,
    trainer: T,
}

impl SalaryAdvisor {
    /// Creates an advisor with the given configuration and market source,
    /// training a random forest configured by `model` settings.
    pub fn new(config: Arc<AdvisorConfig>, estimator: Arc<dyn MarketEstimator>) -> Self {
        let trainer = ForestTrainer::from(&config.settings().model);
        Self::with_trainer(config, estimator, trainer)
    }

    /// Creates an advisor that never finds live market data.
    pub fn offline(config: AdvisorConfig) -> Self {
        Self::new(Arc::new(config), Arc::new(OfflineMarketEstimator::default()))
    }
}

impl<T> SalaryAdvisor<T>
where
    T: Trainer,
    T::Model: Serialize,
{
    /// Creates an advisor that trains its model with `trainer`.
    pub fn with_trainer(
        config: Arc<AdvisorConfig>,
        estimator: Arc<dyn MarketEstimator>,
        trainer: T,
    ) -> Self {
        let normalizer = Normalizer::new(config.schema().clone());
        Self {
            config,
            normalizer,
            estimator,
            trainer,
        }
    }

    /// Returns the trainer in use.
    pub fn trainer(&self) -> &T {
        &self.trainer
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Runs the full pipeline on one table.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidField`] for unparsable recognized values
    /// - [`EngineError::InsufficientData`] when no row has a valid ID
    /// - [`EngineError::Overflow`] when an employee's amounts leave `Decimal` range
    /// - [`EngineError::ModelPersistence`] when `model.save_path` cannot be written
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_advisor::config::AdvisorConfig;
    /// use salary_advisor::ingest::RawTable;
    /// use salary_advisor::pipeline::SalaryAdvisor;
    ///
    /// let table = RawTable::from_csv_str(
    ///     "ID,Name,Experience,Previous Salary,Departmental Budget,Market CTC\n\
    ///      1,Asha,5,750000,600000,900000\n",
    /// ).unwrap();
    ///
    /// let report = SalaryAdvisor::offline(AdvisorConfig::default()).run(&table).unwrap();
    /// assert_eq!(report.recommendations.len(), 1);
    /// ```
    pub fn run(&self, raw: &RawTable) -> EngineResult<BatchReport> {
        let start_time = Instant::now();
        let run_id = Uuid::new_v4();
        info!(run_id = %run_id, rows = raw.len(), "Starting salary run");

        let batch = self.normalizer.normalize(raw)?;
        if !batch.dropped_rows.is_empty() {
            warn!(
                run_id = %run_id,
                dropped = batch.dropped_rows.len(),
                "Rows dropped for missing or unparsable ID"
            );
        }
        if batch.records.is_empty() {
            return Err(EngineError::InsufficientData {
                message: "no employee rows with a valid ID".to_string(),
            });
        }

        let mut records = batch.records;
        let mut market_notices = Vec::new();
        for record in &mut records {
            let lookup = resolve_market_ctc(self.estimator.as_ref(), record);
            if let Some(notice) = lookup.notice {
                info!(employee_id = record.id, market_ctc = %lookup.market_ctc, "Market data fetched");
                market_notices.push(notice);
            }
            record.market_ctc = lookup.market_ctc;
        }

        let model_settings = &self.config.settings().model;
        let features = FeatureMatrix::from_records(&records, &model_settings.feature_columns)?;
        let targets = records
            .iter()
            .map(|record| {
                record
                    .market_ctc
                    .to_f64()
                    .ok_or_else(|| EngineError::CalculationError {
                        message: format!("market CTC for employee {} is out of range", record.id),
                    })
            })
            .collect::<EngineResult<Vec<f64>>>()?;

        let model = self.trainer.train(&features, &targets)?;
        info!(
            run_id = %run_id,
            rows = features.n_rows(),
            features = ?features.columns(),
            "Model trained"
        );
        if let Some(path) = &model_settings.save_path {
            save_model(&model, path)?;
            info!(run_id = %run_id, path = %path.display(), "Model saved");
        }
        let predictions = model.predict(&features)?;

        let recommendations = records
            .into_iter()
            .zip(predictions)
            .map(|(employee, prediction)| {
                let raw = to_money(prediction, employee.id)?;
                let adjustment = adjust_salary(raw, &employee.adjustment_input())
                    .map_err(|e| for_employee(e, employee.id))?;
                let parity = analyze_parity(
                    adjustment.optimal,
                    adjustment.market_ctc,
                    adjustment.dept_budget,
                )
                .map_err(|e| for_employee(e, employee.id))?;
                Ok(EmployeeRecommendation {
                    employee,
                    adjustment,
                    parity,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let report = BatchReport {
            run_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            recommendations,
            dropped_rows: batch.dropped_rows,
            market_notices,
            duration_us: start_time.elapsed().as_micros() as u64,
        };

        info!(
            run_id = %run_id,
            employees = report.recommendations.len(),
            biased = report.bias_count(),
            duration_us = report.duration_us,
            "Salary run completed"
        );

        Ok(report)
    }
}

/// Prefixes overflow messages with the employee they came from.
fn for_employee(error: EngineError, employee_id: i64) -> EngineError {
    match error {
        EngineError::Overflow { message } => EngineError::Overflow {
            message: format!("employee {}: {}", employee_id, message),
        },
        other => other,
    }
}

/// Converts a raw model output to a money amount rounded to cents.
fn to_money(prediction: f64, employee_id: i64) -> EngineResult<Decimal> {
    Decimal::from_f64(prediction)
        .map(|value| value.round_dp(2))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "prediction {} for employee {} is not representable",
                prediction, employee_id
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, Settings};
    use crate::market::BenchmarkTable;
    use crate::models::SalaryTier;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const SAMPLE: &str = "\
ID,Name,Experience,Job Role,Location,Previous Salary,Current CTC,Departmental Budget,Market CTC,Performance Rating,Team Size
1,Asha,5,Data Scientist,Bengaluru,750000,780000,600000,900000,3,2
2,Ravi,0,HR Executive,Delhi,0,0,500000,600000,3,1
,Ghost,3,Analyst,Pune,1,1,1,1,3,1
4,Meera,8,Software Engineer,Pune,1200000,1250000,1000000,1300000,5,8
";

    fn advisor() -> SalaryAdvisor {
        SalaryAdvisor::offline(AdvisorConfig::default())
    }

    #[test]
    fn test_run_keeps_results_with_their_records() {
        let table = RawTable::from_csv_str(SAMPLE).unwrap();
        let report = advisor().run(&table).unwrap();

        let ids: Vec<i64> = report.recommendations.iter().map(|r| r.employee.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(report.dropped_rows, vec![2]);

        let meera = report.find(4).unwrap();
        assert_eq!(meera.employee.name, "Meera");
        assert_eq!(meera.adjustment.dept_budget, dec("1000000"));
        assert_eq!(meera.adjustment.market_ctc, dec("1300000"));
    }

    #[test]
    fn test_fresher_is_pinned_to_budget() {
        let table = RawTable::from_csv_str(SAMPLE).unwrap();
        let report = advisor().run(&table).unwrap();

        let ravi = report.find(2).unwrap();
        assert_eq!(ravi.adjustment.tier, SalaryTier::Fresher);
        assert_eq!(ravi.adjustment.optimal, dec("500000"));
    }

    #[test]
    fn test_parity_uses_optimal_and_echoed_inputs() {
        let table = RawTable::from_csv_str(SAMPLE).unwrap();
        let report = advisor().run(&table).unwrap();

        for rec in &report.recommendations {
            let expected = analyze_parity(
                rec.adjustment.optimal,
                rec.adjustment.market_ctc,
                rec.adjustment.dept_budget,
            )
            .unwrap();
            assert_eq!(rec.parity, expected);
        }
    }

    #[test]
    fn test_offline_estimator_produces_no_notices() {
        let table = RawTable::from_csv_str(SAMPLE).unwrap();
        let report = advisor().run(&table).unwrap();
        assert!(report.market_notices.is_empty());
    }

    #[test]
    fn test_benchmark_table_overrides_record_market() {
        let loader = ConfigLoader::load("./config/default").unwrap();
        let estimator = BenchmarkTable::new(loader.benchmarks().to_vec());
        let advisor = SalaryAdvisor::new(Arc::new(loader.into_config()), Arc::new(estimator));

        let table = RawTable::from_csv_str(SAMPLE).unwrap();
        let report = advisor.run(&table).unwrap();

        let asha = report.find(1).unwrap();
        assert_eq!(asha.employee.market_ctc, dec("1800000"));
        assert_eq!(asha.adjustment.market_ctc, dec("1800000"));
        assert!(
            report
                .market_notices
                .contains(&"Asha: Market data fetched successfully (1800000)".to_string())
        );
        // Software Engineer in Pune and HR Executive anywhere are also benchmarked
        assert_eq!(report.market_notices.len(), 3);
    }

    #[test]
    fn test_all_rows_dropped_is_insufficient_data() {
        let table = RawTable::from_csv_str("ID,Name\n,A\nx,B\n").unwrap();
        let result = advisor().run(&table);
        assert!(matches!(result, Err(EngineError::InsufficientData { .. })));
    }

    #[test]
    fn test_invalid_field_aborts_run() {
        let table = RawTable::from_csv_str("ID,Experience\n1,ten\n").unwrap();
        let result = advisor().run(&table);
        assert!(matches!(result, Err(EngineError::InvalidField { .. })));
    }

    #[test]
    fn test_run_saves_model_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("salary_model.json");

        let mut settings = Settings::default();
        settings.model.save_path = Some(path.clone());
        settings.model.trees = 5;
        let config = AdvisorConfig::default().with_settings(settings);

        let table = RawTable::from_csv_str(SAMPLE).unwrap();
        SalaryAdvisor::offline(config).run(&table).unwrap();

        let model = crate::prediction::ForestRegressor::load(&path).unwrap();
        assert_eq!(model.n_trees(), 5);
    }

    #[test]
    fn test_tiny_budget_is_overflow_not_panic() {
        let table = RawTable::from_csv_str(
            "ID,Experience,Previous Salary,Departmental Budget,Market CTC\n\
             1,5,750000,0.0000000000000000000000001,900000\n",
        )
        .unwrap();

        match advisor().run(&table) {
            Err(EngineError::Overflow { message }) => {
                assert!(message.starts_with("employee 1: parity:"), "got {}", message);
            }
            other => panic!("Expected Overflow, got {:?}", other.map(|r| r.run_id)),
        }
    }

    #[test]
    fn test_huge_salary_with_promotion_is_overflow_not_panic() {
        let table = RawTable::from_csv_str(
            "ID,Experience,Previous Salary,Departmental Budget,Market CTC,Promotion\n\
             1,5,70000000000000000000000000000,600000,900000,yes\n",
        )
        .unwrap();

        match advisor().run(&table) {
            Err(EngineError::Overflow { message }) => {
                assert!(message.starts_with("employee 1: promotion_uplift:"), "got {}", message);
            }
            other => panic!("Expected Overflow, got {:?}", other.map(|r| r.run_id)),
        }
    }

    #[derive(Clone)]
    struct MeanTrainer;

    #[derive(Serialize)]
    struct MeanModel {
        mean: f64,
    }

    impl Predictor for MeanModel {
        fn predict(&self, features: &FeatureMatrix) -> EngineResult<Vec<f64>> {
            Ok(vec![self.mean; features.n_rows()])
        }
    }

    impl Trainer for MeanTrainer {
        type Model = MeanModel;

        fn train(&self, _features: &FeatureMatrix, targets: &[f64]) -> EngineResult<MeanModel> {
            Ok(MeanModel {
                mean: targets.iter().sum::<f64>() / targets.len() as f64,
            })
        }
    }

    #[test]
    fn test_injected_trainer_supplies_raw_predictions() {
        let advisor = SalaryAdvisor::with_trainer(
            Arc::new(AdvisorConfig::default()),
            Arc::new(OfflineMarketEstimator::default()),
            MeanTrainer,
        );
        let table = RawTable::from_csv_str(SAMPLE).unwrap();
        let report = advisor.run(&table).unwrap();

        // (900000 + 600000 + 1300000) / 3
        for rec in &report.recommendations {
            assert_eq!(rec.adjustment.raw, dec("933333.33"));
        }
        assert_eq!(report.find(1).unwrap().adjustment.base_salary, dec("933333.33"));
    }

    #[test]
    fn test_identical_runs_give_identical_recommendations() {
        let table = RawTable::from_csv_str(SAMPLE).unwrap();
        let first = advisor().run(&table).unwrap();
        let second = advisor().run(&table).unwrap();

        let optimal = |r: &BatchReport| -> Vec<Decimal> {
            r.recommendations.iter().map(|x| x.adjustment.optimal).collect()
        };
        assert_eq!(optimal(&first), optimal(&second));
        assert_ne!(first.run_id, second.run_id);
    }
}

//! Report generation port trait.

use crate::domain::engine::Evaluation;
use crate::domain::error::SignalError;
use crate::domain::features::FeatureTable;
use crate::domain::series::PriceSeries;

/// Port for writing evaluation output.
pub trait ReportPort {
    /// Write one row per bar with the signal chosen for it.
    fn write(
        &self,
        symbol: &str,
        series: &PriceSeries,
        evaluation: &Evaluation,
        output_path: &str,
    ) -> Result<(), SignalError>;

    /// Write the bars alongside their indicator columns.
    fn write_features(
        &self,
        symbol: &str,
        series: &PriceSeries,
        table: &FeatureTable,
        output_path: &str,
    ) -> Result<(), SignalError>;
}

//! Query command implementation.
//!
//! This module runs a historical feed query and writes the resulting
//! observations in the requested format.

use crate::display::{Format, write_observations};
use anyhow::Result;
use feedscope_lib::prelude::*;
use feedscope_lib::{Connector, SamplerConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

/// Run a query against the chain's oracle contract.
pub(crate) async fn query(
    form: &QueryForm,
    output: Option<PathBuf>,
    format: Format,
    concurrency: usize,
    quiet: bool,
) -> Result<()> {
    let request = form.parse()?;

    let config = EngineConfig {
        sampler: SamplerConfig { concurrency },
        ..Default::default()
    };
    let engine = QueryEngine::new(ChainRegistry::global(), HttpConnector::default(), config);

    let report = execute(&engine, &request, quiet).await?;

    write_observations(report.series.observations(), output.as_deref(), format)?;

    if let Some(path) = output
        && !quiet
    {
        eprintln!("Output written to: {}", path.display());
    }

    Ok(())
}

/// Resolve and sample a request, showing progress on stderr.
pub(crate) async fn execute<D, C>(
    engine: &QueryEngine<D, C>,
    request: &QueryRequest,
    quiet: bool,
) -> Result<QueryReport>
where
    D: ChainDirectory,
    C: Connector,
{
    let prepared = engine.prepare(request).await?;
    let range = prepared.range();
    info!(%range, feed_id = %prepared.feed_id(), "resolved query");

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(range.sample_count());
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} blocks ({percent}%) {msg}")?
                .progress_chars("=>-"),
        );
        pb.set_message(format!("{} {range}", request.feed_name));
        pb
    };

    let mut skipped = 0usize;
    let result = prepared
        .sample_with_progress(|outcome| {
            if outcome.is_skipped() {
                skipped += 1;
            }
            progress.inc(1);
        })
        .await;

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            progress.abandon();
            return Err(e.into());
        }
    };

    let finish_msg = if skipped > 0 {
        format!(
            "Read {} values ({skipped} blocks skipped due to errors)",
            report.series.len()
        )
    } else {
        format!("Read {} values", report.series.len())
    };
    progress.finish_with_message(finish_msg);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedscope_lib::testing::MockChain;
    use feedscope_lib::{Address, QueryError};

    fn engine(chain: &MockChain) -> QueryEngine<ChainRegistry, MockChain> {
        let directory = ChainRegistry::from_chains([Chain::new(
            56,
            "BNB Smart Chain",
            Some("https://bsc.example".into()),
            Some(Address::repeat_byte(0x70)),
            false,
        )]);
        QueryEngine::new(directory, chain.clone(), EngineConfig::default())
    }

    #[tokio::test]
    async fn test_execute_from_form() {
        let chain = MockChain::new(5000).with_feed("ETH/USD").failing_at(1001);
        let form = QueryForm {
            chain_id: Some("56".into()),
            feed_name: Some("ETH/USD".into()),
            start_block: Some("1000".into()),
            end_block: Some("1002".into()),
            step: Some("1".into()),
            ..Default::default()
        };

        let report = execute(&engine(&chain), &form.parse().unwrap(), true)
            .await
            .unwrap();

        let blocks: Vec<_> = report
            .series
            .observations()
            .iter()
            .map(|o| o.block_number)
            .collect();
        assert_eq!(blocks, vec![1000, 1002]);
        assert_eq!(report.series.skipped(), 1);
    }

    #[tokio::test]
    async fn test_execute_reports_range_error() {
        let chain = MockChain::new(5000).with_feed("ETH/USD");
        let request = QueryRequest::blocks("56", "ETH/USD", 4990, 5001, 1);

        let err = execute(&engine(&chain), &request, true).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<QueryError>(),
            Some(QueryError::EndBlockTooHigh { latest: 5000, .. })
        ));
        assert!(chain.value_reads().is_empty());
    }
}

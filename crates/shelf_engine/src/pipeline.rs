use std::path::PathBuf;
use std::sync::Arc;

use shelf_core::{update, Catalog, Msg, PipelineState};
use shelf_logging::LogSink;
use url::Url;

use crate::config::AppConfig;
use crate::decode::decode_page;
use crate::export::{ExportError, ExportSummary, SinkKind};
use crate::extract::{ExtractError, ProductExtractor};
use crate::fetch::Fetcher;
use crate::gate::{Capability, FeatureGate};
use crate::grouped::GroupedExportOptions;
use crate::stores::{attempt_store, StoreAttempt, StoreKind};
use crate::types::{FetchError, FetchOutput};

/// Fatal errors; either one ends the run with no output written.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("fetching {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractError),
}

/// Outcome of one sink. A failed sink never stops its siblings.
#[derive(Debug)]
pub struct SinkReport {
    pub sink: SinkKind,
    pub destination: PathBuf,
    pub result: Result<ExportSummary, ExportError>,
}

impl SinkReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub state: PipelineState,
    pub catalog: Catalog,
    pub sinks: Vec<SinkReport>,
    pub stores: Vec<StoreAttempt>,
    pub error: Option<PipelineError>,
    /// Set when the parser toggle was off and the run ended before fetching.
    pub extraction_skipped: bool,
}

impl RunReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.state, PipelineState::Failed { .. })
    }

    pub fn failed_sinks(&self) -> impl Iterator<Item = &SinkReport> {
        self.sinks.iter().filter(|report| !report.is_success())
    }
}

/// Runs fetch, extract and export for one catalog page.
pub struct Pipeline {
    config: AppConfig,
    fetcher: Arc<dyn Fetcher>,
    gate: Arc<dyn FeatureGate>,
    log: Arc<dyn LogSink>,
}

impl Pipeline {
    pub fn new(
        config: AppConfig,
        fetcher: Arc<dyn Fetcher>,
        gate: Arc<dyn FeatureGate>,
        log: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            config,
            fetcher,
            gate,
            log,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn run(&self) -> RunReport {
        let mut report = RunReport::default();

        let extraction_enabled = self.gate.enabled(Capability::RunWebsiteParser.as_str());
        advance(&mut report, Msg::RunRequested { extraction_enabled });
        if report.state.is_terminal() {
            report.extraction_skipped = true;
            self.log.info(&format!(
                "{} is disabled; skipping fetch, extraction and export",
                Capability::RunWebsiteParser
            ));
            return report;
        }

        let url = self.config.web_scraping.start_page.clone();
        self.log.info(&format!("Scraper started with start page {url}"));
        let fetched = self.fetcher.fetch(&url).await;
        let page = match fetched {
            Ok(page) => page,
            Err(source) => return self.fail(report, PipelineError::Transport { url, source }),
        };
        self.log.debug(&format!(
            "Fetched {} bytes from {} ({} redirects)",
            page.metadata.byte_len, page.metadata.final_url, page.metadata.redirect_count
        ));
        advance(&mut report, Msg::FetchSucceeded);

        let catalog = match self.extract(&page) {
            Ok(catalog) => catalog,
            Err(err) => return self.fail(report, err.into()),
        };
        self.log.info(&format!("Catalog built with {} items", catalog.len()));
        advance(
            &mut report,
            Msg::ExtractionSucceeded {
                records: catalog.len(),
            },
        );
        report.catalog = catalog;

        report.sinks = self.run_sinks(&report.catalog);
        report.stores = self.run_stores(&report.catalog);
        advance(&mut report, Msg::SinksAttempted);

        let failed = report.failed_sinks().count();
        self.log.info(&format!(
            "Scraper finished. Saved {} items; {} of {} sinks failed",
            report.catalog.len(),
            failed,
            report.sinks.len()
        ));
        report
    }

    fn extract(&self, page: &FetchOutput) -> Result<Catalog, ExtractError> {
        let decoded = decode_page(&page.bytes, page.metadata.content_type.as_deref())?;
        let base_url =
            Url::parse(&page.metadata.final_url).map_err(|err| ExtractError::InvalidBaseUrl {
                url: page.metadata.final_url.clone(),
                message: err.to_string(),
            })?;
        let extractor = ProductExtractor::new(&self.config.web_scraping.selectors)?
            .with_category(self.config.web_scraping.category.as_str());
        Ok(extractor
            .extract_html(&decoded.html, &base_url)
            .into_iter()
            .collect())
    }

    fn run_sinks(&self, catalog: &Catalog) -> Vec<SinkReport> {
        let options = GroupedExportOptions {
            category_label: self.config.web_scraping.category.clone(),
        };
        let mut reports = Vec::new();
        for sink in SinkKind::ALL {
            if !self.gate.enabled(sink.capability().as_str()) {
                self.log.debug(&format!("Sink {sink} disabled"));
                continue;
            }
            let destination = self.config.output.destination(sink).to_path_buf();
            let result = sink.export(catalog, &destination, &options, self.log.as_ref());
            if let Err(err) = &result {
                self.log.error(&format!(
                    "Export to {sink} at {} failed: {err}",
                    destination.display()
                ));
            }
            reports.push(SinkReport {
                sink,
                destination,
                result,
            });
        }
        reports
    }

    fn run_stores(&self, catalog: &Catalog) -> Vec<StoreAttempt> {
        StoreKind::ALL
            .into_iter()
            .filter(|store| self.gate.enabled(store.capability().as_str()))
            .map(|store| {
                let target = match store {
                    StoreKind::Relational => &self.config.persistence.sqlite_path,
                    StoreKind::Document => &self.config.persistence.mongodb_uri,
                };
                attempt_store(store, target, catalog, self.log.as_ref())
            })
            .collect()
    }

    fn fail(&self, mut report: RunReport, err: PipelineError) -> RunReport {
        let phase = report
            .state
            .phase()
            .map(|phase| phase.to_string())
            .unwrap_or_default();
        self.log
            .error(&format!("Scraper error while {phase}: {err}"));
        advance(
            &mut report,
            Msg::Failed {
                cause: err.to_string(),
            },
        );
        report.error = Some(err);
        report
    }
}

fn advance(report: &mut RunReport, msg: Msg) {
    let state = std::mem::take(&mut report.state);
    report.state = update(state, msg);
}

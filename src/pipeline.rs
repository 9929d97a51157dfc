use std::time::Instant;

use tracing::{info, warn};

use crate::client::{ApiClient, parse_json};
use crate::config::Config;
use crate::error::{AtStep, Step, StepFailure};
use crate::models::{ProcessResult, ScrapeRequest, ScrapeResponse, VerifyResponse};

/// Outcome of one run. Fields are filled in step order; `failure` holds the
/// step that stopped the run, if any.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub ads_scraped: Option<usize>,
    pub processed: Option<ProcessResult>,
    pub verified: Option<VerifyResponse>,
    pub failure: Option<StepFailure>,
}

impl PipelineReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Scrapes the configured search page, forwards the payload to the backend
/// and reads back what was stored. Stops at the first failing step.
pub async fn run(config: &Config) -> PipelineReport {
    let mut report = PipelineReport::default();

    if let Err(failure) = run_steps(config, &mut report).await {
        warn!(step = %failure.step, error = %failure.error, "Pipeline stopped");
        report.failure = Some(failure);
    }

    report
}

async fn run_steps(config: &Config, report: &mut PipelineReport) -> Result<(), StepFailure> {
    let client = ApiClient::new().at(Step::Scrape)?;

    let scraped = scrape(&client, config).await.at(Step::Scrape)?;
    report.ads_scraped = Some(scraped.ad_count());

    let processed = forward(&client, config, &scraped).await.at(Step::Forward)?;
    report.processed = Some(processed);

    let verified = verify(&client, config).await.at(Step::Verify)?;
    report.verified = Some(verified);

    Ok(())
}

async fn scrape(client: &ApiClient, config: &Config) -> crate::error::Result<ScrapeResponse> {
    let target = config.search.to_url()?;
    let request = ScrapeRequest {
        url: target.to_string(),
    };

    info!(endpoint = %config.scrape_endpoint(), target = %request.url, "Requesting scrape");
    let start = Instant::now();

    let body = client
        .post_json(&config.scrape_endpoint(), &request, config.scrape_timeout)
        .await?;

    let scraped: ScrapeResponse = parse_json(&body)?;

    info!(ads = scraped.ad_count(), elapsed = ?start.elapsed(), "Scrape finished");
    Ok(scraped)
}

async fn forward(
    client: &ApiClient,
    config: &Config,
    payload: &ScrapeResponse,
) -> crate::error::Result<ProcessResult> {
    info!(endpoint = %config.ingest_endpoint(), "Forwarding ads to backend");
    let start = Instant::now();

    let body = client
        .post_json(&config.ingest_endpoint(), payload, config.forward_timeout)
        .await?;
    let result: ProcessResult = parse_json(&body)?;

    info!(
        processed = result.processed,
        skipped = result.skipped,
        errors = result.errors,
        elapsed = ?start.elapsed(),
        "Backend processed batch"
    );
    Ok(result)
}

async fn verify(client: &ApiClient, config: &Config) -> crate::error::Result<VerifyResponse> {
    info!(endpoint = %config.verify_endpoint(), limit = config.verify_limit, "Verifying stored ads");

    let body = client
        .get(&config.verify_endpoint(), &config.verify_query(), config.verify_timeout)
        .await?;
    let response: VerifyResponse = parse_json(&body)?;

    info!(total = response.pagination.total, "Verification finished");
    Ok(response)
}

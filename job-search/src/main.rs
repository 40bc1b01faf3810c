use anyhow::Context;
use job_search::config::read_config;
use job_search::factory::build_search_service;
use job_search::telemetry::init_tracing;

/// `job-search [QUERY...]`: one search across all configured boards, printed as JSON.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let settings = read_config().context("Failed to read configuration")?;
    let service = build_search_service(&settings).context("Failed to build search service")?;

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let jobs = service.search_jobs(&query, None).await;

    let output = serde_json::to_string_pretty(&jobs).context("Failed to serialize jobs")?;
    println!("{}", output);

    Ok(())
}

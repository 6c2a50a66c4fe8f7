use crate::output;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use tdoll_model::TDoll;

/// The public T-Doll list page this tool scrapes.
const CATALOG_URL: &str = "https://gamepress.gg/girlsfrontline/t-dolls-list";

/// Result of the single catalog GET.
enum FetchOutcome {
    /// 2xx response body.
    Page(String),
    /// Non-2xx status; the pipeline halts without writing.
    Failed(StatusCode),
}

/// Acquire the T-Doll catalog from gamepress.gg.
///
/// Fetches the list page, extracts every data row from the doll table,
/// sorts by catalog id, and writes the catalog JSON to `output_path`.
///
/// A non-2xx response is reported on stdout and nothing is written. Any
/// parse fault (missing table, cell, or nested element, or a non-empty
/// id that is not numeric) propagates and aborts the run.
pub async fn scrape(output_path: &str, cache_html: Option<&str>) -> Result<()> {
    tracing::info!(url = %CATALOG_URL, "Fetching T-Doll list");
    let body = match fetch_page(CATALOG_URL).await? {
        FetchOutcome::Page(body) => body,
        FetchOutcome::Failed(status) => {
            println!("HTTP request came back with {}", status.as_u16());
            tracing::warn!(status = status.as_u16(), "Fetch failed, nothing written");
            return Ok(());
        }
    };
    tracing::info!(bytes = body.len(), "Received HTML");

    if let Some(path) = cache_html {
        output::cache_html(path, &body)?;
    }

    let dolls = parse_catalog_page(&body)?;
    tracing::info!(dolls = dolls.len(), "Extracted and sorted catalog");

    // Row count and structure dump go to stdout for human inspection.
    println!("{}", dolls.len());
    println!("{dolls:#?}");

    output::write_catalog(&dolls, output_path)?;

    Ok(())
}

async fn fetch_page(url: &str) -> Result<FetchOutcome> {
    let client = reqwest::Client::builder()
        .user_agent("tdoll/0.1 (t-doll catalog tool)")
        .build()?;

    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to fetch page")?;

    let status = response.status();
    if !status.is_success() {
        return Ok(FetchOutcome::Failed(status));
    }

    let body = response.text().await.context("Failed to read response body")?;
    Ok(FetchOutcome::Page(body))
}

/// Parse the full list page into a sorted catalog.
pub fn parse_catalog_page(html: &str) -> Result<Vec<TDoll>> {
    let document = Html::parse_document(html);

    // The doll table: table#t-doll-new-list
    let table_sel = Selector::parse("table#t-doll-new-list").expect("valid selector");
    let table = document
        .select(&table_sel)
        .next()
        .context("Could not find the t-doll list table")?;

    let row_sel = Selector::parse("tr.t-doll-new-row").expect("valid selector");
    let rows: Vec<ElementRef> = table.select(&row_sel).collect();
    anyhow::ensure!(!rows.is_empty(), "No data rows in the t-doll list table");
    tracing::debug!(rows = rows.len(), "Collected data rows");

    let dolls = rows
        .into_iter()
        .map(extract_doll)
        .collect::<Result<Vec<_>>>()?;

    tdoll_model::sort_catalog(dolls).map_err(Into::into)
}

/// Extract one catalog entry from a data row.
///
/// Cell markers mirror the page markup. The display name and rarity sit
/// in a `<div>` nested inside their cells; id and class are plain cell
/// text.
fn extract_doll(row: ElementRef) -> Result<TDoll> {
    let id = cell_text(row, "td.id-cell")?;
    let name = nested_div_text(row, "td.title-cell")?;
    let kind = cell_text(row, "td.class-cell")?;
    let rarity = nested_div_text(row, "td.rarity-cell")?;

    Ok(TDoll {
        id,
        name,
        kind,
        rarity,
    })
}

/// Trimmed text content of the first cell matching `selector`.
fn cell_text(row: ElementRef, selector: &str) -> Result<String> {
    let sel = Selector::parse(selector).expect("valid selector");
    let cell = row
        .select(&sel)
        .next()
        .with_context(|| format!("Row has no {selector} cell"))?;
    Ok(cell.text().collect::<String>().trim().to_string())
}

/// Trimmed text of the first `<div>` nested inside the first cell
/// matching `selector`.
fn nested_div_text(row: ElementRef, selector: &str) -> Result<String> {
    let sel = Selector::parse(selector).expect("valid selector");
    let cell = row
        .select(&sel)
        .next()
        .with_context(|| format!("Row has no {selector} cell"))?;

    let div_sel = Selector::parse("div").expect("valid selector");
    let div = cell
        .select(&div_sel)
        .next()
        .with_context(|| format!("{selector} cell has no inner div"))?;
    Ok(div.text().collect::<String>().trim().to_string())
}

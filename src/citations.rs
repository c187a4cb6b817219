//! Refreshes citation counts in `data/publications.json` from the owner's
//! Google Scholar profile.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use futures_util::StreamExt;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

use crate::publications::{self, Publication};

const DEFAULT_SCHOLAR_ID: &str = "xphZoxIAAAAJ";
const DEFAULT_PUBLICATIONS_PATH: &str = "data/publications.json";
const DEFAULT_MIN_CITATIONS: u32 = 50;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_RESPONSE_MAX_BYTES: usize = 4 * 1024 * 1024;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const MIN_CITATIONS_BOUNDS: (u32, u32) = (0, 100_000);
const REQUEST_TIMEOUT_MS_BOUNDS: (u64, u64) = (1_000, 120_000);
const RESPONSE_MAX_BYTES_BOUNDS: (usize, usize) = (64 * 1024, 32 * 1024 * 1024);

const SCHOLAR_PROFILE_URL: &str = "https://scholar.google.com/citations";
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/120.0.0.0 Safari/537.36";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Leading characters compared when two titles do not match exactly.
const TITLE_PREFIX_CHARS: usize = 40;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

#[derive(Clone, Debug)]
struct RefresherConfig {
    scholar_id: String,
    publications_path: PathBuf,
    min_citations: u32,
    request_timeout: Duration,
    response_max_bytes: usize,
    dry_run: bool,
    log_level: LogLevel,
}

impl RefresherConfig {
    fn from_env() -> Self {
        let scholar_id = parse_env_non_empty_string("SCHOLAR_ID")
            .unwrap_or_else(|| DEFAULT_SCHOLAR_ID.to_string());
        let publications_path = parse_env_non_empty_string("PUBLICATIONS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLICATIONS_PATH));
        let min_citations = parse_with_bounds(
            env_value("MIN_CITATIONS").as_deref(),
            DEFAULT_MIN_CITATIONS,
            MIN_CITATIONS_BOUNDS,
        );
        let request_timeout_ms = parse_with_bounds(
            env_value("SCHOLAR_REQUEST_TIMEOUT_MS").as_deref(),
            DEFAULT_REQUEST_TIMEOUT_MS,
            REQUEST_TIMEOUT_MS_BOUNDS,
        );
        let response_max_bytes = parse_with_bounds(
            env_value("SCHOLAR_RESPONSE_MAX_BYTES").as_deref(),
            DEFAULT_RESPONSE_MAX_BYTES,
            RESPONSE_MAX_BYTES_BOUNDS,
        );
        let dry_run = parse_flag(env_value("DRY_RUN").as_deref());
        let log_level = parse_log_level(env_value("LOG_LEVEL").as_deref(), DEFAULT_LOG_LEVEL);

        Self {
            scholar_id,
            publications_path,
            min_citations,
            request_timeout: Duration::from_millis(request_timeout_ms),
            response_max_bytes,
            dry_run,
            log_level,
        }
    }
}

#[derive(Debug, Error)]
pub enum CitationError {
    #[error("invalid scholar profile url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("scholar request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("scholar responded with status {0}")]
    Status(u16),

    #[error("{0}")]
    Body(&'static str),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("publications data is not valid: {0}")]
    Data(#[from] serde_json::Error),
}

impl CitationError {
    fn class(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::Request(error) if error.is_timeout() => "timeout",
            Self::Request(_) => "request",
            Self::Status(_) => "upstream_status",
            Self::Body(_) => "response_body",
            Self::Read { .. } => "read_publications",
            Self::Write { .. } => "write_publications",
            Self::Data(_) => "invalid_publications",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScholarPaper {
    pub title: String,
    pub citations: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CitationChange {
    pub title: String,
    pub before: Option<u32>,
    pub after: Option<u32>,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = RefresherConfig::from_env();
    let started_at = Instant::now();

    match refresh(&config).await {
        Ok(changed) => {
            log_event(
                &config,
                LogLevel::Info,
                "refresh_complete",
                serde_json::json!({
                    "changed": changed,
                    "dry_run": config.dry_run,
                    "duration_ms": started_at.elapsed().as_millis(),
                }),
            );
            Ok(())
        }
        Err(error) => {
            log_event(
                &config,
                LogLevel::Info,
                "refresh_failed",
                serde_json::json!({
                    "error_class": error.class(),
                    "message": error.to_string(),
                    "duration_ms": started_at.elapsed().as_millis(),
                }),
            );
            Err(error.into())
        }
    }
}

async fn refresh(config: &RefresherConfig) -> Result<usize, CitationError> {
    let profile_url = scholar_profile_url(&config.scholar_id)?;
    log_event(
        config,
        LogLevel::Info,
        "scholar_fetch",
        serde_json::json!({
            "scholar_id": config.scholar_id.as_str(),
            "timeout_ms": config.request_timeout.as_millis(),
        }),
    );

    let page = fetch_profile_page(&profile_url, config).await?;
    let papers = parse_profile(&page);
    log_event(
        config,
        LogLevel::Info,
        "scholar_papers",
        serde_json::json!({
            "count": papers.len(),
            "above_threshold": papers.iter().filter(|p| p.citations >= config.min_citations).count(),
        }),
    );

    for paper in papers.iter().filter(|p| p.citations >= config.min_citations) {
        log_event(
            config,
            LogLevel::Debug,
            "scholar_paper",
            serde_json::json!({ "title": paper.title.as_str(), "citations": paper.citations }),
        );
    }

    refresh_file(config, &papers)
}

fn refresh_file(config: &RefresherConfig, papers: &[ScholarPaper]) -> Result<usize, CitationError> {
    let mut entries = read_publications(&config.publications_path)?;
    let changes = apply_citations(&mut entries, papers, config.min_citations);

    for change in &changes {
        log_event(
            config,
            LogLevel::Info,
            "publication_updated",
            serde_json::json!({
                "title": change.title.as_str(),
                "before": change.before,
                "after": change.after,
            }),
        );
    }

    if !changes.is_empty() && !config.dry_run {
        write_publications(&config.publications_path, &entries)?;
    }

    Ok(changes.len())
}

fn scholar_profile_url(scholar_id: &str) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        SCHOLAR_PROFILE_URL,
        &[
            ("user", scholar_id),
            ("hl", "en"),
            ("cstart", "0"),
            ("pagesize", "100"),
            ("sortby", "cited"),
        ],
    )
}

async fn fetch_profile_page(url: &Url, config: &RefresherConfig) -> Result<String, CitationError> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .user_agent(USER_AGENT)
        .build()?;

    let response = client
        .get(url.clone())
        .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(CitationError::Status(response.status().as_u16()));
    }

    read_limited_body(response, config.response_max_bytes)
        .await
        .map_err(CitationError::Body)
}

async fn read_limited_body(
    response: reqwest::Response,
    max_response_bytes: usize,
) -> Result<String, &'static str> {
    let mut stream = response.bytes_stream();
    let mut body: Vec<u8> = Vec::with_capacity(64 * 1024);

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|_| "failed reading response body")?;

        if body.len() + chunk.len() > max_response_bytes {
            return Err("response body too large");
        }

        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).to_string())
}

/// Titles and citation counts from the rows of a Scholar profile page.
pub fn parse_profile(document_html: &str) -> Vec<ScholarPaper> {
    let document = Html::parse_document(document_html);
    let (Ok(row_selector), Ok(title_selector), Ok(cited_by_selector)) = (
        Selector::parse("tr.gsc_a_tr"),
        Selector::parse("a.gsc_a_at"),
        Selector::parse("a.gsc_a_ac"),
    ) else {
        return Vec::new();
    };

    document
        .select(&row_selector)
        .filter_map(|row| {
            let title = row.select(&title_selector).next().map(element_text)?;
            let citations = row
                .select(&cited_by_selector)
                .next()
                .map(element_text)
                .and_then(|text| text.parse::<u32>().ok())
                .unwrap_or(0);
            Some(ScholarPaper { title, citations })
        })
        .collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Citation count for `title`: an exact normalized match first, otherwise
/// the first paper sharing a leading prefix with it.
pub fn match_citations(title: &str, papers: &[ScholarPaper]) -> Option<u32> {
    let wanted = normalize_title(title);
    if wanted.is_empty() {
        return None;
    }

    let normalized: Vec<(String, u32)> = papers
        .iter()
        .map(|paper| (normalize_title(&paper.title), paper.citations))
        .filter(|(title, _)| !title.is_empty())
        .collect();

    if let Some((_, citations)) = normalized.iter().find(|(title, _)| *title == wanted) {
        return Some(*citations);
    }

    normalized
        .iter()
        .find(|(scholar, _)| {
            scholar.starts_with(prefix(&wanted)) || wanted.starts_with(prefix(scholar))
        })
        .map(|(_, citations)| *citations)
}

fn prefix(normalized: &str) -> &str {
    // Normalized titles are ASCII, so byte and char positions agree.
    &normalized[..normalized.len().min(TITLE_PREFIX_CHARS)]
}

/// Set each publication's citation count from `papers`. Entries without a
/// match, or below `min_citations`, lose their count.
pub fn apply_citations(
    entries: &mut [Publication],
    papers: &[ScholarPaper],
    min_citations: u32,
) -> Vec<CitationChange> {
    let mut changes = Vec::new();

    for entry in entries.iter_mut() {
        let after = match_citations(&entry.title, papers).filter(|count| *count >= min_citations);
        if entry.citations == after {
            continue;
        }

        changes.push(CitationChange {
            title: entry.title.clone(),
            before: entry.citations,
            after,
        });
        entry.citations = after;
    }

    changes
}

pub fn read_publications(path: &Path) -> Result<Vec<Publication>, CitationError> {
    let raw = fs::read_to_string(path).map_err(|source| CitationError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(publications::parse(&raw)?)
}

pub fn write_publications(path: &Path, entries: &[Publication]) -> Result<(), CitationError> {
    let mut serialized = serde_json::to_string_pretty(entries)?;
    serialized.push('\n');
    fs::write(path, serialized).map_err(|source| CitationError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_with_bounds<T>(raw: Option<&str>, default: T, bounds: (T, T)) -> T
where
    T: std::str::FromStr + PartialOrd,
{
    raw.and_then(|value| value.trim().parse::<T>().ok())
        .filter(|value| *value >= bounds.0 && *value <= bounds.1)
        .unwrap_or(default)
}

fn parse_env_non_empty_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|value| value.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes")
    )
}

fn parse_log_level(raw: Option<&str>, default: LogLevel) -> LogLevel {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("debug") => LogLevel::Debug,
        Some("info") => LogLevel::Info,
        _ => default,
    }
}

fn log_event(config: &RefresherConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(now_unix_seconds())),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    println!("{}", serde_json::Value::Object(payload));
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

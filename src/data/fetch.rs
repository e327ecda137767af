use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use reqwest::blocking::Client;
use thiserror::Error;

use super::model::ProductDataset;
use super::parser::parse_products;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("reading {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing CSV")]
    Parse(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Where a dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A successfully loaded dataset and what the parser dropped on the way.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub source: DataSource,
    pub dataset: ProductDataset,
    pub skipped_rows: usize,
}

pub type LoadResult = Result<LoadedData, LoadError>;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Fetch the CSV text of a source (blocking).
pub fn read_source(source: &DataSource) -> Result<String, LoadError> {
    match source {
        DataSource::Url(url) => {
            let client = Client::builder().build().map_err(|source| LoadError::Http {
                url: url.clone(),
                source,
            })?;
            fetch_text(&client, url)
        }
        DataSource::File(path) => std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// GET `url` and return the body. Any non-2xx status is an error.
fn fetch_text(client: &Client, url: &str) -> Result<String, LoadError> {
    let http_err = |source| LoadError::Http {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().map_err(http_err)?;
    if !response.status().is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    response.text().map_err(http_err)
}

/// Read and parse a source into a dataset (blocking).
pub fn load(source: DataSource) -> LoadResult {
    log::info!("Loading listings from {source}");
    let text = read_source(&source)?;
    let report = parse_products(&text)?;
    let dataset = ProductDataset::from_records(report.records);

    log::info!(
        "Loaded {} listings ({} brands, {} platforms) from {source}",
        dataset.len(),
        dataset.unique_brands.len(),
        dataset.unique_platforms.len()
    );

    Ok(LoadedData {
        source,
        dataset,
        skipped_rows: report.skipped_rows,
    })
}

/// Run [`load`] on a worker thread.
///
/// The result arrives on the returned receiver; `notify` runs after the
/// send so the UI can wake up. Dropping the receiver abandons the load: the
/// worker's result is discarded.
pub fn spawn_load<F>(source: DataSource, notify: F) -> Receiver<LoadResult>
where
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let label = source.to_string();
        if tx.send(load(source)).is_err() {
            log::debug!("Load of {label} finished after its receiver was dropped; discarding");
        }
        notify();
    });
    rx
}

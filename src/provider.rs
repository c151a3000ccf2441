//! Record providers: turn a validated [`Accession`] into a sequence and a description.
//!
//! - [`UniProtClient`] fetches the flat-file entry from the UniProtKB REST API.
//! - [`FlatFileStore`] reads a local Swiss-Prot `.dat`/`.txt` file.
//! - [`FastaStore`] reads a local FASTA file.
//!
//! Every provider performs a single blocking lookup per call and never retries.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use crate::accession::Accession;
use crate::config::Config;
use crate::error::LookupError;
use crate::seqio;
use crate::swissprot::{self, SwissProtEntry};

/// What a provider hands back for one accession.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinRecord {
    pub accession: String,
    pub sequence: String,
    pub description: String,
}

impl From<SwissProtEntry> for ProteinRecord {
    fn from(e: SwissProtEntry) -> Self {
        Self { accession: e.primary_accession().unwrap_or_default().to_string(), sequence: e.sequence, description: e.description }
    }
}

/// Data-access seam used by [`crate::session::Session`].
pub trait RecordProvider {
    fn fetch(&self, accession: &Accession) -> Result<ProteinRecord, LookupError>;
}

impl<P: RecordProvider + ?Sized> RecordProvider for Box<P> {
    fn fetch(&self, accession: &Accession) -> Result<ProteinRecord, LookupError> { (**self).fetch(accession) }
}

impl<P: RecordProvider + ?Sized> RecordProvider for &P {
    fn fetch(&self, accession: &Accession) -> Result<ProteinRecord, LookupError> { (**self).fetch(accession) }
}

/// Pick the entry listing `accession`, or fail with `NotFound`.
fn select_entry(entries: Vec<SwissProtEntry>, accession: &Accession) -> Result<SwissProtEntry, LookupError> {
    entries
        .into_iter()
        .find(|e| e.has_accession(accession.as_str()))
        .ok_or_else(|| LookupError::NotFound(accession.to_string()))
}

/// UniProtKB REST client.
pub struct UniProtClient {
    client: Client,
    runtime: Runtime,
    base_url: String,
}

impl UniProtClient {
    pub fn new(config: &Config) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        let runtime = Builder::new_current_thread().enable_all().build().map_err(LookupError::Runtime)?;
        Ok(Self { client, runtime, base_url: config.base_url().trim_end_matches('/').to_string() })
    }

    /// URL of the flat-file entry for `accession`.
    pub fn entry_url(&self, accession: &Accession) -> String {
        format!("{}/{}.txt", self.base_url, accession)
    }

    async fn fetch_text(&self, accession: &Accession) -> Result<String, LookupError> {
        let url = self.entry_url(accession);
        debug!(%url, "requesting entry");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(accession.to_string()));
        }
        if !status.is_success() {
            return Err(LookupError::Http { status: status.as_u16(), accession: accession.to_string() });
        }
        Ok(response.text().await?)
    }
}

impl RecordProvider for UniProtClient {
    fn fetch(&self, accession: &Accession) -> Result<ProteinRecord, LookupError> {
        let text = self.runtime.block_on(self.fetch_text(accession))?;
        let entries = swissprot::parse_entries(&text)?;
        // Obsolete entries come back empty; an entry not listing the accession is not the one asked for.
        let entry = select_entry(entries, accession)?;
        info!(%accession, length = entry.sequence.len(), "fetched entry from UniProtKB");
        Ok(entry.into())
    }
}

/// Local Swiss-Prot flat file holding one or more entries.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    path: PathBuf,
}

impl FlatFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
    pub fn path(&self) -> &Path { &self.path }
}

impl RecordProvider for FlatFileStore {
    fn fetch(&self, accession: &Accession) -> Result<ProteinRecord, LookupError> {
        let file = std::fs::File::open(&self.path)?;
        let entry = select_entry(swissprot::parse_reader(file)?, accession)?;
        info!(%accession, path = %self.path.display(), "read entry from flat file");
        Ok(entry.into())
    }
}

/// Local FASTA file.
#[derive(Debug, Clone)]
pub struct FastaStore {
    path: PathBuf,
}

impl FastaStore {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
    pub fn path(&self) -> &Path { &self.path }
}

impl RecordProvider for FastaStore {
    fn fetch(&self, accession: &Accession) -> Result<ProteinRecord, LookupError> {
        let rec = seqio::find_record(&self.path, accession.as_str())?
            .ok_or_else(|| LookupError::NotFound(accession.to_string()))?;
        info!(%accession, path = %self.path.display(), "read record from FASTA");
        Ok(ProteinRecord { accession: rec.accession, sequence: rec.sequence, description: rec.description })
    }
}

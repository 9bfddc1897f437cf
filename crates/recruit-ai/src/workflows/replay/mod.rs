//! File-backed candidate surface replaying a recorded candidate list.

mod parser;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info};

use crate::workflows::screening::{
    CandidateDetail, CandidatePresentation, CandidateSurface, SurfaceFault,
};
use parser::ReplayRecord;

#[derive(Debug)]
pub enum ReplayError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::Io(err) => write!(f, "failed to access replay data: {}", err),
            ReplayError::Csv(err) => write!(f, "invalid replay CSV data: {}", err),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Io(err) => Some(err),
            ReplayError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ReplayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ReplayError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Outreach action taken during a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutreachRecord {
    pub job_title: String,
    pub position: u32,
    pub card_text: String,
}

/// Greetings sent during a replay.
///
/// Clones share the same records, so a caller can keep a handle while the
/// surface is moved onto the screening thread.
#[derive(Debug, Clone, Default)]
pub struct OutreachLog {
    records: Arc<Mutex<Vec<OutreachRecord>>>,
}

impl OutreachLog {
    pub fn records(&self) -> Vec<OutreachRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Write every greeting recorded so far as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ReplayError> {
        let records = self.records();
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in &records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    fn push(&self, record: OutreachRecord) {
        self.lock().push(record);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<OutreachRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Candidate surface backed by a CSV recording.
///
/// Rows without a `job_title` are listed for every job. Opening a detail view
/// marks the row as seen, the way the live list does.
#[derive(Debug, Default)]
pub struct ReplaySurface {
    records: Vec<ReplayRecord>,
    base_dir: Option<PathBuf>,
    job_title: String,
    listing: Vec<usize>,
    open_detail: Option<u32>,
    outreach: OutreachLog,
    scrolls: u32,
}

impl ReplaySurface {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let mut surface = Self::from_reader(file)?;
        surface.base_dir = path.parent().map(Path::to_path_buf);
        Ok(surface)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReplayError> {
        let records = parser::parse_records(reader)?;
        Ok(Self {
            records,
            ..Self::default()
        })
    }

    pub fn outreach(&self) -> Vec<OutreachRecord> {
        self.outreach.records()
    }

    /// Shared handle to the greetings this surface records.
    pub fn outreach_log(&self) -> OutreachLog {
        self.outreach.clone()
    }

    pub fn scrolls(&self) -> u32 {
        self.scrolls
    }

    /// Write every outreach action as CSV.
    pub fn write_outreach_log<W: Write>(&self, writer: W) -> Result<(), ReplayError> {
        self.outreach.write_csv(writer)
    }

    fn record_index(&self, position: u32) -> Option<usize> {
        let offset = usize::try_from(position).ok()?.checked_sub(1)?;
        self.listing.get(offset).copied()
    }

    fn not_rendered(position: u32) -> SurfaceFault {
        SurfaceFault::Load(format!("position {position} not rendered"))
    }

    fn load_image(&self, path: &str) -> Result<Vec<u8>, SurfaceFault> {
        let path = match &self.base_dir {
            Some(base) => base.join(path),
            None => PathBuf::from(path),
        };
        std::fs::read(&path)
            .map_err(|err| SurfaceFault::Load(format!("image {}: {err}", path.display())))
    }
}

impl CandidateSurface for ReplaySurface {
    fn select_job(&mut self, job_title: &str) -> Result<(), SurfaceFault> {
        self.job_title = job_title.to_string();
        self.listing = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                record
                    .job_title
                    .as_deref()
                    .map_or(true, |title| title == job_title)
            })
            .map(|(index, _)| index)
            .collect();
        self.open_detail = None;
        info!(job_title, candidates = self.listing.len(), "replay list selected");
        Ok(())
    }

    fn is_position_already_seen(&mut self, position: u32) -> Result<bool, SurfaceFault> {
        let index = self
            .record_index(position)
            .ok_or_else(|| Self::not_rendered(position))?;
        Ok(self.records[index].seen)
    }

    fn read_age(&mut self, position: u32) -> Result<u32, SurfaceFault> {
        let index = self
            .record_index(position)
            .ok_or_else(|| Self::not_rendered(position))?;
        self.records[index]
            .age
            .ok_or_else(|| SurfaceFault::Load(format!("age at position {position} not rendered")))
    }

    fn candidate_card(&mut self, position: u32) -> Result<CandidatePresentation, SurfaceFault> {
        let index = self.record_index(position).ok_or_else(|| {
            SurfaceFault::Unclassified(format!("no candidate card at position {position}"))
        })?;
        Ok(CandidatePresentation {
            position,
            card_text: self.records[index].card_text.clone(),
        })
    }

    fn render_candidate_detail(
        &mut self,
        candidate: &CandidatePresentation,
    ) -> Result<CandidateDetail, SurfaceFault> {
        let index = self.record_index(candidate.position).ok_or_else(|| {
            SurfaceFault::Unclassified(format!("no candidate at position {}", candidate.position))
        })?;
        let image_png = match self.records[index].image_path.clone() {
            Some(path) => Some(self.load_image(&path)?),
            None => None,
        };

        let record = &mut self.records[index];
        record.seen = true;
        self.open_detail = Some(candidate.position);
        Ok(CandidateDetail {
            text: record.detail_text.clone(),
            image_png,
        })
    }

    fn perform_outreach(&mut self, candidate: &CandidatePresentation) -> Result<(), SurfaceFault> {
        if self.open_detail != Some(candidate.position) {
            return Err(SurfaceFault::Unclassified(format!(
                "outreach requested for position {} without an open detail view",
                candidate.position
            )));
        }
        let index = self.record_index(candidate.position).ok_or_else(|| {
            SurfaceFault::Unclassified(format!("no candidate at position {}", candidate.position))
        })?;
        if self.records[index].outreach_blocked {
            return Err(SurfaceFault::Interaction(format!(
                "greeting button at position {} is covered by another element",
                candidate.position
            )));
        }

        self.outreach.push(OutreachRecord {
            job_title: self.job_title.clone(),
            position: candidate.position,
            card_text: candidate.card_text.clone(),
        });
        Ok(())
    }

    fn dismiss_detail(&mut self, candidate: &CandidatePresentation) -> Result<(), SurfaceFault> {
        if self.open_detail.take().is_none() {
            debug!(position = candidate.position, "no detail view open");
        }
        Ok(())
    }

    fn scroll_for_more(&mut self) -> Result<(), SurfaceFault> {
        self.scrolls += 1;
        Ok(())
    }
}

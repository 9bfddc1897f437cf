//! Contract with the document surface that lists candidates and performs clicks.

/// Handle to one list position plus the text visible on its card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePresentation {
    pub position: u32,
    pub card_text: String,
}

/// Opened detail view of a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateDetail {
    pub text: String,
    pub image_png: Option<Vec<u8>>,
}

/// Fault reported by the surface, already classified by the driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceFault {
    /// The surface refused an action, e.g. an overlapping element swallowed a click.
    #[error("interaction rejected: {0}")]
    Interaction(String),
    /// The requested element has not been rendered yet.
    #[error("content not loaded: {0}")]
    Load(String),
    #[error("{0}")]
    Unclassified(String),
}

/// UI driver collaborator. Positions are 1-based.
pub trait CandidateSurface {
    /// Bring the candidate list for `job_title` into view.
    fn select_job(&mut self, job_title: &str) -> Result<(), SurfaceFault>;
    fn is_position_already_seen(&mut self, position: u32) -> Result<bool, SurfaceFault>;
    fn read_age(&mut self, position: u32) -> Result<u32, SurfaceFault>;
    fn candidate_card(&mut self, position: u32) -> Result<CandidatePresentation, SurfaceFault>;
    fn render_candidate_detail(
        &mut self,
        candidate: &CandidatePresentation,
    ) -> Result<CandidateDetail, SurfaceFault>;
    fn perform_outreach(&mut self, candidate: &CandidatePresentation) -> Result<(), SurfaceFault>;
    fn dismiss_detail(&mut self, candidate: &CandidatePresentation) -> Result<(), SurfaceFault>;
    fn scroll_for_more(&mut self) -> Result<(), SurfaceFault>;
}

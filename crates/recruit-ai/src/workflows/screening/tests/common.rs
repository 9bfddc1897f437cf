use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::JobConfig;
use crate::workflows::screening::audit::CollectingAuditSink;
use crate::workflows::screening::domain::{JobRequirements, QualificationVerdict};
use crate::workflows::screening::evaluation::{CandidateView, Gate, GateKind, GateVerdict};
use crate::workflows::screening::oracle::{
    AdjudicationRequest, OracleFault, QualificationOracle, QualificationOracleAdapter,
};
use crate::workflows::screening::run::CandidateScreener;
use crate::workflows::screening::stats::RunStats;
use crate::workflows::screening::surface::{
    CandidateDetail, CandidatePresentation, CandidateSurface, SurfaceFault,
};

pub(super) const SCENARIO_TEXT: &str = "10-15K 张三 28岁 本科 离职-随时到岗";

pub(super) fn scenario_requirements() -> JobRequirements {
    JobRequirements {
        age_lower_bound: 20,
        age_upper_bound: 35,
        maximum_salary: 20_000,
        min_education_rank: 5,
        require_off_the_job: true,
        required_keywords: Vec::new(),
        free_text_criteria: "本科及以上，两年以上运营经验".to_string(),
    }
}

pub(super) fn job(title: &str, max_idx: u32) -> JobConfig {
    JobConfig {
        job_title: title.to_string(),
        url: Some("https://example.com/recommend".to_string()),
        max_idx,
        job_requirements: scenario_requirements(),
    }
}

pub(super) fn qualified(name: &str) -> QualificationVerdict {
    QualificationVerdict {
        is_qualified: true,
        reason: format!("候选人{name}符合该职位，三年运营经验"),
    }
}

pub(super) fn not_qualified(name: &str) -> QualificationVerdict {
    QualificationVerdict {
        is_qualified: false,
        reason: format!("候选人{name}不符合该职位，因为期望薪资高于职位最低薪资的1.5倍"),
    }
}

/// Gate wrapper that counts how often the inner gate runs.
pub(super) struct CountingGate {
    inner: Box<dyn Gate>,
    calls: Arc<AtomicUsize>,
}

impl CountingGate {
    pub(super) fn wrap(inner: Box<dyn Gate>) -> (Box<dyn Gate>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let gate = Box::new(Self {
            inner,
            calls: calls.clone(),
        });
        (gate, calls)
    }
}

impl Gate for CountingGate {
    fn kind(&self) -> GateKind {
        self.inner.kind()
    }

    fn check(&self, candidate: &CandidateView<'_>) -> GateVerdict {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.check(candidate)
    }
}

/// Oracle that answers from a script, repeating the last answer when it runs out.
#[derive(Default)]
pub(super) struct ScriptedOracle {
    answers: Mutex<VecDeque<Result<QualificationVerdict, OracleFault>>>,
    requests: Mutex<Vec<(String, String)>>,
}

impl ScriptedOracle {
    pub(super) fn new(
        answers: impl IntoIterator<Item = Result<QualificationVerdict, OracleFault>>,
    ) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            requests: Mutex::default(),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.requests.lock().expect("oracle mutex poisoned").len()
    }

    /// `(criteria, candidate text)` for every call, in order.
    pub(super) fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().expect("oracle mutex poisoned").clone()
    }
}

impl QualificationOracle for ScriptedOracle {
    fn adjudicate(
        &self,
        request: &AdjudicationRequest<'_>,
    ) -> Result<QualificationVerdict, OracleFault> {
        self.requests.lock().expect("oracle mutex poisoned").push((
            request.criteria.to_string(),
            request.candidate.text.clone(),
        ));
        let mut answers = self.answers.lock().expect("oracle mutex poisoned");
        if answers.len() > 1 {
            answers.pop_front().expect("non-empty script")
        } else {
            answers
                .front()
                .cloned()
                .unwrap_or_else(|| Err(OracleFault::Transport("script exhausted".to_string())))
        }
    }
}

/// Scripted behaviour of one list position.
#[derive(Debug, Clone)]
pub(super) struct ScriptedCard {
    pub(super) seen: Result<bool, SurfaceFault>,
    pub(super) age: Result<u32, SurfaceFault>,
    pub(super) card_text: String,
    pub(super) detail: Result<CandidateDetail, SurfaceFault>,
    pub(super) outreach: Result<(), SurfaceFault>,
}

impl ScriptedCard {
    pub(super) fn candidate(age: u32, card_text: &str) -> Self {
        Self {
            seen: Ok(false),
            age: Ok(age),
            card_text: card_text.to_string(),
            detail: Ok(CandidateDetail {
                text: format!("详情 {card_text}"),
                image_png: None,
            }),
            outreach: Ok(()),
        }
    }

    pub(super) fn seen() -> Self {
        Self {
            seen: Ok(true),
            ..Self::candidate(30, "")
        }
    }
}

/// In-memory surface with call journaling.
#[derive(Debug, Default)]
pub(super) struct ScriptedSurface {
    pub(super) cards: Vec<ScriptedCard>,
    pub(super) select_faults: Vec<(String, SurfaceFault)>,
    pub(super) selected: Vec<String>,
    pub(super) visited: Vec<u32>,
    pub(super) cards_read: Vec<u32>,
    pub(super) outreach: Vec<u32>,
    pub(super) dismissed: Vec<u32>,
    pub(super) scrolls: u32,
}

impl ScriptedSurface {
    pub(super) fn new(cards: Vec<ScriptedCard>) -> Self {
        Self {
            cards,
            ..Self::default()
        }
    }

    fn card(&self, position: u32) -> Option<&ScriptedCard> {
        self.cards.get(position as usize - 1)
    }
}

impl CandidateSurface for ScriptedSurface {
    fn select_job(&mut self, job_title: &str) -> Result<(), SurfaceFault> {
        self.selected.push(job_title.to_string());
        match self
            .select_faults
            .iter()
            .find(|(title, _)| title == job_title)
        {
            Some((_, fault)) => Err(fault.clone()),
            None => Ok(()),
        }
    }

    fn is_position_already_seen(&mut self, position: u32) -> Result<bool, SurfaceFault> {
        self.visited.push(position);
        match self.card(position) {
            Some(card) => card.seen.clone(),
            None => Err(SurfaceFault::Load(format!("position {position} missing"))),
        }
    }

    fn read_age(&mut self, position: u32) -> Result<u32, SurfaceFault> {
        match self.card(position) {
            Some(card) => card.age.clone(),
            None => Err(SurfaceFault::Load(format!("position {position} missing"))),
        }
    }

    fn candidate_card(&mut self, position: u32) -> Result<CandidatePresentation, SurfaceFault> {
        self.cards_read.push(position);
        match self.card(position) {
            Some(card) => Ok(CandidatePresentation {
                position,
                card_text: card.card_text.clone(),
            }),
            None => Err(SurfaceFault::Unclassified(format!(
                "no card at position {position}"
            ))),
        }
    }

    fn render_candidate_detail(
        &mut self,
        candidate: &CandidatePresentation,
    ) -> Result<CandidateDetail, SurfaceFault> {
        self.card(candidate.position)
            .map(|card| card.detail.clone())
            .unwrap_or_else(|| Err(SurfaceFault::Unclassified("missing".to_string())))
    }

    fn perform_outreach(&mut self, candidate: &CandidatePresentation) -> Result<(), SurfaceFault> {
        let result = self
            .card(candidate.position)
            .map(|card| card.outreach.clone())
            .unwrap_or_else(|| Err(SurfaceFault::Unclassified("missing".to_string())));
        if result.is_ok() {
            self.outreach.push(candidate.position);
        }
        result
    }

    fn dismiss_detail(&mut self, candidate: &CandidatePresentation) -> Result<(), SurfaceFault> {
        self.dismissed.push(candidate.position);
        Ok(())
    }

    fn scroll_for_more(&mut self) -> Result<(), SurfaceFault> {
        self.scrolls += 1;
        Ok(())
    }
}

pub(super) struct Harness {
    pub(super) screener: CandidateScreener<ScriptedSurface, Arc<ScriptedOracle>>,
    pub(super) oracle: Arc<ScriptedOracle>,
    pub(super) audit: CollectingAuditSink,
    pub(super) stats: RunStats,
}

pub(super) fn harness(
    cards: Vec<ScriptedCard>,
    answers: impl IntoIterator<Item = Result<QualificationVerdict, OracleFault>>,
) -> Harness {
    harness_with_surface(ScriptedSurface::new(cards), answers)
}

pub(super) fn harness_with_surface(
    surface: ScriptedSurface,
    answers: impl IntoIterator<Item = Result<QualificationVerdict, OracleFault>>,
) -> Harness {
    let oracle = Arc::new(ScriptedOracle::new(answers));
    let audit = CollectingAuditSink::default();
    let stats = RunStats::new();
    let adapter = QualificationOracleAdapter::new(oracle.clone(), Arc::new(audit.clone()));
    let screener = CandidateScreener::new(surface, adapter, stats.clone())
        .with_settle_delay(Duration::ZERO);

    Harness {
        screener,
        oracle,
        audit,
        stats,
    }
}

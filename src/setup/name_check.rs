use crate::api::{ApiError, ConfigApi, JiraConfiguration};
use std::time::{Duration, Instant};

pub const DEFAULT_NAME_CHECK_DEBOUNCE: Duration = Duration::from_millis(500);

/// One issued availability lookup. Only the request carrying the latest
/// sequence number may change the checker's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCheckRequest {
    seq: u64,
    name: String,
}

impl NameCheckRequest {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameCheckOutcome {
    Resolved { available: bool },
    Stale,
    Failed(String),
}

#[derive(Debug, Clone)]
struct PendingCheck {
    request: NameCheckRequest,
    due_at: Instant,
}

/// Debounced name-uniqueness check. Scheduling cancels the previous pending
/// timer; responses for superseded requests are discarded.
#[derive(Debug, Clone)]
pub struct NameAvailabilityChecker {
    delay: Duration,
    original_name: Option<String>,
    latest_seq: u64,
    pending: Option<PendingCheck>,
    in_flight: Option<NameCheckRequest>,
    availability: Option<bool>,
}

impl NameAvailabilityChecker {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            original_name: None,
            latest_seq: 0,
            pending: None,
            in_flight: None,
            availability: None,
        }
    }

    /// Edit mode: the configuration's own name is always available.
    pub fn for_edit(delay: Duration, original_name: &str) -> Self {
        Self {
            original_name: Some(original_name.to_string()),
            availability: Some(true),
            ..Self::new(delay)
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn availability(&self) -> Option<bool> {
        self.availability
    }

    pub fn is_checking(&self) -> bool {
        self.pending.is_some() || self.in_flight.is_some()
    }

    /// Deadline of the scheduled check, if any.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due_at)
    }

    /// Forgets the last result and supersedes any scheduled or in-flight
    /// request. Called when the name field changes.
    pub fn reset(&mut self) {
        self.latest_seq += 1;
        self.pending = None;
        self.availability = None;
    }

    fn is_original_name(&self, name: &str) -> bool {
        self.original_name.as_deref() == Some(name)
    }

    fn issue(&mut self, name: &str) -> NameCheckRequest {
        self.latest_seq += 1;
        self.pending = None;
        NameCheckRequest {
            seq: self.latest_seq,
            name: name.to_string(),
        }
    }

    /// Schedules a check for `name`. Returns the result right away when no
    /// network call is needed.
    pub fn check_name_availability(&mut self, name: &str, now: Instant) -> Option<bool> {
        let request = self.issue(name);
        if self.is_original_name(name) {
            self.availability = Some(true);
            return Some(true);
        }
        if name.trim().is_empty() {
            self.availability = None;
            return None;
        }
        self.pending = Some(PendingCheck {
            request,
            due_at: now + self.delay,
        });
        None
    }

    /// Takes the scheduled request once its debounce window has elapsed.
    pub fn poll_due(&mut self, now: Instant) -> Option<NameCheckRequest> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.due_at <= now);
        if !due {
            return None;
        }
        let request = self.pending.take()?.request;
        self.in_flight = Some(request.clone());
        Some(request)
    }

    pub fn complete(
        &mut self,
        request: &NameCheckRequest,
        result: Result<Vec<JiraConfiguration>, ApiError>,
    ) -> NameCheckOutcome {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.seq == request.seq)
        {
            self.in_flight = None;
        }
        if request.seq != self.latest_seq {
            return NameCheckOutcome::Stale;
        }
        match result {
            Ok(configs) => {
                let wanted = request.name.to_lowercase();
                let exists = configs
                    .iter()
                    .any(|config| config.name.to_lowercase() == wanted);
                self.availability = Some(!exists);
                NameCheckOutcome::Resolved { available: !exists }
            }
            Err(err) => {
                self.availability = None;
                NameCheckOutcome::Failed(err.to_string())
            }
        }
    }

    /// Runs the scheduled check if it is due.
    pub fn run_due<A: ConfigApi>(
        &mut self,
        api: &A,
        now: Instant,
    ) -> Option<(NameCheckRequest, NameCheckOutcome)> {
        let request = self.poll_due(now)?;
        let outcome = self.complete(&request, api.list_configurations());
        Some((request, outcome))
    }

    /// Checks `name` immediately, superseding anything scheduled or in flight.
    pub fn check_now<A: ConfigApi>(&mut self, api: &A, name: &str) -> NameCheckOutcome {
        let request = self.issue(name);
        if self.is_original_name(name) {
            self.availability = Some(true);
            return NameCheckOutcome::Resolved { available: true };
        }
        self.in_flight = Some(request.clone());
        self.complete(&request, api.list_configurations())
    }
}

impl Default for NameAvailabilityChecker {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_CHECK_DEBOUNCE)
    }
}

//! The directory registration handshake.
//!
//! The registrar is an explicit state machine:
//!
//! ```text
//! Idle -> Discovering -> Registering(0) -> ... -> Registering(n-1) -> Verifying -> Done
//! ```
//!
//! Each call to [`Registrar::advance`] performs the exchange belonging to the
//! current state and moves to the next one. Faults are recorded against the
//! step that raised them and never stop the remaining steps; once the sequence
//! is over the registrar lands in `Failed` carrying the first fault, or in
//! `Done` when every exchange completed. A directory that is reached but
//! answers discovery with an error status only produces a warning.

use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{info, instrument, warn};

use super::client::{DirectoryClient, DiscoveryOutcome};
use super::descriptor::RegistrationDescriptor;
use crate::domains::resources::Link;

/// A step of the handshake that can raise a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStep {
    /// The initial discovery request.
    Discovering,
    /// Registration of the resource at this index.
    Registering(usize),
    /// The confirming discovery request.
    Verifying,
}

impl fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovering => write!(f, "discovery"),
            Self::Registering(i) => write!(f, "registration #{}", i),
            Self::Verifying => write!(f, "verification"),
        }
    }
}

/// State of the registrar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrarState {
    Idle,
    Discovering,
    Registering(usize),
    Verifying,
    Done,
    Failed { step: RegistrationStep, cause: String },
}

impl RegistrarState {
    /// Whether the handshake is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed { .. })
    }
}

/// A transport-level fault raised by one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFault {
    pub step: RegistrationStep,
    pub cause: String,
}

impl fmt::Display for StepFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.step, self.cause)
    }
}

/// A non-fatal observation raised by one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepWarning {
    pub step: RegistrationStep,
    pub message: String,
}

impl fmt::Display for StepWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.step, self.message)
    }
}

/// What happened to one resource's registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The directory accepted the registration.
    Registered {
        status: u16,
        location: Option<String>,
    },
    /// The directory answered with a non-success status.
    Rejected { status: u16 },
    /// The exchange itself failed.
    Failed { cause: String },
}

/// One resource's registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRegistration {
    pub endpoint: String,
    pub resource_path: String,
    pub outcome: RegistrationOutcome,
}

impl ResourceRegistration {
    pub fn is_registered(&self) -> bool {
        matches!(self.outcome, RegistrationOutcome::Registered { .. })
    }
}

/// Everything observed during one registrar run.
#[derive(Debug, Clone)]
pub struct RegistrationReport {
    /// Listing returned by the initial discovery, if it succeeded.
    pub initial_listing: Option<Vec<Link>>,

    /// One entry per attempted resource, in registration order.
    pub registrations: Vec<ResourceRegistration>,

    /// Listing returned by the confirming discovery, if it succeeded.
    pub final_listing: Option<Vec<Link>>,

    /// Faults in the order they were raised.
    pub faults: Vec<StepFault>,

    /// Diagnostics that did not affect the terminal state.
    pub warnings: Vec<StepWarning>,

    /// Terminal state.
    pub state: RegistrarState,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RegistrationReport {
    /// Number of resources the directory accepted.
    pub fn registered_count(&self) -> usize {
        self.registrations.iter().filter(|r| r.is_registered()).count()
    }

    /// Registered resource paths the final listing mentions.
    pub fn confirmed_paths(&self) -> Vec<&str> {
        let Some(listing) = &self.final_listing else {
            return Vec::new();
        };
        self.registrations
            .iter()
            .filter(|r| r.is_registered())
            .map(|r| r.resource_path.as_str())
            .filter(|path| listing_mentions(listing, path))
            .collect()
    }
}

/// Drives the registration handshake against one directory.
pub struct Registrar<C: DirectoryClient> {
    client: C,
    descriptors: Vec<RegistrationDescriptor>,
    state: RegistrarState,
    initial_listing: Option<Vec<Link>>,
    registrations: Vec<ResourceRegistration>,
    final_listing: Option<Vec<Link>>,
    faults: Vec<StepFault>,
    warnings: Vec<StepWarning>,
    started_at: DateTime<Utc>,
}

impl<C: DirectoryClient> Registrar<C> {
    /// Create a registrar that registers `descriptors` in order.
    pub fn new(client: C, descriptors: Vec<RegistrationDescriptor>) -> Self {
        Self {
            client,
            descriptors,
            state: RegistrarState::Idle,
            initial_listing: None,
            registrations: Vec::new(),
            final_listing: None,
            faults: Vec::new(),
            warnings: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &RegistrarState {
        &self.state
    }

    /// Faults raised so far.
    pub fn faults(&self) -> &[StepFault] {
        &self.faults
    }

    /// Warnings raised so far.
    pub fn warnings(&self) -> &[StepWarning] {
        &self.warnings
    }

    /// Perform the current state's exchange and move to the next state.
    ///
    /// Terminal states are left unchanged.
    pub async fn advance(&mut self) -> &RegistrarState {
        let next = match self.state {
            RegistrarState::Idle => {
                self.started_at = Utc::now();
                RegistrarState::Discovering
            }
            RegistrarState::Discovering => {
                self.initial_listing = self.discover(RegistrationStep::Discovering).await;
                match self.initial_listing.as_ref().map(Vec::len) {
                    Some(0) => self.warn(
                        RegistrationStep::Discovering,
                        "Directory returned an empty listing",
                    ),
                    Some(count) => {
                        info!("Directory lists {} resource(s) before registration", count)
                    }
                    None => {}
                }
                self.after_registration(0)
            }
            RegistrarState::Registering(index) => {
                self.register(index).await;
                self.after_registration(index + 1)
            }
            RegistrarState::Verifying => {
                self.final_listing = self.discover(RegistrationStep::Verifying).await;
                self.log_verification();
                match self.faults.first() {
                    Some(fault) => RegistrarState::Failed {
                        step: fault.step,
                        cause: fault.cause.clone(),
                    },
                    None => RegistrarState::Done,
                }
            }
            RegistrarState::Done | RegistrarState::Failed { .. } => return &self.state,
        };

        self.state = next;
        &self.state
    }

    /// Advance until a terminal state and report what happened.
    #[instrument(skip_all, name = "registration")]
    pub async fn run(mut self) -> RegistrationReport {
        info!("Registering {} resource(s)", self.descriptors.len());
        while !self.state.is_terminal() {
            self.advance().await;
        }

        match &self.state {
            RegistrarState::Done => info!(
                "Registration finished: {}/{} resource(s) registered",
                self.registrations.iter().filter(|r| r.is_registered()).count(),
                self.descriptors.len()
            ),
            RegistrarState::Failed { step, cause } => {
                warn!("Registration finished with faults, first at {}: {}", step, cause)
            }
            _ => {}
        }

        RegistrationReport {
            initial_listing: self.initial_listing,
            registrations: self.registrations,
            final_listing: self.final_listing,
            faults: self.faults,
            warnings: self.warnings,
            state: self.state,
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }

    fn after_registration(&self, next: usize) -> RegistrarState {
        if next < self.descriptors.len() {
            RegistrarState::Registering(next)
        } else {
            RegistrarState::Verifying
        }
    }

    async fn discover(&mut self, step: RegistrationStep) -> Option<Vec<Link>> {
        match self.client.discover().await {
            Ok(DiscoveryOutcome::Listing(links)) => Some(links),
            Ok(DiscoveryOutcome::UnexpectedStatus { status }) => {
                self.warn(
                    step,
                    format!("Directory answered discovery with status {}", status),
                );
                None
            }
            Err(e) => {
                self.fault(step, e.to_string());
                None
            }
        }
    }

    async fn register(&mut self, index: usize) {
        let Some(descriptor) = self.descriptors.get(index).cloned() else {
            return;
        };
        let endpoint = descriptor.endpoint();
        info!("Registering resource: {}", descriptor.resource_path);

        let outcome = match self.client.register(&descriptor).await {
            Ok(response) if response.is_success() => {
                info!(
                    "Registered {} ({}), location: {}",
                    descriptor.resource_path,
                    response.status,
                    response.location.as_deref().unwrap_or("-")
                );
                RegistrationOutcome::Registered {
                    status: response.status,
                    location: response.location,
                }
            }
            Ok(response) => {
                warn!(
                    "Directory rejected {} with status {}",
                    descriptor.resource_path, response.status
                );
                RegistrationOutcome::Rejected {
                    status: response.status,
                }
            }
            Err(e) => {
                let cause = format!("{}: {}", descriptor.resource_path, e);
                self.fault(RegistrationStep::Registering(index), cause.clone());
                RegistrationOutcome::Failed { cause }
            }
        };

        self.registrations.push(ResourceRegistration {
            endpoint,
            resource_path: descriptor.resource_path,
            outcome,
        });
    }

    fn fault(&mut self, step: RegistrationStep, cause: String) {
        let fault = StepFault { step, cause };
        warn!("{}", fault);
        self.faults.push(fault);
    }

    fn warn(&mut self, step: RegistrationStep, message: impl Into<String>) {
        let warning = StepWarning {
            step,
            message: message.into(),
        };
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn log_verification(&self) {
        let Some(listing) = &self.final_listing else {
            return;
        };
        info!("Directory lists {} resource(s) after registration", listing.len());
        for registration in self.registrations.iter().filter(|r| r.is_registered()) {
            if !listing_mentions(listing, &registration.resource_path) {
                info!(
                    "Listing does not mention {} (directories may list registrations elsewhere)",
                    registration.resource_path
                );
            }
        }
    }
}

fn listing_mentions(listing: &[Link], path: &str) -> bool {
    listing.iter().any(|link| link.target.ends_with(path))
}

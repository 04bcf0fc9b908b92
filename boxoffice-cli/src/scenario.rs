use boxoffice_core::{
    BookingCommand, BookingError, BookingProcessor, Seat, Session, SessionError, SessionObserver,
    User,
};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::app_config::{Action, Config, StepConfig};

/// A validated scripted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Execute {
        command: BookingCommand,
        seat_id: String,
        user: User,
    },
    Undo,
}

/// Counts of what happened during a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub undone: usize,
    pub empty_undos: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} succeeded, {} failed, {} undone",
            self.succeeded, self.failed, self.undone
        )
    }
}

/// The session, users and command script built from configuration
#[derive(Debug, Clone)]
pub struct Demo {
    pub session: Session,
    pub users: Vec<User>,
    pub steps: Vec<Step>,
}

impl Demo {
    /// Build the session and check every step before anything runs.
    pub fn from_config(config: &Config) -> Result<Self, ScenarioError> {
        let mut session = Session::new(config.session.id.clone(), config.session.starts_at)
            .with_duplicate_policy(config.session.duplicate_seats);
        for seat in &config.session.seats {
            session.add_seat(Seat::new(seat.id.clone(), seat.row, seat.number))?;
        }

        let mut users_by_id = HashMap::new();
        let mut users = Vec::with_capacity(config.users.len());
        for entry in &config.users {
            let user = User::new(entry.id.clone(), entry.name.clone());
            if users_by_id.insert(user.id.clone(), user.clone()).is_some() {
                return Err(ScenarioError::DuplicateUser(user.id));
            }
            users.push(user);
        }

        let steps = config
            .scenario
            .steps
            .iter()
            .enumerate()
            .map(|(position, step)| resolve_step(position + 1, step, &users_by_id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            session,
            users,
            steps,
        })
    }

    /// Run every step in order through `processor`.
    pub fn run<O: SessionObserver>(&mut self, processor: &mut BookingProcessor<O>) -> RunSummary {
        let mut summary = RunSummary::default();

        for step in &self.steps {
            match step {
                Step::Execute {
                    command,
                    seat_id,
                    user,
                } => {
                    let outcome =
                        processor.execute_command(*command, &mut self.session, seat_id, user);
                    if outcome.success {
                        summary.succeeded += 1;
                    } else {
                        summary.failed += 1;
                    }
                }
                Step::Undo => match processor.undo_last(&mut self.session) {
                    Ok(_) => summary.undone += 1,
                    Err(BookingError::EmptyHistory) => {
                        tracing::info!("Nothing to undo");
                        summary.empty_undos += 1;
                    }
                    Err(e) => {
                        tracing::warn!("Undo failed: {}", e);
                    }
                },
            }
        }

        summary
    }
}

fn resolve_step(
    position: usize,
    step: &StepConfig,
    users: &HashMap<String, User>,
) -> Result<Step, ScenarioError> {
    let command = match step.action {
        Action::Reserve => BookingCommand::Reserve,
        Action::Cancel => BookingCommand::Cancel,
        Action::Purchase => BookingCommand::Purchase,
        Action::Undo => return Ok(Step::Undo),
    };

    let seat_id = step.seat.clone().ok_or(ScenarioError::MissingField {
        step: position,
        field: "seat",
    })?;
    let user_id = step.user.as_deref().ok_or(ScenarioError::MissingField {
        step: position,
        field: "user",
    })?;
    let user = users
        .get(user_id)
        .cloned()
        .ok_or_else(|| ScenarioError::UnknownUser {
            step: position,
            user: user_id.to_string(),
        })?;

    Ok(Step::Execute {
        command,
        seat_id,
        user,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("Step {step}: missing `{field}`")]
    MissingField { step: usize, field: &'static str },

    #[error("Step {step}: unknown user {user}")]
    UnknownUser { step: usize, user: String },

    #[error("Duplicate user id: {0}")]
    DuplicateUser(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

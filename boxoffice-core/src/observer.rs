use tracing::{debug, info};

use crate::outcome::CommandOutcome;
use crate::session::Session;

/// Receives the narration a processor produces while it runs commands.
///
/// `on_outcome` is called for every execute and undo attempt, `on_listing`
/// after each successful execution and after each undo.
pub trait SessionObserver {
    fn on_outcome(&mut self, outcome: &CommandOutcome);

    fn on_listing(&mut self, session: &Session);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SessionObserver for NullObserver {
    fn on_outcome(&mut self, _outcome: &CommandOutcome) {}

    fn on_listing(&mut self, _session: &Session) {}
}

/// Forwards narration to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SessionObserver for TracingObserver {
    fn on_outcome(&mut self, outcome: &CommandOutcome) {
        info!(
            command = %outcome.command,
            seat = %outcome.seat_id,
            success = outcome.success,
            "{}",
            outcome.message
        );
    }

    fn on_listing(&mut self, session: &Session) {
        info!("{}", session.header());
        for seat in session.list_seats() {
            debug!("{}", seat);
        }
    }
}

use boxoffice_core::{CommandOutcome, Session, SessionObserver, TracingObserver};
use serde::Deserialize;
use serde_json::json;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// Narration goes to the log instead of the writer
    Log,
}

/// Writes the booking narration to a terminal or any other writer.
pub struct ConsoleObserver<W: Write> {
    out: W,
    format: ReportFormat,
}

impl ConsoleObserver<io::Stdout> {
    pub fn stdout(format: ReportFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W, format: ReportFormat) -> Self {
        Self { out, format }
    }

    /// Free-form line that is not tied to a command (announcements, summary).
    pub fn note(&mut self, message: &str) {
        let result = match self.format {
            ReportFormat::Text => writeln!(self.out, "{}", message),
            ReportFormat::Json => writeln!(self.out, "{}", json!({ "note": message })),
            ReportFormat::Log => {
                tracing::info!("{}", message);
                Ok(())
            }
        };
        self.report_io(result);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn report_io(&self, result: io::Result<()>) {
        if let Err(e) = result {
            tracing::warn!("Failed to write report: {}", e);
        }
    }
}

impl<W: Write> SessionObserver for ConsoleObserver<W> {
    fn on_outcome(&mut self, outcome: &CommandOutcome) {
        let result = match self.format {
            ReportFormat::Text => writeln!(self.out, "{}", outcome.message),
            ReportFormat::Json => match serde_json::to_string(outcome) {
                Ok(line) => writeln!(self.out, "{}", line),
                Err(e) => Err(io::Error::other(e)),
            },
            ReportFormat::Log => {
                TracingObserver.on_outcome(outcome);
                Ok(())
            }
        };
        self.report_io(result);
    }

    fn on_listing(&mut self, session: &Session) {
        let result = match self.format {
            ReportFormat::Text => writeln!(self.out, "\n{}\n", session),
            ReportFormat::Json => writeln!(
                self.out,
                "{}",
                json!({
                    "session": session.id(),
                    "starts_at": session.starts_at(),
                    "seats": session.snapshot(),
                })
            ),
            ReportFormat::Log => {
                TracingObserver.on_listing(session);
                Ok(())
            }
        };
        self.report_io(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_core::{BookingCommand, BookingProcessor, Seat, User};
    use chrono::{TimeZone, Utc};

    fn session() -> Session {
        let mut session = Session::new("S_test", Utc.with_ymd_and_hms(2026, 1, 1, 2, 0, 0).unwrap());
        session.add_seat(Seat::new("A1", 1, 1)).unwrap();
        session.add_seat(Seat::new("A2", 1, 2)).unwrap();
        session
    }

    #[test]
    fn test_text_report() {
        let mut session = session();
        let observer = ConsoleObserver::new(Vec::new(), ReportFormat::Text);
        let mut processor = BookingProcessor::with_observer(observer);
        let alice = User::new("u1", "Alice");

        processor.execute_command(BookingCommand::Reserve, &mut session, "A1", &alice);
        processor.execute_command(BookingCommand::Purchase, &mut session, "A2", &alice);

        let output = String::from_utf8(processor.into_observer().into_inner()).unwrap();
        assert_eq!(
            output,
            "Alice reserved seat A1\n\
             \n\
             Session S_test (2026-01-01 02:00)\n\
             Row 1, Seat 1: reserved (Alice)\n\
             Row 1, Seat 2: free\n\
             \n\
             Cannot purchase seat A2\n"
        );
    }

    #[test]
    fn test_json_report_lines_parse() {
        let mut session = session();
        let mut observer = ConsoleObserver::new(Vec::new(), ReportFormat::Json);
        observer.note("start");
        let mut processor = BookingProcessor::with_observer(observer);
        let alice = User::new("u1", "Alice");

        processor.execute_command(BookingCommand::Reserve, &mut session, "A1", &alice);

        let output = String::from_utf8(processor.into_observer().into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["note"], "start");
        assert_eq!(lines[1]["message"], "Alice reserved seat A1");
        assert_eq!(lines[2]["seats"][0]["status"], "RESERVED");
        assert_eq!(lines[2]["seats"][1]["holder"], serde_json::Value::Null);
    }

    #[test]
    fn test_log_format_leaves_writer_empty() {
        let mut session = session();
        let mut observer = ConsoleObserver::new(Vec::new(), ReportFormat::Log);
        observer.note("start");
        let mut processor = BookingProcessor::with_observer(observer);
        let alice = User::new("u1", "Alice");

        let outcome =
            processor.execute_command(BookingCommand::Reserve, &mut session, "A1", &alice);

        assert!(outcome.success);
        assert!(processor.into_observer().into_inner().is_empty());
    }
}

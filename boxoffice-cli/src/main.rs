use boxoffice_cli::{Config, ConsoleObserver, Demo};
use boxoffice_core::{BookingProcessor, SessionObserver};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boxoffice_cli=info,boxoffice_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    tracing::info!(
        "Starting session {} with {} seats and {} steps",
        config.session.id,
        config.session.seats.len(),
        config.scenario.steps.len()
    );

    let mut demo = Demo::from_config(&config)?;

    let mut observer = ConsoleObserver::stdout(config.report.format);
    let names: Vec<String> = demo.users.iter().map(ToString::to_string).collect();
    observer.note(&format!("Users: {}", names.join(" and ")));
    observer.on_listing(&demo.session);

    let mut processor =
        BookingProcessor::with_observer(observer).with_undo_mode(config.booking.undo_mode);
    let summary = demo.run(&mut processor);

    let mut observer = processor.into_observer();
    observer.note(&summary.to_string());
    tracing::info!("Run finished: {}", summary);

    Ok(())
}

//! CampusEvents
//!
//! Command-line entry point: prints the browse view for a participant, or the
//! organizer dashboard with each event's stage and editable fields.

use std::sync::Arc;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use CampusEvents::{
    config::Settings,
    models::Session,
    services::{lifecycle, FilterPredicates, ServiceFactory},
    utils::{clock::{Clock, SystemClock}, helpers, logging},
};

#[derive(Parser, Debug)]
#[command(name = "campus-events")]
#[command(version = CampusEvents::VERSION)]
#[command(about = "Browse campus events or review your organizer dashboard", long_about = None)]
struct Cli {
    /// Settings file (defaults to config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Show the dashboard for the configured account (default)
    Show,

    /// Print the effective settings as TOML and exit
    PrintConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load(cli.config.as_deref()).context("failed to load configuration")?;
    settings.validate()?;

    if cli.command == Some(Command::PrintConfig) {
        println!("{}", settings.to_toml()?);
        return Ok(());
    }

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;
    info!("Starting {}", CampusEvents::info());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let services = ServiceFactory::with_clock(settings, clock.clone())?;

    let session = match (std::env::var("CAMPUS_EVENTS_EMAIL"), std::env::var("CAMPUS_EVENTS_PASSWORD")) {
        (Ok(email), Ok(password)) => Some(services.api.auth.login(&email, &password).await?),
        _ => {
            warn!("No credentials configured, showing public events only");
            None
        }
    };

    match session {
        Some(ref session) if session.is_organizer() => print_organizer_dashboard(&services, session).await?,
        Some(ref session) => print_browse_view(&services, session, clock.as_ref()).await?,
        None => print_public_events(&services, clock.as_ref()).await?,
    }

    Ok(())
}

async fn print_public_events(services: &ServiceFactory, clock: &dyn Clock) -> anyhow::Result<()> {
    let now = clock.now();
    let events = services.event_service.browse(None, &FilterPredicates::default()).await?;

    println!("Events ({}):", events.len());
    for event in &events {
        println!(
            "  {:<40} {:<10} {} [{}]",
            helpers::truncate_text(&event.name, 40),
            lifecycle::classify(event, now),
            helpers::format_relative_time(event.start_date, now),
            helpers::format_capacity(event),
        );
    }

    Ok(())
}

async fn print_browse_view(services: &ServiceFactory, session: &Session, clock: &dyn Clock) -> anyhow::Result<()> {
    let now = clock.now();
    let view = services.browse_view(session).await?;

    println!("Trending:");
    for event in &view.trending {
        println!("  {:<40} {} registered", helpers::truncate_text(&event.name, 40), event.current_registrations);
    }

    println!("Events ({}, following {} organizers):", view.events.len(), view.following.len());
    for event in &view.events {
        let open = if event.is_registration_open(now) { "open" } else { "closed" };
        println!(
            "  {:<40} {} [{}] {}",
            helpers::truncate_text(&event.name, 40),
            helpers::format_relative_time(event.start_date, now),
            helpers::format_capacity(event),
            open,
        );
    }

    println!("Upcoming registrations ({}):", view.upcoming_registrations.len());
    for registration in &view.upcoming_registrations {
        println!(
            "  {:<40} {} payment {}",
            helpers::truncate_text(&registration.event.name, 40),
            helpers::format_timestamp(registration.event.start_date),
            registration.payment_status,
        );
    }

    Ok(())
}

async fn print_organizer_dashboard(services: &ServiceFactory, session: &Session) -> anyhow::Result<()> {
    let events = services.event_service.organizer_events(session).await?;

    println!("Your events ({}):", events.len());
    for classified in &events {
        let editable: Vec<&str> = services
            .event_service
            .editable_fields(&classified.event)
            .iter()
            .map(|field| field.as_str())
            .collect();

        println!(
            "  {:<40} {:<10} [{}] editable: {}",
            helpers::truncate_text(&classified.event.name, 40),
            classified.status,
            helpers::format_capacity(&classified.event),
            editable.join(", "),
        );
    }

    Ok(())
}

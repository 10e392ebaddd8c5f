//! Terminal UI for Punto Verde: resolves the user's location and browses
//! nearby recycling centers.

mod app;
mod input;
mod ui;

use std::{env, io, sync::Arc, time::Duration as StdDuration};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use puntoverde_core::{
    atlas::RegionAtlas,
    directory::Directory,
    model::Coordinate,
    ports::{PositionPort, ReverseGeocodePort, StaticPosition},
    resolver::{LocationResolver, ResolverPorts},
    service::PuntoVerdeService,
};
use puntoverde_provider_bigdatacloud::BigDataCloudGeocoder;
use puntoverde_provider_ipapi::IpApiLookup;
use puntoverde_provider_nominatim::NominatimGeocoder;
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they stay off the alternate screen; RUST_LOG
    // selects what shows up.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // HTTP + service setup. The per-call timeout keeps every chain step
    // short enough for interactive use.
    let client = Client::builder()
        .user_agent("puntoverde/0.1")
        .timeout(StdDuration::from_secs(5))
        .build()?;

    let position = parse_position(env::args().skip(1))
        .map(|point| Arc::new(StaticPosition(point)) as Arc<dyn PositionPort>);

    let geocoders: Vec<Arc<dyn ReverseGeocodePort>> = vec![
        Arc::new(NominatimGeocoder::new(client.clone())),
        Arc::new(BigDataCloudGeocoder::new(client.clone())),
    ];

    let ports = ResolverPorts {
        position,
        geocoders,
        ip_lookup: Some(Arc::new(IpApiLookup::new(client))),
    };

    let resolver = LocationResolver::new(RegionAtlas::mexico(), ports);
    let service = Arc::new(PuntoVerdeService::new(resolver, Directory::mexico()));

    // App state
    let app = App::new(service);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    // Initial resolution before the first interactive frame.
    resolve_location(terminal, &mut app).await?;

    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::ResolveLocation => {
                    resolve_location(terminal, &mut app).await?;
                }
            }
        }
    }

    Ok(())
}

async fn resolve_location(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    app.is_loading = true;
    terminal.draw(|frame| ui::draw(frame, app))?;

    // Never fails: exhausting the chain yields the manual default.
    let resolved = app.service.resolve_location().await;

    app.is_loading = false;
    app.apply_resolution(resolved);
    Ok(())
}

/// Interpret leading `LAT LON` arguments as a manually supplied device
/// position. Without them the chain starts at the IP lookup.
fn parse_position(mut args: impl Iterator<Item = String>) -> Option<Coordinate> {
    let latitude = args.next()?.parse::<f64>().ok()?;
    let longitude = args.next()?.parse::<f64>().ok()?;
    Some(Coordinate::new(latitude, longitude))
}

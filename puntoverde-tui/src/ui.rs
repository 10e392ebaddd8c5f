use puntoverde_core::model::{LocationSource, Material, Precision, Provenance};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

use crate::app::{App, Screen};

// Rough degree-to-kilometer factor at Mexican latitudes. Display only.
const KM_PER_DEGREE: f64 = 111.0;

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    // Title / header with the current resolution summary
    let header = Paragraph::new(header_text(app))
        .block(Block::default().borders(Borders::ALL).title("Punto Verde"));
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::RegionSelect => draw_region_select(frame, app, *content_area),
        Screen::CenterList => draw_center_list(frame, app, *content_area),
        Screen::CenterDetail => draw_center_detail(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::RegionSelect => "↑/↓ move · Enter select region · r re-locate · q/Ctrl-C quit",
        Screen::CenterList => {
            "↑/↓ move · Enter open center · Left/Esc regions · r re-locate · q/Ctrl-C quit"
        }
        Screen::CenterDetail => "Esc/←/b back to list · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Locating… · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn header_text(app: &App) -> String {
    match &app.resolved {
        Some(resolved) => {
            let place = match &resolved.sublocation {
                Some(city) => format!("{city}, {}", resolved.region_name),
                None => resolved.region_name.clone(),
            };
            format!(
                "recycling centers near you · {place} ({}, {})",
                source_label(resolved.source),
                precision_label(resolved.precision)
            )
        }
        None => String::from("recycling centers near you"),
    }
}

fn draw_region_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = (0..app.region_rows())
        .map(|index| {
            let prefix = if index == app.region_list_index {
                "> "
            } else {
                "  "
            };
            ListItem::new(format!("{prefix}{}", app.region_label(index)))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select region (↑/↓, Enter)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(Some(app.region_list_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_center_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!(
        "Centers · {} ({})",
        app.region_label(app.region_list_index),
        app.centers.len()
    );

    let items = if app.centers.is_empty() {
        vec![ListItem::new(
            "No centers listed for this region yet. Press Left to pick another one.",
        )]
    } else {
        app.centers
            .iter()
            .map(|center| {
                let label = match app.anchor() {
                    Some(from) => {
                        let km = center.coordinate.degree_distance(from) * KM_PER_DEGREE;
                        format!(
                            "{} · {} · ~{km:.0} km",
                            center.name,
                            materials_summary(&center.materials)
                        )
                    }
                    None => {
                        format!("{} · {}", center.name, materials_summary(&center.materials))
                    }
                };

                ListItem::new(label)
                    .style(Style::default().fg(provenance_color(center.provenance)))
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.centers.is_empty() {
        state.select(Some(app.center_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_center_detail(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(center) = &app.selected_center else {
        let paragraph = Paragraph::new("No center selected.")
            .block(Block::default().borders(Borders::ALL).title("Center"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let title = format!("{} (Esc/←/b to go back)", center.name);

    let mut rows = vec![
        detail_row("Address", center.address.clone()),
        detail_row("Region", center.region.to_string()),
        detail_row("Materials", materials_summary(&center.materials)),
        detail_row("Hours", center.hours.to_string()),
        detail_row(
            "Phone",
            center
                .phone
                .clone()
                .unwrap_or_else(|| String::from("not published")),
        ),
        detail_row("Listed by", provenance_label(center.provenance).to_owned()),
    ];

    if let Some(from) = app.anchor() {
        let km = center.coordinate.degree_distance(from) * KM_PER_DEGREE;
        rows.push(detail_row(
            "Distance",
            format!("~{km:.0} km ({})", center.coordinate),
        ));
    }

    let column_widths = [Constraint::Length(12), Constraint::Min(20)];

    let table = Table::new(rows, column_widths)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn detail_row(field: &'static str, value: String) -> Row<'static> {
    Row::new(vec![
        Cell::from(field).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(value),
    ])
}

fn materials_summary(materials: &[Material]) -> String {
    materials
        .iter()
        .map(material_label)
        .collect::<Vec<&str>>()
        .join(", ")
}

fn material_label(material: &Material) -> &str {
    match material {
        Material::Paper => "paper",
        Material::Cardboard => "cardboard",
        Material::Plastic => "plastic",
        Material::Glass => "glass",
        Material::Metal => "metal",
        Material::Electronics => "e-waste",
        Material::Organic => "organic",
        Material::Batteries => "batteries",
        Material::Other(name) => name.as_str(),
    }
}

fn provenance_label(provenance: Provenance) -> &'static str {
    match provenance {
        Provenance::Official => "municipal listing",
        Provenance::Community => "community submission",
        Provenance::Imported => "legacy import",
    }
}

fn provenance_color(provenance: Provenance) -> Color {
    match provenance {
        Provenance::Official => Color::Green,
        Provenance::Community => Color::Cyan,
        Provenance::Imported => Color::Gray,
    }
}

fn source_label(source: LocationSource) -> &'static str {
    match source {
        LocationSource::DeviceGps => "device position",
        LocationSource::ReverseGeocoding => "reverse geocoding",
        LocationSource::IpGeolocation => "IP estimate",
        LocationSource::ManualDefault => "default location",
    }
}

fn precision_label(precision: Precision) -> &'static str {
    match precision {
        Precision::High => "high precision",
        Precision::Medium => "medium precision",
        Precision::Low => "low precision",
    }
}

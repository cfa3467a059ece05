use chrono::Datelike;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap},
};
use ritiro_core::model::WasteLabel;
use ritiro_entities::{assets::icon_file_for, sensor::italian_day, sensor::relative_phrase};

use crate::app::{App, Screen};

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

    // Title / header
    let header = Paragraph::new("ritiro – calendario raccolta rifiuti")
        .block(Block::default().borders(Borders::ALL).title("Ritiro"));
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::Overview => draw_overview(frame, app, *content_area),
        Screen::Types => draw_types(frame, app, *content_area),
        Screen::Calendar => draw_calendar(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = "Tab/→ next view · Shift-Tab/← previous · r refresh · m mark collected · q/Ctrl-C quit";
    let status_text = if let Some(message) = &app.status_message {
        format!("{message} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_overview(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // next pickup
            Constraint::Min(0),    // upcoming
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [next_area, upcoming_area] = chunks else {
        return;
    };

    let window = match (
        app.next.collection_start.is_empty(),
        app.next.collection_end.is_empty(),
    ) {
        (false, false) => format!(
            "Esposizione: {} – {}",
            app.next.collection_start, app.next.collection_end
        ),
        _ => String::new(),
    };

    let next_text = match app.next.pickup_date {
        Some(date) => format!(
            "{}\n{} {}\n{window}",
            app.next.state,
            italian_day(date.weekday()),
            date.format("%d/%m/%Y"),
        ),
        None => app.next.state.clone(),
    };

    let next = Paragraph::new(next_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Prossimo ritiro ({})", app.next.icon)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(next, *next_area);

    let items = if app.next.upcoming_schedule.is_empty() {
        vec![ListItem::new("Nessun ritiro nei prossimi giorni.")]
    } else {
        app.next
            .upcoming_schedule
            .iter()
            .map(|entry| {
                ListItem::new(format!(
                    "{} {} — {} ({})",
                    entry.day,
                    entry.date.format("%d/%m"),
                    entry.waste_types.join(", "),
                    relative_phrase(entry.days_until).to_lowercase(),
                ))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Prossimi ritiri"),
    );
    frame.render_widget(list, *upcoming_area);
}

fn draw_types(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let config = app.context.config();

    let rows = app.types.iter().map(|snapshot| {
        let date = snapshot
            .pickup_date
            .map_or(String::from("—"), |date| date.format("%d/%m/%Y").to_string());
        let icon = icon_file_for(config, &WasteLabel::new(snapshot.label.as_str()));

        let style = snapshot
            .color
            .as_deref()
            .and_then(parse_hex_color)
            .map_or_else(Style::default, |color| Style::default().fg(color));

        Row::new(vec![
            Cell::from(snapshot.label.clone()),
            Cell::from(snapshot.state.clone()),
            Cell::from(date),
            Cell::from(icon),
        ])
        .style(style)
    });

    let column_widths = [
        Constraint::Min(16),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Min(16),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Tipo", "Stato", "Data", "Icona"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Sensori per tipo ({} icone)", app.icons.len())),
        )
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn draw_calendar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!("Calendario (da {})", app.today.format("%d/%m/%Y"));

    if app.events.is_empty() {
        let paragraph = Paragraph::new("Nessun evento nel periodo selezionato.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = app.events.iter().map(|event| {
        let mut style = Style::default();
        if event.start == app.today {
            style = style.add_modifier(Modifier::BOLD);
        }

        Row::new(vec![
            Cell::from(event.start.format("%d/%m/%Y").to_string()),
            Cell::from(italian_day(event.start.weekday())),
            Cell::from(event.summary.clone()),
        ])
        .style(style)
    });

    let column_widths = [
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Data", "Giorno", "Evento"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let red = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let green = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let blue = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some(Color::Rgb(red, green, blue))
}

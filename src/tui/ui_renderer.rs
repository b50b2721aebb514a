use super::app_logic::TuiApp;
use super::app_state::Pane;
use crate::controller::{CascadeState, FetchStatus};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

fn draw_help_block(f: &mut Frame, _app: &TuiApp, area: Rect) {
    let help_text_lines_content = vec![
        Line::from("Arrows/jk: Nav | Enter/Space: Apply/Select | Tab: Switch pane"),
        Line::from("r: Refetch carpetas | y: Confirm | q/Esc: Quit"),
    ];
    let help_paragraph = Paragraph::new(help_text_lines_content).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Carpetas por Numeral"),
    );
    f.render_widget(help_paragraph, area);
}

fn pane_block(title: String, active: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if active {
        block.border_style(Style::default().fg(Color::Cyan))
    } else {
        block
    }
}

fn draw_numerales_block(f: &mut Frame, app: &mut TuiApp, area: Rect) {
    app.numeral_viewport_height = area.height.saturating_sub(2) as usize;
    app.ensure_numeral_visible();

    let committed = app.controller.parent();
    let window = app
        .parent_items
        .get(app.numeral_scroll..(app.numeral_scroll + app.numeral_viewport_height).min(app.parent_items.len()))
        .unwrap_or(&[]);

    let list_items: Vec<ListItem> = window
        .iter()
        .map(|item| {
            let marker = if item.value == committed && item.value.is_some() {
                "(•) "
            } else {
                "( ) "
            };
            ListItem::new(format!("{}{}", marker, item.label))
        })
        .collect();

    let list_widget = List::new(list_items)
        .block(pane_block(
            "Numerales (Artículo 10)".to_string(),
            app.pane == Pane::Numerales,
        ))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state = ratatui::widgets::ListState::default();
    if app.parent_idx >= app.numeral_scroll
        && app.parent_idx < app.numeral_scroll + app.numeral_viewport_height
    {
        list_state.select(Some(app.parent_idx - app.numeral_scroll));
    }
    f.render_stateful_widget(list_widget, area, &mut list_state);
}

fn draw_carpetas_block(f: &mut Frame, app: &mut TuiApp, area: Rect) {
    app.carpeta_viewport_height = area.height.saturating_sub(2) as usize;
    app.ensure_carpeta_visible();

    let rows = app.controller.option_rows();
    let selected = app.controller.selected();
    let window = rows
        .get(app.carpeta_scroll..(app.carpeta_scroll + app.carpeta_viewport_height).min(rows.len()))
        .unwrap_or(&[]);

    let list_items: Vec<ListItem> = window
        .iter()
        .map(|(id, label)| {
            let marker = if *id == selected && id.is_some() {
                "(•) "
            } else {
                "( ) "
            };
            ListItem::new(format!("{}{}", marker, label))
        })
        .collect();

    let title = match app.controller.parent() {
        None => "Carpetas (deshabilitado)".to_string(),
        Some(numeral) => format!("Carpetas — Numeral {}", numeral),
    };

    let list_widget = List::new(list_items)
        .block(pane_block(title, app.pane == Pane::Carpetas))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state = ratatui::widgets::ListState::default();
    if app.pane == Pane::Carpetas
        && app.carpeta_idx >= app.carpeta_scroll
        && app.carpeta_idx < app.carpeta_scroll + app.carpeta_viewport_height
    {
        list_state.select(Some(app.carpeta_idx - app.carpeta_scroll));
    }
    f.render_stateful_widget(list_widget, area, &mut list_state);
}

fn draw_status_block(f: &mut Frame, app: &TuiApp, area: Rect) {
    let (text, style) = match (app.controller.state(), app.controller.status()) {
        (CascadeState::Disabled, _) => (
            "Elija un numeral para habilitar las carpetas.".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        (_, FetchStatus::Loading) => (
            format!(
                "Cargando carpetas del numeral {}…",
                app.controller.parent().unwrap_or_default()
            ),
            Style::default().fg(Color::Yellow),
        ),
        (_, FetchStatus::Failed(msg)) => (
            format!("⚠️ {}", msg),
            Style::default().fg(Color::Red),
        ),
        (_, FetchStatus::Idle) => match app.controller.selected_carpeta() {
            Some(carpeta) => (
                format!("Seleccionada: {} (id {})", carpeta.ruta_completa, carpeta.id),
                Style::default().fg(Color::Green),
            ),
            None => (
                format!("{} carpetas. Ninguna seleccionada.", app.controller.options().len()),
                Style::default(),
            ),
        },
    };

    let status = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(Block::default().borders(Borders::ALL).title("Estado"));
    f.render_widget(status, area);
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut TuiApp) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4), // Help
            Constraint::Min(0),    // Panes
            Constraint::Length(3), // Status
        ])
        .split(frame.area());

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main_chunks[1]);

    draw_help_block(frame, app, main_chunks[0]);
    draw_numerales_block(frame, app, pane_chunks[0]);
    draw_carpetas_block(frame, app, pane_chunks[1]);
    draw_status_block(frame, app, main_chunks[2]);
}

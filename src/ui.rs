//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  Rendering only reads view-model
//! state; it never filters or mutates the feed itself.
//!
//! ## For contributors
//!
//! * The layout is five rows: tab bar, scrollable feed list, a detail line for
//!   the selected item, player line and a one-line status bar.
//! * Colours and styles are defined inline.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};

use crate::app::App;
use crate::model::{FeedItem, Status};
use crate::viewmodel::{FeedTab, PlayerState};

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [tabs_area, main_area, detail_area, player_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_tabs(app, frame, tabs_area);
    draw_feed_list(app, frame, main_area);
    draw_detail(app, frame, detail_area);
    draw_player(app, frame, player_area);
    draw_status_bar(app, frame, status_area);
}

fn draw_tabs(app: &App, frame: &mut Frame, area: Rect) {
    let selected = FeedTab::ALL
        .iter()
        .position(|t| *t == app.feed.tab())
        .unwrap_or(0);
    let tabs = Tabs::new(FeedTab::ALL.iter().map(|t| t.label()))
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn kind_badge(item: &FeedItem) -> Span<'static> {
    match item {
        FeedItem::Article(_) => Span::styled("BLOG ", Style::default().fg(Color::Green)),
        FeedItem::Episode(_) => Span::styled("FM   ", Style::default().fg(Color::Magenta)),
        FeedItem::Recording(_) => Span::styled("VIDEO", Style::default().fg(Color::Red)),
    }
}

/// Render the scrollable feed item list.
fn draw_feed_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let language = app.settings.language();
    let filter_favorite = app.feed.filters().filter_favorite;

    let list_items: Vec<ListItem> = app
        .feed
        .visible()
        .into_iter()
        .map(|item| {
            let date_str = item.published_at().format("%Y-%m-%d %H:%M").to_string();
            let star = if app.feed.is_favorite(item.id()) { "★" } else { " " };
            let playing = if app.player.is_playing(item.id()) { "▶" } else { " " };

            let mut spans = vec![
                Span::styled(format!("{date_str:<17}"), Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                kind_badge(item),
                Span::raw(" "),
                Span::styled(star, Style::default().fg(Color::Yellow)),
                Span::styled(playing, Style::default().fg(Color::Magenta)),
                Span::raw(" "),
                Span::styled(item.title().get(language).to_string(), Style::default().fg(Color::White)),
            ];
            if let FeedItem::Episode(e) = item {
                spans.push(Span::styled(
                    format!("  ({})", e.duration_label),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            if let Some(credits) = item.credits() {
                spans.push(Span::styled(format!("  [{credits}]"), Style::default().fg(Color::Cyan)));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();
    let list_items = if list_items.is_empty() {
        vec![ListItem::new(Span::styled(
            empty_list_message(app),
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        list_items
    };

    let title = if filter_favorite {
        " DroidKaigi Feed · Favorites "
    } else {
        " DroidKaigi Feed · All "
    };

    let list = List::new(list_items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn empty_list_message(app: &App) -> &'static str {
    match (app.feed.has_contents(), app.feed.is_loading()) {
        (false, true) => "fetching feed…",
        (false, false) => "no feed loaded",
        (true, _) if app.feed.filters().filter_favorite => "no favorites on this tab",
        (true, _) => "nothing on this tab",
    }
}

fn status_label(status: Status) -> &'static str {
    match status {
        Status::Submitted => "submitted",
        Status::Published => "published",
        Status::Unknown => "unknown",
    }
}

/// One line about the selected item: where it is hosted, its review status
/// and the first line of its summary.
fn draw_detail(app: &App, frame: &mut Frame, area: Rect) {
    let Some(item) = app.selected_item() else {
        frame.render_widget(Paragraph::new(""), area);
        return;
    };
    let base = item.base();
    let summary = base
        .summary
        .get(app.settings.language())
        .lines()
        .next()
        .unwrap_or_default();
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", base.external_id.service.service_name()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("{} ", status_label(base.status)), Style::default().fg(Color::DarkGray)),
        Span::raw(summary.to_string()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_player(app: &App, frame: &mut Frame, area: Rect) {
    let language = app.settings.language();
    let title = app.player.title(language).unwrap_or_default();
    let (icon, text) = match app.player.state() {
        PlayerState::Stopped => ("■", "nothing playing".to_string()),
        PlayerState::Playing { .. } => ("▶", title.to_string()),
        PlayerState::Paused { .. } => ("⏸", title.to_string()),
    };
    let line = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(Color::Magenta)),
        Span::raw(text),
    ]));
    frame.render_widget(line, area);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let indicator = if app.feed.is_loading() {
        Span::styled("loading… ", Style::default().fg(Color::Blue))
    } else {
        Span::raw("")
    };
    let status_style = if app.feed.error().is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        indicator,
        Span::styled(app.status.as_str(), status_style),
        Span::raw("  "),
        Span::styled(format!("{} items", app.visible_len()), Style::default().fg(Color::Green)),
        Span::styled(format!("  {}★", app.feed.favorite_count()), Style::default().fg(Color::Yellow)),
        Span::raw(format!("  [{}]", app.settings.language().short_code())),
        Span::raw("  q: quit  tab/1-4: section  f: favorites  space: ★  p: play  l: lang"),
    ]));
    frame.render_widget(status, area);
}

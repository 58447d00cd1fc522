//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! Layout: a one-line header with the view tabs, the card list (plus a
//! language sidebar in the grid view), and a one-line status bar.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, View};
use crate::card::ProjectCard;
use crate::feed::{self, FeedOutcome};
use crate::reveal::RevealTracker;
use crate::theme::Palette;

/// Rows one card occupies, including the spacer line.
const CARD_HEIGHT: u16 = 5;

/// Languages shown in the grid chart.
const CHART_TOP: usize = 5;
const CHART_WIDTH: usize = 20;

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame, now: DateTime<Utc>) {
    let palette = app.theme.palette();
    frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), frame.area());

    let [header_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(app, frame, header_area, &palette);

    match app.view {
        View::Home => draw_body(app, frame, main_area, now, &palette),
        View::Grid => {
            let [cards_area, side_area] =
                Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(main_area);
            draw_body(app, frame, cards_area, now, &palette);
            draw_languages(app, frame, side_area, &palette);
        }
    }

    draw_status_bar(app, frame, status_area, &palette);
}

fn draw_header(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let tab = |view: View, label: &'static str| {
        let style = if app.view == view {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        Span::styled(label, style)
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", app.config.feed.account), Style::default().fg(palette.text)),
        Span::raw(" "),
        tab(View::Home, "[Home]"),
        Span::raw(" "),
        tab(View::Grid, "[Projects]"),
        Span::styled(format!("   theme: {}", app.theme.label()), Style::default().fg(palette.muted)),
    ]));
    frame.render_widget(header, area);
}

/// Cards, or the loading / empty / unavailable message in their place.
fn draw_body(app: &mut App, frame: &mut Frame, area: Rect, now: DateTime<Utc>, palette: &Palette) {
    let block = Block::default()
        .title(app.view.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted));

    let message = match &app.outcome {
        None => Some(Line::styled("Loading projects…", Style::default().fg(palette.muted))),
        Some(FeedOutcome::Empty) => Some(Line::styled("No projects found.", Style::default().fg(palette.muted))),
        Some(FeedOutcome::Unavailable(_)) => Some(Line::from(vec![
            Span::styled("Unable to load projects. Please visit ", Style::default().fg(palette.error)),
            Span::styled(
                app.config.feed.profile_url(),
                Style::default().fg(palette.accent).add_modifier(Modifier::UNDERLINED),
            ),
            Span::styled(" directly.", Style::default().fg(palette.error)),
        ])),
        Some(FeedOutcome::Ready(_)) => None,
    };

    if let Some(line) = message {
        frame.render_widget(Paragraph::new(line).block(block).wrap(Wrap { trim: true }), area);
        return;
    }

    draw_cards(app, frame, area, block, now, palette);
}

fn draw_cards(app: &mut App, frame: &mut Frame, area: Rect, block: Block, now: DateTime<Utc>, palette: &Palette) {
    let names: Vec<String> = app.visible_items().iter().map(|r| r.name.clone()).collect();
    let cards = app.cards(now);

    let list_items: Vec<ListItem> = cards
        .iter()
        .zip(&names)
        .map(|(card, name)| card_item(card, name, &app.reveal, palette))
        .collect();

    let list = List::new(list_items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(palette.highlight_bg))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);

    // Cards inside the viewport after this frame's scroll adjustment start
    // (or continue) revealing.  Partially visible cards count.
    let inner_rows = area.height.saturating_sub(2);
    let fits = usize::from(inner_rows.div_ceil(CARD_HEIGHT));
    let first = app.list_state.offset();
    app.reveal
        .tick(names.iter().skip(first).take(fits).map(String::as_str));
}

fn card_item<'a>(card: &'a ProjectCard, name: &str, reveal: &RevealTracker, palette: &Palette) -> ListItem<'a> {
    let opacity = reveal.opacity(name);
    let indent = " ".repeat(usize::from(reveal.offset(name)));

    // Below a third of the fade the card is still invisible.
    if opacity < 0.34 {
        return ListItem::new(vec![Line::raw(""); usize::from(CARD_HEIGHT)]);
    }

    let fading = !reveal.is_revealed(name);
    let tone = |color: Color| {
        if fading {
            Style::default().fg(palette.muted)
        } else {
            Style::default().fg(color)
        }
    };

    let mut header = vec![Span::raw(indent.clone())];
    if card.pinned {
        header.push(Span::styled("★ Featured  ", tone(palette.badge).add_modifier(Modifier::BOLD)));
    }
    header.extend([
        Span::styled(card.language.as_str(), tone(palette.accent)),
        Span::styled(format!("   ★ {}  ⑂ {}", card.stars, card.forks), tone(palette.muted)),
    ]);

    let mut footer = vec![
        Span::raw(indent.clone()),
        Span::styled(format!("Updated {}", card.updated), tone(palette.muted)),
        Span::styled(format!("  code: {}", card.code_url), tone(palette.accent)),
    ];
    if let Some(live) = &card.live_url {
        footer.push(Span::styled(format!("  live: {live}"), tone(palette.accent)));
    }

    ListItem::new(vec![
        Line::from(header),
        Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(card.title.as_str(), tone(palette.text).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::raw(indent),
            Span::styled(card.description.as_str(), tone(palette.text)),
        ]),
        Line::from(footer),
        Line::raw(""),
    ])
}

/// Grid sidebar: language filter options and the language chart.
fn draw_languages(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let mut lines = vec![Line::styled("Filter (l)", Style::default().add_modifier(Modifier::BOLD))];

    let active = |selected: bool| {
        if selected {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        }
    };
    lines.push(Line::styled("  all", active(app.language.is_none())));
    for lang in app.languages() {
        let selected = app.language.as_deref() == Some(lang.as_str());
        lines.push(Line::styled(format!("  {lang}"), active(selected)));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("Languages", Style::default().add_modifier(Modifier::BOLD)));
    for share in feed::language_breakdown(app.all_items(), CHART_TOP) {
        let filled = ((share.percent / 100.0) * CHART_WIDTH as f64).round() as usize;
        lines.push(Line::styled(share.language.clone(), Style::default().fg(palette.text)));
        lines.push(Line::from(vec![
            Span::styled("█".repeat(filled), Style::default().fg(palette.accent)),
            Span::styled("░".repeat(CHART_WIDTH - filled.min(CHART_WIDTH)), Style::default().fg(palette.muted)),
            Span::styled(
                format!(" {} repos ({:.1}%)", share.count, share.percent),
                Style::default().fg(palette.muted),
            ),
        ]));
    }

    let side = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.muted)),
    );
    frame.render_widget(side, area);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(&app.status, Style::default().fg(palette.status)),
        Span::raw("  "),
        Span::styled(
            format!("{} shown", app.visible_items().len()),
            Style::default().fg(palette.accent),
        ),
        Span::styled(
            "  q: quit  ↑/↓: scroll  Tab: view  l: language  r: reload  t: theme",
            Style::default().fg(palette.muted),
        ),
    ]));
    frame.render_widget(status, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Frame layout and per-page widgets.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::domain::{Page, Severity};
use crate::forms::{FormPhase, PageState, PredictionForm, ReviewForm, ReviewRow, UploadForm, UploadPhase};
use crate::posture::{self, discover::pretty_path};

use super::App;

const ACCENT: Color = Color::Rgb(255, 111, 0);
const ACCENT_LIGHT: Color = Color::Rgb(255, 224, 178);

const PRODUCT: &str = "ProActive Health Guard";
const TAGLINE: &str = "Empowering You with AI";
const DESCRIPTION: &str = "ProActive Health Guard is a healthcare initiative leveraging machine learning \
to offer early disease detection and yoga posture correction, enabling a healthier tomorrow.";

pub(super) fn draw(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
        .split(frame.area());

    draw_header(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)])
        .split(chunks[1]);
    draw_sidebar(frame, body[0], app.page());
    draw_page(frame, body[1], app);

    draw_footer(frame, chunks[2], app);
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

fn draw_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(PRODUCT, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw(" | "),
        Span::styled(app.page().title(), Style::default().fg(Color::Gray)),
    ]);
    let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_sidebar(frame: &mut Frame<'_>, area: Rect, page: Page) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, p)| ListItem::new(format!("{} {}", i + 1, p.title())))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Menu")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .style(Style::default().fg(ACCENT_LIGHT))
        .highlight_style(Style::default().fg(Color::Black).bg(ACCENT))
        .highlight_symbol("» ");

    let mut state = ListState::default();
    state.select(Some(page.index()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_page(frame: &mut Frame<'_>, area: Rect, app: &App) {
    match app.state() {
        PageState::Welcome => draw_welcome(frame, area, app),
        PageState::Prediction(form) => draw_prediction(frame, area, form),
        PageState::Posture(form) => draw_posture(frame, area, form),
        PageState::Review(form) => draw_review(frame, area, form),
    }
}

fn draw_welcome(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(Span::styled(PRODUCT, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))),
        Line::raw(""),
        Line::from(Span::styled(TAGLINE, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(DESCRIPTION, Style::default().fg(ACCENT_LIGHT))),
        Line::raw(""),
        Line::from(Span::styled("Models", Style::default().add_modifier(Modifier::BOLD))),
    ];
    for status in app.registry().report() {
        let line = match &status.state {
            Ok(summary) => Line::from(vec![
                Span::styled("  ok      ", Style::default().fg(Color::Green)),
                Span::raw(format!(
                    "{} ({}, {} features)",
                    status.domain.display_name(),
                    summary.family,
                    summary.n_features
                )),
            ]),
            Err(reason) => Line::from(vec![
                Span::styled("  FAILED  ", Style::default().fg(Color::Red)),
                Span::raw(format!("{}: {reason}", status.domain.display_name())),
            ]),
        };
        lines.push(line);
    }

    let p = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Welcome").borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_prediction(frame: &mut Frame<'_>, area: Rect, form: &PredictionForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let values = form.values();
    let mut items: Vec<ListItem> = Vec::with_capacity(values.len() + 1);
    for (i, spec) in values.specs().iter().enumerate() {
        let shown = match form.editing() {
            Some(buf) if i == form.selected() => format!("{buf}_"),
            _ => values.display(i),
        };
        items.push(ListItem::new(Line::from(vec![
            Span::raw(format!("{:<44} ", spec.label)),
            Span::styled(format!("{shown:>10}"), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", spec.range_hint()), Style::default().fg(Color::DarkGray)),
        ])));
    }
    items.push(ListItem::new(Span::styled(
        format!("[ {} ]", form.domain().submit_caption()),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));

    let list = List::new(items)
        .block(Block::default().title(form.domain().heading()).borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Black).bg(ACCENT_LIGHT))
        .highlight_symbol("» ");
    let mut state = ListState::default();
    state.select(Some(form.selected()));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let result = match form.phase() {
        FormPhase::Idle => Paragraph::new("Fill in the form and submit.").style(Style::default().fg(Color::Gray)),
        FormPhase::Submitted(outcome) => Paragraph::new(outcome.message().into_owned())
            .style(Style::default().fg(severity_color(outcome.severity())).add_modifier(Modifier::BOLD)),
    };
    frame.render_widget(result.block(Block::default().title("Result").borders(Borders::ALL)), chunks[1]);
}

fn draw_posture(frame: &mut Frame<'_>, area: Rect, form: &UploadForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(0)])
        .split(area);

    let mut items: Vec<ListItem> = Vec::with_capacity(form.candidates().len() + 1);
    let typed = if form.is_editing() {
        format!("{}_", form.path_input())
    } else {
        form.path_input().to_string()
    };
    items.push(ListItem::new(format!("Image path: {typed}")));
    for path in form.candidates() {
        items.push(ListItem::new(format!("  {}", pretty_path(path))));
    }
    let list = List::new(items)
        .block(
            Block::default()
                .title("Upload an image (jpg, jpeg, png)")
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().fg(Color::Black).bg(ACCENT_LIGHT))
        .highlight_symbol("» ");
    let mut state = ListState::default();
    state.select(Some(form.selected()));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let mut lines: Vec<Line> = Vec::new();
    match form.phase() {
        UploadPhase::Idle => {
            lines.push(Line::from(Span::styled(
                "Pick an image above or type a path.",
                Style::default().fg(Color::Gray),
            )));
        }
        UploadPhase::Rejected(reason) => {
            lines.push(Line::from(Span::styled(
                reason.clone(),
                Style::default().fg(severity_color(Severity::Error)),
            )));
        }
        UploadPhase::Analyzed(report) => {
            lines.push(Line::from(format!("Uploaded Image: {}", report.image.summary())));
            lines.push(Line::raw(report.notice));
            lines.push(Line::from(Span::styled(
                report.warning,
                Style::default().fg(severity_color(Severity::Warning)),
            )));
            for line in report.lines {
                lines.push(Line::from(Span::styled(
                    line,
                    Style::default().fg(severity_color(Severity::Success)),
                )));
            }
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("Real-time detector: "),
        Span::styled(posture::DETECTOR_URL, Style::default().fg(ACCENT)),
    ]));

    let p = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Yoga Posture Detection").borders(Borders::ALL));
    frame.render_widget(p, chunks[1]);
}

fn draw_review(frame: &mut Frame<'_>, area: Rect, form: &ReviewForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    let items: Vec<ListItem> = ReviewRow::ALL
        .iter()
        .map(|&row| {
            let text = match row {
                ReviewRow::Rating => {
                    let r = usize::from(form.rating());
                    format!("{:<30} {:<10} {}/10", row.label(), "#".repeat(r), r)
                }
                ReviewRow::Submit => format!("[ {} ]", row.label()),
                _ => {
                    let cursor = if form.is_editing() && form.selected_row() == row { "_" } else { "" };
                    format!("{:<30} {}{cursor}", row.label(), form.text(row))
                }
            };
            ListItem::new(text)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title("User Reviews & Feedback").borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Black).bg(ACCENT_LIGHT))
        .highlight_symbol("» ");
    let mut state = ListState::default();
    state.select(ReviewRow::ALL.iter().position(|r| *r == form.selected_row()));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(receipt) = form.phase().submitted() {
        lines.push(Line::from(Span::styled(
            crate::forms::review::ACKNOWLEDGMENT,
            Style::default().fg(severity_color(Severity::Success)).add_modifier(Modifier::BOLD),
        )));
        for line in receipt.echo_lines() {
            lines.push(Line::raw(line));
        }
        lines.push(Line::from(Span::styled(
            format!("at {}", receipt.received_at.format("%Y-%m-%d %H:%M")),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let p = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, chunks[1]);
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let help = if app.state().is_editing() {
        "type  Backspace delete  Enter apply  Esc cancel"
    } else {
        "Tab/1-7 page  ↑/↓ select  ←/→ adjust  Enter edit/submit  s submit  q quit"
    };
    let line = Line::from(vec![
        Span::styled(help, Style::default().fg(Color::Gray)),
        Span::raw(" | "),
        Span::styled(app.status(), Style::default().fg(Color::Yellow)),
    ]);
    let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}

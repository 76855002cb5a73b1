//! Drawing the board and the settings dialog with ratatui.
use gold_common::instrument::Side;
use gold_common::labels::LabelKey;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::model::display::{Card, SideView, Tone};
use crate::model::settings_form::SettingsForm;
use crate::ui::app::App;

const COLOR_UP: Color = Color::Rgb(0xE2, 0x4A, 0x4A);
const COLOR_DOWN: Color = Color::Rgb(0x4A, 0x90, 0xE2);
const COLOR_ERROR: Color = Color::Rgb(0xE2, 0x4A, 0x4A);
const COLOR_TEXT: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
const COLOR_TEXT_SECONDARY: Color = Color::Rgb(0xAA, 0xAA, 0xAA);
const COLOR_TEXT_TERTIARY: Color = Color::Rgb(0x88, 0x88, 0x88);
const COLOR_TEXT_QUATERNARY: Color = Color::Rgb(0x99, 0x99, 0x99);
const COLOR_SEPARATOR: Color = Color::Rgb(0x33, 0x33, 0x33);
const COLOR_SELECTED: Color = Color::Rgb(0x44, 0x44, 0x44);

const TITLE_COLUMN_WIDTH: u16 = 16;
const CARD_HEIGHT: u16 = 5;

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Normal => COLOR_TEXT,
        Tone::Up => COLOR_UP,
        Tone::Down => COLOR_DOWN,
        Tone::Error => COLOR_ERROR,
        Tone::Muted => COLOR_TEXT_SECONDARY,
    }
}

/// Draw one frame.
pub fn draw(f: &mut Frame, app: &App) {
    let mut constraints = vec![Constraint::Length(2), Constraint::Length(1)];
    constraints.extend(app.board.cards().iter().map(|_| Constraint::Length(CARD_HEIGHT)));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));
    let chunks = Layout::vertical(constraints).split(f.area());

    render_header(f, app, chunks[0]);
    render_column_headers(f, app, chunks[1]);
    for (idx, card) in app.board.cards().iter().enumerate() {
        render_card(f, app, card, chunks[2 + idx]);
    }
    render_footer(f, app, chunks[chunks.len() - 1]);

    if let Some(form) = &app.form {
        render_settings(f, form);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(32)]).areas(area);

    let mut title = vec![Span::styled(
        app.settings.labels.get(LabelKey::Title).to_string(),
        Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
    )];
    if app.board.ui.admin_mode {
        title.push(Span::styled("  ⚙ admin", Style::default().fg(COLOR_TEXT_TERTIARY)));
        title.push(Span::styled("  [s] 설정", Style::default().fg(COLOR_DOWN)));
    }
    f.render_widget(Paragraph::new(Line::from(title)), left);

    let info = Line::from(vec![
        Span::styled(app.board.last_update_text(), Style::default().fg(COLOR_TEXT_SECONDARY)),
        Span::raw(" "),
        Span::styled(app.board.countdown_text(), Style::default().fg(COLOR_TEXT_TERTIARY)),
    ]);
    f.render_widget(Paragraph::new(info).alignment(Alignment::Right), right);
}

fn render_column_headers(f: &mut Frame, app: &App, area: Rect) {
    let [_, buy, sell] = columns(area);
    let style = Style::default().fg(COLOR_TEXT_SECONDARY);
    let labels = &app.settings.labels;
    f.render_widget(
        Paragraph::new(Span::styled(labels.get(LabelKey::BuyHeader).to_string(), style)),
        buy,
    );
    f.render_widget(
        Paragraph::new(Span::styled(labels.get(LabelKey::SellHeader).to_string(), style)),
        sell,
    );
}

fn columns(area: Rect) -> [Rect; 3] {
    Layout::horizontal([
        Constraint::Length(TITLE_COLUMN_WIDTH),
        Constraint::Ratio(1, 2),
        Constraint::Ratio(1, 2),
    ])
    .areas(area)
}

fn render_card(f: &mut Frame, app: &App, card: &Card, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(COLOR_SEPARATOR));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [title, buy, sell] = columns(inner);
    let heading = vec![
        Line::from(Span::styled(
            card.instrument.display_name(),
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            card.instrument.to_string(),
            Style::default().fg(COLOR_TEXT_TERTIARY),
        )),
    ];
    f.render_widget(Paragraph::new(heading), title);

    for (side, column) in [(Side::Buy, buy), (Side::Sell, sell)] {
        let selected = app.board.ui.admin_mode
            && app.board.ui.selection.instrument == card.instrument
            && app.board.ui.selection.side == side;
        render_side(f, app, card.side(side), selected, column);
    }
}

fn render_side(f: &mut Frame, app: &App, view: &SideView, selected: bool, area: Rect) {
    let mut price = vec![Span::styled(
        view.price_text.clone(),
        Style::default()
            .fg(tone_color(view.price_tone))
            .add_modifier(Modifier::BOLD),
    )];
    if app.board.ui.admin_mode {
        let style = if selected {
            Style::default().fg(COLOR_TEXT).bg(COLOR_SELECTED)
        } else {
            Style::default().fg(COLOR_TEXT_TERTIARY)
        };
        price.push(Span::raw(" "));
        price.push(Span::styled(format!("[{}]", view.toggle_label()), style));
    }

    let mut lines = vec![
        Line::from(price),
        Line::from(Span::styled(
            view.change_text.clone(),
            Style::default().fg(tone_color(view.change_tone)),
        )),
    ];
    if let Some(note) = &view.note {
        lines.push(Line::from(Span::styled(
            note.clone(),
            Style::default().fg(COLOR_TEXT_QUATERNARY),
        )));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hint = if app.form.is_some() {
        "↑/↓ 항목 이동 · Enter 저장 · Esc 취소 · Ctrl+R 기본값 복원"
    } else if app.board.ui.admin_mode {
        "↑/↓ 항목 · ←/→ 살 때/팔 때 · Enter Hide/Show · s 설정 · a/Esc 관리자 모드 종료 · q 종료"
    } else {
        "a 관리자 모드 · q 종료"
    };
    f.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(COLOR_TEXT_TERTIARY))),
        area,
    );
}

fn render_settings(f: &mut Frame, form: &SettingsForm) {
    let area = centered_rect(70, 90, f.area());
    f.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" 커스텀 설정 ")
        .border_style(Style::default().fg(COLOR_TEXT_TERTIARY));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = Vec::with_capacity(form.fields().len() + 2);
    for (idx, field) in form.fields().iter().enumerate() {
        if form.separator_before(idx) {
            lines.push(Line::from(Span::styled(
                "─".repeat(inner.width as usize),
                Style::default().fg(COLOR_SEPARATOR),
            )));
        }
        let selected = idx == form.selected();
        let value_style = if selected {
            Style::default().fg(COLOR_TEXT).bg(COLOR_SELECTED)
        } else {
            Style::default().fg(COLOR_TEXT)
        };
        let cursor = if selected { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<24}", field.key.caption()),
                Style::default().fg(COLOR_TEXT_SECONDARY),
            ),
            Span::styled(format!("{}{}", field.value, cursor), value_style),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}

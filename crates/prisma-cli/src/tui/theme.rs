use molprisma::core::record::RecordKind;
use molprisma::engine::controller::HighlightTag;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const YELLOW_SOFT: Color = Color::Rgb(128, 128, 51);
const GREEN_SOFT: Color = Color::Rgb(51, 128, 51);
const GRAY: Color = Color::Rgb(51, 51, 51);

pub fn guide_label() -> Style {
    Style::default().fg(Color::Black).bg(Color::Cyan)
}

pub fn guide_state(on: bool) -> Style {
    if on {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::White).bg(Color::Red)
    }
}

pub fn border() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn selected_row() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Style of one record cell.
///
/// Unmapped columns take the row's base colour; the sentinel row is marked
/// in red.
pub fn cell_style(kind: RecordKind, tag: HighlightTag) -> Style {
    let (base, alt) = match kind {
        RecordKind::Sentinel => return Style::default().fg(Color::White).bg(Color::Red),
        RecordKind::Meta => (GRAY, GRAY),
        RecordKind::Atom => (Color::Yellow, YELLOW_SOFT),
        RecordKind::Hetero => (Color::Green, GREEN_SOFT),
    };
    let fg = if kind == RecordKind::Meta {
        Color::White
    } else {
        Color::Black
    };
    match tag {
        HighlightTag::None | HighlightTag::Base => Style::default().fg(fg).bg(base),
        HighlightTag::Alt => Style::default().fg(fg).bg(alt),
        HighlightTag::Selected => selected_row(),
    }
}

/// Builds a line from `text`, merging runs of equally styled cells into one
/// span.
pub fn styled_line(text: &str, kind: RecordKind, highlights: &[HighlightTag]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_tag: Option<HighlightTag> = None;

    for (i, ch) in text.chars().enumerate() {
        let tag = highlights.get(i).copied().unwrap_or(HighlightTag::None);
        if let Some(previous) = run_tag.filter(|&t| t != tag) {
            spans.push(Span::styled(std::mem::take(&mut run), cell_style(kind, previous)));
        }
        run_tag = Some(tag);
        run.push(ch);
    }
    if let Some(tag) = run_tag {
        spans.push(Span::styled(run, cell_style(kind, tag)));
    }
    Line::from(spans)
}

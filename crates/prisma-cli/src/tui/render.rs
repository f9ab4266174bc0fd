use super::keymap::KeyMap;
use super::theme;
use molprisma::engine::controller::{FieldRow, FilterRow, Frame as ViewFrame, ViewController};
use molprisma::engine::visibility::KindToggles;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Record width plus the two border columns.
pub const RECORD_PANE_WIDTH: u16 = 82;
const GUIDE_HEIGHT: u16 = 2;

const HELP_LINES: &[(&str, &str)] = &[
    ("↑ / ↓", "scroll one line"),
    ("PgUp / PgDn", "scroll half a page"),
    ("Home / End", "jump to top / bottom"),
    ("← / →", "previous / next field"),
    ("a", "toggle all record kinds"),
    ("s", "toggle atoms"),
    ("d", "toggle heteroatoms"),
    ("f", "toggle metadata"),
    ("x", "reset toggles and filters"),
    ("h", "show / hide this help"),
    ("q / Esc", "quit"),
];

fn split(area: Rect) -> (Rect, Rect, Rect) {
    let [left, side] =
        Layout::horizontal([Constraint::Length(RECORD_PANE_WIDTH), Constraint::Min(0)]).areas(area);
    let [body, footer] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(GUIDE_HEIGHT)]).areas(left);
    (body, footer, side)
}

/// Number of record lines that fit in the body pane of `area`.
pub fn viewport_height(area: Rect) -> usize {
    let (body, _, _) = split(area);
    usize::from(body.height.saturating_sub(2))
}

/// Draws one refresh and returns the viewport height it used.
pub fn draw(
    frame: &mut Frame<'_>,
    controller: &ViewController,
    keymap: &KeyMap,
    show_help: bool,
) -> usize {
    let area = frame.area();
    let (body, footer, side) = split(area);
    let height = viewport_height(area);
    let view = controller.frame(height);

    draw_records(frame, &view, body);
    draw_guides(frame, &view, keymap, footer);
    draw_side(frame, &view, controller.current_field_name(), side);
    if show_help {
        draw_help(frame, keymap, area);
    }
    height
}

fn draw_records(frame: &mut Frame<'_>, view: &ViewFrame<'_>, area: Rect) {
    let lines: Vec<Line> = view
        .lines
        .iter()
        .map(|line| theme::styled_line(line.record.text(), line.record.kind(), &line.highlights))
        .collect();

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title(Span::styled(
                format!(" {} ", view.title),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(theme::border()),
    );
    frame.render_widget(paragraph, area);
}

fn guide_spans(label: &'static str, guides: Vec<(String, bool)>, hint: &'static str) -> Line<'static> {
    let mut spans = vec![Span::styled(label, theme::guide_label())];
    for (text, on) in guides {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(text, theme::guide_state(on)));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(hint, theme::guide_label()));
    Line::from(spans)
}

fn toggle_guides(toggles: KindToggles) -> Vec<(String, bool)> {
    vec![
        ("a: all".to_string(), toggles.all_shown()),
        ("s: atoms".to_string(), toggles.show_atom),
        ("d: hetatms".to_string(), toggles.show_hetero),
        ("f: metadata".to_string(), toggles.show_meta),
    ]
}

fn filter_guides(filters: &[FilterRow<'_>], keymap: &KeyMap) -> Vec<(String, bool)> {
    filters
        .iter()
        .map(|filter| {
            let key = keymap
                .filter_keys()
                .iter()
                .find(|k| k.filter == filter.name)
                .map_or('-', |k| k.key);
            let value = filter
                .selected
                .and_then(|i| filter.values.get(i))
                .map_or("*", String::as_str);
            (format!("{key}: {}={value}", filter.name), filter.selected.is_some())
        })
        .collect()
}

fn draw_guides(frame: &mut Frame<'_>, view: &ViewFrame<'_>, keymap: &KeyMap, area: Rect) {
    let lines = vec![
        guide_spans("toggle→ ", toggle_guides(view.toggles), "[h]elp"),
        guide_spans("filter→ ", filter_guides(&view.filters, keymap), "[q]uit"),
    ];
    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(theme::border())
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}

fn field_line(row: &FieldRow<'_>) -> Line<'static> {
    let text = format!("{} | {} | {}", row.zero_indexed, row.one_indexed, row.name);
    if row.selected {
        Line::styled(text, theme::selected_row())
    } else {
        Line::raw(text)
    }
}

fn filter_lines(filter: &FilterRow<'_>) -> Vec<Line<'static>> {
    let mut values: Vec<Span<'static>> = Vec::with_capacity(filter.values.len() * 2);
    for (i, value) in filter.values.iter().enumerate() {
        if i > 0 {
            values.push(Span::raw(" "));
        }
        if filter.selected == Some(i) {
            values.push(Span::styled(value.clone(), theme::selected_row()));
        } else {
            values.push(Span::raw(value.clone()));
        }
    }
    if filter.values.is_empty() {
        values.push(Span::raw("(no values)"));
    }
    vec![
        Line::styled(
            format!("{} ({}):", filter.name, filter.field_name),
            Style::default().add_modifier(Modifier::UNDERLINED),
        ),
        Line::from(values),
    ]
}

fn draw_side(frame: &mut Frame<'_>, view: &ViewFrame<'_>, field: Option<&str>, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::styled("PDB Sections:", bold),
        Line::styled(
            "0-index | 1-index  | Name",
            Style::default().add_modifier(Modifier::UNDERLINED),
        ),
    ];
    lines.extend(view.fields.iter().map(field_line));
    lines.push(Line::raw(""));
    lines.push(Line::styled("Filters:", bold));
    for filter in &view.filters {
        lines.extend(filter_lines(filter));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw(format!(
        "Records: {}/{}  Line: {}  Field: {}",
        view.visible_records,
        view.total_records,
        view.cursor.current_line + 1,
        field.unwrap_or("-"),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border())
                .padding(Padding::horizontal(1)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_help(frame: &mut Frame<'_>, keymap: &KeyMap, area: Rect) {
    let mut lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, what)| Line::raw(format!("{keys:<12} {what}")))
        .collect();
    for binding in keymap.filter_keys() {
        lines.push(Line::raw(format!(
            "{:<12} cycle the {} filter (shift: backwards)",
            binding.key, binding.filter
        )));
    }

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup = centered(area, 60, height);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .style(theme::guide_label())
                .padding(Padding::horizontal(1)),
        ),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterKey;
    use molprisma::core::constants::FormatConstants;
    use molprisma::engine::config::ViewerConfig;
    use molprisma::workflows::session;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    const SAMPLE: &[&str] = &[
        "HEADER    HYDROLASE                               01-JAN-00   1ABC",
        "ATOM      1  N   MET A   1      11.104   6.134  -6.504  1.00  0.00           N",
        "HETATM    2  O   HOH B 101       1.000   2.000   3.000  1.00  0.00           O",
    ];

    fn controller() -> ViewController {
        session::open("1abc", SAMPLE, &FormatConstants::pdb(), &ViewerConfig::default()).unwrap()
    }

    fn keymap() -> KeyMap {
        KeyMap::new(vec![FilterKey {
            key: 'c',
            filter: "chain".into(),
        }])
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn draws_records_fields_and_guides() {
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        let controller = controller();
        let mut height = 0;
        terminal
            .draw(|frame| height = draw(frame, &controller, &keymap(), false))
            .unwrap();

        assert_eq!(height, 30 - 2 - 2);
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains(" 1abc "));
        assert!(text.contains("MET A"));
        assert!(!text.contains("HYDROLASE"));
        assert!(text.contains("[21,22[ | (22..22) | CHAIN_ID"));
        assert!(text.contains("c: chain=*"));
        assert!(text.contains("f: metadata"));
    }

    #[test]
    fn active_filter_and_help_overlay_are_shown() {
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        let mut controller = controller();
        controller.cycle_filter("chain", true).unwrap();
        terminal
            .draw(|frame| {
                draw(frame, &controller, &keymap(), true);
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("c: chain=A"));
        assert!(text.contains(" Help "));
        assert!(text.contains("cycle the chain filter"));
    }

    #[test]
    fn viewport_height_excludes_borders_and_guides() {
        assert_eq!(viewport_height(Rect::new(0, 0, 120, 40)), 36);
        assert_eq!(viewport_height(Rect::new(0, 0, 82, 12)), 8);
    }
}

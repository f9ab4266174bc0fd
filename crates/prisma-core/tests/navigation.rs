use molprisma::core::constants::FormatConstants;
use molprisma::engine::config::ViewerConfig;
use molprisma::engine::controller::{Action, Direction, Flow, HighlightTag};
use molprisma::engine::visibility::{KindToggle, KindToggles};
use molprisma::workflows::session;

const STRUCTURE: &[&str] = &[
    "HEADER    HYDROLASE                               01-JAN-00   1ABC",
    "REMARK   2 RESOLUTION.    1.80 ANGSTROMS.",
    "ATOM      1  N   MET A   1      11.104   6.134  -6.504  1.00  0.00           N",
    "ATOM      2  CA  MET A   1      11.639   6.071  -5.147  1.00  0.00           C",
    "ATOM      3  N   GLY B   2      12.000   7.000  -4.000  1.00  0.00           N",
    "HETATM    4  O   HOH B 101       1.000   2.000   3.000  1.00  0.00           O",
    "END",
];

fn config() -> ViewerConfig {
    ViewerConfig {
        default_toggles: KindToggles::all(true),
        ..ViewerConfig::default()
    }
}

#[test]
fn chain_filter_with_atoms_only_shows_chain_a_atoms() {
    let mut controller =
        session::open("1abc", STRUCTURE, &FormatConstants::pdb(), &config()).unwrap();

    controller.apply(Action::ToggleKind(KindToggle::Meta)).unwrap();
    controller.apply(Action::ToggleKind(KindToggle::Hetero)).unwrap();
    controller
        .apply(Action::CycleFilter("chain".into(), Direction::Forward))
        .unwrap();

    let frame = controller.frame(10);
    let texts: Vec<_> = frame.lines.iter().map(|l| l.record.text().trim_end()).collect();
    assert_eq!(texts, [STRUCTURE[2], STRUCTURE[3], ""]);
    assert_eq!(frame.visible_records, 2);
    assert_eq!(frame.total_records, STRUCTURE.len());
    assert_eq!(frame.filters[0].selected, Some(0));
}

#[test]
fn every_record_is_padded_to_the_longest_line() {
    let controller =
        session::open("1abc", STRUCTURE, &FormatConstants::pdb(), &config()).unwrap();
    let width = STRUCTURE.iter().map(|l| l.len()).max().unwrap();
    let records = controller.store().records();
    assert!(records.iter().all(|r| r.width() == width));
    assert_eq!(records.iter().filter(|r| r.is_sentinel()).count(), 1);
    assert!(records.last().unwrap().is_sentinel());
}

#[test]
fn navigation_properties_hold_through_a_session() {
    let mut controller =
        session::open("1abc", STRUCTURE, &FormatConstants::pdb(), &config()).unwrap();
    assert!(controller.visible_count() >= 1);

    controller.apply(Action::ScrollBottom).unwrap();
    assert_eq!(controller.cursor().current_line, STRUCTURE.len() - 1);
    controller.apply(Action::ScrollTop).unwrap();
    assert_eq!(controller.cursor().current_line, 0);

    let fields = controller.store().schema().len();
    for _ in 0..=fields {
        controller.apply(Action::MoveField(Direction::Forward)).unwrap();
    }
    assert_eq!(controller.cursor().current_field, None);

    let residues = controller.filters().by_name("residue").unwrap().reference_values().len();
    for _ in 0..=residues {
        controller
            .apply(Action::CycleFilter("residue".into(), Direction::Backward))
            .unwrap();
    }
    assert!(!controller.filters().any_active());

    controller.apply(Action::ToggleAll).unwrap();
    assert_eq!(controller.visible_count(), 1);
    controller.apply(Action::ToggleAll).unwrap();
    assert_eq!(controller.toggles(), KindToggles::all(true));

    assert_eq!(controller.apply(Action::Quit).unwrap(), Flow::Quit);
}

#[test]
fn selected_field_is_highlighted_and_the_sentinel_never_is() {
    let mut controller =
        session::open("1abc", STRUCTURE, &FormatConstants::pdb(), &config()).unwrap();
    let (chain, _) = controller.store().schema().field_by_name("CHAIN_ID").unwrap();
    while controller.cursor().current_field != Some(chain) {
        controller.move_field(true);
    }
    assert_eq!(controller.current_field_name(), Some("CHAIN_ID"));

    let frame = controller.frame(STRUCTURE.len() + 1);
    let atom = &frame.lines[2];
    assert_eq!(atom.highlights[21], HighlightTag::Selected);
    let sentinel = frame.lines.last().unwrap();
    assert!(sentinel.highlights.iter().all(|&t| t == HighlightTag::None));
}

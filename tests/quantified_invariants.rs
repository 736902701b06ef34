//! The invariants every mutator/locator must hold, independent of any one worked example.

use editkernel::config::Config;
use editkernel::direction::Direction;
use editkernel::editor::EditorState;
use editkernel::locator::Locator;
use editkernel::mutator::Mutator;

#[test]
fn insert_rune_then_delete_prev_char_restores_the_text() {
    let mut s = EditorState::new(80, 24, Config::default());
    for c in "hello".chars() {
        Mutator::InsertRune(c).apply(&mut s);
    }
    let before = s.buffer.text_tree.to_string();

    Mutator::InsertRune('!').apply(&mut s);
    Mutator::Delete(Locator::PrevChar(1)).apply(&mut s);

    assert_eq!(s.buffer.text_tree.to_string(), before);
    assert_eq!(s.buffer.cursor.position, before.chars().count() as u64);
}

#[test]
fn vertical_motion_down_then_up_returns_to_the_original_cursor() {
    // Both lines are at least as wide as the starting column, so the round trip is exact.
    let mut s = EditorState::new(80, 24, Config::default());
    for c in "abcdef\nuvwxyz".chars() {
        Mutator::InsertRune(c).apply(&mut s);
    }
    s.buffer.cursor.position = 3; // 'd', column 3 on the first line

    let original = s.buffer.cursor;
    Mutator::CursorAt(Locator::RelativeLine(Direction::Forward, 1)).apply(&mut s);
    assert_ne!(s.buffer.cursor.position, original.position);
    Mutator::CursorAt(Locator::RelativeLine(Direction::Backward, 1)).apply(&mut s);

    assert_eq!(s.buffer.cursor.position, original.position);
}

#[test]
fn search_round_trip_lands_on_the_first_occurrence() {
    let mut s = EditorState::new(80, 24, Config::default());
    for c in "the quick brown fox".chars() {
        Mutator::InsertRune(c).apply(&mut s);
    }
    s.buffer.cursor.position = 0;

    Mutator::StartSearch(Direction::Forward).apply(&mut s);
    for c in "brown".chars() {
        Mutator::AppendSearchQuery(c).apply(&mut s);
    }
    Mutator::CompleteSearch.apply(&mut s);

    assert_eq!(s.buffer.cursor.position, 10);
}

#[test]
fn menu_selection_wraps_around_in_both_directions() {
    use editkernel::menu::{MenuItem, MenuState};

    let items: Vec<MenuItem> = (0..4)
        .map(|i| MenuItem::new(format!("item{i}"), format!("echo {i}")))
        .collect();
    let mut menu = MenuState::hidden();
    menu.show("Run command", items, true);
    let search = menu.search.as_mut().unwrap();

    let original = search.selected_item().cloned();
    for _ in 0..4 {
        search.move_selection(Direction::Forward);
    }
    assert_eq!(search.selected_item().cloned(), original);

    search.move_selection(Direction::Backward);
    assert_eq!(search.selected_item().unwrap().name, "item3");
}

#[test]
fn every_locator_stays_within_document_bounds_unless_it_permits_end_of_file() {
    let mut s = EditorState::new(80, 24, Config::default());
    for c in "abc\ndef\nghi".chars() {
        Mutator::InsertRune(c).apply(&mut s);
    }
    let n = s.buffer.num_chars();

    let bounded_locators = [
        Locator::CharInLine {
            dir: Direction::Forward,
            count: 100,
            include_end_of_line_or_file: false,
        },
        Locator::PrevChar(100),
        Locator::OntoDocument,
        Locator::OntoLine,
        Locator::RelativeLineStart(Direction::Forward, 100),
        Locator::NextWordStart,
        Locator::PrevWordStart,
        Locator::LastLine,
    ];

    // Cursor positions range over every *valid* starting position; `n` itself (one past the
    // last character) is not a state a cursor ever legitimately rests in.
    for locator in bounded_locators {
        for start in 0..n {
            s.buffer.cursor.position = start;
            let resolved = locator.locate(&s.buffer);
            assert!(
                resolved.position <= n.saturating_sub(1).max(0),
                "{locator:?} from {start} landed at {}, document has {n} chars",
                resolved.position
            );
        }
    }
}

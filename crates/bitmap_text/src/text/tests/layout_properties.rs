//! Layout behavior of whole text blocks

use std::sync::Arc;

use super::{font_from, grid_font, EventLog};
use crate::font::FontDescriptor;
use crate::foundation::math::Vec2;
use crate::text::cursor::next_tab_stop;
use crate::text::mesh_builder::VERTICES_PER_QUAD;
use crate::text::{Align, BitmapText, Justify, TextChangeListener};

fn label(text: &str) -> BitmapText {
    BitmapText::new("label", text, Some(grid_font())).unwrap()
}

#[test]
fn test_plain_text_is_one_line() {
    for text in ["", "a", "Hello, World!", "spaces   only"] {
        let label = label(text);
        assert_eq!(label.line_count(), 1, "{text:?}");
        assert_eq!(label.size().y, 20.0, "{text:?}");
        assert_eq!(label.size().x, 10.0 * text.chars().count() as f32, "{text:?}");
    }
}

#[test]
fn test_newlines_add_lines() {
    for newlines in 0..5 {
        let text = vec!["ab"; newlines + 1].join("\n");
        let label = label(&text);
        assert_eq!(label.line_count(), newlines + 1);
        assert_eq!(label.size(), Vec2::new(20.0, 20.0 * (newlines + 1) as f32));
    }

    // trailing newline still opens an empty line
    let label = label("abc\n");
    assert_eq!(label.line_count(), 2);
    assert_eq!(label.line_widths(), &[30.0, 0.0]);
}

#[test]
fn test_set_text_is_idempotent() {
    let text = "Tab\there\nsecond line\tend";
    let mut label = label(text);
    let positions = label.positions().as_bytes().to_vec();
    let tex_coords = label.tex_coords().as_bytes().to_vec();

    label.set_text(text).unwrap();
    assert_eq!(label.positions().as_bytes(), positions.as_slice());
    assert_eq!(label.tex_coords().as_bytes(), tex_coords.as_slice());

    // a detour through other text must not leave anything behind
    label.set_text("something much longer than before, to force growth").unwrap();
    label.set_text(text).unwrap();
    assert_eq!(label.positions().as_bytes(), positions.as_slice());
    assert_eq!(label.tex_coords().as_bytes(), tex_coords.as_slice());
}

#[test]
fn test_tab_moves_strictly_forward_onto_stops() {
    let stop = 40.0;
    for x in [0.0, 0.5, 10.0, 39.9, 40.0, 41.0, 79.0, 80.0, 123.0] {
        let next = next_tab_stop(x, stop);
        assert!(next > x, "{x} -> {next}");
        assert!(next >= stop);
        assert_eq!(next % stop, 0.0, "{x} -> {next}");
    }

    // grid font: max advance 10, stop 40
    assert_eq!(label("\t").size().x, 40.0);
    assert_eq!(label("a\tb").size().x, 50.0);
    assert_eq!(label("abcd\tb").size().x, 90.0);
    assert_eq!(label("a\t\tb").size().x, 90.0);
}

#[test]
fn test_tab_stops_ignore_justification() {
    let mut label = label("ab\tc\nwide line here");
    label.set_justify(Justify::Right).unwrap();

    // line 0: "ab" then a tab to 40 then "c" ends at 50
    assert_eq!(label.line_widths()[0], 50.0);
    let block_width = label.size().x;
    let c = label.positions().tuple(3 * VERTICES_PER_QUAD).unwrap().to_vec();
    assert_eq!(c[0], block_width - 50.0 + 40.0);
}

#[test]
fn test_capacity_covers_text_and_never_shrinks() {
    let mut label = label("");
    let mut last_capacity = label.positions().tuple_capacity();
    for len in [4, 40, 2, 100, 0, 7, 250, 1] {
        let text = "x".repeat(len);
        label.set_text(&text).unwrap();

        let capacity = label.positions().tuple_capacity();
        assert!(capacity >= VERTICES_PER_QUAD * len);
        assert!(capacity >= last_capacity);
        assert_eq!(label.tex_coords().tuple_capacity(), capacity);
        assert_eq!(label.positions().tuple_count(), VERTICES_PER_QUAD * len);
        assert_eq!(label.tex_coords().tuple_count(), VERTICES_PER_QUAD * len);
        last_capacity = capacity;
    }
}

#[test]
fn test_center_justification_offsets_short_lines() {
    let mut label = label("aaaaaaaaaa\naaaaaa");
    label.set_justify(Justify::Center).unwrap();
    assert_eq!(label.line_widths(), &[100.0, 60.0]);

    // south-west anchor: origin at (0, -block height)
    let first_line = label.positions().tuple(0).unwrap();
    assert_eq!(first_line, &[0.0, 0.0, -40.0]);

    let second_line = label.positions().tuple(11 * VERTICES_PER_QUAD).unwrap();
    assert_eq!(second_line, &[20.0, 0.0, -20.0]);
}

#[test]
fn test_align_moves_block_origin() {
    let mut label = label("abcd");
    label.set_align(Align::Center).unwrap();
    assert_eq!(label.positions().tuple(0).unwrap(), &[-20.0, 0.0, -10.0]);

    label.set_align(Align::NorthEast).unwrap();
    assert_eq!(label.positions().tuple(0).unwrap(), &[-40.0, 0.0, 0.0]);

    label.set_fixed_offset(0.25, 0.5).unwrap();
    assert_eq!(label.positions().tuple(0).unwrap(), &[-32.0, 0.0, 16.0]);
}

#[test]
fn test_kerning_and_outline_spacing() {
    let kerned = font_from(FontDescriptor::ascii_grid("kerned", 32.0, 10.0, 20.0).with_kerning('A', 'V', -2.0));
    let label = BitmapText::new("kerned", "AVA", Some(kerned)).unwrap();
    assert_eq!(label.size().x, 28.0);

    let outlined = font_from(FontDescriptor::ascii_grid("outlined", 32.0, 10.0, 20.0).with_outline_width(3));
    let label = BitmapText::new("outlined", "AB", Some(outlined)).unwrap();
    assert_eq!(label.extra_spacing(), 2);
    assert_eq!(label.size().x, 24.0);
}

#[test]
fn test_missing_glyphs_emit_empty_quads() {
    let label = label("a\u{e9}b");
    assert_eq!(label.size().x, 20.0);
    assert_eq!(label.positions().tuple_count(), 3 * VERTICES_PER_QUAD);
    for vertex in VERTICES_PER_QUAD..2 * VERTICES_PER_QUAD {
        assert_eq!(label.positions().tuple(vertex).unwrap(), &[0.0, 0.0, 0.0]);
        assert_eq!(label.tex_coords().tuple(vertex).unwrap(), &[0.0, 0.0]);
    }
}

#[test]
fn test_size_event_once_per_layout_pass() {
    let mut label = label("start");
    let log = Arc::new(EventLog::default());
    let listener: Arc<dyn TextChangeListener> = log.clone();

    label.add_change_listener(listener.clone());
    label.add_change_listener(listener.clone());
    assert_eq!(label.listener_count(), 1);

    label.set_text("two\nlines").unwrap();
    label.set_align(Align::Center).unwrap();
    assert_eq!(*log.sizes.lock().unwrap(), vec![Vec2::new(50.0, 40.0); 2]);

    assert!(label.remove_change_listener(&listener));
    label.set_text("ignored by the log").unwrap();
    assert_eq!(log.sizes.lock().unwrap().len(), 2);
    assert!(!label.remove_change_listener(&listener));
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use styled_glyphs::{AttributeCache, AttributeKey, Document, DocumentError, MemoryReport,
                    Position, RecordingSink, TextStyle, Workspace,
                    new_shared_attribute_cache};
use test_case::test_case;

fn normal(color: &str) -> AttributeKey {
    AttributeKey::new("Arial", 12, color, TextStyle::Normal)
}

#[test]
fn equal_keys_intern_to_the_same_instance() {
    let cache = AttributeCache::new();
    let a = cache.intern(normal("black")).unwrap();
    let b = cache.intern(normal("black")).unwrap();
    let c = cache.intern(normal("red")).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(cache.size(), 2);
}

#[test]
fn hits_are_requests_minus_distinct_keys() {
    let cache = AttributeCache::new();
    let colors = ["black", "red", "blue", "black", "red", "black", "green"];
    for color in colors {
        cache.intern(normal(color)).unwrap();
    }

    let stats = cache.stats();
    assert_eq!(stats.requests, 7);
    assert_eq!(stats.misses, 4);
    assert_eq!(stats.hits, 3);
}

#[test]
fn bulk_insert_is_all_or_nothing() {
    let mut doc = Document::new("bulk.txt");
    doc.add_glyph('#', Position::new(0, 5, 30.0, 0.0), normal("black"))
        .unwrap();

    doc.add_text("hello", Position::default(), normal("black"))
        .unwrap();
    assert_eq!(doc.len(), 6);

    let mut other = Document::new("bulk_again.txt");
    other
        .add_glyph('#', Position::new(0, 5, 30.0, 0.0), normal("black"))
        .unwrap();
    let result = other.add_text("helloX", Position::default(), normal("black"));

    assert_eq!(
        result,
        Err(DocumentError::PositionCollision { line: 0, column: 5 })
    );
    assert_eq!(other.len(), 1);
    assert_eq!(other.text_content(), "#");
}

#[test]
fn reformatting_a_thousand_glyphs_misses_once() {
    let mut doc = Document::new("reformat.txt");
    let line = "x".repeat(100);
    for i in 0..10 {
        doc.add_text(&line, Position::new(i, 0, 0.0, 0.0), normal("black"))
            .unwrap();
    }
    assert_eq!(doc.len(), 1_000);
    let before = doc.cache().stats();

    let bold = AttributeKey::new("Arial", 12, "darkblue", TextStyle::Bold);
    let changed = doc.reformat_range((0, 0), (9, 99), bold).unwrap();

    let after = doc.cache().stats();
    assert_eq!(changed, 1_000);
    assert_eq!(after.misses - before.misses, 1);
    assert_eq!(after.hits - before.hits, 999);

    let first = doc.glyph_at((0, 0)).unwrap();
    assert!(doc.glyphs().all(|it| it.shares_attributes_with(first)));
}

/// Non-overlapping pieces of "hello\nworld\n!" as (text, line, column, color).
const PIECES: [(&str, usize, usize, &str); 4] = [
    ("hel", 0, 0, "red"),
    ("lo\nwor", 0, 3, "black"),
    ("ld", 1, 3, "blue"),
    ("!", 2, 0, "black"),
];

#[test_case([0, 1, 2, 3] ; "in reading order")]
#[test_case([3, 2, 1, 0] ; "reversed")]
#[test_case([2, 0, 3, 1] ; "interleaved")]
#[test_case([1, 3, 0, 2] ; "middle first")]
#[test_case([3, 0, 2, 1] ; "last line first")]
fn text_content_is_in_reading_order_regardless_of_insertion_order(order: [usize; 4]) {
    let mut doc = Document::new("order.txt");
    for index in order {
        let (text, line, column, color) = PIECES[index];
        doc.add_text(text, Position::new(line, column, 0.0, 0.0), normal(color))
            .unwrap();
    }

    assert_eq!(doc.text_content(), "helloworld!");
    assert_eq!(doc.memory_report().unique_formats, 3);
}

#[test]
fn ten_thousand_glyphs_with_three_formats() {
    let mut doc = Document::new("big.txt");
    let colors = ["black", "red", "blue"];
    let line = "y".repeat(100);
    for i in 0..100 {
        doc.add_text(&line, Position::new(i, 0, 0.0, 0.0), normal(colors[i % 3]))
            .unwrap();
    }

    let report = doc.memory_report();
    assert_eq!(report.total_glyphs, 10_000);
    assert_eq!(report.unique_formats, 3);
    assert_eq!(report.estimated_objects_with_sharing, 10_003);
    assert!(report.format_savings_ratio > 0.99);
}

#[test]
fn report_counts_only_this_documents_formats_in_a_shared_cache() {
    let mut ws = Workspace::new();
    let other = ws.create_document("other.txt").unwrap();
    for size in 1..=10 {
        other
            .add_text(
                "o",
                Position::new(0, size as usize, 0.0, 0.0),
                AttributeKey::new("Courier", size, "gray", TextStyle::Italic),
            )
            .unwrap();
    }

    let mine = ws.create_document("mine.txt").unwrap();
    let colors = ["black", "red", "blue"];
    let line = "y".repeat(100);
    for i in 0..100 {
        mine.add_text(&line, Position::new(i, 0, 0.0, 0.0), normal(colors[i % 3]))
            .unwrap();
    }

    let report = ws.document("mine.txt").unwrap().memory_report();
    assert_eq!(report.total_glyphs, 10_000);
    assert_eq!(report.unique_formats, 3);
    assert_eq!(report.estimated_objects_with_sharing, 10_003);
    assert!(report.format_savings_ratio > 0.99);

    assert_eq!(ws.global_report().unique_formats, 13);
}

#[test]
fn two_glyph_scenario() {
    let mut doc = Document::new("ab.txt");
    doc.add_glyph('A', Position::new(0, 0, 0.0, 0.0), normal("black"))
        .unwrap();
    doc.add_glyph('B', Position::new(0, 1, 10.0, 0.0), normal("black"))
        .unwrap();

    let a = doc.glyph_at((0, 0)).unwrap();
    let b = doc.glyph_at((0, 1)).unwrap();
    assert!(a.shares_attributes_with(b));
    assert_eq!(doc.cache().size(), 1);

    let report = doc.memory_report();
    assert_eq!(report, MemoryReport::new(2, 1));
    assert_eq!(report.estimated_objects_without_sharing, 2);
    assert_eq!(report.estimated_objects_with_sharing, 3);
    assert!((report.savings_ratio - -0.5).abs() < 1e-12);
}

#[test]
fn rendering_leaves_statistics_alone() {
    let mut doc = Document::new("render.txt");
    doc.add_text("render me", Position::default(), normal("black"))
        .unwrap();
    let before = doc.cache().stats();

    let mut sink = RecordingSink::new(1200, 800).with_zoom_level(1.5);
    doc.render(&mut sink);

    assert_eq!(sink.render_count(), 9);
    assert_eq!(doc.cache().stats(), before);
}

#[test]
fn documents_can_share_a_cache_they_were_given() {
    let cache = new_shared_attribute_cache();
    let mut a = Document::with_cache("a.txt", Arc::clone(&cache));
    let mut b = Document::with_cache("b.txt", Arc::clone(&cache));

    a.add_text("aa", Position::default(), normal("black")).unwrap();
    b.add_text("bb", Position::default(), normal("black")).unwrap();

    assert!(
        a.glyph_at((0, 0))
            .unwrap()
            .shares_attributes_with(b.glyph_at((0, 1)).unwrap())
    );
    assert_eq!(cache.stats().hits, 1);
    assert_eq!(b.memory_report().unique_formats, 1);
}

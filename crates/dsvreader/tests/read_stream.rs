#![allow(missing_docs, clippy::float_cmp)]

mod common;

use chrono::{TimeZone, Utc};
use dsvreader::{Reader, ZERO_TIME};

use crate::common::{PAGE_VIEWS, Trickle};

#[derive(Debug, PartialEq)]
struct PageView {
    hour: u8,
    path: String,
    views: u16,
    ratio: f32,
    seen_at: chrono::DateTime<Utc>,
}

fn read_page_views<R: std::io::Read>(reader: &mut Reader<R>) -> Vec<PageView> {
    let mut out = Vec::new();
    while reader.next_row() {
        let view = PageView {
            hour: reader.uint8(),
            path: reader.string(),
            views: reader.uint16(),
            ratio: reader.float32(),
            seen_at: reader.datetime(),
        };
        assert!(reader.error().is_none(), "{:?}", reader.error());
        out.push(view);
    }
    assert!(reader.error().is_none(), "{:?}", reader.error());
    out
}

#[test]
fn reads_typed_rows() {
    let views = read_page_views(&mut Reader::tsv(PAGE_VIEWS.as_bytes()));
    assert_eq!(views.len(), 4);
    assert_eq!(
        views[1],
        PageView {
            hour: 1,
            path: "/about\thtml".to_string(),
            views: 7,
            ratio: 0.5,
            seen_at: Utc.with_ymd_and_hms(2024, 1, 15, 1, 0, 0).unwrap(),
        }
    );
    assert_eq!(views[2].seen_at, ZERO_TIME);
    assert_eq!(views[3].views, u16::MAX);
    assert_eq!(views[3].ratio, 1e-3);
}

#[test]
fn byte_at_a_time_matches_one_read() {
    let whole = read_page_views(&mut Reader::tsv(PAGE_VIEWS.as_bytes()));
    let trickled = read_page_views(&mut Reader::tsv(Trickle(PAGE_VIEWS.as_bytes())));
    assert_eq!(whole, trickled);
}

#[test]
fn reset_reuses_the_reader() {
    let mut reader = Reader::tsv(PAGE_VIEWS.as_bytes());
    let first = read_page_views(&mut reader);
    reader.reset(PAGE_VIEWS.as_bytes());
    let second = read_page_views(&mut reader);
    assert_eq!(first, second);
    assert_eq!(reader.row(), 5);
}

// Host-side tests for the image catalog.

#![allow(dead_code)]
mod common;

use common::scene_core::catalog::*;

fn paths(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn blank_paths_are_dropped() {
    let c = ImageCatalog::new(paths(&["a.jpg", "  ", "", " b.jpg "]), |_| None);
    assert_eq!(c.len(), 2);
    assert_eq!(c.path(0), Some("a.jpg"));
    assert_eq!(c.path(1), Some("b.jpg"));
    assert_eq!(c.path(2), None);
}

#[test]
fn captions_follow_their_paths() {
    let c = ImageCatalog::new(paths(&["", "rome.jpg", "oslo.jpg"]), |p| {
        (p == "oslo.jpg").then(|| Caption {
            location: "Oslo".into(),
            date: "2019".into(),
        })
    });
    assert_eq!(c.caption(0), None);
    assert_eq!(c.caption(1).map(|c| c.lines()), Some(["Oslo", "2019"]));
    let listed: Vec<_> = c.iter().map(|(i, p, cap)| (i, p, cap.is_some())).collect();
    assert_eq!(listed, vec![(0, "rome.jpg", false), (1, "oslo.jpg", true)]);
}

#[test]
fn empty_catalog_is_valid() {
    let c = ImageCatalog::new(Vec::new(), |_| None);
    assert!(c.is_empty());
    assert_eq!(c.caption(0), None);
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

use anyhow::Result;
use flatkeys::*;

#[test]
fn simple_key() -> Result<()> {
    assert_eq!(split_path("a")?, vec![Segment::Key("a".into())]);
    assert_eq!(
        split_path("a.b.c")?,
        vec![
            Segment::Key("a".into()),
            Segment::Key("b".into()),
            Segment::Key("c".into()),
        ]
    );
    Ok(())
}

#[test]
fn indexed_key() -> Result<()> {
    assert_eq!(
        split_path("a[0]")?,
        vec![Segment::Key("a".into()), Segment::Index("0".into())]
    );
    assert_eq!(
        split_path("a[0][1]")?,
        vec![
            Segment::Key("a".into()),
            Segment::Index("0".into()),
            Segment::Index("1".into()),
        ]
    );
    assert_eq!(
        split_path("a[0].b")?,
        vec![
            Segment::Key("a".into()),
            Segment::Index("0".into()),
            Segment::Key("b".into()),
        ]
    );
    // A path may start with an index.
    assert_eq!(
        split_path("[3].x")?,
        vec![Segment::Index("3".into()), Segment::Key("x".into())]
    );
    Ok(())
}

#[test]
fn index_keeps_literal_digits() -> Result<()> {
    assert_eq!(
        split_path("a[007]")?,
        vec![Segment::Key("a".into()), Segment::Index("007".into())]
    );
    assert_eq!(join_path(&split_path("a[007]")?), "a[007]");
    Ok(())
}

#[test]
fn round_trip() -> Result<()> {
    for s in [
        "a",
        "a.b",
        "a.b.c",
        "a[0]",
        "a[0].b",
        "a[0][1]",
        "[0]",
        "[0].a[1]",
        "db.hosts[10].name",
        "a[18446744073709551615]",
        "héllo.wörld",
    ] {
        assert_eq!(join_path(&split_path(s)?), s, "round-trip failed for {s}");
    }
    Ok(())
}

#[test]
fn empty_key() {
    assert_eq!(split_path(""), Err(PathError::EmptyKey));
}

#[test]
fn spaces() {
    assert_eq!(split_path("a b"), Err(PathError::Space(1)));
    assert_eq!(split_path(" "), Err(PathError::Space(0)));
    assert_eq!(split_path("a[ 0]"), Err(PathError::Space(2)));
}

#[test]
fn empty_segments() {
    assert_eq!(split_path(".a"), Err(PathError::EmptySegment(0)));
    assert_eq!(split_path("a..b"), Err(PathError::EmptySegment(2)));
    assert_eq!(split_path("."), Err(PathError::EmptySegment(0)));
    assert_eq!(split_path("a[0]..b"), Err(PathError::EmptySegment(5)));
}

#[test]
fn trailing_dot() {
    assert_eq!(split_path("a."), Err(PathError::TrailingDot));
    assert_eq!(split_path("a[0]."), Err(PathError::TrailingDot));
}

#[test]
fn bracket_errors() {
    assert_eq!(split_path("a.[0]"), Err(PathError::BracketAfterDot(2)));
    assert_eq!(split_path("a[1[2]]"), Err(PathError::NestedBracket(3)));
    assert_eq!(split_path("a]"), Err(PathError::UnmatchedBracket(1)));
    assert_eq!(split_path("]"), Err(PathError::UnmatchedBracket(0)));
    assert_eq!(split_path("a[1"), Err(PathError::UnclosedBracket(1)));
    assert_eq!(split_path("a["), Err(PathError::UnclosedBracket(1)));
    assert_eq!(split_path("a[1.2]"), Err(PathError::DotInsideBrackets(3)));
}

#[test]
fn invalid_indices() {
    assert_eq!(split_path("a[]"), Err(PathError::InvalidIndex(2)));
    assert_eq!(split_path("a[x]"), Err(PathError::InvalidIndex(2)));
    assert_eq!(split_path("a[1x]"), Err(PathError::InvalidIndex(2)));
    assert_eq!(split_path("a[-1]"), Err(PathError::InvalidIndex(2)));
    assert_eq!(split_path("a[+1]"), Err(PathError::InvalidIndex(2)));
    // One past u64::MAX.
    assert_eq!(
        split_path("a[18446744073709551616]"),
        Err(PathError::InvalidIndex(2))
    );
}

#[test]
fn character_after_bracket() {
    assert_eq!(
        split_path("a[0]b"),
        Err(PathError::AfterBracket { ch: 'b', pos: 4 })
    );
}

#[test]
fn error_messages_carry_positions() {
    let err = split_path("a[x]").unwrap_err();
    assert_eq!(err.to_string(), "index must be an unsigned integer at position 2");
    let err = split_path("a b").unwrap_err();
    assert_eq!(err.to_string(), "space at position 1");
}

#[test]
fn join_empty_is_empty() {
    assert_eq!(join_path(&[]), "");
}

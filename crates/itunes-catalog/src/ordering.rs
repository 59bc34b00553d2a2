use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, PartialEq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let is_digit = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != is_digit)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);

        self.rest = rest;

        Some(match is_digit {
            true => Chunk::Digits(chunk),
            false => Chunk::Text(chunk),
        })
    }
}

fn cmp_digits(left: &str, right: &str) -> Ordering {
    let left_value = left.trim_start_matches('0');
    let right_value = right.trim_start_matches('0');

    left_value
        .len()
        .cmp(&right_value.len())
        .then_with(|| left_value.cmp(right_value))
        .then_with(|| left.len().cmp(&right.len()))
}

/// Lowercased base letters: "É" and "e" fold to the same character.
fn fold(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn cmp_text(left: &str, right: &str) -> Ordering {
    fold(left).cmp(fold(right))
}

fn cmp_chunk(left: &Chunk, right: &Chunk) -> Ordering {
    match (left, right) {
        (Chunk::Digits(left), Chunk::Digits(right)) => cmp_digits(left, right),
        (Chunk::Text(left), Chunk::Text(right)) => cmp_text(left, right),
        (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
    }
}

/// Case- and accent-insensitive string comparison where runs of digits
/// compare by their numeric value, so "Track 2" sorts before "Track 10".
///
/// Strings that only differ in letter case or diacritics are ordered by code
/// point to keep the ordering total.
pub fn natural_cmp(left: &str, right: &str) -> Ordering {
    let mut left_chunks = Chunks { rest: left };
    let mut right_chunks = Chunks { rest: right };

    loop {
        match (left_chunks.next(), right_chunks.next()) {
            (None, None) => return left.cmp(right),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(left_chunk), Some(right_chunk)) => match cmp_chunk(&left_chunk, &right_chunk) {
                Ordering::Equal => continue,
                ordering => return ordering,
            },
        }
    }
}

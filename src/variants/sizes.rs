//! Size ordering

use std::cmp::Ordering;

/// Compare two size labels in natural order.
///
/// Digit runs compare numerically and sort before text, text compares
/// case-insensitively, so `"2" < "4" < "10" < "L" < "m"`.
pub fn natural_size_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks { rest: a };
    let mut right = Chunks { rest: b };

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => match compare_chunks(l, r) {
                Ordering::Equal => {}
                ordering => return ordering,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Chunk<'s> {
    Number(&'s str),
    Text(&'s str),
}

struct Chunks<'s> {
    rest: &'s str,
}

impl<'s> Iterator for Chunks<'s> {
    type Item = Chunk<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();

        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());

        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;

        Some(if digits {
            Chunk::Number(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

fn compare_chunks(left: Chunk<'_>, right: Chunk<'_>) -> Ordering {
    match (left, right) {
        (Chunk::Number(l), Chunk::Number(r)) => {
            let l = l.trim_start_matches('0');
            let r = r.trim_start_matches('0');

            // Equal-length digit strings order lexicographically.
            l.len().cmp(&r.len()).then_with(|| l.cmp(r))
        }
        (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        (Chunk::Text(l), Chunk::Text(r)) => l.to_lowercase().cmp(&r.to_lowercase()),
    }
}

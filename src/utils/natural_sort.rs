use std::cmp::Ordering;

/// One run of a key: either consecutive non-digits or consecutive digits.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Number(u64),
}

/// Comparable form of a station key so that A9 sorts before A10.
///
/// Digit runs compare numerically, text runs lexically. Numbers order before
/// text when the segment kinds differ, and the raw string breaks ties between
/// keys whose segments compare equal (e.g. "A01" vs "A1"), keeping the order
/// total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalKey {
    segments: Vec<Segment>,
    raw: String,
}

impl Ord for NaturalKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for pair in self.segments.iter().zip(other.segments.iter()) {
            let ordering = match pair {
                (Segment::Number(a), Segment::Number(b)) => a.cmp(b),
                (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
                (Segment::Number(_), Segment::Text(_)) => Ordering::Less,
                (Segment::Text(_), Segment::Number(_)) => Ordering::Greater,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        self.segments
            .len()
            .cmp(&other.segments.len())
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for NaturalKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the natural sort key for a string.
pub fn natural_key(key: &str) -> NaturalKey {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_is_digit = None;

    for ch in key.chars() {
        let is_digit = ch.is_ascii_digit();
        if current_is_digit != Some(is_digit) && !current.is_empty() {
            segments.push(finish_segment(&current, current_is_digit == Some(true)));
            current.clear();
        }
        current_is_digit = Some(is_digit);
        current.push(ch);
    }
    if !current.is_empty() {
        segments.push(finish_segment(&current, current_is_digit == Some(true)));
    }

    NaturalKey {
        segments,
        raw: key.to_string(),
    }
}

fn finish_segment(run: &str, is_digit: bool) -> Segment {
    if is_digit {
        // Digit runs longer than u64 fall back to text comparison
        match run.parse::<u64>() {
            Ok(n) => Segment::Number(n),
            Err(_) => Segment::Text(run.to_string()),
        }
    } else {
        Segment::Text(run.to_string())
    }
}

/// Sort key for a composite "Quadrat/Station" identifier: the separator is
/// dropped so the key compares as quadrat letters followed by the station
/// number, grouping quadrats and ordering stations numerically within each.
pub fn station_key(composite: &str) -> NaturalKey {
    let joined: String = composite.split('/').collect();
    natural_key(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_suffixes_sort_numerically() {
        let mut keys = vec!["A9", "A10", "A2"];
        keys.sort_by_key(|k| natural_key(k));
        assert_eq!(keys, vec!["A2", "A9", "A10"]);
    }

    #[test]
    fn test_quadrat_before_station() {
        let mut keys = vec!["B1", "A16", "A1"];
        keys.sort_by_key(|k| natural_key(k));
        assert_eq!(keys, vec!["A1", "A16", "B1"]);
    }

    #[test]
    fn test_composite_keys() {
        let mut keys = vec!["B/1", "A/10", "A/9", "A/2"];
        keys.sort_by_key(|k| station_key(k));
        assert_eq!(keys, vec!["A/2", "A/9", "A/10", "B/1"]);
    }

    #[test]
    fn test_total_order_on_leading_zeros() {
        // Equal numeric value, distinct keys: raw string breaks the tie
        let a01 = natural_key("A01");
        let a1 = natural_key("A1");
        assert_ne!(a01.cmp(&a1), Ordering::Equal);
        assert_eq!(a01.cmp(&a01.clone()), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        let mut keys = vec!["A1x", "A1"];
        keys.sort_by_key(|k| natural_key(k));
        assert_eq!(keys, vec!["A1", "A1x"]);
    }
}

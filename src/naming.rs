//! `NNN-name` filename convention for collage images.
//!
//! Image files may carry a numeric prefix that fixes their placement order:
//! `010-harbour.jpg` is placed before `020-lighthouse.jpg`. Numbered files
//! come first, by number; unnumbered files follow in name order.
//!
//! Dashes in the name become spaces in the display title:
//! `030-old-town.jpg` → "old town".

use std::cmp::Ordering;

/// Parsed form of a file stem like `020-old-town`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName {
    /// Numeric prefix, if any.
    pub number: Option<u32>,
    /// Name after the prefix, dashes preserved. Full stem when unnumbered.
    pub name: String,
    /// `name` with dashes turned into spaces.
    pub title: String,
}

impl ItemName {
    /// Placement order: numbered before unnumbered, then by number, then name.
    pub fn order(&self, other: &Self) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.name.cmp(&other.name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.name.cmp(&other.name),
        }
    }
}

/// Split a file stem into its numeric prefix and name.
///
/// - `"020-old-town"` → number 20, name `old-town`, title `old town`
/// - `"007"` → number 7, empty name
/// - `"harbour"` → no number, name `harbour`
/// - `"2x-zoom"` → no number (prefix is not all digits)
pub fn parse_item_name(stem: &str) -> ItemName {
    let (prefix, rest) = match stem.split_once('-') {
        Some((prefix, rest)) => (prefix, rest),
        None => (stem, ""),
    };

    let is_number = !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit());
    match prefix.parse::<u32>() {
        Ok(number) if is_number => ItemName {
            number: Some(number),
            name: rest.to_string(),
            title: rest.replace('-', " "),
        },
        _ => ItemName {
            number: None,
            name: stem.to_string(),
            title: stem.replace('-', " "),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_multi_word() {
        let n = parse_item_name("020-old-town");
        assert_eq!(n.number, Some(20));
        assert_eq!(n.name, "old-town");
        assert_eq!(n.title, "old town");
    }

    #[test]
    fn number_only() {
        let n = parse_item_name("007");
        assert_eq!(n.number, Some(7));
        assert_eq!(n.name, "");
        assert_eq!(n.title, "");
    }

    #[test]
    fn number_with_trailing_dash() {
        let n = parse_item_name("010-");
        assert_eq!(n.number, Some(10));
        assert_eq!(n.name, "");
    }

    #[test]
    fn unnumbered() {
        let n = parse_item_name("harbour-at-night");
        assert_eq!(n.number, None);
        assert_eq!(n.name, "harbour-at-night");
        assert_eq!(n.title, "harbour at night");
    }

    #[test]
    fn signed_prefix_is_not_a_number() {
        assert_eq!(parse_item_name("+5-up").number, None);
    }

    #[test]
    fn mixed_prefix_is_not_a_number() {
        assert_eq!(parse_item_name("2x-zoom").number, None);
    }

    #[test]
    fn ordering_numbered_first() {
        let mut names: Vec<ItemName> = ["zebra", "020-b", "apple", "003-z", "020-a"]
            .iter()
            .map(|s| parse_item_name(s))
            .collect();
        names.sort_by(ItemName::order);
        let order: Vec<&str> = names.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(order, vec!["z", "a", "b", "apple", "zebra"]);
    }
}

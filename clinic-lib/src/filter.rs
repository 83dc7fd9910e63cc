//! Host-side search
//!
//! Pages filter their rows before handing them to the table engine; the
//! engine only sorts, pages and selects what it is given.

use trellis::calendar::CalendarEvent;

use crate::model::{Invoice, Patient};

/// Records that can be matched by a free-text search box.
pub trait Searchable {
    /// The text fields a query is matched against.
    fn haystacks(&self) -> Vec<&str>;
}

impl Searchable for Patient {
    fn haystacks(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()]
    }
}

impl Searchable for Invoice {
    fn haystacks(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.patient.as_str()]
    }
}

impl Searchable for CalendarEvent {
    fn haystacks(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

/// Returns `true` if every whitespace-separated token of `query` occurs,
/// case-insensitively, in at least one haystack. A blank query matches.
pub fn matches_query(haystacks: &[&str], query: &str) -> bool {
    let haystacks: Vec<String> = haystacks.iter().map(|h| h.to_lowercase()).collect();
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .all(|token| haystacks.iter().any(|h| h.contains(&token)))
}

/// The records of `rows` matching `query`, in their original order.
pub fn search<T: Searchable + Clone>(rows: &[T], query: &str) -> Vec<T> {
    rows.iter()
        .filter(|row| matches_query(&row.haystacks(), query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    #[test]
    fn test_tokens_all_required() {
        let fields = ["Grace Okafor", "grace.okafor@example.com"];
        assert!(matches_query(&fields, "okafor GRACE"));
        assert!(!matches_query(&fields, "grace whitfield"));
    }

    #[test]
    fn test_blank_query_matches_everything() {
        assert!(matches_query(&["anything"], "   "));
        assert_eq!(search(&mock::patients(), "").len(), 24);
    }

    #[test]
    fn test_search_keeps_order() {
        let found = search(&mock::patients(), "hugo");
        let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Hugo Whitfield", "Hugo Okafor", "Hugo Lindqvist"]);
    }

    #[test]
    fn test_events_match_tags() {
        let events = mock::appointments(chrono::NaiveDate::from_ymd_opt(2025, 3, 12).unwrap());
        assert!(search(&events, "urgent").iter().all(|e| e.category == "Emergency"));
    }
}

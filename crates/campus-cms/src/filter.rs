//! In-memory filtering for the programs listing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::text::strip_html;
use crate::types::Program;

/// Control value meaning "no restriction".
pub const ALL: &str = "all";

/// A select-control value: either unrestricted or one specific option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Parse a control value; `"all"` and blank values are unrestricted.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    pub fn from_option(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_default()
    }

    fn admits(&self, candidate: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == candidate,
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        Selection::parse(&value)
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => ALL.to_string(),
            Selection::Only(value) => value,
        }
    }
}

/// The four independent controls on the programs listing. All predicates
/// are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Selection,
    #[serde(default)]
    pub campus: Selection,
    #[serde(default)]
    pub credential: Selection,
}

impl ProgramFilter {
    /// True when `program` passes every control.
    pub fn matches(&self, program: &Program) -> bool {
        self.matches_search(program)
            && self.category.admits(&program.acf.category)
            && self.matches_campus(program)
            && self.credential.admits(&program.acf.credential)
    }

    fn matches_search(&self, program: &Program) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        program.title.rendered.to_lowercase().contains(&needle)
            || program.acf.description.to_lowercase().contains(&needle)
            || strip_html(&program.content.rendered)
                .to_lowercase()
                .contains(&needle)
    }

    /// Campus lists are CMS-authored, so membership ignores case.
    fn matches_campus(&self, program: &Program) -> bool {
        match &self.campus {
            Selection::All => true,
            Selection::Only(wanted) => program
                .acf
                .campus
                .iter()
                .any(|c| c.trim().eq_ignore_ascii_case(wanted.trim())),
        }
    }

    /// Matching programs, in source order. The source is left untouched.
    pub fn apply<'a>(&self, programs: &'a [Program]) -> Vec<&'a Program> {
        programs.iter().filter(|p| self.matches(p)).collect()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Distinct non-empty categories among `programs`.
pub fn category_options(programs: &[Program]) -> Vec<String> {
    distinct(programs.iter().map(|p| p.acf.category.as_str()))
}

/// Distinct non-empty credentials among `programs`.
pub fn credential_options(programs: &[Program]) -> Vec<String> {
    distinct(programs.iter().map(|p| p.acf.credential.as_str()))
}

/// What the listing should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingState {
    /// The CMS could not be reached; the page should offer a retry.
    Unavailable,
    /// No programs were loaded at all.
    NothingLoaded,
    /// Programs were loaded but none pass the filter.
    NoMatches,
    Results,
}

/// A filtered view over a loaded program list.
#[derive(Debug, Clone)]
pub struct ProgramListing<'a> {
    pub total: usize,
    pub visible: Vec<&'a Program>,
    pub categories: Vec<String>,
    pub credentials: Vec<String>,
}

impl<'a> ProgramListing<'a> {
    pub fn new(programs: &'a [Program], filter: &ProgramFilter) -> Self {
        Self {
            total: programs.len(),
            visible: filter.apply(programs),
            categories: category_options(programs),
            credentials: credential_options(programs),
        }
    }

    pub fn state(&self) -> ListingState {
        if self.total == 0 {
            ListingState::NothingLoaded
        } else if self.visible.is_empty() {
            ListingState::NoMatches
        } else {
            ListingState::Results
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn programs() -> Vec<Program> {
        serde_json::from_value(json!([
            {
                "id": 1,
                "title": { "rendered": "Automotive Technology" },
                "content": { "rendered": "<p>Engines and <b>diagnostics</b></p>" },
                "slug": "automotive-technology",
                "acf": { "category": "automotive", "credential": "Associate Degree",
                         "campus": ["waco", "austin"], "description": "Repair cars" }
            },
            {
                "id": 2,
                "title": { "rendered": "Healthcare Technology" },
                "content": { "rendered": "<p>Patient care</p>" },
                "slug": "healthcare-technology",
                "acf": { "category": "healthcare", "credential": "Certificate",
                         "campus": ["Houston", "dallas"] }
            },
            {
                "id": 3,
                "title": { "rendered": "Diesel Technology" },
                "content": { "rendered": "<p>Heavy engines</p>" },
                "slug": "diesel-technology",
                "acf": { "category": "automotive", "credential": "Certificate",
                         "campus": ["waco"] }
            },
            {
                "id": 4,
                "title": { "rendered": "General Studies" },
                "slug": "general-studies"
            }
        ]))
        .unwrap()
    }

    fn ids(found: &[&Program]) -> Vec<u64> {
        found.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_default_filter_admits_everything() {
        let list = programs();
        assert_eq!(ProgramFilter::default().apply(&list).len(), 4);
    }

    #[test]
    fn test_search_matches_title_description_or_body() {
        let list = programs();
        let by = |term: &str| {
            ids(&ProgramFilter {
                search: term.to_string(),
                ..Default::default()
            }
            .apply(&list))
        };
        assert_eq!(by("HEALTHCARE"), vec![2]);
        assert_eq!(by("repair"), vec![1]);
        assert_eq!(by("engines"), vec![1, 3]);
        // Tags are stripped before matching.
        assert!(by("<b>").is_empty());
    }

    #[test]
    fn test_campus_match_is_case_insensitive_containment() {
        let list = programs();
        let filter = ProgramFilter {
            campus: Selection::parse("houston"),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&list)), vec![2]);
    }

    #[test]
    fn test_predicates_commute() {
        let list = programs();
        let category = ProgramFilter {
            category: Selection::parse("automotive"),
            ..Default::default()
        };
        let campus = ProgramFilter {
            campus: Selection::parse("waco"),
            ..Default::default()
        };

        let category_first: Vec<Program> = category.apply(&list).into_iter().cloned().collect();
        let a = ids(&campus.apply(&category_first));
        let campus_first: Vec<Program> = campus.apply(&list).into_iter().cloned().collect();
        let b = ids(&category.apply(&campus_first));
        assert_eq!(a, b);

        let combined = ProgramFilter {
            category: Selection::parse("automotive"),
            campus: Selection::parse("waco"),
            ..Default::default()
        };
        assert_eq!(ids(&combined.apply(&list)), a);
        // Idempotent.
        let once: Vec<Program> = combined.apply(&list).into_iter().cloned().collect();
        assert_eq!(ids(&combined.apply(&once)), a);
    }

    #[test]
    fn test_option_lists_are_distinct_and_non_empty() {
        let list = programs();
        let mut categories = category_options(&list);
        categories.sort();
        assert_eq!(categories, vec!["automotive", "healthcare"]);

        let mut credentials = credential_options(&list);
        credentials.sort();
        assert_eq!(credentials, vec!["Associate Degree", "Certificate"]);
    }

    #[test]
    fn test_listing_states() {
        let list = programs();
        let none_match = ProgramFilter {
            search: "astrophysics".to_string(),
            ..Default::default()
        };
        assert_eq!(ProgramListing::new(&list, &none_match).state(), ListingState::NoMatches);
        assert_eq!(ProgramListing::new(&[], &none_match).state(), ListingState::NothingLoaded);
        assert_eq!(
            ProgramListing::new(&list, &ProgramFilter::default()).state(),
            ListingState::Results
        );
    }

    #[test]
    fn test_selection_parse_and_serde() {
        assert_eq!(Selection::parse("All"), Selection::All);
        assert_eq!(Selection::parse(" "), Selection::All);
        assert_eq!(Selection::from_option(None), Selection::All);
        assert_eq!(Selection::parse("trades"), Selection::Only("trades".into()));

        let filter: ProgramFilter =
            serde_json::from_value(json!({ "category": "all", "campus": "waco" })).unwrap();
        assert_eq!(filter.category, Selection::All);
        assert_eq!(filter.campus, Selection::Only("waco".into()));
        assert_eq!(serde_json::to_value(&filter).unwrap()["credential"], "all");
    }
}

//! Person projector.
//!
//! Flattens one [`Individual`] into the display [`Person`] shape:
//! splits the GEDCOM slash-delimited name into given name and surname,
//! and reduces raw date values to a 4-digit year. Years, not full
//! dates, are a display requirement of the downstream template.

use std::sync::LazyLock;

use regex::Regex;

use crate::gedcom::Individual;
use crate::models::Person;

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{4})\b").unwrap());

/// Split a GEDCOM `NAME` value into (given name, surname).
///
/// The surname conventionally sits between slashes: `John /Doe/`.
/// Without slashes the whole value is the given name.
pub fn split_name(name: &str) -> (String, String) {
    match name.split_once('/') {
        Some((given, rest)) => {
            let surname = rest.split('/').next().unwrap_or("");
            (given.trim().to_string(), surname.trim().to_string())
        }
        None => (name.trim().to_string(), String::new()),
    }
}

/// Extract the first 4-digit year from a raw date value.
pub fn extract_year(date: &str) -> Option<String> {
    YEAR_RE
        .captures(date)
        .map(|caps| caps[1].to_string())
}

/// Project an individual for a subject/spouse/parent position.
pub fn project(indi: &Individual) -> Person {
    let (first_name, last_name) = indi
        .name
        .as_deref()
        .map(split_name)
        .unwrap_or_default();
    Person {
        first_name,
        last_name,
        birth: indi.birth_date.as_deref().and_then(extract_year),
        death: indi.death_date.as_deref().and_then(extract_year),
        child: None,
    }
}

/// Project an individual for a children-list position (`child: true`).
pub fn project_child(indi: &Individual) -> Person {
    Person {
        child: Some(true),
        ..project(indi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indi(name: Option<&str>, birth: Option<&str>, death: Option<&str>) -> Individual {
        Individual {
            id: "@I001@".to_string(),
            name: name.map(str::to_string),
            birth_date: birth.map(str::to_string),
            death_date: death.map(str::to_string),
            ..Individual::default()
        }
    }

    #[test]
    fn splits_slash_delimited_surname() {
        assert_eq!(
            split_name("John /Doe/"),
            ("John".to_string(), "Doe".to_string())
        );
    }

    #[test]
    fn name_without_slashes_is_all_given_name() {
        assert_eq!(split_name("Pocahontas"), ("Pocahontas".to_string(), String::new()));
    }

    #[test]
    fn multi_part_given_name_is_preserved() {
        assert_eq!(
            split_name("Mary Ann /van Houten/"),
            ("Mary Ann".to_string(), "van Houten".to_string())
        );
    }

    #[test]
    fn extract_year_finds_first_four_digit_run() {
        assert_eq!(extract_year("1 JAN 1850"), Some("1850".to_string()));
        assert_eq!(extract_year("BET 1850 AND 1852"), Some("1850".to_string()));
        assert_eq!(extract_year("1920"), Some("1920".to_string()));
    }

    #[test]
    fn extract_year_none_without_year() {
        assert_eq!(extract_year("ABT JAN"), None);
        assert_eq!(extract_year(""), None);
        // A 5-digit run is not a year.
        assert_eq!(extract_year("12345"), None);
    }

    #[test]
    fn projects_full_individual() {
        let p = project(&indi(Some("John /Doe/"), Some("1 JAN 1850"), Some("1920")));
        assert_eq!(p.first_name, "John");
        assert_eq!(p.last_name, "Doe");
        assert_eq!(p.birth.as_deref(), Some("1850"));
        assert_eq!(p.death.as_deref(), Some("1920"));
        assert_eq!(p.child, None);
    }

    #[test]
    fn projects_nameless_individual_as_empty_strings() {
        let p = project(&indi(None, None, None));
        assert_eq!(p.first_name, "");
        assert_eq!(p.last_name, "");
        assert_eq!(p.birth, None);
        assert_eq!(p.death, None);
    }

    #[test]
    fn project_child_sets_flag() {
        let p = project_child(&indi(Some("James /Doe/"), None, None));
        assert_eq!(p.child, Some(true));
        assert_eq!(p.first_name, "James");
    }
}

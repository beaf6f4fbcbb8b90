// src/quiz/report.rs

//! Admin view over stored results: filtering and the
//! class → Jahrgang → (date | student) tree.
//!
//! Everything here is derived from a result list; no state is kept.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{models::result::QuizResult, utils::normalize_name};

/// Third level of the report tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Date sections holding one card per student.
    #[default]
    #[serde(alias = "by-date")]
    Date,
    /// Student sections holding one card per date.
    #[serde(alias = "by-name")]
    Name,
}

/// Filters of the admin result view. Unset or empty fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportFilter {
    /// Case-insensitive substring of the student name.
    pub q: Option<String>,
    /// Exact class name.
    pub klasse: Option<String>,
    /// Prefix of `submittedAt`, usually `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Teacher, compared like the results teacher filter.
    pub lehrer: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ReportFilter {
    pub fn matches(&self, result: &QuizResult) -> bool {
        if let Some(q) = non_empty(&self.q) {
            if !result.name.to_lowercase().contains(&q.to_lowercase()) {
                return false;
            }
        }
        if let Some(klasse) = non_empty(&self.klasse) {
            if result.klasse != klasse {
                return false;
            }
        }
        if let Some(date) = non_empty(&self.date) {
            if !result.submitted_at.starts_with(date) {
                return false;
            }
        }
        if let Some(lehrer) = non_empty(&self.lehrer) {
            if normalize_name(&result.lehrer) != normalize_name(lehrer) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, results: &'a [QuizResult]) -> Vec<&'a QuizResult> {
        results.iter().filter(|r| self.matches(r)).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub grouping: Grouping,
    pub classes: Vec<ClassGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassGroup {
    pub klasse: String,
    pub cohorts: Vec<CohortGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortGroup {
    pub jahrgang: String,
    pub sections: Vec<Section>,
}

/// A date (grouping by date) or a student name (grouping by name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub cards: Vec<StudentCard>,
}

/// Leaf of the tree: all results of one student on one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentCard {
    pub name: String,
    pub date: String,
    /// Correct answers across `results`.
    pub earned: usize,
    /// Answers across `results`.
    pub total: usize,
    pub results: Vec<QuizResult>,
}

impl StudentCard {
    fn new(name: &str, date: &str, results: Vec<&QuizResult>) -> Self {
        let (earned, total) = results
            .iter()
            .flat_map(|r| r.answers.values())
            .fold((0, 0), |(earned, total), answer| {
                (earned + usize::from(answer.is_correct), total + 1)
            });

        Self {
            name: name.to_string(),
            date: date.to_string(),
            earned,
            total,
            results: results.into_iter().cloned().collect(),
        }
    }
}

impl Report {
    /// Ids of every result in the tree, in tree order.
    pub fn result_ids(&self) -> Vec<&str> {
        self.classes
            .iter()
            .flat_map(|c| &c.cohorts)
            .flat_map(|y| &y.sections)
            .flat_map(|s| &s.cards)
            .flat_map(|card| &card.results)
            .map(|r| r.id.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

type Leaves<'a> = BTreeMap<String, BTreeMap<String, Vec<&'a QuizResult>>>;

/// Groups results into the report tree. Every level is sorted by key;
/// results inside a card keep their input order.
pub fn build_report<'a, I>(results: I, grouping: Grouping) -> Report
where
    I: IntoIterator<Item = &'a QuizResult>,
{
    let mut tree: BTreeMap<String, BTreeMap<String, Leaves<'a>>> = BTreeMap::new();

    for result in results {
        let date = result.date().to_string();
        let (section, card) = match grouping {
            Grouping::Date => (date, result.name.clone()),
            Grouping::Name => (result.name.clone(), date),
        };

        tree.entry(result.klasse.clone())
            .or_default()
            .entry(result.jahrgang.clone())
            .or_default()
            .entry(section)
            .or_default()
            .entry(card)
            .or_default()
            .push(result);
    }

    let classes = tree
        .into_iter()
        .map(|(klasse, cohorts)| ClassGroup {
            klasse,
            cohorts: cohorts
                .into_iter()
                .map(|(jahrgang, sections)| CohortGroup {
                    jahrgang,
                    sections: sections
                        .into_iter()
                        .map(|(key, cards)| Section {
                            cards: cards
                                .into_iter()
                                .map(|(card_key, leaf)| match grouping {
                                    Grouping::Date => StudentCard::new(&card_key, &key, leaf),
                                    Grouping::Name => StudentCard::new(&key, &card_key, leaf),
                                })
                                .collect(),
                            key,
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    Report { grouping, classes }
}

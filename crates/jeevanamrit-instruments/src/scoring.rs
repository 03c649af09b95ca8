use std::collections::BTreeMap;

use jeevanamrit_core::models::dosha::{Constitution, Dosha, DoshaScores, DoshaShares};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{AssessmentError, InvalidSelection};
use crate::questionnaire::QuestionBank;

/// The chosen option for each answered question, keyed by question index.
/// Re-answering a question replaces the earlier choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectionSet(BTreeMap<usize, usize>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `option` for `question`, returning the option it replaced.
    pub fn select(&mut self, question: usize, option: usize) -> Option<usize> {
        self.0.insert(question, option)
    }

    pub fn get(&self, question: usize) -> Option<usize> {
        self.0.get(&question).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(q, o)| (*q, *o))
    }

    /// Question indices in `0..question_count` with no selection, in order.
    pub fn unanswered(&self, question_count: usize) -> impl Iterator<Item = usize> + '_ {
        (0..question_count).filter(|q| !self.0.contains_key(q))
    }
}

impl FromIterator<(usize, usize)> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for (question, option) in iter {
            set.select(question, option);
        }
        set
    }
}

/// Check every selection addresses a real question and option.
pub fn check_selections(
    selections: &SelectionSet,
    bank: &QuestionBank,
) -> Result<(), InvalidSelection> {
    for (question, option) in selections.iter() {
        let q = bank
            .question(question)
            .ok_or(InvalidSelection::QuestionOutOfRange {
                question,
                question_count: bank.len(),
            })?;
        if option >= q.options.len() {
            return Err(InvalidSelection::OptionOutOfRange {
                question,
                option,
                option_count: q.options.len(),
            });
        }
    }
    Ok(())
}

/// Total the weights of every selected option per dosha.
///
/// Totals are rebuilt from the full selection set on every call, so a
/// changed answer never leaves its old weight behind.
pub fn score(selections: &SelectionSet, bank: &QuestionBank) -> Result<DoshaScores, AssessmentError> {
    if bank.is_empty() {
        return Err(AssessmentError::Configuration(
            "cannot score against an empty question bank".to_string(),
        ));
    }
    check_selections(selections, bank)?;

    let mut scores = DoshaScores::default();
    for (question, option) in selections.iter() {
        let chosen = &bank.questions[question].options[option];
        scores
            .checked_add(chosen.category, chosen.weight)
            .ok_or_else(|| {
                AssessmentError::Configuration(format!(
                    "{} score overflows at question {question}",
                    chosen.category
                ))
            })?;
    }
    Ok(scores)
}

/// The dosha with the strictly highest score, or `Tridoshic` when the top
/// score is shared by two or three doshas.
pub fn classify(scores: &DoshaScores) -> Constitution {
    let top = Dosha::ALL
        .iter()
        .map(|d| scores.get(*d))
        .max()
        .unwrap_or_default();
    let mut leaders = Dosha::ALL.iter().filter(|d| scores.get(**d) == top);
    match (leaders.next(), leaders.next()) {
        (Some(dosha), None) => Constitution::from(*dosha),
        _ => Constitution::Tridoshic,
    }
}

/// Everything the results screen shows for one set of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentOutcome {
    pub scores: DoshaScores,
    pub constitution: Constitution,
    pub shares: DoshaShares,
}

/// Score and classify in one step.
pub fn assess(selections: &SelectionSet, bank: &QuestionBank) -> Result<AssessmentOutcome, AssessmentError> {
    let scores = score(selections, bank)?;
    Ok(AssessmentOutcome {
        scores,
        constitution: classify(&scores),
        shares: scores.percentages(),
    })
}

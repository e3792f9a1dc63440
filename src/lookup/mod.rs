//! Look questions up by their identifier in a parsed pool.

use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::language::{Element, Group, Question};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupOptions {
    /// Remove the leading "A. " style label from each answer.
    pub strip_answer_prefix: bool,
}

/// A question as presented to a quiz: the text prefixed with its qid, and
/// the topics of the group it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Found {
    pub qid: String,
    pub topics: Vec<String>,
    #[serde(serialize_with = "crate::language::blank_as_none::serialize")]
    pub figure: Option<String>,
    pub question: String,
    pub answers: Vec<String>,
    #[serde(rename = "correct answer")]
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LookupResult {
    Found(Found),
    Missing { qid: String, message: String },
}

impl LookupResult {
    pub fn found(&self) -> Option<&Found> {
        match self {
            LookupResult::Found(found) => Some(found),
            LookupResult::Missing { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Failed reading {filename}: {source}")]
    Reading {
        filename: String,
        source: std::io::Error,
    },
    #[error("Not a question pool: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Load an Element previously written out as JSON.
pub fn read_element(filename: &Path) -> Result<Element, LookupError> {
    let content = std::fs::read_to_string(filename).map_err(|source| LookupError::Reading {
        filename: filename
            .display()
            .to_string(),
        source,
    })?;
    let element = serde_json::from_str(&content)?;
    Ok(element)
}

/// Questions of an Element indexed by qid.
#[derive(Debug)]
pub struct QuestionPool<'e> {
    index: HashMap<&'e str, (&'e Group, &'e Question)>,
}

impl<'e> QuestionPool<'e> {
    pub fn new(element: &'e Element) -> QuestionPool<'e> {
        let mut index = HashMap::new();
        for group in element.groups() {
            for question in &group.questions {
                // first occurrence wins, as it would reading the pool in order
                index
                    .entry(
                        question
                            .qid
                            .as_str(),
                    )
                    .or_insert((group, question));
            }
        }
        QuestionPool { index }
    }

    pub fn len(&self) -> usize {
        self.index
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.index
            .is_empty()
    }

    pub fn get(&self, qid: &str) -> Option<&'e Question> {
        self.index
            .get(qid)
            .map(|(_, question)| *question)
    }

    /// One result per requested qid, in the order requested.
    pub fn questions_by_ids<S: AsRef<str>>(&self, qids: &[S], options: &LookupOptions) -> Vec<LookupResult> {
        qids.iter()
            .map(|qid| {
                let qid = qid.as_ref();
                match self
                    .index
                    .get(qid)
                {
                    Some((group, question)) => LookupResult::Found(present(group, question, options)),
                    None => LookupResult::Missing {
                        qid: qid.to_string(),
                        message: if self.is_empty() {
                            "question pool is empty".to_string()
                        } else {
                            format!("{} not found", qid)
                        },
                    },
                }
            })
            .collect()
    }
}

fn present(group: &Group, question: &Question, options: &LookupOptions) -> Found {
    let label = |answer: &str| -> String {
        if options.strip_answer_prefix {
            answer
                .chars()
                .skip(3)
                .collect()
        } else {
            answer.to_string()
        }
    };

    Found {
        qid: question
            .qid
            .clone(),
        topics: group
            .topics()
            .to_vec(),
        figure: question
            .figure
            .clone(),
        question: format!("#{} {}", question.qid, question.text),
        answers: question
            .answers
            .iter()
            .map(|answer| label(answer.as_str()))
            .collect(),
        correct_answer: label(question.correct_answer()),
    }
}

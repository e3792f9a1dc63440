//! Types representing a parsed question pool. Ownership is strictly a tree:
//! an Element owns its Subelements, which own their Groups, which own their
//! Questions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::split_topics;

/// A begin/end pair, used both for the years a pool is valid and for the
/// dates it is in effect. The end may be empty when the document only
/// states a start date.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub begin: String,
    pub end: String,
}

impl Span {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Span {
        Span {
            begin: begin.into(),
            end: end.into(),
        }
    }
}

/// One of the four multiple choice positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    A,
    B,
    C,
    D,
}

impl Answer {
    pub const ALL: [Answer; 4] = [Answer::A, Answer::B, Answer::C, Answer::D];

    pub fn from_letter(letter: &str) -> Option<Answer> {
        match letter {
            "A" => Some(Answer::A),
            "B" => Some(Answer::B),
            "C" => Some(Answer::C),
            "D" => Some(Answer::D),
            _ => None,
        }
    }

    /// Position of this answer within a question's answer list.
    pub fn index(self) -> usize {
        match self {
            Answer::A => 0,
            Answer::B => 1,
            Answer::C => 2,
            Answer::D => 3,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Answer::A => "A",
            Answer::B => "B",
            Answer::C => "C",
            Answer::D => "D",
        };
        f.write_str(letter)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub subelement: String,
    pub group: String,
    pub num: String,
    pub qid: String,
    pub text: String,
    pub correct: Answer,
    #[serde(with = "blank_as_none", default)]
    pub figure: Option<String>,
    pub answers: [String; 4],
    pub fcc: String,
}

impl Question {
    /// The text of the answer designated correct. Always present, since
    /// there are exactly four answers and the letter indexes one of them.
    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct.index()]
    }
}

/// A cluster of questions within a subelement. The topics and subtopics are
/// derived from the description and kept in step with it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub subelement: String,
    pub group_id: String,
    description: String,
    topics: Vec<String>,
    subtopics: Vec<String>,
    pub questions: Vec<Question>,
}

impl Group {
    pub fn new(subelement: impl Into<String>, group_id: impl Into<String>, description: &str) -> Group {
        let (topics, subtopics) = split_topics(description);
        Group {
            subelement: subelement.into(),
            group_id: group_id.into(),
            description: description.to_string(),
            topics,
            subtopics,
            questions: Vec::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) {
        let (topics, subtopics) = split_topics(description);
        self.description = description.to_string();
        self.topics = topics;
        self.subtopics = subtopics;
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn subtopics(&self) -> &[String] {
        &self.subtopics
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subelement {
    pub elem: String,
    pub sub_el: String,
    pub description: String,
    /// Number of exam questions drawn from this subelement, as the document
    /// states it.
    pub numq: String,
    /// Number of groups, as the document states it.
    pub numg: String,
    pub groups: Vec<Group>,
}

/// The root of a parsed pool, one per license class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub filename: String,
    pub filetype: String,
    pub timestamp: String,
    pub elem: String,
    pub elname: String,
    pub yrvalid: Span,
    pub effective: Span,
    pub subelements: Vec<Subelement>,
}

impl Element {
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.subelements
            .iter()
            .flat_map(|subelement| subelement.groups.iter())
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.groups()
            .flat_map(|group| group.questions.iter())
    }
}

// The published JSON carries an empty string where a question has no figure.
pub(crate) mod blank_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(
            value
                .as_deref()
                .unwrap_or(""),
        )
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }
}

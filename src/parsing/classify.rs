//! Recognize the structural lines of a question pool document.
//!
//! Each line is offered to a fixed, ordered list of recognizers and the first
//! one to match decides what the line is. Order matters: the single line
//! element header also satisfies the narrower "name and years" recognizer,
//! so it has to be tried first.
//!
//! The element header is spread over several lines in most editions of the
//! pool, for example
//!
//! ```text
//! 2022-2026 Technician Class
//! FCC Element 2 Question Pool
//! Effective 7/01/2022 - 6/30/2026
//! ```
//!
//! so the header recognizers accumulate what they find into a [`Header`] and
//! report the line as [`Tag::Element`] once enough is known to construct the
//! Element.

use crate::language::{Answer, Span};

/// Element header fields gathered so far.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: Option<String>,
    pub years: Option<Span>,
    pub effective: Option<Span>,
    pub number: Option<String>,
}

impl Header {
    /// The Element can be constructed once its number and the date it takes
    /// effect are known. Name and years are carried if present.
    pub fn is_ready(&self) -> bool {
        self.number
            .is_some()
            && self
                .effective
                .is_some()
    }

    fn promote(&self) -> Tag {
        if self.is_ready() {
            Tag::Element
        } else {
            Tag::Header
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubelementHeading {
    pub code: String,
    pub description: String,
    pub numq: String,
    pub numg: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHeading {
    pub subelement: String,
    pub group_id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionHeading {
    pub subelement: String,
    pub group: String,
    pub num: String,
    pub correct: Answer,
    pub fcc: String,
}

impl QuestionHeading {
    pub fn qid(&self) -> String {
        format!("{}{}{}", self.subelement, self.group, self.num)
    }
}

/// What a line is, as far as the parser's state machine is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// Header complete; construct the Element.
    Element,
    /// Part of the element header, not yet complete.
    Header,
    Subelement(SubelementHeading),
    Group(GroupHeading),
    Question(QuestionHeading),
    /// A question withdrawn from the pool.
    Removed,
    End,
    /// The `~~` separator.
    Blank,
}

impl Tag {
    pub fn describe(&self) -> &'static str {
        match self {
            Tag::Element => "element header",
            Tag::Header => "element header data",
            Tag::Subelement(_) => "subelement",
            Tag::Group(_) => "group",
            Tag::Question(_) => "question",
            Tag::Removed => "removed question",
            Tag::End => "end",
            Tag::Blank => "~~",
        }
    }
}

/// The recognizers, named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recognizer {
    ElementCombined,
    ElementName,
    ElementEffective,
    ElementEffectiveShort,
    ElementNumber,
    Subelement,
    SubelementCompact,
    Group,
    Question,
    Removed,
    Deleted,
    End,
    Blank,
}

type Recognize = fn(&str, &mut Header) -> Option<Tag>;

/// Recognizers in the order they are tried.
pub const RECOGNIZERS: [(Recognizer, Recognize); 13] = [
    (Recognizer::ElementCombined, element_combined),
    (Recognizer::ElementName, element_name),
    (Recognizer::ElementEffective, element_effective),
    (Recognizer::ElementEffectiveShort, element_effective_short),
    (Recognizer::ElementNumber, element_number),
    (Recognizer::Subelement, subelement),
    (Recognizer::SubelementCompact, subelement_compact),
    (Recognizer::Group, group),
    (Recognizer::Question, question),
    (Recognizer::Removed, removed),
    (Recognizer::Deleted, deleted),
    (Recognizer::End, end),
    (Recognizer::Blank, blank),
];

/// Classify a line. An empty line is the end of the pool. Returns None if
/// nothing recognizes the line.
pub fn classify(line: &str, header: &mut Header) -> Option<(Recognizer, Tag)> {
    let line = line.trim();
    if line.is_empty() {
        return Some((Recognizer::End, Tag::End));
    }

    RECOGNIZERS
        .iter()
        .find_map(|(recognizer, recognize)| recognize(line, header).map(|tag| (*recognizer, tag)))
}

// Descriptions sometimes keep the separator before the bracketed counts.
fn clean(description: &str) -> String {
    description
        .trim()
        .trim_end_matches('-')
        .trim()
        .to_string()
}

fn element_combined(line: &str, header: &mut Header) -> Option<Tag> {
    let re = crate::regex!(
        r"(?:(?P<begin>\d{4})-(?P<end>\d{4})\s+)?(?P<name>[A-Za-z]+)\s+Class.*FCC Element\s+(?P<number>\d+)\s+Question Pool\s*-\s*Effective\s+(?P<effective>[A-Za-z]+\.?\s+\d+,\s*\d{4})"
    );
    let cap = re.captures(line)?;

    header.name = Some(cap["name"].to_string());
    if let (Some(begin), Some(end)) = (cap.name("begin"), cap.name("end")) {
        header.years = Some(Span::new(begin.as_str(), end.as_str()));
    }
    header.number = Some(cap["number"].to_string());
    header.effective = Some(Span::new(&cap["effective"], ""));

    Some(Tag::Element)
}

fn element_name(line: &str, header: &mut Header) -> Option<Tag> {
    let re = crate::regex!(r"(?P<begin>\d{4})-(?P<end>\d{4})\s+(?P<name>[A-Za-z]+)\s+Class");
    let cap = re.captures(line)?;

    header.name = Some(cap["name"].to_string());
    header.years = Some(Span::new(&cap["begin"], &cap["end"]));

    Some(header.promote())
}

fn element_effective(line: &str, header: &mut Header) -> Option<Tag> {
    let re = crate::regex!(r"Effective\s+(?P<begin>\d+/\d+/\d+)\D+(?P<end>\d+/\d+/\d+)");
    let cap = re.captures(line)?;

    header.effective = Some(Span::new(&cap["begin"], &cap["end"]));

    Some(header.promote())
}

fn element_effective_short(line: &str, header: &mut Header) -> Option<Tag> {
    let re = crate::regex!(r"Effective\s+(?P<begin>[JFMASOND][a-z]*\.?\s+\d+,\s*\d{4})");
    let cap = re.captures(line)?;

    header.effective = Some(Span::new(&cap["begin"], ""));

    Some(header.promote())
}

fn element_number(line: &str, header: &mut Header) -> Option<Tag> {
    let re = crate::regex!(r"FCC Element\s+(?P<number>\d+)\s+Question Pool\s*$");
    let cap = re.captures(line)?;

    header.number = Some(cap["number"].to_string());

    Some(header.promote())
}

fn subelement(line: &str, _: &mut Header) -> Option<Tag> {
    let re = crate::regex!(
        r"SUBELEMENT\s+(?P<code>[TGE]\d)\s*-?\s*(?P<description>.*?)\s*-?\s*\[(?P<numq>\d+)\s+[Ee]xam\s+[Qq]uestions?\D*?(?P<numg>\d+)\s+[Gg]roups?\]"
    );
    let cap = re.captures(line)?;

    Some(Tag::Subelement(SubelementHeading {
        code: cap["code"].to_string(),
        description: clean(&cap["description"]),
        numq: cap["numq"].to_string(),
        numg: cap["numg"].to_string(),
    }))
}

fn subelement_compact(line: &str, _: &mut Header) -> Option<Tag> {
    let re = crate::regex!(
        r"^(?P<code>[TGE]\d)\s+\S\s+(?P<description>.*?)(?:\s+-)?\s*\[(?P<numq>\d+)\s+[Ee]xam\s+[Qq]uestions?\D*?(?P<numg>\d+)\s+[Gg]roups?\]"
    );
    let cap = re.captures(line)?;

    Some(Tag::Subelement(SubelementHeading {
        code: cap["code"].to_string(),
        description: clean(&cap["description"]),
        numq: cap["numq"].to_string(),
        numg: cap["numg"].to_string(),
    }))
}

fn group(line: &str, _: &mut Header) -> Option<Tag> {
    let re = crate::regex!(r"^(?P<subelement>[TGE]\d)(?P<group>[A-H])\s+-?\s*(?P<description>.*)$");
    let cap = re.captures(line)?;

    Some(Tag::Group(GroupHeading {
        subelement: cap["subelement"].to_string(),
        group_id: cap["group"].to_string(),
        description: clean(&cap["description"]),
    }))
}

fn question(line: &str, _: &mut Header) -> Option<Tag> {
    let re = crate::regex!(
        r"^(?P<subelement>[TGE]\d)(?P<group>[A-H])(?P<num>\d{2})\s*\((?P<correct>[A-D])\)\s*(?P<fcc>.*)$"
    );
    let cap = re.captures(line)?;

    Some(Tag::Question(QuestionHeading {
        subelement: cap["subelement"].to_string(),
        group: cap["group"].to_string(),
        num: cap["num"].to_string(),
        correct: Answer::from_letter(&cap["correct"])?,
        fcc: cap["fcc"]
            .trim()
            .to_string(),
    }))
}

fn removed(line: &str, _: &mut Header) -> Option<Tag> {
    let re = crate::regex!(r"^[TGE]\d[A-H]\d{2}\s*(?i:question removed)");
    re.is_match(line)
        .then_some(Tag::Removed)
}

fn deleted(line: &str, _: &mut Header) -> Option<Tag> {
    let re = crate::regex!(r"^[TGE]\d[A-H]\d{2}\s*\(DELETED\)");
    re.is_match(line)
        .then_some(Tag::Removed)
}

fn end(line: &str, _: &mut Header) -> Option<Tag> {
    let re = crate::regex!(r"^~{4,}");
    re.is_match(line)
        .then_some(Tag::End)
}

fn blank(line: &str, _: &mut Header) -> Option<Tag> {
    (line == "~~").then_some(Tag::Blank)
}

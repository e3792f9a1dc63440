use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use super::classify::{classify, GroupHeading, Header, QuestionHeading, SubelementHeading, Tag};
use super::source::{Line, LineSource};
use super::{ParseOptions, Parsed, Summary};
use crate::language::{Element, Group, Question, Subelement};
use crate::problem::{Diagnostics, Problem};

/// Where the parser is in the document. Progress is forward only; the only
/// repeats are a group followed by a sibling group and a subelement
/// following the groups of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Initial,
    Element,
    Subelement,
    Group,
    End,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Initial => "initial",
            State::Element => "element",
            State::Subelement => "subelement",
            State::Group => "group",
            State::End => "end",
        };
        f.write_str(name)
    }
}

/// Parse a sequence of lines into an Element. Problems in the document are
/// reported as diagnostics; whatever was built before a structural error is
/// still returned.
pub fn parse_lines(lines: &[String], options: &ParseOptions) -> Parsed {
    let mut parser = Parser::new(lines, options);
    parser.run();
    parser.finish()
}

#[derive(Debug)]
struct Parser<'i> {
    source: LineSource<'i>,
    options: &'i ParseOptions,
    header: Header,
    state: State,
    element: Option<Element>,
    subelement: Option<Subelement>,
    group: Option<Group>,
    pending: Option<Line>,
    seen: HashSet<String>,
    problems: Diagnostics,
    summary: Option<Summary>,
}

impl<'i> Parser<'i> {
    fn new(lines: &'i [String], options: &'i ParseOptions) -> Parser<'i> {
        Parser {
            source: LineSource::new(lines),
            options,
            header: Header::default(),
            state: State::Initial,
            element: None,
            subelement: None,
            group: None,
            pending: None,
            seen: HashSet::new(),
            problems: Diagnostics::new(options.minimum),
            summary: None,
        }
    }

    fn finish(self) -> Parsed {
        Parsed {
            element: self.element,
            diagnostics: self.problems,
            summary: self.summary,
        }
    }

    fn run(&mut self) {
        while self.state != State::End {
            let line = self.read(true);
            let tag = classify(&line.text, &mut self.header).map(|(_, tag)| tag);

            if let Some(Tag::Removed | Tag::Blank) = tag {
                continue;
            }

            let before = self.state;
            self.dispatch(tag, &line);

            if before != self.state {
                self.problems
                    .report_at(
                        Problem::Transition,
                        format!("{}:{}", before, self.state),
                        line.number,
                        &line.text,
                    );
            }
        }
    }

    fn dispatch(&mut self, tag: Option<Tag>, line: &Line) {
        match (self.state, tag) {
            (State::Initial, Some(Tag::Element)) => self.open_element(),
            (State::Initial, Some(Tag::End)) => self.abandon(
                Problem::PrematureEnd,
                "Premature end before element header".to_string(),
                line,
            ),
            (State::Initial, Some(Tag::Header)) => {
                self.problems
                    .report_at(Problem::HeaderData, "Data line", line.number, &line.text)
            }
            (State::Initial, _) => self
                .problems
                .report_at(
                    Problem::LineBeforeElement,
                    "Line b4 Element",
                    line.number,
                    &line.text,
                ),

            (State::Element, Some(Tag::Subelement(heading))) => self.open_subelement(heading),
            (State::Group, Some(Tag::Subelement(heading))) => {
                self.close_group();
                self.close_subelement();
                self.open_subelement(heading);
            }

            (State::Subelement | State::Group, Some(Tag::Group(heading))) => {
                self.close_group();
                self.open_group(heading, line);
            }

            (State::Group, Some(Tag::Question(heading))) => self.read_question(heading, line),
            (State::Group, Some(Tag::End)) => self.close(),

            (state @ (State::Element | State::Subelement), Some(Tag::End)) => self.abandon(
                Problem::UnexpectedEnd,
                format!("Unexpected end in {} state", state),
                line,
            ),

            (State::End, _) => {}

            (state, tag) => {
                let what = tag
                    .as_ref()
                    .map_or("unrecognized line", Tag::describe);
                self.abandon(
                    Problem::UnexpectedLine,
                    format!("{} not valid in {} state", what, state),
                    line,
                );
            }
        }
    }

    /// Read the next line, first returning one that was put back.
    fn read(&mut self, skip_blank: bool) -> Line {
        if let Some(line) = self
            .pending
            .take()
        {
            return line;
        }

        let line = self
            .source
            .read_line(skip_blank);
        if !line
            .text
            .is_ascii()
        {
            self.problems
                .report_at(
                    Problem::NonAscii,
                    "Non-ASCII characters",
                    line.number,
                    &line.text,
                );
        }
        line
    }

    /// Read a line of question text or an answer, passing over any
    /// question marked as removed.
    fn read_content(&mut self) -> Line {
        loop {
            let line = self.read(true);
            match classify(&line.text, &mut Header::default()) {
                Some((_, Tag::Removed)) => continue,
                _ => return line,
            }
        }
    }

    fn open_element(&mut self) {
        let header = &self.header;
        let element = Element {
            filename: self
                .options
                .filename
                .clone(),
            filetype: self
                .options
                .filetype
                .clone(),
            timestamp: self
                .options
                .timestamp(),
            elem: header
                .number
                .clone()
                .unwrap_or_default(),
            elname: header
                .name
                .clone()
                .unwrap_or_default(),
            yrvalid: header
                .years
                .clone()
                .unwrap_or_default(),
            effective: header
                .effective
                .clone()
                .unwrap_or_default(),
            subelements: Vec::new(),
        };

        debug!("Element {} ({})", element.elem, element.elname);
        self.element = Some(element);
        self.state = State::Element;
    }

    fn open_subelement(&mut self, heading: SubelementHeading) {
        let elem = self
            .element
            .as_ref()
            .map(|element| {
                element
                    .elem
                    .clone()
            })
            .unwrap_or_default();

        self.subelement = Some(Subelement {
            elem,
            sub_el: heading.code,
            description: heading.description,
            numq: heading.numq,
            numg: heading.numg,
            groups: Vec::new(),
        });
        self.state = State::Subelement;
    }

    fn open_group(&mut self, heading: GroupHeading, line: &Line) {
        if let Some(subelement) = &self.subelement {
            if subelement.sub_el != heading.subelement {
                self.problems
                    .report_at(
                        Problem::Misplaced,
                        format!(
                            "Group {}{} inside subelement {}",
                            heading.subelement, heading.group_id, subelement.sub_el
                        ),
                        line.number,
                        &line.text,
                    );
            }
        }

        self.group = Some(Group::new(
            heading.subelement,
            heading.group_id,
            &heading.description,
        ));
        self.state = State::Group;
    }

    /// Assemble a question from the heading line just read and the five
    /// lines that follow it: the question text, four answers, and the `~~`
    /// terminator.
    fn read_question(&mut self, heading: QuestionHeading, line: &Line) {
        let qid = heading.qid();

        let text = self.read_content();
        let figure = find_figure(&text.text);

        let mut answers = [
            self.read_content()
                .text,
            self.read_content()
                .text,
            self.read_content()
                .text,
            self.read_content()
                .text,
        ];

        // Some editions lost the terminator line to a wrap, leaving the
        // "~~" at the end of answer D.
        if answers[3].len() > 2 && answers[3].ends_with("~~") {
            let answer = answers[3]
                .trim_end_matches('~')
                .trim_end()
                .to_string();
            answers[3] = answer;
            self.problems
                .report_at(
                    Problem::MissingTerminator,
                    format!("Question end ~~ run into answer D of {}", qid),
                    line.number,
                    &line.text,
                );
        } else {
            let terminator = self.read(false);
            if terminator.text != "~~" {
                self.problems
                    .report_at(
                        Problem::MissingTerminator,
                        format!("Missing question end ~~ after {}", qid),
                        terminator.number,
                        &terminator.text,
                    );
                // a header run straight on from answer D is read again by
                // the main loop; anything else is dropped
                if starts_entry(&terminator.text) {
                    self.pending = Some(terminator);
                }
            }
        }

        if !self
            .seen
            .insert(qid.clone())
        {
            self.problems
                .report_at(
                    Problem::DuplicateQuestion,
                    format!("Question {} appears more than once", qid),
                    line.number,
                    &line.text,
                );
        }

        let question = Question {
            subelement: heading.subelement,
            group: heading.group,
            num: heading.num,
            qid,
            text: text.text,
            correct: heading.correct,
            figure,
            answers,
            fcc: heading.fcc,
        };

        self.problems
            .report_at(
                Problem::QuestionRead,
                format!("Question {}", question.qid),
                line.number,
                &line.text,
            );

        if let Some(group) = self
            .group
            .as_mut()
        {
            if group.subelement != question.subelement || group.group_id != question.group {
                self.problems
                    .report_at(
                        Problem::Misplaced,
                        format!(
                            "Question {} inside group {}{}",
                            question.qid, group.subelement, group.group_id
                        ),
                        line.number,
                        &line.text,
                    );
            }
            group
                .questions
                .push(question);
        }
    }

    fn close_group(&mut self) {
        if let Some(group) = self
            .group
            .take()
        {
            if let Some(subelement) = self
                .subelement
                .as_mut()
            {
                subelement
                    .groups
                    .push(group);
            }
        }
    }

    fn close_subelement(&mut self) {
        if let Some(subelement) = self
            .subelement
            .take()
        {
            if let Ok(declared) = subelement
                .numg
                .parse::<usize>()
            {
                let actual = subelement
                    .groups
                    .len();
                if declared != actual {
                    self.problems
                        .report(
                            Problem::GroupCountMismatch,
                            format!(
                                "Subelement {} declares {} groups but {} were read",
                                subelement.sub_el, declared, actual
                            ),
                        );
                }
            }

            if let Some(element) = self
                .element
                .as_mut()
            {
                element
                    .subelements
                    .push(subelement);
            }
        }
    }

    /// Normal end of the pool.
    fn close(&mut self) {
        self.close_group();
        self.close_subelement();
        self.state = State::End;
        self.summarize();
    }

    /// Structural error: report it and keep what has been built so far.
    fn abandon(&mut self, problem: Problem, message: String, line: &Line) {
        self.problems
            .report_at(problem, message, line.number, &line.text);
        self.close_group();
        self.close_subelement();
        self.state = State::End;
        self.summarize();
    }

    fn summarize(&mut self) {
        if let Some(element) = &self.element {
            let summary = Summary::of(element);
            summary.emit(&mut self.problems);
            self.summary = Some(summary);
        }
    }
}

/// Whether a line begins a new question, group, or subelement, or ends the
/// pool.
fn starts_entry(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    matches!(
        classify(text, &mut Header::default()),
        Some((_, Tag::Question(_) | Tag::Group(_) | Tag::Subelement(_) | Tag::End))
    )
}

/// Find a reference like "Figure T-1" or "figure E5-2" in question text.
fn find_figure(text: &str) -> Option<String> {
    let re = crate::regex!(r"(?i)(?:^|[\s(])figure\s+(?P<figure>[TGE]\d?-\d+)");
    re.captures(text)
        .map(|cap| cap["figure"].to_string())
}

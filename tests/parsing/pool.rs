#[cfg(test)]
mod verify {
    use std::path::Path;

    use hampool::language::*;
    use hampool::parsing::{self, ParseOptions, Parsed};
    use hampool::problem::{Problem, Severity};

    fn options() -> ParseOptions {
        ParseOptions {
            filename: "pool.txt".to_string(),
            filetype: "ASCII text".to_string(),
            minimum: Severity::Debug,
            timestamp: Some("2023-06-29 10:00:00".to_string()),
        }
    }

    fn parse(text: &str) -> Parsed {
        let lines = parsing::lines(text.strip_prefix('\n').unwrap_or(text));
        parsing::parse(&lines, &options())
    }

    fn parse_file(filename: &str) -> Parsed {
        let content = parsing::load(Path::new(filename)).expect("Failed to load sample");
        parsing::parse(&parsing::lines(&content), &options())
    }

    const SCENARIO: &str = r#"
2022-2026 Technician Class
FCC Element 2 Question Pool
Effective 7/01/2022 - 6/30/2026
SUBELEMENT T1 - FCC Rules [6 Exam Questions - 6 Groups]
T1A - Purpose and permissible use
T1A01 (C) [97.1]
Which of the following is part of the Basis and Purpose of the Amateur Radio Service?
A. Providing personal radio communications for as many citizens as possible
B. Providing communications for international non-profit organizations
C. Advancing skills in the technical and communication phases of the radio art
D. All these choices are correct
~~
"#;

    #[test]
    fn end_to_end() {
        let parsed = parse(SCENARIO);
        assert_eq!(parsed.errors(), 0);

        let element = parsed
            .element
            .expect("Element");

        assert_eq!(element.elem, "2");
        assert_eq!(element.elname, "Technician");
        assert_eq!(element.yrvalid, Span::new("2022", "2026"));
        assert_eq!(element.effective, Span::new("7/01/2022", "6/30/2026"));
        assert_eq!(element.filename, "pool.txt");
        assert_eq!(element.timestamp, "2023-06-29 10:00:00");

        assert_eq!(element.subelements.len(), 1);
        let subelement = &element.subelements[0];
        assert_eq!(subelement.sub_el, "T1");
        assert_eq!(subelement.elem, "2");
        assert_eq!(subelement.description, "FCC Rules");
        assert_eq!(subelement.numq, "6");
        assert_eq!(subelement.numg, "6");

        assert_eq!(subelement.groups.len(), 1);
        let group = &subelement.groups[0];
        assert_eq!(group.subelement, "T1");
        assert_eq!(group.group_id, "A");
        assert_eq!(group.topics(), &["Purpose and permissible use".to_string()]);
        assert!(group
            .subtopics()
            .is_empty());

        assert_eq!(group.questions.len(), 1);
        let question = &group.questions[0];
        assert_eq!(question.qid, "T1A01");
        assert_eq!(question.correct, Answer::C);
        assert_eq!(question.fcc, "[97.1]");
        assert_eq!(question.figure, None);
        assert_eq!(
            question.correct_answer(),
            "C. Advancing skills in the technical and communication phases of the radio art"
        );
    }

    #[test]
    fn declared_group_count_checked() {
        let parsed = parse(SCENARIO);

        // six groups declared, one present
        assert!(parsed
            .diagnostics
            .has(Problem::GroupCountMismatch));
        assert_eq!(
            parsed
                .diagnostics
                .count(Severity::Warning),
            1
        );
    }

    #[test]
    fn summary_produced() {
        let parsed = parse(SCENARIO);
        let summary = parsed
            .summary
            .expect("Summary");

        assert_eq!(summary.element, "2");
        assert_eq!(summary.subelements, 1);
        assert_eq!(summary.groups, 1);
        assert_eq!(summary.questions, 1);
        assert_eq!(summary.topics, 1);
        assert_eq!(summary.subtopics, 0);

        assert!(parsed
            .diagnostics
            .has(Problem::SummaryElement));
        assert!(parsed
            .diagnostics
            .has(Problem::SummaryDone));
    }

    #[test]
    fn counts_round_trip() {
        let parsed = parse_file("tests/samples/technician.txt");
        assert_eq!(parsed.errors(), 0);
        assert!(!parsed
            .diagnostics
            .has(Problem::GroupCountMismatch));

        let element = parsed
            .element
            .expect("Element");

        let shape: Vec<(&str, Vec<(&str, usize)>)> = element
            .subelements
            .iter()
            .map(|subelement| {
                (
                    subelement.sub_el.as_str(),
                    subelement
                        .groups
                        .iter()
                        .map(|group| (group.group_id.as_str(), group.questions.len()))
                        .collect(),
                )
            })
            .collect();

        assert_eq!(
            shape,
            vec![("T1", vec![("A", 3), ("B", 2)]), ("T6", vec![("C", 2)])]
        );

        let figures: Vec<(&str, Option<&str>)> = element
            .questions()
            .filter(|question| question.figure.is_some())
            .map(|question| (question.qid.as_str(), question.figure.as_deref()))
            .collect();
        assert_eq!(figures, vec![("T6C02", Some("T-1"))]);
    }

    #[test]
    fn combined_header_and_compact_subelements() {
        let parsed = parse_file("tests/samples/general.txt");
        assert_eq!(parsed.errors(), 0);

        // curly quotes and dashes are rewritten, so nothing non-ASCII remains
        assert!(!parsed
            .diagnostics
            .has(Problem::NonAscii));

        let element = parsed
            .element
            .expect("Element");

        assert_eq!(element.elem, "3");
        assert_eq!(element.elname, "General");
        assert_eq!(element.yrvalid, Span::new("2023", "2027"));
        assert_eq!(element.effective, Span::new("July 1, 2023", ""));

        let codes: Vec<&str> = element
            .subelements
            .iter()
            .map(|subelement| subelement.sub_el.as_str())
            .collect();
        assert_eq!(codes, vec!["G1", "G7"]);
        assert_eq!(element.subelements[0].description, "COMMISSION'S RULES");
        assert_eq!(element.subelements[0].numq, "5");
        assert_eq!(element.subelements[0].numg, "2");

        let qids: Vec<&str> = element
            .questions()
            .map(|question| question.qid.as_str())
            .collect();
        assert_eq!(qids, vec!["G1A01", "G1A02", "G1B01", "G7A01", "G7A09"]);

        let question = element
            .questions()
            .last()
            .expect("Question");
        assert_eq!(question.figure.as_deref(), Some("G7-1"));
    }

    #[test]
    fn terminator_leniency() {
        let parsed = parse_file("tests/broken/missing-terminator.txt");

        assert_eq!(parsed.errors(), 1);
        assert!(parsed
            .diagnostics
            .has(Problem::MissingTerminator));

        let element = parsed
            .element
            .expect("Element");
        let qids: Vec<&str> = element
            .questions()
            .map(|question| question.qid.as_str())
            .collect();
        assert_eq!(qids, vec!["T1A01", "T1A02"]);
        assert_eq!(
            element.subelements[0].groups[0].questions[0].answers[3],
            "D. All these choices are correct"
        );
    }

    #[test]
    fn removed_questions_invisible() {
        let plain = parse(SCENARIO);

        let noisy = parse(
            r#"
T1A05 Question Removed
2022-2026 Technician Class
T1A06 (DELETED)
FCC Element 2 Question Pool
Effective 7/01/2022 - 6/30/2026
T1A07 question removed
SUBELEMENT T1 - FCC Rules [6 Exam Questions - 6 Groups]
T1A08 (DELETED)
T1A - Purpose and permissible use
T1A09 Question Removed
T1A01 (C) [97.1]
T1A11 Question Removed
Which of the following is part of the Basis and Purpose of the Amateur Radio Service?
A. Providing personal radio communications for as many citizens as possible
T1A12 (DELETED)
B. Providing communications for international non-profit organizations
C. Advancing skills in the technical and communication phases of the radio art
T1A13 Question Removed
D. All these choices are correct
~~
T1A10 (DELETED)
"#,
        );

        assert_eq!(noisy.errors(), 0);
        assert_eq!(noisy.element, plain.element);

        let transitions = |parsed: &Parsed| -> Vec<String> {
            parsed
                .diagnostics
                .iter()
                .filter(|diagnostic| diagnostic.problem == Problem::Transition)
                .map(|diagnostic| {
                    diagnostic
                        .message
                        .clone()
                })
                .collect()
        };
        assert_eq!(transitions(&noisy), transitions(&plain));
    }

    #[test]
    fn duplicate_qid_warned() {
        let parsed = parse(
            r#"
2022-2026 Technician Class
FCC Element 2 Question Pool
Effective 7/01/2022 - 6/30/2026
SUBELEMENT T1 - FCC Rules [6 Exam Questions - 1 Groups]
T1A - Purpose and permissible use
T1A01 (C) [97.1]
What is the first question?
A. one
B. two
C. three
D. four
~~
T1A01 (B) [97.1]
What is the first question again?
A. one
B. two
C. three
D. four
~~
"#,
        );

        assert_eq!(parsed.errors(), 0);
        let warning = parsed
            .diagnostics
            .iter()
            .find(|diagnostic| diagnostic.problem == Problem::DuplicateQuestion)
            .expect("W003");
        assert_eq!(warning.message, "Question T1A01 appears more than once");
        assert_eq!(warning.severity(), Severity::Warning);

        // both are kept in the graph
        let element = parsed
            .element
            .expect("Element");
        assert_eq!(
            element
                .questions()
                .count(),
            2
        );
    }

    #[test]
    fn misplaced_entries_warned() {
        let parsed = parse(
            r#"
2022-2026 Technician Class
FCC Element 2 Question Pool
Effective 7/01/2022 - 6/30/2026
SUBELEMENT T1 - FCC Rules [6 Exam Questions - 2 Groups]
T1A - Purpose and permissible use
T1B01 (C) [97.301]
What is the ITU?
A. one
B. two
C. three
D. four
~~
T2B - VHF/UHF operating practices
"#,
        );

        assert_eq!(parsed.errors(), 0);

        let messages: Vec<&str> = parsed
            .diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.problem == Problem::Misplaced)
            .map(|diagnostic| diagnostic.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec!["Question T1B01 inside group T1A", "Group T2B inside subelement T1"]
        );

        // kept where they were found
        let element = parsed
            .element
            .expect("Element");
        let groups: Vec<(&str, usize)> = element.subelements[0]
            .groups
            .iter()
            .map(|group| (group.group_id.as_str(), group.questions.len()))
            .collect();
        assert_eq!(groups, vec![("A", 1), ("B", 0)]);
        assert_eq!(element.subelements[0].groups[1].subelement, "T2");
    }

    #[test]
    fn header_after_answer_read_again() {
        let parsed = parse(
            r#"
2022-2026 Technician Class
FCC Element 2 Question Pool
Effective 7/01/2022 - 6/30/2026
SUBELEMENT E8 - SIGNALS AND EMISSIONS [4 Exam Questions - 1 Groups]
E8C - Digital signals
E8C10 (C)
How can the spectral width of a digital signal be reduced?
A. Increase the symbol rate
B. Decrease the modulation index
C. Use a lower symbol rate
D. None of the above
E8C11 (A)
What is the relationship between symbol rate and baud?
A. They are the same
B. Baud is twice the symbol rate
C. Symbol rate is only used for packet-based modes
D. Baud is only used for RTTY
~~
"#,
        );

        assert_eq!(parsed.errors(), 1);
        let error = parsed
            .diagnostics
            .iter()
            .find(|diagnostic| diagnostic.problem == Problem::MissingTerminator)
            .expect("E005");
        assert_eq!(error.excerpt.as_deref(), Some("E8C11 (A)"));

        let element = parsed
            .element
            .expect("Element");
        let questions: Vec<(&str, Answer)> = element
            .questions()
            .map(|question| (question.qid.as_str(), question.correct))
            .collect();
        assert_eq!(questions, vec![("E8C10", Answer::C), ("E8C11", Answer::A)]);
    }

    #[test]
    fn premature_end() {
        let parsed = parse_file("tests/broken/preamble-only.txt");

        assert!(parsed
            .element
            .is_none());
        assert!(parsed
            .summary
            .is_none());
        assert!(parsed
            .diagnostics
            .has(Problem::LineBeforeElement));
        assert!(parsed
            .diagnostics
            .has(Problem::PrematureEnd));
        assert_eq!(parsed.errors(), 1);
    }

    #[test]
    fn unexpected_line_keeps_element() {
        let parsed = parse_file("tests/broken/group-before-subelement.txt");

        assert!(parsed
            .diagnostics
            .has(Problem::UnexpectedLine));
        assert_eq!(parsed.errors(), 1);

        let element = parsed
            .element
            .expect("Element");
        assert_eq!(element.elem, "2");
        assert!(element
            .subelements
            .is_empty());
    }

    #[test]
    fn unexpected_end_keeps_subelement() {
        let parsed = parse_file("tests/broken/truncated.txt");

        assert!(parsed
            .diagnostics
            .has(Problem::UnexpectedEnd));
        assert_eq!(parsed.errors(), 1);

        let element = parsed
            .element
            .expect("Element");
        assert_eq!(element.subelements.len(), 1);
        assert_eq!(element.subelements[0].sub_el, "T1");
        assert!(element.subelements[0]
            .groups
            .is_empty());
    }

    #[test]
    fn serialized_shape() {
        let parsed = parse_file("tests/samples/technician.txt");
        let element = parsed
            .element
            .expect("Element");

        let value = serde_json::to_value(&element).expect("JSON");

        assert_eq!(value["elem"], "2");
        assert_eq!(value["yrvalid"]["begin"], "2022");
        assert_eq!(value["effective"]["end"], "6/30/2026");

        let group = &value["subelements"][0]["groups"][1];
        assert_eq!(group["subelement"], "T1");
        assert_eq!(group["group_id"], "B");
        assert_eq!(group["topics"][1], "Secondary");
        assert_eq!(group["subtopics"][1], "Secondary: 60 meters");

        let question = &group["questions"][1];
        assert_eq!(question["qid"], "T1B02");
        assert_eq!(question["correct"], "B");
        assert_eq!(question["figure"], "");
        assert_eq!(question["fcc"], "[97.301, 97.207(c)]");
        assert_eq!(
            question["answers"][2],
            "C. Only the astronaut's family members who are hams"
        );
        assert_eq!(
            question["answers"]
                .as_array()
                .map(|answers| answers.len()),
            Some(4)
        );

        let back: Element = serde_json::from_value(value).expect("Element");
        assert_eq!(back, element);
    }
}

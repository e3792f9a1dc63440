#[cfg(test)]
mod verify {
    use std::path::Path;

    use hampool::language::Element;
    use hampool::lookup::{self, LookupOptions, LookupResult, QuestionPool};
    use hampool::output;
    use hampool::parsing::{self, ParseOptions};

    fn technician() -> Element {
        let content = parsing::load(Path::new("tests/samples/technician.txt")).expect("Failed to load sample");
        let options = ParseOptions {
            filename: "technician.txt".to_string(),
            timestamp: Some("2023-06-29 10:00:00".to_string()),
            ..ParseOptions::default()
        };
        parsing::parse(&parsing::lines(&content), &options)
            .element
            .expect("Element")
    }

    #[test]
    fn prefixes_retained() {
        let element = technician();
        let pool = QuestionPool::new(&element);

        let results = pool.questions_by_ids(&["T1A01"], &LookupOptions::default());
        assert_eq!(results.len(), 1);

        let found = results[0]
            .found()
            .expect("T1A01");
        assert_eq!(
            found.question,
            "#T1A01 Which of the following is part of the Basis and Purpose of the Amateur Radio Service?"
        );
        assert_eq!(found.answers[0], "A. Providing personal radio communications for as many citizens as possible");
        assert_eq!(
            found.correct_answer,
            "C. Advancing skills in the technical and communication phases of the radio art"
        );
        assert_eq!(found.topics[0], "Purpose and permissible use of the Amateur Radio Service");
    }

    #[test]
    fn prefixes_stripped() {
        let element = technician();
        let pool = QuestionPool::new(&element);
        let options = LookupOptions {
            strip_answer_prefix: true,
        };

        let results = pool.questions_by_ids(&["T1A01", "T6C02"], &options);

        let found = results[0]
            .found()
            .expect("T1A01");
        assert_eq!(found.answers[0], "Providing personal radio communications for as many citizens as possible");
        assert_eq!(found.answers[3], "All these choices are correct");
        assert_eq!(
            found.correct_answer,
            "Advancing skills in the technical and communication phases of the radio art"
        );

        let found = results[1]
            .found()
            .expect("T6C02");
        assert_eq!(found.figure.as_deref(), Some("T-1"));
        assert_eq!(found.answers, vec!["Resistor", "Transistor", "Battery", "Connector"]);
        assert_eq!(found.correct_answer, "Resistor");
        assert_eq!(found.topics, vec!["Circuit diagrams", "Schematic symbols"]);
    }

    #[test]
    fn removed_question_not_found() {
        let element = technician();
        let pool = QuestionPool::new(&element);

        let results = pool.questions_by_ids(&["T1A03"], &LookupOptions::default());
        assert!(matches!(&results[0], LookupResult::Missing { qid, .. } if qid == "T1A03"));
    }

    #[test]
    fn from_written_json() {
        let element = technician();
        let directory = std::env::temp_dir().join(format!("hampool-lookup-{}", std::process::id()));

        let target = output::write_json(&element, &directory).expect("Failed to write JSON");
        assert!(target.ends_with("element2.json"));

        let loaded = lookup::read_element(&target).expect("Failed to read JSON");
        assert_eq!(loaded, element);

        let pool = QuestionPool::new(&loaded);
        assert_eq!(pool.len(), 7);

        let results = pool.questions_by_ids(&["T1B02"], &LookupOptions::default());
        let value = serde_json::to_value(&results).expect("JSON");
        assert_eq!(value[0]["qid"], "T1B02");
        assert_eq!(value[0]["figure"], "");
        assert_eq!(value[0]["correct answer"], "B. Any amateur holding a Technician class or higher license");

        std::fs::remove_dir_all(&directory).expect("Failed to clean up");
    }

    #[test]
    fn unreadable_json() {
        let result = lookup::read_element(Path::new("tests/samples/technician.txt"));
        assert!(matches!(result, Err(lookup::LookupError::Invalid(_))));

        let result = lookup::read_element(Path::new("tests/samples/missing.json"));
        assert!(matches!(result, Err(lookup::LookupError::Reading { .. })));
    }
}

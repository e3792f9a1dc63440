#[cfg(test)]
mod samples {
    use std::fs;
    use std::path::{Path, PathBuf};

    use hampool::parsing::{self, ParseOptions, Parsed};
    use hampool::problem::format_diagnostic;

    fn pool_files(dir: &Path) -> Vec<PathBuf> {
        assert!(dir.exists(), "{} directory missing", dir.display());

        let entries = fs::read_dir(dir).expect("Failed to read directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("txt")
            {
                files.push(path);
            }
        }

        assert!(!files.is_empty(), "No .txt files found in {}", dir.display());
        files
    }

    fn parse_file(file: &Path) -> Parsed {
        let content = parsing::load(file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

        let options = ParseOptions {
            filename: file
                .display()
                .to_string(),
            filetype: parsing::file_type(&content).to_string(),
            ..ParseOptions::default()
        };

        parsing::parse(&parsing::lines(&content), &options)
    }

    #[test]
    fn ensure_samples_parse() {
        let files = pool_files(Path::new("tests/samples/"));

        let mut failures = Vec::new();

        for file in &files {
            let parsed = parse_file(file);

            if parsed.errors() > 0 || parsed.element.is_none() {
                println!("File {:?} failed to parse:", file);
                for diagnostic in parsed
                    .diagnostics
                    .iter()
                {
                    println!("{}", format_diagnostic(diagnostic));
                }
                failures.push(file.clone());
            }
        }

        if !failures.is_empty() {
            panic!(
                "Sample files should parse without errors, but {} files failed",
                failures.len()
            );
        }
    }

    #[test]
    fn ensure_broken_fail() {
        let files = pool_files(Path::new("tests/broken/"));

        let mut unexpected_successes = Vec::new();

        for file in &files {
            let parsed = parse_file(file);

            if parsed.errors() == 0 {
                println!("File {:?} unexpectedly parsed without errors", file);
                unexpected_successes.push(file.clone());
            }
        }

        if !unexpected_successes.is_empty() {
            panic!(
                "Broken files should report errors, but {} files did not",
                unexpected_successes.len()
            );
        }
    }

    #[test]
    fn samples_have_unique_qids() {
        for file in pool_files(Path::new("tests/samples/")) {
            let parsed = parse_file(&file);
            let element = parsed
                .element
                .expect("Element");

            let mut qids: Vec<&str> = element
                .questions()
                .map(|question| question.qid.as_str())
                .collect();
            let total = qids.len();
            qids.sort();
            qids.dedup();

            assert_eq!(qids.len(), total, "duplicate qid in {:?}", file);
        }
    }

    #[test]
    fn samples_have_four_answers() {
        for file in pool_files(Path::new("tests/samples/")) {
            let parsed = parse_file(&file);
            let element = parsed
                .element
                .expect("Element");

            for question in element.questions() {
                assert_eq!(question.answers.len(), 4);
                let correct = question.correct_answer();
                assert!(
                    question
                        .answers
                        .iter()
                        .any(|answer| answer == correct),
                    "{} has no correct answer",
                    question.qid
                );
                assert!(correct.starts_with(&format!("{}.", question.correct)));
            }
        }
    }
}

//! Line-at-a-time access to a pool document, with the typographic
//! punctuation that word processors introduce rewritten to plain ASCII.

/// A normalized line together with its 1-based position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub number: usize,
}

impl Line {
    /// The empty line handed out once the input is exhausted.
    fn end(number: usize) -> Line {
        Line {
            text: String::new(),
            number,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text
            .is_empty()
    }
}

/// What the underlying sequence produced at a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Raw<'i> {
    Text(&'i str),
    /// Produced exactly once, immediately after the last line.
    End,
}

#[derive(Debug, Clone)]
pub struct LineSource<'i> {
    lines: &'i [String],
    index: usize,
}

impl<'i> LineSource<'i> {
    pub fn new(lines: &'i [String]) -> LineSource<'i> {
        LineSource { lines, index: 0 }
    }

    /// Start again from the first line.
    pub fn restart(&mut self) {
        self.index = 0;
    }

    pub fn len(&self) -> usize {
        self.lines
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines
            .is_empty()
    }

    /// Read the next line, normalized. When `skip_blank` is set, lines that
    /// are empty after trimming are passed over. Running out of input is
    /// reported as an empty line rather than as an absence, so callers can
    /// treat it the same as an explicit end of pool.
    pub fn read_line(&mut self, skip_blank: bool) -> Line {
        loop {
            match self.next() {
                Some((Raw::Text(text), number)) => {
                    let text = normalize(text);
                    if skip_blank && text.is_empty() {
                        continue;
                    }
                    return Line { text, number };
                }
                Some((Raw::End, number)) => return Line::end(number),
                None => return Line::end(self.len() + 1),
            }
        }
    }
}

impl<'i> Iterator for LineSource<'i> {
    type Item = (Raw<'i>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let number = self.index + 1;
        let raw = match self
            .lines
            .get(self.index)
        {
            Some(line) => Raw::Text(line.as_str()),
            None if self.index == self.lines.len() => Raw::End,
            None => return None,
        };
        self.index += 1;
        Some((raw, number))
    }
}

/// Trim a line and replace curly quotes, en-dashes, and the Symbol font
/// multiplication sign with their ASCII equivalents.
pub fn normalize(line: &str) -> String {
    line.trim()
        .chars()
        .map(|c| match c {
            '\u{2013}' => '-',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            '\u{f0b4}' => 'x',
            other => other,
        })
        .collect()
}

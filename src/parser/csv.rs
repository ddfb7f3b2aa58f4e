//! Minimal RFC 4180 record reader.
//!
//! Handles quoted fields with embedded commas, doubled quotes and line
//! breaks, CRLF line endings and a leading byte-order mark. Blank lines are
//! skipped.

use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvError {
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    #[error("unexpected character {found:?} after closing quote on line {line}")]
    TrailingAfterQuote { line: usize, found: char },
}

/// One parsed record and the line it started on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    pub line: usize,
    pub fields: Vec<String>,
}

impl CsvRecord {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

pub struct CsvReader<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> CsvReader<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn read_record(&mut self) -> Option<Result<CsvRecord, CsvError>> {
        loop {
            // Skip blank lines between records.
            match self.chars.peek() {
                None => return None,
                Some('\n') => {
                    self.chars.next();
                    self.line += 1;
                }
                Some('\r') => {
                    self.chars.next();
                }
                Some(_) => break,
            }
        }

        let start_line = self.line;
        let mut fields = Vec::new();
        let mut field = String::new();

        loop {
            match self.chars.next() {
                None => {
                    fields.push(field);
                    break;
                }
                Some('"') if field.is_empty() => {
                    if let Err(e) = self.read_quoted(&mut field) {
                        return Some(Err(e));
                    }
                    match self.chars.peek() {
                        None | Some(',' | '\n' | '\r') => {}
                        Some(&found) => {
                            return Some(Err(CsvError::TrailingAfterQuote {
                                line: self.line,
                                found,
                            }));
                        }
                    }
                }
                Some(',') => fields.push(std::mem::take(&mut field)),
                Some('\r') => {}
                Some('\n') => {
                    self.line += 1;
                    fields.push(field);
                    break;
                }
                Some(c) => field.push(c),
            }
        }

        Some(Ok(CsvRecord {
            line: start_line,
            fields,
        }))
    }

    fn read_quoted(&mut self, field: &mut String) -> Result<(), CsvError> {
        let opened_on = self.line;
        loop {
            match self.chars.next() {
                None => return Err(CsvError::UnterminatedQuote { line: opened_on }),
                Some('"') => {
                    if self.chars.peek() == Some(&'"') {
                        self.chars.next();
                        field.push('"');
                    } else {
                        return Ok(());
                    }
                }
                Some('\n') => {
                    self.line += 1;
                    field.push('\n');
                }
                Some(c) => field.push(c),
            }
        }
    }
}

impl Iterator for CsvReader<'_> {
    type Item = Result<CsvRecord, CsvError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Vec<String>> {
        CsvReader::new(input)
            .map(|r| r.unwrap().fields)
            .collect()
    }

    #[test]
    fn test_plain_records() {
        assert_eq!(
            parse("a,b,c\n1,2,3\n"),
            vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]
        );
    }

    #[test]
    fn test_quoted_fields() {
        let rows = parse("s1,\"United States, India\",\"He said \"\"hi\"\"\"\r\n");
        assert_eq!(rows, vec![vec!["s1", "United States, India", "He said \"hi\""]]);
    }

    #[test]
    fn test_newline_inside_quotes_keeps_line_numbers() {
        let records: Vec<CsvRecord> = CsvReader::new("h1,h2\n\"multi\nline\",x\nlast,y")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].fields, vec!["multi\nline", "x"]);
        assert_eq!(records[1].line, 2);
        assert_eq!(records[2].line, 4);
    }

    #[test]
    fn test_empty_fields_and_blank_lines() {
        assert_eq!(parse("a,,c\n\n,\n"), vec![vec!["a", "", "c"], vec!["", ""]]);
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        assert_eq!(parse("\u{feff}show_id,type\n"), vec![vec!["show_id", "type"]]);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = CsvReader::new("ok\n\"broken,field\n")
            .find_map(Result::err)
            .unwrap();
        assert_eq!(err, CsvError::UnterminatedQuote { line: 2 });
    }
}

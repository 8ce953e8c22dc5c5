//! Question file loaders.
//!
//! Each format implements [`QuestionReader::parse`]; the shared
//! [`QuestionReader::read_file`] handles opening the file and the
//! empty-result check. [`load_board`] picks a reader by file extension.
//!
//! Rows that cannot be turned into a question are skipped with a warning.
//! Only an unreadable file or an unparseable document is an error.
//!
//! Point values must be whole numbers between 1 and [`MAX_POINTS`].

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::board::{Board, Question};
use crate::error::LoadError;

/// Number of columns a CSV row needs: category, value, prompt, four
/// options, correct key.
pub const CSV_COLUMNS: usize = 8;

/// Largest point value a question file may carry.
pub const MAX_POINTS: i64 = i32::MAX as i64;

fn points(value: i64) -> Option<i64> {
    (1..=MAX_POINTS).contains(&value).then_some(value)
}

fn parse_points(text: &str) -> Option<i64> {
    text.trim().parse().ok().and_then(points)
}

/// A question file format.
pub trait QuestionReader {
    /// Parse every usable question out of `reader`.
    fn parse(&self, reader: &mut dyn Read) -> Result<Vec<Question>, LoadError>;

    /// Open `path` and parse it. Fails if no question survives.
    fn read_file(&self, path: &Path) -> Result<Vec<Question>, LoadError> {
        let mut file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let questions = self.parse(&mut file)?;
        if questions.is_empty() {
            return Err(LoadError::Empty(path.to_path_buf()));
        }
        Ok(questions)
    }
}

/// Load a question file into an indexed board.
///
/// `.json`, `.csv` and `.xml` are supported, matched case-insensitively.
pub fn load_board(path: impl AsRef<Path>) -> Result<Board, LoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let questions = match extension.as_str() {
        "json" => JsonReader.read_file(path)?,
        "csv" => CsvReader.read_file(path)?,
        "xml" => XmlReader.read_file(path)?,
        _ => return Err(LoadError::UnsupportedFormat(path.display().to_string())),
    };

    let mut board: Board = questions.into_iter().collect();
    board.rebuild_index()?;
    info!(path = %path.display(), questions = board.len(), "question file loaded");
    Ok(board)
}

// ============================================================================
// JSON
// ============================================================================

/// Reads a JSON array of question objects:
///
/// ```json
/// [{"Category": "Arrays", "Value": 100, "Question": "First index?",
///   "Options": {"A": "0", "B": "1", "C": "-1", "D": "None"},
///   "CorrectAnswer": "A"}]
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonReader;

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawQuestion {
    category: String,
    value: RawValue,
    question: String,
    options: BTreeMap<String, String>,
    correct_answer: String,
}

/// Point values sometimes arrive quoted.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(i64),
    Text(String),
}

impl RawValue {
    fn to_points(&self) -> Option<i64> {
        match self {
            RawValue::Number(n) => points(*n),
            RawValue::Text(s) => parse_points(s),
        }
    }
}

impl QuestionReader for JsonReader {
    fn parse(&self, reader: &mut dyn Read) -> Result<Vec<Question>, LoadError> {
        let items: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
        let mut questions = Vec::with_capacity(items.len());

        for (i, item) in items.into_iter().enumerate() {
            let raw = match serde_json::from_value::<RawQuestion>(item) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(entry = i, error = %err, "skipping malformed JSON question");
                    continue;
                }
            };
            let Some(value) = raw.value.to_points() else {
                warn!(entry = i, "skipping JSON question with invalid value");
                continue;
            };
            questions.push(Question::new(
                raw.category,
                value,
                raw.question,
                raw.options,
                raw.correct_answer,
            ));
        }

        Ok(questions)
    }
}

// ============================================================================
// CSV
// ============================================================================

/// Reads CSV with a header row and the columns
/// `Category,Value,Question,OptionA,OptionB,OptionC,OptionD,CorrectAnswer`.
/// Options are keyed `A` through `D`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CsvReader;

const OPTION_KEYS: [&str; 4] = ["A", "B", "C", "D"];

impl QuestionReader for CsvReader {
    fn parse(&self, reader: &mut dyn Read) -> Result<Vec<Question>, LoadError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        csv.headers()?;

        let mut questions = Vec::new();
        for (i, record) in csv.records().enumerate() {
            // Header is line 1.
            let line = i + 2;
            let record = match record {
                Ok(record) => record,
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => {
                    warn!(line, error = %err, "skipping unreadable CSV row");
                    continue;
                }
            };
            if record.len() < CSV_COLUMNS {
                warn!(line, columns = record.len(), "skipping CSV row with too few columns");
                continue;
            }
            let Some(value) = parse_points(&record[1]) else {
                warn!(line, value = &record[1], "skipping CSV row with invalid value");
                continue;
            };

            let options = OPTION_KEYS
                .iter()
                .zip(3..7)
                .map(|(key, column)| (*key, &record[column]));
            questions.push(Question::new(&record[0], value, &record[2], options, &record[7]));
        }

        Ok(questions)
    }
}

// ============================================================================
// XML
// ============================================================================

/// Reads `QuestionItem` elements from any root element:
///
/// ```xml
/// <Questions>
///   <QuestionItem>
///     <Category>Arrays</Category>
///     <Value>100</Value>
///     <QuestionText>First index?</QuestionText>
///     <Options>
///       <OptionA>0</OptionA><OptionB>1</OptionB>
///       <OptionC>-1</OptionC><OptionD>None</OptionD>
///     </Options>
///     <CorrectAnswer>A</CorrectAnswer>
///   </QuestionItem>
/// </Questions>
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlReader;

#[derive(Deserialize)]
struct RawXmlDocument {
    #[serde(rename = "QuestionItem", default)]
    items: Vec<RawXmlItem>,
}

/// All fields optional; `into_question` does the validation.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawXmlItem {
    category: Option<String>,
    value: Option<String>,
    question_text: Option<String>,
    options: Option<RawXmlOptions>,
    correct_answer: Option<String>,
}

#[derive(Deserialize)]
struct RawXmlOptions {
    #[serde(rename = "OptionA")]
    a: Option<String>,
    #[serde(rename = "OptionB")]
    b: Option<String>,
    #[serde(rename = "OptionC")]
    c: Option<String>,
    #[serde(rename = "OptionD")]
    d: Option<String>,
}

impl RawXmlOptions {
    fn into_pairs(self) -> Vec<(&'static str, String)> {
        OPTION_KEYS
            .into_iter()
            .zip([self.a, self.b, self.c, self.d])
            .filter_map(|(key, text)| Some((key, text?.trim().to_string())))
            .collect()
    }
}

impl RawXmlItem {
    fn into_question(self) -> Result<Question, &'static str> {
        let text = |field: Option<String>, name: &'static str| {
            field
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .ok_or(name)
        };
        let category = text(self.category, "Category")?;
        let value = self.value.as_deref().and_then(parse_points).ok_or("Value")?;
        let prompt = text(self.question_text, "QuestionText")?;
        let correct = text(self.correct_answer, "CorrectAnswer")?;
        let options = self.options.map(RawXmlOptions::into_pairs).unwrap_or_default();
        if options.is_empty() {
            return Err("Options");
        }
        Ok(Question::new(category, value, prompt, options, correct))
    }
}

impl QuestionReader for XmlReader {
    fn parse(&self, reader: &mut dyn Read) -> Result<Vec<Question>, LoadError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let document: RawXmlDocument = quick_xml::de::from_str(&text)?;

        let mut questions = Vec::with_capacity(document.items.len());
        for (i, item) in document.items.into_iter().enumerate() {
            match item.into_question() {
                Ok(question) => questions.push(question),
                Err(field) => warn!(entry = i, field, "skipping XML question with missing or invalid field"),
            }
        }
        Ok(questions)
    }
}

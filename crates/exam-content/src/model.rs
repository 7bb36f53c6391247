//! Section, chapter and question types
//!
//! Field names follow the JSON files consumed by the exam web application.
//! Unknown fields are kept in `extra` maps so rewriting a file never drops
//! hand-added data.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// A subject or course grouping chapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    /// Directory holding the section's chapters, relative to the content root
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub description: String,
}

impl Section {
    /// Directory relative to the content root; an empty `path` falls back to
    /// `{prefix}{id}`
    pub fn relative_dir(&self, prefix: &str) -> String {
        let path = self.path.trim().trim_end_matches('/');
        if path.is_empty() {
            format!("{}{}", prefix, self.id)
        } else {
            path.to_string()
        }
    }
}

/// Index entry for one chapter file, as stored in the order file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChapterSummary {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Question count; absent is distinct from zero
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_count")]
    pub q: Option<u64>,
    /// Filename relative to the section directory
    #[serde(default, deserialize_with = "lenient_string")]
    pub file: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChapterSummary {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        q: u64,
        file: impl Into<String>,
    ) -> Self {
        Self { id: id.into(), name: name.into(), q: Some(q), file: file.into(), extra: Map::new() }
    }

    /// Stored count is missing or zero and may be backfilled from the document
    pub fn needs_count(&self) -> bool {
        matches!(self.q, None | Some(0))
    }
}

/// Chapter content file, in its canonical object shape
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChapterDocument {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_title")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ChapterParams>,
    /// Raw question objects; counting never depends on their shape
    #[serde(default)]
    pub questions: Vec<Value>,
    #[serde(
        rename = "totalQuestions",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_count"
    )]
    pub total_questions: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChapterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// On-disk shapes of a chapter document: a bare object or a sequence wrapping it
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawChapterDocument {
    Single(ChapterDocument),
    Wrapped(Vec<ChapterDocument>),
}

impl RawChapterDocument {
    /// Canonical object: a wrapped sequence yields its first element, an empty
    /// sequence an empty document
    pub fn normalize(self) -> ChapterDocument {
        match self {
            RawChapterDocument::Single(doc) => doc,
            RawChapterDocument::Wrapped(docs) => docs.into_iter().next().unwrap_or_default(),
        }
    }
}

impl ChapterDocument {
    /// Parse either on-disk shape and normalize it
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("Invalid JSON")?;
        let raw = RawChapterDocument::deserialize(value)
            .context("Expected a chapter object or a list wrapping one")?;
        Ok(raw.normalize())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Write the canonical object shape
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        crate::fsutil::write_json_pretty(path, self)
    }

    /// Question count: `questions` when non-empty, else `totalQuestions`
    pub fn question_count(&self) -> Option<u64> {
        if !self.questions.is_empty() {
            return Some(self.questions.len() as u64);
        }
        self.total_questions
    }

    /// `params.chapter`, stringified
    pub fn chapter_param(&self) -> Option<String> {
        match self.params.as_ref()?.chapter.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Title when present and not blank
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Questions decoded into [`Question`], each with its own decode error
    pub fn typed_questions(&self) -> Vec<Result<Question, String>> {
        self.questions
            .iter()
            .map(|raw| Question::deserialize(raw).map_err(|e| e.to_string()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Radio,
    Checkbox,
}

/// Correct answer: a single string or a list of choice values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    One(String),
    Many(Vec<String>),
}

impl Default for CorrectAnswer {
    fn default() -> Self {
        CorrectAnswer::One(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_title")]
    pub image: Option<String>,
    #[serde(default)]
    pub input_type: InputType,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub correct_answer: CorrectAnswer,
    #[serde(default, deserialize_with = "lenient_string")]
    pub explanation: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default, alias = "label", deserialize_with = "lenient_string")]
    pub value: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Question {
    /// Correct choice values. A checkbox answer string is a set of one-letter
    /// labels (`"AC"`); a radio answer string is a single value.
    pub fn answer_set(&self) -> BTreeSet<String> {
        match (&self.correct_answer, self.input_type) {
            (CorrectAnswer::Many(values), _) => {
                values.iter().map(|v| v.trim().to_string()).filter(|v| !v.is_empty()).collect()
            }
            (CorrectAnswer::One(s), InputType::Checkbox) => s
                .chars()
                .filter(|c| !c.is_whitespace() && *c != ',')
                .map(|c| c.to_string())
                .collect(),
            (CorrectAnswer::One(s), InputType::Radio) => {
                let s = s.trim();
                if s.is_empty() {
                    BTreeSet::new()
                } else {
                    BTreeSet::from([s.to_string()])
                }
            }
        }
    }

    /// Problems that would make the question unusable in the exam engine
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.text.trim().is_empty() {
            issues.push("missing question text".to_string());
        }
        if self.choices.is_empty() {
            issues.push("no choices".to_string());
        }

        let answers = self.answer_set();
        if answers.is_empty() {
            issues.push("missing correct answer".to_string());
        }
        if self.input_type == InputType::Radio && answers.len() > 1 {
            issues.push(format!("radio question has {} correct answers", answers.len()));
        }

        if !self.choices.is_empty() {
            let values: BTreeSet<&str> = self.choices.iter().map(|c| c.value.as_str()).collect();
            for answer in &answers {
                if !values.contains(answer.as_str()) {
                    issues.push(format!("answer '{}' is not one of the choices", answer));
                }
            }
        }

        issues
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("expected a string, found {}", other))),
    }
}

fn lenient_title<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_answer<'de, D>(deserializer: D) -> Result<CorrectAnswer, D::Error>
where
    D: Deserializer<'de>,
{
    let scalar = |value: Value| -> Result<String, D::Error> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(serde::de::Error::custom(format!("unexpected answer {}", other))),
        }
    };
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(CorrectAnswer::default()),
        Value::Array(values) => {
            values.into_iter().map(scalar).collect::<Result<_, _>>().map(CorrectAnswer::Many)
        }
        other => scalar(other).map(CorrectAnswer::One),
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => {
            n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

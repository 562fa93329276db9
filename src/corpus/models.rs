// Corpus data model.
//
// A corpus is an ordered, read-only sequence of text records. Each record
// may carry a group label (the firm a posting or review belongs to) and a
// category label (the department a posting sits in).

use serde::{Deserialize, Serialize};

/// A single text record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Free text; `None` when the source cell was empty or the column absent
    pub text: Option<String>,
    /// Group label, e.g. company name
    pub group: Option<String>,
    /// Secondary label, e.g. department
    pub category: Option<String>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn grouped(text: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            group: Some(group.into()),
            category: None,
        }
    }

    /// The document text, with missing text read as the empty string.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

/// An ordered collection of documents loaded from one source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an ungrouped corpus from bare strings.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            documents: texts.into_iter().map(Document::new).collect(),
        }
    }

    /// Build a corpus from parallel text and group-label sequences.
    pub fn from_grouped<I, S, G>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<G>)>,
        S: Into<String>,
        G: Into<String>,
    {
        Self {
            documents: rows
                .into_iter()
                .map(|(text, group)| Document {
                    text: Some(text.into()),
                    group: group.map(Into::into),
                    category: None,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Texts in document order, missing text as "".
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(Document::text)
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

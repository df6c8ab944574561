//! Natural Language Querying (NLQ)
//!
//! Routes free-text questions either to the similarity engine or, through
//! pluggable delegates, to a question translator and a persistent graph
//! store. Generated queries must pass [`is_read_only`] before they run.

pub mod delegate;
pub mod router;

use crate::similarity::SimilarityError;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub use delegate::{GraphQueryExecutor, QuestionTranslator, Row};
pub use router::{classify, QueryRouter, QuestionClass, RouterAnswer};

#[derive(Error, Debug)]
pub enum NLQError {
    #[error("Translation error: {0}")]
    Translation(String),
    #[error("Execution error: {0}")]
    Execution(String),
    #[error("Unsafe query blocked: {0}")]
    UnsafeQuery(String),
    #[error(transparent)]
    Similarity(#[from] SimilarityError),
}

pub type NLQResult<T> = Result<T, NLQError>;

/// Keywords that make a generated query a write
pub const MUTATION_KEYWORDS: [&str; 8] = [
    "write", "create", "delete", "detach", "merge", "set", "remove", "drop",
];

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[A-Za-z]*[ \t]*\r?\n(.*?)```").expect("Invalid regex"));
static OPEN_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```[A-Za-z]*").expect("Invalid regex"));
static CLAUSE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:MATCH|OPTIONAL\s+MATCH|UNWIND|CALL)\b").expect("Invalid regex")
});

/// `true` unless `query` contains a mutation keyword
///
/// Case-insensitive substring match, so identifiers such as `dataset` or
/// `created_at` are rejected as well.
pub fn is_read_only(query: &str) -> bool {
    let lower = query.to_lowercase();
    !MUTATION_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Pull the query out of a translator response
///
/// The body of the first fenced block wins. Otherwise the query runs from the
/// first line opening a reading clause up to the next blank line, with its
/// lines joined by single spaces. Prose before that line is dropped.
pub fn extract_query(response: &str) -> String {
    if let Some(body) = FENCED_BLOCK.captures(response).and_then(|caps| caps.get(1)) {
        return body.as_str().trim().to_string();
    }

    let text = OPEN_FENCE.replace(response.trim(), "");
    let text = text.trim_end_matches('`');
    let query = match CLAUSE_START.find(text) {
        Some(clause) => text[clause.start()..].split("\n\n").next().unwrap_or_default(),
        None => text,
    };
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Prompt asking a translator for one read-only query over `schema`
pub fn build_prompt(question: &str, schema: &str) -> String {
    format!(
        "Given this graph schema:\n{}\n\n\
         Translate this question into a read-only OpenCypher query:\n\"{}\"\n\n\
         Rules:\n\
         - Return ONLY the query, no markdown, no explanations\n\
         - Use the labels, relationship types and property keys above\n\
         - For string matching, use CONTAINS\n\n\
         Example:\n\
         Question: \"What technologies does Robinson use?\"\n\
         Query: MATCH (s:Organization {{name: 'Robinson'}})-[:USES_TECHNOLOGY]->(t:Technology) RETURN t.name AS technology",
        schema, question
    )
}

//! Delegates to external systems
//!
//! The library ships no network client. Callers plug in a translator (for
//! example an LLM client) and an executor (for example a Neo4j session).

use super::NLQResult;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// One result row, column name to value
pub type Row = Map<String, Value>;

/// Runs a read-only query against a persistent graph store
#[async_trait]
pub trait GraphQueryExecutor: Send + Sync {
    async fn execute(&self, query: &str) -> NLQResult<Vec<Row>>;
}

/// Turns a natural-language question into a query over `schema`
#[async_trait]
pub trait QuestionTranslator: Send + Sync {
    async fn translate(&self, question: &str, schema: &str) -> NLQResult<String>;
}

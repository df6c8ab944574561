//! Question routing
//!
//! "Which startups are similar to X?" style questions are answered by the
//! similarity engine. Everything else goes through the translator, the
//! read-only check and the executor.

use super::delegate::{GraphQueryExecutor, QuestionTranslator, Row};
use super::{extract_query, is_read_only, NLQError, NLQResult};
use crate::graph::EntityKind;
use crate::similarity::{SimilarityEngine, TargetOutcome};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

static SIMILAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:similar\s+to|resembl\w*|like)\s+['"]?(?P<name>[^'"?!]+?)['"]?\s*[?.!]*\s*$"#)
        .expect("Invalid regex")
});
static KIND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?P<org>startups?|compan(?:y|ies)|organi[sz]ations?)|(?P<person>founders?|people|persons?)|(?P<fund>vcs?|funds?|investors?))\b",
    )
    .expect("Invalid regex")
});

/// How a question will be answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionClass {
    /// Rank entities of `kind` against the one named `name`
    Similarity { kind: EntityKind, name: String },
    /// Needs a translated query against the persistent store
    Exact,
}

/// Classify a question
///
/// A similarity question names a kind (startup/company/organization,
/// founder/person, vc/fund/investor) before a `similar to X`, `like X` or
/// `resembles X` phrase that ends the question.
pub fn classify(question: &str) -> QuestionClass {
    let Some(caps) = SIMILAR_PATTERN.captures(question) else {
        return QuestionClass::Exact;
    };
    let (Some(phrase), Some(name)) = (caps.get(0), caps.name("name")) else {
        return QuestionClass::Exact;
    };
    let name = name.as_str().trim();
    // "would like to ..." is not a comparison
    if name.is_empty() || name.to_lowercase().starts_with("to ") {
        return QuestionClass::Exact;
    }

    let Some(kind_caps) = KIND_PATTERN.captures(&question[..phrase.start()]) else {
        return QuestionClass::Exact;
    };
    let kind = if kind_caps.name("org").is_some() {
        EntityKind::Organization
    } else if kind_caps.name("person").is_some() {
        EntityKind::Person
    } else {
        EntityKind::Fund
    };

    QuestionClass::Similarity {
        kind,
        name: name.to_string(),
    }
}

/// Answer to a routed question
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "answer", rename_all = "snake_case")]
pub enum RouterAnswer {
    Similarity { outcome: TargetOutcome },
    Rows { query: String, rows: Vec<Row> },
}

/// Owns the delegates and the engine; constructed explicitly by the caller
pub struct QueryRouter<'g> {
    engine: SimilarityEngine<'g>,
    translator: Box<dyn QuestionTranslator>,
    executor: Box<dyn GraphQueryExecutor>,
    schema: String,
}

impl<'g> QueryRouter<'g> {
    pub fn new(
        engine: SimilarityEngine<'g>,
        translator: impl QuestionTranslator + 'static,
        executor: impl GraphQueryExecutor + 'static,
    ) -> Self {
        let schema = engine.store().schema_summary();
        Self {
            engine,
            translator: Box::new(translator),
            executor: Box::new(executor),
            schema,
        }
    }

    pub fn engine(&self) -> &SimilarityEngine<'g> {
        &self.engine
    }

    /// Schema summary handed to the translator
    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub async fn answer(&self, question: &str) -> NLQResult<RouterAnswer> {
        match classify(question) {
            QuestionClass::Similarity { kind, name } => {
                info!("Answering similarity question for {} '{}'", kind, name);
                let outcome = self.engine.most_similar_to(kind, &name)?;
                Ok(RouterAnswer::Similarity { outcome })
            }
            QuestionClass::Exact => {
                let response = self.translator.translate(question, &self.schema).await?;
                let query = extract_query(&response);
                if query.is_empty() {
                    return Err(NLQError::Translation(
                        "translator returned an empty query".to_string(),
                    ));
                }
                if !is_read_only(&query) {
                    warn!("Unsafe query detected and blocked: {}", query);
                    return Err(NLQError::UnsafeQuery(query));
                }
                debug!("Executing generated query: {}", query);
                let rows = self.executor.execute(&query).await?;
                Ok(RouterAnswer::Rows { query, rows })
            }
        }
    }
}

use serde::Serialize;
use std::convert::TryFrom;
use std::sync::Arc;
use thiserror::Error;

use crate::store::{Category, QuestionPair, QuestionStore};


#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Category not found")]
    CategoryNotFound,
    #[error("Question not found in category")]
    QuestionNotFound,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerCheck {
    pub correct: bool,
    pub expected: String,
}

/// Read-only queries over a loaded `QuestionStore`.
///
/// Nothing here mutates the store, so a single service can be shared between
/// any number of request handlers.
#[derive(Clone, Debug)]
pub struct QueryService {
    store: Arc<QuestionStore>,
}

impl QueryService {
    pub fn new(store: Arc<QuestionStore>) -> Self {
        QueryService { store }
    }

    pub fn list_categories(&self) -> Vec<&str> {
        self.store.category_names().collect()
    }

    /// Up to `limit` questions starting at `offset`. A `limit` of zero or less
    /// returns everything from `offset` to the end of the deck.
    pub fn get_questions(
        &self,
        category: &str,
        limit: i64,
        offset: usize,
    ) -> Result<&[QuestionPair], QueryError> {
        let questions = self.get_category(category)?.get_questions();
        let start = offset.min(questions.len());
        let end = if limit <= 0 {
            questions.len()
        } else {
            let limit = usize::try_from(limit).unwrap_or(usize::MAX);
            start.saturating_add(limit).min(questions.len())
        };
        Ok(&questions[start..end])
    }

    pub fn check_answer(
        &self,
        category: &str,
        question: &str,
        submitted_answer: &str,
    ) -> Result<AnswerCheck, QueryError> {
        let pair = self
            .get_category(category)?
            .find_question(question)
            .ok_or(QueryError::QuestionNotFound)?;
        Ok(AnswerCheck {
            correct: pair.is_answer_correct(submitted_answer),
            expected: pair.answer.clone(),
        })
    }

    fn get_category(&self, name: &str) -> Result<&Category, QueryError> {
        self.store
            .get_category(name)
            .ok_or(QueryError::CategoryNotFound)
    }
}

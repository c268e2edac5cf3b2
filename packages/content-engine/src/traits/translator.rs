//! Machine translation.

use async_trait::async_trait;

use crate::error::CollaboratorResult;
use crate::types::language::LanguageCode;

/// Translates source-language text into a target language.
///
/// Callers treat both an `Err` and an empty string as "no suggestion"; a
/// failed translation never aborts the surrounding batch.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: LanguageCode) -> CollaboratorResult<String>;
}

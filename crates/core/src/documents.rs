//! Document vault.

use barrkeh_shared::types::{DocumentId, TransactionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::state::FinanceState;

/// Kind of filed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Purchase receipt.
    Receipt,
    /// Issued invoice.
    Invoice,
    /// Contract.
    Contract,
    /// Chamber of Commerce (KvK) extract.
    Kvk,
    /// License.
    License,
    /// Anything else.
    Other,
}

/// A filed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier.
    pub id: DocumentId,
    /// Kind.
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Display name.
    pub name: String,
    /// Where the file lives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Transaction the document belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<TransactionId>,
    /// Project reference owned by another subsystem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// When it was filed.
    pub created_at: DateTime<Utc>,
}

/// Input for filing a document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    /// Kind.
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Required.
    pub name: String,
    /// Where the file lives.
    #[serde(default)]
    pub url: Option<String>,
    /// Related transaction.
    #[serde(default)]
    pub transaction_id: Option<TransactionId>,
    /// Related project.
    #[serde(default)]
    pub project_id: Option<String>,
}

impl FinanceState {
    /// Files a document.
    pub fn add_document(&mut self, input: NewDocument, now: DateTime<Utc>) -> FinanceResult<Document> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(FinanceError::validation("document name is required"));
        }
        let document = Document {
            id: DocumentId::new(),
            doc_type: input.doc_type,
            name: name.to_string(),
            url: input.url,
            transaction_id: input.transaction_id,
            project_id: input.project_id,
            created_at: now,
        };
        self.documents.push(document.clone());
        Ok(document)
    }

    /// Removes a document.
    pub fn delete_document(&mut self, id: DocumentId) -> FinanceResult<Document> {
        let index = self
            .documents
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| FinanceError::not_found("document", id))?;
        Ok(self.documents.remove(index))
    }
}

//! solace-gateway
//!
//! The persistence gateway the wizard engine saves through: a create/update
//! contract over form-type collections, and its HTTP implementation. Every
//! save transmits the complete form — there are no field-level patch
//! semantics, and no automatic retries.

pub mod error;
pub mod http;

use serde::Serialize;
use serde_json::{Map, Value};

pub use error::GatewayError;
pub use http::HttpGateway;

/// Wire body for both create and update: the full form state plus the
/// draft bookkeeping fields.
#[derive(Debug, Clone, Serialize)]
pub struct SaveBody {
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    #[serde(rename = "isDraft")]
    pub is_draft: bool,

    /// The step the user was on, sent only for drafts so a resume can land
    /// where they left off.
    #[serde(rename = "currentStep", skip_serializing_if = "Option::is_none")]
    pub current_step: Option<u32>,
}

impl SaveBody {
    pub fn draft(fields: Map<String, Value>, current_step: u32) -> Self {
        Self {
            fields,
            is_draft: true,
            current_step: Some(current_step),
        }
    }

    pub fn finalized(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            is_draft: false,
            current_step: None,
        }
    }
}

/// The create/update contract the wizard engine calls.
///
/// Implemented by [`HttpGateway`] in production and by in-memory fakes in
/// engine tests. `async fn` in the trait is fine here: the engine holds its
/// gateway as a generic parameter, never as a trait object.
#[allow(async_fn_in_trait)]
pub trait DraftGateway {
    /// Create a new record in `collection`. Returns the server-assigned id,
    /// read from either a top-level `id` or a `{ record_key: { id } }`
    /// nesting.
    async fn create(
        &self,
        collection: &str,
        record_key: &str,
        body: &SaveBody,
    ) -> Result<String, GatewayError>;

    /// Overwrite the record `id` in `collection` with the full body.
    async fn update(&self, collection: &str, id: &str, body: &SaveBody)
    -> Result<(), GatewayError>;
}

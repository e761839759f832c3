use thiserror::Error;

use solace_forms::error::FormError;
use solace_forms::schema::SchemaFault;
use solace_gateway::GatewayError;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Schema(#[from] SchemaFault),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A draft save or submit is already in flight; the caller must wait for
    /// it to resolve before starting another.
    #[error("a save is already in flight")]
    OperationInFlight,
}

impl WizardError {
    /// The message to surface to the user, toast-style.
    pub fn user_message(&self) -> String {
        match self {
            WizardError::Gateway(e) => e.user_message(),
            WizardError::OperationInFlight => "A save is already in progress.".to_string(),
            WizardError::Schema(_) | WizardError::Form(_) => {
                "Something went wrong checking this form. Please try again.".to_string()
            }
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown form: {0}")]
    UnknownForm(String),

    #[error("step {step} out of range for form '{form}' (1..={total})")]
    StepOutOfRange { form: String, step: u32, total: u32 },
}

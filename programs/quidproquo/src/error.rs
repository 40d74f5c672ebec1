use anchor_lang::prelude::*;

/// Program-specific failures. Account relationship violations use Anchor's
/// own constraint codes instead (see `validation`), so callers can branch on
/// the same numbers whether a check ran declaratively or in the pipeline.
#[error_code]
pub enum QuidProQuoError {
    // Argument Errors
    #[msg("Offer amounts must be greater than zero")]
    ZeroAmount,

    #[msg("Maker and taker mints must be different")]
    SameMint,

    // Vault Errors
    #[msg("Vault holds less than the escrowed amount")]
    VaultBalanceMismatch,

    #[msg("No viable bump found for the vault address")]
    VaultDerivationFailed,
}

impl QuidProQuoError {
    /// Which class of failure this is, for logging
    pub fn category(&self) -> &'static str {
        match self {
            QuidProQuoError::ZeroAmount | QuidProQuoError::SameMint => "Argument",
            QuidProQuoError::VaultBalanceMismatch => "Balance",
            QuidProQuoError::VaultDerivationFailed => "Configuration",
        }
    }
}

/// Helper macro for logging errors with context
#[macro_export]
macro_rules! log_error {
    ($error:expr, $context:expr) => {
        ::anchor_lang::prelude::msg!(
            "Error {}: {} in context: {}",
            u32::from($error),
            $error.category(),
            $context
        );
    };
}

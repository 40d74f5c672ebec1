use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;

use crate::{constants::VAULT_SEED, error::QuidProQuoError, state::Offer};

/// Find the vault address and canonical bump for an offer.
///
/// The search walks bumps from 255 down until the address falls off the
/// ed25519 curve. Running out of bumps is not something a caller can retry
/// around, so it surfaces as `VaultDerivationFailed`.
pub fn derive_vault(program_id: &Pubkey, offer: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(&[VAULT_SEED, offer.as_ref()], program_id).ok_or_else(|| {
        crate::log_error!(QuidProQuoError::VaultDerivationFailed, offer);
        error!(QuidProQuoError::VaultDerivationFailed)
    })
}

/// Check a caller-supplied bump against the canonical one and return the
/// vault address it derives.
pub fn verify_vault_bump(program_id: &Pubkey, offer: &Pubkey, bump: u8) -> Result<Pubkey> {
    let (address, canonical_bump) = derive_vault(program_id, offer)?;

    if bump != canonical_bump {
        msg!(
            "Vault bump mismatch: supplied {}, expected {}",
            bump,
            canonical_bump
        );
        return Err(Error::from(ErrorCode::ConstraintSeeds).with_account_name("vault"));
    }

    Ok(address)
}

/// Signing authority over an offer's vault.
///
/// The vault has no private key; the program signs for it by presenting the
/// seeds `["vault", offer]` plus the bump stored on the offer. Settlement is
/// the only code that builds one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultAuthority {
    offer: Pubkey,
    bump: [u8; 1],
}

impl VaultAuthority {
    pub fn new(offer: Pubkey, bump: u8) -> Self {
        Self {
            offer,
            bump: [bump],
        }
    }

    /// Authority for a live offer, using its persisted bump
    pub fn for_offer(offer_key: Pubkey, offer: &Offer) -> Self {
        Self::new(offer_key, offer.vault_authority_bump)
    }

    pub fn bump(&self) -> u8 {
        self.bump[0]
    }

    /// Seeds to pass to `CpiContext::new_with_signer`
    pub fn seeds(&self) -> [&[u8]; 3] {
        [VAULT_SEED, self.offer.as_ref(), &self.bump]
    }

    /// Re-derive the vault address from the stored bump (no search)
    pub fn address(&self, program_id: &Pubkey) -> Result<Pubkey> {
        Pubkey::create_program_address(&self.seeds(), program_id)
            .map_err(|_| Error::from(ErrorCode::ConstraintSeeds).with_account_name("vault"))
    }
}

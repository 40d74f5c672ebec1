use anchor_lang::prelude::*;

use crate::constants::ANCHOR_DISCRIMINATOR;

/// One outstanding trade. Written once by `make`, never updated, and closed
/// by whichever of `accept` or `cancel` runs first.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Offer {
    /// Who made the offer (the only one allowed to cancel it)
    pub maker: Pubkey,

    /// Token the maker is giving up
    pub maker_mint: Pubkey,

    /// Token the maker wants in return
    pub taker_mint: Pubkey,

    /// Amount of maker_mint locked in the vault
    pub maker_amount: u64,

    /// Amount of taker_mint the maker demands
    pub taker_amount: u64,

    /// Vault token account holding the escrowed maker tokens
    pub vault: Pubkey,

    /// Bump of the vault PDA, stored so the program can sign without a search
    pub vault_authority_bump: u8,
}

impl Offer {
    /// Total account size including the Anchor discriminator
    pub const SPACE: usize = ANCHOR_DISCRIMINATOR + Offer::INIT_SPACE;
}

use anchor_lang::prelude::*;

use crate::{settlement::Settlement, state::Offer};

/// Emitted when a maker locks tokens into a new offer
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OfferMade {
    /// The offer account
    pub offer: Pubkey,
    /// Who made the offer
    pub maker: Pubkey,
    /// Token locked in the vault
    pub maker_mint: Pubkey,
    /// Token demanded in return
    pub taker_mint: Pubkey,
    /// Amount locked in the vault
    pub maker_amount: u64,
    /// Amount demanded in return
    pub taker_amount: u64,
    /// Vault holding the locked tokens
    pub vault: Pubkey,
}

/// Emitted when a taker settles an offer
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OfferAccepted {
    pub offer: Pubkey,
    pub maker: Pubkey,
    pub taker: Pubkey,
    /// Amount released from the vault to the taker
    pub maker_amount: u64,
    /// Amount paid by the taker to the maker
    pub taker_amount: u64,
}

/// Emitted when a maker withdraws an offer
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OfferCancelled {
    pub offer: Pubkey,
    pub maker: Pubkey,
    /// Amount returned from the vault to the maker
    pub refunded: u64,
}

impl OfferMade {
    pub fn new(offer_key: Pubkey, offer: &Offer) -> Self {
        Self {
            offer: offer_key,
            maker: offer.maker,
            maker_mint: offer.maker_mint,
            taker_mint: offer.taker_mint,
            maker_amount: offer.maker_amount,
            taker_amount: offer.taker_amount,
            vault: offer.vault,
        }
    }
}

impl OfferAccepted {
    pub fn new(offer_key: Pubkey, offer: &Offer, taker: Pubkey, settlement: &Settlement) -> Self {
        Self {
            offer: offer_key,
            maker: offer.maker,
            taker,
            maker_amount: settlement.vault_release,
            taker_amount: settlement.taker_to_maker,
        }
    }
}

impl OfferCancelled {
    pub fn new(offer_key: Pubkey, offer: &Offer, settlement: &Settlement) -> Self {
        Self {
            offer: offer_key,
            maker: offer.maker,
            refunded: settlement.vault_release,
        }
    }
}

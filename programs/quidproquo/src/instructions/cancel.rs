use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    events::OfferCancelled,
    settlement::{release_vault, Settlement},
    state::Offer,
    validation::{validate_cancel, CancelChecks, TokenAccountView},
    vault::VaultAuthority,
};

#[derive(Accounts)]
pub struct Cancel<'info> {
    /// The offer being withdrawn (closed at the end, rent back to the maker)
    #[account(mut, close = maker)]
    pub offer: Account<'info, Offer>,

    /// Vault holding the escrowed tokens
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Maker's associated account for the maker mint (gets the refund)
    #[account(mut)]
    pub maker_destination_tokens: Account<'info, TokenAccount>,

    /// The maker has to sign to cancel their own offer
    #[account(mut)]
    pub maker: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

impl<'info> Cancel<'info> {
    pub fn cancel(&mut self) -> Result<()> {
        let offer_key = self.offer.key();
        msg!("Cancelling offer {}", offer_key);

        validate_cancel(&CancelChecks {
            offer: &self.offer,
            maker: self.maker.key(),
            vault: TokenAccountView::from_account(&self.vault),
            maker_destination_tokens: TokenAccountView::from_account(
                &self.maker_destination_tokens,
            ),
        })?;

        let settlement = Settlement::cancel(self.vault.amount);

        release_vault(
            &VaultAuthority::for_offer(offer_key, &self.offer),
            &self.token_program,
            &self.vault,
            &self.maker_destination_tokens,
            self.maker.to_account_info(),
            settlement.vault_release,
        )?;

        emit!(OfferCancelled::new(offer_key, &self.offer, &settlement));

        Ok(())
    }
}

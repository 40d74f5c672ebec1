use anchor_lang::prelude::*;
use anchor_spl::token::{transfer, Mint, Token, TokenAccount, Transfer};

use crate::{
    events::OfferAccepted,
    settlement::{release_vault, Settlement},
    state::Offer,
    validation::{validate_accept, AcceptChecks, TokenAccountView},
    vault::VaultAuthority,
};

/// Accounts for settling an offer. Relationships between them (whose
/// account is whose, which mint goes where) are checked by
/// `validate_accept` before anything moves.
#[derive(Accounts)]
pub struct Accept<'info> {
    /// The offer being settled. Closed at the end, rent back to the maker;
    /// an offer that was already settled or cancelled fails to load here
    #[account(mut, close = maker)]
    pub offer: Box<Account<'info, Offer>>,

    /// Vault holding the maker's escrowed tokens
    #[account(mut)]
    pub vault: Box<Account<'info, TokenAccount>>,

    /// Whoever made the offer (receives payment and both rent refunds)
    #[account(mut)]
    pub maker: SystemAccount<'info>,

    /// Maker's associated account for the taker mint (receives payment)
    #[account(mut)]
    pub maker_taker_tokens: Box<Account<'info, TokenAccount>>,

    /// The person accepting the offer
    pub taker: Signer<'info>,

    /// Taker's account for the maker mint (receives the escrowed tokens)
    #[account(mut)]
    pub taker_maker_tokens: Box<Account<'info, TokenAccount>>,

    /// Taker's account for the taker mint (pays the maker)
    #[account(mut)]
    pub taker_taker_tokens: Box<Account<'info, TokenAccount>>,

    pub taker_mint: Box<Account<'info, Mint>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> Accept<'info> {
    pub fn accept(&mut self) -> Result<()> {
        let offer_key = self.offer.key();
        msg!("Accepting offer {} by {}", offer_key, self.taker.key());

        validate_accept(&AcceptChecks {
            offer: &self.offer,
            maker: self.maker.key(),
            vault: TokenAccountView::from_account(&self.vault),
            taker_mint: self.taker_mint.key(),
            maker_taker_tokens: TokenAccountView::from_account(&self.maker_taker_tokens),
            taker_taker_tokens: TokenAccountView::from_account(&self.taker_taker_tokens),
            taker_maker_tokens: TokenAccountView::from_account(&self.taker_maker_tokens),
        })?;

        let settlement = Settlement::accept(&self.offer, self.vault.amount);

        // Taker pays first; an underfunded taker aborts everything right here
        self.pay_maker(settlement.taker_to_maker)?;

        release_vault(
            &VaultAuthority::for_offer(offer_key, &self.offer),
            &self.token_program,
            &self.vault,
            &self.taker_maker_tokens,
            self.maker.to_account_info(),
            settlement.vault_release,
        )?;

        emit!(OfferAccepted::new(
            offer_key,
            &self.offer,
            self.taker.key(),
            &settlement,
        ));

        Ok(())
    }

    fn pay_maker(&self, amount: u64) -> Result<()> {
        let ctx = CpiContext::new(
            self.token_program.to_account_info(),
            Transfer {
                from: self.taker_taker_tokens.to_account_info(),
                to: self.maker_taker_tokens.to_account_info(),
                authority: self.taker.to_account_info(),
            },
        );
        transfer(ctx, amount)?;

        msg!("Taker paid {} tokens to maker", amount);

        Ok(())
    }
}

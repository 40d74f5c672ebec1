use anchor_lang::prelude::*;
use anchor_spl::token::{transfer, Mint, Token, TokenAccount, Transfer};

use crate::{
    constants::VAULT_SEED,
    error::QuidProQuoError,
    events::OfferMade,
    state::Offer,
    validation::{validate_make, MakeChecks, TokenAccountView},
};

#[derive(Accounts)]
pub struct Make<'info> {
    /// The new offer. A fresh keypair supplied by the client, so reusing one
    /// fails in the system program with AccountAlreadyInUse
    #[account(init, payer = maker, space = Offer::SPACE)]
    pub offer: Account<'info, Offer>,

    /// The person making the offer (pays rent for the offer and the vault)
    #[account(mut)]
    pub maker: Signer<'info>,

    /// Where the escrowed tokens come from
    #[account(mut)]
    pub maker_source_tokens: Account<'info, TokenAccount>,

    /// The vault. Lives at ["vault", offer] and is its own token authority,
    /// so nothing but this program can move tokens out of it. Anchor finds the
    /// canonical bump; the handler insists the caller's bump matches it
    #[account(
        init,
        payer = maker,
        seeds = [VAULT_SEED, offer.key().as_ref()],
        bump,
        token::mint = maker_mint,
        token::authority = vault,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Token being offered
    pub maker_mint: Account<'info, Mint>,

    /// Token wanted in return
    pub taker_mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> Make<'info> {
    pub fn make(
        &mut self,
        program_id: &Pubkey,
        bumps: &MakeBumps,
        vault_authority_bump: u8,
        maker_amount: u64,
        taker_amount: u64,
    ) -> Result<()> {
        msg!("Making offer {}", self.offer.key());

        validate_make(&MakeChecks {
            program_id,
            offer: self.offer.key(),
            maker: self.maker.key(),
            maker_source_tokens: TokenAccountView::from_account(&self.maker_source_tokens),
            maker_mint: self.maker_mint.key(),
            taker_mint: self.taker_mint.key(),
            vault: self.vault.key(),
            vault_bump: bumps.vault,
            vault_authority_bump,
            maker_amount,
            taker_amount,
        })?;

        self.offer.set_inner(Offer {
            maker: self.maker.key(),
            maker_mint: self.maker_mint.key(),
            taker_mint: self.taker_mint.key(),
            maker_amount,
            taker_amount,
            vault: self.vault.key(),
            vault_authority_bump,
        });

        self.deposit(maker_amount)?;

        emit!(OfferMade::new(self.offer.key(), &self.offer));

        Ok(())
    }

    /// Move the offered tokens into the vault. An underfunded source fails
    /// here, inside the token program, with InsufficientFunds
    fn deposit(&mut self, amount: u64) -> Result<()> {
        let ctx = CpiContext::new(
            self.token_program.to_account_info(),
            Transfer {
                from: self.maker_source_tokens.to_account_info(),
                to: self.vault.to_account_info(),
                authority: self.maker.to_account_info(),
            },
        );
        transfer(ctx, amount)?;

        self.vault.reload()?;
        require_eq!(
            self.vault.amount,
            amount,
            QuidProQuoError::VaultBalanceMismatch
        );

        msg!("Escrowed {} tokens in vault {}", amount, self.vault.key());

        Ok(())
    }
}

#![allow(unexpected_cfgs, deprecated)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod settlement;
pub mod state;
pub mod validation;
pub mod vault;


use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod quidproquo {
    use super::*;

    /// Make a binding offer of `maker_amount` of one kind of token in exchange
    /// for `taker_amount` of another. The maker's tokens are locked in a vault
    /// only this program can sign for.
    pub fn make(
        ctx: Context<Make>,
        vault_authority_bump: u8,
        maker_amount: u64,
        taker_amount: u64,
    ) -> Result<()> {
        ctx.accounts.make(
            ctx.program_id,
            &ctx.bumps,
            vault_authority_bump,
            maker_amount,
            taker_amount,
        )
    }

    /// Accept an offer by paying the demanded tokens. Releases the vault to
    /// the taker and closes the offer.
    pub fn accept(ctx: Context<Accept>) -> Result<()> {
        ctx.accounts.accept()
    }

    /// Cancel an open offer. Only the maker can do this; the vault is
    /// returned to them in full.
    pub fn cancel(ctx: Context<Cancel>) -> Result<()> {
        ctx.accounts.cancel()
    }
}

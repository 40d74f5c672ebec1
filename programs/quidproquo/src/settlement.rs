use anchor_lang::prelude::*;
use anchor_spl::token::{close_account, transfer, CloseAccount, Token, TokenAccount, Transfer};

use crate::{state::Offer, vault::VaultAuthority};

/// Token movements a terminal transition performs. The taker's payment comes
/// from the offer terms alone; the vault is always emptied in full, since
/// anyone can top it up and a leftover balance would block closing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// Taker-mint tokens paid by the taker to the maker
    pub taker_to_maker: u64,
    /// Maker-mint tokens paid out of the vault (to the taker, or back to the maker)
    pub vault_release: u64,
}

impl Settlement {
    pub fn accept(offer: &Offer, vault_balance: u64) -> Self {
        Self {
            taker_to_maker: offer.taker_amount,
            vault_release: vault_balance,
        }
    }

    pub fn cancel(vault_balance: u64) -> Self {
        Self {
            taker_to_maker: 0,
            vault_release: vault_balance,
        }
    }
}

/// Pay `amount` out of the vault, then close it and send its rent to
/// `rent_receiver`. Both steps are signed by the vault's derived authority.
pub fn release_vault<'info>(
    authority: &VaultAuthority,
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    destination: &Account<'info, TokenAccount>,
    rent_receiver: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let seeds = authority.seeds();
    let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];

    let ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        Transfer {
            from: vault.to_account_info(),
            to: destination.to_account_info(),
            authority: vault.to_account_info(),
        },
        signer_seeds,
    );
    transfer(ctx, amount)?;

    msg!("Released {} tokens from vault {}", amount, vault.key());

    let ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        CloseAccount {
            account: vault.to_account_info(),
            destination: rent_receiver,
            authority: vault.to_account_info(),
        },
        signer_seeds,
    );
    close_account(ctx)?;

    msg!("Closed vault {}", vault.key());

    Ok(())
}

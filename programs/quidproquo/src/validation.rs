use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_spl::{associated_token::get_associated_token_address, token::TokenAccount};

use crate::{error::QuidProQuoError, state::Offer, vault::verify_vault_bump};

// Every instruction runs one of the pipelines below before it moves a single
// token. Stages run in a fixed order and the first failure wins, so a given
// bad account list always produces the same error code.

/// The parts of an SPL token account the checks care about
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenAccountView {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

impl TokenAccountView {
    pub fn from_account(account: &Account<'_, TokenAccount>) -> Self {
        Self {
            address: account.key(),
            mint: account.mint,
            owner: account.owner,
            amount: account.amount,
        }
    }
}

/// Inputs to `make` that need checking
pub struct MakeChecks<'a> {
    pub program_id: &'a Pubkey,
    pub offer: Pubkey,
    pub maker: Pubkey,
    pub maker_source_tokens: TokenAccountView,
    pub maker_mint: Pubkey,
    pub taker_mint: Pubkey,
    pub vault: Pubkey,
    /// Bump Anchor found for the vault while creating it
    pub vault_bump: u8,
    /// Bump the caller claims, persisted on the offer
    pub vault_authority_bump: u8,
    pub maker_amount: u64,
    pub taker_amount: u64,
}

/// Accounts supplied to `accept`, checked against the live offer
pub struct AcceptChecks<'a> {
    pub offer: &'a Offer,
    pub maker: Pubkey,
    pub vault: TokenAccountView,
    pub taker_mint: Pubkey,
    pub maker_taker_tokens: TokenAccountView,
    pub taker_taker_tokens: TokenAccountView,
    pub taker_maker_tokens: TokenAccountView,
}

/// Accounts supplied to `cancel`, checked against the live offer
pub struct CancelChecks<'a> {
    pub offer: &'a Offer,
    pub maker: Pubkey,
    pub vault: TokenAccountView,
    pub maker_destination_tokens: TokenAccountView,
}

pub fn validate_make(checks: &MakeChecks) -> Result<()> {
    // Vault must sit at the canonical PDA for this offer, and the bump the
    // caller hands in must be the one it was created with
    if checks.vault_authority_bump != checks.vault_bump {
        return Err(violation(ErrorCode::ConstraintSeeds, "vault"));
    }
    let vault = verify_vault_bump(checks.program_id, &checks.offer, checks.vault_authority_bump)?;
    expect_key(checks.vault, vault, ErrorCode::ConstraintSeeds, "vault")?;

    // Arguments
    if checks.maker_amount == 0 || checks.taker_amount == 0 {
        return Err(reject(QuidProQuoError::ZeroAmount, "make"));
    }
    if checks.maker_mint == checks.taker_mint {
        return Err(reject(QuidProQuoError::SameMint, "make"));
    }

    // Source of the deposit
    expect_mint(
        &checks.maker_source_tokens,
        checks.maker_mint,
        "maker_source_tokens",
    )?;
    expect_owner(
        &checks.maker_source_tokens,
        checks.maker,
        "maker_source_tokens",
    )?;

    msg!(
        "Make validation passed: maker_amount={}, taker_amount={}",
        checks.maker_amount,
        checks.taker_amount
    );

    Ok(())
}

pub fn validate_accept(checks: &AcceptChecks) -> Result<()> {
    let offer = checks.offer;

    expect_key(checks.maker, offer.maker, ErrorCode::ConstraintHasOne, "maker")?;

    // Payment has to land in the maker's own account for the demanded mint,
    // not just any account the maker happens to control
    expect_mint(
        &checks.maker_taker_tokens,
        offer.taker_mint,
        "maker_taker_tokens",
    )?;
    expect_associated(
        &checks.maker_taker_tokens,
        offer.maker,
        offer.taker_mint,
        "maker_taker_tokens",
    )?;

    expect_mint(
        &checks.taker_taker_tokens,
        offer.taker_mint,
        "taker_taker_tokens",
    )?;
    expect_mint(
        &checks.taker_maker_tokens,
        offer.maker_mint,
        "taker_maker_tokens",
    )?;

    expect_key(
        checks.vault.address,
        offer.vault,
        ErrorCode::ConstraintAddress,
        "vault",
    )?;
    expect_key(
        checks.taker_mint,
        offer.taker_mint,
        ErrorCode::ConstraintAddress,
        "taker_mint",
    )?;

    // The taker's balance is left to the token program to enforce
    expect_escrowed(&checks.vault, offer)?;

    msg!(
        "Accept validation passed: taker pays {}, receives {}",
        offer.taker_amount,
        offer.maker_amount
    );

    Ok(())
}

pub fn validate_cancel(checks: &CancelChecks) -> Result<()> {
    let offer = checks.offer;

    expect_key(checks.maker, offer.maker, ErrorCode::ConstraintHasOne, "maker")?;
    expect_key(
        checks.vault.address,
        offer.vault,
        ErrorCode::ConstraintAddress,
        "vault",
    )?;
    expect_mint(
        &checks.maker_destination_tokens,
        offer.maker_mint,
        "maker_destination_tokens",
    )?;
    expect_associated(
        &checks.maker_destination_tokens,
        offer.maker,
        offer.maker_mint,
        "maker_destination_tokens",
    )?;
    expect_escrowed(&checks.vault, offer)?;

    msg!("Cancel validation passed: refunding {}", offer.maker_amount);

    Ok(())
}

fn expect_key(actual: Pubkey, expected: Pubkey, code: ErrorCode, account: &str) -> Result<()> {
    if actual != expected {
        return Err(violation(code, account));
    }
    Ok(())
}

fn expect_mint(tokens: &TokenAccountView, mint: Pubkey, account: &str) -> Result<()> {
    if tokens.mint != mint {
        msg!("{} holds mint {}, expected {}", account, tokens.mint, mint);
        return Err(violation(ErrorCode::ConstraintTokenMint, account));
    }
    Ok(())
}

fn expect_owner(tokens: &TokenAccountView, owner: Pubkey, account: &str) -> Result<()> {
    if tokens.owner != owner {
        return Err(violation(ErrorCode::ConstraintTokenOwner, account));
    }
    Ok(())
}

fn expect_associated(
    tokens: &TokenAccountView,
    wallet: Pubkey,
    mint: Pubkey,
    account: &str,
) -> Result<()> {
    if tokens.address != get_associated_token_address(&wallet, &mint) || tokens.owner != wallet {
        msg!("{} is not the associated token account of {}", account, wallet);
        return Err(violation(ErrorCode::ConstraintAssociated, account));
    }
    Ok(())
}

/// Anyone can transfer into the vault, so it may hold more than was escrowed.
/// Holding less is impossible unless something is badly wrong.
fn expect_escrowed(vault: &TokenAccountView, offer: &Offer) -> Result<()> {
    if vault.amount < offer.maker_amount {
        msg!(
            "Vault holds {}, offer escrowed {}",
            vault.amount,
            offer.maker_amount
        );
        return Err(reject(QuidProQuoError::VaultBalanceMismatch, "vault"));
    }
    Ok(())
}

fn violation(code: ErrorCode, account: &str) -> Error {
    msg!("Constraint {} violated by {}", code.name(), account);
    Error::from(code).with_account_name(account)
}

fn reject(failure: QuidProQuoError, context: &str) -> Error {
    crate::log_error!(failure, context);
    error!(failure)
}

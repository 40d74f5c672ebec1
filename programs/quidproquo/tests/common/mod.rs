#![allow(dead_code)]

use std::path::PathBuf;

use anchor_lang::{AccountDeserialize, Event, InstructionData, ToAccountMetas};
use anchor_spl::{associated_token::get_associated_token_address, token::spl_token};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use litesvm::{
    types::{FailedTransactionMetadata, TransactionMetadata},
    LiteSVM,
};
use quidproquo::{state::Offer, vault::derive_vault};
use solana_sdk::{
    account::Account,
    instruction::{Instruction, InstructionError},
    message::Message,
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    system_program,
    sysvar,
    transaction::{Transaction, TransactionError},
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------
pub const INITIAL_LAMPORTS: u64 = 10_000_000_000;

/// Tokens each party starts out with
pub const STARTING_BALANCE: u64 = 1000;

pub type TxResult = Result<TransactionMetadata, FailedTransactionMetadata>;

// ---------------------------------------------------------------------------
// Program loading
// ---------------------------------------------------------------------------

/// Where `anchor build` leaves the program
pub fn program_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/deploy/quidproquo.so")
}

// ---------------------------------------------------------------------------
// Transaction helpers
// ---------------------------------------------------------------------------
pub fn send_tx(svm: &mut LiteSVM, ixs: &[Instruction], signers: &[&Keypair]) -> TxResult {
    let payer = signers[0].pubkey();
    let blockhash = svm.latest_blockhash();
    let msg = Message::new(ixs, Some(&payer));
    let tx = Transaction::new(signers, msg, blockhash);
    let result = svm.send_transaction(tx);
    // Identical retries must not be deduplicated as already processed
    svm.expire_blockhash();
    result
}

/// Custom code an instruction failed with, whichever program raised it
pub fn custom_error(failed: &FailedTransactionMetadata) -> Option<u32> {
    match &failed.err {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(*code),
        _ => None,
    }
}

/// Every event of type `E` the program logged
pub fn emitted<E: Event>(logs: &[String]) -> Vec<E> {
    logs.iter()
        .filter_map(|line| line.strip_prefix("Program data: "))
        .filter_map(|encoded| STANDARD.decode(encoded).ok())
        .filter(|data| data.starts_with(E::DISCRIMINATOR))
        .filter_map(|data| E::try_from_slice(&data[E::DISCRIMINATOR.len()..]).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Account creation helpers
// ---------------------------------------------------------------------------
pub fn create_mint(svm: &mut LiteSVM, mint_authority: &Pubkey) -> Pubkey {
    let mint = Keypair::new();

    // SPL Token Mint layout (82 bytes)
    let mut mint_data = vec![0u8; 82];
    // [0..4]: mint_authority COption tag = Some
    mint_data[0..4].copy_from_slice(&1u32.to_le_bytes());
    mint_data[4..36].copy_from_slice(mint_authority.as_ref());
    // [44]: decimals
    mint_data[44] = 6;
    // [45]: is_initialized
    mint_data[45] = 1;

    svm.set_account(
        mint.pubkey(),
        Account {
            executable: false,
            data: mint_data,
            lamports: INITIAL_LAMPORTS,
            owner: spl_token::ID,
            rent_epoch: 0,
        },
    )
    .unwrap();

    mint.pubkey()
}

pub fn create_token_account(svm: &mut LiteSVM, mint: &Pubkey, owner: &Pubkey, amount: u64) -> Pubkey {
    let ata = get_associated_token_address(owner, mint);

    // SPL Token Account layout (165 bytes)
    let mut token_data = vec![0u8; 165];
    token_data[0..32].copy_from_slice(mint.as_ref());
    token_data[32..64].copy_from_slice(owner.as_ref());
    token_data[64..72].copy_from_slice(&amount.to_le_bytes());
    // state = Initialized
    token_data[108] = 1;

    svm.set_account(
        ata,
        Account {
            executable: false,
            data: token_data,
            lamports: INITIAL_LAMPORTS,
            owner: spl_token::ID,
            rent_epoch: 0,
        },
    )
    .unwrap();

    ata
}

// ---------------------------------------------------------------------------
// Swap environment
// ---------------------------------------------------------------------------

/// An offer that `make` created
pub struct OpenOffer {
    pub offer: Pubkey,
    pub vault: Pubkey,
    pub bump: u8,
}

/// The deployed program plus a maker, a taker, and a hacker who holds
/// tokens of both mints but is not part of any trade
pub struct Swap {
    pub svm: LiteSVM,
    pub maker: Keypair,
    pub taker: Keypair,
    pub hacker: Keypair,
    pub maker_mint: Pubkey,
    pub taker_mint: Pubkey,
    pub other_mint: Pubkey,
    pub maker_maker_tokens: Pubkey,
    pub maker_taker_tokens: Pubkey,
    pub taker_maker_tokens: Pubkey,
    pub taker_taker_tokens: Pubkey,
    pub taker_other_tokens: Pubkey,
    pub hacker_maker_tokens: Pubkey,
    pub hacker_taker_tokens: Pubkey,
}

/// Load the built program into a fresh LiteSVM. Returns `None` when the
/// program has not been built, so plain `cargo test` still runs the unit tests.
pub fn setup() -> Option<Swap> {
    let path = program_path();
    if !path.exists() {
        eprintln!(
            "skipping: {} not found, run `anchor build` first",
            path.display()
        );
        return None;
    }

    let mut svm = LiteSVM::new();
    svm.add_program_from_file(quidproquo::ID, &path)
        .expect("program should load");

    let maker = Keypair::new();
    let taker = Keypair::new();
    let hacker = Keypair::new();
    for wallet in [&maker, &taker, &hacker] {
        svm.airdrop(&wallet.pubkey(), INITIAL_LAMPORTS).unwrap();
    }

    let mint_authority = Pubkey::new_unique();
    let maker_mint = create_mint(&mut svm, &mint_authority);
    let taker_mint = create_mint(&mut svm, &mint_authority);
    let other_mint = create_mint(&mut svm, &mint_authority);

    let maker_maker_tokens =
        create_token_account(&mut svm, &maker_mint, &maker.pubkey(), STARTING_BALANCE);
    let maker_taker_tokens = create_token_account(&mut svm, &taker_mint, &maker.pubkey(), 0);
    let taker_maker_tokens = create_token_account(&mut svm, &maker_mint, &taker.pubkey(), 0);
    let taker_taker_tokens =
        create_token_account(&mut svm, &taker_mint, &taker.pubkey(), STARTING_BALANCE);
    let taker_other_tokens =
        create_token_account(&mut svm, &other_mint, &taker.pubkey(), STARTING_BALANCE);
    let hacker_maker_tokens =
        create_token_account(&mut svm, &maker_mint, &hacker.pubkey(), STARTING_BALANCE);
    let hacker_taker_tokens = create_token_account(&mut svm, &taker_mint, &hacker.pubkey(), 0);

    Some(Swap {
        svm,
        maker,
        taker,
        hacker,
        maker_mint,
        taker_mint,
        other_mint,
        maker_maker_tokens,
        maker_taker_tokens,
        taker_maker_tokens,
        taker_taker_tokens,
        taker_other_tokens,
        hacker_maker_tokens,
        hacker_taker_tokens,
    })
}

impl Swap {
    pub fn make(&mut self, offer: &Keypair, bump: u8, maker_amount: u64, taker_amount: u64) -> TxResult {
        let (vault, _) = derive_vault(&quidproquo::ID, &offer.pubkey()).unwrap();
        let ix = Instruction {
            program_id: quidproquo::ID,
            accounts: quidproquo::accounts::Make {
                offer: offer.pubkey(),
                maker: self.maker.pubkey(),
                maker_source_tokens: self.maker_maker_tokens,
                vault,
                maker_mint: self.maker_mint,
                taker_mint: self.taker_mint,
                token_program: spl_token::ID,
                system_program: system_program::ID,
                rent: sysvar::rent::ID,
            }
            .to_account_metas(None),
            data: quidproquo::instruction::Make {
                vault_authority_bump: bump,
                maker_amount,
                taker_amount,
            }
            .data(),
        };

        send_tx(&mut self.svm, &[ix], &[&self.maker, offer])
    }

    /// Make an offer that is expected to succeed
    pub fn make_offer(&mut self, maker_amount: u64, taker_amount: u64) -> OpenOffer {
        let offer = Keypair::new();
        let (vault, bump) = derive_vault(&quidproquo::ID, &offer.pubkey()).unwrap();
        self.make(&offer, bump, maker_amount, taker_amount)
            .expect("make should succeed");

        OpenOffer {
            offer: offer.pubkey(),
            vault,
            bump,
        }
    }

    /// Honest accounts for the taker accepting `open`
    pub fn accept_accounts(&self, open: &OpenOffer) -> quidproquo::accounts::Accept {
        quidproquo::accounts::Accept {
            offer: open.offer,
            vault: open.vault,
            maker: self.maker.pubkey(),
            maker_taker_tokens: self.maker_taker_tokens,
            taker: self.taker.pubkey(),
            taker_maker_tokens: self.taker_maker_tokens,
            taker_taker_tokens: self.taker_taker_tokens,
            taker_mint: self.taker_mint,
            token_program: spl_token::ID,
        }
    }

    pub fn accept_with(&mut self, accounts: quidproquo::accounts::Accept) -> TxResult {
        let ix = Instruction {
            program_id: quidproquo::ID,
            accounts: accounts.to_account_metas(None),
            data: quidproquo::instruction::Accept {}.data(),
        };

        send_tx(&mut self.svm, &[ix], &[&self.taker])
    }

    pub fn accept(&mut self, open: &OpenOffer) -> TxResult {
        let accounts = self.accept_accounts(open);
        self.accept_with(accounts)
    }

    pub fn cancel(&mut self, open: &OpenOffer) -> TxResult {
        let ix = Instruction {
            program_id: quidproquo::ID,
            accounts: quidproquo::accounts::Cancel {
                offer: open.offer,
                vault: open.vault,
                maker_destination_tokens: self.maker_maker_tokens,
                maker: self.maker.pubkey(),
                token_program: spl_token::ID,
            }
            .to_account_metas(None),
            data: quidproquo::instruction::Cancel {}.data(),
        };

        send_tx(&mut self.svm, &[ix], &[&self.maker])
    }

    /// Send maker-mint tokens from the hacker straight into a vault
    pub fn donate(&mut self, vault: &Pubkey, amount: u64) -> TxResult {
        let ix = spl_token::instruction::transfer(
            &spl_token::ID,
            &self.hacker_maker_tokens,
            vault,
            &self.hacker.pubkey(),
            &[],
            amount,
        )
        .unwrap();

        send_tx(&mut self.svm, &[ix], &[&self.hacker])
    }

    pub fn balance(&self, token_account: &Pubkey) -> u64 {
        let account = self
            .svm
            .get_account(token_account)
            .expect("token account should exist");
        u64::from_le_bytes(account.data[64..72].try_into().unwrap())
    }

    pub fn exists(&self, address: &Pubkey) -> bool {
        self.svm
            .get_account(address)
            .is_some_and(|account| account.lamports > 0)
    }

    pub fn offer(&self, address: &Pubkey) -> Offer {
        let account = self.svm.get_account(address).expect("offer should exist");
        Offer::try_deserialize(&mut account.data.as_slice()).expect("offer should decode")
    }
}

// PDA Seeds

/// Seed for vault PDAs: ["vault", offer.key()]
/// The vault is its own token authority, so these seeds (plus the stored bump)
/// are what lets the program sign transfers out of it
pub const VAULT_SEED: &[u8] = b"vault";

// Account Space Constants

/// Anchor discriminator size (8 bytes)
pub const ANCHOR_DISCRIMINATOR: usize = 8;

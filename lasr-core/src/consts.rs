//! Protocol constants shared by every LASR crate.

/// Number of decimal places in the ledger's native unit
pub const DECIMALS: u32 = 18;

/// Width of an encoded 256-bit value in hex digits (32 bytes)
pub const HEX_WIDTH: usize = 64;

/// Length of an address in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// Namespace literal the runtime resolves to the calling program's own address
pub const THIS: &str = "this";

/// Namespace literal for the canonical null/burn address
pub const ZERO: &str = "zero";

/// Alternate spelling of [`ZERO`] accepted on input
pub const ZERO_VALUE: &str = "zero-value";

/// Address of the native ETH program
pub const ETH_PROGRAM_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Upper bound on ids generated for a single non-fungible distribution
pub const MAX_DISTRIBUTION_IDS: u64 = 10_000;

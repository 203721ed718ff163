pub mod builders;
pub mod fields;
pub mod instruction;
pub mod outputs;
pub mod updates;

// Re-export the main types for convenience
pub use builders::{
    build_burn_instruction, build_create_instruction, build_mint_instructions,
    build_program_data_update_instruction, build_program_metadata_update_instruction,
    build_program_update_field, build_token_distribution_instruction,
    build_token_metadata_update_instruction, build_token_update_field,
    build_transfer_instruction, build_update_instruction, BurnInstructionArgs,
    CreateInstructionArgs, MintInstructionArgs, TokenDistributionArgs, TransferInstructionArgs,
    UpdateInstructionBuilder,
};
pub use fields::{
    ApprovalsUpdate, LinkedProgramsUpdate, MapUpdate, ProgramField, ProgramFieldValue,
    ProgramUpdateField, StatusUpdate, TokenField, TokenFieldValue, TokenIdUpdate,
    TokenUpdateField, UpdateAction,
};
pub use instruction::{
    BurnInstruction, CreateInstruction, Instruction, LogInstruction, TokenDistribution,
    TransferInstruction, UpdateInstruction,
};
pub use outputs::Outputs;
pub use updates::{ProgramUpdate, TokenOrProgramUpdate, TokenUpdate};

use lasr_core::{ComputeInputs, LasrError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::instruction::Instruction;

/// What a program call hands back to the runtime: the call it answered and
/// the instructions to apply, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outputs {
    compute_inputs: ComputeInputs,
    instructions: Vec<Instruction>,
}

impl Outputs {
    pub fn new(compute_inputs: ComputeInputs, instructions: Vec<Instruction>) -> Self {
        Self {
            compute_inputs,
            instructions,
        }
    }

    pub fn compute_inputs(&self) -> &ComputeInputs {
        &self.compute_inputs
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// `{"computeInputs": ..., "instructions": [...]}`
    pub fn to_json(&self) -> Result<Value, LasrError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialized payload, as written back to the runtime
    pub fn to_json_string(&self) -> Result<String, LasrError> {
        Ok(serde_json::to_string(self)?)
    }
}

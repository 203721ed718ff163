use std::collections::BTreeMap;
use std::sync::Arc;

use lasr_core::{ComputeInputs, LasrError};
use lasr_instructions::Outputs;
use log::{debug, error, info};

use crate::base;

/// Error returned when a program call fails
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("Unknown method: '{0}'")]
    UnknownMethod(String),

    #[error(transparent)]
    Sdk(#[from] LasrError),

    /// Ad-hoc validation raised by a program method
    #[error("Program error: {0}")]
    Context(#[from] anyhow::Error),
}

/// Trait for one operation a program answers.
///
/// Plain functions and closures taking `&ComputeInputs` implement it.
pub trait ProgramMethod: Send + Sync {
    fn call(&self, inputs: &ComputeInputs) -> Result<Outputs, ProgramError>;
}

impl<F> ProgramMethod for F
where
    F: Fn(&ComputeInputs) -> Result<Outputs, ProgramError> + Send + Sync,
{
    fn call(&self, inputs: &ComputeInputs) -> Result<Outputs, ProgramError> {
        self(inputs)
    }
}

/// A program: a name plus the operations it answers, keyed by op name.
///
/// Token standards are built by registering extra methods on a program
/// rather than by wrapping it.
#[derive(Clone)]
pub struct Program {
    name: String,
    methods: BTreeMap<String, Arc<dyn ProgramMethod>>,
}

impl Program {
    /// Create a program answering the base `create` and `update` operations
    pub fn new(name: impl Into<String>) -> Self {
        Self::empty(name)
            .with_method("create", base::create)
            .with_method("update", base::update)
    }

    /// Create a program that answers nothing
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `method` under `op`, replacing any earlier registration
    pub fn with_method(mut self, op: impl Into<String>, method: impl ProgramMethod + 'static) -> Self {
        self.register_method(op, method);
        self
    }

    /// Register `method` under `op`; returns true when an earlier method was replaced
    pub fn register_method(
        &mut self,
        op: impl Into<String>,
        method: impl ProgramMethod + 'static,
    ) -> bool {
        let op = op.into();
        debug!("Program {}: registering method '{}'", self.name, op);
        self.methods.insert(op, Arc::new(method)).is_some()
    }

    pub fn has_method(&self, op: &str) -> bool {
        self.methods.contains_key(op)
    }

    /// Names of every operation this program answers, sorted
    pub fn methods(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).collect()
    }

    /// Dispatch a decoded call to the method named by its op
    pub fn start(&self, inputs: &ComputeInputs) -> Result<Outputs, ProgramError> {
        let op = inputs.operation();
        let method = self
            .methods
            .get(op)
            .ok_or_else(|| ProgramError::UnknownMethod(op.to_string()))?;

        info!("Program {}: running '{}' for {}", self.name, op, inputs.transaction.from);
        let outputs = method.call(inputs)?;
        debug!(
            "Program {}: '{}' produced {} instructions",
            self.name,
            op,
            outputs.instructions().len()
        );
        Ok(outputs)
    }

    /// Answer one raw call payload with the serialized outputs
    pub fn handle(&self, raw: &str) -> Result<String, ProgramError> {
        let result = ComputeInputs::from_json(raw)
            .map_err(ProgramError::from)
            .and_then(|inputs| self.start(&inputs))
            .and_then(|outputs| outputs.to_json_string().map_err(ProgramError::from));

        if let Err(e) = &result {
            error!("Program {}: call failed: {}", self.name, e);
        }
        result
    }
}

impl std::fmt::Debug for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("name", &self.name)
            .field("methods", &self.methods())
            .finish()
    }
}

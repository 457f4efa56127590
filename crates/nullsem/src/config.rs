/// Options for a [`Pipeline`](crate::Pipeline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// What to do when a predicate references parameters but no parameter
    /// values were supplied.
    pub unbound_parameters: UnboundParameters,

    /// Run the boolean-constant pruning pass.
    pub prune_constants: bool,

    /// Run the boolean equality expansion pass.
    pub expand_equality: bool,
}

/// Policy for predicates compiled before parameter values are known.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UnboundParameters {
    /// Expand null semantics treating every parameter as possibly null.
    #[default]
    AssumeNullable,

    /// Skip the null-semantics expansion. The caller is expected to rewrite
    /// the predicate again once parameter values are available.
    Defer,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy for predicates compiled without parameter values.
    pub fn unbound_parameters(mut self, policy: UnboundParameters) -> Self {
        self.unbound_parameters = policy;
        self
    }

    /// Enable or disable boolean-constant pruning.
    pub fn prune_constants(mut self, enabled: bool) -> Self {
        self.prune_constants = enabled;
        self
    }

    /// Enable or disable boolean equality expansion.
    pub fn expand_equality(mut self, enabled: bool) -> Self {
        self.expand_equality = enabled;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unbound_parameters: UnboundParameters::default(),
            prune_constants: true,
            expand_equality: true,
        }
    }
}

use eventcanon_protocol::Event;

/// Why an event was not forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The event carried no name.
    MissingName,
    /// The name is not on the domain allowlist.
    NotAllowlisted,
    /// No enabled rule produced a new name.
    NoRuleMatched,
}

impl DropReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::MissingName => "missing_name",
            DropReason::NotAllowlisted => "not_allowlisted",
            DropReason::NoRuleMatched => "no_rule_matched",
        }
    }
}

/// Decision reached for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Emit,
    Drop(DropReason),
}

/// Record of how the rule scan treated an event.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutcome {
    pub decision: Decision,
    /// Rules whose action produced a name, in scan order.
    pub applied_rules: Vec<String>,
    /// Rules whose guard held but whose action produced no name.
    pub unresolved_rules: Vec<String>,
}

impl TransformOutcome {
    pub fn new() -> Self {
        Self {
            decision: Decision::Drop(DropReason::NoRuleMatched),
            applied_rules: Vec::new(),
            unresolved_rules: Vec::new(),
        }
    }

    pub fn dropped(reason: DropReason) -> Self {
        Self {
            decision: Decision::Drop(reason),
            ..Self::new()
        }
    }

    pub fn record_rule(&mut self, id: impl Into<String>) {
        self.applied_rules.push(id.into());
        self.decision = Decision::Emit;
    }

    pub fn record_unresolved(&mut self, id: impl Into<String>) {
        self.unresolved_rules.push(id.into());
    }

    pub fn should_emit(&self) -> bool {
        matches!(self.decision, Decision::Emit)
    }

    pub fn drop_reason(&self) -> Option<DropReason> {
        match self.decision {
            Decision::Emit => None,
            Decision::Drop(reason) => Some(reason),
        }
    }
}

impl Default for TransformOutcome {
    fn default() -> Self {
        Self::new()
    }
}

/// Result handed back to the pipeline for one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Forward this (renamed) event.
    Transformed(Event),
    /// Do not forward. Not an error.
    Dropped(DropReason),
}

impl Verdict {
    pub fn into_event(self) -> Option<Event> {
        match self {
            Verdict::Transformed(event) => Some(event),
            Verdict::Dropped(_) => None,
        }
    }

    pub fn event_name(&self) -> Option<&str> {
        match self {
            Verdict::Transformed(event) => event.name(),
            Verdict::Dropped(_) => None,
        }
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, Verdict::Dropped(_))
    }
}

//! Caller actions and what happens when one reports a change.

use std::fmt;

use sweep_core::events::types::ValueProcessedEvent;

use super::context::{FieldCursor, OwnerNode};
use super::Traversal;
use crate::model::{AssetHandle, DirtyTarget, Value};

/// Caller-supplied action run on every discovered target value.
///
/// Returning `true` means the value was changed (or accepted) and its owner
/// must be persisted.
pub enum Action<'a> {
    /// Sees only the value.
    Simple(Box<dyn FnMut(&mut Value) -> bool + 'a>),
    /// Sees the value together with where it was found.
    Detailed(Box<dyn FnMut(&mut Visit<'_>) -> bool + 'a>),
}

impl<'a> Action<'a> {
    pub fn simple(f: impl FnMut(&mut Value) -> bool + 'a) -> Self {
        Action::Simple(Box::new(f))
    }

    pub fn detailed(f: impl FnMut(&mut Visit<'_>) -> bool + 'a) -> Self {
        Action::Detailed(Box::new(f))
    }
}

impl fmt::Debug for Action<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Simple(_) => f.write_str("Action::Simple"),
            Action::Detailed(_) => f.write_str("Action::Detailed"),
        }
    }
}

/// A discovered value plus the cursor state at the moment it was found.
pub struct Visit<'v> {
    pub value: &'v mut Value,
    pub file_path: Option<&'v str>,
    pub asset: Option<&'v AssetHandle>,
    pub owner: Option<&'v OwnerNode>,
    pub field: Option<&'v FieldCursor>,
}

impl fmt::Display for Visit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path: {}", self.file_path.unwrap_or("N/A"))?;
        match self.owner {
            Some(owner) => {
                writeln!(f, "Location in hierarchy: {}", owner.hierarchy)?;
                writeln!(f, "Component type: {}", owner.component_type)?;
            }
            None => {
                writeln!(f, "Location in hierarchy: N/A")?;
                writeln!(f, "Component type: N/A")?;
            }
        }
        match self.field {
            Some(field) => write!(f, "Field: {}", field.name),
            None => write!(f, "Field: N/A"),
        }
    }
}

impl Traversal<'_> {
    /// Hand `value` to the action. On `true`: log, emit, and mark the owning
    /// component dirty when it is known.
    pub(crate) fn perform_action(&mut self, value: &mut Value) -> bool {
        let processed = match &mut self.action {
            Action::Simple(f) => f(value),
            Action::Detailed(f) => {
                let mut visit = Visit {
                    value: &mut *value,
                    file_path: self.context.file_path(),
                    asset: self.context.asset(),
                    owner: self.context.owner(),
                    field: self.context.field(),
                };
                f(&mut visit)
            }
        };

        if !processed {
            return false;
        }

        self.stats.values_processed += 1;

        let file_path = self.context.file_path().map(str::to_string);
        let hierarchy = self.context.owner().map(|o| o.hierarchy.clone());
        let field = self.context.field().map(|f| f.name.clone());
        let rendered = value.display(self.registry).to_string();

        let mut message = String::from("Processed");
        if let Some(path) = &file_path {
            message.push_str("\nFile path: ");
            message.push_str(path);
        }
        message.push('\n');
        message.push_str(&rendered);
        if let Some(h) = &hierarchy {
            message.push_str("\nHierarchy: ");
            message.push_str(h);
        }
        if let Some(name) = &field {
            message.push_str("\nField name: ");
            message.push_str(name);
        }
        tracing::info!("{message}");

        self.events.emit_value_processed(&ValueProcessedEvent {
            file_path,
            hierarchy,
            field,
            value: rendered,
        });

        if let Some(owner) = self.context.owner() {
            let target = DirtyTarget::Component {
                asset_path: self.context.file_path().map(str::to_string),
                hierarchy: owner.hierarchy.clone(),
                component_type: owner.component_type.clone(),
            };
            self.mark_dirty(target);
        }

        true
    }
}

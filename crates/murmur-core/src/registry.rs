use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::surface::{Invocation, Surface};

/// One command handler. Handlers return `Err` freely; the gate converts
/// failures into a generic user-visible notice.
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn description(&self) -> &'static str;

    async fn run(&self, invocation: &Invocation, surface: &dyn Surface) -> anyhow::Result<()>;
}

/// Command lookup table, built once at startup and shared by reference.
/// Exact names win over aliases.
#[derive(Default)]
pub struct CommandRegistry {
    ordered: Vec<Arc<dyn Command>>,
    by_name: HashMap<String, Arc<dyn Command>>,
    by_alias: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        if self
            .by_name
            .insert(command.name().to_string(), Arc::clone(&command))
            .is_some()
        {
            tracing::warn!(command = command.name(), "command registered twice");
        }
        for alias in command.aliases() {
            self.by_alias
                .insert((*alias).to_string(), Arc::clone(&command));
        }
        self.ordered.push(command);
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.by_name
            .get(name)
            .or_else(|| self.by_alias.get(name))
            .cloned()
    }

    pub fn commands(&self) -> &[Arc<dyn Command>] {
        &self.ordered
    }
}

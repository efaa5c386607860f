mod chat;
mod clear_memory;
mod help;

pub use chat::ChatCommand;
pub use clear_memory::ClearMemoryCommand;
pub use help::HelpCommand;

use std::sync::Arc;

use murmur_provider::GeminiClient;
use murmur_store::ChatStore;

use crate::registry::CommandRegistry;

/// Builds the full command set. Called once at startup; the registry is
/// shared by reference from then on.
pub fn build_registry(
    store: ChatStore,
    client: GeminiClient,
    style: String,
    prefix: String,
) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(ChatCommand::new(store.clone(), client, style)));
    registry.register(Arc::new(ClearMemoryCommand::new(store)));
    registry.register(Arc::new(HelpCommand::new(prefix)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_the_three_commands_and_alias() {
        let store = ChatStore::open_in_memory().unwrap();
        let registry = build_registry(
            store,
            GeminiClient::new("test-key"),
            String::new(),
            "!".to_string(),
        );

        assert!(registry.resolve("chat").is_some());
        assert!(registry.resolve("clear_memory").is_some());
        assert!(registry.resolve("cm").is_some());
        assert!(registry.resolve("help").is_some());
        assert_eq!(registry.commands().len(), 3);
    }
}

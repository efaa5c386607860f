use async_trait::async_trait;
use murmur_schema::{Notice, NoticeKind};

use crate::registry::Command;
use crate::surface::{Invocation, Surface};

pub struct HelpCommand {
    prefix: String,
}

impl HelpCommand {
    pub fn new(prefix: String) -> Self {
        Self { prefix }
    }

    fn body(&self) -> String {
        let p = &self.prefix;
        format!(
            "🤖 **Chat** — `{p}chat` or `/chat`: talk to the bot; it remembers your conversation\n\
             🗑️ **Clear memory** — `{p}cm` or `/clear_memory`: delete your conversation history\n\
             ❓ **Help** — `{p}help` or `/help`: show this list"
        )
    }
}

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "Show the command list"
    }

    async fn run(&self, _invocation: &Invocation, surface: &dyn Surface) -> anyhow::Result<()> {
        surface
            .send_notice(&Notice::titled(NoticeKind::Info, "📚 Commands", self.body()))
            .await
    }
}

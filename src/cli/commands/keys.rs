use anyhow::Result;

use super::super::args::KeysCommand;
use super::{CommandResult, CommandSummary, KeysSummary, helper::finish};
use crate::core::ProjectContext;

pub fn keys(cmd: KeysCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common.path, &cmd.common.overrides())?;
    let resolver = ctx.resolver()?;

    let mut keys = resolver.keys()?;
    if let Some(prefix) = &cmd.prefix {
        keys.retain(|k| k.key.starts_with(prefix.as_str()));
    }

    let summary = KeysSummary {
        locale: resolver.locale().unwrap_or_default(),
        tiers: resolver.tiers().to_vec(),
        keys,
    };
    Ok(finish(CommandSummary::Keys(summary), Vec::new()))
}

use std::fmt::Display;

use anyhow::Result;

use super::super::args::GetCommand;
use super::{CommandResult, CommandSummary, GetSummary, helper::finish};
use crate::core::ProjectContext;

pub fn get(cmd: GetCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common.path, &cmd.common.overrides())?;
    let resolver = ctx.resolver()?;

    let summary = match resolver.lookup(&cmd.key) {
        Ok(resolved) => {
            let value = if cmd.args.is_empty() {
                resolved.value.clone()
            } else {
                let args: Vec<&dyn Display> = cmd.args.iter().map(|a| a as &dyn Display).collect();
                resolved.format(&args)
            };
            GetSummary {
                key: cmd.key,
                value: Some(value),
                resolved: Some(resolved),
                error: None,
                show_source: cmd.show_source,
            }
        }
        Err(err) if err.is_not_found() => GetSummary {
            key: cmd.key,
            value: None,
            resolved: None,
            error: Some(err.to_string()),
            show_source: cmd.show_source,
        },
        Err(err) => return Err(err.into()),
    };

    Ok(finish(CommandSummary::Get(summary), Vec::new()))
}

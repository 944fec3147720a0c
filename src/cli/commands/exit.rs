//! `exit` command: leave the console.

use anyhow::Result;

use crate::core::arguments::ArgumentList;
use crate::core::tree::{CommandDef, Invocation};
use crate::engine::Context;

pub fn definition() -> CommandDef {
    CommandDef::leaf(
        "exit",
        "Leave the console",
        "exit",
        ArgumentList::empty(),
        exit,
    )
}

fn exit(ctx: &mut Context, _call: &Invocation<'_>) -> Result<()> {
    ctx.exit_requested = true;
    Ok(())
}

use anyhow::Context;
use hyrax_core::Persister;
use hyrax_transactions::{StepArgs, Transaction};

use crate::cli::{GlobalFlags, TransactionArgs};
use crate::context::AppContext;
use crate::fixture::ObjectFixture;
use crate::output::output;

pub fn handle(args: &TransactionArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let transaction = Transaction::named(&args.name, &ctx.container)?;
    let step_args = parse_step_args(args.args.as_deref())?;

    let fixture = ObjectFixture::read(&args.fixture)?;
    let persisted = fixture.persisted;
    let mut object = fixture.into_object()?;
    let mut work = ctx.transformer.build(&mut object)?;

    // update and destroy operate on stored works; seed the in-memory store.
    if persisted {
        work = ctx.resources.save(&work)?;
    }

    let work = transaction.call(work, &step_args)?;
    output(&work, flags.format)
}

fn parse_step_args(raw: Option<&str>) -> anyhow::Result<StepArgs> {
    let Some(raw) = raw else {
        return Ok(StepArgs::new());
    };
    let value: serde_json::Value = serde_json::from_str(raw).context("--args is not valid JSON")?;
    let serde_json::Value::Object(map) = value else {
        anyhow::bail!("--args must be a JSON object keyed by step key");
    };
    Ok(map
        .into_iter()
        .fold(StepArgs::new(), |args, (key, value)| args.with(key, value)))
}

use crate::cli::{GlobalFlags, TransformArgs};
use crate::context::AppContext;
use crate::fixture::ObjectFixture;
use crate::output::output;

pub fn handle(args: &TransformArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut object = ObjectFixture::read(&args.fixture)?.into_object()?;
    let resource = ctx.transformer.build(&mut object)?;
    output(&resource, flags.format)
}

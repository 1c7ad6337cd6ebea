use std::sync::Arc;

use anyhow::Context;
use hyrax_core::JobReceipt;
use hyrax_core::enums::PersistenceMode;
use hyrax_services::{
    ChannelJobQueue, FileActor, FileActorServices, IngestOutcome, JobIoWrapper,
};
use serde_json::json;
use tokio::sync::mpsc;

use crate::cli::{GlobalFlags, IngestArgs};
use crate::context::AppContext;
use crate::fixture::ObjectFixture;
use crate::output::output;

pub async fn handle(args: &IngestArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let file_set = ObjectFixture::read(&args.fixture)?.into_object()?;
    let io = JobIoWrapper::from_path(&args.file, args.mime_type.as_str())
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    if ctx.config.persistence.mode == PersistenceMode::Legacy {
        ctx.legacy.insert(file_set.clone());
    }

    let (queue, receiver) = ChannelJobQueue::channel();
    let worker = tokio::spawn(characterization_worker(receiver));

    // The actor owns the only sender; dropping it at the end of this block
    // closes the channel so the worker can finish.
    let outcome = {
        let services = FileActorServices {
            legacy_store: ctx.legacy.clone(),
            node_builder: ctx.node_builder(),
            versioning: ctx.versioning(),
            job_queue: Arc::new(queue),
        };
        let mut actor = FileActor::new(
            file_set,
            args.relation.as_str(),
            args.user.as_str(),
            ctx.actor_settings(),
            services,
        )?;
        let outcome = actor.ingest_file(&io);
        tracing::info!(state = %actor.state(), "ingest finished");
        outcome?
    };

    let characterized = worker.await.context("characterization worker panicked")?;

    let stored = match &outcome {
        IngestOutcome::Attached { file_id, .. } => json!({ "file_id": file_id }),
        IngestOutcome::Stored { node, .. } => json!({ "node": node }),
    };
    output(
        &json!({
            "mode": ctx.config.persistence.mode,
            "stored": stored,
            "versions": ctx.committer.all(),
            "characterized": characterized,
        }),
        flags.format,
    )
}

/// Drain characterization jobs until every queue handle is dropped.
async fn characterization_worker(mut receiver: mpsc::UnboundedReceiver<JobReceipt>) -> Vec<JobReceipt> {
    let mut handled = Vec::new();
    while let Some(receipt) = receiver.recv().await {
        tracing::info!(job_id = %receipt.job_id, job = receipt.job.name(), "characterizing");
        handled.push(receipt);
    }
    handled
}

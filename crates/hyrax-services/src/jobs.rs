//! Job queues for characterization follow-ups.
//!
//! [`MemoryJobQueue`] keeps jobs for inspection. [`ChannelJobQueue`] hands
//! them to an async worker over a tokio channel; the worker is the caller's.

use std::sync::atomic::{AtomicU64, Ordering};

use hyrax_core::{Job, JobQueue, JobReceipt, PersistError};
use parking_lot::Mutex;
use tokio::sync::mpsc;

fn next_job_id(counter: &AtomicU64) -> String {
    format!("job-{}", counter.fetch_add(1, Ordering::SeqCst) + 1)
}

#[derive(Debug, Default)]
pub struct MemoryJobQueue {
    enqueued: Mutex<Vec<JobReceipt>>,
    counter: AtomicU64,
}

impl MemoryJobQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn jobs(&self) -> Vec<Job> {
        self.enqueued.lock().iter().map(|r| r.job.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.enqueued.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enqueued.lock().is_empty()
    }
}

impl JobQueue for MemoryJobQueue {
    fn perform_later(&self, job: Job) -> Result<JobReceipt, PersistError> {
        let receipt = JobReceipt {
            job_id: next_job_id(&self.counter),
            job,
        };
        self.enqueued.lock().push(receipt.clone());
        Ok(receipt)
    }
}

#[derive(Debug)]
pub struct ChannelJobQueue {
    sender: mpsc::UnboundedSender<JobReceipt>,
    counter: AtomicU64,
}

impl ChannelJobQueue {
    /// A queue and the receiving end a worker should drain.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<JobReceipt>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender,
                counter: AtomicU64::new(0),
            },
            receiver,
        )
    }
}

impl JobQueue for ChannelJobQueue {
    fn perform_later(&self, job: Job) -> Result<JobReceipt, PersistError> {
        let receipt = JobReceipt {
            job_id: next_job_id(&self.counter),
            job,
        };
        self.sender
            .send(receipt.clone())
            .map_err(|_| PersistError::Queue("job worker has shut down".into()))?;
        tracing::debug!(job_id = %receipt.job_id, job = receipt.job.name(), "enqueued job");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use hyrax_core::Id;
    use pretty_assertions::assert_eq;

    use super::*;

    fn characterize(n: u32) -> Job {
        Job::Characterize {
            file_set_id: Id::new("fs-1"),
            file_id: Id::new(format!("file-{n}")),
            path_hint: None,
        }
    }

    #[test]
    fn memory_queue_keeps_jobs_in_order() {
        let queue = MemoryJobQueue::new();
        let first = queue.perform_later(characterize(1)).unwrap();
        queue.perform_later(characterize(2)).unwrap();

        assert_eq!(first.job_id, "job-1");
        assert_eq!(queue.jobs(), vec![characterize(1), characterize(2)]);
    }

    #[tokio::test]
    async fn channel_queue_delivers_to_worker() {
        let (queue, mut receiver) = ChannelJobQueue::channel();
        let worker = tokio::spawn(async move {
            let mut seen = Vec::new();
            while let Some(receipt) = receiver.recv().await {
                seen.push(receipt.job);
            }
            seen
        });

        queue.perform_later(characterize(1)).unwrap();
        queue.perform_later(characterize(2)).unwrap();
        drop(queue);

        let seen = worker.await.unwrap();
        assert_eq!(seen, vec![characterize(1), characterize(2)]);
    }

    #[test]
    fn closed_channel_is_a_queue_error() {
        let (queue, receiver) = ChannelJobQueue::channel();
        drop(receiver);

        let err = queue.perform_later(characterize(1)).unwrap_err();
        assert!(matches!(err, PersistError::Queue(_)));
    }
}

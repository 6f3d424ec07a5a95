use super::RunContext;
use crate::Result;
use crate::process::InvocationResult;
use crate::reports::ProgressReporter;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use futures_util::StreamExt;
use futures_util::stream;

/// How long a per-file run must last before its progress bar appears.
const PROGRESS_DELAY: Duration = Duration::from_millis(300);

/// Run one command per file, keeping up to `ctx.jobs` of them in flight.
///
/// `on_result` is called once per file, in the order of `files`, regardless of the order in
/// which the invocations finish.
pub async fn dispatch_each<B, F>(ctx: &RunContext, phase: &str, files: &[Utf8PathBuf], build: B, mut on_result: F)
where
    B: Fn(&Utf8Path) -> Vec<String>,
    F: FnMut(&Utf8Path, Result<InvocationResult>),
{
    let progress = ctx.show_progress.then(|| {
        let total = u64::try_from(files.len()).unwrap_or(u64::MAX);
        ProgressReporter::new(phase, total, PROGRESS_DELAY, ctx.use_colors)
    });

    let dispatcher = ctx.dispatcher;
    let mut results = stream::iter(files.iter().map(|file| {
        let command = build(file);
        async move { (file.as_path(), dispatcher.dispatch(command).await) }
    }))
    .buffered(ctx.jobs.get());

    while let Some((file, result)) = results.next().await {
        match &progress {
            Some(progress) => {
                progress.advance();
                progress.suspend(|| on_result(file, result));
            }
            None => on_result(file, result),
        }
    }

    if let Some(progress) = progress {
        progress.done();
    }
}

use crate::core::confirm;
use crate::core::pattern::EntryMatcher;
use crate::domain::models::{ConfirmAnswer, ConfirmState, ScanConfig, ScanSummary};
use crate::infra::file_system::{remove_entry, stream_entries};
use anyhow::Result;
use log::{debug, info, warn};
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::path::Path;

/// Streams the target directory and feeds every matching entry to the
/// per-entry action. Entries are handled one at a time; nothing is ever
/// collected.
///
/// The limit counts entries examined, matched or not, so a scan with
/// `limit = k` looks at the first `k` entries the filesystem hands back and
/// forwards only the matching ones. A `quit` answer stops the loop and
/// drops the stream, which releases the directory handle.
pub fn run_scan(
    config: &ScanConfig,
    matcher: &EntryMatcher,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<ScanSummary> {
    let mut state = ConfirmState::default();
    let mut summary = ScanSummary::default();

    for entry in stream_entries(&config.directory, config.limit) {
        summary.considered += 1;

        let name = entry.file_name().to_string_lossy().into_owned();
        if !matcher.is_match(&name) {
            continue;
        }
        summary.matched += 1;

        let flow = dispatch_entry(
            &name,
            entry.path(),
            config,
            &mut state,
            &mut summary,
            input,
            output,
        )?;
        if flow.is_break() {
            info!("Scan stopped by user after {} entries", summary.considered);
            break;
        }
    }

    debug!(
        "Scan finished: {} considered, {} matched, {} deleted",
        summary.considered, summary.matched, summary.deleted
    );
    Ok(summary)
}

/// Applies the configured action to one matched entry.
fn dispatch_entry(
    name: &str,
    path: &Path,
    config: &ScanConfig,
    state: &mut ConfirmState,
    summary: &mut ScanSummary,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<ControlFlow<()>> {
    if !config.delete {
        writeln!(output, "{name}")?;
        return Ok(ControlFlow::Continue(()));
    }

    // The directory links themselves are never deletion targets.
    if name == "." || name == ".." {
        return Ok(ControlFlow::Continue(()));
    }

    if !config.force && !state.auto_confirm_all {
        match confirm::ask(name, input, output)? {
            ConfirmAnswer::Yes => {}
            ConfirmAnswer::No => return Ok(ControlFlow::Continue(())),
            ConfirmAnswer::All => state.auto_confirm_all = true,
            ConfirmAnswer::Quit => return Ok(ControlFlow::Break(())),
        }
    }

    match remove_entry(path) {
        Ok(()) => {
            writeln!(output, "deleting {name}")?;
            summary.deleted += 1;
        }
        Err(err) => warn!("Failed to delete {}: {err}", path.display()),
    }
    Ok(ControlFlow::Continue(()))
}

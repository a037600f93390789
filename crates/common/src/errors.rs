//! Error chain formatting shared by the CLI error hook and the scenario runner.

use std::error::Error;

/// The messages of `error` and its sources, outermost first.
///
/// A cause whose message is already part of the one before it is dropped, so a revert wrapped as
/// `failed to deploy FundMe: insufficient funds` isn't followed by `insufficient funds` again.
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut messages: Vec<String> = Vec::new();
    let mut next = Some(error);
    while let Some(err) = next {
        let message = err.to_string().trim().to_string();
        if !message.is_empty() && !messages.last().is_some_and(|last| last.contains(&message)) {
            messages.push(message);
        }
        next = err.source();
    }
    messages
}

/// Formats `report` on a single line, causes separated by `; `.
pub fn display_chain(report: &eyre::Report) -> String {
    let error: &(dyn Error + 'static) = report.as_ref();
    dedup_chain(error).join("; ")
}

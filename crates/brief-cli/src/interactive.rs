//! Simple stdin/stdout mode

use brief_flow::{Author, Error as FlowError, Flow, Outcome, Panel, Summary};
use brief_tui::format::bot_plain;
use std::io::{self, Write};

/// Print `label` and read one line; `None` at end of input
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Print bot entries appended since `printed`, returning the new count
fn print_new(flow: &Flow, printed: usize) -> usize {
    let entries = flow.machine().transcript().entries();
    for entry in entries.iter().skip(printed) {
        // User entries are already on screen as typed input
        if entry.author == Author::Bot {
            let text = bot_plain(&entry.text).replace('\n', "\n        ");
            println!("[{}] {}", entry.time_label(), text);
        }
    }
    entries.len()
}

fn print_summary(summary: &Summary) {
    println!();
    for (title, rows) in summary.sections() {
        println!("{}", title);
        for (label, value) in rows {
            println!("  {}: {}", label, value);
        }
    }
    if let Some(notice) = &summary.notice {
        println!();
        println!("{}", notice);
    }
    println!();
}

/// Outcome of one prompt round, or `None` when input ended
async fn next_action(flow: &mut Flow) -> anyhow::Result<Option<Result<Outcome, FlowError>>> {
    let result = match flow.machine().panel() {
        Panel::Chat => {
            let Some(line) = prompt("> ")? else {
                return Ok(None);
            };
            flow.send_message(&line).await
        }
        Panel::Contact => {
            println!("Contact details (all fields required)");
            let mut values = Vec::with_capacity(3);
            for label in ["Name: ", "Email: ", "Phone: "] {
                let Some(value) = prompt(label)? else {
                    return Ok(None);
                };
                values.push(value);
            }
            flow.submit_contact(&values[0], &values[1], &values[2]).await
        }
        Panel::Summary => {
            let Some(notes) = prompt("Additional notes (optional): ")? else {
                return Ok(None);
            };
            flow.complete(&notes).await
        }
    };
    Ok(Some(result))
}

/// Run the conversation on stdin/stdout
pub async fn run_interactive(mut flow: Flow, base_url: &str) -> anyhow::Result<()> {
    if io::IsTerminal::is_terminal(&io::stderr()) {
        eprintln!("brief ({})", base_url);
        eprintln!();
    }

    flow.start().await?;
    let mut printed = print_new(&flow, 0);
    let mut summary_shown = false;

    loop {
        if flow.machine().is_completed() {
            break;
        }

        if !flow.machine().session().is_started() {
            if prompt("Press Enter to retry (Ctrl+D to quit) ")?.is_none() {
                break;
            }
            flow.start().await?;
            printed = print_new(&flow, printed);
            continue;
        }

        // Let presentation timers land before choosing what to ask for
        flow.settle().await;

        if flow.machine().panel() == Panel::Summary && !summary_shown {
            if let Some(summary) = flow.machine().summary() {
                print_summary(summary);
            }
            summary_shown = true;
        }

        match next_action(&mut flow).await? {
            None => break,
            Some(Ok(outcome)) => tracing::debug!("Action finished: {:?}", outcome),
            Some(Err(FlowError::EmptyMessage)) => {}
            Some(Err(e)) => eprintln!("{}", e),
        }
        printed = print_new(&flow, printed);
    }

    if flow.machine().is_completed() {
        if let Some(summary) = flow.machine().summary() {
            print_summary(summary);
        }
    }
    Ok(())
}

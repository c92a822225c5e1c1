use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use tracing::warn;

use word2pdf_batch::utils::logging;
use word2pdf_batch::{spawn_batch, BatchEvent, BatchJob, Config, OverwriteChoice, SofficeService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration, then logging
    let config = Config::load()?;
    logging::init(config.verbose_logging);
    logging::init_session_log(&config.session_log_file)?;

    let inputs: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if inputs.is_empty() {
        eprintln!("usage: word2pdf-batch <file.docx> [more files...]");
        eprintln!("  OUTPUT_DIR        target directory (default: beside each source)");
        eprintln!("  DEFAULT_PASSWORD  password tried first for protected documents");
        std::process::exit(2);
    }

    let job = BatchJob::new(inputs)
        .with_output_dir(env_path("OUTPUT_DIR"))
        .with_default_password(env_string("DEFAULT_PASSWORD"));

    let service = SofficeService::new(&config);
    let mut handle = spawn_batch(job, service);

    // Ctrl-C stops at the next file boundary and wakes any pending prompt.
    let control = handle.control();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("stop requested, finishing the current file...");
            control.stop();
        }
    });

    let mut failed = false;
    while let Some(event) = handle.next_event().await {
        // Progress, labels and outcomes are already logged by the worker;
        // the controller only has to answer questions and track the ending.
        match event {
            BatchEvent::PasswordNeeded { path, .. } => {
                let password =
                    prompt_line(&format!("Password required for {}: ", path.display())).await;
                handle.answer_password(Some(password).filter(|p| !p.is_empty()));
            }
            BatchEvent::OverwriteNeeded {
                output_path,
                pdf_name,
                ..
            } => {
                let reply = prompt_line(&format!(
                    "'{}' already exists at {}. Overwrite? [y/N]: ",
                    pdf_name,
                    output_path
                        .parent()
                        .unwrap_or_else(|| std::path::Path::new("."))
                        .display()
                ))
                .await;
                let choice = if reply.eq_ignore_ascii_case("y") {
                    OverwriteChoice::Yes
                } else {
                    OverwriteChoice::No
                };
                handle.answer_overwrite(choice);
            }
            BatchEvent::FatalError(_) => failed = true,
            BatchEvent::BatchFinished(_) => break,
            _ => {}
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_path(name: &str) -> Option<PathBuf> {
    env_string(name).map(PathBuf::from)
}

/// Reads one line from the terminal without blocking the runtime.
async fn prompt_line(prompt: &str) -> String {
    let prompt = prompt.to_string();
    tokio::task::spawn_blocking(move || {
        eprint!("{prompt}");
        let _ = std::io::stderr().flush();
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        line.trim().to_string()
    })
    .await
    .unwrap_or_default()
}

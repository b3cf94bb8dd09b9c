//! Interactive loop: reads commands while earlier ones are still running.

use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::commands::{Command, HELP};
use crate::error::ExplorerError;
use crate::render;
use crate::session::Session;

/// Read commands from `input` until EOF or `quit`.
///
/// Network-bound commands are queued and polled alongside the input, so a
/// slow analysis does not stop the user from browsing. Pending commands
/// are abandoned on exit.
pub async fn run<R>(session: &Session, input: R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut pending: FuturesUnordered<LocalBoxFuture<'_, ()>> = FuturesUnordered::new();

    println!("{HELP}");
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Empty) => {}
                    Ok(command) => pending.push(dispatch(session, command).boxed_local()),
                    Err(e) => println!("{e}"),
                }
            }
            Some(()) = pending.next(), if !pending.is_empty() => {}
        }
    }

    if !pending.is_empty() {
        tracing::info!("Abandoning {} pending command(s)", pending.len());
    }
    Ok(())
}

/// Carry out one command. Progress and failures are reported through the
/// session's event handlers, so errors are only logged here.
pub async fn dispatch(session: &Session, command: Command) {
    let result = match command {
        Command::User(name) => session.load_archives(&name).await.map(drop),
        Command::Archives => {
            println!("{}", render::archive_list(&session.archive_listing().await.periods));
            Ok(())
        }
        Command::Open(index) => session.open_archive(index).await.map(drop),
        Command::Games => {
            println!("{}", render::game_list(&session.game_listing().await.games));
            Ok(())
        }
        Command::Game(index) => session.select_game(index).await.map(drop),
        Command::Analyze => session.analyze_selected().await.map(drop),
        Command::Next => {
            if session.next_move().await.is_none() {
                println!("No next move.");
            }
            Ok(())
        }
        Command::Previous => {
            if session.previous_move().await.is_none() {
                println!("No previous move.");
            }
            Ok(())
        }
        Command::Board => {
            match session.redraw().await {
                Some(position) => println!("{position}"),
                None => println!("Nothing analyzed yet."),
            }
            Ok(())
        }
        Command::Help => {
            println!("{HELP}");
            Ok(())
        }
        Command::Quit | Command::Empty => Ok(()),
    };

    if let Err(e) = result {
        tracing::debug!("Command failed: {e}");
        if matches!(e, ExplorerError::Selection(_)) {
            println!("{e}");
        }
    }
}

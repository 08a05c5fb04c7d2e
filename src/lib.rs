// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::application::{
    resolve, AiGateway, Authenticator, FlashcardsPage, NotesPage, Route, SessionManager,
    SessionStore, SummariesPage, TagFilter,
};
use crate::cli::args::{Args, Command};
use crate::constants::TOKEN_ENV_VAR;
use crate::domain::{Credentials, DomainError, NoteDraft, NoteEdit, Profile, Session};
use crate::infrastructure::{Config, FileSessionStore, HttpGateway, MemorySessionStore};
use crate::ports::TerminalPresenter;
use crate::util::text::split_tags;

type Sessions = SessionManager<Box<dyn SessionStore>>;

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting smartnotes with arguments");

    // Initialize infrastructure
    let config = Config::resolve(args.config.as_deref())?.with_server_override(args.server);
    debug!(?config, "Resolved configuration");
    let gateway = HttpGateway::new(&config.server.base_url, config.server.timeout())
        .context("Failed to build HTTP client")?;
    let mut sessions = open_sessions(&config)?;

    // Initialize presentation
    let presenter = TerminalPresenter::new();

    info!(server = gateway.base_url(), "Using notes service");
    match args.command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let profile = Profile {
                username,
                email,
                password,
            };
            let message = Authenticator::new(gateway).register(&profile).await?;
            println!("{message}");
        }
        Command::Login { email, password } => {
            let credentials = Credentials { email, password };
            Authenticator::new(gateway)
                .login(&mut sessions, &credentials)
                .await?;
            println!("Logged in.");
        }
        Command::Logout => {
            Authenticator::new(gateway).logout(&mut sessions)?;
            println!("Logged out.");
        }
        Command::List { search, tag, json } => {
            let session = guard(&sessions, Route::Notes)?;
            let mut page = NotesPage::new(gateway);
            page.load(session).await?;
            page.set_query(search.unwrap_or_default());
            page.set_tag_filter(tag.as_deref().map(TagFilter::parse).unwrap_or_default());
            let visible = page.visible();
            if json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else {
                print!("{}", presenter.render_note_list(&visible));
            }
        }
        Command::Show { id, json } => {
            let session = guard(&sessions, Route::Notes)?;
            let mut page = NotesPage::new(gateway);
            page.load(session).await?;
            let note = page.select(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(note)?);
            } else {
                print!("{}", presenter.render_note(note));
            }
        }
        Command::Tags => {
            let session = guard(&sessions, Route::Notes)?;
            let mut page = NotesPage::new(gateway);
            page.load(session).await?;
            print!("{}", presenter.render_tags(&page.tags()));
        }
        Command::Create {
            title,
            content,
            tags,
        } => {
            let session = guard(&sessions, Route::Notes)?;
            let draft = NoteDraft::new(title, content).with_tag_input(&tags);
            let created = NotesPage::new(gateway).create(session, draft).await?;
            println!("Created note {}", created.id);
        }
        Command::Edit {
            id,
            title,
            content,
            tags,
        } => {
            let edit = NoteEdit {
                title,
                content,
                tags: tags.as_deref().map(split_tags),
            };
            if edit.is_empty() {
                bail!("Nothing to change: pass --title, --content or --tags");
            }
            let session = guard(&sessions, Route::Notes)?;
            let mut page = NotesPage::new(gateway);
            page.load(session).await?;
            let updated = page.update(session, &id, &edit).await?;
            println!("Updated note {}", updated.id);
        }
        Command::Delete { id } => {
            let session = guard(&sessions, Route::Notes)?;
            NotesPage::new(gateway).delete(session, &id).await?;
            println!("Deleted note {id}");
        }
        Command::Summarize { text, file, note } => {
            let session = guard(&sessions, Route::Summaries)?;
            match note {
                Some(id) => {
                    let mut page = NotesPage::new(gateway);
                    page.load(session).await?;
                    page.select(&id)?;
                    let summary = page.summarize_selected(session).await?;
                    println!("{}", summary.trim_end());
                }
                None => {
                    let input = read_input(text, file)?;
                    let mut page = SummariesPage::new(gateway);
                    let record = page.summarize(session, &input).await?;
                    print!("{}", presenter.render_summary(record));
                }
            }
        }
        Command::Flashcards {
            text,
            file,
            study,
            json,
        } => {
            let session = guard(&sessions, Route::Flashcards)?;
            let input = read_input(text, file)?;
            let mut page = FlashcardsPage::new(gateway);
            let set = page.generate(session, &input).await?;
            let id = set.id;
            if json {
                println!("{}", serde_json::to_string_pretty(set)?);
            } else if study {
                study_set(&mut page, id, &presenter).await?;
            } else {
                print!("{}", presenter.render_flashcard_set(set));
            }
        }
    }

    Ok(())
}

/// Session manager backed by `SMARTNOTES_TOKEN` when set, else the session file.
fn open_sessions(config: &Config) -> Result<Sessions> {
    let store: Box<dyn SessionStore> = match std::env::var(TOKEN_ENV_VAR) {
        Ok(token) if !token.trim().is_empty() => {
            debug!("Using session token from environment");
            Box::new(MemorySessionStore::with_session(Session::new(token.trim())))
        }
        _ => {
            let path = config
                .session
                .path()
                .unwrap_or_else(FileSessionStore::default_path);
            debug!(?path, "Using session file");
            Box::new(FileSessionStore::new(path))
        }
    };
    let mut sessions = SessionManager::new(store);
    sessions.init()?;
    Ok(sessions)
}

/// The session for a protected route, or an instruction to log in.
fn guard(sessions: &Sessions, route: Route) -> Result<&Session> {
    match resolve(route, sessions.current()) {
        Route::Login => bail!(
            "{} Run `smartnotes login <EMAIL>` first.",
            DomainError::NotAuthenticated
        ),
        _ => Ok(sessions.require()?),
    }
}

/// Text from the argument, the file, or piped stdin, in that order.
fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("Provide TEXT, --file, or pipe text on stdin");
    }
    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

/// Step through a set: enter or `f` flips, `n`/`p` move, `q` quits.
async fn study_set<G: AiGateway>(
    page: &mut FlashcardsPage<G>,
    id: u64,
    presenter: &TerminalPresenter,
) -> Result<()> {
    let Some(viewer) = page.start_viewing(id) else {
        return Ok(());
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", presenter.render_card(viewer));
        println!("\n[enter/f] flip  [n] next  [p] prev  [q] quit");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" | "f" => viewer.flip(),
            "n" => {
                if !viewer.next() {
                    println!("Last card.");
                }
            }
            "p" => {
                if !viewer.prev() {
                    println!("First card.");
                }
            }
            "q" => break,
            other => eprintln!("Unknown command: {other}"),
        }
    }
    page.stop_viewing();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }

    #[test]
    fn given_no_session_when_guarding_protected_route_then_asks_to_log_in() {
        let sessions: Sessions = SessionManager::new(Box::new(MemorySessionStore::default()));

        let err = guard(&sessions, Route::Flashcards).unwrap_err();

        assert!(err.to_string().contains("Please log in."));
    }

    #[test]
    fn given_session_when_guarding_then_returns_it() {
        let mut sessions: Sessions = SessionManager::new(Box::new(MemorySessionStore::default()));
        sessions.begin(Session::new("tok")).unwrap();

        assert_eq!(guard(&sessions, Route::Notes).unwrap().token(), "tok");
    }

    #[test]
    fn given_text_argument_when_reading_input_then_prefers_it() {
        let input = read_input(Some("inline".to_string()), Some(PathBuf::from("/nope"))).unwrap();

        assert_eq!(input, "inline");
    }

    #[test]
    fn given_file_when_reading_input_then_returns_contents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "from file").unwrap();

        assert_eq!(read_input(None, Some(path)).unwrap(), "from file");
    }
}

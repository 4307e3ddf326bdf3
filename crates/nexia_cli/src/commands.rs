//! Subcommand handlers. Each one opens the notebook file through a session,
//! dispatches engine messages and saves when the notebook changed.

use anyhow::{bail, Context, Result};
use log::info;
use nexia_core::{
    core_version, ping, AppState, Clock, Env, JsonStorage, Message, NoteId, Notebook, Point,
    Selection, Session, SystemClock, UuidIdGenerator, DEFAULT_NOTEBOOK_NAME,
};
use std::path::Path;

type CliSession = Session<JsonStorage, Env<SystemClock, UuidIdGenerator>>;

pub fn info() -> Result<()> {
    println!("nexia_core ping={}", ping());
    println!("nexia_core version={}", core_version());
    Ok(())
}

pub fn new_notebook(file: &Path, name: Option<String>) -> Result<()> {
    if file.exists() {
        bail!("refusing to overwrite existing file `{}`", file.display());
    }
    let env = Env::system();
    let name = name.unwrap_or_else(|| DEFAULT_NOTEBOOK_NAME.to_string());
    let notebook = Notebook::new(name, env.now());
    let mut session = CliSession::with_state(AppState::new(notebook), JsonStorage::new(), env);
    session.dispatch(Message::SaveNotebookAs(file.to_path_buf()));
    check_error(&session)?;
    println!("created {}", file.display());
    Ok(())
}

pub fn add(file: &Path, title: String, content: Option<String>, at: Option<Point>) -> Result<()> {
    let mut session = open(file)?;
    let create = match at {
        Some(point) => Message::CreateNoteAt(point),
        None => Message::CreateNote,
    };
    let Selection::Single(id) = session.dispatch(create).selection().clone() else {
        bail!("created note was not selected");
    };

    session.dispatch(Message::UpdateNoteTitle(id.clone(), title));
    if let Some(content) = content {
        session.dispatch(Message::UpdateNoteContent(id.clone(), content));
    }
    save(&mut session)?;
    info!("event=cli_add module=cli status=ok note_id={id}");
    println!("{id}");
    Ok(())
}

pub fn list(file: &Path) -> Result<()> {
    let session = open(file)?;
    for note in session.state().notebook().notes() {
        let links: Vec<&str> = note.links.iter().map(NoteId::as_str).collect();
        println!("{}\t{}\t{}", note.id, note.title, links.join(","));
    }
    Ok(())
}

pub fn link(file: &Path, from: String, to: String) -> Result<()> {
    let mut session = open(file)?;
    let (from, to) = (existing(&session, from)?, existing(&session, to)?);
    if from == to {
        bail!("a note cannot link to itself: {from}");
    }
    session.dispatch(Message::LinkNotes { from, to });
    save(&mut session)
}

pub fn unlink(file: &Path, from: String, to: String) -> Result<()> {
    let mut session = open(file)?;
    session.dispatch(Message::UnlinkNotes {
        from: NoteId::from(from),
        to: NoteId::from(to),
    });
    save(&mut session)
}

pub fn remove(file: &Path, id: String) -> Result<()> {
    let mut session = open(file)?;
    let id = existing(&session, id)?;
    session.dispatch(Message::DeleteNote(id));
    save(&mut session)
}

pub fn search(file: &Path, query: String) -> Result<()> {
    let mut session = open(file)?;
    let state = session.dispatch(Message::SetSearchQuery(query));
    for id in state.search_results() {
        if let Some(note) = state.notebook().get(id) {
            println!("{}\t{}", note.id, note.title);
        }
    }
    Ok(())
}

fn open(file: &Path) -> Result<CliSession> {
    let mut session = CliSession::new(JsonStorage::new(), Env::system());
    session.dispatch(Message::LoadNotebook(file.to_path_buf()));
    check_error(&session).with_context(|| format!("failed to open `{}`", file.display()))?;
    Ok(session)
}

fn save(session: &mut CliSession) -> Result<()> {
    if !session.state().is_dirty() {
        return Ok(());
    }
    session.dispatch(Message::SaveNotebook);
    check_error(session).context("failed to save notebook")
}

fn existing(session: &CliSession, id: String) -> Result<NoteId> {
    let id = NoteId::from(id);
    if !session.state().notebook().contains(&id) {
        bail!("note not found: {id}");
    }
    Ok(id)
}

fn check_error(session: &CliSession) -> Result<()> {
    match session.state().error() {
        Some(message) => bail!("{message}"),
        None => Ok(()),
    }
}

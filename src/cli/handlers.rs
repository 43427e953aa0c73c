use crate::client::{ApiError, HttpNotesApi, NotesApi, UiNote, UiNoteCreate, UiNotePatch};
use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::server;

use super::commands::{AddArgs, EditArgs};

pub async fn handle_serve(config: &BoardConfig) -> Result<()> {
    server::serve(config).await
}

pub async fn handle_list(config: &BoardConfig, json: bool) -> Result<()> {
    let api = HttpNotesApi::from_config(&config.client)?;
    let notes = api.get_notes().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("No notes");
    } else {
        for note in &notes {
            println!("{}", format_note(note));
        }
    }

    Ok(())
}

pub async fn handle_add(config: &BoardConfig, args: AddArgs) -> Result<()> {
    let api = HttpNotesApi::from_config(&config.client)?;
    let note = api
        .create_note(&UiNoteCreate {
            x: args.x,
            y: args.y,
            w: args.w,
            h: args.h,
            text: args.text,
            color: args.color,
            z: args.z,
        })
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Created note {}", note.id);
    }

    Ok(())
}

pub async fn handle_get(config: &BoardConfig, id: String, json: bool) -> Result<()> {
    let api = HttpNotesApi::from_config(&config.client)?;
    let note = api.get_note(&id).await.map_err(|e| not_found(e, &id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("{}", format_note(&note));
    }

    Ok(())
}

pub async fn handle_edit(config: &BoardConfig, args: EditArgs) -> Result<()> {
    let text = if args.clear_text {
        Some(String::new())
    } else {
        args.text
    };
    let patch = UiNotePatch {
        x: args.x,
        y: args.y,
        w: args.w,
        h: args.h,
        text,
        color: args.color,
        z: args.z,
    };

    if patch.is_empty() {
        return Err(BoardError::Validation("nothing to change".to_string()));
    }

    let api = HttpNotesApi::from_config(&config.client)?;
    let updated = api
        .update_note(&args.id, &patch)
        .await
        .map_err(|e| not_found(e, &args.id))?;

    match updated {
        Some(note) if args.json => println!("{}", serde_json::to_string_pretty(&note)?),
        Some(note) => println!("Updated {}", format_note(&note)),
        None => println!("Updated note {}", args.id),
    }

    Ok(())
}

pub async fn handle_rm(config: &BoardConfig, id: String) -> Result<()> {
    let api = HttpNotesApi::from_config(&config.client)?;
    api.delete_note(&id).await.map_err(|e| not_found(e, &id))?;
    println!("Deleted note {}", id);
    Ok(())
}

fn not_found(err: ApiError, id: &str) -> BoardError {
    if err.is_not_found() {
        BoardError::NotFound(id.to_string())
    } else {
        err.into()
    }
}

fn format_note(note: &UiNote) -> String {
    let text = note.text.lines().next().unwrap_or("");
    format!(
        "{}  {:<6} z={:<3} at ({}, {}) {}x{}  {}",
        note.id, note.color.to_string(), note.z, note.x, note.y, note.w, note.h, text
    )
}

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::command::{Command, HELP};
use crate::config::AliasTable;
use crate::model::PlaylistModel;

pub struct App {
    pub model: PlaylistModel,
    pub aliases: AliasTable,
    pub message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(model: PlaylistModel, aliases: AliasTable) -> Self {
        Self {
            model,
            aliases,
            message: None,
            should_quit: false,
        }
    }

    /// Read commands from `input` until quit or end of input.
    /// Status messages and the prompt go to `out`.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> io::Result<()> {
        let mut line = String::new();
        while !self.should_quit {
            write!(out, "> ")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            self.message = None;
            self.handle_line(&line);
            if let Some(msg) = &self.message {
                writeln!(out, "{}", msg)?;
            }
        }
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) {
        let expanded = self.aliases.expand(line);
        match Command::parse(&expanded) {
            Some(cmd) => {
                debug!(command = ?cmd, "dispatch");
                self.handle_command(cmd);
            }
            None => {
                self.message = Some(format!("Invalid arguments: {} (try 'help')", expanded));
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        let result = match cmd {
            Command::Lists => {
                self.model.refresh_list_names();
                Ok(())
            }
            Command::NewList(name) => {
                // a new list opens straight away
                self.model
                    .add_new_list(&name, Vec::new())
                    .and_then(|id| self.model.load_list(id).map(|_| id))
                    .map(|id| {
                        self.message = Some(format!("Created playlist {} ({})", name, id));
                    })
            }
            Command::Load(id) => self.model.load_list(id),
            Command::Close => {
                self.model.unselect_current_list();
                Ok(())
            }
            Command::DeleteList(id) => self.model.delete_list(id).map(|_| {
                self.message = Some(format!("Deleted playlist {}", id));
            }),
            Command::Rename { id, name } => self.model.rename_list(id, &name),
            Command::Add => self.model.add_add_song_transaction(),
            Command::Remove(index) => self.model.add_remove_song_transaction(index),
            Command::Edit { index, song } => self.model.add_edit_song_transaction(index, song),
            Command::Move { from, to } => self.model.add_move_song_transaction(from, to),
            Command::Undo => self.model.undo().map(|done| {
                if !done {
                    self.message = Some("Nothing to undo".to_string());
                }
            }),
            Command::Redo => self.model.redo().map(|done| {
                if !done {
                    self.message = Some("Nothing to redo".to_string());
                }
            }),
            Command::Show => {
                self.model.refresh_playlist();
                Ok(())
            }
            Command::Help => {
                self.message = Some(HELP.to_string());
                Ok(())
            }
            Command::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Command::Unknown(word) => {
                self.message = Some(format!("Unknown command: {}", word));
                Ok(())
            }
        };

        if let Err(e) = result {
            warn!(error = %e, "command failed");
            self.message = Some(format!("Error: {}", e));
        }
    }
}

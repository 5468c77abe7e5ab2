use regex::Regex;

use crate::playlist::Song;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lists,
    NewList(String),
    Load(u64),
    Close,
    DeleteList(u64),
    Rename { id: u64, name: String },
    Add,
    Remove(usize),              // 0-based song index
    Edit { index: usize, song: Song },
    Move { from: usize, to: usize },
    Undo,
    Redo,
    Show,
    Help,
    Quit,
    Unknown(String),
}

/// Parse a 1-based song number typed by the user into an index
fn song_index(s: &str) -> Option<usize> {
    s.trim().parse::<usize>().ok()?.checked_sub(1)
}

impl Command {
    /// Returns None when a known command has malformed arguments
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();

        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        match (word, rest) {
            ("lists" | "ls", "") => Some(Command::Lists),
            ("new", "") => Some(Command::NewList("Untitled".to_string())),
            ("new", name) => Some(Command::NewList(name.to_string())),
            ("load" | "open", id) => id.parse().ok().map(Command::Load),
            ("close", "") => Some(Command::Close),
            ("delete", id) => id.parse().ok().map(Command::DeleteList),
            ("rename", args) => {
                let (id, name) = args.split_once(char::is_whitespace)?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some(Command::Rename { id: id.parse().ok()?, name: name.to_string() })
            }
            ("add", "") => Some(Command::Add),
            ("edit", _) => Self::parse_edit(trimmed),
            ("remove" | "rm", n) => song_index(n).map(Command::Remove),
            ("move" | "mv", args) => {
                let mut parts = args.split_whitespace();
                let from = song_index(parts.next()?)?;
                let to = song_index(parts.next()?)?;
                if parts.next().is_some() {
                    return None;
                }
                Some(Command::Move { from, to })
            }
            ("undo" | "u", "") => Some(Command::Undo),
            ("redo" | "r", "") => Some(Command::Redo),
            ("show" | "p", "") => Some(Command::Show),
            ("help" | "?", "") => Some(Command::Help),
            ("quit" | "q", "") => Some(Command::Quit),
            (
                "lists" | "ls" | "close" | "add" | "undo" | "u" | "redo" | "r" | "show" | "p"
                | "help" | "?" | "quit" | "q",
                _,
            ) => None,
            _ => Some(Command::Unknown(trimmed.to_string())),
        }
    }

    /// Parse `edit <n> <title> | <artist> | <youtube id>`
    fn parse_edit(input: &str) -> Option<Self> {
        let re = Regex::new(r"^edit\s+(\d+)\s+([^|]*?)\s*\|\s*([^|]*?)\s*\|\s*(\S*)$").ok()?;
        let caps = re.captures(input)?;

        let index = song_index(caps.get(1)?.as_str())?;
        let song = Song::new(
            caps.get(2)?.as_str(),
            caps.get(3)?.as_str(),
            caps.get(4)?.as_str(),
        );
        Some(Command::Edit { index, song })
    }
}

pub const HELP: &str = "\
commands:
  lists                         show all playlists
  new [name]                    create a playlist
  load <id>                     open a playlist for editing (clears undo history)
  close                         close the open playlist
  delete <id>                   delete a playlist (not undoable)
  rename <id> <name>            rename a playlist
  add                           append a new song
  remove <n>                    remove song n
  edit <n> <title> | <artist> | <youtube id>
  move <from> <to>              move a song
  undo | redo
  show                          print the open playlist
  quit";

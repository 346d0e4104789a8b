//! Search query editing (pure state transitions).
//!
//! All functions are pure - no side effects, testable without TUI.
//! The cursor counts characters, not bytes.

/// Search query editor state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryInput {
    /// Not editing.
    #[default]
    Inactive,
    /// Editing `query` with the cursor before character `cursor`.
    Typing {
        /// Text typed so far.
        query: String,
        /// Cursor position in characters.
        cursor: usize,
    },
}

impl QueryInput {
    /// Whether the editor is capturing keys.
    pub fn is_typing(&self) -> bool {
        matches!(self, QueryInput::Typing { .. })
    }
}

fn byte_index(query: &str, cursor: usize) -> usize {
    query
        .char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(query.len())
}

/// Start editing, seeded with the query currently shown.
pub fn activate(state: QueryInput, current: &str) -> QueryInput {
    match state {
        QueryInput::Inactive => QueryInput::Typing {
            query: current.to_string(),
            cursor: current.chars().count(),
        },
        other => other,
    }
}

/// Insert `ch` at the cursor.
pub fn handle_char_input(state: QueryInput, ch: char) -> QueryInput {
    match state {
        QueryInput::Typing { mut query, cursor } => {
            query.insert(byte_index(&query, cursor), ch);
            QueryInput::Typing {
                query,
                cursor: cursor + 1,
            }
        }
        other => other,
    }
}

/// Delete the character before the cursor.
pub fn handle_backspace(state: QueryInput) -> QueryInput {
    match state {
        QueryInput::Typing { mut query, cursor } if cursor > 0 => {
            query.remove(byte_index(&query, cursor - 1));
            QueryInput::Typing {
                query,
                cursor: cursor - 1,
            }
        }
        other => other,
    }
}

/// Move the cursor left, saturating at 0.
pub fn handle_cursor_left(state: QueryInput) -> QueryInput {
    match state {
        QueryInput::Typing { query, cursor } => QueryInput::Typing {
            query,
            cursor: cursor.saturating_sub(1),
        },
        other => other,
    }
}

/// Move the cursor right, saturating at the end.
pub fn handle_cursor_right(state: QueryInput) -> QueryInput {
    match state {
        QueryInput::Typing { query, cursor } => {
            let max_cursor = query.chars().count();
            QueryInput::Typing {
                query,
                cursor: (cursor + 1).min(max_cursor),
            }
        }
        other => other,
    }
}

/// Finish editing. Returns the submitted query; empty lists every user.
pub fn submit(state: QueryInput) -> (QueryInput, Option<String>) {
    match state {
        QueryInput::Typing { query, .. } => (QueryInput::Inactive, Some(query.trim().to_string())),
        QueryInput::Inactive => (QueryInput::Inactive, None),
    }
}

/// Abandon editing without searching.
pub fn cancel(_state: QueryInput) -> QueryInput {
    QueryInput::Inactive
}

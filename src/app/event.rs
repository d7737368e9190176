use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::mode::Mode;
use crate::app::state::{ActionFocus, AppState};
use crate::utils::unicode::{
    next_char_boundary, next_word_boundary, prev_char_boundary, prev_word_boundary,
};

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Result<()> {
    if state.show_help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            state.show_help = false;
        }
        return Ok(());
    }

    match state.mode {
        Mode::Normal => handle_normal_mode(key, state),
        Mode::Actions => handle_actions_mode(key, state),
        Mode::Form => handle_form_mode(key, state),
    }
    Ok(())
}

fn handle_normal_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Char('?') => state.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => state.move_cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_cursor_up(),
        KeyCode::Char('x') | KeyCode::Char(' ') => state.toggle_selected(),
        KeyCode::Char('a') | KeyCode::Char('n') => state.open_create_form(),
        KeyCode::Char('e') | KeyCode::Enter => state.open_edit_form(),
        KeyCode::Char('h') | KeyCode::Left => state.open_actions(),
        KeyCode::Char('r') => state.refresh(),
        KeyCode::Char('y') => state.yank_selected(),
        _ => {}
    }
}

fn handle_actions_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('l') => {
            state.action_focus = state.action_focus.toggled();
        }
        KeyCode::Enter => {
            state.close_actions();
            match state.action_focus {
                ActionFocus::Edit => state.open_edit_form(),
                ActionFocus::Delete => state.delete_selected(),
            }
        }
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('q') => state.close_actions(),
        // Moving the cursor slides the reveal shut, like the swipe it mirrors.
        KeyCode::Char('j') | KeyCode::Down => {
            state.close_actions();
            state.move_cursor_down();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.close_actions();
            state.move_cursor_up();
        }
        _ => {}
    }
}

fn handle_form_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            state.close_form();
            return;
        }
        KeyCode::Enter => {
            state.submit_form();
            return;
        }
        _ => {}
    }

    let Some(form) = state.form.as_mut() else { return };

    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            form.focus = form.focus.toggled();
        }
        KeyCode::Backspace => {
            let (buffer, cursor) = form.focused_buffer_mut();
            if *cursor > 0 {
                let prev = prev_char_boundary(buffer, *cursor);
                buffer.drain(prev..*cursor);
                *cursor = prev;
            }
        }
        KeyCode::Left if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let (buffer, cursor) = form.focused_buffer_mut();
            *cursor = prev_word_boundary(buffer, *cursor);
        }
        KeyCode::Right if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let (buffer, cursor) = form.focused_buffer_mut();
            *cursor = next_word_boundary(buffer, *cursor);
        }
        KeyCode::Left => {
            let (buffer, cursor) = form.focused_buffer_mut();
            *cursor = prev_char_boundary(buffer, *cursor);
        }
        KeyCode::Right => {
            let (buffer, cursor) = form.focused_buffer_mut();
            *cursor = next_char_boundary(buffer, *cursor);
        }
        KeyCode::Home => {
            let (_, cursor) = form.focused_buffer_mut();
            *cursor = 0;
        }
        KeyCode::End => {
            let (buffer, cursor) = form.focused_buffer_mut();
            *cursor = buffer.len();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let (buffer, cursor) = form.focused_buffer_mut();
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        _ => {}
    }
}

// Keyboard listener. Translates quit chords into a single shutdown message.

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use tokio::sync::mpsc;

/// Spawns a task reading terminal events and returns a channel that yields
/// one message when a quit chord (q, Esc, or Ctrl-C in raw mode) is pressed.
/// The task ends after the first quit or when the event stream closes.
pub fn spawn_quit_listener() -> mpsc::Receiver<()> {
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(event) = events.next().await {
            let Ok(Event::Key(key)) = event else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                || (key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL));
            if quit {
                let _ = tx.send(()).await;
                break;
            }
        }
    });
    rx
}

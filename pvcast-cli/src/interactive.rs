use inquire::{CustomType, InquireError, Select, Text};
use pvcast_core::{AppState, FetchOrchestrator, HeadlessMap};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SetLatitude,
    SetLongitude,
    ClickMap,
    Fetch,
    Refresh,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::SetLatitude => "Set latitude",
            Action::SetLongitude => "Set longitude",
            Action::ClickMap => "Click map",
            Action::Fetch => "Fetch weather",
            Action::Refresh => "Refresh",
            Action::Quit => "Quit",
        })
    }
}

/// Fetch is only offered while no cycle is loading; refresh only while one is.
fn actions(can_fetch: bool) -> Vec<Action> {
    let mut actions = vec![Action::SetLatitude, Action::SetLongitude, Action::ClickMap];
    if can_fetch {
        actions.push(Action::Fetch);
    } else {
        actions.push(Action::Refresh);
    }
    actions.push(Action::Quit);
    actions
}

/// Prompt loop. Fetches run in the background so coordinates can be edited
/// while a cycle is in flight; the view shows "Loading..." until it ends.
pub async fn run(
    orchestrator: &FetchOrchestrator,
    state: Arc<Mutex<AppState<HeadlessMap>>>,
) -> anyhow::Result<()> {
    loop {
        let can_fetch = {
            let state = state.lock().await;
            println!("\n{}", render::view(&state));
            state.can_fetch()
        };

        let action = match Select::new("What next?", actions(can_fetch)).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match action {
            Action::SetLatitude => {
                let current = state.lock().await.coordinate().latitude_text().to_string();
                let text = Text::new("Latitude:").with_initial_value(&current).prompt()?;
                state.lock().await.set_latitude_text(text);
            }
            Action::SetLongitude => {
                let current = state.lock().await.coordinate().longitude_text().to_string();
                let text = Text::new("Longitude:").with_initial_value(&current).prompt()?;
                state.lock().await.set_longitude_text(text);
            }
            Action::ClickMap => {
                let lat = CustomType::<f64>::new("Clicked latitude:").prompt()?;
                let lng = CustomType::<f64>::new("Clicked longitude:").prompt()?;
                state.lock().await.on_map_click(lat, lng);
            }
            Action::Fetch => {
                // Detached: results land in `state`.
                orchestrator.spawn(state.clone()).await;
            }
            Action::Refresh => {}
            Action::Quit => break,
        }
    }

    Ok(())
}

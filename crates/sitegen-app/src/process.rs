//! Message processing
//!
//! Runs a message through the TEA update loop and hands every resulting
//! action to the action layer.

use tokio::sync::mpsc;

use sitegen_api::GenerationApi;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<A>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    api: &A,
) where
    A: GenerationApi + Clone + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), api);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_key::InputKey;
    use sitegen_api::test_utils::ScriptedApi;

    #[tokio::test]
    async fn test_follow_up_messages_are_processed() {
        let mut state = AppState::new();
        let (tx, _rx) = mpsc::channel(8);
        let api = ScriptedApi::new();

        // Key -> InputChar
        process_message(&mut state, Message::Key(InputKey::Char('x')), &tx, &api);

        assert_eq!(state.input.draft(), "x");
    }

    #[tokio::test]
    async fn test_submit_action_reaches_the_api() {
        let mut state = AppState::new();
        state.input.set_draft("a blog site");
        let (tx, mut rx) = mpsc::channel(8);
        let api = ScriptedApi::new().with_submission("p1");

        process_message(&mut state, Message::Key(InputKey::Enter), &tx, &api);

        match rx.recv().await {
            Some(Message::GenerationSucceeded { project_id }) => {
                assert_eq!(project_id.as_str(), "p1");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(api.submit_count(), 1);
    }
}

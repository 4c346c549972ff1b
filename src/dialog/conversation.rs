use std::future::{ready, Future};

use tracing::info;

use crate::dialog::protocol::DialogState;
use crate::error::Result;
use crate::response::{Dialog, PredictionResult};
use crate::services::luis::client::LuisClient;
use crate::services::luis::transport::Transport;

/// The user's answer to a dialog prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Slot to re-resolve instead of the service's next question.
    pub force_set: Option<String>,
}

impl Reply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            force_set: None,
        }
    }

    pub fn force_set(mut self, parameter_name: impl Into<String>) -> Self {
        self.force_set = Some(parameter_name.into());
        self
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Reply::new(text)
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Reply::new(text)
    }
}

/// Source of answers while a dialog is in progress.
///
/// Failures reading the answer surface as [`crate::LuisError::Io`] and end
/// the conversation.
pub trait Prompter {
    fn answer(&mut self, dialog: &Dialog) -> impl Future<Output = Result<Reply>> + Send;
}

impl<F> Prompter for F
where
    F: FnMut(&Dialog) -> Result<Reply>,
{
    fn answer(&mut self, dialog: &Dialog) -> impl Future<Output = Result<Reply>> + Send {
        ready(self(dialog))
    }
}

/// Predicts `text`, then answers dialog prompts until the result is final.
pub async fn converse<T, P>(
    client: &LuisClient<T>,
    text: &str,
    prompter: &mut P,
) -> Result<PredictionResult>
where
    T: Transport + 'static,
    P: Prompter,
{
    let result = client.predict(text).await?;
    follow_dialog(client, result, prompter).await
}

/// Keeps replying while `result`'s dialog is in progress.
///
/// There is no turn limit: a service that never finishes its dialog keeps
/// this loop running for as long as the prompter keeps answering.
pub async fn follow_dialog<T, P>(
    client: &LuisClient<T>,
    mut result: PredictionResult,
    prompter: &mut P,
) -> Result<PredictionResult>
where
    T: Transport + 'static,
    P: Prompter,
{
    let mut turn = 0usize;
    while let (DialogState::InProgress, Some(dialog)) = (result.dialog_state(), result.dialog()) {
        turn += 1;
        info!(
            turn,
            parameter = dialog.parameter_name().unwrap_or("-"),
            "Dialog in progress"
        );

        let reply = prompter.answer(dialog).await?;
        result = client
            .reply(&reply.text, &result, reply.force_set.as_deref())
            .await?;
    }

    info!(turns = turn, state = ?result.dialog_state(), "Dialog settled");
    Ok(result)
}

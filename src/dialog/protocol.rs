use crate::error::{InputError, LuisError, Result};
use crate::request::RequestDescriptor;
use crate::response::{Dialog, PredictionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    /// No dialog attached. The top intent is final.
    NoDialog,
    /// The service wants another answer: show the prompt, send a reply.
    InProgress,
    /// Every parameter is resolved. Final, like `NoDialog`.
    Finished,
}

impl DialogState {
    pub fn of(dialog: Option<&Dialog>) -> Self {
        match dialog {
            None => DialogState::NoDialog,
            Some(d) if d.is_finished() => DialogState::Finished,
            Some(_) => DialogState::InProgress,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, DialogState::InProgress)
    }
}

impl PredictionResult {
    pub fn dialog_state(&self) -> DialogState {
        DialogState::of(self.dialog())
    }
}

/// Builds the request that answers `previous`'s dialog with `text`.
///
/// `force_set` names a slot the service should resolve next instead of its
/// own choice, e.g. to correct an already filled parameter.
pub fn build_reply(
    app_id: &str,
    app_key: &str,
    verbose: bool,
    text: &str,
    previous: &PredictionResult,
    force_set: Option<&str>,
) -> Result<RequestDescriptor> {
    let dialog = previous.dialog().ok_or(LuisError::MissingDialogContext)?;

    let text = text.trim();
    if text.is_empty() {
        return Err(LuisError::invalid("text", InputError::Empty));
    }

    let mut request = RequestDescriptor::predict(app_id, app_key, text, verbose);
    request.context_id = Some(dialog.context_id().to_string());
    request.force_set = force_set.map(str::to_string);
    Ok(request)
}

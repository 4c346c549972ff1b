use crate::error::LuisError;
use crate::response::PredictionResult;

/// Completion callbacks for a request running on a background task.
/// Exactly one of the two is called.
pub trait ResponseHandlers: Send + 'static {
    fn on_success(self, result: PredictionResult);
    fn on_failure(self, error: LuisError);
}

/// Pairs two closures into a [`ResponseHandlers`].
pub struct Handlers<S, F> {
    on_success: S,
    on_failure: F,
}

impl<S, F> Handlers<S, F>
where
    S: FnOnce(PredictionResult) + Send + 'static,
    F: FnOnce(LuisError) + Send + 'static,
{
    pub fn new(on_success: S, on_failure: F) -> Self {
        Self { on_success, on_failure }
    }
}

impl<S, F> ResponseHandlers for Handlers<S, F>
where
    S: FnOnce(PredictionResult) + Send + 'static,
    F: FnOnce(LuisError) + Send + 'static,
{
    fn on_success(self, result: PredictionResult) {
        (self.on_success)(result)
    }

    fn on_failure(self, error: LuisError) {
        (self.on_failure)(error)
    }
}

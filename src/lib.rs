//! Client for a hosted natural-language-understanding prediction service.
//!
//! Send text, get back the service's interpretation as a typed
//! [`PredictionResult`]: the top intent, every scored intent, extracted
//! entities and, for dialog-enabled applications, the slot filling state
//! needed to continue the conversation.
//!
//! ```rust,no_run
//! use luis_sdk::{ClientConfig, LuisClient};
//!
//! # async fn example() -> luis_sdk::Result<()> {
//! let client = LuisClient::new(ClientConfig::new("app-id", "subscription-key"))?;
//! let mut result = client.predict("book a flight to Paris").await?;
//! while let Some(dialog) = result.dialog().filter(|d| !d.is_finished()) {
//!     println!("{}", dialog.prompt().unwrap_or_default());
//!     result = client.reply("tomorrow", &result, None).await?;
//! }
//! println!("{}", result.top_intent().name);
//! # Ok(())
//! # }
//! ```

pub mod dialog;
pub mod error;
pub mod request;
pub mod response;
pub mod services;

pub use dialog::{build_reply, converse, follow_dialog, DialogState, Prompter, Reply};
pub use error::{InputError, LuisError, Result};
pub use request::RequestDescriptor;
pub use response::{
    parse, Action, CompositeEntity, CompositeEntityChild, Dialog, Entity, Intent, Parameter,
    ParameterValue, PredictionResult, RawResponse,
};
pub use services::luis::{ClientConfig, Handlers, HttpTransport, LuisClient, ResponseHandlers, Transport};

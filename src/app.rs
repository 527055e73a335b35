use anyhow::Result;
use tracing::error;

use crate::concerts::ConcertLookup;
use crate::config::AppConfig;
use crate::conversation::{ConcertConversation, ConversationOutcome};
use crate::providers::base::Provider;
use crate::registry::functions_for_client;

/// Load the local inputs and hold the concert conversation with `provider`.
///
/// A tool call without a usable `user_name` is logged and ends the run
/// quietly with `Ok(None)`; every other failure is returned.
pub fn run<P: Provider + ?Sized>(
    provider: &P,
    config: &AppConfig,
) -> Result<Option<ConversationOutcome>> {
    let tools = functions_for_client(&config.tools_dir)?;
    let concerts = ConcertLookup::new(&config.concert_data).with_matching(config.name_matching);

    let mut conversation = ConcertConversation::new(provider, &tools, &concerts);
    match conversation.run() {
        Ok(outcome) => Ok(Some(outcome)),
        Err(err) if err.is_missing_argument() => {
            error!("User name not found in arguments: {}", err);
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

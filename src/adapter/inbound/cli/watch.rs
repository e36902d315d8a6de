//! Handler for `watch`.

use tokio::signal;

use crate::adapter::inbound::cli::key::resolve_key;
use crate::adapter::inbound::cli::output;
use crate::application::store::KeyValueStore;
use crate::error::Result;

/// Execute `watch`: print every notification until Ctrl-C.
pub async fn execute(store: &KeyValueStore, key: &str) -> Result<()> {
    let key = resolve_key(key);
    let label = key.clone();
    let subscription = store.subscribe(&key, move |value| {
        output::change(&label, value.as_ref());
    });

    output::header();
    output::field("Key", output::highlight(&key));
    output::field("Feed", subscription.kind());
    if output::verbosity() > 0 {
        output::field("Backend", store.mode());
        output::field("Poll every", format!("{:?}", store.poll_interval()));
    }
    output::hint("press Ctrl-C to stop");

    signal::ctrl_c().await?;
    subscription.cancel();
    output::note("Stopped watching");
    Ok(())
}

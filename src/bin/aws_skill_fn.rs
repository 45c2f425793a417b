use lambda_runtime::{handler_fn, Context, Error};
use podcast_skill::catalog::Catalog;
use podcast_skill::dispatch::{Dispatcher, IntentRequest};
use podcast_skill::event::{SkillRequest, SkillResponse};
use podcast_skill::{get_resolver, util};
use serde_json::Value;
use simple_error::SimpleResult;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    util::init_log();

    // missing catalog configuration is a startup fault
    let path = std::env::var("PODCASTS_FILE")?;
    let catalog = Arc::new(Catalog::from_path(&path)?);

    lambda_runtime::run(handler_fn(move |event: Value, ctx: Context| {
        let catalog = Arc::clone(&catalog);
        async move { handle(event, ctx, &catalog) }
    }))
    .await?;
    Ok(())
}

fn handle(event: Value, _ctx: Context, catalog: &Catalog) -> SimpleResult<SkillResponse> {
    log::debug!("{}", event);

    let envelope: SkillRequest = serde_json::from_value(event).map_err(util::to_simple)?;
    let req = IntentRequest::from(envelope);

    let dispatcher = Dispatcher::new(catalog, get_resolver());
    Ok(dispatcher.dispatch(&req).into())
}

pub mod catalog;
pub mod directive;
pub mod dispatch;
pub mod entity;
pub mod event;
pub mod feed;
pub mod speech;
pub mod util;

// default impl of the feed resolver
pub fn get_resolver() -> impl feed::Resolver {
    feed::Client::new()
}

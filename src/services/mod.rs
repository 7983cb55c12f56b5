pub mod bookmarks;
pub mod exercises;
pub mod feedback;
pub mod speech;
pub mod subscriptions;
